use crate::cli::ExpandArgs;
use crate::motifs::VariantIndex;
use crate::utils::{load_variant_index, Result};
use std::io::{self, BufWriter, Write};

pub fn expand(args: ExpandArgs) -> Result<()> {
    let index = load_variant_index(&args.motifs_path, args.alphabet)?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    write_variants(&index, &mut writer)?;
    writer.flush().map_err(|e| e.to_string())
}

/// One `variant<TAB>root` line per index entry, grouped by motif in registration order.
fn write_variants<W: Write>(index: &VariantIndex, writer: &mut W) -> Result<()> {
    for (root_index, root) in index.roots().iter().enumerate() {
        let variants = index.variants_of(root_index);
        if variants.is_empty() {
            log::warn!(
                "Motif {} has no variants of its own; all were claimed by earlier motifs",
                root
            );
        }
        for variant in variants {
            writeln!(writer, "{}\t{}", variant, root).map_err(|e| e.to_string())?;
        }
    }
    Ok(())
}
