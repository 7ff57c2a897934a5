//! Defines the `FeatureWriter` struct for writing annotated genes as two
//! tab-separated tables: one row per gene and one row per motif occurrence.
//!

use crate::genes::GeneFeatureSet;
use crate::utils::Result;
use itertools::Itertools;
use std::env;
use std::fs::File;
use std::io::{BufWriter, Write};

const GENE_COLUMNS: [&str; 5] = ["header", "length", "exon_start", "exon_length", "motif_count"];
const MOTIF_COLUMNS: [&str; 6] = ["header", "root", "variant", "start", "end", "color"];

/// Writes gene and motif tables for downstream rendering.
pub struct FeatureWriter<W: Write> {
    genes: W,
    motifs: W,
}

impl FeatureWriter<BufWriter<File>> {
    /// Creates `genes_path` and `motifs_path` and writes their header lines.
    pub fn new(genes_path: &str, motifs_path: &str) -> Result<Self> {
        let open = |path: &str| {
            File::create(path)
                .map(BufWriter::new)
                .map_err(|e| format!("{}: {}", path, e))
        };
        FeatureWriter::from_writers(open(genes_path)?, open(motifs_path)?)
    }
}

impl<W: Write> FeatureWriter<W> {
    pub fn from_writers(genes: W, motifs: W) -> Result<Self> {
        let mut writer = FeatureWriter { genes, motifs };
        let meta = meta_lines();
        write_header(&mut writer.genes, &meta, &GENE_COLUMNS)?;
        write_header(&mut writer.motifs, &meta, &MOTIF_COLUMNS)?;
        Ok(writer)
    }

    pub fn write(&mut self, gene: &GeneFeatureSet) -> Result<()> {
        writeln!(
            self.genes,
            "{}\t{}\t{}\t{}\t{}",
            gene.header,
            gene.length,
            gene.exon.start,
            gene.exon.length,
            gene.occurrences.len()
        )
        .map_err(|e| e.to_string())?;

        for occurrence in &gene.occurrences {
            let (g, u, y) = occurrence.color;
            writeln!(
                self.motifs,
                "{}\t{}\t{}\t{}\t{}\t{},{},{}",
                gene.header,
                occurrence.root,
                occurrence.variant,
                occurrence.start,
                occurrence.end(),
                g,
                u,
                y
            )
            .map_err(|e| e.to_string())?;
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<(W, W)> {
        self.genes.flush().map_err(|e| e.to_string())?;
        self.motifs.flush().map_err(|e| e.to_string())?;
        Ok((self.genes, self.motifs))
    }
}

fn meta_lines() -> Vec<String> {
    let command_line = env::args().join(" ");
    vec![
        format!(
            "##{}Version={}",
            env!("CARGO_PKG_NAME"),
            *crate::cli::FULL_VERSION
        ),
        format!("##{}Command={}", env!("CARGO_PKG_NAME"), command_line),
    ]
}

fn write_header<W: Write>(writer: &mut W, meta: &[String], columns: &[&str]) -> Result<()> {
    for line in meta {
        writeln!(writer, "{}", line).map_err(|e| e.to_string())?;
    }
    writeln!(writer, "#{}", columns.join("\t")).map_err(|e| e.to_string())
}
