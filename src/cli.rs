use crate::genes::GeneErrorPolicy;
use crate::motifs::DegenerateTable;
use crate::utils::Result;
use clap::{ArgAction, ArgGroup, Parser, Subcommand};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use once_cell::sync::Lazy;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

pub static FULL_VERSION: Lazy<String> = Lazy::new(|| {
    format!(
        "{}-{}",
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    )
});

#[derive(Parser)]
#[command(name="motifmark",
          version=&**FULL_VERSION,
          about="Mark degenerate motifs and exons on gene sequences",
          long_about = None,
          disable_help_subcommand = true,
          help_template = "{name} {version}\n{about-section}\n{usage-heading}\n    {usage}\n\n{all-args}{after-help}",
          )]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(global = true)]
    #[clap(action = ArgAction::Count, help = "Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)")]
    pub verbosity: u8,
}

#[derive(Subcommand)]
pub enum Command {
    #[clap(about = "Annotate genes with motif occurrences and exon spans")]
    Annotate(AnnotateArgs),
    #[clap(about = "List the literal variants of each motif")]
    Expand(ExpandArgs),
    #[clap(about = "Check gene and motif inputs without writing features")]
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("annotate")))]
#[command(arg_required_else_help(true))]
pub struct AnnotateArgs {
    #[clap(required = true)]
    #[clap(short = 'f')]
    #[clap(long = "genes")]
    #[clap(help = "FASTA file of genes; exon bases uppercase, intron bases lowercase")]
    #[clap(value_name = "FASTA")]
    #[arg(value_parser = check_file_exists)]
    pub genes_path: PathBuf,

    #[clap(required = true)]
    #[clap(short = 'm')]
    #[clap(long = "motifs")]
    #[clap(help = "Text file with one motif per line; degenerate bases allowed")]
    #[clap(value_name = "MOTIFS")]
    #[arg(value_parser = check_file_exists)]
    pub motifs_path: PathBuf,

    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "output-prefix")]
    #[clap(help = "Prefix for output files")]
    #[clap(value_name = "OUTPUT_PREFIX")]
    #[arg(value_parser = check_prefix_path)]
    pub output_prefix: String,

    #[clap(short = 't')]
    #[clap(long = "threads")]
    #[clap(help = "Number of threads")]
    #[clap(value_name = "THREADS")]
    #[clap(default_value = "1")]
    #[arg(value_parser = threads_in_range)]
    pub num_threads: usize,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "alphabet")]
    #[clap(value_name = "ALPHABET")]
    #[clap(help = "Degenerate base table (iupac or minimal)")]
    #[clap(default_value = "iupac")]
    pub alphabet: DegenerateTable,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "on-gene-error")]
    #[clap(value_name = "POLICY")]
    #[clap(help = "What to do with genes that cannot be annotated (skip or abort)")]
    #[clap(default_value = "skip")]
    pub on_gene_error: GeneErrorPolicy,
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("expand")))]
#[command(arg_required_else_help(true))]
pub struct ExpandArgs {
    #[clap(required = true)]
    #[clap(short = 'm')]
    #[clap(long = "motifs")]
    #[clap(help = "Text file with one motif per line; degenerate bases allowed")]
    #[clap(value_name = "MOTIFS")]
    #[arg(value_parser = check_file_exists)]
    pub motifs_path: PathBuf,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "alphabet")]
    #[clap(value_name = "ALPHABET")]
    #[clap(help = "Degenerate base table (iupac or minimal)")]
    #[clap(default_value = "iupac")]
    pub alphabet: DegenerateTable,
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("validate")))]
#[command(arg_required_else_help(true))]
pub struct ValidateArgs {
    #[clap(required = true)]
    #[clap(short = 'f')]
    #[clap(long = "genes")]
    #[clap(help = "FASTA file of genes; exon bases uppercase, intron bases lowercase")]
    #[clap(value_name = "FASTA")]
    #[arg(value_parser = check_file_exists)]
    pub genes_path: PathBuf,

    #[clap(required = true)]
    #[clap(short = 'm')]
    #[clap(long = "motifs")]
    #[clap(help = "Text file with one motif per line; degenerate bases allowed")]
    #[clap(value_name = "MOTIFS")]
    #[arg(value_parser = check_file_exists)]
    pub motifs_path: PathBuf,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "alphabet")]
    #[clap(value_name = "ALPHABET")]
    #[clap(help = "Degenerate base table (iupac or minimal)")]
    #[clap(default_value = "iupac")]
    pub alphabet: DegenerateTable,
}

pub fn init_verbose(args: &Cli) {
    let filter_level: LevelFilter = match args.verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match record.level() {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

fn check_prefix_path(s: &str) -> Result<String> {
    let path = Path::new(s);
    if let Some(parent_dir) = path.parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            return Err(format!("Path does not exist: {}", parent_dir.display()));
        }
    }
    Ok(s.to_string())
}

fn threads_in_range(s: &str) -> Result<usize> {
    let thread: usize = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid thread number", s))?;
    if thread >= 1 {
        Ok(thread)
    } else {
        Err("Number of threads must be at least 1".into())
    }
}

fn check_file_exists(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if !path.exists() {
        Err(format!("File does not exist: {}", path.display()))
    } else {
        Ok(path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_annotate_defaults() {
        let dir = std::env::temp_dir();
        let existing = dir.to_string_lossy().to_string();
        let cli = Cli::try_parse_from([
            "motifmark",
            "annotate",
            "-f",
            &existing,
            "-m",
            &existing,
            "-o",
            "out",
        ])
        .unwrap();
        match cli.command {
            Command::Annotate(args) => {
                assert_eq!(args.num_threads, 1);
                assert_eq!(args.alphabet, DegenerateTable::Iupac);
                assert_eq!(args.on_gene_error, GeneErrorPolicy::Skip);
                assert_eq!(args.output_prefix, "out");
            }
            _ => panic!("expected annotate"),
        }
    }

    #[test]
    fn zero_threads_is_rejected() {
        assert!(threads_in_range("0").is_err());
        assert!(threads_in_range("x").is_err());
        assert_eq!(threads_in_range("4"), Ok(4));
    }

    #[test]
    fn missing_prefix_directory_is_rejected() {
        assert!(check_prefix_path("/no/such/dir/out").is_err());
        assert!(check_prefix_path("out").is_ok());
    }
}
