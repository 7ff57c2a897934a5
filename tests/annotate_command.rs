use motifmark::{
    cli::AnnotateArgs,
    commands::annotate::annotate,
    genes::GeneErrorPolicy,
    motifs::DegenerateTable,
};
use std::{collections::HashMap, fs, path::Path};
use tempfile::TempDir;

const GENE_COUNT: usize = 300;

fn gene_fasta() -> String {
    (0..GENE_COUNT)
        .map(|i| {
            let sequence = if i % 7 == 3 {
                "acatt".to_string()
            } else {
                format!("{}CAT{}ctt", "ac".repeat(i % 5 + 1), "g".repeat(i % 3))
            };
            format!(">gene{}\n{}\n", i, sequence)
        })
        .collect()
}

fn run_annotate(dir: &Path, prefix: &str, policy: GeneErrorPolicy) -> Result<(), String> {
    let genes_path = dir.join("genes.fasta");
    let motifs_path = dir.join("motifs.txt");
    fs::write(&genes_path, gene_fasta()).unwrap();
    fs::write(&motifs_path, "yt\ncat\n").unwrap();

    annotate(AnnotateArgs {
        genes_path,
        motifs_path,
        output_prefix: dir.join(prefix).to_str().unwrap().to_string(),
        num_threads: 4,
        alphabet: DegenerateTable::Iupac,
        on_gene_error: policy,
    })
}

fn body(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|line| !line.starts_with('#'))
        .map(|line| line.to_string())
        .collect()
}

fn first_column(rows: &[String]) -> Vec<&str> {
    rows.iter()
        .map(|row| row.split('\t').next().unwrap())
        .collect()
}

#[test]
fn threaded_annotate_writes_rows_in_input_order() {
    let dir = TempDir::new().unwrap();
    run_annotate(dir.path(), "run1", GeneErrorPolicy::Skip).unwrap();

    let gene_rows = body(&dir.path().join("run1.genes.tsv"));
    let expected: Vec<String> = (0..GENE_COUNT)
        .filter(|i| i % 7 != 3)
        .map(|i| format!("gene{}", i))
        .collect();
    assert_eq!(first_column(&gene_rows), expected);

    let input_order: HashMap<&str, usize> = expected
        .iter()
        .enumerate()
        .map(|(order, header)| (header.as_str(), order))
        .collect();
    let motif_rows = body(&dir.path().join("run1.motifs.tsv"));
    let motif_order: Vec<usize> = first_column(&motif_rows)
        .iter()
        .map(|header| input_order[header])
        .collect();
    assert!(motif_order.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(motif_order.first(), Some(&0));
    assert_eq!(motif_order.last(), Some(&(expected.len() - 1)));
}

#[test]
fn repeated_threaded_runs_are_identical() {
    let dir = TempDir::new().unwrap();
    run_annotate(dir.path(), "run1", GeneErrorPolicy::Skip).unwrap();
    run_annotate(dir.path(), "run2", GeneErrorPolicy::Skip).unwrap();

    for suffix in ["genes.tsv", "motifs.tsv"] {
        let first = body(&dir.path().join(format!("run1.{}", suffix)));
        let second = body(&dir.path().join(format!("run2.{}", suffix)));
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }
}

#[test]
fn abort_keeps_only_genes_before_the_failure() {
    let dir = TempDir::new().unwrap();
    let err = run_annotate(dir.path(), "aborted", GeneErrorPolicy::Abort).unwrap_err();
    assert!(err.contains("gene3"));

    let gene_rows = body(&dir.path().join("aborted.genes.tsv"));
    assert_eq!(first_column(&gene_rows), vec!["gene0", "gene1", "gene2"]);
}
