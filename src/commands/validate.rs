use crate::cli::ValidateArgs;
use crate::error::{AnnotationError, AnnotationResult};
use crate::genes::{is_gene_error, GeneFeatureSet, GeneRecordAssembler};
use crate::utils::{load_variant_index, open_text_reader, Result};

pub fn validate(args: ValidateArgs) -> Result<()> {
    let index = load_variant_index(&args.motifs_path, args.alphabet)?;
    log::info!(
        "Motifs: {}, variants: {}",
        index.roots().len(),
        index.len()
    );

    let reader = open_text_reader(&args.genes_path)?;
    let results = GeneRecordAssembler::new(&index).assemble_all(reader);
    let tally = tally_results(&results);

    if let Some(stats) = calculate_stats(&tally.gene_lengths) {
        log::info!(
            "Gene Lengths - Range: [{},{}], Median: {:.2}, Mean: {:.2}, StdDev: {:.2}",
            stats.min,
            stats.max,
            stats.median,
            stats.mean,
            stats.std_dev
        );
    }
    if let Some(stats) = calculate_stats(&tally.motif_counts) {
        log::info!(
            "Motifs per Gene - Range: [{},{}], Median: {:.2}, Mean: {:.2}, StdDev: {:.2}",
            stats.min,
            stats.max,
            stats.median,
            stats.mean,
            stats.std_dev
        );
    }

    let total = tally.total();
    match tally.failed() {
        0 => log::info!("Validation successful. Genes pass={}", tally.passed),
        failed => log::info!(
            "Validation failed. Genes pass={} ({:.2}%), exon errors={}, malformed records={} ({:.2}% failed)",
            tally.passed,
            percent(tally.passed, total),
            tally.gene_errors,
            tally.malformed,
            percent(failed, total)
        ),
    }

    Ok(())
}

#[derive(Debug, Default, PartialEq)]
struct Tally {
    passed: usize,
    gene_errors: usize,
    malformed: usize,
    gene_lengths: Vec<usize>,
    motif_counts: Vec<usize>,
}

impl Tally {
    fn failed(&self) -> usize {
        self.gene_errors + self.malformed
    }

    fn total(&self) -> usize {
        self.passed + self.failed()
    }
}

fn tally_results(results: &[AnnotationResult<GeneFeatureSet>]) -> Tally {
    let mut tally = Tally::default();
    for result in results {
        match result {
            Ok(gene) => {
                tally.passed += 1;
                tally.gene_lengths.push(gene.length);
                tally.motif_counts.push(gene.occurrences.len());
            }
            Err(e) => {
                log::error!("{}", e);
                if is_gene_error(e) {
                    tally.gene_errors += 1;
                } else if let AnnotationError::MalformedInput { .. } | AnnotationError::Io { .. } =
                    e.kind()
                {
                    tally.malformed += 1;
                }
            }
        }
    }
    tally
}

fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (count as f64 / total as f64) * 100.0
    }
}

fn calculate_stats(data: &[usize]) -> Option<Stats> {
    if data.is_empty() {
        return None;
    }
    let mut sorted = data.to_vec();
    sorted.sort_unstable();
    let len = sorted.len();
    let median = if len % 2 == 0 {
        (sorted[len / 2 - 1] + sorted[len / 2]) as f64 / 2.0
    } else {
        sorted[len / 2] as f64
    };
    let sum: usize = sorted.iter().sum();
    let mean = sum as f64 / len as f64;
    let std_dev = (sorted
        .iter()
        .map(|&x| (x as f64 - mean).powi(2))
        .sum::<f64>()
        / len as f64)
        .sqrt();
    Some(Stats {
        min: sorted[0],
        max: sorted[len - 1],
        mean,
        median,
        std_dev,
    })
}

#[derive(Debug)]
struct Stats {
    min: usize,
    max: usize,
    mean: f64,
    median: f64,
    std_dev: f64,
}
