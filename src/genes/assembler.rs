use super::{locate_exon, read_records, GeneFeatureSet, SequenceRecord};
use crate::error::{AnnotationError, AnnotationResult};
use crate::motifs::{SequenceScanner, VariantIndex};
use rayon::prelude::*;
use std::{io::BufRead, str::FromStr};

/// What to do with a gene that cannot be annotated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeneErrorPolicy {
    /// Log the failure and continue with the next gene
    #[default]
    Skip,
    /// Stop at the first failing gene
    Abort,
}

impl FromStr for GeneErrorPolicy {
    type Err = &'static str;
    fn from_str(policy: &str) -> Result<Self, Self::Err> {
        match policy {
            "skip" => Ok(GeneErrorPolicy::Skip),
            "abort" => Ok(GeneErrorPolicy::Abort),
            _ => Err("Invalid gene error policy. Options are: skip, abort"),
        }
    }
}

impl GeneErrorPolicy {
    /// Returns the gene to emit, `None` to drop it, or the error that ends the run.
    pub fn apply(
        &self,
        result: AnnotationResult<GeneFeatureSet>,
    ) -> AnnotationResult<Option<GeneFeatureSet>> {
        match (result, self) {
            (Ok(gene), _) => Ok(Some(gene)),
            (Err(err), GeneErrorPolicy::Skip) => {
                log::warn!("Skipping record: {}", err);
                Ok(None)
            }
            (Err(err), GeneErrorPolicy::Abort) => Err(err),
        }
    }
}

/// Turns sequence records into gene feature sets.
pub struct GeneRecordAssembler<'a> {
    scanner: SequenceScanner<'a>,
}

impl<'a> GeneRecordAssembler<'a> {
    pub fn new(index: &'a VariantIndex) -> Self {
        Self {
            scanner: SequenceScanner::new(index),
        }
    }

    pub fn assemble(&self, record: &SequenceRecord) -> AnnotationResult<GeneFeatureSet> {
        let exon = locate_exon(&record.sequence).map_err(|e| e.for_gene(&record.header))?;
        let occurrences = self.scanner.scan(&record.sequence);
        log::debug!(
            "{}: exon {}-{}, {} motif occurrences",
            record.header,
            exon.start,
            exon.end(),
            occurrences.len()
        );
        Ok(GeneFeatureSet {
            header: record.header.clone(),
            length: record.sequence.len(),
            exon,
            occurrences,
        })
    }

    /// Annotates every record of a stream, one result per record in input order.
    pub fn assemble_all<R: BufRead>(&self, reader: R) -> Vec<AnnotationResult<GeneFeatureSet>> {
        let records: Vec<_> = read_records(reader).collect();
        records
            .into_par_iter()
            .map(|record| record.and_then(|record| self.assemble(&record)))
            .collect()
    }

    /// Annotates a stream and applies `policy` to failing records.
    pub fn assemble_with_policy<R: BufRead>(
        &self,
        reader: R,
        policy: GeneErrorPolicy,
    ) -> AnnotationResult<Vec<GeneFeatureSet>> {
        let mut genes = Vec::new();
        for result in self.assemble_all(reader) {
            if let Some(gene) = policy.apply(result)? {
                genes.push(gene);
            }
        }
        Ok(genes)
    }
}

pub fn is_gene_error(err: &AnnotationError) -> bool {
    matches!(
        err.kind(),
        AnnotationError::ExonNotFound | AnnotationError::MultipleExonRunsDetected { .. }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genes::ExonSpan;
    use crate::motifs::{DegenerateTable, MotifPattern};
    use std::io::Cursor;

    fn build_index(texts: &[&str]) -> VariantIndex {
        let motifs: Vec<_> = texts.iter().map(|t| MotifPattern::new(t).unwrap()).collect();
        VariantIndex::from_patterns(DegenerateTable::Iupac, &motifs).unwrap()
    }

    #[test]
    fn single_gene_end_to_end() {
        let index = build_index(&["cat"]);
        let assembler = GeneRecordAssembler::new(&index);
        let genes = assembler
            .assemble_with_policy(Cursor::new(">g1\naaCATaa\n"), GeneErrorPolicy::Abort)
            .unwrap();

        assert_eq!(genes.len(), 1);
        let gene = &genes[0];
        assert_eq!(gene.header, "g1");
        assert_eq!(gene.length, 7);
        assert_eq!(
            gene.exon,
            ExonSpan {
                start: 2,
                length: 3
            }
        );
        assert_eq!(gene.occurrences.len(), 1);
        let occurrence = &gene.occurrences[0];
        assert_eq!(occurrence.root.as_str(), "cat");
        assert_eq!(occurrence.variant, "cat");
        assert_eq!(occurrence.start, 2);
    }

    #[test]
    fn gene_errors_are_isolated() {
        let index = build_index(&["yt"]);
        let assembler = GeneRecordAssembler::new(&index);
        let data = ">g1\nacgt\n>g2\naTTa\n>g3\naTaTa\n>g4\nctGTcttt\n";
        let results = assembler.assemble_all(Cursor::new(data));

        assert_eq!(results.len(), 4);
        assert_eq!(
            results[0].as_ref().unwrap_err().kind(),
            &AnnotationError::ExonNotFound
        );
        assert!(results[1].is_ok());
        assert_eq!(
            results[2].as_ref().unwrap_err().kind(),
            &AnnotationError::MultipleExonRunsDetected { runs: 2 }
        );
        let g4 = results[3].as_ref().unwrap();
        let starts: Vec<_> = g4.occurrences.iter().map(|o| o.start).collect();
        assert_eq!(starts, vec![0, 4, 5, 6]);
    }

    #[test]
    fn skip_policy_drops_failing_genes() {
        let index = build_index(&["cat"]);
        let assembler = GeneRecordAssembler::new(&index);
        let data = ">g1\ncat\n>g2\naCATa\n";
        let genes = assembler
            .assemble_with_policy(Cursor::new(data), GeneErrorPolicy::Skip)
            .unwrap();
        assert_eq!(genes.len(), 1);
        assert_eq!(genes[0].header, "g2");
    }

    #[test]
    fn abort_policy_returns_first_error() {
        let index = build_index(&["cat"]);
        let assembler = GeneRecordAssembler::new(&index);
        let data = "aCa\n>g1\naCATa\n";
        let result = assembler.assemble_with_policy(Cursor::new(data), GeneErrorPolicy::Abort);
        assert!(matches!(
            result,
            Err(AnnotationError::MalformedInput { line: 1, .. })
        ));
    }

    #[test]
    fn repeated_runs_are_identical() {
        let index = build_index(&["ygcy", "gcaug", "catag", "yyyy"]);
        let assembler = GeneRecordAssembler::new(&index);
        let data = ">a\ntgcttttcatagCATAGGCATGtttctgcc\n>b\nctgcctcttCCTGCTtgcatg\n";
        let first = assembler.assemble_all(Cursor::new(data));
        let second = assembler.assemble_all(Cursor::new(data));
        assert_eq!(first, second);
    }

    #[test]
    fn classifies_gene_errors() {
        assert!(is_gene_error(&AnnotationError::ExonNotFound.for_gene("g1")));
        assert!(!is_gene_error(&AnnotationError::EmptyMotif));
    }
}
