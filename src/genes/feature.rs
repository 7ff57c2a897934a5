use super::ExonSpan;
use crate::motifs::MotifOccurrence;

/// Everything located in one gene record, ready to be written or drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneFeatureSet {
    pub header: String,
    pub length: usize,
    pub exon: ExonSpan,
    /// Ordered by start offset
    pub occurrences: Vec<MotifOccurrence>,
}

/// A raw record from the sequence stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    pub header: String,
    pub sequence: String,
}
