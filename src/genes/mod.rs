mod assembler;
mod exon;
mod fasta;
mod feature;

pub use assembler::{is_gene_error, GeneErrorPolicy, GeneRecordAssembler};
pub use exon::{locate_exon, ExonSpan};
pub use fasta::{read_records, SequenceRecords};
pub use feature::{GeneFeatureSet, SequenceRecord};
