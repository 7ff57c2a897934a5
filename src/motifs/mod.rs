mod alphabet;
mod index;
mod pattern;
mod scanner;

pub use alphabet::DegenerateTable;
pub use index::VariantIndex;
pub use pattern::{read_motifs, ColorKey, MotifPattern};
pub use scanner::{find_overlapping, MotifOccurrence, SequenceScanner};
