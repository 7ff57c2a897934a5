//! Annotates gene sequences with degenerate motif occurrences and the exon
//! span marked by uppercase bases.
//!
//! Motifs are expanded into literal variants and collected in a
//! [`motifs::VariantIndex`]; each gene record is then scanned for every,
//! possibly overlapping, variant occurrence and summarized as a
//! [`genes::GeneFeatureSet`].

pub mod cli;
pub mod commands;
pub mod error;
pub mod genes;
pub mod motifs;
pub mod utils;
pub mod writers;
