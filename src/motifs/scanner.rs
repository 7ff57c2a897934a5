use super::{ColorKey, MotifPattern, VariantIndex};
use rayon::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotifOccurrence {
    pub root: MotifPattern,
    pub variant: String,
    pub start: usize,
    pub color: ColorKey,
}

impl MotifOccurrence {
    /// Exclusive end offset of the match.
    pub fn end(&self) -> usize {
        self.start + self.variant.len()
    }
}

/// Finds all occurrences, overlapping ones included, of indexed variants.
pub struct SequenceScanner<'a> {
    index: &'a VariantIndex,
}

impl<'a> SequenceScanner<'a> {
    pub fn new(index: &'a VariantIndex) -> Self {
        Self { index }
    }

    /// Occurrences ordered by start offset; ties keep motif registration
    /// order, then variant order.
    pub fn scan(&self, sequence: &str) -> Vec<MotifOccurrence> {
        let sequence = sequence.to_ascii_lowercase();
        let haystack = sequence.as_bytes();

        let mut occurrences = (0..self.index.roots().len())
            .into_par_iter()
            .flat_map_iter(|root_index| self.scan_root(haystack, root_index))
            .collect::<Vec<_>>();
        occurrences.sort_by_key(|occurrence| occurrence.start);
        occurrences
    }

    fn scan_root(&self, haystack: &[u8], root_index: usize) -> Vec<MotifOccurrence> {
        let root = &self.index.roots()[root_index];
        let color = root.color_key();
        let mut occurrences = Vec::new();
        for variant in self.index.variants_of(root_index) {
            for start in find_overlapping(haystack, variant.as_bytes()) {
                occurrences.push(MotifOccurrence {
                    root: root.clone(),
                    variant: variant.clone(),
                    start,
                    color,
                });
            }
        }
        occurrences
    }
}

/// Every offset at which `needle` occurs in `haystack`, advancing one base
/// at a time so overlapping matches are all reported.
pub fn find_overlapping<'h>(haystack: &'h [u8], needle: &'h [u8]) -> impl Iterator<Item = usize> + 'h {
    haystack
        .windows(needle.len().max(1))
        .enumerate()
        .filter(move |(_, window)| !needle.is_empty() && *window == needle)
        .map(|(start, _)| start)
}
