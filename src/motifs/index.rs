use super::{DegenerateTable, MotifPattern};
use crate::error::AnnotationResult;
use rayon::prelude::*;
use std::collections::HashMap;

/// Maps every expanded variant back to the motif it came from.
///
/// Built once, then shared read-only. When two motifs expand to the same
/// variant, the motif registered first keeps it.
#[derive(Debug, Default)]
pub struct VariantIndex {
    table: DegenerateTable,
    roots: Vec<MotifPattern>,
    owned_variants: Vec<Vec<String>>,
    variant_to_root: HashMap<String, usize>,
}

impl VariantIndex {
    pub fn new(table: DegenerateTable) -> Self {
        Self {
            table,
            ..Default::default()
        }
    }

    /// Expands all patterns in parallel and registers them in input order.
    pub fn from_patterns(table: DegenerateTable, patterns: &[MotifPattern]) -> AnnotationResult<Self> {
        let expansions: Vec<_> = patterns
            .par_iter()
            .map(|pattern| table.expand(pattern))
            .collect();

        // Earliest bad motif is reported; collisions resolve in file order
        let mut index = Self::new(table);
        for (pattern, variants) in patterns.iter().zip(expansions) {
            index.insert(pattern.clone(), variants?);
        }
        log::info!(
            "Indexed {} variants from {} motifs",
            index.len(),
            index.roots.len()
        );
        Ok(index)
    }

    /// Returns the number of variants the pattern newly claimed.
    pub fn register(&mut self, pattern: MotifPattern) -> AnnotationResult<usize> {
        let variants = self.table.expand(&pattern)?;
        Ok(self.insert(pattern, variants))
    }

    fn insert(&mut self, pattern: MotifPattern, variants: Vec<String>) -> usize {
        if self.roots.contains(&pattern) {
            log::debug!("Motif {} is already registered", pattern);
            return 0;
        }

        let root_index = self.roots.len();
        let mut owned = Vec::with_capacity(variants.len());
        for variant in variants {
            if let Some(&owner) = self.variant_to_root.get(&variant) {
                log::debug!(
                    "Variant {} of motif {} already belongs to motif {}",
                    variant,
                    pattern,
                    self.roots[owner]
                );
                continue;
            }
            self.variant_to_root.insert(variant.clone(), root_index);
            owned.push(variant);
        }

        let claimed = owned.len();
        self.roots.push(pattern);
        self.owned_variants.push(owned);
        claimed
    }

    pub fn lookup(&self, variant: &str) -> Option<&MotifPattern> {
        self.variant_to_root
            .get(variant)
            .map(|&root_index| &self.roots[root_index])
    }

    /// Motifs in registration order.
    pub fn roots(&self) -> &[MotifPattern] {
        &self.roots
    }

    /// Sorted variants owned by the root at `root_index`.
    pub fn variants_of(&self, root_index: usize) -> &[String] {
        self.owned_variants
            .get(root_index)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.variant_to_root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variant_to_root.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnnotationError;

    fn patterns(texts: &[&str]) -> Vec<MotifPattern> {
        texts.iter().map(|t| MotifPattern::new(t).unwrap()).collect()
    }

    #[test]
    fn every_variant_looks_up_its_root() {
        let motifs = patterns(&["ygcy", "GCAUG", "catag", "yyyyyyyyyy"]);
        let index = VariantIndex::from_patterns(DegenerateTable::Minimal, &motifs).unwrap();
        for (root_index, root) in index.roots().iter().enumerate() {
            for variant in index.variants_of(root_index) {
                assert_eq!(index.lookup(variant), Some(root));
            }
        }
        assert_eq!(index.variants_of(3).len(), 1024);
        assert_eq!(index.len(), 4 + 1 + 1 + 1024);
    }

    #[test]
    fn first_registered_motif_wins_collisions() {
        let mut index = VariantIndex::new(DegenerateTable::Minimal);
        assert_eq!(index.register(MotifPattern::new("yt").unwrap()), Ok(2));
        assert_eq!(index.register(MotifPattern::new("tt").unwrap()), Ok(0));
        assert_eq!(index.register(MotifPattern::new("ut").unwrap()), Ok(0));

        assert_eq!(index.lookup("tt").unwrap().as_str(), "yt");
        assert_eq!(index.roots().len(), 3);
        assert!(index.variants_of(1).is_empty());
    }

    #[test]
    fn duplicate_motif_is_registered_once() {
        let motifs = patterns(&["cat", "CAT"]);
        let index = VariantIndex::from_patterns(DegenerateTable::Iupac, &motifs).unwrap();
        assert_eq!(index.roots().len(), 1);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn invalid_motif_fails_the_build() {
        let motifs = patterns(&["cat", "cxt"]);
        let result = VariantIndex::from_patterns(DegenerateTable::Iupac, &motifs);
        assert!(matches!(
            result,
            Err(AnnotationError::InvalidMotifSymbol { symbol: 'x', .. })
        ));
    }

    #[test]
    fn unknown_variant_lookup_is_none() {
        let index = VariantIndex::from_patterns(DegenerateTable::Iupac, &patterns(&["cat"])).unwrap();
        assert_eq!(index.lookup("gat"), None);
        assert!(index.variants_of(7).is_empty());
    }
}
