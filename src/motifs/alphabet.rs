use super::MotifPattern;
use crate::error::{AnnotationError, AnnotationResult};
use itertools::Itertools;
use std::{collections::BTreeSet, str::FromStr};

/// Substitution table mapping each motif symbol to the literal bases it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegenerateTable {
    /// Full IUPAC nucleotide ambiguity codes
    #[default]
    Iupac,
    /// Literal bases plus `y` (pyrimidine) and `u` (RNA uracil)
    Minimal,
}

impl FromStr for DegenerateTable {
    type Err = &'static str;
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "iupac" => Ok(DegenerateTable::Iupac),
            "minimal" => Ok(DegenerateTable::Minimal),
            _ => Err("Invalid alphabet. Options are: iupac, minimal"),
        }
    }
}

impl DegenerateTable {
    /// Literal bases a lowercase symbol expands to, or `None` if the symbol is unsupported.
    pub fn bases(&self, symbol: char) -> Option<&'static str> {
        let literal = match symbol {
            'a' => Some("a"),
            'c' => Some("c"),
            'g' => Some("g"),
            't' => Some("t"),
            'u' => Some("t"),
            'y' => Some("ct"),
            _ => None,
        };
        match self {
            DegenerateTable::Minimal => literal,
            DegenerateTable::Iupac => literal.or(match symbol {
                'r' => Some("ag"),
                's' => Some("cg"),
                'w' => Some("at"),
                'k' => Some("gt"),
                'm' => Some("ac"),
                'b' => Some("cgt"),
                'd' => Some("agt"),
                'h' => Some("act"),
                'v' => Some("acg"),
                'n' => Some("acgt"),
                _ => None,
            }),
        }
    }

    /// Expands a pattern into the sorted set of distinct literal variants it matches.
    pub fn expand(&self, pattern: &MotifPattern) -> AnnotationResult<Vec<String>> {
        let symbols = pattern.as_str().chars().collect_vec();
        if let Some((position, &symbol)) = symbols
            .iter()
            .find_position(|symbol| self.bases(**symbol).is_none())
        {
            return Err(AnnotationError::InvalidMotifSymbol {
                pattern: pattern.to_string(),
                symbol,
                position,
            });
        }
        Ok(self.expand_symbols(&symbols).into_iter().collect())
    }

    fn expand_symbols(&self, symbols: &[char]) -> BTreeSet<String> {
        match symbols {
            [] => BTreeSet::from([String::new()]),
            [symbol] => self
                .bases(*symbol)
                .unwrap_or_default()
                .chars()
                .map(String::from)
                .collect(),
            _ => {
                let (first, second) = symbols.split_at(symbols.len() / 2);
                let first = self.expand_symbols(first);
                let second = self.expand_symbols(second);
                first
                    .iter()
                    .cartesian_product(second.iter())
                    .map(|(head, tail)| format!("{head}{tail}"))
                    .collect()
            }
        }
    }
}
