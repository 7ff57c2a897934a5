use crate::error::{AnnotationError, AnnotationResult};
use crate::utils::Result;
use std::{fmt, io::BufRead};

/// Channel proxy derived from a root pattern: counts of `g`, `u`, and `y`.
pub type ColorKey = (usize, usize, usize);

/// A motif as written in the motif source, trimmed and lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MotifPattern(String);

impl MotifPattern {
    pub fn new(text: &str) -> AnnotationResult<Self> {
        let pattern = text.trim().to_lowercase();
        if pattern.is_empty() {
            return Err(AnnotationError::EmptyMotif);
        }
        Ok(Self(pattern))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn color_key(&self) -> ColorKey {
        let count = |symbol: char| self.0.chars().filter(|&c| c == symbol).count();
        (count('g'), count('u'), count('y'))
    }
}

impl fmt::Display for MotifPattern {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Reads one motif per line. Blank lines and `#` comments are skipped.
pub fn read_motifs<R: BufRead>(reader: R) -> Result<Vec<MotifPattern>> {
    let mut motifs = Vec::new();
    for (line_number, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| format!("Error reading motif line {}: {}", line_number + 1, e))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let motif = MotifPattern::new(line)
            .map_err(|e| format!("Error at motif line {}: {}", line_number + 1, e))?;
        motifs.push(motif);
    }
    Ok(motifs)
}
