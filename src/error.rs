//! Error kinds raised while building the motif index and annotating genes.

use thiserror::Error;

pub type AnnotationResult<T> = std::result::Result<T, AnnotationError>;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum AnnotationError {
    /// A motif contains a symbol that the active substitution table does not define.
    #[error("Invalid symbol '{symbol}' at position {position} of motif '{pattern}'")]
    InvalidMotifSymbol {
        pattern: String,
        symbol: char,
        position: usize,
    },

    #[error("Motif pattern is empty")]
    EmptyMotif,

    /// Structural violation in the sequence stream. `line` is 1-based.
    #[error("Malformed input at line {line}: {reason}")]
    MalformedInput { line: usize, reason: String },

    #[error("Error reading line {line}: {message}")]
    Io { line: usize, message: String },

    #[error("No exon found: sequence has no lowercase/uppercase transition")]
    ExonNotFound,

    #[error("Expected a single exon, found {runs} uppercase runs")]
    MultipleExonRunsDetected { runs: usize },

    /// A per-gene failure tagged with the gene header.
    #[error("Gene '{header}': {source}")]
    Gene {
        header: String,
        #[source]
        source: Box<AnnotationError>,
    },
}

impl AnnotationError {
    pub fn for_gene(self, header: &str) -> Self {
        AnnotationError::Gene {
            header: header.to_string(),
            source: Box::new(self),
        }
    }

    /// Innermost error kind, with any gene tag stripped.
    pub fn kind(&self) -> &AnnotationError {
        match self {
            AnnotationError::Gene { source, .. } => source.kind(),
            other => other,
        }
    }
}
