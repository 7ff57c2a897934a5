use crate::error::{AnnotationError, AnnotationResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExonSpan {
    pub start: usize,
    pub length: usize,
}

impl ExonSpan {
    pub fn end(&self) -> usize {
        self.start + self.length
    }
}

/// Locates the single uppercase (exon) run in a sequence whose lowercase
/// bases mark introns.
///
/// A run may touch either end of the sequence, but the sequence must contain
/// at least one case transition.
pub fn locate_exon(sequence: &str) -> AnnotationResult<ExonSpan> {
    let runs = uppercase_runs(sequence.as_bytes());
    match runs.as_slice() {
        [] => Err(AnnotationError::ExonNotFound),
        [(start, end)] if *start == 0 && *end == sequence.len() => Err(AnnotationError::ExonNotFound),
        [(start, end)] => Ok(ExonSpan {
            start: *start,
            length: end - start,
        }),
        _ => Err(AnnotationError::MultipleExonRunsDetected { runs: runs.len() }),
    }
}

/// Half-open ranges of maximal uppercase runs.
fn uppercase_runs(bases: &[u8]) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut run_start = None;
    for (pos, base) in bases.iter().enumerate() {
        match (base.is_ascii_uppercase(), run_start) {
            (true, None) => run_start = Some(pos),
            (false, Some(start)) => {
                runs.push((start, pos));
                run_start = None;
            }
            _ => {}
        }
    }
    if let Some(start) = run_start {
        runs.push((start, bases.len()));
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_exon() {
        assert_eq!(
            locate_exon("aaTTTaa"),
            Ok(ExonSpan {
                start: 2,
                length: 3
            })
        );
    }

    #[test]
    fn exon_at_sequence_ends() {
        assert_eq!(
            locate_exon("TTTaa"),
            Ok(ExonSpan {
                start: 0,
                length: 3
            })
        );
        let span = locate_exon("aaaTT").unwrap();
        assert_eq!((span.start, span.length, span.end()), (3, 2, 5));
    }

    #[test]
    fn single_base_exon() {
        assert_eq!(
            locate_exon("aGa"),
            Ok(ExonSpan {
                start: 1,
                length: 1
            })
        );
    }

    #[test]
    fn no_case_transition_is_not_found() {
        assert_eq!(locate_exon("acgt"), Err(AnnotationError::ExonNotFound));
        assert_eq!(locate_exon("ACGT"), Err(AnnotationError::ExonNotFound));
        assert_eq!(locate_exon(""), Err(AnnotationError::ExonNotFound));
    }

    #[test]
    fn multiple_runs_are_rejected() {
        assert_eq!(
            locate_exon("aaTTaaGGaCC"),
            Err(AnnotationError::MultipleExonRunsDetected { runs: 3 })
        );
    }
}
