use super::SequenceRecord;
use crate::error::{AnnotationError, AnnotationResult};
use std::io::{self, BufRead, Lines};
use std::iter::Enumerate;

/// Streams (header, sequence) records from FASTA-style text.
///
/// A malformed record yields an error and the stream resumes at the next
/// header, so one bad record never hides the records after it.
pub struct SequenceRecords<R: BufRead> {
    lines: Enumerate<Lines<R>>,
    pending: Option<PendingRecord>,
    orphan_line: Option<usize>,
    done: bool,
}

pub fn read_records<R: BufRead>(reader: R) -> SequenceRecords<R> {
    SequenceRecords {
        lines: reader.lines().enumerate(),
        pending: None,
        orphan_line: None,
        done: false,
    }
}

struct PendingRecord {
    header: String,
    line: usize,
    sequence: String,
    error: Option<AnnotationError>,
}

impl PendingRecord {
    fn new(header: &str, line: usize) -> Self {
        Self {
            header: header.to_string(),
            line,
            sequence: String::new(),
            error: None,
        }
    }

    fn push(&mut self, bases: &str, line: usize) {
        if self.error.is_some() {
            return;
        }
        if let Some(invalid) = bases.chars().find(|c| !c.is_ascii_alphabetic()) {
            let reason = format!(
                "invalid character '{}' in sequence of '{}'",
                invalid, self.header
            );
            self.fail(line, reason);
            return;
        }
        self.sequence.push_str(bases);
    }

    /// Keeps the first failure; later lines of the record are still consumed.
    fn fail(&mut self, line: usize, reason: String) {
        self.error
            .get_or_insert(AnnotationError::MalformedInput { line, reason });
    }

    fn finish(self) -> AnnotationResult<SequenceRecord> {
        if let Some(error) = self.error {
            return Err(error);
        }
        if self.header.is_empty() {
            return Err(AnnotationError::MalformedInput {
                line: self.line,
                reason: "empty header".to_string(),
            });
        }
        if self.sequence.is_empty() {
            return Err(AnnotationError::MalformedInput {
                line: self.line,
                reason: format!("header '{}' has no sequence lines", self.header),
            });
        }
        Ok(SequenceRecord {
            header: self.header,
            sequence: self.sequence,
        })
    }
}

fn orphan_error(line: usize) -> AnnotationError {
    AnnotationError::MalformedInput {
        line,
        reason: "sequence line without a preceding header".to_string(),
    }
}

impl<R: BufRead> Iterator for SequenceRecords<R> {
    type Item = AnnotationResult<SequenceRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        for (index, line) in self.lines.by_ref() {
            let line_number = index + 1;
            let line = match line {
                Ok(line) => line,
                // The undecodable line is already consumed, so parsing can resume
                Err(err) if err.kind() == io::ErrorKind::InvalidData => {
                    match self.pending.as_mut() {
                        Some(pending) => {
                            let reason =
                                format!("undecodable sequence line in '{}'", pending.header);
                            pending.fail(line_number, reason);
                        }
                        None => {
                            self.orphan_line.get_or_insert(line_number);
                        }
                    }
                    continue;
                }
                Err(err) => {
                    self.done = true;
                    self.pending = None;
                    return Some(Err(AnnotationError::Io {
                        line: line_number,
                        message: err.to_string(),
                    }));
                }
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(header) = line.strip_prefix('>') {
                let next = PendingRecord::new(header.trim(), line_number);
                if let Some(orphan_line) = self.orphan_line.take() {
                    self.pending = Some(next);
                    return Some(Err(orphan_error(orphan_line)));
                }
                if let Some(finished) = self.pending.replace(next) {
                    return Some(finished.finish());
                }
                continue;
            }

            match self.pending.as_mut() {
                Some(pending) => pending.push(line, line_number),
                None => {
                    self.orphan_line.get_or_insert(line_number);
                }
            }
        }

        self.done = true;
        if let Some(orphan_line) = self.orphan_line.take() {
            // Only possible when the stream has no header at all
            return Some(Err(orphan_error(orphan_line)));
        }
        self.pending.take().map(PendingRecord::finish)
    }
}
