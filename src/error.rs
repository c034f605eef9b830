//! Input-contract errors.
//!
//! The engine itself never fails on prose: a sentence that matches nothing
//! simply yields nothing. The one failure it reports is a collaborator (tagger
//! or segmenter) handing over offsets that cannot be trusted, because every
//! offset the engine emits is derived from them.

use std::fmt;
use thiserror::Error;

/// Which collaborator produced the offending span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collaborator {
    Tagger,
    Segmenter,
}

impl fmt::Display for Collaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collaborator::Tagger => f.write_str("tagger token"),
            Collaborator::Segmenter => f.write_str("segmenter segment"),
        }
    }
}

/// A tagger or segmenter returned spans that break the input contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedInputError {
    #[error("{origin} #{index} span {start}..{end} is out of range (input length {len})")]
    OutOfRange { origin: Collaborator, index: usize, start: usize, end: usize, len: usize },

    #[error("{origin} #{index} span {start}..{end} ends before it starts")]
    Inverted { origin: Collaborator, index: usize, start: usize, end: usize },

    #[error("{origin} #{index} offset {offset} is not on a character boundary")]
    NotCharBoundary { origin: Collaborator, index: usize, offset: usize },

    #[error("{origin} #{index} starts at {start}, overlapping the previous span ending at {previous_end}")]
    Overlap { origin: Collaborator, index: usize, start: usize, previous_end: usize },

    #[error("{origin} #{index} text {found:?} does not match the input text {expected:?} at offset {start}")]
    TextMismatch { origin: Collaborator, index: usize, start: usize, expected: String, found: String },
}

/// Result type for extraction calls.
pub type ExtractResult<T> = Result<T, MalformedInputError>;
