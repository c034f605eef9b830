//! Deduplication keys for document results.
//!
//! A definition repeated verbatim in a document is reported once. Identity is
//! structural: the key holds the term, the source text and the absolute
//! offsets, so two candidates collapse only when all four are equal.
//!
//! Offsets are part of the key, so the same wording at two positions yields two
//! results.

use crate::DefinitionCandidate;

/// Value identity of a document-level definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct DefinitionKey {
    pub(crate) term: String,
    pub(crate) source: String,
    pub(crate) start: usize,
    pub(crate) end: usize,
}

impl DefinitionKey {
    /// Key of a candidate whose offsets are already document-absolute.
    pub(crate) fn from_candidate(candidate: &DefinitionCandidate) -> Self {
        DefinitionKey {
            term: candidate.term.clone(),
            source: candidate.source.clone(),
            start: candidate.span.start,
            end: candidate.span.end,
        }
    }
}
