//! Extraction run metrics.
//!
//! - `Extractor::run` for normal operation.
//! - `Extractor::run_with_metrics` for the CLI report and debugging: per
//!   sentence cues, candidate counts, dropped candidates and timings.

use super::filters::DroppedCandidate;
use super::trigger::TriggerMask;
use crate::DefinitionCandidate;
use std::time::Duration;

#[derive(Debug, Default, Clone)]
pub struct RunMetrics {
    /// Total elapsed time for [`Extractor::run_with_metrics`](super::Extractor::run_with_metrics).
    pub total: Duration,
    /// Time spent in the segmenter (and validating its output).
    pub segmentation: Duration,
    /// One entry per segment, in document order.
    pub sentences: Vec<SentenceMetrics>,
}

/// What happened in one sentence.
#[derive(Debug, Default, Clone)]
pub struct SentenceMetrics {
    /// Absolute byte offsets of the segment.
    pub start: usize,
    pub end: usize,
    pub cues: TriggerMask,
    /// Recognizer matches judged by the filters.
    pub considered: usize,
    /// Definitions this sentence added to the document result.
    pub kept: usize,
    /// Matches dropped by a filter, with absolute offsets.
    pub dropped: Vec<DroppedCandidate>,
    /// Tagging plus extraction time.
    pub duration: Duration,
}

/// Extractor output bundled with timing information.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Deduplicated definitions with absolute offsets, in reading order.
    pub definitions: Vec<DefinitionCandidate>,
    /// Candidates that collapsed into an earlier identical one.
    pub duplicates: usize,
    pub metrics: RunMetrics,
}
