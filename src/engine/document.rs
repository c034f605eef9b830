//! Document-level orchestration.
//!
//! ```text
//! text ─▶ segmenter ─▶ validate segments
//!            │
//!            ▼  for each segment, in order
//!         tagger ─▶ extract_sentence ─▶ rebase by segment.start ─▶ dedup
//! ```
//!
//! The dedup set lives only for the duration of one run. Results keep the
//! order in which they were first found.

use super::dedup::DefinitionKey;
use super::filters::DroppedCandidate;
use super::metrics::{RunMetrics, RunResult, SentenceMetrics};
use super::sentence::extract_sentence;
use super::validate::validate_segments;
use crate::error::ExtractResult;
use crate::{DefinitionCandidate, Options, SentenceSegmenter, Tagger};
use std::collections::HashSet;
use std::time::Instant;

/// Runs the sentence engine over a whole document.
///
/// Usage: create with `Extractor::new(text, &options, &segmenter, &tagger)`
/// then call [`run`](Extractor::run) or [`run_with_metrics`](Extractor::run_with_metrics).
pub struct Extractor<'a> {
    text: &'a str,
    options: &'a Options,
    segmenter: &'a dyn SentenceSegmenter,
    tagger: &'a dyn Tagger,
}

impl<'a> Extractor<'a> {
    pub fn new(
        text: &'a str,
        options: &'a Options,
        segmenter: &'a dyn SentenceSegmenter,
        tagger: &'a dyn Tagger,
    ) -> Self {
        Extractor { text, options, segmenter, tagger }
    }

    /// Deduplicated definitions with absolute offsets, in reading order.
    pub fn run(&self) -> ExtractResult<Vec<DefinitionCandidate>> {
        Ok(self.run_with_metrics()?.definitions)
    }

    pub fn run_with_metrics(&self) -> ExtractResult<RunResult> {
        let started = Instant::now();

        let segments = self.segmenter.segment(self.text);
        validate_segments(self.text, &segments)?;
        let segmentation = started.elapsed();

        let mut seen: HashSet<DefinitionKey> = HashSet::new();
        let mut definitions = Vec::new();
        let mut duplicates = 0;
        let mut sentences = Vec::with_capacity(segments.len());

        for segment in &segments {
            let sentence_started = Instant::now();
            let tokens = self.tagger.tag(segment.text);
            let run = extract_sentence(segment.text, &tokens, self.options)?;

            let before = definitions.len();
            for candidate in run.candidates {
                let candidate = rebase(candidate, segment.start);
                if seen.insert(DefinitionKey::from_candidate(&candidate)) {
                    log::debug!(
                        "[definition] {:?} at {}..{} ({})",
                        candidate.term,
                        candidate.span.start,
                        candidate.span.end,
                        candidate.kind.name()
                    );
                    definitions.push(candidate);
                } else {
                    duplicates += 1;
                }
            }

            let dropped = run
                .dropped
                .into_iter()
                .map(|d| DroppedCandidate { start: d.start + segment.start, end: d.end + segment.start, ..d })
                .collect();
            sentences.push(SentenceMetrics {
                start: segment.start,
                end: segment.end,
                cues: run.cues,
                considered: run.considered,
                kept: definitions.len() - before,
                dropped,
                duration: sentence_started.elapsed(),
            });
        }

        let metrics = RunMetrics { total: started.elapsed(), segmentation, sentences };
        Ok(RunResult { definitions, duplicates, metrics })
    }
}

/// Move a sentence-relative candidate into document coordinates.
fn rebase(candidate: DefinitionCandidate, offset: usize) -> DefinitionCandidate {
    DefinitionCandidate {
        term_span: candidate.term_span.shifted(offset),
        span: candidate.span.shifted(offset),
        gloss: candidate.gloss.shifted(offset),
        ..candidate
    }
}
