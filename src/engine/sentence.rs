//! Sentence-level orchestration.
//!
//! One pass per sentence:
//!
//! ```text
//! validate tokens ─▶ cue scan ──(no cues)──▶ done, nothing emitted
//!                       │
//!                       ▼
//!        for kind in TriggerKind::ALL (gated by cues)
//!          for match in kind.try_match(view)
//!            filters ──(fires)──▶ dropped, next match
//!               │
//!               ▼
//!            resolve ─▶ merge / claim ─▶ emit
//! ```
//!
//! Matches sharing kind and source span (the coordinated terms of one
//! parenthetical) merge into one candidate: the first term stays the term,
//! later ones become aliases. A candidate whose term overlaps a term already
//! emitted by an earlier kind is skipped.

use super::filters::{DroppedCandidate, first_firing};
use super::resolve::resolve;
use super::trigger::TriggerMask;
use super::validate::validate_tokens;
use crate::error::ExtractResult;
use crate::{DefinitionCandidate, Options, SentenceView, Span, TaggedToken, TriggerKind};

/// Outcome of one sentence, all offsets sentence-relative.
#[derive(Debug, Default, Clone)]
pub(crate) struct SentenceRun {
    pub cues: TriggerMask,
    pub candidates: Vec<DefinitionCandidate>,
    pub dropped: Vec<DroppedCandidate>,
    /// Recognizer matches judged by the filters.
    pub considered: usize,
}

/// Run every recognizer over one tagged sentence.
pub(crate) fn extract_sentence(text: &str, tokens: &[TaggedToken], options: &Options) -> ExtractResult<SentenceRun> {
    validate_tokens(text, tokens)?;

    let cues = TriggerMask::scan(text, options);
    let mut run = SentenceRun { cues, ..SentenceRun::default() };
    if cues.is_empty() || tokens.is_empty() {
        return Ok(run);
    }

    let view = SentenceView::new(text, tokens, options);
    let mut claimed: Vec<Span> = Vec::new();

    for kind in TriggerKind::ALL {
        if !cues.contains(kind.required_cues()) {
            log::trace!("[sentence] skip {} (cues {:?})", kind.name(), cues);
            continue;
        }

        for m in kind.try_match(&view) {
            run.considered += 1;

            if let Some(rule) = first_firing(&view, &m) {
                let span = view.span_of(&m.source);
                let term = view.text_of(&m.term).to_string();
                log::debug!("[filter] drop {:?} ({}) by {}", term, kind.name(), rule.name());
                run.dropped.push(DroppedCandidate { term, kind, rule, start: span.start, end: span.end });
                continue;
            }

            let candidate = resolve(&view, &m);
            if let Some(existing) =
                run.candidates.iter_mut().find(|c| c.kind == candidate.kind && c.span == candidate.span)
            {
                if existing.term != candidate.term && !existing.aliases.contains(&candidate.term) {
                    existing.aliases.push(candidate.term);
                }
                claimed.push(candidate.term_span);
                continue;
            }
            if claimed.iter().any(|s| s.overlaps(&candidate.term_span)) {
                log::trace!("[sentence] {:?} already claimed", candidate.term);
                continue;
            }

            claimed.push(candidate.term_span);
            run.candidates.push(candidate);
        }
    }

    run.candidates.sort_by_key(|c| (c.span.start, c.span.end));
    Ok(run)
}
