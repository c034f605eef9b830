//! Extraction engine.
//!
//! This module is the entry point for turning tagged sentences into definition
//! candidates. It is split into focused submodules under `src/engine/`.
//!
//! ## How the parts work together
//!
//! ```text
//! document ── segmenter ──▶ validate_segments          (validate.rs)
//!                               │
//!             per segment:  tagger ─▶ validate_tokens
//!                               │
//!                     TriggerMask::scan                  (trigger.rs)
//!                               │ gate recognizers by cues
//!                               ▼
//!                     TriggerKind::try_match             (rules/definition)
//!                               │
//!                     first_firing                       (filters.rs)
//!                               │ kept
//!                     resolve                            (resolve.rs)
//!                               │
//!                     merge coordinated terms, claim     (sentence.rs)
//!                               │
//!                     rebase + dedup via DefinitionKey   (document.rs, dedup.rs)
//!                               ▼
//!                     Vec<DefinitionCandidate>
//! ```
//!
//! ## Responsibilities by module
//!
//! - `trigger.rs`: scans the raw sentence for coarse cues (quotes, brackets,
//!   colons, trigger words) so recognizers without their cues are skipped.
//! - `filters.rs`: the ordered false-positive rules.
//! - `resolve.rs`: turns token ranges into sliced term/source/gloss spans.
//! - `sentence.rs`: one sentence, all recognizers, filters, merge.
//! - `document.rs`: segmentation, tagging, rebasing and dedup for a document.
//! - `dedup.rs`: value-identity keys for document results.
//! - `validate.rs`: input-contract checks on tagger and segmenter output.
//! - `metrics.rs`: per-run and per-sentence timings and counts.
//!
//! ## Debugging
//!
//! The engine logs through `log`: `RUST_LOG=deflex=debug` shows cue scans,
//! filter drops and emitted definitions; `trace` adds the token stream.

#[path = "engine/dedup.rs"]
mod dedup;
#[path = "engine/document.rs"]
mod document;
#[path = "engine/filters.rs"]
mod filters;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/resolve.rs"]
mod resolve;
#[path = "engine/sentence.rs"]
mod sentence;
#[path = "engine/trigger.rs"]
mod trigger;
#[path = "engine/validate.rs"]
mod validate;

pub use document::Extractor;
pub use filters::{DroppedCandidate, FilterRule};
pub use metrics::SentenceMetrics;
pub(crate) use sentence::extract_sentence;
pub use trigger::TriggerMask;
