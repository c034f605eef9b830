//! Span resolution.
//!
//! Recognizers report token ranges. Resolution turns a surviving
//! [`TriggerMatch`] into a [`DefinitionCandidate`] by:
//!
//! - stripping quotes, brackets and trailing punctuation from the term;
//! - slicing term, source and gloss from the sentence through token offsets.
//!
//! Text is never searched for again: a term repeated elsewhere in the
//! sentence cannot shift the reported offsets.
//!
//! ```text
//! tokens: (  "  Licensor  .  "  )
//! term:      [----------------]      match range (quotes excluded)
//! core:         [--------]           edge punctuation stripped
//! source: [-----------------------]
//! ```

use crate::rules::definition::predicates::{is_determiner, is_term_edge_punctuation};
use crate::{DefinitionCandidate, SentenceView, TriggerMatch};
use std::ops::Range;

/// `range` without leading and trailing punctuation tokens.
fn trim_punctuation(view: &SentenceView<'_>, range: &Range<usize>) -> Range<usize> {
    let (mut start, mut end) = (range.start, range.end);
    while start < end && is_term_edge_punctuation(&view.tokens[start]) {
        start += 1;
    }
    while end > start && is_term_edge_punctuation(&view.tokens[end - 1]) {
        end -= 1;
    }
    start..end
}

/// Term tokens as the filters judge them: punctuation stripped and, for
/// unquoted terms, leading determiners too.
pub(crate) fn core_term(view: &SentenceView<'_>, m: &TriggerMatch) -> Range<usize> {
    let mut core = trim_punctuation(view, &m.term);
    if !m.quoted {
        while core.start < core.end && is_determiner(&view.tokens[core.start]) {
            core.start += 1;
        }
    }
    core
}

/// Build the candidate for a match that passed the filters.
pub(crate) fn resolve(view: &SentenceView<'_>, m: &TriggerMatch) -> DefinitionCandidate {
    let mut term = trim_punctuation(view, &m.term);
    if term.is_empty() {
        term = m.term.clone();
    }

    let term_span = view.span_of(&term);
    let span = view.span_of(&m.source);
    let candidate = DefinitionCandidate {
        term: term_span.slice(view.text).to_string(),
        term_span,
        source: span.slice(view.text).to_string(),
        span,
        gloss: view.span_of(&m.gloss),
        kind: m.kind,
        aliases: Vec::new(),
    };

    log::debug!(
        "[resolve] kind={} term={:?} span={}..{}",
        candidate.kind.name(),
        candidate.term,
        candidate.span.start,
        candidate.span.end
    );
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LexiconTagger, Options, Tagger, TriggerKind};

    #[test]
    fn quotes_and_trailing_period_are_stripped_from_the_term() {
        let text = "Maryland 20850(\"Licensor.\") and";
        let tokens = LexiconTagger.tag(text);
        let options = Options::default();
        let view = SentenceView::new(text, &tokens, &options);
        // Maryland(0) 20850(1) ((2) "(3) Licensor(4) .(5) "(6) )(7) and(8)
        let m = TriggerMatch {
            kind: TriggerKind::QuotedParenthetical,
            term: 4..6,
            source: 2..8,
            gloss: 3..7,
            quoted: true,
            strong_trigger: false,
        };

        let c = resolve(&view, &m);
        assert_eq!(c.term, "Licensor");
        assert_eq!(&text[c.term_span.start..c.term_span.end], "Licensor");
        assert_eq!(c.source, "(\"Licensor.\")");
        assert_eq!(&text[c.span.start..c.span.end], c.source);
        assert_eq!(c.gloss.slice(text), "\"Licensor.\"");
    }

    #[test]
    fn core_term_drops_determiners_only_when_unquoted() {
        let text = "the Company means";
        let tokens = LexiconTagger.tag(text);
        let options = Options::default();
        let view = SentenceView::new(text, &tokens, &options);
        let mut m = TriggerMatch {
            kind: TriggerKind::MeansClause,
            term: 0..2,
            source: 0..3,
            gloss: 3..3,
            quoted: false,
            strong_trigger: true,
        };
        assert_eq!(core_term(&view, &m), 1..2);
        m.quoted = true;
        assert_eq!(core_term(&view, &m), 0..2);
    }

    #[test]
    fn offsets_survive_repeated_terms() {
        let text = "Pope and the \"Pope\": the head";
        let tokens = LexiconTagger.tag(text);
        let options = Options::default();
        let view = SentenceView::new(text, &tokens, &options);
        // Pope(0) and(1) the(2) "(3) Pope(4) "(5) :(6) the(7) head(8)
        let m = TriggerMatch {
            kind: TriggerKind::ColonGloss,
            term: 4..5,
            source: 2..9,
            gloss: 7..9,
            quoted: true,
            strong_trigger: false,
        };
        let c = resolve(&view, &m);
        assert_eq!(c.term_span.start, 14);
        assert_eq!(c.source, "the \"Pope\": the head");
    }
}
