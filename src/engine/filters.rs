//! False-positive filters.
//!
//! Recognizers are deliberately generous; these rules throw back matches that
//! look like definitions but are ordinary references ("Costs incurred by the
//! Corporation ...", "Bonds shall be deemed ..."). The rules run in
//! [`FilterRule::ORDER`] and the first one that fires drops the match.
//!
//! A quoted term or a strong trigger phrase ("means", "shall mean", ...) is
//! explicit enough to bypass the three lexical rules; only the empty-clause
//! rule applies to every match.

use super::resolve::core_term;
use crate::rules::definition::predicates::is_modal;
use crate::{SentenceView, TriggerKind, TriggerMatch};
use serde::Serialize;

/// A filter rule that can drop a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterRule {
    /// The term is one common-noun token once determiners are stripped.
    SingleCommonNoun,
    /// The term is a configured generic legal noun.
    GenericStoplist,
    /// The term is followed directly by a modal verb ("Bonds shall be ...").
    ModalWithoutQuote,
    /// Nothing but punctuation and whitespace is left of the defining clause.
    EmptyClause,
}

impl FilterRule {
    /// Evaluation order.
    pub const ORDER: [FilterRule; 4] = [
        FilterRule::SingleCommonNoun,
        FilterRule::GenericStoplist,
        FilterRule::ModalWithoutQuote,
        FilterRule::EmptyClause,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FilterRule::SingleCommonNoun => "single-common-noun",
            FilterRule::GenericStoplist => "generic-stoplist",
            FilterRule::ModalWithoutQuote => "modal-without-quote",
            FilterRule::EmptyClause => "empty-clause",
        }
    }

    fn fires(self, view: &SentenceView<'_>, m: &TriggerMatch) -> bool {
        let explicit = m.quoted || m.strong_trigger;
        match self {
            FilterRule::SingleCommonNoun => {
                if explicit {
                    return false;
                }
                let core = core_term(view, m);
                core.len() == 1 && view.tokens[core.start].tag.is_common_noun()
            }
            FilterRule::GenericStoplist => {
                if explicit {
                    return false;
                }
                let core = view.text_of(&core_term(view, m));
                view.options.is_generic_noun(core)
            }
            FilterRule::ModalWithoutQuote => {
                !explicit && view.tokens.get(m.term.end).is_some_and(is_modal)
            }
            FilterRule::EmptyClause => !view.text_of(&m.gloss).chars().any(char::is_alphanumeric),
        }
    }
}

/// First rule in [`FilterRule::ORDER`] that drops `m`, if any.
pub(crate) fn first_firing(view: &SentenceView<'_>, m: &TriggerMatch) -> Option<FilterRule> {
    FilterRule::ORDER.into_iter().find(|rule| rule.fires(view, m))
}

/// A match thrown back by a filter, kept for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedCandidate {
    pub term: String,
    pub kind: TriggerKind,
    pub rule: FilterRule,
    /// Sentence-relative byte offsets of the dropped construct.
    pub start: usize,
    pub end: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LexiconTagger, Options, Tagger};
    use std::ops::Range;

    fn check(text: &str, term: Range<usize>, gloss: Range<usize>, quoted: bool, strong: bool) -> Option<FilterRule> {
        let tokens = LexiconTagger.tag(text);
        let options = Options::default();
        let view = SentenceView::new(text, &tokens, &options);
        let m = TriggerMatch {
            kind: TriggerKind::MeansClause,
            source: term.start..gloss.end,
            term,
            gloss,
            quoted,
            strong_trigger: strong,
        };
        first_firing(&view, &m)
    }

    #[test]
    fn bare_common_noun_is_dropped_before_the_stoplist() {
        // Bonds(0) shall(1) be(2) deemed(3) to(4) have(5) ...
        let text = "Bonds shall be deemed to have been paid";
        assert_eq!(check(text, 0..1, 5..8, false, false), Some(FilterRule::SingleCommonNoun));
    }

    #[test]
    fn stoplist_catches_capitalized_generic_nouns() {
        // the(0) Corporation(1) includes(2) the(3) Borrower(4)
        let text = "the Corporation includes the Borrower";
        assert_eq!(check(text, 1..2, 3..5, false, false), Some(FilterRule::GenericStoplist));
        assert_eq!(check(text, 1..2, 3..5, true, false), None);
        assert_eq!(check(text, 1..2, 3..5, false, true), None);
    }

    #[test]
    fn modal_after_unquoted_term() {
        // Loan(0) Parties(1) shall(2) be(3) deemed(4) to(5) include(6) Affiliates(7)
        let text = "Loan Parties shall be deemed to include Affiliates";
        assert_eq!(check(text, 0..2, 6..8, false, false), Some(FilterRule::ModalWithoutQuote));

        // Loan(0) Parties(1) may(2) include(3) Affiliates(4)
        let text = "Loan Parties may include Affiliates";
        assert_eq!(check(text, 0..2, 4..5, false, false), Some(FilterRule::ModalWithoutQuote));
        assert_eq!(check(text, 0..2, 4..5, false, true), None);
    }

    #[test]
    fn empty_clause_applies_even_to_quoted_terms() {
        // The(0) "(1) Pope(2) "(3) :(4) .(5)
        let text = "The \"Pope\": .";
        assert_eq!(check(text, 2..3, 5..6, true, false), Some(FilterRule::EmptyClause));
    }

    #[test]
    fn order_is_fixed() {
        assert_eq!(FilterRule::ORDER[0].name(), "single-common-noun");
        assert_eq!(FilterRule::ORDER[3], FilterRule::EmptyClause);
    }
}
