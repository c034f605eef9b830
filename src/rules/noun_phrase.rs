//! Noun-phrase matcher.
//!
//! Each token is reduced to a one-letter grammar class (see
//! [`PosTag::grammar_class`](crate::PosTag)) and the resulting string is
//! scanned with a regex, so that a match's byte range is also its token range:
//!
//! ```text
//! tokens:  the  outstanding  Obligations  of  the  Corporation
//! classes: D    J            N            x   D    N
//! grammar: D?J*N+(?:CD?J*N+)*
//! matches: [-------------------------]        [------------]
//! ```
//!
//! A match is emitted when:
//!
//! - it is not a lone common noun (`Corporation` tagged `NN` at the start of a
//!   sentence never counts as a phrase on its own);
//! - it fits the token ceiling: `max_term_tokens`, or
//!   `coordinated_term_max_tokens` when the phrase joins several nominals.
//!
//! A coordinated match over the relaxed ceiling is split at its conjunctions
//! and each conjunct is judged on its own.

use crate::{NounPhraseSpan, Options, Span, TaggedToken};
use regex::Regex;
use std::collections::VecDeque;
use std::ops::Range;

fn grammar() -> &'static Regex {
    regex!(r"D?J*N+(?:CD?J*N+)*")
}

/// Noun phrases of `tokens`, in reading order.
///
/// Pure function of the tag sequence: the same input always yields the same
/// phrases, and nothing is kept between calls.
pub fn noun_phrases<'a>(text: &'a str, tokens: &'a [TaggedToken], options: &'a Options) -> NounPhraseMatcher<'a> {
    NounPhraseMatcher::new(text, tokens, options)
}

/// Lazy iterator over the noun phrases of one tagged sentence.
#[derive(Debug)]
pub struct NounPhraseMatcher<'a> {
    text: &'a str,
    tokens: &'a [TaggedToken],
    options: &'a Options,
    classes: String,
    position: usize,
    /// Conjuncts of a split coordinated match, waiting to be emitted.
    pending: VecDeque<NounPhraseSpan>,
}

impl<'a> NounPhraseMatcher<'a> {
    pub fn new(text: &'a str, tokens: &'a [TaggedToken], options: &'a Options) -> Self {
        let classes = tokens.iter().map(|t| t.tag.grammar_class()).collect();
        NounPhraseMatcher { text, tokens, options, classes, position: 0, pending: VecDeque::new() }
    }

    fn build(&self, range: Range<usize>, coordinated: bool) -> Option<NounPhraseSpan> {
        let tokens = &self.tokens[range.clone()];
        let (first, last) = (tokens.first()?, tokens.last()?);

        if tokens.len() == 1 && first.tag.is_common_noun() {
            return None;
        }
        let ceiling =
            if coordinated { self.options.coordinated_term_max_tokens } else { self.options.max_term_tokens };
        if tokens.len() > ceiling {
            return None;
        }

        let capitalized = tokens
            .iter()
            .filter(|t| !matches!(t.tag.grammar_class(), 'D' | 'C'))
            .all(|t| t.is_capitalized() || t.text.starts_with(|c: char| c.is_ascii_digit()));
        let span = Span::new(first.start, last.end);

        Some(NounPhraseSpan { tokens: range, span, text: span.slice(self.text).to_string(), coordinated, capitalized })
    }

    /// Queue the conjuncts of an over-long coordinated match.
    fn split_coordinated(&mut self, range: Range<usize>) {
        let mut piece_start = range.start;
        for idx in range.clone() {
            if self.classes.as_bytes()[idx] == b'C' {
                if let Some(phrase) = self.build(piece_start..idx, false) {
                    self.pending.push_back(phrase);
                }
                piece_start = idx + 1;
            }
        }
        if let Some(phrase) = self.build(piece_start..range.end, false) {
            self.pending.push_back(phrase);
        }
    }
}

impl Iterator for NounPhraseMatcher<'_> {
    type Item = NounPhraseSpan;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(phrase) = self.pending.pop_front() {
                return Some(phrase);
            }

            let found = grammar().find_at(&self.classes, self.position)?;
            let range = found.start()..found.end();
            self.position = found.end();

            let coordinated = found.as_str().contains('C');
            if coordinated && range.len() > self.options.coordinated_term_max_tokens {
                self.split_coordinated(range);
                continue;
            }
            if let Some(phrase) = self.build(range, coordinated) {
                return Some(phrase);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LexiconTagger, PosTag, Tagger};

    fn phrases(text: &str) -> Vec<NounPhraseSpan> {
        let tokens = LexiconTagger.tag(text);
        let options = Options::default();
        noun_phrases(text, &tokens, &options).collect()
    }

    fn tok(text: &str, tag: PosTag, start: usize) -> TaggedToken {
        TaggedToken::new(text, tag, start, start + text.len())
    }

    #[test]
    fn lowercase_prose_has_no_capitalized_phrases() {
        let text = "Bonds in a commercial paper mode are remarketed for various periods that can be no longer than \
                    270 days and are established at the beginning of each commercial paper rate period.";
        let found = phrases(text);
        assert!(!found.is_empty());
        assert!(found.iter().all(|p| !p.capitalized), "{:?}", found);
        assert!(found.iter().all(|p| p.text != "Bonds"));
    }

    #[test]
    fn lone_common_noun_is_not_a_phrase() {
        let found = phrases("Corporation (as described below) and any other Obligations issued");
        assert!(found.iter().all(|p| p.text != "Corporation"), "{:?}", found);
    }

    #[test]
    fn capitalized_name_before_trigger() {
        let found = phrases("Beneficial Owner means any Person which has or shares the power");
        assert_eq!(found[0].text, "Beneficial Owner");
        assert_eq!(found[0].tokens, 0..2);
        assert!(found[0].capitalized);
        assert!(!found[0].coordinated);
    }

    #[test]
    fn phrase_offsets_reproduce_text() {
        let text = "made by Stanford Health\n  Care (the \"Corporation\") under the Loan Agreement";
        for p in phrases(text) {
            assert_eq!(&text[p.span.start..p.span.end], p.text);
        }
        assert!(phrases(text).iter().any(|p| p.text == "Stanford Health\n  Care"));
    }

    #[test]
    fn ceiling_rejects_long_phrases() {
        let tokens = vec![
            tok("A", PosTag::ProperNoun, 0),
            tok("B", PosTag::ProperNoun, 2),
            tok("C", PosTag::ProperNoun, 4),
            tok("D", PosTag::ProperNoun, 6),
        ];
        let text = "A B C D";
        let options = Options { max_term_tokens: 3, ..Options::default() };
        assert_eq!(noun_phrases(text, &tokens, &options).count(), 0);

        let options = Options { max_term_tokens: 4, ..Options::default() };
        assert_eq!(noun_phrases(text, &tokens, &options).count(), 1);
    }

    #[test]
    fn coordinated_phrase_uses_relaxed_ceiling_then_splits() {
        let text = "the Bonds and the Notes";
        let tokens = vec![
            tok("the", PosTag::Determiner, 0),
            tok("Bonds", PosTag::ProperNounPlural, 4),
            tok("and", PosTag::Conjunction, 10),
            tok("the", PosTag::Determiner, 14),
            tok("Notes", PosTag::ProperNounPlural, 18),
        ];

        let options = Options::default();
        let found: Vec<_> = noun_phrases(text, &tokens, &options).collect();
        assert_eq!(found.len(), 1);
        assert!(found[0].coordinated);
        assert_eq!(found[0].text, text);

        let options = Options { coordinated_term_max_tokens: 4, ..Options::default() };
        let found: Vec<String> = noun_phrases(text, &tokens, &options).map(|p| p.text).collect();
        assert_eq!(found, vec!["the Bonds", "the Notes"]);
    }
}
