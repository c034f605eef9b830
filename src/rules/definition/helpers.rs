use crate::rules::definition::predicates::{
    is_capitalized_word, is_clause_separator, is_close_paren, is_close_quote, is_comma, is_determiner, is_open_paren,
    is_open_quote,
};
use crate::segment::is_abbreviation;
use crate::{PosTag, SentenceView, TaggedToken};
use std::ops::Range;

/// Index of the quote closing the one opened at `open`.
///
/// Declines when another quote opens first or a parenthesis closes first, so an
/// unbalanced quote never swallows the rest of the sentence.
pub fn closing_quote(tokens: &[TaggedToken], open: usize) -> Option<usize> {
    for (idx, t) in tokens.iter().enumerate().skip(open + 1) {
        if is_close_quote(t) {
            return Some(idx);
        }
        if is_open_quote(t) || is_close_paren(t) {
            return None;
        }
    }
    None
}

/// Index of the quote opening the one closed at `close`.
pub fn opening_quote_before(tokens: &[TaggedToken], close: usize) -> Option<usize> {
    for idx in (0..close).rev() {
        let t = &tokens[idx];
        if is_open_quote(t) {
            return Some(idx);
        }
        if is_close_quote(t) || is_open_paren(t) {
            return None;
        }
    }
    None
}

/// Index of the `)` matching the `(` at `open`.
pub fn matching_paren(tokens: &[TaggedToken], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, t) in tokens.iter().enumerate().skip(open) {
        if is_open_paren(t) {
            depth += 1;
        } else if is_close_paren(t) {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return Some(idx);
            }
        }
    }
    None
}

/// Index of the `(` matching the `)` at `close`, looking back at most `limit` tokens.
pub fn matching_paren_before(tokens: &[TaggedToken], close: usize, limit: usize) -> Option<usize> {
    let mut depth = 0usize;
    for idx in (close.saturating_sub(limit + 1)..=close).rev() {
        let t = &tokens[idx];
        if is_close_paren(t) {
            depth += 1;
        } else if is_open_paren(t) {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return Some(idx);
            }
        }
    }
    None
}

pub fn word_count(tokens: &[TaggedToken]) -> usize {
    tokens.iter().filter(|t| t.is_word()).count()
}

/// A trigger phrase found in the sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerOccurrence {
    pub tokens: Range<usize>,
    pub strong: bool,
}

/// Non-overlapping trigger phrase occurrences in reading order.
///
/// At a given position a strong phrase beats a weak one and a longer phrase
/// beats a shorter one, so "shall mean" wins over "mean".
pub fn trigger_occurrences(view: &SentenceView<'_>) -> Vec<TriggerOccurrence> {
    let mut found = Vec::new();
    let phrases = view
        .options
        .trigger_phrases
        .iter()
        .map(|p| (p, true))
        .chain(view.options.weak_trigger_phrases.iter().map(|p| (p, false)));

    for (phrase, strong) in phrases {
        let words: Vec<String> = phrase.split_whitespace().map(str::to_lowercase).collect();
        if words.is_empty() || words.len() > view.lower.len() {
            continue;
        }
        for start in 0..=view.lower.len() - words.len() {
            if view.lower[start..start + words.len()] == words[..] {
                found.push(TriggerOccurrence { tokens: start..start + words.len(), strong });
            }
        }
    }

    found.sort_by_key(|o| (o.tokens.start, !o.strong, std::cmp::Reverse(o.tokens.len())));
    let mut kept: Vec<TriggerOccurrence> = Vec::new();
    for occurrence in found {
        if kept.last().is_some_and(|last| last.tokens.end > occurrence.tokens.start) {
            continue;
        }
        kept.push(occurrence);
    }
    kept
}

/// True when `idx` ends the sentence: terminal punctuation that does not close
/// an abbreviation and is followed by whitespace or nothing.
pub fn ends_sentence(view: &SentenceView<'_>, idx: usize) -> bool {
    let Some(t) = view.tokens.get(idx) else { return false };
    if t.tag != PosTag::Terminal {
        return false;
    }
    if t.text == "." && idx > 0 && is_abbreviation(&view.tokens[idx - 1].text) {
        return false;
    }
    view.text[t.end..].chars().next().is_none_or(char::is_whitespace)
}

/// End (exclusive) of the clause starting at `from`: the first `;`, "and" or
/// sentence-ending punctuation, else the end of the sentence.
///
/// Trailing terminal punctuation is never part of the clause.
pub fn clause_end(view: &SentenceView<'_>, from: usize) -> usize {
    let mut end = view.tokens.len();
    for idx in from..view.tokens.len() {
        let t = &view.tokens[idx];
        if is_clause_separator(t) || ends_sentence(view, idx) {
            end = idx;
            break;
        }
    }
    while end > from && view.tokens[end - 1].tag == PosTag::Terminal {
        end -= 1;
    }
    end
}

/// A term located directly before some boundary token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermSite {
    /// Term tokens (quotes excluded).
    pub term: Range<usize>,
    /// First token of the construct: opening quote, determiner, or phrase start.
    pub start: usize,
    pub quoted: bool,
}

/// Find the term that ends right before token `boundary`.
///
/// Preference order: a quoted term; a capitalized noun phrase (or the
/// capitalized tail of a phrase such as "the term Beneficial Owner"); a single
/// capitalized noun token.
pub fn term_before(view: &SentenceView<'_>, boundary: usize) -> Option<TermSite> {
    let last = boundary.checked_sub(1)?;
    let tokens = view.tokens;

    if is_close_quote(&tokens[last]) {
        let open = opening_quote_before(tokens, last)?;
        let term = open + 1..last;
        let words = word_count(&tokens[term.clone()]);
        if words == 0 || words > view.options.max_term_tokens {
            return None;
        }
        let start = if open > 0 && is_determiner(&tokens[open - 1]) { open - 1 } else { open };
        return Some(TermSite { term, start, quoted: true });
    }

    if let Some(phrase) = view.phrases.iter().find(|p| p.tokens.end == boundary) {
        let mut tail = phrase.tokens.end;
        if phrase.capitalized && !phrase.coordinated {
            tail = phrase.tokens.start;
            while tail < phrase.tokens.end && is_determiner(&tokens[tail]) {
                tail += 1;
            }
        } else {
            while tail > phrase.tokens.start && is_capitalized_word(&tokens[tail - 1]) {
                tail -= 1;
            }
        }
        if tail < phrase.tokens.end && phrase.tokens.end - tail <= view.options.max_term_tokens {
            return Some(TermSite { term: tail..phrase.tokens.end, start: phrase.tokens.start, quoted: false });
        }
    }

    let t = &tokens[last];
    if t.tag.is_noun() && t.is_capitalized() {
        let start = if last > 0 && is_determiner(&tokens[last - 1]) { last - 1 } else { last };
        return Some(TermSite { term: last..boundary, start, quoted: false });
    }

    None
}

/// Step back over a short interposed clause ending at `boundary - 1`:
/// `Lender (as defined below) means`, `"Affiliate", as used herein, means`.
///
/// Returns the index of the clause's opening token.
pub fn skip_interposed_clause(view: &SentenceView<'_>, boundary: usize) -> Option<usize> {
    let last = boundary.checked_sub(1)?;
    let tokens = view.tokens;
    let limit = view.options.max_clause_gap_tokens;

    if is_close_paren(&tokens[last]) {
        return matching_paren_before(tokens, last, limit);
    }
    if is_comma(&tokens[last]) {
        let floor = last.saturating_sub(limit + 1);
        return (floor..last).rev().find(|&idx| is_comma(&tokens[idx]));
    }
    None
}
