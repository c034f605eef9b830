//! Tokenizer/tagger seam.
//!
//! The engine consumes `(token, tag, start, end)` sequences and never tokenizes
//! on its own. [`Tagger`] is the seam an external part-of-speech tagger plugs
//! into; [`LexiconTagger`] is the built-in deterministic implementation used by
//! the default entry points.
//!
//! ## How `LexiconTagger` decides
//!
//! ```text
//! punctuation  -> its own token; straight quotes open/close from context
//! digits       -> Number
//! closed class -> lexicon (determiners, prepositions, modals, ...)
//! Capitalized  -> ProperNoun, except a sentence-initial word that does not
//!                 start a run of capitalized words (guessed as common)
//! lowercase    -> verb lexicon, then suffix heuristics
//! ```
//!
//! The sentence-initial rule matters: "Bonds in a commercial paper mode ..."
//! must see `Bonds` as a plain plural noun, while "Beneficial Owner means ..."
//! must see a two-word proper name.

use crate::{PosTag, Span, TaggedToken};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Turns a sentence into tagged tokens with sentence-relative byte offsets.
///
/// Implementations must return tokens in reading order, non-overlapping, on
/// character boundaries, and with `text` equal to the sentence slice at
/// `start..end`; the engine rejects anything else.
pub trait Tagger {
    fn tag(&self, sentence: &str) -> Vec<TaggedToken>;
}

/// Rule-based tagger built from closed-class word lists and suffix heuristics.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconTagger;

impl Tagger for LexiconTagger {
    fn tag(&self, sentence: &str) -> Vec<TaggedToken> {
        let spans = tokenize(sentence);
        let first_word = spans.iter().position(|s| starts_alphabetic(s.slice(sentence)));

        let tokens: Vec<TaggedToken> = spans
            .iter()
            .enumerate()
            .map(|(idx, span)| {
                let text = span.slice(sentence);
                let tag = tag_token(sentence, &spans, idx, first_word == Some(idx));
                TaggedToken::new(text, tag, span.start, span.end)
            })
            .collect();

        log::trace!(
            "[tagger] {}",
            tokens.iter().map(|t| format!("{}/{}", t.text, t.tag.as_penn())).collect::<Vec<_>>().join(" ")
        );
        tokens
    }
}

// --- Lexicon -----------------------------------------------------------------

/// Closed-class words; these keep their tag even when capitalized.
static CLOSED_CLASS: Lazy<HashMap<&'static str, PosTag>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for w in [
        "the", "a", "an", "this", "that", "these", "those", "each", "every", "any", "all", "some", "no", "another",
        "such", "both", "either", "neither",
    ] {
        map.insert(w, PosTag::Determiner);
    }
    for w in [
        "of", "in", "on", "at", "by", "for", "with", "from", "under", "into", "upon", "between", "among", "through",
        "throughout", "during", "without", "within", "pursuant", "as", "than", "about", "over", "after", "before",
        "since", "until", "against", "across", "per", "via", "except", "regarding", "concerning", "beyond", "below",
        "above", "onto", "toward", "towards", "whether", "if", "because", "although", "though", "while", "unless",
        "where", "when",
    ] {
        map.insert(w, PosTag::Preposition);
    }
    for w in ["and", "or", "nor", "but", "plus"] {
        map.insert(w, PosTag::Conjunction);
    }
    for w in ["shall", "will", "may", "must", "can", "could", "would", "should", "might"] {
        map.insert(w, PosTag::Modal);
    }
    for w in [
        "it", "its", "they", "their", "them", "theirs", "he", "him", "his", "she", "her", "hers", "we", "our", "us",
        "you", "your", "i", "me", "my", "itself", "themselves", "there",
    ] {
        map.insert(w, PosTag::Pronoun);
    }
    for w in ["which", "who", "whom", "whose", "what", "whatever", "whichever", "whoever"] {
        map.insert(w, PosTag::WhWord);
    }
    for w in [
        "not", "also", "herein", "hereinafter", "hereafter", "hereby", "hereof", "hereto", "hereunder", "thereof",
        "therein", "thereto", "therefore", "however", "only", "very", "so", "then", "here", "further", "collectively",
        "individually", "together", "respectively", "jointly", "severally",
    ] {
        map.insert(w, PosTag::Adverb);
    }
    map.insert("to", PosTag::To);
    map
});

/// Common verbs that the suffix heuristics would otherwise mistake for nouns.
static VERBS: Lazy<HashMap<&'static str, PosTag>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for w in [
        "is", "are", "was", "were", "be", "been", "being", "am", "has", "have", "had", "do", "does", "did", "means",
        "mean", "meant", "refers", "refer", "shares", "share", "made", "make", "makes", "includes", "include",
        "deem", "deems", "become", "becomes", "provides", "paid", "said", "held", "set", "given", "taken",
    ] {
        map.insert(w, PosTag::Verb);
    }
    map
});

// --- Tokenization ------------------------------------------------------------

/// Split `text` into word and punctuation token spans.
///
/// Words are runs of alphanumerics; `-`, `'`, `’`, `&`, `/` and `.` stay inside
/// a word when letters or digits follow, and `,`/`:` only between digits
/// (`100,000`). Every other non-space character is a token of its own.
fn tokenize(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some((start, ch)) = chars.next() {
        if ch.is_whitespace() {
            continue;
        }
        if !ch.is_alphanumeric() {
            spans.push(Span::new(start, start + ch.len_utf8()));
            continue;
        }

        let mut end = start + ch.len_utf8();
        let mut prev = ch;
        while let Some(&(idx, c)) = chars.peek() {
            let next = text[idx + c.len_utf8()..].chars().next();
            if c.is_alphanumeric() || joins_word(prev, c, next) {
                end = idx + c.len_utf8();
                prev = c;
                chars.next();
            } else {
                break;
            }
        }
        spans.push(Span::new(start, end));
    }

    spans
}

fn joins_word(prev: char, c: char, next: Option<char>) -> bool {
    let Some(next) = next else { return false };
    match c {
        '-' | '\'' | '\u{2019}' | '&' | '/' | '.' => prev.is_alphanumeric() && next.is_alphanumeric(),
        ',' | ':' => prev.is_ascii_digit() && next.is_ascii_digit(),
        _ => false,
    }
}

fn starts_alphabetic(s: &str) -> bool {
    s.chars().next().is_some_and(char::is_alphabetic)
}

// --- Tagging -----------------------------------------------------------------

fn tag_token(sentence: &str, spans: &[Span], idx: usize, sentence_initial: bool) -> PosTag {
    let span = spans[idx];
    let text = span.slice(sentence);
    let Some(first) = text.chars().next() else { return PosTag::Symbol };

    if !first.is_alphanumeric() {
        return tag_punctuation(sentence, span, first);
    }
    if first.is_numeric() {
        return PosTag::Number;
    }

    let lower = text.to_lowercase();
    if let Some(tag) = CLOSED_CLASS.get(lower.as_str()) {
        return *tag;
    }

    if first.is_uppercase() {
        let starts_name = spans
            .get(idx + 1)
            .map(|next| next.slice(sentence))
            .is_some_and(|next| next.chars().next().is_some_and(char::is_uppercase));
        if !sentence_initial || starts_name || is_all_caps(text) {
            return proper_noun(&lower);
        }
    }

    if let Some(tag) = VERBS.get(lower.as_str()) {
        return *tag;
    }
    guess_from_suffix(&lower)
}

fn tag_punctuation(sentence: &str, span: Span, ch: char) -> PosTag {
    match ch {
        '\u{201C}' => PosTag::OpenQuote,
        '\u{201D}' => PosTag::CloseQuote,
        '"' => {
            if straight_quote_opens(sentence, span.start) {
                PosTag::OpenQuote
            } else {
                PosTag::CloseQuote
            }
        }
        '(' | '[' | '{' => PosTag::OpenBracket,
        ')' | ']' | '}' => PosTag::CloseBracket,
        ':' | ';' => PosTag::Colon,
        ',' => PosTag::Comma,
        '.' | '!' | '?' => PosTag::Terminal,
        _ => PosTag::Symbol,
    }
}

/// A straight `"` opens a quotation at the start of the text or after
/// whitespace, an opening bracket, or a dash.
fn straight_quote_opens(sentence: &str, at: usize) -> bool {
    match sentence[..at].chars().next_back() {
        None => true,
        Some(prev) => prev.is_whitespace() || matches!(prev, '(' | '[' | '{' | '\u{2014}' | '\u{2013}' | '-'),
    }
}

fn is_all_caps(text: &str) -> bool {
    text.chars().filter(|c| c.is_alphabetic()).count() > 1 && !text.chars().any(char::is_lowercase)
}

fn proper_noun(lower: &str) -> PosTag {
    if lower.len() > 3 && lower.ends_with('s') && !lower.ends_with("ss") {
        PosTag::ProperNounPlural
    } else {
        PosTag::ProperNoun
    }
}

fn guess_from_suffix(lower: &str) -> PosTag {
    let len = lower.chars().count();
    if len > 4 && lower.ends_with("ly") {
        return PosTag::Adverb;
    }
    if (len > 5 && lower.ends_with("ing")) || (len > 4 && lower.ends_with("ed")) {
        return PosTag::Participle;
    }
    if len > 4 && ["ous", "ive", "able", "ible", "ful", "less", "ial", "ical"].iter().any(|s| lower.ends_with(s)) {
        return PosTag::Adjective;
    }
    if len > 3 && lower.ends_with('s') && !["ss", "us", "is"].iter().any(|s| lower.ends_with(s)) {
        return PosTag::NounPlural;
    }
    PosTag::Noun
}
