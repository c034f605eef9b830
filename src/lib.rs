#[macro_use]
mod macros;
mod api;
mod engine;
mod error;
mod rules;
mod segment;
mod tagging;

pub use api::{
    Definition, ExtractionDetails, ExtractionReport, Options, SentenceSummary, get_definitions_explicit,
    get_definitions_explicit_verbose, get_definitions_explicit_verbose_with, get_definitions_explicit_with,
    get_definitions_in_sentence, get_definitions_in_sentence_with, terms_in_sentence, terms_with_sources_in_sentence,
};
pub use engine::{DroppedCandidate, Extractor, FilterRule, TriggerMask};
pub use error::{Collaborator, ExtractResult, MalformedInputError};
pub use rules::noun_phrase::{NounPhraseMatcher, noun_phrases};
pub use segment::{LineSegmenter, RuleSegmenter, Segment, SentenceSegmenter, splitlines_with_spans};
pub use tagging::{LexiconTagger, Tagger};

use serde::Serialize;
use std::ops::Range;

// --- Spans and tokens --------------------------------------------------------

/// Half-open byte interval `[start, end)` over some original text.
///
/// Offsets always refer to the text exactly as the caller supplied it, so
/// slicing that text with a span reproduces the surface form, internal
/// whitespace and line breaks included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub struct Span {
    /// Start byte index (inclusive).
    pub start: usize,
    /// End byte index (exclusive).
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when the two spans share at least one byte.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Move the span by `offset` bytes (used to rebase sentence offsets).
    pub fn shifted(&self, offset: usize) -> Span {
        Span { start: self.start + offset, end: self.end + offset }
    }

    /// Slice `text` with this span, or `""` when the span does not fit.
    pub fn slice<'t>(&self, text: &'t str) -> &'t str {
        text.get(self.start..self.end).unwrap_or("")
    }
}

/// Part-of-speech tag attached to a token.
///
/// The variants group the Penn Treebank tag set into the classes the
/// definition rules care about; [`PosTag::from_penn`] accepts raw Penn tags so
/// that an external tagger can feed the engine directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PosTag {
    Noun,
    NounPlural,
    ProperNoun,
    ProperNounPlural,
    Determiner,
    Adjective,
    Adverb,
    Verb,
    /// Past or present participle (`VBN`/`VBG`); may act as a modifier.
    Participle,
    Modal,
    Preposition,
    To,
    Conjunction,
    Pronoun,
    WhWord,
    Number,
    Possessive,
    OpenQuote,
    CloseQuote,
    OpenBracket,
    CloseBracket,
    /// `:` and `;` (Penn folds both into one tag).
    Colon,
    Comma,
    /// Sentence-final punctuation: `.`, `!`, `?`.
    Terminal,
    Symbol,
}

impl PosTag {
    /// Map a Penn Treebank tag string onto a `PosTag`.
    pub fn from_penn(tag: &str) -> Self {
        match tag {
            "NN" => PosTag::Noun,
            "NNS" => PosTag::NounPlural,
            "NNP" => PosTag::ProperNoun,
            "NNPS" => PosTag::ProperNounPlural,
            "DT" | "PDT" => PosTag::Determiner,
            "JJ" | "JJR" | "JJS" => PosTag::Adjective,
            "RB" | "RBR" | "RBS" | "RP" => PosTag::Adverb,
            "VB" | "VBD" | "VBP" | "VBZ" => PosTag::Verb,
            "VBN" | "VBG" => PosTag::Participle,
            "MD" => PosTag::Modal,
            "IN" => PosTag::Preposition,
            "TO" => PosTag::To,
            "CC" => PosTag::Conjunction,
            "PRP" | "PRP$" | "EX" => PosTag::Pronoun,
            "WDT" | "WP" | "WP$" | "WRB" => PosTag::WhWord,
            "CD" => PosTag::Number,
            "POS" => PosTag::Possessive,
            "``" => PosTag::OpenQuote,
            "''" => PosTag::CloseQuote,
            "-LRB-" | "(" => PosTag::OpenBracket,
            "-RRB-" | ")" => PosTag::CloseBracket,
            ":" => PosTag::Colon,
            "," => PosTag::Comma,
            "." => PosTag::Terminal,
            _ => PosTag::Symbol,
        }
    }

    /// Representative Penn Treebank tag for this class.
    pub fn as_penn(self) -> &'static str {
        match self {
            PosTag::Noun => "NN",
            PosTag::NounPlural => "NNS",
            PosTag::ProperNoun => "NNP",
            PosTag::ProperNounPlural => "NNPS",
            PosTag::Determiner => "DT",
            PosTag::Adjective => "JJ",
            PosTag::Adverb => "RB",
            PosTag::Verb => "VB",
            PosTag::Participle => "VBN",
            PosTag::Modal => "MD",
            PosTag::Preposition => "IN",
            PosTag::To => "TO",
            PosTag::Conjunction => "CC",
            PosTag::Pronoun => "PRP",
            PosTag::WhWord => "WDT",
            PosTag::Number => "CD",
            PosTag::Possessive => "POS",
            PosTag::OpenQuote => "``",
            PosTag::CloseQuote => "''",
            PosTag::OpenBracket => "-LRB-",
            PosTag::CloseBracket => "-RRB-",
            PosTag::Colon => ":",
            PosTag::Comma => ",",
            PosTag::Terminal => ".",
            PosTag::Symbol => "SYM",
        }
    }

    pub fn is_noun(self) -> bool {
        matches!(self, PosTag::Noun | PosTag::NounPlural | PosTag::ProperNoun | PosTag::ProperNounPlural)
    }

    pub fn is_common_noun(self) -> bool {
        matches!(self, PosTag::Noun | PosTag::NounPlural)
    }

    pub fn is_punctuation(self) -> bool {
        matches!(
            self,
            PosTag::OpenQuote
                | PosTag::CloseQuote
                | PosTag::OpenBracket
                | PosTag::CloseBracket
                | PosTag::Colon
                | PosTag::Comma
                | PosTag::Terminal
                | PosTag::Symbol
        )
    }

    /// One-letter class used by the noun-phrase tag grammar.
    ///
    /// ```text
    /// D determiner   J adjective/participle   N noun   C conjunction   x other
    /// ```
    pub(crate) fn grammar_class(self) -> char {
        match self {
            PosTag::Determiner => 'D',
            PosTag::Adjective | PosTag::Participle => 'J',
            PosTag::Noun | PosTag::NounPlural | PosTag::ProperNoun | PosTag::ProperNounPlural => 'N',
            PosTag::Conjunction => 'C',
            _ => 'x',
        }
    }
}

/// A token of a sentence with its tag and sentence-relative byte offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaggedToken {
    pub text: String,
    pub tag: PosTag,
    pub start: usize,
    pub end: usize,
}

impl TaggedToken {
    pub fn new(text: impl Into<String>, tag: PosTag, start: usize, end: usize) -> Self {
        TaggedToken { text: text.into(), tag, start, end }
    }

    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }

    /// True when the token starts with a letter or digit.
    pub fn is_word(&self) -> bool {
        self.text.chars().next().is_some_and(char::is_alphanumeric)
    }

    /// True when the token starts with an upper-case letter.
    pub fn is_capitalized(&self) -> bool {
        self.text.chars().next().is_some_and(char::is_uppercase)
    }
}

/// A contiguous run of tokens matching the noun-phrase tag grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NounPhraseSpan {
    /// Token indices covered by the phrase.
    pub tokens: Range<usize>,
    /// Sentence-relative byte span of the phrase.
    pub span: Span,
    /// Surface text, sliced from the original sentence.
    pub text: String,
    /// Whether the phrase joins several nominals with a conjunction.
    pub coordinated: bool,
    /// Every nominal and modifier token starts with a capital letter or digit.
    pub capitalized: bool,
}

impl NounPhraseSpan {
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }
}

// --- Definition candidates ---------------------------------------------------

/// The surface pattern that introduced a definition.
///
/// The variants form a closed set evaluated in the order of [`TriggerKind::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TriggerKind {
    /// `(the "Corporation")`, `(each an "Obligation" and collectively, the "Obligations")`
    QuotedParenthetical,
    /// `Beneficial Owner means any Person ...`
    MeansClause,
    /// `The "Pope": the head of the Catholic Church.`
    ColonGloss,
    /// `ABC Corp, hereinafter "Contractor"`
    EmbracedQuote,
}

impl TriggerKind {
    /// Evaluation order of the recognizers.
    pub const ALL: [TriggerKind; 4] =
        [TriggerKind::QuotedParenthetical, TriggerKind::MeansClause, TriggerKind::ColonGloss, TriggerKind::EmbracedQuote];

    pub fn name(self) -> &'static str {
        match self {
            TriggerKind::QuotedParenthetical => "quoted-parenthetical",
            TriggerKind::MeansClause => "means-clause",
            TriggerKind::ColonGloss => "colon-gloss",
            TriggerKind::EmbracedQuote => "embraced-quote",
        }
    }

    /// Cheap cues that must be present in the sentence for this recognizer to run.
    pub fn required_cues(self) -> TriggerMask {
        match self {
            TriggerKind::QuotedParenthetical => TriggerMask::HAS_PAREN | TriggerMask::HAS_QUOTE,
            TriggerKind::MeansClause => TriggerMask::HAS_TRIGGER_WORD,
            TriggerKind::ColonGloss => TriggerMask::HAS_COLON,
            TriggerKind::EmbracedQuote => TriggerMask::HAS_QUOTE,
        }
    }

    /// Run this recognizer over one sentence.
    pub(crate) fn try_match(self, sentence: &SentenceView<'_>) -> Vec<TriggerMatch> {
        use crate::rules::definition::rules as recognizers;
        match self {
            TriggerKind::QuotedParenthetical => recognizers::quoted_parenthetical(sentence),
            TriggerKind::MeansClause => recognizers::means_clause(sentence),
            TriggerKind::ColonGloss => recognizers::colon_gloss(sentence),
            TriggerKind::EmbracedQuote => recognizers::embraced_quote(sentence),
        }
    }
}

/// A definition found in one sentence, with sentence-relative offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefinitionCandidate {
    /// Defined term with quotes, brackets and trailing punctuation stripped.
    pub term: String,
    /// Span of `term` inside the sentence.
    pub term_span: Span,
    /// Full matched construct (term, trigger and defining clause).
    pub source: String,
    /// Span of `source` inside the sentence.
    pub span: Span,
    /// The defining clause proper: parenthetical interior, text after the
    /// trigger phrase or colon, or the antecedent of an embraced quote.
    pub gloss: Span,
    pub kind: TriggerKind,
    /// Further terms co-defined by the same construct, in order of appearance.
    pub aliases: Vec<String>,
}

// --- Internal types ----------------------------------------------------------

/// Raw recognizer output, expressed in token indices.
///
/// A match is judged by the false-positive filters before the span resolver
/// turns it into a [`DefinitionCandidate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TriggerMatch {
    pub kind: TriggerKind,
    /// Term tokens; for quoted terms this excludes the quote marks.
    pub term: Range<usize>,
    /// Tokens of the whole construct.
    pub source: Range<usize>,
    /// Tokens of the defining clause.
    pub gloss: Range<usize>,
    pub quoted: bool,
    /// A strong trigger phrase ("means", "shall mean", ...) introduced the term.
    pub strong_trigger: bool,
}

/// Everything the recognizers and filters need to know about one sentence.
///
/// Built once per sentence and dropped when the sentence is done.
#[derive(Debug)]
pub(crate) struct SentenceView<'a> {
    pub text: &'a str,
    pub tokens: &'a [TaggedToken],
    /// Lower-cased token texts, aligned with `tokens`.
    pub lower: Vec<String>,
    /// Noun phrases in reading order.
    pub phrases: Vec<NounPhraseSpan>,
    /// Parenthesis nesting depth of each token (the brackets themselves excluded).
    pub paren_depth: Vec<u32>,
    pub options: &'a Options,
}

impl<'a> SentenceView<'a> {
    pub fn new(text: &'a str, tokens: &'a [TaggedToken], options: &'a Options) -> Self {
        let lower = tokens.iter().map(|t| t.text.to_lowercase()).collect();
        let phrases = NounPhraseMatcher::new(text, tokens, options).collect();

        let mut paren_depth = Vec::with_capacity(tokens.len());
        let mut depth = 0u32;
        for token in tokens {
            match token.text.as_str() {
                "(" => {
                    paren_depth.push(depth);
                    depth += 1;
                }
                ")" => {
                    depth = depth.saturating_sub(1);
                    paren_depth.push(depth);
                }
                _ => paren_depth.push(depth),
            }
        }

        SentenceView { text, tokens, lower, phrases, paren_depth, options }
    }

    /// Byte span covered by a token range (empty span at the range start when empty).
    pub fn span_of(&self, range: &Range<usize>) -> Span {
        match (self.tokens.get(range.start), range.end.checked_sub(1).and_then(|i| self.tokens.get(i))) {
            (Some(first), Some(last)) if range.start < range.end => Span::new(first.start, last.end),
            (Some(first), _) => Span::new(first.start, first.start),
            _ => Span::new(self.text.len(), self.text.len()),
        }
    }

    /// Surface text covered by a token range.
    pub fn text_of(&self, range: &Range<usize>) -> &'a str {
        self.span_of(range).slice(self.text)
    }
}
