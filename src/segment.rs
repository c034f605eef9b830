//! Sentence segmentation seam.
//!
//! The document orchestrator asks a [`SentenceSegmenter`] for ordered,
//! non-overlapping segments with absolute byte offsets and runs the sentence
//! engine on each. Two implementations ship with the crate:
//!
//! - [`RuleSegmenter`]: paragraphs at blank lines, then sentences at
//!   terminal punctuation followed by whitespace and a capitalized start.
//! - [`LineSegmenter`]: one segment per physical line.
//!
//! Both are built on [`splitlines_with_spans`], which treats any line
//! terminator run (`\n`, `\r`, `\r\n`, `\n\r`) as a single boundary.

/// One segment of a document.
///
/// `text` must equal the document slice starting at `start`. It may be shorter
/// than `end - start`: a line segment's span includes its terminator while its
/// text does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

impl<'a> Segment<'a> {
    pub fn new(text: &'a str, start: usize, end: usize) -> Self {
        Segment { text, start, end }
    }
}

/// Splits a document into segments (sentences, lines, ...).
pub trait SentenceSegmenter {
    fn segment<'a>(&self, text: &'a str) -> Vec<Segment<'a>>;
}

/// Split `text` into lines, returning each line (terminator excluded) and its
/// span (terminator included).
///
/// `\r\n` and `\n\r` count as one terminator; two identical characters
/// (`\r\r`, `\n\n`) are two terminators, so an empty line sits between them.
/// No empty line is produced after a final terminator.
///
/// ```
/// use deflex::splitlines_with_spans;
///
/// let (lines, spans) = splitlines_with_spans("5\r\r\n5");
/// assert_eq!(lines, vec!["5", "", "5"]);
/// assert_eq!(spans, vec![(0, 2), (2, 4), (4, 5)]);
/// ```
pub fn splitlines_with_spans(text: &str) -> (Vec<&str>, Vec<(usize, usize)>) {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut spans = Vec::new();
    let mut line_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if b != b'\n' && b != b'\r' {
            i += 1;
            continue;
        }
        let mut terminator_end = i + 1;
        if let Some(&next) = bytes.get(i + 1) {
            if (next == b'\n' || next == b'\r') && next != b {
                terminator_end = i + 2;
            }
        }
        lines.push(&text[line_start..i]);
        spans.push((line_start, terminator_end));
        i = terminator_end;
        line_start = i;
    }

    if line_start < bytes.len() {
        lines.push(&text[line_start..]);
        spans.push((line_start, bytes.len()));
    }

    (lines, spans)
}

/// One segment per line, spans including the line terminator.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineSegmenter;

impl SentenceSegmenter for LineSegmenter {
    fn segment<'a>(&self, text: &'a str) -> Vec<Segment<'a>> {
        let (lines, spans) = splitlines_with_spans(text);
        lines.into_iter().zip(spans).map(|(line, (start, end))| Segment::new(line, start, end)).collect()
    }
}

/// Words that end with a period without ending the sentence.
pub(crate) const ABBREVIATIONS: &[&str] = &[
    "inc", "corp", "co", "ltd", "llc", "llp", "lp", "plc", "no", "nos", "mr", "mrs", "ms", "dr", "prof", "st", "sec",
    "art", "para", "u.s", "u.k", "e.g", "i.e", "etc", "vs", "jr", "sr", "n.a", "l.p", "p.c", "approx", "dept", "ch",
];

/// True when `word` (without its trailing period) is a known abbreviation or a
/// single-letter initial.
pub(crate) fn is_abbreviation(word: &str) -> bool {
    let word = word.trim_start_matches(|c: char| !c.is_alphanumeric());
    let mut chars = word.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_alphabetic() {
            return true;
        }
    }
    let lower = word.to_lowercase();
    ABBREVIATIONS.contains(&lower.as_str())
}

/// Paragraph- and punctuation-based sentence segmenter.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleSegmenter;

impl SentenceSegmenter for RuleSegmenter {
    fn segment<'a>(&self, text: &'a str) -> Vec<Segment<'a>> {
        let mut segments = Vec::new();
        for (start, end) in paragraph_spans(text) {
            split_sentences(text, start, end, &mut segments);
        }
        log::debug!("[segment] {} sentence(s) in {} byte(s)", segments.len(), text.len());
        segments
    }
}

/// Group consecutive non-blank lines into paragraph spans.
fn paragraph_spans(text: &str) -> Vec<(usize, usize)> {
    let (lines, spans) = splitlines_with_spans(text);
    let mut paragraphs = Vec::new();
    let mut current: Option<(usize, usize)> = None;

    for (line, (start, end)) in lines.into_iter().zip(spans) {
        if line.trim().is_empty() {
            if let Some(p) = current.take() {
                paragraphs.push(p);
            }
            continue;
        }
        current = Some(match current {
            Some((p_start, _)) => (p_start, end),
            None => (start, end),
        });
    }
    if let Some(p) = current {
        paragraphs.push(p);
    }

    paragraphs
}

fn split_sentences<'a>(text: &'a str, p_start: usize, p_end: usize, out: &mut Vec<Segment<'a>>) {
    let paragraph = &text[p_start..p_end];
    let mut sentence_start: Option<usize> = None;
    let mut chars = paragraph.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if sentence_start.is_none() {
            if ch.is_whitespace() {
                continue;
            }
            sentence_start = Some(idx);
        }
        if !matches!(ch, '.' | '!' | '?') {
            continue;
        }

        let mut end = idx + ch.len_utf8();
        while let Some(&(next_idx, next)) = chars.peek() {
            if matches!(next, '"' | '\u{201D}' | '\u{2019}' | '\'' | ')' | ']' | '}') {
                end = next_idx + next.len_utf8();
                chars.next();
            } else {
                break;
            }
        }

        let Some(start) = sentence_start else { continue };
        if ch == '.' && is_abbreviation(last_word(&paragraph[start..idx])) {
            continue;
        }
        if !boundary_follows(&paragraph[end..]) {
            continue;
        }

        push_trimmed(text, p_start + start, p_start + end, out);
        sentence_start = None;
    }

    if let Some(start) = sentence_start {
        push_trimmed(text, p_start + start, p_end, out);
    }
}

/// A sentence ends when whitespace follows and the next visible character can
/// start a sentence (or nothing follows at all).
fn boundary_follows(rest: &str) -> bool {
    let mut chars = rest.chars();
    match chars.next() {
        None => true,
        Some(c) if c.is_whitespace() => match rest.trim_start().chars().next() {
            None => true,
            Some(n) => n.is_uppercase() || matches!(n, '"' | '\u{201C}' | '(' | '['),
        },
        Some(_) => false,
    }
}

fn last_word(s: &str) -> &str {
    s.rsplit(char::is_whitespace).next().unwrap_or("")
}

fn push_trimmed<'a>(text: &'a str, start: usize, end: usize, out: &mut Vec<Segment<'a>>) {
    let trimmed = text[start..end].trim_end();
    if trimmed.is_empty() {
        return;
    }
    let end = start + trimmed.len();
    out.push(Segment::new(&text[start..end], start, end));
}
