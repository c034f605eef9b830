//! Input-contract checks on collaborator output.
//!
//! Every offset the engine reports is derived from tagger and segmenter
//! offsets, so these are checked before anything reads them. The first
//! violation is returned; nothing is repaired.

use crate::error::{Collaborator, ExtractResult, MalformedInputError};
use crate::{Segment, TaggedToken};

/// Bounds, ordering and boundary checks shared by tokens and segments.
fn check_span(
    origin: Collaborator,
    text: &str,
    index: usize,
    start: usize,
    end: usize,
    previous_end: usize,
) -> ExtractResult<()> {
    if start > end {
        return Err(MalformedInputError::Inverted { origin, index, start, end });
    }
    if end > text.len() {
        return Err(MalformedInputError::OutOfRange { origin, index, start, end, len: text.len() });
    }
    for offset in [start, end] {
        if !text.is_char_boundary(offset) {
            return Err(MalformedInputError::NotCharBoundary { origin, index, offset });
        }
    }
    if start < previous_end {
        return Err(MalformedInputError::Overlap { origin, index, start, previous_end });
    }
    Ok(())
}

/// Tokens must be ordered, non-overlapping, and carry exactly the text they span.
pub(crate) fn validate_tokens(sentence: &str, tokens: &[TaggedToken]) -> ExtractResult<()> {
    let mut previous_end = 0;
    for (index, t) in tokens.iter().enumerate() {
        check_span(Collaborator::Tagger, sentence, index, t.start, t.end, previous_end)?;
        let expected = &sentence[t.start..t.end];
        if expected != t.text {
            return Err(MalformedInputError::TextMismatch {
                origin: Collaborator::Tagger,
                index,
                start: t.start,
                expected: expected.to_string(),
                found: t.text.clone(),
            });
        }
        previous_end = t.end;
    }
    Ok(())
}

/// Segments must be ordered and non-overlapping, and their text must be the
/// document slice starting at `start` (it may stop short of `end`).
pub(crate) fn validate_segments(document: &str, segments: &[Segment<'_>]) -> ExtractResult<()> {
    let mut previous_end = 0;
    for (index, s) in segments.iter().enumerate() {
        check_span(Collaborator::Segmenter, document, index, s.start, s.end, previous_end)?;
        let text_end = s.start + s.text.len();
        if text_end > s.end || document.get(s.start..text_end) != Some(s.text) {
            return Err(MalformedInputError::TextMismatch {
                origin: Collaborator::Segmenter,
                index,
                start: s.start,
                expected: document[s.start..s.end].to_string(),
                found: s.text.to_string(),
            });
        }
        previous_end = s.end;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PosTag;

    fn tok(text: &str, start: usize, end: usize) -> TaggedToken {
        TaggedToken::new(text, PosTag::Noun, start, end)
    }

    #[test]
    fn well_formed_tokens_pass() {
        let sentence = "Pope \u{2014} head";
        let tokens = vec![tok("Pope", 0, 4), tok("\u{2014}", 5, 8), tok("head", 9, 13)];
        assert_eq!(validate_tokens(sentence, &tokens), Ok(()));
    }

    #[test]
    fn token_violations_are_reported() {
        let sentence = "Pope \u{2014} head";
        assert!(matches!(
            validate_tokens(sentence, &[tok("head", 9, 20)]),
            Err(MalformedInputError::OutOfRange { index: 0, len: 13, .. })
        ));
        assert!(matches!(
            validate_tokens(sentence, &[tok("x", 6, 7)]),
            Err(MalformedInputError::NotCharBoundary { offset: 6, .. })
        ));
        assert!(matches!(
            validate_tokens(sentence, &[tok("Pope", 0, 4), tok("ope", 1, 4)]),
            Err(MalformedInputError::Overlap { index: 1, previous_end: 4, .. })
        ));
        assert!(matches!(
            validate_tokens(sentence, &[tok("Pope", 4, 0)]),
            Err(MalformedInputError::Inverted { .. })
        ));
        assert!(matches!(
            validate_tokens(sentence, &[tok("Pape", 0, 4)]),
            Err(MalformedInputError::TextMismatch { origin: Collaborator::Tagger, .. })
        ));
    }

    #[test]
    fn line_segments_with_terminators_pass() {
        let document = "5\r\r\n5";
        let segments = vec![Segment::new("5", 0, 2), Segment::new("", 2, 4), Segment::new("5", 4, 5)];
        assert_eq!(validate_segments(document, &segments), Ok(()));
    }

    #[test]
    fn segment_violations_are_reported() {
        let document = "one. two.";
        assert!(matches!(
            validate_segments(document, &[Segment::new("one.", 0, 4), Segment::new(". two.", 3, 9)]),
            Err(MalformedInputError::Overlap { origin: Collaborator::Segmenter, index: 1, .. })
        ));
        assert!(matches!(
            validate_segments(document, &[Segment::new("two.", 0, 4)]),
            Err(MalformedInputError::TextMismatch { .. })
        ));
        let err = validate_segments(document, &[Segment::new("one.", 0, 40)]).unwrap_err();
        assert_eq!(err.to_string(), "segmenter segment #0 span 0..40 is out of range (input length 9)");
    }
}
