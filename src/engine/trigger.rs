//! Trigger cue scan (sentence pre-classification).
//!
//! Before any recognizer runs, the raw sentence text is scanned once for cheap
//! cues. Each [`TriggerKind`](crate::TriggerKind) declares the cues it needs
//! and is skipped when they are absent, so a sentence without quotes,
//! brackets, colons or trigger words costs one pass over its bytes.
//!
//! This is a heuristic scan: false positives are fine because the recognizer
//! still has to match in full. False negatives are not, so the word check
//! normalizes the same way the tagger splits words.

use crate::Options;

bitflags::bitflags! {
    /// Coarse cues found in a sentence.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TriggerMask: u8 {
        const HAS_QUOTE        = 1 << 0;
        const HAS_PAREN        = 1 << 1;
        const HAS_COLON        = 1 << 2;
        const HAS_TRIGGER_WORD = 1 << 3;
    }
}

impl TriggerMask {
    /// Scan `sentence` for the cues of every trigger kind.
    pub fn scan(sentence: &str, options: &Options) -> Self {
        let mut mask = TriggerMask::empty();

        if sentence.contains(['"', '\u{201C}', '\u{201D}']) {
            mask |= TriggerMask::HAS_QUOTE;
        }
        if sentence.contains('(') {
            mask |= TriggerMask::HAS_PAREN;
        }
        if sentence.contains(':') {
            mask |= TriggerMask::HAS_COLON;
        }

        let words: Vec<String> = sentence
            .split_whitespace()
            .flat_map(|w| w.split(|c: char| !c.is_alphanumeric() && !matches!(c, '-' | '\'' | '\u{2019}')))
            // joiners bind only inside a word, as in the tokenizer
            .map(|w| w.trim_matches(['-', '\'', '\u{2019}']))
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .collect();
        let phrases = options.trigger_phrases.iter().chain(options.weak_trigger_phrases.iter());
        for phrase in phrases {
            let wanted: Vec<String> = phrase.split_whitespace().map(str::to_lowercase).collect();
            if !wanted.is_empty() && words.windows(wanted.len()).any(|w| w == wanted.as_slice()) {
                mask |= TriggerMask::HAS_TRIGGER_WORD;
                break;
            }
        }

        log::debug!("[trigger_scan] cues={:?}", mask);
        mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_prose_has_no_cues() {
        let text = "Costs incurred by the Corporation in providing these services are reflected in the respective \
                    categories in the consolidated statements of operations and changes in net assets.";
        assert_eq!(TriggerMask::scan(text, &Options::default()), TriggerMask::empty());
    }

    #[test]
    fn punctuation_cues() {
        let mask = TriggerMask::scan("Stanford Health Care (the \u{201C}Corporation\u{201D})", &Options::default());
        assert_eq!(mask, TriggerMask::HAS_PAREN | TriggerMask::HAS_QUOTE);

        let mask = TriggerMask::scan("The \"Pope\": the head", &Options::default());
        assert!(mask.contains(TriggerMask::HAS_QUOTE | TriggerMask::HAS_COLON));
    }

    #[test]
    fn trigger_words_match_whole_words_across_line_breaks() {
        let options = Options::default();
        assert!(TriggerMask::scan("Owner means any Person", &options).contains(TriggerMask::HAS_TRIGGER_WORD));
        assert!(TriggerMask::scan("\"Loan\"shall\n  mean the loan", &options).contains(TriggerMask::HAS_TRIGGER_WORD));
        assert!(!TriggerMask::scan("by meanspirited Persons", &options).contains(TriggerMask::HAS_TRIGGER_WORD));
        assert!(!TriggerMask::scan("including the Bonds", &options).contains(TriggerMask::HAS_TRIGGER_WORD));
    }

    #[test]
    fn dangling_joiners_do_not_hide_trigger_words() {
        let options = Options::default();
        let spellings =
            ["Owner means- the owner", "Owner means' the owner", "Owner \u{2019}means\u{2019} the owner", "Owner --means the owner"];
        for text in spellings {
            assert!(TriggerMask::scan(text, &options).contains(TriggerMask::HAS_TRIGGER_WORD), "{:?}", text);
        }
        assert!(!TriggerMask::scan("Owner means-tested the owner", &options).contains(TriggerMask::HAS_TRIGGER_WORD));
    }
}
