use crate::engine::{self, DroppedCandidate, Extractor, SentenceMetrics, TriggerMask};
use crate::error::ExtractResult;
use crate::{DefinitionCandidate, LexiconTagger, RuleSegmenter, SentenceSegmenter, Span, Tagger, TriggerKind};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::BTreeSet;
use std::time::Duration;

static DEFAULT_OPTIONS: Lazy<Options> = Lazy::new(Options::default);

/// Extraction options.
///
/// The stoplist and ceilings are plain data; callers tune them per corpus.
#[derive(Debug, Clone)]
pub struct Options {
    /// Maximum tokens in a single defined term.
    pub max_term_tokens: usize,
    /// Relaxed ceiling for a parenthetical that defines several terms at once.
    pub coordinated_term_max_tokens: usize,
    /// Capitalized generic nouns that are references, not definitions, unless
    /// quoted or introduced by a strong trigger phrase.
    pub generic_noun_stoplist: BTreeSet<String>,
    /// Phrases that explicitly introduce a definition ("means", "shall mean").
    pub trigger_phrases: Vec<String>,
    /// Phrases that may introduce a definition but carry no weight with the filters.
    pub weak_trigger_phrases: Vec<String>,
    /// Longest comma or bracket clause allowed between a term and its trigger.
    pub max_clause_gap_tokens: usize,
}

impl Default for Options {
    fn default() -> Self {
        fn owned<C: FromIterator<String>>(words: &[&str]) -> C {
            words.iter().map(|w| w.to_string()).collect()
        }

        Options {
            max_term_tokens: 5,
            coordinated_term_max_tokens: 10,
            generic_noun_stoplist: owned(&["Corporation", "Bonds", "Obligations", "Notes", "Securities"]),
            trigger_phrases: owned(&[
                "means",
                "mean",
                "shall mean",
                "refers to",
                "shall refer to",
                "is defined as",
                "shall have the meaning",
                "has the meaning",
            ]),
            weak_trigger_phrases: owned(&["shall be deemed to", "shall include", "includes"]),
            max_clause_gap_tokens: 12,
        }
    }
}

impl Options {
    /// Case-insensitive stoplist lookup.
    pub fn is_generic_noun(&self, term: &str) -> bool {
        self.generic_noun_stoplist.iter().any(|w| w.eq_ignore_ascii_case(term))
    }
}

/// A definition found in a document.
///
/// `start`/`end` are UTF-8 byte offsets into the original input, not character
/// indices; `&text[start..end]` is exactly `source`. Use [`Definition::char_span`]
/// when character positions are needed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Definition {
    pub term: String,
    pub source: String,
    pub start: usize,
    pub end: usize,
    pub kind: TriggerKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl Definition {
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }

    /// Zero-based character indices of the source within `text`.
    ///
    /// Returns `None` when `text` is not the document this definition came from.
    pub fn char_span(&self, text: &str) -> Option<(usize, usize)> {
        if text.get(self.start..self.end)? != self.source {
            return None;
        }
        let start = text[..self.start].chars().count();
        Some((start, start + self.source.chars().count()))
    }
}

impl From<DefinitionCandidate> for Definition {
    fn from(c: DefinitionCandidate) -> Self {
        Definition {
            term: c.term,
            source: c.source,
            start: c.span.start,
            end: c.span.end,
            kind: c.kind,
            aliases: c.aliases,
        }
    }
}

/// One sentence of a verbose run.
#[derive(Debug, Clone, Serialize)]
pub struct SentenceSummary {
    pub start: usize,
    pub end: usize,
    /// Names of the cues found by the scan, e.g. `["HAS_QUOTE"]`.
    pub cues: Vec<String>,
    pub considered: usize,
    pub kept: usize,
    pub dropped: Vec<DroppedCandidate>,
    #[serde(skip)]
    pub duration: Duration,
}

impl From<SentenceMetrics> for SentenceSummary {
    fn from(m: SentenceMetrics) -> Self {
        SentenceSummary {
            start: m.start,
            end: m.end,
            cues: cue_names(m.cues),
            considered: m.considered,
            kept: m.kept,
            dropped: m.dropped,
            duration: m.duration,
        }
    }
}

fn cue_names(cues: TriggerMask) -> Vec<String> {
    cues.iter_names().map(|(name, _)| name.to_string()).collect()
}

/// Additional details returned by [`get_definitions_explicit_verbose`].
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionDetails {
    #[serde(skip)]
    pub total: Duration,
    /// Time spent segmenting the document.
    #[serde(skip)]
    pub segmentation: Duration,
    pub sentences: Vec<SentenceSummary>,
    /// Candidates identical to an earlier one, collapsed by dedup.
    pub duplicates: usize,
}

/// Result from [`get_definitions_explicit_verbose`].
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    pub definitions: Vec<Definition>,
    #[serde(skip)]
    pub elapsed: Duration,
    pub details: ExtractionDetails,
}

/// Extract explicit definitions from `text` with default options and the
/// built-in segmenter and tagger.
///
/// # Example
/// ```
/// use deflex::get_definitions_explicit;
///
/// let defs = get_definitions_explicit("The \"Pope\": the head of the Catholic Church.").unwrap();
/// assert_eq!(defs.len(), 1);
/// assert_eq!(defs[0].term, "Pope");
/// ```
pub fn get_definitions_explicit(text: &str) -> ExtractResult<Vec<Definition>> {
    get_definitions_explicit_with(text, &DEFAULT_OPTIONS, &RuleSegmenter, &LexiconTagger)
}

/// Extract explicit definitions with caller-supplied options and collaborators.
///
/// Fails on the first malformed segment or token the collaborators hand back.
pub fn get_definitions_explicit_with(
    text: &str,
    options: &Options,
    segmenter: &dyn SentenceSegmenter,
    tagger: &dyn Tagger,
) -> ExtractResult<Vec<Definition>> {
    let defs = Extractor::new(text, options, segmenter, tagger).run()?;
    Ok(defs.into_iter().map(Definition::from).collect())
}

pub fn get_definitions_explicit_verbose(text: &str, options: &Options) -> ExtractResult<ExtractionReport> {
    get_definitions_explicit_verbose_with(text, options, &RuleSegmenter, &LexiconTagger)
}

/// Like [`get_definitions_explicit_with`], plus a per-sentence trace of cues,
/// dropped candidates and timings.
pub fn get_definitions_explicit_verbose_with(
    text: &str,
    options: &Options,
    segmenter: &dyn SentenceSegmenter,
    tagger: &dyn Tagger,
) -> ExtractResult<ExtractionReport> {
    let run = Extractor::new(text, options, segmenter, tagger).run_with_metrics()?;

    let details = ExtractionDetails {
        total: run.metrics.total,
        segmentation: run.metrics.segmentation,
        sentences: run.metrics.sentences.into_iter().map(SentenceSummary::from).collect(),
        duplicates: run.duplicates,
    };

    Ok(ExtractionReport {
        definitions: run.definitions.into_iter().map(Definition::from).collect(),
        elapsed: details.total,
        details,
    })
}

/// Definitions in a single sentence, offsets relative to `sentence`.
pub fn get_definitions_in_sentence(sentence: &str, options: &Options) -> ExtractResult<Vec<DefinitionCandidate>> {
    get_definitions_in_sentence_with(sentence, options, &LexiconTagger)
}

pub fn get_definitions_in_sentence_with(
    sentence: &str,
    options: &Options,
    tagger: &dyn Tagger,
) -> ExtractResult<Vec<DefinitionCandidate>> {
    let tokens = tagger.tag(sentence);
    Ok(engine::extract_sentence(sentence, &tokens, options)?.candidates)
}

/// Defined terms of one sentence, aliases included.
pub fn terms_in_sentence(sentence: &str, options: &Options) -> ExtractResult<Vec<String>> {
    let mut terms = Vec::new();
    for c in get_definitions_in_sentence(sentence, options)? {
        terms.push(c.term);
        terms.extend(c.aliases);
    }
    Ok(terms)
}

/// `(term, source)` pairs of one sentence; aliases share their term's source.
pub fn terms_with_sources_in_sentence(sentence: &str, options: &Options) -> ExtractResult<Vec<(String, String)>> {
    let mut pairs = Vec::new();
    for c in get_definitions_in_sentence(sentence, options)? {
        for term in std::iter::once(c.term).chain(c.aliases) {
            pairs.push((term, c.source.clone()));
        }
    }
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FilterRule, LineSegmenter};

    fn terms(defs: &[Definition]) -> Vec<&str> {
        defs.iter().map(|d| d.term.as_str()).collect()
    }

    #[test]
    fn definitions_simple() {
        let text = "Visual Networks Operations, Inc., a Delaware corporation with offices at 2092 Gaither \n                                 Road, Rockville, Maryland 20850(\"Licensor.\") and is made retroactive to December 3, 2002 \n                                 (\"Effective Date\").";
        let defs = get_definitions_explicit(text).unwrap();
        assert_eq!(terms(&defs), vec!["Licensor", "Effective Date"]);
        for d in &defs {
            assert_eq!(&text[d.start..d.end], d.source);
        }
    }

    #[test]
    fn obvious_embraced_definition() {
        for quoted in ["(the \u{201C}Corporation\u{201D})", "(the \"Corporation\")"] {
            let text = format!(
                "and will be payable from Loan Repayments made by Stanford Health Care {quoted} under the Loan \
                 Agreement and from certain funds\nheld under the Indenture."
            );
            let defs = get_definitions_explicit(&text).unwrap();
            assert_eq!(terms(&defs), vec!["Corporation"], "{text}");
            assert_eq!(defs[0].source, quoted);
            assert_eq!(defs[0].kind, TriggerKind::QuotedParenthetical);
        }
    }

    #[test]
    fn capitalized_false_positive() {
        let texts = [
            "Costs incurred by the Corporation in providing these services are reflected in the respective \
             categories in the consolidated statements of operations and changes in net assets.",
            "Bonds in a commercial paper mode are remarketed for various periods that can be no longer than \
             270 days and are established at the beginning of each commercial paper rate period.",
            "Corporation (as described below) and any other Obligations issued",
        ];
        for text in texts {
            assert!(get_definitions_explicit(text).unwrap().is_empty(), "{text}");
        }
    }

    #[test]
    fn multitoken_definition_collapses_to_one() {
        let text = "
        Obligation No. 39, the outstanding Obligations relating to other indebtedness and obligations of the
Corporation (as described below) and any other Obligations issued in the future under the Master Indenture, including
the Obligation to be issued to evidence the Corporation\u{2019}s obligations with respect to the payment of principal of and
interest on the Taxable Bonds (each an \u{201C}Obligation\u{201D} and collectively, the \u{201C}Obligations\u{201D}), will be secured by security
interests in (i) the Gross Revenues of each Member of the Obligated Group and (ii) the moneys on deposit from time
to time in the Gross Revenue Fund established under the Master Indenture. ";
        let defs = get_definitions_explicit(text).unwrap();
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].term, "Obligation");
        assert_eq!(defs[0].aliases, vec!["Obligations".to_string()]);
    }

    #[test]
    fn capitalized_with_trigger() {
        let text = "Beneficial Owner means any Person which has or shares the power, directly \
                    or indirectly, to make\ninvestment decisions";
        let defs = get_definitions_explicit(text).unwrap();
        assert_eq!(terms(&defs), vec!["Beneficial Owner"]);
        assert_eq!(defs[0].kind, TriggerKind::MeansClause);
        assert!(defs[0].source.starts_with("Beneficial Owner means any Person"));
    }

    #[test]
    fn trigger_followed_by_a_dash_still_defines() {
        let defs = get_definitions_explicit("Agreement means- this agreement.").unwrap();
        assert_eq!(terms(&defs), vec!["Agreement"]);
        assert_eq!(defs[0].kind, TriggerKind::MeansClause);
        assert_eq!(defs[0].source, "Agreement means- this agreement");
    }

    #[test]
    fn default_options_carry_the_phrase_lists() {
        let options = Options::default();
        assert_eq!(options.max_term_tokens, 5);
        assert_eq!(options.coordinated_term_max_tokens, 10);
        assert_eq!(options.max_clause_gap_tokens, 12);
        assert!(options.is_generic_noun("bonds"));
        assert!(!options.is_generic_noun("Borrower"));
        assert_eq!(options.trigger_phrases[0], "means");
        assert!(options.trigger_phrases.iter().any(|p| p == "shall have the meaning"));
        assert_eq!(options.weak_trigger_phrases, vec!["shall be deemed to", "shall include", "includes"]);
    }

    #[test]
    fn start_word_shall_be_is_dropped() {
        let text = "Bonds shall be deemed to have been paid pursuant to the provisions of the Indenture";
        let report = get_definitions_explicit_verbose(text, &Options::default()).unwrap();
        assert!(report.definitions.is_empty());
        let dropped = &report.details.sentences[0].dropped;
        assert_eq!(dropped.len(), 1);
        assert_eq!(dropped[0].rule, FilterRule::SingleCommonNoun);
    }

    #[test]
    fn definitions_in_one_sentence() {
        let sentence = "The \"Pope\": the head of the Catholic Church.";
        let options = Options::default();

        assert_eq!(terms_in_sentence(sentence, &options).unwrap(), vec!["Pope".to_string()]);

        let pairs = terms_with_sources_in_sentence(sentence, &options).unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].0, "Pope");
        assert_eq!(pairs[0].1, "The \"Pope\": the head of the Catholic Church");

        let defs = get_definitions_in_sentence(sentence, &options).unwrap();
        assert_eq!(defs[0].kind, TriggerKind::ColonGloss);
        assert_eq!(defs[0].gloss.slice(sentence), "the head of the Catholic Church");
    }

    #[test]
    fn coordinated_terms_are_listed_with_their_source() {
        let sentence = "the Taxable Bonds (each an \u{201C}Obligation\u{201D} and collectively, the \u{201C}Obligations\u{201D})";
        let pairs = terms_with_sources_in_sentence(sentence, &Options::default()).unwrap();
        let terms: Vec<&str> = pairs.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(terms, vec!["Obligation", "Obligations"]);
        assert_eq!(pairs[0].1, pairs[1].1);
    }

    #[test]
    fn repeated_sentences_keep_their_offsets() {
        let text = "The \"Pope\": the head of the Catholic Church.\nThe \"Pope\": the head of the Catholic Church.";
        let report =
            get_definitions_explicit_verbose_with(text, &Options::default(), &LineSegmenter, &LexiconTagger).unwrap();
        // Different offsets, so both stay.
        assert_eq!(report.definitions.len(), 2);
        assert_eq!(report.details.duplicates, 0);
        assert_ne!(report.definitions[0].start, report.definitions[1].start);
    }

    #[test]
    fn line_terminators_are_accepted() {
        let text = "5\r\r\n5";
        let report =
            get_definitions_explicit_verbose_with(text, &Options::default(), &LineSegmenter, &LexiconTagger).unwrap();
        assert!(report.definitions.is_empty());
        let spans: Vec<(usize, usize)> = report.details.sentences.iter().map(|s| (s.start, s.end)).collect();
        assert_eq!(spans, vec![(0, 2), (2, 4), (4, 5)]);
    }

    #[test]
    fn verbose_reports_cues() {
        let report =
            get_definitions_explicit_verbose("The \"Pope\": the head of the Catholic Church.", &Options::default())
                .unwrap();
        assert_eq!(report.elapsed, report.details.total);
        assert!(report.details.segmentation <= report.details.total);
        let cues = &report.details.sentences[0].cues;
        assert!(cues.contains(&"HAS_QUOTE".to_string()));
        assert!(cues.contains(&"HAS_COLON".to_string()));
    }

    #[test]
    fn stoplist_is_configurable() {
        let text = "All of the Bonds shall include the coupons.";
        let mut options = Options::default();
        let report = get_definitions_explicit_verbose(text, &options).unwrap();
        assert!(report.definitions.is_empty());
        assert_eq!(report.details.sentences[0].dropped[0].rule, FilterRule::GenericStoplist);

        options.generic_noun_stoplist.clear();
        let report = get_definitions_explicit_verbose(text, &options).unwrap();
        assert!(report.definitions.is_empty());
        // Still dropped, now for the modal right after the term.
        assert_eq!(report.details.sentences[0].dropped[0].rule, FilterRule::ModalWithoutQuote);
    }

    #[test]
    fn char_span_counts_characters() {
        let text = "Le caf\u{00E9} \u{201C}Pope\u{201D} means the head of the Church.";
        let defs = get_definitions_explicit(text).unwrap();
        assert_eq!(defs.len(), 1);
        let d = &defs[0];
        assert_eq!(d.kind, TriggerKind::MeansClause);
        let (start, end) = d.char_span(text).unwrap();
        assert_eq!(start, d.start - 1);
        let chars: String = text.chars().skip(start).take(end - start).collect();
        assert_eq!(chars, d.source);
        assert_eq!(d.char_span("unrelated text"), None);
    }

    #[test]
    fn offsets_are_bytes_not_characters() {
        let text = "The \u{201C}Pope\u{201D}: the head of the Catholic Church.";
        let defs = get_definitions_explicit(text).unwrap();
        let d = &defs[0];
        assert_eq!((d.start, d.end), (0, 47));
        assert_eq!(&text[d.start..d.end], d.source);
        assert_eq!(d.char_span(text), Some((0, 43)));
    }

    #[test]
    fn json_omits_empty_aliases() {
        let defs = get_definitions_explicit("The \"Pope\": the head of the Catholic Church.").unwrap();
        let json = serde_json::to_value(&defs[0]).unwrap();
        assert_eq!(json["term"], "Pope");
        assert_eq!(json["kind"], "colon-gloss");
        assert!(json.get("aliases").is_none());
    }

    mod proptests {
        use super::super::*;
        use crate::LineSegmenter;
        use proptest::prelude::*;

        fn legal_sentence() -> impl Strategy<Value = String> {
            prop_oneof![
                Just("Stanford Health Care (the \"Corporation\") pays.".to_string()),
                Just("Beneficial Owner means any Person which has the power.".to_string()),
                Just("The \"Pope\": the head of the Catholic Church.".to_string()),
                Just("ABC Corp, hereinafter \"Contractor\", shall deliver the goods.".to_string()),
                Just("Bonds shall be deemed to have been paid.".to_string()),
                Just("Corporation (as described below) and any other Obligations issued.".to_string()),
                "[A-Za-z ,()\"]{0,40}\\.",
            ]
        }

        fn document() -> impl Strategy<Value = String> {
            prop::collection::vec(legal_sentence(), 0..8).prop_map(|s| s.join(" "))
        }

        proptest! {
            #[test]
            fn extraction_is_idempotent(text in document()) {
                let first = get_definitions_explicit(&text).unwrap();
                let second = get_definitions_explicit(&text).unwrap();
                prop_assert_eq!(first, second);
            }

            #[test]
            fn offsets_reproduce_source(text in document()) {
                for d in get_definitions_explicit(&text).unwrap() {
                    prop_assert_eq!(&text[d.start..d.end], d.source.as_str());
                }
            }

            #[test]
            fn term_ceiling_holds(text in document()) {
                let options = Options::default();
                for d in get_definitions_explicit(&text).unwrap() {
                    let words = d.term.split_whitespace().filter(|w| w.chars().any(char::is_alphanumeric)).count();
                    prop_assert!(words <= options.max_term_tokens, "{:?}", d);
                }
            }

            #[test]
            fn default_collaborators_never_fail(text in "\\PC*") {
                prop_assert!(get_definitions_explicit(&text).is_ok());
                prop_assert!(get_definitions_explicit_with(
                    &text, &Options::default(), &LineSegmenter, &LexiconTagger
                ).is_ok());
            }
        }
    }
}
