//! The four definition recognizers.
//!
//! Every recognizer is a pure function of a [`SentenceView`] and reports raw
//! token ranges; judging (filters) and slicing (resolver) happen later.
//!
//! ```text
//! quoted_parenthetical  Stanford Health Care (the "Corporation")
//!                                            [------- source ------]
//! means_clause          Beneficial Owner means any Person which ...
//!                       [-- term ------]       [---- gloss -------]
//! colon_gloss           The "Pope": the head of the Catholic Church.
//!                           [term]  [------------ gloss -----------]
//! embraced_quote        ABC Corp, hereinafter "Contractor"
//!                       [gloss-]               [- term -]
//! ```

use crate::rules::definition::helpers::{
    clause_end, closing_quote, matching_paren, skip_interposed_clause, term_before, trigger_occurrences, word_count,
};
use crate::rules::definition::predicates::{
    is_apposition_marker, is_colon, is_open_paren, is_open_quote, is_parenthetical_connector,
};
use crate::{PosTag, SentenceView, TriggerKind, TriggerMatch};
use std::ops::Range;

/// Maximum number of apposition markers between a noun phrase and the quoted
/// name it introduces.
const MAX_APPOSITION_MARKERS: usize = 5;

/// `(the "Corporation")`, `("Licensor.")`,
/// `(each an "Obligation" and collectively, the "Obligations")`.
///
/// The parenthetical may hold only connector words and quoted terms. Each
/// quoted term yields one match; all of them share the parenthetical as their
/// source and its interior as their gloss.
pub fn quoted_parenthetical(view: &SentenceView<'_>) -> Vec<TriggerMatch> {
    let tokens = view.tokens;
    let mut out = Vec::new();

    for open in (0..tokens.len()).filter(|&i| is_open_paren(&tokens[i])) {
        let Some(close) = matching_paren(tokens, open) else { continue };
        let Some(terms) = parenthetical_terms(view, open + 1..close) else { continue };

        if terms.len() > 1 && word_count(&tokens[open + 1..close]) > view.options.coordinated_term_max_tokens {
            log::trace!("[quoted_parenthetical] {:?} exceeds the coordinated ceiling", view.text_of(&(open..close + 1)));
            continue;
        }

        for term in terms {
            out.push(TriggerMatch {
                kind: TriggerKind::QuotedParenthetical,
                term,
                source: open..close + 1,
                gloss: open + 1..close,
                quoted: true,
                strong_trigger: false,
            });
        }
    }

    out
}

/// Quoted terms of a parenthetical interior, or `None` when anything other than
/// connectors and quoted terms appears inside.
fn parenthetical_terms(view: &SentenceView<'_>, interior: Range<usize>) -> Option<Vec<Range<usize>>> {
    let tokens = view.tokens;
    let mut terms = Vec::new();
    let mut idx = interior.start;

    while idx < interior.end {
        let t = &tokens[idx];
        if is_open_quote(t) {
            let end = closing_quote(tokens, idx).filter(|&end| end < interior.end)?;
            let words = word_count(&tokens[idx + 1..end]);
            if words == 0 || words > view.options.max_term_tokens {
                return None;
            }
            terms.push(idx + 1..end);
            idx = end + 1;
        } else if is_parenthetical_connector(t) {
            idx += 1;
        } else {
            return None;
        }
    }

    if terms.is_empty() { None } else { Some(terms) }
}

/// `Beneficial Owner means any Person ...`, `"Affiliate" shall mean ...`,
/// `Lender (as defined below) refers to ...`.
///
/// The term sits right before the trigger phrase, or before a short comma or
/// bracket clause preceding it. The gloss runs from after the trigger to the
/// end of the clause.
pub fn means_clause(view: &SentenceView<'_>) -> Vec<TriggerMatch> {
    let mut out = Vec::new();

    for occurrence in trigger_occurrences(view) {
        let boundary = occurrence.tokens.start;
        let site = term_before(view, boundary)
            .or_else(|| skip_interposed_clause(view, boundary).and_then(|gap| term_before(view, gap)));
        let Some(site) = site else { continue };

        let gloss_start = occurrence.tokens.end;
        let end = clause_end(view, gloss_start);
        out.push(TriggerMatch {
            kind: TriggerKind::MeansClause,
            term: site.term,
            source: site.start..end,
            gloss: gloss_start..end,
            quoted: site.quoted,
            strong_trigger: occurrence.strong,
        });
    }

    out
}

/// `The "Pope": the head of the Catholic Church.`
pub fn colon_gloss(view: &SentenceView<'_>) -> Vec<TriggerMatch> {
    let tokens = view.tokens;
    let mut out = Vec::new();

    for colon in (0..tokens.len()).filter(|&i| is_colon(&tokens[i])) {
        let Some(site) = term_before(view, colon) else { continue };

        let mut end = tokens.len();
        while end > colon + 1 && tokens[end - 1].tag == PosTag::Terminal {
            end -= 1;
        }
        out.push(TriggerMatch {
            kind: TriggerKind::ColonGloss,
            term: site.term,
            source: site.start..end,
            gloss: colon + 1..end,
            quoted: site.quoted,
            strong_trigger: false,
        });
    }

    out
}

/// `ABC Corp, hereinafter "Contractor"`: a quoted capitalized name in
/// apposition to the noun phrase before it, outside any parenthetical.
///
/// Quotes followed by a colon or a trigger phrase are left to
/// [`colon_gloss`] and [`means_clause`].
pub fn embraced_quote(view: &SentenceView<'_>) -> Vec<TriggerMatch> {
    let tokens = view.tokens;
    let triggers: Vec<usize> = trigger_occurrences(view).into_iter().map(|o| o.tokens.start).collect();
    let mut out = Vec::new();

    for open in 0..tokens.len() {
        if !is_open_quote(&tokens[open]) || view.paren_depth[open] > 0 {
            continue;
        }
        let Some(close) = closing_quote(tokens, open) else { continue };
        let term = open + 1..close;

        let first_word = tokens[term.clone()].iter().find(|t| t.is_word());
        if !first_word.is_some_and(|t| t.is_capitalized()) {
            continue;
        }
        if word_count(&tokens[term.clone()]) > view.options.max_term_tokens {
            continue;
        }
        if tokens.get(close + 1).is_some_and(is_colon) || triggers.contains(&(close + 1)) {
            continue;
        }

        let mut anchor = open;
        let mut markers = 0;
        while anchor > 0 && markers < MAX_APPOSITION_MARKERS && is_apposition_marker(&tokens[anchor - 1]) {
            anchor -= 1;
            markers += 1;
        }
        let Some(phrase) = view.phrases.iter().find(|p| p.tokens.end == anchor) else { continue };

        out.push(TriggerMatch {
            kind: TriggerKind::EmbracedQuote,
            term,
            source: phrase.tokens.start..close + 1,
            gloss: phrase.tokens.clone(),
            quoted: true,
            strong_trigger: false,
        });
    }

    out
}
