use crate::{PosTag, TaggedToken};

/// Returns true for an opening double quote (`"` in opening position or `“`).
pub fn is_open_quote(t: &TaggedToken) -> bool {
    t.tag == PosTag::OpenQuote
}

/// Returns true for a closing double quote (`"` in closing position or `”`).
pub fn is_close_quote(t: &TaggedToken) -> bool {
    t.tag == PosTag::CloseQuote
}

/// Only round brackets delimit a defining parenthetical.
pub fn is_open_paren(t: &TaggedToken) -> bool {
    t.text == "("
}

pub fn is_close_paren(t: &TaggedToken) -> bool {
    t.text == ")"
}

pub fn is_colon(t: &TaggedToken) -> bool {
    t.text == ":"
}

pub fn is_comma(t: &TaggedToken) -> bool {
    t.tag == PosTag::Comma
}

pub fn is_determiner(t: &TaggedToken) -> bool {
    t.tag == PosTag::Determiner
}

pub fn is_modal(t: &TaggedToken) -> bool {
    t.tag == PosTag::Modal
}

/// A word token (noun or modifier) starting with a capital letter.
pub fn is_capitalized_word(t: &TaggedToken) -> bool {
    t.is_capitalized() && matches!(t.tag.grammar_class(), 'N' | 'J')
}

/// Punctuation that never belongs to a resolved term.
pub fn is_term_edge_punctuation(t: &TaggedToken) -> bool {
    t.tag.is_punctuation() && !t.is_word()
}

/// Returns true when the token ends a means clause: `;` or the conjunction "and".
pub fn is_clause_separator(t: &TaggedToken) -> bool {
    t.text == ";" || (t.tag == PosTag::Conjunction && t.text.eq_ignore_ascii_case("and"))
}

/// Words allowed around the quoted terms inside a defining parenthetical:
/// `(each an "Obligation" and collectively, the "Obligations")`,
/// `(hereinafter referred to as the "Company")`.
pub fn is_parenthetical_connector(t: &TaggedToken) -> bool {
    if t.tag == PosTag::Determiner || t.tag == PosTag::Comma {
        return true;
    }
    matches!(
        t.text.to_lowercase().as_str(),
        "collectively"
            | "individually"
            | "together"
            | "jointly"
            | "hereinafter"
            | "hereafter"
            | "herein"
            | "referred"
            | "to"
            | "as"
            | "called"
            | "and"
            | "or"
    )
}

/// Words that may separate a noun phrase from a quoted name in apposition:
/// `ABC Corp, hereinafter "Contractor"`, `Acme Corp or the "Seller"`.
pub fn is_apposition_marker(t: &TaggedToken) -> bool {
    if t.tag == PosTag::Comma {
        return true;
    }
    matches!(
        t.text.to_lowercase().as_str(),
        "hereinafter" | "hereafter" | "herein" | "referred" | "to" | "as" | "called" | "or" | "the" | "a" | "an"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connectors_cover_coordinated_parentheticals() {
        let words = [
            TaggedToken::new("each", PosTag::Determiner, 0, 4),
            TaggedToken::new("collectively", PosTag::Adverb, 0, 12),
            TaggedToken::new(",", PosTag::Comma, 0, 1),
            TaggedToken::new("Hereinafter", PosTag::Adverb, 0, 11),
        ];
        assert!(words.iter().all(is_parenthetical_connector));
        assert!(!is_parenthetical_connector(&TaggedToken::new("described", PosTag::Participle, 0, 9)));
    }

    #[test]
    fn clause_separator_ignores_other_conjunctions() {
        assert!(is_clause_separator(&TaggedToken::new(";", PosTag::Colon, 0, 1)));
        assert!(is_clause_separator(&TaggedToken::new("and", PosTag::Conjunction, 0, 3)));
        assert!(!is_clause_separator(&TaggedToken::new("or", PosTag::Conjunction, 0, 2)));
        assert!(!is_clause_separator(&TaggedToken::new(":", PosTag::Colon, 0, 1)));
    }
}
