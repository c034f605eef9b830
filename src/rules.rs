//! Pattern rules over tagged tokens.
//!
//! - `noun_phrase`: the noun-phrase tag grammar and its lazy matcher.
//! - `definition`: the four trigger recognizers, split the same way for each
//!   concern: token `predicates`, span `helpers`, and the recognizers in `rules`.

pub(crate) mod noun_phrase;

pub(crate) mod definition {
    pub(crate) mod helpers;
    pub(crate) mod predicates;
    pub(crate) mod rules;

    #[cfg(test)]
    mod tests;
}
