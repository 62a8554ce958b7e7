//! Deck URL query parsing and serialization.
//!
//! Parses query strings like `?s=3&zoom=0.9&grade=soft&print=1` into a
//! [`DeckQuery`], and writes them back in canonical order for navigation.
//!
//! # Example
//!
//! ```
//! use deckstage::deck::{Deck, DeckSettings};
//! use deckstage::query;
//!
//! let result = query::parse(query::from_hash("#/deck?s=2&zoom=0.8&print=1"));
//! assert!(result.warnings.is_empty());
//!
//! let mut deck = Deck::new(DeckSettings::default(), 8);
//! result.query.apply(&mut deck);
//! assert_eq!(deck.navigator.index(), 2);
//! assert!(deck.view.print);
//! assert_eq!(deck.stage_config().safety, 0.8);
//! ```
//!
//! # Unknown keys
//!
//! Keys the deck does not use are kept in [`DeckQuery::extras`] and
//! round-trip through [`DeckQuery::to_query_string`], with a
//! [`ParseWarning::KeyNotRecognized`] so typos stay visible.

mod params;
mod parse;

pub use params::DeckQuery;

use alloc::string::String;
use alloc::vec::Vec;

/// Result of parsing a deck query string.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed parameters.
    pub query: DeckQuery,
    /// Non-fatal parse warnings.
    pub warnings: Vec<ParseWarning>,
}

/// Non-fatal warning from query string parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A key appeared more than once (last value wins).
    DuplicateKey { key: String, value: String },
    /// A key is not a deck parameter.
    KeyNotRecognized { key: String, value: String },
    /// A key was recognized but its value could not be parsed.
    ValueInvalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Parse a deck query string (with or without leading `?`).
pub fn parse(query: &str) -> ParseResult {
    let (query, warnings) = parse::parse_query(query);
    ParseResult { query, warnings }
}

/// Query part of a hash-routed location (`#/deck?s=2` → `s=2`).
///
/// Returns an empty string when the hash carries no query.
pub fn from_hash(hash: &str) -> &str {
    match hash.find('?') {
        Some(pos) => &hash[pos + 1..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_without_query_is_empty() {
        assert_eq!(from_hash("#/deck"), "");
        assert_eq!(from_hash(""), "");
    }

    #[test]
    fn hash_query_extracted() {
        assert_eq!(from_hash("#/deck?s=4&grade=soft"), "s=4&grade=soft");
    }
}
