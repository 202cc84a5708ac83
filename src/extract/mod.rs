//! Signal extraction from HTML
//!
//! This module turns page markup into [`Signals`](crate::audit::Signals):
//! - `signals`: the primary extractor for validated pages
//! - `fallback`: a looser extractor for payloads recovered from failed fetches
//! - `jsonld`: recursive `@type` harvesting from JSON-LD blocks
//! - `faq`: FAQ / accordion heuristics
//! - `ranking`: the "why it ranks" summary built from extracted counts
//!
//! Everything here is synchronous and pure; no I/O happens during extraction.

pub mod document;
mod fallback;
mod faq;
mod jsonld;
mod ranking;
mod signals;

pub use document::PageDocument;
pub use fallback::{extract_fallback, FallbackExtraction, MIN_FALLBACK_PAYLOAD_CHARS};
pub use faq::{extract_faq, FAQ_CONTAINER_SELECTORS, MAX_FAQ_ITEMS};
pub use jsonld::{collect_schema_types, extract_schema_types};
pub use ranking::{ranking_factors, why_it_ranks};
pub use signals::{
    extract_signals, ANSWER_BLOCK_MAX_CHARS, ANSWER_BLOCK_MIN_CHARS, ANSWER_BLOCK_STORED_CHARS,
    NO_TITLE,
};

/// Interrogative prefixes that mark a heading as a question
///
/// English and Korean only; other locales are not recognized.
const QUESTION_PREFIXES: &[&str] = &[
    "what", "how", "why", "when", "where", "which", "who", "무엇", "어떻게", "왜", "언제", "어디서",
];

/// Returns true if heading text reads as a question
///
/// A heading is a question if it contains `?` or starts (case-insensitively)
/// with one of the interrogative prefixes.
pub fn is_question(text: &str) -> bool {
    let text = text.trim();
    if text.contains('?') {
        return true;
    }
    let lower = text.to_lowercase();
    QUESTION_PREFIXES.iter().any(|prefix| lower.starts_with(prefix))
}

/// Length of a string in characters
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Truncates a string to at most `max` characters (never splits a code point)
pub(crate) fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}
