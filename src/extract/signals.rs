//! Primary signal extractor
//!
//! Runs on documents that passed fetch validation. Each signal is extracted
//! independently; a selector that fails to compile simply contributes nothing.

use super::document::{self, PageDocument};
use super::{char_len, extract_faq, extract_schema_types, is_question, truncate_chars};
use crate::audit::Signals;
use crate::url::{extract_domain, is_internal_href};
use url::Url;

/// Title used when a page has neither `<title>` nor `<h1>`
pub const NO_TITLE: &str = "No title found";

/// Shortest paragraph (in characters) accepted as an answer-first block
pub const ANSWER_BLOCK_MIN_CHARS: usize = 30;

/// Longest paragraph (in characters) accepted as an answer-first block
pub const ANSWER_BLOCK_MAX_CHARS: usize = 300;

/// Answer-first blocks are stored truncated to this many characters
pub const ANSWER_BLOCK_STORED_CHARS: usize = 200;

const MAX_TITLE_CHARS: usize = 500;
const MAX_DESCRIPTION_CHARS: usize = 500;
const MAX_QUESTION_CHARS: usize = 300;

const QUESTION_HEADINGS: &str = "h2, h3";
const VIDEO_SELECTOR: &str = r#"video, iframe[src*="youtube"], iframe[src*="vimeo"]"#;

/// Extracts ranking signals from a parsed page
///
/// Pure function: the same document and URL always produce the same signals.
///
/// # Arguments
///
/// * `document` - The parsed page
/// * `url` - The audited URL (used for the domain and internal-link detection)
///
/// # Example
///
/// ```
/// use rank_lens::extract::{extract_signals, PageDocument};
/// use url::Url;
///
/// let html = r#"<html><head><title>FAQ</title></head><body>
///     <h2>How does it work?</h2>
///     <p>It fetches the page and extracts the ranking signals.</p>
/// </body></html>"#;
/// let url = Url::parse("https://example.com/faq").unwrap();
/// let signals = extract_signals(&PageDocument::parse(html), &url);
///
/// assert_eq!(signals.title, "FAQ");
/// assert_eq!(signals.h2_questions, vec!["How does it work?"]);
/// assert_eq!(signals.answer_first_blocks.len(), 1);
/// ```
pub fn extract_signals(document: &PageDocument, url: &Url) -> Signals {
    let domain = extract_domain(url).unwrap_or_default();

    let title = document
        .first_text("title")
        .or_else(|| document.first_text("h1"))
        .map(|t| truncate_chars(&t, MAX_TITLE_CHARS))
        .unwrap_or_else(|| NO_TITLE.to_string());

    let h1 = document
        .first_text("h1")
        .map(|t| truncate_chars(&t, MAX_TITLE_CHARS))
        .unwrap_or_default();

    let words = document
        .body_text()
        .split_whitespace()
        .filter(|word| char_len(word) > 2)
        .count();

    let internal_links = document
        .find_all("a[href]")
        .into_iter()
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| is_internal_href(href, &domain))
        .count();

    Signals {
        title,
        meta_description: meta_description(document),
        h1,
        h2_questions: question_headings(document),
        answer_first_blocks: answer_first_blocks(document),
        faq: extract_faq(document),
        schema_types: extract_schema_types(document),
        word_count: words,
        images: document.count("img"),
        videos: document.count(VIDEO_SELECTOR),
        internal_links,
        domain,
        ..Signals::default()
    }
}

/// `meta[name=description]`, falling back to the OpenGraph description
fn meta_description(document: &PageDocument) -> String {
    document
        .first(r#"meta[name="description"]"#)
        .and_then(|meta| document::attr(meta, "content"))
        .or_else(|| {
            document
                .first(r#"meta[property="og:description"]"#)
                .and_then(|meta| document::attr(meta, "content"))
        })
        .map(|d| truncate_chars(&d, MAX_DESCRIPTION_CHARS))
        .unwrap_or_default()
}

fn question_headings(document: &PageDocument) -> Vec<String> {
    document
        .find_all(QUESTION_HEADINGS)
        .into_iter()
        .map(document::text)
        .filter(|text| !text.is_empty() && is_question(text))
        .map(|text| truncate_chars(&text, MAX_QUESTION_CHARS))
        .collect()
}

/// Paragraphs sitting directly after an H2/H3, within the length window
fn answer_first_blocks(document: &PageDocument) -> Vec<String> {
    document
        .find_all(QUESTION_HEADINGS)
        .into_iter()
        .filter_map(document::next_element_sibling)
        .filter(|sibling| sibling.value().name() == "p")
        .map(document::text)
        .filter(|text| is_answer_length(text))
        .map(|text| truncate_chars(&text, ANSWER_BLOCK_STORED_CHARS))
        .collect()
}

/// Returns true if trimmed text falls in the inclusive answer-block window
pub(crate) fn is_answer_length(text: &str) -> bool {
    (ANSWER_BLOCK_MIN_CHARS..=ANSWER_BLOCK_MAX_CHARS).contains(&char_len(text.trim()))
}
