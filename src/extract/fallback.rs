//! Degraded-mode extraction for payloads recovered from failed fetches
//!
//! Error pages and half-broken responses rarely have the structure the primary
//! extractor expects, so this pass simply dumps every heading and paragraph it
//! can find. FAQ and schema extraction are not attempted here.

use super::document::{self, PageDocument};
use super::signals::{is_answer_length, ANSWER_BLOCK_STORED_CHARS, NO_TITLE};
use super::{char_len, is_question, truncate_chars};
use crate::audit::{HeadingInfo, Signals};
use crate::url::extract_domain;
use crate::FallbackError;
use url::Url;

/// Payloads of this many characters or fewer are not worth parsing
pub const MIN_FALLBACK_PAYLOAD_CHARS: usize = 100;

const MAX_TITLE_CHARS: usize = 500;
const MAX_HEADING_CHARS: usize = 200;
const MIN_PARAGRAPH_CHARS: usize = 20;
const MAX_PARAGRAPH_CHARS: usize = 1000;
const STORED_PARAGRAPH_CHARS: usize = 300;
const MAX_PARAGRAPHS: usize = 20;
const MAX_QUESTIONS: usize = 10;
const MAX_ANSWER_BLOCKS: usize = 5;
const RAW_CONTENT_HEADINGS: usize = 20;
const RAW_CONTENT_PARAGRAPHS: usize = 10;
const MAX_RAW_CONTENT_CHARS: usize = 5000;

/// Signals recovered in degraded mode, plus a short summary of what was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackExtraction {
    /// Recovered signals; `error` and `fallback_used` are set by the caller
    pub signals: Signals,

    /// e.g. "12 headings, 8 question headings, 40 content paragraphs, descriptive title"
    pub summary: String,
}

/// Extracts whatever structure can be recovered from raw HTML
///
/// # Arguments
///
/// * `raw_html` - The payload captured from a failed fetch
/// * `url` - The audited URL
///
/// # Returns
///
/// * `Ok(FallbackExtraction)` - Partial signals and a summary
/// * `Err(FallbackError)` - The payload is too short or holds no content at all
pub fn extract_fallback(raw_html: &str, url: &Url) -> Result<FallbackExtraction, FallbackError> {
    let length = char_len(raw_html);
    if length <= MIN_FALLBACK_PAYLOAD_CHARS {
        return Err(FallbackError::PayloadTooShort { length });
    }

    tracing::debug!("Fallback extraction: processing {} characters", length);

    let document = PageDocument::parse(raw_html);

    let headings = collect_headings(&document);
    let paragraphs: Vec<String> = document
        .find_all("p")
        .into_iter()
        .map(document::text)
        .filter(|text| (MIN_PARAGRAPH_CHARS..MAX_PARAGRAPH_CHARS).contains(&char_len(text)))
        .map(|text| truncate_chars(&text, STORED_PARAGRAPH_CHARS))
        .collect();

    let found_title = document
        .first_text("title")
        .or_else(|| document.first_text("h1"));

    if headings.is_empty() && paragraphs.is_empty() && found_title.is_none() {
        return Err(FallbackError::NoContent);
    }

    let found_title = found_title.map(|t| truncate_chars(&t, MAX_TITLE_CHARS));
    let title = found_title.clone().unwrap_or_else(|| NO_TITLE.to_string());

    let h1 = document
        .first_text("h1")
        .map(|t| truncate_chars(&t, MAX_TITLE_CHARS))
        .unwrap_or_default();

    let meta_description = document
        .first(r#"meta[name="description"]"#)
        .and_then(|meta| document::attr(meta, "content"))
        .map(|d| truncate_chars(&d, MAX_TITLE_CHARS))
        .unwrap_or_default();

    let h2_questions: Vec<String> = headings
        .iter()
        .filter(|h| h.level >= 2 && h.is_question)
        .map(|h| h.text.clone())
        .take(MAX_QUESTIONS)
        .collect();

    let answer_first_blocks = heading_answers(&document);
    let raw_content = raw_content_dump(&title, &headings, &paragraphs);
    let summary = summarize(&headings, h2_questions.len(), paragraphs.len(), found_title.as_deref());

    tracing::debug!(
        "Fallback extraction completed: {} headings, {} paragraphs",
        headings.len(),
        paragraphs.len()
    );

    let signals = Signals {
        title,
        meta_description,
        h1,
        h2_questions,
        answer_first_blocks,
        domain: extract_domain(url).unwrap_or_default(),
        headings,
        paragraphs: paragraphs.into_iter().take(MAX_PARAGRAPHS).collect(),
        raw_content: Some(raw_content),
        ..Signals::default()
    };

    Ok(FallbackExtraction { signals, summary })
}

/// Every non-empty H1..H6, grouped by level and then in document order
fn collect_headings(document: &PageDocument) -> Vec<HeadingInfo> {
    let mut headings = Vec::new();
    for level in 1..=6u8 {
        for element in document.find_all(&format!("h{}", level)) {
            let text = document::text(element);
            if text.is_empty() {
                continue;
            }
            headings.push(HeadingInfo {
                level,
                is_question: is_question(&text),
                text: truncate_chars(&text, MAX_HEADING_CHARS),
            });
        }
    }
    headings
}

/// Paragraphs directly following any heading, at most five
fn heading_answers(document: &PageDocument) -> Vec<String> {
    document
        .find_all("h1, h2, h3, h4, h5, h6")
        .into_iter()
        .filter_map(document::next_element_sibling)
        .filter(|sibling| sibling.value().name() == "p")
        .map(document::text)
        .filter(|text| is_answer_length(text))
        .map(|text| truncate_chars(&text, ANSWER_BLOCK_STORED_CHARS))
        .take(MAX_ANSWER_BLOCKS)
        .collect()
}

fn raw_content_dump(title: &str, headings: &[HeadingInfo], paragraphs: &[String]) -> String {
    let mut lines = Vec::with_capacity(4 + RAW_CONTENT_HEADINGS + RAW_CONTENT_PARAGRAPHS);
    lines.push(format!("TITLE: {}", title));
    lines.push(format!("HEADINGS ({}):", headings.len()));
    lines.extend(
        headings
            .iter()
            .take(RAW_CONTENT_HEADINGS)
            .map(|h| format!("H{}: {}", h.level, h.text)),
    );
    lines.push(format!("PARAGRAPHS ({}):", paragraphs.len()));
    lines.extend(
        paragraphs
            .iter()
            .take(RAW_CONTENT_PARAGRAPHS)
            .enumerate()
            .map(|(i, p)| format!("P{}: {}", i + 1, p)),
    );

    truncate_chars(&lines.join("\n"), MAX_RAW_CONTENT_CHARS)
}

fn summarize(
    headings: &[HeadingInfo],
    questions: usize,
    paragraphs: usize,
    title: Option<&str>,
) -> String {
    let mut factors = Vec::new();
    if headings.len() > 5 {
        factors.push(format!("{} headings", headings.len()));
    }
    if questions > 0 {
        factors.push(format!("{} question headings", questions));
    }
    if paragraphs > 10 {
        factors.push(format!("{} content paragraphs", paragraphs));
    }
    if title.map_or(false, |t| char_len(t) > 10) {
        factors.push("descriptive title".to_string());
    }

    if factors.is_empty() {
        "basic content structure".to_string()
    } else {
        factors.join(", ")
    }
}
