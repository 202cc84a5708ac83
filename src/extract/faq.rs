//! FAQ harvesting from accordion / Q&A style markup
//!
//! The selector tables are fixed so extraction stays deterministic; changing
//! them changes the output for the same page.

use super::document::{self, PageDocument};
use super::{char_len, truncate_chars};

/// Containers that commonly wrap FAQ entries, scanned in this order
pub const FAQ_CONTAINER_SELECTORS: &[&str] = &[
    r#"[class*="faq"]"#,
    r#"[id*="faq"]"#,
    ".accordion",
    ".qa",
    r#"[class*="question"]"#,
    r#"[class*="answer"]"#,
    ".toggle",
    ".collapse",
];

const QUESTION_SELECTOR: &str = r#"h3, h4, h5, .question, [class*="question"], dt"#;
const ANSWER_SELECTOR: &str = r#"p, .answer, [class*="answer"], dd"#;

/// Maximum number of FAQ entries kept per page
pub const MAX_FAQ_ITEMS: usize = 10;

const MIN_QUESTION_CHARS: usize = 5;
const MIN_ANSWER_CHARS: usize = 10;
const MAX_QUESTION_CHARS: usize = 100;
const MAX_ANSWER_CHARS: usize = 200;

/// Extracts up to ten `"Q: <question> A: <answer>"` entries
///
/// Each matched container contributes its first question-like and first
/// answer-like descendant. A pair is kept when the question is longer than
/// 5 characters and the answer longer than 10.
pub fn extract_faq(document: &PageDocument) -> Vec<String> {
    let mut faq = Vec::new();

    let (Some(question_sel), Some(answer_sel)) = (
        document::selector(QUESTION_SELECTOR),
        document::selector(ANSWER_SELECTOR),
    ) else {
        return faq;
    };

    for container_selector in FAQ_CONTAINER_SELECTORS {
        for container in document.find_all(container_selector) {
            if faq.len() >= MAX_FAQ_ITEMS {
                return faq;
            }

            let question = document::find_within(container, &question_sel)
                .map(document::text)
                .unwrap_or_default();
            let answer = document::find_within(container, &answer_sel)
                .map(document::text)
                .unwrap_or_default();

            if char_len(&question) > MIN_QUESTION_CHARS && char_len(&answer) > MIN_ANSWER_CHARS {
                faq.push(format!(
                    "Q: {} A: {}",
                    truncate_chars(&question, MAX_QUESTION_CHARS),
                    truncate_chars(&answer, MAX_ANSWER_CHARS)
                ));
            }
        }
    }

    faq
}
