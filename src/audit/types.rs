use super::AuditOutcome;
use crate::extract::FallbackExtraction;
use serde::{Deserialize, Serialize};

/// A heading collected by the fallback extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingInfo {
    /// Heading level, 1 through 6
    pub level: u8,

    /// Trimmed heading text (capped at 200 characters)
    pub text: String,

    /// Whether the heading reads as a question
    pub is_question: bool,
}

/// Structured content signals extracted from one page
///
/// Field names serialize in camelCase so downstream consumers see
/// `metaDescription`, `h2Questions`, `schemaTypes` and so on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signals {
    pub title: String,
    pub meta_description: String,
    pub h1: String,

    /// H2/H3 headings phrased as questions, in document order
    pub h2_questions: Vec<String>,

    /// Paragraphs directly following a heading (30..=300 chars, stored at most 200)
    pub answer_first_blocks: Vec<String>,

    /// `"Q: <question> A: <answer>"` entries, at most 10
    pub faq: Vec<String>,

    /// JSON-LD `@type` values, de-duplicated in first-seen order
    pub schema_types: Vec<String>,

    pub word_count: usize,
    pub images: usize,
    pub videos: usize,
    pub internal_links: usize,

    /// Hostname of the audited URL; empty only when the URL itself is invalid
    pub domain: String,

    // Fallback mode only
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headings: Vec<HeadingInfo>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub paragraphs: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_content: Option<String>,

    /// Terminal error description; set only when the primary path failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    pub fallback_used: bool,
}

impl Signals {
    /// All-empty signals that only know their domain
    pub fn empty(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ..Self::default()
        }
    }

    /// Returns true if every list-typed field is empty
    pub fn lists_empty(&self) -> bool {
        self.h2_questions.is_empty()
            && self.answer_first_blocks.is_empty()
            && self.faq.is_empty()
            && self.schema_types.is_empty()
            && self.headings.is_empty()
            && self.paragraphs.is_empty()
    }
}

/// The per-URL result record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageAudit {
    /// The URL exactly as supplied by the caller
    pub url: String,

    pub signals: Signals,

    /// Human-readable hypothesis for why the page ranks, or the failure reason
    pub why_it_ranks: String,

    /// Wall-clock milliseconds spent on this URL, 0 if fetching never started
    pub parse_time: u64,
}

impl PageAudit {
    /// Creates an audit for a fully analyzed page
    pub fn new(url: impl Into<String>, signals: Signals, why_it_ranks: String, parse_time: u64) -> Self {
        Self {
            url: url.into(),
            signals,
            why_it_ranks,
            parse_time,
        }
    }

    /// Creates an audit with all-empty signals describing a terminal error
    pub fn failed(url: impl Into<String>, domain: impl Into<String>, error: &str, parse_time: u64) -> Self {
        let mut signals = Signals::empty(domain);
        signals.error = Some(error.to_string());

        Self {
            url: url.into(),
            signals,
            why_it_ranks: format!("Could not analyze: {}", error),
            parse_time,
        }
    }

    /// Creates an audit from degraded-mode signals recovered after a failed fetch
    pub fn from_fallback(
        url: impl Into<String>,
        extraction: FallbackExtraction,
        error: &str,
        parse_time: u64,
    ) -> Self {
        let FallbackExtraction { mut signals, summary } = extraction;
        signals.error = Some(error.to_string());
        signals.fallback_used = true;

        Self {
            url: url.into(),
            signals,
            why_it_ranks: format!("Partial analysis (fallback): {}", summary),
            parse_time,
        }
    }

    /// Creates the minimal audit used when a fetch task dies unexpectedly
    pub fn task_failure(url: &str, reason: &str) -> Self {
        Self::failed(url, crate::url::domain_of(url), reason, 0)
    }

    /// Classifies how this audit's signals were obtained
    pub fn outcome(&self) -> AuditOutcome {
        match (&self.signals.error, self.signals.fallback_used) {
            (None, _) => AuditOutcome::Analyzed,
            (Some(_), true) => AuditOutcome::Fallback,
            (Some(_), false) => AuditOutcome::Failed,
        }
    }

    /// Returns true if the page was fully analyzed
    pub fn is_success(&self) -> bool {
        self.outcome().is_success()
    }
}
