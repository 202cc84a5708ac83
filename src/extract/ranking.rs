//! "Why it ranks" hypothesis built from extracted signal counts

use crate::audit::Signals;
use crate::url::{is_authoritative_domain, is_encyclopedic_domain};

const COMPREHENSIVE_WORD_COUNT: usize = 1500;
const RICH_MEDIA_IMAGES: usize = 5;
const STRONG_INTERNAL_LINKING: usize = 10;

/// Sentence used when no factor applies
pub const NEUTRAL_SUMMARY: &str = "Standard content structure without obvious AEO optimizations.";

/// Lists the qualitative ranking factors present in a signal set
///
/// Factors are reported in a fixed order: question headings, answer-first
/// blocks, structured data, FAQ, domain authority, content depth, media and
/// internal linking.
pub fn ranking_factors(signals: &Signals) -> Vec<String> {
    let mut factors = Vec::new();

    if !signals.h2_questions.is_empty() {
        factors.push(format!("{} question-based headings", signals.h2_questions.len()));
    }
    if !signals.answer_first_blocks.is_empty() {
        factors.push(format!(
            "{} answer-first content blocks",
            signals.answer_first_blocks.len()
        ));
    }
    if !signals.schema_types.is_empty() {
        factors.push(format!("structured data ({})", signals.schema_types.join(", ")));
    }
    if !signals.faq.is_empty() {
        factors.push(format!("FAQ section with {} items", signals.faq.len()));
    }
    if is_authoritative_domain(&signals.domain) {
        factors.push("authoritative domain (.edu/.gov)".to_string());
    }
    if is_encyclopedic_domain(&signals.domain) {
        factors.push("encyclopedia authority (Wikipedia)".to_string());
    }
    if signals.word_count > COMPREHENSIVE_WORD_COUNT {
        factors.push(format!("comprehensive content ({} words)", signals.word_count));
    }
    if signals.images > RICH_MEDIA_IMAGES {
        factors.push(format!("{} images", signals.images));
    }
    if signals.videos > 0 {
        factors.push(format!("{} videos", signals.videos));
    }
    if signals.internal_links > STRONG_INTERNAL_LINKING {
        factors.push(format!(
            "strong internal linking ({} links)",
            signals.internal_links
        ));
    }

    factors
}

/// Joins the present factors into a one-sentence hypothesis
pub fn why_it_ranks(signals: &Signals) -> String {
    let factors = ranking_factors(signals);
    if factors.is_empty() {
        NEUTRAL_SUMMARY.to_string()
    } else {
        format!("Likely ranks due to: {}.", factors.join(", "))
    }
}
