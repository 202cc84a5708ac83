//! Outcome classification for a finished audit
//!
//! Derived from a [`PageAudit`](super::PageAudit), never stored separately.
use std::fmt;

/// How an audit's signals were obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuditOutcome {
    /// Page was fetched, validated and fully extracted
    Analyzed,

    /// Fetch failed but the degraded extractor recovered partial signals
    Fallback,

    /// Nothing could be extracted; only the error and domain are set
    Failed,
}

impl AuditOutcome {
    /// Returns true if this represents a fully successful audit
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Analyzed)
    }

    /// Returns true if the audit carries an error description
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Fallback | Self::Failed)
    }

    /// Short lowercase label used in logs and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Analyzed => "analyzed",
            Self::Fallback => "fallback",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for AuditOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
