//! Audit records produced for every fetched URL
//!
//! A [`PageAudit`] is created once per URL per run and never mutated after
//! construction. Failure is encoded inside the record (`signals.error`), so a
//! batch always yields one well-formed audit per input URL.

mod outcome;
mod types;

pub use outcome::AuditOutcome;
pub use types::{HeadingInfo, PageAudit, Signals};
