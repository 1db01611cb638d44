//! Findings and the finding catalog.

pub mod catalog;
pub mod finding;

pub use catalog::{resolve_findings, standard_findings, FindingRecord};
pub use finding::{Claim, CollectedFinding, Finding, FindingId, FindingKind};
