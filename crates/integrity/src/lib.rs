//! # AI Oversight Integrity
//!
//! Validation pass over the whole static content store.
//!
//! Ids are referenced across independently edited JSON files; the route
//! loaders join on them without checking. This crate reports every dangling
//! reference, duplicate id and unknown phase in one pass.

mod checker;
mod content;

pub use checker::{IntegrityChecker, IntegrityIssue, IntegrityReport, IssueKind};
pub use content::StaticContent;
