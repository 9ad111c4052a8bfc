//! Pure rule evaluation (no IO).
//!
//! Input: a target identifier and a [`discovery::MetadataSource`] supplied by the caller.
//! Output: per-check results, summary metrics, and category scorecards.

#![forbid(unsafe_code)]

pub mod checks;
pub mod classify;
pub mod discovery;
pub mod model;
pub mod policy;
pub mod report;

mod engine;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use checks::{AuditContext, CatalogCheck, Check, CheckError, CheckSpec, Rule, catalogue};
pub use engine::Orchestrator;
