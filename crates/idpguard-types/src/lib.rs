//! Stable DTOs and IDs used across the idpguard workspace.
//!
//! This crate is intentionally boring:
//! - data types for check results and the emitted report
//! - stable string IDs for checks
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod report;
pub mod result;

pub use explain::{ExamplePair, Explanation, all_check_ids, lookup_explanation};
pub use report::{AuditReport, RunMeta, SCHEMA_REPORT_V1, Scorecard, Summary, ToolMeta};
pub use result::{Category, CheckResult, Metadata, MetadataBuilder, Severity, Status};
