//! Use case orchestration for idpguard.
//!
//! This crate provides the application layer: use cases that coordinate settings,
//! the check catalogue and the orchestrator. Transport and presentation stay with
//! the caller, which supplies a [`MetadataSource`](idpguard_domain::discovery::MetadataSource)
//! and decides what to do with the report.

#![forbid(unsafe_code)]

mod audit;
mod explain;
mod output;

pub use audit::{AuditInput, AuditOutput, exit_code, run_audit};
pub use explain::{ExplainOutput, format_explanation, format_not_found, run_explain};
pub use output::{config_schema, report_schema, serialize_report};
