use crate::result::{Category, CheckResult, Severity};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::OffsetDateTime;

/// Stable schema identifier for idpguard reports.
pub const SCHEMA_REPORT_V1: &str = "idpguard.report.v1";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RunMeta {
    pub tool: ToolMeta,
    pub target: String,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub ended_at: OffsetDateTime,
    pub duration_ms: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Summary {
    pub total_checks: u32,
    pub passed: u32,
    pub failed: u32,
    pub warnings: u32,
    pub skipped: u32,
    pub errors: u32,
    pub by_severity: BTreeMap<Severity, u32>,
    pub by_category: BTreeMap<Category, u32>,
    /// Weighted severity score, `0..=100`.
    pub risk_score: u32,
    /// Share of evaluated checks that passed, `0..=100`.
    pub compliance_percentage: u32,
}

impl Summary {
    pub fn severity_count(&self, severity: Severity) -> u32 {
        self.by_severity.get(&severity).copied().unwrap_or(0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Scorecard {
    pub category: Category,
    pub total_checks: u32,
    pub passed: u32,
    pub failed: u32,
    pub compliance_percentage: u32,
    /// True iff no check in the category failed.
    pub compliant: bool,
}

/// The full audit report handed to presentation layers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AuditReport {
    pub schema: String,
    pub metadata: RunMeta,
    pub summary: Summary,
    pub results: Vec<CheckResult>,
    /// Results with status `fail` or `warning`, in execution order.
    pub findings: Vec<CheckResult>,
    pub scorecards: Vec<Scorecard>,
}

impl AuditReport {
    /// Whether any finding is at least as severe as `threshold`.
    pub fn has_finding_at_or_above(&self, threshold: Severity) -> bool {
        self.findings
            .iter()
            .filter_map(CheckResult::severity)
            .any(|s| s >= threshold)
    }

    pub fn worst_severity(&self) -> Option<Severity> {
        self.findings.iter().filter_map(CheckResult::severity).max()
    }

    pub fn scorecard(&self, category: Category) -> Option<&Scorecard> {
        self.scorecards.iter().find(|s| s.category == category)
    }
}
