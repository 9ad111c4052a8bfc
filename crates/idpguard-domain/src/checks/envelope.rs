//! Result-building helpers shared by every catalogue check.

use super::CheckSpec;
use crate::discovery::DiscoveryOutcome;
use idpguard_types::{CheckResult, Metadata, MetadataBuilder, Severity, ids};
use serde_json::Value;

/// Accumulates rule outcomes for one check evaluation.
#[derive(Debug, Default)]
pub struct Evaluation {
    critical_issues: Vec<String>,
    /// Per-issue severity override, parallel to `critical_issues`.
    issue_severities: Vec<Option<Severity>>,
    recommendations: Vec<String>,
    skip_reason: Option<String>,
    metadata: MetadataBuilder,
}

impl Evaluation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn critical(&mut self, issue: impl Into<String>) {
        self.critical_issues.push(issue.into());
        self.issue_severities.push(None);
    }

    /// A critical issue whose severity replaces the check default.
    pub fn critical_with_severity(&mut self, issue: impl Into<String>, severity: Severity) {
        self.critical_issues.push(issue.into());
        self.issue_severities.push(Some(severity));
    }

    pub fn recommend(&mut self, recommendation: impl Into<String>) {
        self.recommendations.push(recommendation.into());
    }

    /// Mark the check as not applicable. Takes precedence over any issue.
    pub fn skip(&mut self, reason: impl Into<String>) {
        self.skip_reason = Some(reason.into());
    }

    pub fn record(&mut self, key: &str, value: impl Into<Value>) {
        self.metadata = std::mem::take(&mut self.metadata).insert(key, value);
    }

    /// The most severe issue decides; issues without an override count at the default.
    fn fail_severity(&self, spec: &CheckSpec) -> Severity {
        self.issue_severities
            .iter()
            .map(|s| s.unwrap_or(spec.default_severity))
            .max()
            .unwrap_or(spec.default_severity)
    }

    pub fn into_result(self, spec: &CheckSpec) -> CheckResult {
        if let Some(reason) = self.skip_reason {
            return CheckResult::skipped(&spec.id, spec.category, reason)
                .with_metadata(self.metadata.build());
        }

        let severity = self.fail_severity(spec);
        let metadata = self
            .metadata
            .insert(ids::META_CRITICAL_ISSUES, self.critical_issues.clone())
            .insert(ids::META_RECOMMENDATIONS, self.recommendations.clone())
            .build();

        if !self.critical_issues.is_empty() {
            let message = format!(
                "{}: {} critical issue(s) found",
                spec.name,
                self.critical_issues.len()
            );
            let remediation = remediation_text(&self.critical_issues, &self.recommendations);
            CheckResult::fail(&spec.id, spec.category, severity, message, remediation)
                .with_metadata(metadata)
        } else if !self.recommendations.is_empty() {
            let message = format!(
                "{}: {} recommendation(s)",
                spec.name,
                self.recommendations.len()
            );
            let remediation = remediation_text(&[], &self.recommendations);
            CheckResult::warning(&spec.id, spec.category, spec.default_severity, message, remediation)
                .with_metadata(metadata)
        } else {
            CheckResult::pass(&spec.id, spec.category, format!("{}: compliant", spec.name))
                .with_metadata(metadata)
        }
    }
}

fn remediation_text(critical: &[String], recommendations: &[String]) -> String {
    critical
        .iter()
        .map(|c| format!("Required: {c}"))
        .chain(recommendations.iter().map(|r| format!("Recommended: {r}")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Result for a check whose discovery call failed. Never a `fail`.
pub fn discovery_warning(spec: &CheckSpec, target: &str, outcome: &DiscoveryOutcome) -> CheckResult {
    let error = match outcome {
        DiscoveryOutcome::Failed { error, .. } => error.clone(),
        DiscoveryOutcome::Found { .. } => None,
    };
    let metadata: Metadata = MetadataBuilder::new()
        .insert(ids::META_DISCOVERY_ATTEMPTS, outcome.attempts_json())
        .insert_opt(ids::META_DISCOVERY_ERROR, error)
        .build();

    CheckResult::warning(
        &spec.id,
        spec.category,
        spec.default_severity,
        format!("Discovery document could not be retrieved for {target}"),
        "Publish the provider metadata at /.well-known/openid-configuration \
         or /.well-known/oauth-authorization-server and make it reachable.",
    )
    .with_metadata(metadata)
}
