//! The `audit` use case: resolve settings, run the catalogue, aggregate a report.

use anyhow::Context;
use idpguard_domain::discovery::MetadataSource;
use idpguard_domain::{AuditContext, Orchestrator, catalogue};
use idpguard_settings::{IdpguardConfigV1, Overrides, ResolvedConfig};
use idpguard_types::AuditReport;
use tracing::{info, info_span};

/// Input for the audit use case.
pub struct AuditInput<'a> {
    /// Host or base URL of the identity provider.
    pub target: &'a str,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    pub overrides: Overrides,
    pub source: &'a dyn MetadataSource,
}

/// Output from the audit use case.
#[derive(Clone, Debug)]
pub struct AuditOutput {
    pub report: AuditReport,
    pub resolved_config: ResolvedConfig,
    /// Some finding is at or above the configured `fail_on` severity.
    pub threshold_breached: bool,
}

pub fn run_audit(input: AuditInput<'_>) -> anyhow::Result<AuditOutput> {
    let target = input.target.trim();
    anyhow::ensure!(!target.is_empty(), "audit target must not be empty");

    // Parse config (empty is allowed, defaults apply).
    let cfg = if input.config_text.trim().is_empty() {
        IdpguardConfigV1::default()
    } else {
        idpguard_settings::parse_config_toml(input.config_text).context("parse config")?
    };
    let resolved =
        idpguard_settings::resolve_config(cfg, input.overrides).context("resolve config")?;

    let mut orchestrator = Orchestrator::new(resolved.filters.clone());
    orchestrator.register_many(catalogue(&resolved.severity_overrides));

    let span = info_span!("audit", idp = %target, profile = %resolved.profile);
    info!(
        parent: &span,
        checks = orchestrator.planned_checks().len(),
        "starting audit"
    );

    let ctx = AuditContext::new(target, input.source).with_span(span.clone());
    let report = orchestrator.run(&ctx);
    let threshold_breached = report.has_finding_at_or_above(resolved.fail_on);

    info!(
        parent: &span,
        risk_score = report.summary.risk_score,
        compliance = report.summary.compliance_percentage,
        fail_on = %resolved.fail_on,
        threshold_breached,
        "audit finished"
    );

    Ok(AuditOutput {
        report,
        resolved_config: resolved,
        threshold_breached,
    })
}

/// Process exit code for an audit: 2 when the threshold is breached, 0 otherwise.
pub fn exit_code(output: &AuditOutput) -> i32 {
    if output.threshold_breached { 2 } else { 0 }
}
