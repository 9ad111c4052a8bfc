//! Machine-readable forms of the report and config models.

use anyhow::Context;
use idpguard_settings::IdpguardConfigV1;
use idpguard_types::AuditReport;

/// Pretty JSON with a trailing newline.
pub fn serialize_report(report: &AuditReport) -> anyhow::Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(report).context("serialize report")?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// JSON schema describing [`AuditReport`].
pub fn report_schema() -> anyhow::Result<String> {
    let schema = schemars::schema_for!(AuditReport);
    serde_json::to_string_pretty(&schema).context("serialize report schema")
}

/// JSON schema describing `idpguard.toml`.
pub fn config_schema() -> anyhow::Result<String> {
    let schema = schemars::schema_for!(IdpguardConfigV1);
    serde_json::to_string_pretty(&schema).context("serialize config schema")
}
