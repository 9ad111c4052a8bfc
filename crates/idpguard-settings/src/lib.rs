//! Config parsing and profile/preset resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod presets;
mod resolve;

pub use model::{CheckConfig, IdpguardConfigV1, SCHEMA_CONFIG_V1};
pub use presets::{DEFAULT_PROFILE, PROFILES};
pub use resolve::{Overrides, ResolvedConfig};

/// Parse `idpguard.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<IdpguardConfigV1> {
    let cfg: IdpguardConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the run configuration: preset, then file values, then caller overrides.
pub fn resolve_config(
    cfg: IdpguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
