use crate::{model::IdpguardConfigV1, presets};
use anyhow::Context;
use idpguard_domain::Rule;
use idpguard_domain::policy::RunFilters;
use idpguard_types::{Category, Severity};
use std::collections::BTreeMap;

/// Values supplied by the caller (typically command-line flags). They win over the file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub fail_on: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub profile: String,
    /// Lowest finding severity that breaks the run.
    pub fail_on: Severity,
    pub filters: RunFilters,
    /// check id -> severity replacing the registered default.
    pub severity_overrides: BTreeMap<String, Severity>,
}

pub fn resolve_config(
    cfg: IdpguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| presets::DEFAULT_PROFILE.to_string());

    let preset = presets::preset(&profile).with_context(|| {
        format!(
            "unknown profile: {profile} (expected one of {})",
            presets::PROFILES.join("|")
        )
    })?;

    let mut filters = preset.filters;
    if let Some(include) = cfg.include {
        filters.include = Some(validate_ids(include).context("invalid include list")?);
    }
    if let Some(exclude) = cfg.exclude {
        filters.exclude = Some(validate_ids(exclude).context("invalid exclude list")?);
    }
    if let Some(categories) = cfg.categories {
        filters.categories = Some(
            categories
                .iter()
                .map(|c| parse_category(c))
                .collect::<anyhow::Result<Vec<_>>>()
                .context("invalid categories")?,
        );
    }

    // per-check overrides
    let mut severity_overrides = BTreeMap::new();
    for (check_id, cc) in cfg.checks.iter() {
        let rule = parse_check_id(check_id).context("invalid [checks] table")?;

        if let Some(sev) = cc.severity.as_deref() {
            let severity =
                parse_severity(sev).with_context(|| format!("invalid severity for {check_id}"))?;
            severity_overrides.insert(rule.id().to_string(), severity);
        }

        match cc.enabled {
            Some(false) => {
                let exclude = filters.exclude.get_or_insert_with(Vec::new);
                if !exclude.iter().any(|id| id == check_id) {
                    exclude.push(check_id.clone());
                }
            }
            Some(true) => {
                if let Some(exclude) = filters.exclude.as_mut() {
                    exclude.retain(|id| id != check_id);
                }
            }
            None => {}
        }
    }

    let fail_on = match overrides.fail_on.as_deref().or(cfg.fail_on.as_deref()) {
        Some(v) => parse_severity(v).context("invalid fail_on")?,
        None => preset.fail_on,
    };

    Ok(ResolvedConfig {
        profile: preset.profile.to_string(),
        fail_on,
        filters,
        severity_overrides,
    })
}

fn validate_ids(ids: Vec<String>) -> anyhow::Result<Vec<String>> {
    for id in &ids {
        parse_check_id(id)?;
    }
    Ok(ids)
}

fn parse_check_id(v: &str) -> anyhow::Result<Rule> {
    Rule::from_id(v).with_context(|| format!("unknown check id: {v}"))
}

fn parse_category(v: &str) -> anyhow::Result<Category> {
    Category::parse(v)
        .with_context(|| format!("unknown category: {v} (expected discovery|oauth|oidc|nist)"))
}

fn parse_severity(v: &str) -> anyhow::Result<Severity> {
    Severity::parse(v).with_context(|| {
        format!("unknown severity: {v} (expected info|low|medium|high|critical)")
    })
}
