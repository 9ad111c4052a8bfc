use idpguard_domain::policy::RunFilters;
use idpguard_types::Severity;

pub const DEFAULT_PROFILE: &str = "default";

/// Known profile names.
pub const PROFILES: [&str; 3] = ["strict", DEFAULT_PROFILE, "advisory"];

/// Starting point for resolution before file values and overrides apply.
#[derive(Clone, Debug)]
pub struct Preset {
    pub profile: &'static str,
    pub fail_on: Severity,
    pub filters: RunFilters,
}

/// Preset profiles only differ in how strict the pass/fail threshold is.
pub fn preset(profile: &str) -> Option<Preset> {
    let fail_on = match profile {
        "strict" => Severity::Medium,
        DEFAULT_PROFILE => Severity::High,
        "advisory" => Severity::Critical,
        _ => return None,
    };
    let profile = PROFILES.into_iter().find(|p| *p == profile)?;
    Some(Preset {
        profile,
        fail_on,
        filters: RunFilters::all(),
    })
}
