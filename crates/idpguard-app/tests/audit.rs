use idpguard_app::{AuditInput, exit_code, report_schema, run_audit, serialize_report};
use idpguard_discovery::WellKnownSource;
use idpguard_domain::discovery::MetadataSource;
use idpguard_settings::Overrides;
use idpguard_test_util::{
    ScriptedFetch, ScriptedSource, compliant_document, legacy_document, normalize_nondeterministic,
    not_found_outcome,
};
use idpguard_types::{Category, Severity, Status, ids};
use serde_json::Value;

fn audit(source: &dyn MetadataSource, config_text: &str) -> idpguard_app::AuditOutput {
    run_audit(AuditInput {
        target: "idp.example.com",
        config_text,
        overrides: Overrides::default(),
        source,
    })
    .expect("audit runs")
}

fn status_of(output: &idpguard_app::AuditOutput, id: &str) -> Status {
    output
        .report
        .results
        .iter()
        .find(|r| r.id() == id)
        .map(|r| r.status())
        .expect("result present")
}

#[test]
fn compliant_provider_passes_everything() {
    let source = ScriptedSource::serving(compliant_document());
    let output = audit(&source, "");

    let summary = &output.report.summary;
    assert_eq!(summary.total_checks, 9);
    assert_eq!(summary.passed, 9);
    assert_eq!(summary.risk_score, 0);
    assert_eq!(summary.compliance_percentage, 100);
    assert!(output.report.findings.is_empty());
    assert!(output.report.scorecards.iter().all(|c| c.compliant));
    assert!(!output.threshold_breached);
    assert_eq!(exit_code(&output), 0);
    assert_eq!(output.resolved_config.profile, "default");
}

#[test]
fn legacy_provider_is_scored_and_breaches_default_threshold() {
    let source = ScriptedSource::serving(legacy_document());
    let output = audit(&source, "");
    let report = &output.report;

    assert_eq!(status_of(&output, ids::CHECK_OAUTH_PKCE), Status::Skipped);
    assert_eq!(status_of(&output, ids::CHECK_NIST_AAL_ADVERTISED), Status::Pass);
    assert_eq!(status_of(&output, ids::CHECK_NIST_AAL3_AVAILABLE), Status::Warning);

    let summary = &report.summary;
    assert_eq!(summary.total_checks, 9);
    assert_eq!(summary.passed, 1);
    assert_eq!(summary.failed, 6);
    assert_eq!(summary.warnings, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.severity_count(Severity::Critical), 1);
    assert_eq!(summary.severity_count(Severity::High), 3);
    assert_eq!(summary.severity_count(Severity::Medium), 3);
    // 2 * (10 + 3*5 + 3*3)
    assert_eq!(summary.risk_score, 68);
    // 1 of 8 evaluated
    assert_eq!(summary.compliance_percentage, 13);
    assert_eq!(report.findings.len(), 7);
    assert_eq!(report.worst_severity(), Some(Severity::Critical));

    let order: Vec<Category> = report.scorecards.iter().map(|c| c.category).collect();
    assert_eq!(
        order,
        vec![Category::Oidc, Category::Discovery, Category::Oauth, Category::Nist]
    );
    let nist = report.scorecard(Category::Nist).expect("nist scorecard");
    assert_eq!((nist.total_checks, nist.passed, nist.failed), (3, 1, 1));
    assert_eq!(nist.compliance_percentage, 33);
    assert!(!nist.compliant);

    assert!(output.threshold_breached);
    assert_eq!(exit_code(&output), 2);
}

#[test]
fn advisory_profile_with_exclusion_can_pass_a_weak_provider() {
    let source = ScriptedSource::serving(legacy_document());
    let output = audit(
        &source,
        r#"
profile = "advisory"
exclude = ["discovery.transport_security"]
"#,
    );
    assert_eq!(output.report.summary.total_checks, 8);
    assert!(!output.threshold_breached);
}

#[test]
fn severity_override_changes_reported_severity() {
    let source = ScriptedSource::serving(legacy_document());
    let output = audit(
        &source,
        r#"
include = ["oidc.acr_amr_claims"]

[checks."oidc.acr_amr_claims"]
severity = "critical"
"#,
    );
    assert_eq!(output.report.results.len(), 1);
    assert_eq!(output.report.results[0].severity(), Some(Severity::Critical));
    assert_eq!(output.report.summary.risk_score, 20);
}

#[test]
fn unreachable_provider_yields_warnings_not_failures() {
    let source = ScriptedSource::new([not_found_outcome("https://idp.example.com")]);
    let output = audit(&source, "");
    let summary = &output.report.summary;

    assert_eq!(summary.warnings, 9);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.compliance_percentage, 0);
    // Six high and three medium default severities.
    assert_eq!(summary.risk_score, 78);
    for result in &output.report.results {
        let attempts = result.metadata()["discovery_attempts"]
            .as_array()
            .expect("attempt log");
        assert_eq!(attempts.len(), 2);
    }
    // Discovery is not cached across checks.
    assert_eq!(source.targets().len(), 9);
}

#[test]
fn well_known_source_feeds_the_audit() {
    let fetch = ScriptedFetch::default().with_json(
        "https://idp.example.com/.well-known/oauth-authorization-server",
        &compliant_document(),
    );
    let source = WellKnownSource::new(fetch);
    let output = audit(&source, "categories = [\"nist\"]");

    assert_eq!(output.report.summary.total_checks, 3);
    assert_eq!(output.report.summary.passed, 3);
    // Each check probes both locations.
    assert_eq!(source.fetcher().requested().len(), 6);
}

#[test]
fn bad_config_is_reported_with_context() {
    let source = ScriptedSource::serving(compliant_document());
    let err = run_audit(AuditInput {
        target: "idp.example.com",
        config_text: "fail_on = \"severe\"",
        overrides: Overrides::default(),
        source: &source,
    })
    .expect_err("invalid severity");
    assert_eq!(err.to_string(), "resolve config");
    assert!(format!("{err:#}").contains("unknown severity: severe"));

    let err = run_audit(AuditInput {
        target: "  ",
        config_text: "",
        overrides: Overrides::default(),
        source: &source,
    })
    .expect_err("empty target");
    assert!(err.to_string().contains("target"));
}

#[test]
fn serialized_report_normalizes_deterministically() {
    let source = ScriptedSource::serving(legacy_document());
    let first = audit(&source, "");
    let second = audit(&source, "");

    let normalize = |output: &idpguard_app::AuditOutput| -> Value {
        let bytes = serialize_report(&output.report).expect("serialize");
        assert_eq!(bytes.last(), Some(&b'\n'));
        normalize_nondeterministic(serde_json::from_slice(&bytes).expect("valid json"))
    };
    let a = normalize(&first);
    assert_eq!(a, normalize(&second));

    assert_eq!(a["schema"], "idpguard.report.v1");
    assert_eq!(a["metadata"]["tool"]["version"], "__VERSION__");
    assert_eq!(a["metadata"]["target"], "idp.example.com");
    assert_eq!(a["results"][0]["timestamp"], "__TIMESTAMP__");
    assert_eq!(a["summary"]["by_severity"]["critical"], 1);
    assert_eq!(a["results"][3]["status"], "skipped");
}

#[test]
fn report_schema_describes_the_envelope() {
    let schema: Value = serde_json::from_str(&report_schema().expect("schema")).expect("json");
    let properties = &schema["properties"];
    for key in ["schema", "metadata", "summary", "results", "findings", "scorecards"] {
        assert!(properties.get(key).is_some(), "missing {key}");
    }
}
