//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - ACR classification being a function of the token set
//! - Risk score bounds and monotonicity
//! - Fault isolation and compliance denominators in the orchestrator

use crate::checks::AuditContext;
use crate::classify::{ClaimSupport, classify};
use crate::engine::Orchestrator;
use crate::policy::RunFilters;
use crate::report::{risk_score, summarize};
use crate::test_support::{ErroringCheck, FixedCheck, PanickingCheck, StaticSource, spec_with};
use idpguard_types::{Category, CheckResult, Severity, Status};
use proptest::prelude::*;
use serde_json::json;
use std::collections::BTreeMap;

// ============================================================================
// Strategies
// ============================================================================

/// Mix of recognized NIST/vendor tokens and arbitrary vendor strings.
fn arb_acr_token() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("urn:nist:800-63-3:aal:1".to_string()),
        Just("urn:nist:800-63-3:aal:2".to_string()),
        Just("urn:nist:800-63-3:aal:3".to_string()),
        Just("phr".to_string()),
        Just("phrh".to_string()),
        Just("pwd".to_string()),
        Just("urn:okta:loa:2fa:any".to_string()),
        prop::string::string_regex("[a-z]{1,6}:[a-z]{1,6}").unwrap(),
    ]
}

fn arb_severity() -> impl Strategy<Value = Severity> {
    prop::sample::select(Severity::ALL.to_vec())
}

fn arb_category() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::ALL.to_vec())
}

fn arb_result() -> impl Strategy<Value = CheckResult> {
    (0u8..5, arb_severity(), arb_category()).prop_map(|(kind, severity, category)| match kind {
        0 => CheckResult::pass("p", category, "ok"),
        1 => CheckResult::fail("f", category, severity, "bad", "fix"),
        2 => CheckResult::warning("w", category, severity, "meh", "consider"),
        3 => CheckResult::skipped("s", category, "n/a"),
        _ => CheckResult::error("e", category, "boom"),
    })
}

#[derive(Clone, Copy, Debug)]
enum Behavior {
    Pass,
    Panic,
    Error,
}

fn arb_behavior() -> impl Strategy<Value = Behavior> {
    prop_oneof![Just(Behavior::Pass), Just(Behavior::Panic), Just(Behavior::Error)]
}

// ============================================================================
// Classification
// ============================================================================

proptest! {
    #[test]
    fn classification_ignores_order_and_duplicates(
        tokens in prop::collection::vec(arb_acr_token(), 0..8),
        seed in any::<u64>(),
    ) {
        let claims = ClaimSupport::default();
        let forward = classify(Some(&tokens[..]), claims);

        let mut shuffled = tokens.clone();
        shuffled.reverse();
        if !shuffled.is_empty() {
            let rotate = usize::try_from(seed % shuffled.len() as u64).unwrap_or(0);
            shuffled.rotate_left(rotate);
            shuffled.push(shuffled[0].clone());
        }
        let permuted = classify(Some(&shuffled[..]), claims);

        prop_assert_eq!(forward, permuted);
    }

    #[test]
    fn can_determine_iff_some_level_detected(
        tokens in prop::collection::vec(arb_acr_token(), 0..8),
    ) {
        let out = classify(Some(&tokens[..]), ClaimSupport::default());
        prop_assert_eq!(out.can_determine, !out.detected_levels.is_empty());
        prop_assert_eq!(out.can_determine, out.highest_level().is_some());
        let mut sorted = out.unmapped_tokens.clone();
        sorted.sort();
        sorted.dedup();
        prop_assert_eq!(sorted, out.unmapped_tokens);
    }
}

// ============================================================================
// Aggregation
// ============================================================================

proptest! {
    #[test]
    fn risk_score_is_bounded(counts in prop::collection::vec(0u32..50, 5)) {
        let by_severity: BTreeMap<Severity, u32> =
            Severity::ALL.into_iter().zip(counts).collect();
        prop_assert!(risk_score(&by_severity) <= 100);
    }

    #[test]
    fn adding_a_finding_never_lowers_risk(
        results in prop::collection::vec(arb_result(), 0..12),
        severity in arb_severity(),
    ) {
        let before = summarize(&results).risk_score;
        let mut more = results.clone();
        more.push(CheckResult::fail("extra", Category::Oauth, severity, "bad", "fix"));
        prop_assert!(summarize(&more).risk_score >= before);
    }

    #[test]
    fn summary_counts_partition_the_results(results in prop::collection::vec(arb_result(), 0..20)) {
        let s = summarize(&results);
        prop_assert_eq!(s.total_checks as usize, results.len());
        prop_assert_eq!(s.passed + s.failed + s.warnings + s.skipped + s.errors, s.total_checks);
        prop_assert!(s.compliance_percentage <= 100);
        let by_category: u32 = s.by_category.values().sum();
        prop_assert_eq!(by_category, s.total_checks);
        let by_severity: u32 = s.by_severity.values().sum();
        prop_assert_eq!(by_severity, s.failed + s.warnings);
    }
}

// ============================================================================
// Orchestration
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_selected_check_yields_exactly_one_result(
        behaviors in prop::collection::vec(arb_behavior(), 0..10),
    ) {
        let mut orch = Orchestrator::new(RunFilters::all());
        for (i, behavior) in behaviors.iter().enumerate() {
            let spec = spec_with(&format!("prop.check_{i}"), Category::Nist);
            match behavior {
                Behavior::Pass => orch.register(FixedCheck::pass(spec)),
                Behavior::Panic => orch.register(PanickingCheck(spec)),
                Behavior::Error => orch.register(ErroringCheck(spec)),
            }
        }

        let source = StaticSource::found(json!({}));
        let report = orch.run(&AuditContext::new("idp.example.com", &source));

        prop_assert_eq!(report.results.len(), behaviors.len());
        let passes = behaviors.iter().filter(|b| matches!(b, Behavior::Pass)).count();
        let errors = report.results.iter().filter(|r| r.status() == Status::Error).count();
        prop_assert_eq!(errors, behaviors.len() - passes);

        // Errors leave the denominator, so any pass means full compliance.
        let expected = if passes == 0 { 0 } else { 100 };
        prop_assert_eq!(report.summary.compliance_percentage, expected);
    }
}
