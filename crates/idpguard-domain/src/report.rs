//! Aggregation of check results into summary metrics and scorecards.

use idpguard_types::{
    AuditReport, Category, CheckResult, RunMeta, SCHEMA_REPORT_V1, Scorecard, Severity, Status,
    Summary,
};
use std::collections::BTreeMap;

/// Multiplier applied to the weighted severity sum before capping at 100.
const RISK_SCALE: u32 = 2;
const RISK_CAP: u32 = 100;

fn severity_weight(severity: Severity) -> u32 {
    match severity {
        Severity::Critical => 10,
        Severity::High => 5,
        Severity::Medium => 3,
        Severity::Low => 1,
        Severity::Info => 0,
    }
}

pub fn build_report(metadata: RunMeta, results: Vec<CheckResult>) -> AuditReport {
    let summary = summarize(&results);
    let scorecards = scorecards(&results);
    let findings = results.iter().filter(|r| r.is_finding()).cloned().collect();
    AuditReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        metadata,
        summary,
        results,
        findings,
        scorecards,
    }
}

pub fn summarize(results: &[CheckResult]) -> Summary {
    let mut summary = Summary {
        by_severity: Severity::ALL.iter().map(|s| (*s, 0)).collect(),
        ..Summary::default()
    };

    for result in results {
        summary.total_checks += 1;
        match result.status() {
            Status::Pass => summary.passed += 1,
            Status::Fail => summary.failed += 1,
            Status::Warning => summary.warnings += 1,
            Status::Skipped => summary.skipped += 1,
            Status::Error => summary.errors += 1,
        }
        if result.is_finding()
            && let Some(severity) = result.severity()
        {
            *summary.by_severity.entry(severity).or_insert(0) += 1;
        }
        *summary.by_category.entry(result.category()).or_insert(0) += 1;
    }

    let evaluated = summary.total_checks - summary.skipped - summary.errors;
    summary.compliance_percentage = percentage(summary.passed, evaluated);
    summary.risk_score = risk_score(&summary.by_severity);
    summary
}

/// Weighted severity score, capped at 100. Adding a finding never lowers it.
pub fn risk_score(by_severity: &BTreeMap<Severity, u32>) -> u32 {
    let weighted: u32 = by_severity
        .iter()
        .map(|(severity, count)| severity_weight(*severity).saturating_mul(*count))
        .fold(0, u32::saturating_add);
    weighted.saturating_mul(RISK_SCALE).min(RISK_CAP)
}

/// One scorecard per category, in order of first appearance.
pub fn scorecards(results: &[CheckResult]) -> Vec<Scorecard> {
    let mut order: Vec<Category> = Vec::new();
    let mut tallies: BTreeMap<Category, (u32, u32, u32)> = BTreeMap::new();

    for result in results {
        let category = result.category();
        if !order.contains(&category) {
            order.push(category);
        }
        let (total, passed, failed) = tallies.entry(category).or_insert((0, 0, 0));
        *total += 1;
        match result.status() {
            Status::Pass => *passed += 1,
            Status::Fail => *failed += 1,
            _ => {}
        }
    }

    order
        .into_iter()
        .map(|category| {
            let (total, passed, failed) = tallies.get(&category).copied().unwrap_or_default();
            Scorecard {
                category,
                total_checks: total,
                passed,
                failed,
                compliance_percentage: percentage(passed, total),
                compliant: failed == 0,
            }
        })
        .collect()
}

/// `round(part / whole * 100)` with halves rounded up; 0 when `whole` is 0.
fn percentage(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    let (part, whole) = (u64::from(part), u64::from(whole));
    let rounded = (part * 200 + whole) / (whole * 2);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fail(id: &str, category: Category, severity: Severity) -> CheckResult {
        CheckResult::fail(id, category, severity, "failed", "fix it")
    }

    fn warn(id: &str, category: Category, severity: Severity) -> CheckResult {
        CheckResult::warning(id, category, severity, "warned", "consider it")
    }

    fn pass(id: &str, category: Category) -> CheckResult {
        CheckResult::pass(id, category, "ok")
    }

    #[test]
    fn scorecard_counts_pass_fail_and_compliance() {
        let results = vec![
            pass("a", Category::Oauth),
            pass("b", Category::Oauth),
            fail("c", Category::Oauth, Severity::High),
            warn("d", Category::Oauth, Severity::Medium),
        ];
        let cards = scorecards(&results);
        assert_eq!(cards.len(), 1);
        let card = &cards[0];
        assert_eq!(card.category, Category::Oauth);
        assert_eq!(card.total_checks, 4);
        assert_eq!(card.passed, 2);
        assert_eq!(card.failed, 1);
        assert_eq!(card.compliance_percentage, 50);
        assert!(!card.compliant);
    }

    #[test]
    fn scorecards_follow_first_appearance_order() {
        let results = vec![
            pass("a", Category::Nist),
            warn("b", Category::Oidc, Severity::Low),
            pass("c", Category::Nist),
            pass("d", Category::Discovery),
        ];
        let order: Vec<Category> = scorecards(&results).iter().map(|c| c.category).collect();
        assert_eq!(order, vec![Category::Nist, Category::Oidc, Category::Discovery]);

        // A warning alone does not make a category non-compliant.
        assert!(scorecards(&results)[1].compliant);
    }

    #[test]
    fn risk_score_weights_critical_high_medium() {
        let results = vec![
            fail("a", Category::Discovery, Severity::Critical),
            fail("b", Category::Oauth, Severity::High),
            fail("c", Category::Oidc, Severity::Medium),
        ];
        assert_eq!(summarize(&results).risk_score, 36);
    }

    #[test]
    fn risk_score_caps_at_one_hundred_and_ignores_info() {
        let many: Vec<CheckResult> = (0..6)
            .map(|i| fail(&format!("c{i}"), Category::Nist, Severity::Critical))
            .collect();
        assert_eq!(summarize(&many).risk_score, 100);

        let info = vec![warn("i", Category::Oidc, Severity::Info)];
        let summary = summarize(&info);
        assert_eq!(summary.risk_score, 0);
        assert_eq!(summary.severity_count(Severity::Info), 1);
    }

    #[test]
    fn warnings_count_toward_severity_and_risk() {
        let results = vec![warn("a", Category::Oauth, Severity::High)];
        let summary = summarize(&results);
        assert_eq!(summary.severity_count(Severity::High), 1);
        assert_eq!(summary.risk_score, 10);
    }

    #[test]
    fn compliance_excludes_skipped_and_errors() {
        let results = vec![
            pass("a", Category::Oauth),
            fail("b", Category::Oauth, Severity::Low),
            pass("c", Category::Oauth),
            CheckResult::skipped("d", Category::Oauth, "no code flow"),
            CheckResult::error("e", Category::Nist, "boom"),
        ];
        let summary = summarize(&results);
        assert_eq!(summary.total_checks, 5);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.errors, 1);
        // 2 of 3 evaluated, rounded.
        assert_eq!(summary.compliance_percentage, 67);
        assert_eq!(summary.by_category.get(&Category::Oauth), Some(&4));
        assert_eq!(summary.by_category.get(&Category::Nist), Some(&1));
        assert_eq!(summary.by_category.get(&Category::Oidc), None);
    }

    #[test]
    fn compliance_is_zero_when_nothing_was_evaluated() {
        let results = vec![
            CheckResult::skipped("a", Category::Oauth, "n/a"),
            CheckResult::error("b", Category::Oauth, "boom"),
        ];
        assert_eq!(summarize(&results).compliance_percentage, 0);
        assert_eq!(summarize(&[]).compliance_percentage, 0);
    }

    #[test]
    fn by_severity_lists_every_tier() {
        let summary = summarize(&[]);
        assert_eq!(summary.by_severity.len(), Severity::ALL.len());
        assert!(summary.by_severity.values().all(|c| *c == 0));
    }

    #[test]
    fn percentage_rounds_halves_up() {
        assert_eq!(percentage(1, 8), 13); // 12.5
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(3, 3), 100);
        assert_eq!(percentage(0, 0), 0);
    }
}
