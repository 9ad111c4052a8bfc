use crate::checks::{AuditContext, Check, CheckError, CheckSpec};
use crate::discovery::{DiscoveryAttempt, DiscoveryOutcome, MetadataSource};
use crate::model::{CapabilityDocument, FieldError};
use idpguard_types::{Category, CheckResult, Severity};
use serde_json::Value;
use std::cell::Cell;

pub fn spec_with(id: &str, category: Category) -> CheckSpec {
    CheckSpec {
        id: id.to_string(),
        name: format!("Check {id}"),
        category,
        default_severity: Severity::High,
        description: String::new(),
    }
}

pub fn doc(value: Value) -> CapabilityDocument {
    CapabilityDocument::from_json(value).expect("test document must be a JSON object")
}

/// A source that returns the same outcome on every call and counts calls.
pub struct StaticSource {
    outcome: DiscoveryOutcome,
    calls: Cell<usize>,
}

impl StaticSource {
    pub fn found(value: Value) -> Self {
        Self::with_outcome(DiscoveryOutcome::Found {
            document: doc(value),
            attempts: vec![DiscoveryAttempt::new(
                "https://idp.example.com/.well-known/openid-configuration",
                200,
                true,
            )],
        })
    }

    /// Both well-known locations answered 404.
    pub fn not_found() -> Self {
        Self::with_outcome(DiscoveryOutcome::Failed {
            attempts: vec![
                DiscoveryAttempt::new(
                    "https://idp.example.com/.well-known/openid-configuration",
                    404,
                    false,
                ),
                DiscoveryAttempt::new(
                    "https://idp.example.com/.well-known/oauth-authorization-server",
                    404,
                    false,
                ),
            ],
            error: None,
        })
    }

    pub fn with_outcome(outcome: DiscoveryOutcome) -> Self {
        Self {
            outcome,
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl MetadataSource for StaticSource {
    fn discover(&self, _target: &str) -> DiscoveryOutcome {
        self.calls.set(self.calls.get() + 1);
        self.outcome.clone()
    }
}

pub fn ctx<'a>(source: &'a dyn MetadataSource) -> AuditContext<'a> {
    AuditContext::new("idp.example.com", source)
}

/// Returns a prepared result without looking at the context.
pub struct FixedCheck {
    spec: CheckSpec,
    result: CheckResult,
}

impl FixedCheck {
    pub fn pass(spec: CheckSpec) -> Self {
        let result = CheckResult::pass(&spec.id, spec.category, "ok");
        Self { spec, result }
    }

    pub fn with_result(spec: CheckSpec, result: CheckResult) -> Self {
        Self { spec, result }
    }
}

impl Check for FixedCheck {
    fn spec(&self) -> &CheckSpec {
        &self.spec
    }

    fn evaluate(&self, _ctx: &AuditContext<'_>) -> Result<CheckResult, CheckError> {
        Ok(self.result.clone())
    }
}

pub struct PanickingCheck(pub CheckSpec);

impl Check for PanickingCheck {
    fn spec(&self) -> &CheckSpec {
        &self.0
    }

    fn evaluate(&self, _ctx: &AuditContext<'_>) -> Result<CheckResult, CheckError> {
        panic!("rule table exploded");
    }
}

pub struct ErroringCheck(pub CheckSpec);

impl Check for ErroringCheck {
    fn spec(&self) -> &CheckSpec {
        &self.0
    }

    fn evaluate(&self, _ctx: &AuditContext<'_>) -> Result<CheckResult, CheckError> {
        Err(CheckError::MalformedDocument(FieldError {
            field: "acr_values_supported".to_string(),
            expected: "an array of strings",
        }))
    }
}
