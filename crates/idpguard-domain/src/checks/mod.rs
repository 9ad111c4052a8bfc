use crate::discovery::{DiscoveryOutcome, MetadataSource};
use crate::model::{CapabilityDocument, FieldError};
use idpguard_types::{Category, CheckResult, Severity, ids, lookup_explanation};
use std::collections::BTreeMap;

mod aal2_available;
mod aal3_available;
mod aal_advertised;
mod acr_amr_claims;
mod envelope;
mod pkce;
mod required_endpoints;
mod response_types;
mod token_endpoint_auth;
mod transport_security;


pub use envelope::{Evaluation, discovery_warning};

/// Everything a check may read while it runs.
pub struct AuditContext<'a> {
    pub target: &'a str,
    pub source: &'a dyn MetadataSource,
    /// Parent span for per-check logging. Disabled unless the caller provides one.
    pub span: tracing::Span,
}

impl<'a> AuditContext<'a> {
    pub fn new(target: &'a str, source: &'a dyn MetadataSource) -> Self {
        Self {
            target,
            source,
            span: tracing::Span::none(),
        }
    }

    pub fn with_span(mut self, span: tracing::Span) -> Self {
        self.span = span;
        self
    }
}

/// An evaluation that could not run to completion.
///
/// The orchestrator converts these into `error` results.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("malformed discovery document")]
    MalformedDocument(#[from] FieldError),
}

/// Identity of a registered check. Fixed at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckSpec {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub default_severity: Severity,
    pub description: String,
}

pub trait Check {
    fn spec(&self) -> &CheckSpec;

    fn evaluate(&self, ctx: &AuditContext<'_>) -> Result<CheckResult, CheckError>;
}

impl<C: Check + ?Sized> Check for Box<C> {
    fn spec(&self) -> &CheckSpec {
        (**self).spec()
    }

    fn evaluate(&self, ctx: &AuditContext<'_>) -> Result<CheckResult, CheckError> {
        (**self).evaluate(ctx)
    }
}

/// The closed rule catalogue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rule {
    RequiredEndpoints,
    TransportSecurity,
    ResponseTypes,
    Pkce,
    TokenEndpointAuth,
    AcrAmrClaims,
    AalAdvertised,
    Aal2Available,
    Aal3Available,
}

impl Rule {
    /// Catalogue order; this is also the default execution order.
    pub const ALL: [Rule; 9] = [
        Rule::RequiredEndpoints,
        Rule::TransportSecurity,
        Rule::ResponseTypes,
        Rule::Pkce,
        Rule::TokenEndpointAuth,
        Rule::AcrAmrClaims,
        Rule::AalAdvertised,
        Rule::Aal2Available,
        Rule::Aal3Available,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Rule::RequiredEndpoints => ids::CHECK_OIDC_REQUIRED_ENDPOINTS,
            Rule::TransportSecurity => ids::CHECK_DISCOVERY_TRANSPORT_SECURITY,
            Rule::ResponseTypes => ids::CHECK_OAUTH_RESPONSE_TYPES,
            Rule::Pkce => ids::CHECK_OAUTH_PKCE,
            Rule::TokenEndpointAuth => ids::CHECK_OAUTH_TOKEN_ENDPOINT_AUTH,
            Rule::AcrAmrClaims => ids::CHECK_OIDC_ACR_AMR_CLAIMS,
            Rule::AalAdvertised => ids::CHECK_NIST_AAL_ADVERTISED,
            Rule::Aal2Available => ids::CHECK_NIST_AAL2_AVAILABLE,
            Rule::Aal3Available => ids::CHECK_NIST_AAL3_AVAILABLE,
        }
    }

    pub fn from_id(id: &str) -> Option<Rule> {
        Rule::ALL.into_iter().find(|r| r.id() == id)
    }

    pub fn category(self) -> Category {
        match self {
            Rule::TransportSecurity => Category::Discovery,
            Rule::RequiredEndpoints | Rule::AcrAmrClaims => Category::Oidc,
            Rule::ResponseTypes | Rule::Pkce | Rule::TokenEndpointAuth => Category::Oauth,
            Rule::AalAdvertised | Rule::Aal2Available | Rule::Aal3Available => Category::Nist,
        }
    }

    pub fn default_severity(self) -> Severity {
        match self {
            Rule::TokenEndpointAuth | Rule::AcrAmrClaims | Rule::Aal3Available => Severity::Medium,
            _ => Severity::High,
        }
    }

    fn apply(self, doc: &CapabilityDocument, eval: &mut Evaluation) -> Result<(), CheckError> {
        match self {
            Rule::RequiredEndpoints => required_endpoints::run(doc, eval),
            Rule::TransportSecurity => transport_security::run(doc, eval),
            Rule::ResponseTypes => response_types::run(doc, eval),
            Rule::Pkce => pkce::run(doc, eval),
            Rule::TokenEndpointAuth => token_endpoint_auth::run(doc, eval),
            Rule::AcrAmrClaims => acr_amr_claims::run(doc, eval),
            Rule::AalAdvertised => aal_advertised::run(doc, eval),
            Rule::Aal2Available => aal2_available::run(doc, eval),
            Rule::Aal3Available => aal3_available::run(doc, eval),
        }
    }
}

/// A catalogue rule bound to its registered identity.
#[derive(Clone, Debug)]
pub struct CatalogCheck {
    rule: Rule,
    spec: CheckSpec,
}

impl CatalogCheck {
    pub fn new(rule: Rule) -> Self {
        Self::with_severity(rule, rule.default_severity())
    }

    pub fn with_severity(rule: Rule, default_severity: Severity) -> Self {
        let (name, description) = match lookup_explanation(rule.id()) {
            Some(e) => (e.title.to_string(), e.description.to_string()),
            None => (rule.id().to_string(), String::new()),
        };
        Self {
            rule,
            spec: CheckSpec {
                id: rule.id().to_string(),
                name,
                category: rule.category(),
                default_severity,
                description,
            },
        }
    }

    pub fn rule(&self) -> Rule {
        self.rule
    }
}

impl Check for CatalogCheck {
    fn spec(&self) -> &CheckSpec {
        &self.spec
    }

    fn evaluate(&self, ctx: &AuditContext<'_>) -> Result<CheckResult, CheckError> {
        let document = match ctx.source.discover(ctx.target) {
            DiscoveryOutcome::Found { document, .. } => document,
            failed @ DiscoveryOutcome::Failed { .. } => {
                tracing::debug!(idp = ctx.target, "discovery failed");
                return Ok(discovery_warning(&self.spec, ctx.target, &failed));
            }
        };

        let mut eval = Evaluation::new();
        self.rule.apply(&document, &mut eval)?;
        Ok(eval.into_result(&self.spec))
    }
}

/// Build the full catalogue, applying per-check severity overrides.
pub fn catalogue(severity_overrides: &BTreeMap<String, Severity>) -> Vec<CatalogCheck> {
    Rule::ALL
        .into_iter()
        .map(|rule| match severity_overrides.get(rule.id()) {
            Some(severity) => CatalogCheck::with_severity(rule, *severity),
            None => CatalogCheck::new(rule),
        })
        .collect()
}
