//! Stable identifiers for checks.
//!
//! `check_id` is a dotted namespace: `<category>.<rule>`.

// Checks: discovery
pub const CHECK_DISCOVERY_TRANSPORT_SECURITY: &str = "discovery.transport_security";

// Checks: oidc
pub const CHECK_OIDC_REQUIRED_ENDPOINTS: &str = "oidc.required_endpoints";
pub const CHECK_OIDC_ACR_AMR_CLAIMS: &str = "oidc.acr_amr_claims";

// Checks: oauth
pub const CHECK_OAUTH_RESPONSE_TYPES: &str = "oauth.response_types";
pub const CHECK_OAUTH_PKCE: &str = "oauth.pkce";
pub const CHECK_OAUTH_TOKEN_ENDPOINT_AUTH: &str = "oauth.token_endpoint_auth";

// Checks: nist
pub const CHECK_NIST_AAL_ADVERTISED: &str = "nist.aal_advertised";
pub const CHECK_NIST_AAL2_AVAILABLE: &str = "nist.aal2_available";
pub const CHECK_NIST_AAL3_AVAILABLE: &str = "nist.aal3_available";

// Metadata keys shared by every check.
pub const META_DISCOVERY_ATTEMPTS: &str = "discovery_attempts";
pub const META_DISCOVERY_ERROR: &str = "discovery_error";
pub const META_CRITICAL_ISSUES: &str = "critical_issues";
pub const META_RECOMMENDATIONS: &str = "recommendations";

// Metadata keys written by the orchestrator for isolated failures.
pub const META_ERROR: &str = "error";
pub const META_ERROR_KIND: &str = "error_kind";
pub const META_ERROR_CHAIN: &str = "error_chain";
