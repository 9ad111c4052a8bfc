//! Explain registry for checks.
//!
//! Maps check IDs to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a check.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short name of the check.
    pub title: &'static str,
    /// What the check does and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Standards the rule is derived from.
    pub references: &'static [&'static str],
    /// Before/after discovery document excerpts.
    pub examples: ExamplePair,
}

/// Before and after discovery document excerpts.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Excerpt that would trigger a finding.
    pub before: &'static str,
    /// Excerpt that passes the check.
    pub after: &'static str,
}

/// Look up an explanation by check_id.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        ids::CHECK_OIDC_REQUIRED_ENDPOINTS => Some(explain_required_endpoints()),
        ids::CHECK_DISCOVERY_TRANSPORT_SECURITY => Some(explain_transport_security()),
        ids::CHECK_OAUTH_RESPONSE_TYPES => Some(explain_response_types()),
        ids::CHECK_OAUTH_PKCE => Some(explain_pkce()),
        ids::CHECK_OAUTH_TOKEN_ENDPOINT_AUTH => Some(explain_token_endpoint_auth()),
        ids::CHECK_OIDC_ACR_AMR_CLAIMS => Some(explain_acr_amr_claims()),
        ids::CHECK_NIST_AAL_ADVERTISED => Some(explain_aal_advertised()),
        ids::CHECK_NIST_AAL2_AVAILABLE => Some(explain_aal2_available()),
        ids::CHECK_NIST_AAL3_AVAILABLE => Some(explain_aal3_available()),
        _ => None,
    }
}

/// List all known check IDs, in catalogue order.
pub fn all_check_ids() -> &'static [&'static str] {
    &[
        ids::CHECK_OIDC_REQUIRED_ENDPOINTS,
        ids::CHECK_DISCOVERY_TRANSPORT_SECURITY,
        ids::CHECK_OAUTH_RESPONSE_TYPES,
        ids::CHECK_OAUTH_PKCE,
        ids::CHECK_OAUTH_TOKEN_ENDPOINT_AUTH,
        ids::CHECK_OIDC_ACR_AMR_CLAIMS,
        ids::CHECK_NIST_AAL_ADVERTISED,
        ids::CHECK_NIST_AAL2_AVAILABLE,
        ids::CHECK_NIST_AAL3_AVAILABLE,
    ]
}

fn explain_required_endpoints() -> Explanation {
    Explanation {
        title: "Required Discovery Endpoints",
        description: "\
Verifies the discovery document advertises the metadata every relying party needs:
`issuer`, `authorization_endpoint`, `token_endpoint` and `jwks_uri`.

Clients that cannot find these values fall back to hard-coded configuration,
which drifts from the provider and breaks key rotation.",
        remediation: "\
Publish all REQUIRED provider metadata fields. Advertise `userinfo_endpoint`
as well unless the provider deliberately exposes claims only in ID tokens.",
        references: &["OpenID Connect Discovery 1.0 §3"],
        examples: ExamplePair {
            before: r#"{ "issuer": "https://idp.example.com" }"#,
            after: r#"{
  "issuer": "https://idp.example.com",
  "authorization_endpoint": "https://idp.example.com/authorize",
  "token_endpoint": "https://idp.example.com/token",
  "jwks_uri": "https://idp.example.com/jwks"
}"#,
        },
    }
}

fn explain_transport_security() -> Explanation {
    Explanation {
        title: "Endpoints Use TLS",
        description: "\
Detects endpoint URLs in the discovery document that do not use `https://`.

Authorization codes, tokens and signing keys travel over these endpoints; any
plaintext hop exposes them to interception.",
        remediation: "\
Serve every advertised endpoint over HTTPS and update the discovery document
to reference the `https://` URLs.",
        references: &["RFC 6749 §3.1", "RFC 8414 §2"],
        examples: ExamplePair {
            before: r#"{ "token_endpoint": "http://idp.example.com/token" }"#,
            after: r#"{ "token_endpoint": "https://idp.example.com/token" }"#,
        },
    }
}

fn explain_response_types() -> Explanation {
    Explanation {
        title: "Authorization Code Flow",
        description: "\
Verifies `response_types_supported` includes `code` and flags implicit-flow
response types (`token`, `id_token token`).

The implicit flow returns access tokens in the front channel and is
deprecated by the OAuth 2.0 Security Best Current Practice.",
        remediation: "\
Support the authorization code flow and stop advertising response types that
return access tokens from the authorization endpoint.",
        references: &["RFC 9700 §2.1.2", "OpenID Connect Core 1.0 §3"],
        examples: ExamplePair {
            before: r#"{ "response_types_supported": ["token", "id_token token"] }"#,
            after: r#"{ "response_types_supported": ["code"] }"#,
        },
    }
}

fn explain_pkce() -> Explanation {
    Explanation {
        title: "PKCE With S256",
        description: "\
Verifies `code_challenge_methods_supported` includes `S256` when the
authorization code flow is offered.

Without PKCE an intercepted authorization code can be redeemed by an attacker.
The `plain` method offers no protection once the challenge is observed.",
        remediation: "\
Enable PKCE, advertise `S256`, and drop `plain` from the supported methods.",
        references: &["RFC 7636 §4.2", "RFC 9700 §2.1.1"],
        examples: ExamplePair {
            before: r#"{ "code_challenge_methods_supported": ["plain"] }"#,
            after: r#"{ "code_challenge_methods_supported": ["S256"] }"#,
        },
    }
}

fn explain_token_endpoint_auth() -> Explanation {
    Explanation {
        title: "Token Endpoint Client Authentication",
        description: "\
Inspects `token_endpoint_auth_methods_supported`.

A provider that only accepts `none` cannot authenticate confidential clients at
all. Shared-secret methods are acceptable but asymmetric methods
(`private_key_jwt`, mutual TLS) avoid distributing long-lived secrets.",
        remediation: "\
Accept at least one authenticated method, preferably `private_key_jwt` or
`tls_client_auth`.",
        references: &["RFC 8414 §2", "RFC 8705", "RFC 7523"],
        examples: ExamplePair {
            before: r#"{ "token_endpoint_auth_methods_supported": ["none"] }"#,
            after: r#"{ "token_endpoint_auth_methods_supported": ["private_key_jwt", "client_secret_basic"] }"#,
        },
    }
}

fn explain_acr_amr_claims() -> Explanation {
    Explanation {
        title: "ACR and AMR Claims",
        description: "\
Verifies `claims_supported` advertises `acr` and `amr`.

Relying parties cannot confirm the assurance level of a login unless the
provider returns the authentication context (`acr`) and, ideally, the methods
used (`amr`).",
        remediation: "\
Emit `acr` in ID tokens and list it in `claims_supported`. Add `amr` so relying
parties can audit which authenticators were used.",
        references: &["OpenID Connect Core 1.0 §2", "RFC 8176"],
        examples: ExamplePair {
            before: r#"{ "claims_supported": ["sub", "email"] }"#,
            after: r#"{ "claims_supported": ["sub", "email", "acr", "amr"] }"#,
        },
    }
}

fn explain_aal_advertised() -> Explanation {
    Explanation {
        title: "Recognizable Assurance Levels",
        description: "\
Classifies `acr_values_supported` into NIST 800-63B authenticator assurance
levels. Fails when no value maps to a known level.

Values that cannot be classified are listed so an operator can map them
manually.",
        remediation: "\
Advertise standard ACR values such as `urn:nist:800-63-3:aal:2`, or document
how vendor-specific values map to AAL tiers.",
        references: &["NIST SP 800-63B §4", "NIST SP 800-63C §5.3"],
        examples: ExamplePair {
            before: r#"{ "acr_values_supported": ["custom:level:high"] }"#,
            after: r#"{ "acr_values_supported": ["urn:nist:800-63-3:aal:1", "urn:nist:800-63-3:aal:2"] }"#,
        },
    }
}

fn explain_aal2_available() -> Explanation {
    Explanation {
        title: "AAL2 Available",
        description: "\
Verifies the provider can authenticate users at AAL2 or above, which NIST
requires for access to personal information.",
        remediation: "\
Enable a multi-factor authentication option and advertise the corresponding
ACR value (for example `urn:nist:800-63-3:aal:2`).",
        references: &["NIST SP 800-63B §4.2"],
        examples: ExamplePair {
            before: r#"{ "acr_values_supported": ["urn:nist:800-63-3:aal:1"] }"#,
            after: r#"{ "acr_values_supported": ["urn:nist:800-63-3:aal:1", "urn:nist:800-63-3:aal:2"] }"#,
        },
    }
}

fn explain_aal3_available() -> Explanation {
    Explanation {
        title: "AAL3 Available",
        description: "\
Checks whether the provider offers hardware-backed, phishing-resistant
authentication at AAL3. Missing AAL3 is advisory.",
        remediation: "\
Offer a hardware cryptographic authenticator and advertise an AAL3 ACR value
(for example `urn:nist:800-63-3:aal:3`).",
        references: &["NIST SP 800-63B §4.3"],
        examples: ExamplePair {
            before: r#"{ "acr_values_supported": ["urn:nist:800-63-3:aal:2"] }"#,
            after: r#"{ "acr_values_supported": ["urn:nist:800-63-3:aal:2", "urn:nist:800-63-3:aal:3"] }"#,
        },
    }
}
