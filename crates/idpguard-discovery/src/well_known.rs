use crate::fetch::{HttpFetch, HttpResponse};
use idpguard_domain::discovery::{DiscoveryAttempt, DiscoveryOutcome, MetadataSource};
use idpguard_domain::model::CapabilityDocument;
use tracing::{debug, warn};

/// OpenID Connect Discovery 1.0.
pub const OPENID_CONFIGURATION_PATH: &str = "/.well-known/openid-configuration";
/// RFC 8414 authorization server metadata.
pub const OAUTH_SERVER_METADATA_PATH: &str = "/.well-known/oauth-authorization-server";

/// Status recorded for an attempt that never got a response.
const NO_RESPONSE: u16 = 0;

/// `idp.example.com/` becomes `https://idp.example.com`.
pub fn normalize_target(target: &str) -> String {
    let target = target.trim();
    let with_scheme = if target.contains("://") {
        target.to_string()
    } else {
        format!("https://{target}")
    };
    with_scheme.trim_end_matches('/').to_string()
}

/// Locations tried for a normalized base URL, in order.
pub fn well_known_urls(base: &str) -> [String; 2] {
    [
        format!("{base}{OPENID_CONFIGURATION_PATH}"),
        format!("{base}{OAUTH_SERVER_METADATA_PATH}"),
    ]
}

/// [`MetadataSource`] that probes the standard well-known locations.
pub struct WellKnownSource<F> {
    fetcher: F,
}

impl<F: HttpFetch> WellKnownSource<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }
}

fn parse_document(response: &HttpResponse) -> Option<CapabilityDocument> {
    if !response.is_success() {
        return None;
    }
    serde_json::from_str::<serde_json::Value>(&response.body)
        .ok()
        .and_then(CapabilityDocument::from_json)
}

impl<F: HttpFetch> MetadataSource for WellKnownSource<F> {
    fn discover(&self, target: &str) -> DiscoveryOutcome {
        let base = normalize_target(target);
        let mut attempts = Vec::new();

        for url in well_known_urls(&base) {
            let response = match self.fetcher.get(&url) {
                Ok(response) => response,
                Err(err) => {
                    warn!(url = %url, error = %err, "discovery request failed");
                    attempts.push(DiscoveryAttempt::new(url, NO_RESPONSE, false));
                    return DiscoveryOutcome::Failed {
                        attempts,
                        error: Some(err.to_string()),
                    };
                }
            };

            let document = parse_document(&response);
            debug!(
                url = %url,
                status = response.status,
                parsed = document.is_some(),
                "discovery attempt"
            );
            attempts.push(DiscoveryAttempt::new(url, response.status, document.is_some()));

            if let Some(document) = document {
                return DiscoveryOutcome::Found {
                    document,
                    attempts,
                };
            }
        }

        DiscoveryOutcome::Failed {
            attempts,
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_adds_scheme_and_trims_slashes() {
        assert_eq!(normalize_target("idp.example.com"), "https://idp.example.com");
        assert_eq!(normalize_target("https://idp.example.com/"), "https://idp.example.com");
        assert_eq!(
            normalize_target("  http://localhost:8080/realms/main// "),
            "http://localhost:8080/realms/main"
        );
    }

    #[test]
    fn well_known_urls_keep_tenant_paths() {
        let [oidc, oauth] = well_known_urls("https://login.example.com/tenant");
        assert_eq!(
            oidc,
            "https://login.example.com/tenant/.well-known/openid-configuration"
        );
        assert_eq!(
            oauth,
            "https://login.example.com/tenant/.well-known/oauth-authorization-server"
        );
    }

    #[test]
    fn only_success_with_json_object_parses() {
        assert!(parse_document(&HttpResponse::new(200, r#"{"issuer":"x"}"#)).is_some());
        assert!(parse_document(&HttpResponse::new(200, "[1,2]")).is_none());
        assert!(parse_document(&HttpResponse::new(200, "<html>")).is_none());
        assert!(parse_document(&HttpResponse::new(500, r#"{"issuer":"x"}"#)).is_none());
    }
}
