//! Shared test utilities for the idpguard workspace.
//!
//! Lives outside `#[cfg(test)]` so that integration tests in several crates can
//! share the same fixtures and normalization.

use idpguard_discovery::{HttpFetch, HttpResponse, TransportError};
use idpguard_domain::discovery::{DiscoveryAttempt, DiscoveryOutcome, MetadataSource};
use idpguard_domain::model::CapabilityDocument;
use serde_json::{Value, json};
use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};

/// Normalize non-deterministic JSON fields for golden comparison.
///
/// `metadata.tool.version` is replaced only on a report envelope root.
/// Timestamp keys and `duration_ms` are replaced at any depth.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_envelope = obj.contains_key("schema")
            && obj.contains_key("metadata")
            && obj.contains_key("summary")
            && obj.contains_key("results");
        if is_envelope
            && let Some(tool) = obj.get_mut("metadata").and_then(|m| m.get_mut("tool"))
            && let Some(tool_obj) = tool.as_object_mut()
            && tool_obj.contains_key("version")
        {
            tool_obj.insert(
                "version".to_string(),
                Value::String("__VERSION__".to_string()),
            );
        }
    }
    normalize_timestamps_recursive(&mut value);
    value
}

const TIMESTAMP_KEYS: [&str; 3] = ["started_at", "ended_at", "timestamp"];

fn normalize_timestamps_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in TIMESTAMP_KEYS {
                if map.contains_key(key) {
                    map.insert(key.to_string(), Value::String("__TIMESTAMP__".to_string()));
                }
            }
            if map.contains_key("duration_ms") {
                map.insert("duration_ms".to_string(), Value::Number(0.into()));
            }
            for val in map.values_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        _ => {}
    }
}

/// A discovery document that satisfies every catalogue rule.
pub fn compliant_document() -> Value {
    json!({
        "issuer": "https://idp.example.com",
        "authorization_endpoint": "https://idp.example.com/oauth2/authorize",
        "token_endpoint": "https://idp.example.com/oauth2/token",
        "userinfo_endpoint": "https://idp.example.com/oauth2/userinfo",
        "jwks_uri": "https://idp.example.com/oauth2/keys",
        "response_types_supported": ["code"],
        "code_challenge_methods_supported": ["S256"],
        "token_endpoint_auth_methods_supported": ["private_key_jwt"],
        "claims_supported": ["sub", "acr", "amr", "auth_time"],
        "acr_values_supported": [
            "urn:nist:800-63-3:aal:1",
            "urn:nist:800-63-3:aal:2",
            "urn:nist:800-63-3:aal:3"
        ]
    })
}

/// A password-only provider using implicit flow over plain HTTP.
pub fn legacy_document() -> Value {
    json!({
        "issuer": "http://legacy.example.com",
        "authorization_endpoint": "http://legacy.example.com/authorize",
        "token_endpoint": "http://legacy.example.com/token",
        "response_types_supported": ["token", "id_token token"],
        "token_endpoint_auth_methods_supported": ["none"],
        "claims_supported": ["sub"],
        "acr_values_supported": ["pwd"]
    })
}

/// Outcome with both well-known locations answering 404.
pub fn not_found_outcome(base: &str) -> DiscoveryOutcome {
    DiscoveryOutcome::Failed {
        attempts: vec![
            DiscoveryAttempt::new(format!("{base}/.well-known/openid-configuration"), 404, false),
            DiscoveryAttempt::new(
                format!("{base}/.well-known/oauth-authorization-server"),
                404,
                false,
            ),
        ],
        error: None,
    }
}

/// Plays back queued outcomes in order, then repeats the last one.
pub struct ScriptedSource {
    script: RefCell<VecDeque<DiscoveryOutcome>>,
    last: RefCell<Option<DiscoveryOutcome>>,
    targets: RefCell<Vec<String>>,
}

impl ScriptedSource {
    pub fn new(script: impl IntoIterator<Item = DiscoveryOutcome>) -> Self {
        Self {
            script: RefCell::new(script.into_iter().collect()),
            last: RefCell::new(None),
            targets: RefCell::new(Vec::new()),
        }
    }

    /// Every call finds `document`.
    pub fn serving(document: Value) -> Self {
        let document =
            CapabilityDocument::from_json(document).expect("fixture document must be an object");
        Self::new([DiscoveryOutcome::Found {
            document,
            attempts: vec![DiscoveryAttempt::new(
                "https://idp.example.com/.well-known/openid-configuration",
                200,
                true,
            )],
        }])
    }

    /// Targets passed to `discover`, one per call.
    pub fn targets(&self) -> Vec<String> {
        self.targets.borrow().clone()
    }
}

impl MetadataSource for ScriptedSource {
    fn discover(&self, target: &str) -> DiscoveryOutcome {
        self.targets.borrow_mut().push(target.to_string());
        let next = self.script.borrow_mut().pop_front();
        match next {
            Some(outcome) => {
                *self.last.borrow_mut() = Some(outcome.clone());
                outcome
            }
            None => self.last.borrow().clone().unwrap_or(DiscoveryOutcome::Failed {
                attempts: Vec::new(),
                error: Some("script exhausted".to_string()),
            }),
        }
    }
}

/// [`HttpFetch`] answering from a URL table; unknown URLs get 404.
#[derive(Default)]
pub struct ScriptedFetch {
    answers: BTreeMap<String, HttpResponse>,
    requested: RefCell<Vec<String>>,
}

impl ScriptedFetch {
    pub fn with(mut self, url: &str, status: u16, body: impl Into<String>) -> Self {
        self.answers
            .insert(url.to_string(), HttpResponse::new(status, body));
        self
    }

    pub fn with_json(self, url: &str, document: &Value) -> Self {
        self.with(url, 200, document.to_string())
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.borrow().clone()
    }
}

impl HttpFetch for ScriptedFetch {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        self.requested.borrow_mut().push(url.to_string());
        Ok(self
            .answers
            .get(url)
            .cloned()
            .unwrap_or_else(|| HttpResponse::new(404, "")))
    }
}
