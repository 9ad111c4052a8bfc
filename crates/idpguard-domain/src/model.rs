use serde_json::{Map, Value};

/// Provider capability document (the parsed well-known discovery JSON).
///
/// Unknown fields are kept but only read through the typed accessors below.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CapabilityDocument {
    fields: Map<String, Value>,
}

/// A known field is present but has the wrong JSON type.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("field `{field}` must be {expected}")]
pub struct FieldError {
    pub field: String,
    pub expected: &'static str,
}

impl FieldError {
    fn new(field: &str, expected: &'static str) -> Self {
        Self {
            field: field.to_string(),
            expected,
        }
    }
}

/// Fields whose value is an endpoint URL the provider serves.
pub const URL_FIELDS: &[&str] = &[
    "issuer",
    "authorization_endpoint",
    "token_endpoint",
    "userinfo_endpoint",
    "jwks_uri",
    "registration_endpoint",
    "revocation_endpoint",
    "introspection_endpoint",
    "end_session_endpoint",
    "device_authorization_endpoint",
    "pushed_authorization_request_endpoint",
];

impl CapabilityDocument {
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Returns `None` unless `value` is a JSON object.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// `null` is treated as absent.
    pub fn string(&self, key: &str) -> Result<Option<&str>, FieldError> {
        match self.fields.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(FieldError::new(key, "a string")),
        }
    }

    pub fn string_list(&self, key: &str) -> Result<Option<Vec<&str>>, FieldError> {
        match self.fields.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Array(items)) => items
                .iter()
                .map(|v| v.as_str().ok_or_else(|| FieldError::new(key, "an array of strings")))
                .collect::<Result<Vec<_>, _>>()
                .map(Some),
            Some(_) => Err(FieldError::new(key, "an array of strings")),
        }
    }

    pub fn issuer(&self) -> Result<Option<&str>, FieldError> {
        self.string("issuer")
    }

    pub fn authorization_endpoint(&self) -> Result<Option<&str>, FieldError> {
        self.string("authorization_endpoint")
    }

    pub fn token_endpoint(&self) -> Result<Option<&str>, FieldError> {
        self.string("token_endpoint")
    }

    pub fn jwks_uri(&self) -> Result<Option<&str>, FieldError> {
        self.string("jwks_uri")
    }

    pub fn userinfo_endpoint(&self) -> Result<Option<&str>, FieldError> {
        self.string("userinfo_endpoint")
    }

    pub fn acr_values_supported(&self) -> Result<Option<Vec<&str>>, FieldError> {
        self.string_list("acr_values_supported")
    }

    pub fn claims_supported(&self) -> Result<Option<Vec<&str>>, FieldError> {
        self.string_list("claims_supported")
    }

    pub fn response_types_supported(&self) -> Result<Option<Vec<&str>>, FieldError> {
        self.string_list("response_types_supported")
    }

    pub fn code_challenge_methods_supported(&self) -> Result<Option<Vec<&str>>, FieldError> {
        self.string_list("code_challenge_methods_supported")
    }

    pub fn token_endpoint_auth_methods_supported(&self) -> Result<Option<Vec<&str>>, FieldError> {
        self.string_list("token_endpoint_auth_methods_supported")
    }

    pub fn advertises_claim(&self, claim: &str) -> Result<bool, FieldError> {
        Ok(self
            .claims_supported()?
            .is_some_and(|claims| claims.contains(&claim)))
    }

    /// Every advertised URL-valued field from [`URL_FIELDS`], in table order.
    pub fn endpoint_urls(&self) -> Result<Vec<(&'static str, &str)>, FieldError> {
        let mut out = Vec::new();
        for field in URL_FIELDS {
            if let Some(url) = self.string(field)? {
                out.push((*field, url));
            }
        }
        Ok(out)
    }
}
