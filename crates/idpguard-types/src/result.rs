use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;
use time::OffsetDateTime;

/// Severity tiers, ordered from least to most severe.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::Info,
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    pub fn parse(v: &str) -> Option<Severity> {
        Severity::ALL.into_iter().find(|s| s.as_str() == v)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pass,
    Fail,
    Warning,
    Skipped,
    Error,
}

impl Status {
    /// Findings are the results an operator has to look at.
    pub fn is_finding(self) -> bool {
        matches!(self, Status::Fail | Status::Warning)
    }
}

/// Rule families. Scorecards are produced per category.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Discovery,
    Oauth,
    Oidc,
    Nist,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Discovery,
        Category::Oauth,
        Category::Oidc,
        Category::Nist,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Discovery => "discovery",
            Category::Oauth => "oauth",
            Category::Oidc => "oidc",
            Category::Nist => "nist",
        }
    }

    pub fn parse(v: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.as_str() == v)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Frozen structured payload attached to a result.
///
/// Only [`MetadataBuilder`] can produce one; there is no mutating accessor.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Metadata(BTreeMap<String, JsonValue>);

impl Metadata {
    pub fn builder() -> MetadataBuilder {
        MetadataBuilder::default()
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &JsonValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Index<&str> for Metadata {
    type Output = JsonValue;

    /// Missing keys index to `Null`, mirroring `serde_json::Value`.
    fn index(&self, key: &str) -> &JsonValue {
        static NULL: JsonValue = JsonValue::Null;
        self.0.get(key).unwrap_or(&NULL)
    }
}

/// Accumulates field/value pairs; later inserts of the same key win.
#[derive(Clone, Debug, Default)]
pub struct MetadataBuilder {
    entries: BTreeMap<String, JsonValue>,
}

impl MetadataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn insert_opt(self, key: impl Into<String>, value: Option<impl Into<JsonValue>>) -> Self {
        match value {
            Some(v) => self.insert(key, v),
            None => self,
        }
    }

    pub fn build(self) -> Metadata {
        Metadata(self.entries)
    }
}

/// Outcome of running a single check.
///
/// Fields are read-only outside this module so that `severity` can only be
/// present on `fail` and `warning` results. Deserialization enforces the same.
#[derive(Clone, Debug, PartialEq, Serialize, JsonSchema)]
pub struct CheckResult {
    id: String,
    category: Category,
    status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    severity: Option<Severity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    remediation: Option<String>,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    metadata: Metadata,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    timestamp: OffsetDateTime,
    duration_ms: u64,
}

/// Wire shape of [`CheckResult`], validated before it becomes one.
#[derive(Deserialize)]
struct RawCheckResult {
    id: String,
    category: Category,
    status: Status,
    #[serde(default)]
    severity: Option<Severity>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    remediation: Option<String>,
    #[serde(default)]
    metadata: Metadata,
    #[serde(with = "time::serde::rfc3339")]
    timestamp: OffsetDateTime,
    duration_ms: u64,
}

impl<'de> Deserialize<'de> for CheckResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawCheckResult::deserialize(deserializer)?;
        match (raw.status.is_finding(), raw.severity) {
            (true, None) => {
                return Err(serde::de::Error::custom(format!(
                    "{}: {:?} result requires a severity",
                    raw.id, raw.status
                )));
            }
            (false, Some(severity)) => {
                return Err(serde::de::Error::custom(format!(
                    "{}: {:?} result cannot carry severity {severity}",
                    raw.id, raw.status
                )));
            }
            _ => {}
        }
        Ok(Self {
            id: raw.id,
            category: raw.category,
            status: raw.status,
            severity: raw.severity,
            message: raw.message,
            remediation: raw.remediation,
            metadata: raw.metadata,
            timestamp: raw.timestamp,
            duration_ms: raw.duration_ms,
        })
    }
}

impl CheckResult {
    fn new(id: &str, category: Category, status: Status, severity: Option<Severity>) -> Self {
        Self {
            id: id.to_string(),
            category,
            status,
            severity,
            message: None,
            remediation: None,
            metadata: Metadata::default(),
            timestamp: OffsetDateTime::now_utc(),
            duration_ms: 0,
        }
    }

    pub fn pass(id: &str, category: Category, message: impl Into<String>) -> Self {
        Self::new(id, category, Status::Pass, None).with_message(message)
    }

    pub fn fail(
        id: &str,
        category: Category,
        severity: Severity,
        message: impl Into<String>,
        remediation: impl Into<String>,
    ) -> Self {
        let mut r = Self::new(id, category, Status::Fail, Some(severity)).with_message(message);
        r.remediation = Some(remediation.into());
        r
    }

    pub fn warning(
        id: &str,
        category: Category,
        severity: Severity,
        message: impl Into<String>,
        remediation: impl Into<String>,
    ) -> Self {
        let mut r = Self::new(id, category, Status::Warning, Some(severity)).with_message(message);
        r.remediation = Some(remediation.into());
        r
    }

    pub fn skipped(id: &str, category: Category, reason: impl Into<String>) -> Self {
        Self::new(id, category, Status::Skipped, None).with_message(reason)
    }

    pub fn error(id: &str, category: Category, message: impl Into<String>) -> Self {
        Self::new(id, category, Status::Error, None).with_message(message)
    }

    fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn severity(&self) -> Option<Severity> {
        self.severity
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn remediation(&self) -> Option<&str> {
        self.remediation.as_deref()
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn timestamp(&self) -> OffsetDateTime {
        self.timestamp
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn is_finding(&self) -> bool {
        self.status.is_finding()
    }
}
