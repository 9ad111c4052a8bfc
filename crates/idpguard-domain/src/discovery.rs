//! Contract for the collaborator that fetches capability documents.
//!
//! Discovery failure is a value, not an error: checks turn it into a `warning`.

use crate::model::CapabilityDocument;
use serde_json::{Value, json};

/// One request made while looking for the discovery document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscoveryAttempt {
    pub url: String,
    pub status: u16,
    pub success: bool,
}

impl DiscoveryAttempt {
    pub fn new(url: impl Into<String>, status: u16, success: bool) -> Self {
        Self {
            url: url.into(),
            status,
            success,
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "url": self.url,
            "status": self.status,
            "success": self.success,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DiscoveryOutcome {
    Found {
        document: CapabilityDocument,
        attempts: Vec<DiscoveryAttempt>,
    },
    /// Every well-known location failed, or the transport gave up.
    ///
    /// `attempts` holds whatever was recorded before giving up.
    Failed {
        attempts: Vec<DiscoveryAttempt>,
        error: Option<String>,
    },
}

impl DiscoveryOutcome {
    pub fn attempts(&self) -> &[DiscoveryAttempt] {
        match self {
            DiscoveryOutcome::Found { attempts, .. } | DiscoveryOutcome::Failed { attempts, .. } => {
                attempts
            }
        }
    }

    pub fn attempts_json(&self) -> Value {
        Value::Array(self.attempts().iter().map(DiscoveryAttempt::to_json).collect())
    }
}

/// Supplies capability documents for a target.
///
/// Called once per check; implementations must not assume caching by the caller.
pub trait MetadataSource {
    fn discover(&self, target: &str) -> DiscoveryOutcome;
}

impl<T: MetadataSource + ?Sized> MetadataSource for &T {
    fn discover(&self, target: &str) -> DiscoveryOutcome {
        (**self).discover(target)
    }
}
