//! Heuristic mapping of ACR tokens onto NIST 800-63B authenticator assurance levels.
//!
//! Classification is a pure function of the token *set*: token order and
//! duplicates never change the outcome.

use serde_json::{Value, json};
use std::collections::BTreeSet;
use std::fmt;

/// Authenticator assurance level. Ordered `Aal1 < Aal2 < Aal3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AalLevel {
    Aal1,
    Aal2,
    Aal3,
}

impl AalLevel {
    pub fn number(self) -> u8 {
        match self {
            AalLevel::Aal1 => 1,
            AalLevel::Aal2 => 2,
            AalLevel::Aal3 => 3,
        }
    }
}

impl fmt::Display for AalLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AAL{}", self.number())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn as_str(self) -> &'static str {
        match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        }
    }
}

/// Whether the provider advertises the claims that carry assurance information.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClaimSupport {
    pub acr: bool,
    pub amr: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassificationOutcome {
    pub detected_levels: BTreeSet<AalLevel>,
    pub confidence: Confidence,
    /// Tokens no pattern group recognized, trimmed, deduplicated and sorted.
    pub unmapped_tokens: Vec<String>,
    pub can_determine: bool,
    pub claims: ClaimSupport,
}

impl ClassificationOutcome {
    pub fn highest_level(&self) -> Option<AalLevel> {
        self.detected_levels.last().copied()
    }

    pub fn to_json(&self) -> Value {
        json!({
            "detected_levels": self.detected_levels.iter().map(|l| l.number()).collect::<Vec<_>>(),
            "highest_level": self.highest_level().map(AalLevel::number),
            "confidence": self.confidence.as_str(),
            "unmapped_tokens": self.unmapped_tokens,
            "can_determine": self.can_determine,
            "acr_claim_supported": self.claims.acr,
            "amr_claim_supported": self.claims.amr,
        })
    }
}

struct PatternGroup {
    level: AalLevel,
    /// Whole-token matches.
    exact: &'static [&'static str],
    /// Substring matches.
    fragments: &'static [&'static str],
}

impl PatternGroup {
    fn matches(&self, token: &str) -> bool {
        self.exact.contains(&token) || self.fragments.iter().any(|f| token.contains(f))
    }
}

/// Highest assurance first; the first matching group claims the token.
const PATTERN_GROUPS: [PatternGroup; 3] = [
    PatternGroup {
        level: AalLevel::Aal3,
        exact: &[
            "urn:nist:800-63-3:aal:3",
            "http://idmanagement.gov/ns/assurance/aal/3",
            "https://idmanagement.gov/ns/assurance/aal/3",
            "aal3",
            "phrh",
            "urn:okta:loa:2fa:any:phrh",
            "http://schemas.openid.net/pape/policies/2007/06/multi-factor-physical",
        ],
        fragments: &["aal:3", "aal/3", "hardware-key", "hwk"],
    },
    PatternGroup {
        level: AalLevel::Aal2,
        exact: &[
            "urn:nist:800-63-3:aal:2",
            "http://idmanagement.gov/ns/assurance/aal/2",
            "https://idmanagement.gov/ns/assurance/aal/2",
            "aal2",
            "phr",
            "mfa",
            "urn:okta:loa:2fa:any",
            "urn:okta:loa:2fa:any:ifpossible",
            "http://schemas.openid.net/pape/policies/2007/06/multi-factor",
        ],
        fragments: &["aal:2", "aal/2", "multi-factor", "2fa", "mfa"],
    },
    PatternGroup {
        level: AalLevel::Aal1,
        exact: &[
            "urn:nist:800-63-3:aal:1",
            "http://idmanagement.gov/ns/assurance/aal/1",
            "https://idmanagement.gov/ns/assurance/aal/1",
            "aal1",
            "pwd",
            "password",
            "urn:okta:loa:1fa:any",
            "urn:okta:loa:1fa:pwd",
            "urn:mace:incommon:iap:silver",
            "urn:mace:incommon:iap:bronze",
        ],
        fragments: &["aal:1", "aal/1", "1fa", "single-factor"],
    },
];

/// Level claimed by a single token, if any.
pub fn classify_token(token: &str) -> Option<AalLevel> {
    let normalized = token.trim().to_lowercase();
    PATTERN_GROUPS
        .iter()
        .find(|group| group.matches(&normalized))
        .map(|group| group.level)
}

/// Classify a token list. `None` and an empty list are equivalent.
pub fn classify<S: AsRef<str>>(tokens: Option<&[S]>, claims: ClaimSupport) -> ClassificationOutcome {
    let tokens = tokens.unwrap_or_default();
    if tokens.is_empty() {
        return ClassificationOutcome {
            detected_levels: BTreeSet::new(),
            confidence: Confidence::Low,
            unmapped_tokens: Vec::new(),
            can_determine: false,
            claims,
        };
    }

    let mut detected_levels = BTreeSet::new();
    let mut unmapped = BTreeSet::new();
    for token in tokens {
        let token = token.as_ref();
        match classify_token(token) {
            Some(level) => {
                detected_levels.insert(level);
            }
            None => {
                unmapped.insert(token.trim().to_string());
            }
        }
    }

    let confidence = match (detected_levels.is_empty(), unmapped.is_empty()) {
        (true, _) => Confidence::Low,
        (false, true) => Confidence::High,
        (false, false) => Confidence::Medium,
    };

    ClassificationOutcome {
        can_determine: !detected_levels.is_empty(),
        detected_levels,
        confidence,
        unmapped_tokens: unmapped.into_iter().collect(),
        claims,
    }
}
