//! Domain name validation and normalization.
//!
//! `Domain` is the base zone a subdomain scan enumerates. Input is
//! normalized the way users actually paste it: scheme and path stripped,
//! lowercased, then validated label by label.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated, normalized DNS zone name such as `example.com`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Domain(String);

impl Domain {
    /// Normalize and validate a raw user input.
    ///
    /// Accepts plain names as well as `https://example.com/path` forms.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let name = input
            .trim()
            .trim_start_matches("http://")
            .trim_start_matches("https://")
            .split('/')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        if !is_valid_domain(&name) {
            return Err(DomainError::Invalid(input.trim().to_string()));
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build a candidate subdomain from a wordlist label.
    pub fn candidate(&self, label: &str) -> String {
        format!("{}.{}", label, self.0)
    }

    /// Whether `name` is this zone or a name inside it.
    pub fn owns(&self, name: &str) -> bool {
        name == self.0 || name.ends_with(&format!(".{}", self.0))
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Domain {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Error type for domain validation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    #[error("invalid domain name: {0}")]
    Invalid(String),
}

/// Validate a dotted domain name: 2+ labels, alphanumeric/hyphen labels of
/// 1-63 characters that start and end alphanumeric, total length <= 253.
fn is_valid_domain(s: &str) -> bool {
    if s.is_empty() || s.len() > 253 || !s.contains('.') {
        return false;
    }

    for label in s.split('.') {
        if label.is_empty() || label.len() > 63 {
            return false;
        }
        if !label.chars().next().is_some_and(|c| c.is_ascii_alphanumeric()) {
            return false;
        }
        if !label.chars().last().is_some_and(|c| c.is_ascii_alphanumeric()) {
            return false;
        }
        if !label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return false;
        }
    }

    true
}
