//! Scan target resolution.
//!
//! A port scan accepts either a literal IP address or a hostname; hostnames
//! are resolved once, up front, so the probe engine only ever sees an
//! address.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

/// A scan target that has been resolved to an IP address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScanTarget {
    /// The original input (hostname or IP string).
    pub original: String,
    /// The resolved IP address.
    pub ip: IpAddr,
}

impl ScanTarget {
    pub fn new(original: impl Into<String>, ip: IpAddr) -> Self {
        Self {
            original: original.into(),
            ip,
        }
    }

    /// Parse or resolve a raw target string.
    ///
    /// Literal addresses skip DNS entirely; anything else goes through the
    /// system resolver and keeps the first returned address.
    pub async fn resolve(input: &str) -> Result<Self, TargetError> {
        let input = input.trim();

        if let Ok(ip) = input.parse::<IpAddr>() {
            return Ok(Self::new(input, ip));
        }

        let resolver =
            TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default());

        let response = resolver
            .lookup_ip(input)
            .await
            .map_err(|e| TargetError::ResolutionFailed(input.to_string(), e.to_string()))?;

        let ip = response
            .iter()
            .next()
            .ok_or_else(|| TargetError::NoAddresses(input.to_string()))?;

        Ok(Self::new(input, ip))
    }
}

impl fmt::Display for ScanTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.original == self.ip.to_string() {
            write!(f, "{}", self.ip)
        } else {
            write!(f, "{} ({})", self.original, self.ip)
        }
    }
}

/// Error type for target resolution.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TargetError {
    #[error("failed to resolve '{0}': {1}")]
    ResolutionFailed(String, String),
    #[error("no IP addresses found for '{0}'")]
    NoAddresses(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[tokio::test]
    async fn test_literal_ip_skips_dns() {
        let target = ScanTarget::resolve("127.0.0.1").await.unwrap();
        assert_eq!(target.ip, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(target.original, "127.0.0.1");
    }

    #[tokio::test]
    async fn test_literal_ipv6() {
        let target = ScanTarget::resolve("::1").await.unwrap();
        assert!(target.ip.is_ipv6());
    }

    #[test]
    fn test_display_hides_redundant_ip() {
        let t = ScanTarget::new("127.0.0.1", IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(t.to_string(), "127.0.0.1");

        let t = ScanTarget::new("localhost", IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(t.to_string(), "localhost (127.0.0.1)");
    }
}
