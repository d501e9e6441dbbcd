//! DNS resolution prober for subdomain brute force.
//!
//! One A-record lookup per job. Nearly every candidate will not exist;
//! NXDOMAIN is the normal case, not an error.

use crate::engine::{FailureKind, ProbeJob, ProbeOutcome, Prober};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::time::timeout;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::error::ResolveErrorKind;
use trust_dns_resolver::TokioAsyncResolver;

/// Resolves candidate hostnames; the job key and target are both the FQDN.
pub struct DnsProber {
    resolver: TokioAsyncResolver,
}

impl DnsProber {
    /// Build a prober whose resolver is bounded by `lookup_timeout` per
    /// query attempt.
    pub fn new(lookup_timeout: Duration) -> Self {
        let mut opts = ResolverOpts::default();
        opts.timeout = lookup_timeout;
        opts.attempts = 1;

        Self {
            resolver: TokioAsyncResolver::tokio(ResolverConfig::default(), opts),
        }
    }
}

#[async_trait]
impl Prober for DnsProber {
    type Key = String;

    async fn probe(&self, job: &ProbeJob<String>) -> ProbeOutcome<String> {
        // Trailing dot makes the name absolute so the search list is skipped.
        let name = format!("{}.", job.target);

        match timeout(job.timeout, self.resolver.ipv4_lookup(name)).await {
            Ok(Ok(lookup)) => match lookup.iter().next() {
                Some(a) => {
                    let mut payload = BTreeMap::new();
                    payload.insert("ip".to_string(), a.0.to_string());
                    ProbeOutcome::found(job.key.clone(), payload)
                }
                None => ProbeOutcome::missed(job.key.clone(), FailureKind::NxDomain),
            },
            Ok(Err(e)) => {
                let kind = match e.kind() {
                    ResolveErrorKind::NoRecordsFound { .. } => FailureKind::NxDomain,
                    ResolveErrorKind::Timeout => FailureKind::Timeout,
                    _ => FailureKind::Unreachable,
                };
                ProbeOutcome::missed(job.key.clone(), kind)
            }
            Err(_) => ProbeOutcome::missed(job.key.clone(), FailureKind::Timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_nonexistent_name_is_a_silent_miss() {
        let prober = DnsProber::new(Duration::from_secs(2));
        let job = ProbeJob::new(
            "no-such-label.invalid".to_string(),
            "no-such-label.invalid",
            Duration::from_secs(3),
        );

        let outcome = prober.probe(&job).await;
        assert!(!outcome.success);
        assert!(outcome.failure.is_some());
        assert_eq!(outcome.key, "no-such-label.invalid");
    }

    #[tokio::test]
    async fn test_lookup_completes_within_outer_timeout() {
        let prober = DnsProber::new(Duration::from_millis(200));
        let job = ProbeJob::new(
            "host.invalid".to_string(),
            "host.invalid",
            Duration::from_millis(500),
        );

        let start = std::time::Instant::now();
        let _ = prober.probe(&job).await;
        assert!(start.elapsed() < Duration::from_secs(3));
    }
}
