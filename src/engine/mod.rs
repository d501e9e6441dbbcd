//! Concurrent probe engine.
//!
//! Every reconnaissance module in wraith boils down to the same shape of
//! work: issue many independent, failure-prone network probes with bounded
//! parallelism and a per-probe timeout, then fold the outcomes into one
//! deterministic report. This module provides that machinery once:
//!
//! - [`ProbeJob`] / [`ProbeOutcome`] - the unit of work and its result
//! - [`Prober`] - the trait a concrete probe kind implements
//! - [`pool::run_probes`] - the bounded worker pool
//! - [`aggregate`] - dedup, merge, and ordering of results

pub mod aggregate;
pub mod pool;

use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

pub use aggregate::{AggregateReport, Aggregator, FoundEntry};
pub use pool::{run_probes, ProgressFn};

/// One unit of probe work, described but not yet executed.
///
/// `key` is the caller-defined dedupe and sort identity: a [`crate::types::Port`]
/// for port scans, a fully-qualified hostname for subdomain scans, a platform
/// name for profile checks. Jobs are immutable and consumed exactly once.
#[derive(Debug, Clone)]
pub struct ProbeJob<K> {
    pub key: K,
    pub target: String,
    pub timeout: Duration,
}

impl<K> ProbeJob<K> {
    pub fn new(key: K, target: impl Into<String>, timeout: Duration) -> Self {
        Self {
            key,
            target: target.into(),
            timeout,
        }
    }
}

/// Why a probe did not find anything.
///
/// These are expected, per-job conditions. They are captured as data on the
/// failed outcome and counted in aggregate; they are never logged
/// individually, never retried, and never abort a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    /// Host or network unreachable, or any other OS-level connect error.
    Unreachable,
    /// Connection actively refused (RST).
    Refused,
    /// The probe exceeded its allotted time.
    Timeout,
    /// DNS returned no records for the name.
    NxDomain,
    /// HTTP endpoint answered with a non-200 status.
    #[serde(rename = "http-status")]
    HttpStatus(u16),
    /// HTTP transport failure before any status was received.
    Transport,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreachable => write!(f, "unreachable"),
            Self::Refused => write!(f, "refused"),
            Self::Timeout => write!(f, "timeout"),
            Self::NxDomain => write!(f, "nxdomain"),
            Self::HttpStatus(code) => write!(f, "http {}", code),
            Self::Transport => write!(f, "transport error"),
        }
    }
}

/// The result of executing exactly one [`ProbeJob`].
///
/// Immutable once created. The payload holds display fields specific to the
/// probe kind, e.g. `{"service": "SSH", "banner": "..."}` for a port probe or
/// `{"ip": "1.2.3.4"}` for a DNS probe.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeOutcome<K> {
    pub key: K,
    pub success: bool,
    pub payload: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
}

impl<K> ProbeOutcome<K> {
    /// A successful probe with its payload fields.
    pub fn found(key: K, payload: BTreeMap<String, String>) -> Self {
        Self {
            key,
            success: true,
            payload,
            failure: None,
        }
    }

    /// An expected failure, classified by kind.
    pub fn missed(key: K, kind: FailureKind) -> Self {
        Self {
            key,
            success: false,
            payload: BTreeMap::new(),
            failure: Some(kind),
        }
    }
}

/// A probe executor: performs one bounded network operation per job.
///
/// Implementations hold only immutable configuration (target address,
/// resolver handle, HTTP client) and retain no state between invocations, so
/// a single instance is shared across all workers behind an `Arc`.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Dedupe/sort identity produced by this probe kind.
    type Key: Ord + Clone + Send + Sync + 'static;

    /// Execute one probe. Expected network failures are returned as failed
    /// outcomes, never as errors; the job's timeout bounds the whole call.
    async fn probe(&self, job: &ProbeJob<Self::Key>) -> ProbeOutcome<Self::Key>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_kind_display() {
        assert_eq!(FailureKind::Unreachable.to_string(), "unreachable");
        assert_eq!(FailureKind::NxDomain.to_string(), "nxdomain");
        assert_eq!(FailureKind::HttpStatus(404).to_string(), "http 404");
    }

    #[test]
    fn test_outcome_constructors() {
        let mut payload = BTreeMap::new();
        payload.insert("ip".to_string(), "10.0.0.1".to_string());

        let hit = ProbeOutcome::found("www.example.test".to_string(), payload);
        assert!(hit.success);
        assert!(hit.failure.is_none());

        let miss = ProbeOutcome::missed("admin.example.test".to_string(), FailureKind::NxDomain);
        assert!(!miss.success);
        assert_eq!(miss.failure, Some(FailureKind::NxDomain));
        assert!(miss.payload.is_empty());
    }
}
