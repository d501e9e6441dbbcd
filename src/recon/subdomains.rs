//! Subdomain discovery orchestration.
//!
//! Two phases, always in this order: the passive certificate-transparency
//! lookup runs to completion first, then the DNS brute force. Running the
//! phases sequentially makes the merge deterministic — a name found by both
//! keeps its passive provenance because the passive write always lands
//! first.

use crate::engine::{run_probes, AggregateReport, Aggregator, ProbeJob, ProgressFn};
use crate::probes::crtsh::CertLogClient;
use crate::probes::DnsProber;
use crate::types::Domain;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Source tag for passive certificate-transparency discoveries.
pub const SOURCE_CRTSH: &str = "crt.sh";
/// Source tag for active DNS brute-force discoveries.
pub const SOURCE_DNS: &str = "DNS";

/// Tuning for one discovery run.
#[derive(Debug, Clone)]
pub struct SubdomainScanOptions {
    /// Candidate labels to brute force; `label.domain` per job.
    pub labels: Vec<String>,
    pub concurrency: usize,
    pub probe_timeout: Duration,
    /// Skip the certificate-transparency phase when false.
    pub passive: bool,
}

impl Default for SubdomainScanOptions {
    fn default() -> Self {
        Self {
            labels: crate::wordlist::SUBDOMAIN_LABELS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            concurrency: 20,
            probe_timeout: Duration::from_secs(3),
            passive: true,
        }
    }
}

/// Outcome of a full discovery run.
#[derive(Debug, Clone, Serialize)]
pub struct SubdomainScanReport {
    pub domain: Domain,
    pub report: AggregateReport<String>,
    /// How many names the passive phase contributed before brute force.
    pub passive_count: usize,
    pub duration_ms: u64,
}

impl SubdomainScanReport {
    /// Flatten into display fields for the report writer.
    pub fn record_fields(&self) -> BTreeMap<String, String> {
        let mut fields = BTreeMap::new();
        fields.insert("Target Domain".to_string(), self.domain.to_string());
        fields.insert(
            "Total Subdomains".to_string(),
            self.report.found_count().to_string(),
        );
        fields.insert("crt.sh".to_string(), self.passive_count.to_string());
        fields.insert(
            "DNS Brute-Force".to_string(),
            (self.report.found_count() - self.passive_count).to_string(),
        );

        for entry in &self.report.entries {
            let value = match entry.payload.get("ip") {
                Some(ip) => format!("{} ({})", entry.source, ip),
                None => entry.source.clone(),
            };
            fields.insert(entry.key.clone(), value);
        }

        fields
    }
}

/// Discover subdomains of `domain`: passive phase first, then DNS brute
/// force over the wordlist. An empty wordlist skips the pool and still
/// returns whatever the passive phase found.
pub async fn discover_subdomains(
    domain: Domain,
    opts: SubdomainScanOptions,
    on_progress: Option<ProgressFn>,
) -> SubdomainScanReport {
    let start = Instant::now();
    let mut aggregator = Aggregator::new();
    let mut passive_count = 0;

    if opts.passive {
        match CertLogClient::new() {
            Ok(client) => {
                let names = client.subdomains(&domain).await;
                passive_count = names.len();
                debug!("crt.sh contributed {} names for {}", passive_count, domain);
                for name in names {
                    aggregator.insert(name, BTreeMap::new(), SOURCE_CRTSH);
                }
            }
            Err(e) => {
                // Best effort: a broken HTTP client only loses the passive phase
                warn!("certificate-transparency client unavailable: {}", e);
            }
        }
    }

    if !opts.labels.is_empty() {
        let jobs: Vec<ProbeJob<String>> = opts
            .labels
            .iter()
            .map(|label| {
                let candidate = domain.candidate(label);
                ProbeJob::new(candidate.clone(), candidate, opts.probe_timeout)
            })
            .collect();

        debug!(
            "brute forcing {} candidates under {} with {} workers",
            jobs.len(),
            domain,
            opts.concurrency
        );

        let prober = Arc::new(DnsProber::new(opts.probe_timeout));
        let outcomes = run_probes(prober, jobs, opts.concurrency, on_progress).await;
        aggregator.absorb(outcomes, SOURCE_DNS);
    }

    SubdomainScanReport {
        domain,
        report: aggregator.finish(),
        passive_count,
        duration_ms: start.elapsed().as_millis() as u64,
    }
}
