//! Port scan orchestration.
//!
//! Builds one TCP probe job per selected port, fans them out through the
//! worker pool, and folds open ports into a numerically ordered report.

use crate::engine::{run_probes, AggregateReport, Aggregator, ProbeJob, ProgressFn};
use crate::probes::TcpProber;
use crate::types::{Port, PortSpec, ScanTarget};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Source tag for entries discovered by TCP connect probes.
const SOURCE_TCP: &str = "tcp";

/// Tuning for one port scan run.
#[derive(Debug, Clone)]
pub struct PortScanOptions {
    pub spec: PortSpec,
    pub concurrency: usize,
    pub probe_timeout: Duration,
}

impl Default for PortScanOptions {
    fn default() -> Self {
        Self {
            spec: PortSpec::top_ports(),
            concurrency: 50,
            probe_timeout: Duration::from_secs(1),
        }
    }
}

/// Outcome of a full port scan, ready for display and persistence.
#[derive(Debug, Clone, Serialize)]
pub struct PortScanReport {
    pub target: ScanTarget,
    pub report: AggregateReport<Port>,
    pub duration_ms: u64,
}

impl PortScanReport {
    /// Flatten into display fields for the report writer.
    pub fn record_fields(&self) -> BTreeMap<String, String> {
        let mut fields = BTreeMap::new();
        fields.insert("Target".to_string(), self.target.ip.to_string());
        fields.insert("Original Target".to_string(), self.target.original.clone());
        fields.insert(
            "Ports Scanned".to_string(),
            self.report.total_jobs.to_string(),
        );
        fields.insert(
            "Open Ports".to_string(),
            self.report.found_count().to_string(),
        );

        for entry in &self.report.entries {
            let service = entry.payload.get("service").map(String::as_str).unwrap_or("Unknown");
            let banner = entry
                .payload
                .get("banner")
                .filter(|b| !b.is_empty())
                .map(String::as_str)
                .unwrap_or("No banner");
            fields.insert(format!("Port {}", entry.key), format!("{} - {}", service, banner));
        }

        fields
    }
}

/// Scan the target's ports with bounded concurrency.
///
/// An empty port selection is a degenerate success: the pool is skipped
/// entirely and the report comes back with zero jobs and zero findings.
pub async fn scan_ports(
    target: ScanTarget,
    opts: PortScanOptions,
    on_progress: Option<ProgressFn>,
) -> PortScanReport {
    let start = Instant::now();
    let mut aggregator = Aggregator::new();

    if !opts.spec.is_empty() {
        let jobs: Vec<ProbeJob<Port>> = opts
            .spec
            .ports()
            .iter()
            .map(|&port| ProbeJob::new(port, target.ip.to_string(), opts.probe_timeout))
            .collect();

        debug!(
            "probing {} ports on {} with {} workers",
            jobs.len(),
            target.ip,
            opts.concurrency
        );

        let prober = Arc::new(TcpProber::new(target.ip));
        let outcomes = run_probes(prober, jobs, opts.concurrency, on_progress).await;
        aggregator.absorb(outcomes, SOURCE_TCP);
    }

    PortScanReport {
        target,
        report: aggregator.finish(),
        duration_ms: start.elapsed().as_millis() as u64,
    }
}
