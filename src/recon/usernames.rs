//! Username search orchestration.
//!
//! One HTTP existence probe per platform, pooled exactly like the port and
//! subdomain scans. HTTP probes are heavier than TCP or DNS ones, so the
//! default fan-out is lower.

use crate::engine::{run_probes, AggregateReport, Aggregator, ProbeJob, ProgressFn};
use crate::error::CliResult;
use crate::platforms::PLATFORMS;
use crate::probes::HttpProber;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Source tag for profile hits.
const SOURCE_HTTP: &str = "http";

/// Tuning for one username search.
#[derive(Debug, Clone)]
pub struct UsernameScanOptions {
    pub concurrency: usize,
    pub probe_timeout: Duration,
}

impl Default for UsernameScanOptions {
    fn default() -> Self {
        Self {
            concurrency: 10,
            probe_timeout: Duration::from_secs(8),
        }
    }
}

/// Outcome of a username search across all platforms.
#[derive(Debug, Clone, Serialize)]
pub struct UsernameScanReport {
    pub username: String,
    pub report: AggregateReport<String>,
    pub duration_ms: u64,
}

impl UsernameScanReport {
    /// Flatten into display fields for the report writer.
    pub fn record_fields(&self) -> BTreeMap<String, String> {
        let mut fields = BTreeMap::new();
        fields.insert("Username".to_string(), self.username.clone());
        fields.insert(
            "Platforms Scanned".to_string(),
            self.report.total_jobs.to_string(),
        );
        fields.insert(
            "Profiles Found".to_string(),
            self.report.found_count().to_string(),
        );

        for entry in &self.report.entries {
            if let Some(url) = entry.payload.get("url") {
                fields.insert(entry.key.clone(), url.clone());
            }
        }

        fields
    }
}

/// Check every known platform for a profile page owned by `username`.
///
/// Fails only if the HTTP client itself cannot be constructed; individual
/// platform misses and transport errors are ordinary outcomes.
pub async fn search_username(
    username: &str,
    opts: UsernameScanOptions,
    on_progress: Option<ProgressFn>,
) -> CliResult<UsernameScanReport> {
    let start = Instant::now();

    let jobs: Vec<ProbeJob<String>> = PLATFORMS
        .iter()
        .map(|platform| {
            ProbeJob::new(
                platform.name.to_string(),
                platform.profile_url(username),
                opts.probe_timeout,
            )
        })
        .collect();

    debug!(
        "checking {} platforms for '{}' with {} workers",
        jobs.len(),
        username,
        opts.concurrency
    );

    let prober = Arc::new(HttpProber::new(opts.probe_timeout)?);
    let outcomes = run_probes(prober, jobs, opts.concurrency, on_progress).await;

    let mut aggregator = Aggregator::new();
    aggregator.absorb(outcomes, SOURCE_HTTP);

    Ok(UsernameScanReport {
        username: username.to_string(),
        report: aggregator.finish(),
        duration_ms: start.elapsed().as_millis() as u64,
    })
}
