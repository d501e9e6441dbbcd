//! `wraith ports` subcommand.

use crate::cli::OutputFormat;
use crate::config::AppSettings;
use crate::engine::ProgressFn;
use crate::error::CliResult;
use crate::output;
use crate::recon::{self, PortScanOptions};
use crate::storage::{ReconRecord, ReportStore};
use crate::types::{PortSpec, ScanTarget};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;

/// Scan a target for open TCP ports.
#[derive(Parser, Debug)]
pub struct PortsCommand {
    /// Target to scan (IP address or hostname)
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Ports to scan: "top", "80,443", "1-1000", or "22,80,8000-9000"
    #[arg(short, long, default_value = "top")]
    pub ports: String,

    /// Maximum number of concurrent probes
    #[arg(short, long)]
    pub concurrency: Option<usize>,

    /// Per-probe connection timeout in milliseconds
    #[arg(short = 't', long = "timeout")]
    pub timeout_ms: Option<u64>,

    /// Output format for results
    #[arg(short, long, value_enum, default_value = "plain")]
    pub output: OutputFormat,

    /// Don't save a report for this scan
    #[arg(long)]
    pub no_save: bool,
}

impl PortsCommand {
    pub async fn execute(&self, quiet: bool) -> CliResult<()> {
        let settings = AppSettings::load()?;

        // Malformed specs are rejected here, before any probe runs
        let spec: PortSpec = self.ports.parse()?;
        let target = ScanTarget::resolve(&self.target).await?;

        let show_ui = !quiet && self.output == OutputFormat::Plain;
        if show_ui {
            output::print_scan_header(
                "ports",
                &target.to_string(),
                &format!("Scanning {} ports...", spec.len()),
            );
        }

        let pb = show_ui.then(|| output::progress_bar(spec.len() as u64, "Scanning ports"));
        let progress: Option<ProgressFn> = pb.clone().map(|bar| {
            Arc::new(move |done: u64, _total: u64| bar.set_position(done)) as ProgressFn
        });

        let opts = PortScanOptions {
            spec,
            concurrency: self.concurrency.unwrap_or(settings.port_concurrency),
            probe_timeout: Duration::from_millis(
                self.timeout_ms.unwrap_or(settings.port_timeout_ms),
            ),
        };

        let report = recon::scan_ports(target, opts, progress).await;

        if let Some(bar) = pb {
            bar.finish_with_message("Scan complete");
        }

        if !self.no_save && settings.auto_save_reports {
            let store = ReportStore::new()?;
            let record = ReconRecord::new("ports", &report.target.original, report.record_fields());
            store.save(&record)?;
            if show_ui {
                output::print_info(&format!("Report saved as {}", record.id.short()));
            }
        }

        output::print_port_report(&report, self.output)?;
        Ok(())
    }
}
