//! `wraith usernames` subcommand.

use crate::cli::OutputFormat;
use crate::config::AppSettings;
use crate::engine::ProgressFn;
use crate::error::{CliError, CliResult};
use crate::output;
use crate::platforms::PLATFORMS;
use crate::recon::{self, UsernameScanOptions};
use crate::storage::{ReconRecord, ReportStore};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;

/// Search for a username across social and developer platforms.
#[derive(Parser, Debug)]
pub struct UsernamesCommand {
    /// Username to search for
    #[arg(value_name = "USERNAME")]
    pub username: String,

    /// Maximum number of concurrent HTTP probes
    #[arg(short, long)]
    pub concurrency: Option<usize>,

    /// Per-probe request timeout in milliseconds
    #[arg(short = 't', long = "timeout")]
    pub timeout_ms: Option<u64>,

    /// Output format for results
    #[arg(short, long, value_enum, default_value = "plain")]
    pub output: OutputFormat,

    /// Don't save a report for this scan
    #[arg(long)]
    pub no_save: bool,
}

impl UsernamesCommand {
    pub async fn execute(&self, quiet: bool) -> CliResult<()> {
        let username = self.username.trim();
        if username.len() < 2 {
            return Err(CliError::Other("username must be at least 2 characters".to_string()));
        }

        let settings = AppSettings::load()?;

        let show_ui = !quiet && self.output == OutputFormat::Plain;
        if show_ui {
            output::print_scan_header(
                "usernames",
                username,
                &format!("Checking {} platforms...", PLATFORMS.len()),
            );
        }

        let pb = show_ui.then(|| output::progress_bar(PLATFORMS.len() as u64, "Checking platforms"));
        let progress: Option<ProgressFn> = pb.clone().map(|bar| {
            Arc::new(move |done: u64, _total: u64| bar.set_position(done)) as ProgressFn
        });

        let opts = UsernameScanOptions {
            concurrency: self.concurrency.unwrap_or(settings.http_concurrency),
            probe_timeout: Duration::from_millis(
                self.timeout_ms.unwrap_or(settings.http_timeout_ms),
            ),
        };

        let report = recon::search_username(username, opts, progress).await?;

        if let Some(bar) = pb {
            bar.finish_with_message("Search complete");
        }

        if !self.no_save && settings.auto_save_reports {
            let store = ReportStore::new()?;
            let record = ReconRecord::new("usernames", username, report.record_fields());
            store.save(&record)?;
            if show_ui {
                output::print_info(&format!("Report saved as {}", record.id.short()));
            }
        }

        output::print_username_report(&report, self.output)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[tokio::test]
    async fn test_short_username_rejected_before_any_probe() {
        let cmd =
            UsernamesCommand::try_parse_from(["usernames", "x", "--no-save"]).unwrap();
        let result = cmd.execute(true).await;
        assert!(matches!(result, Err(CliError::Other(_))));
    }
}
