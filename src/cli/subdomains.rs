//! `wraith subdomains` subcommand.

use crate::cli::OutputFormat;
use crate::config::AppSettings;
use crate::engine::ProgressFn;
use crate::error::CliResult;
use crate::output;
use crate::recon::{self, SubdomainScanOptions};
use crate::storage::{ReconRecord, ReportStore};
use crate::types::Domain;
use crate::wordlist::SUBDOMAIN_LABELS;
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Discover subdomains via certificate-transparency logs and DNS brute force.
#[derive(Parser, Debug)]
pub struct SubdomainsCommand {
    /// Base domain to enumerate (e.g. example.com)
    #[arg(value_name = "DOMAIN")]
    pub domain: String,

    /// Wordlist file with one candidate label per line (builtin list if omitted)
    #[arg(short, long, value_name = "PATH")]
    pub wordlist: Option<PathBuf>,

    /// Maximum number of concurrent DNS probes
    #[arg(short, long)]
    pub concurrency: Option<usize>,

    /// Per-probe resolution timeout in milliseconds
    #[arg(short = 't', long = "timeout")]
    pub timeout_ms: Option<u64>,

    /// Skip the certificate-transparency phase
    #[arg(long)]
    pub no_passive: bool,

    /// Output format for results
    #[arg(short, long, value_enum, default_value = "plain")]
    pub output: OutputFormat,

    /// Don't save a report for this scan
    #[arg(long)]
    pub no_save: bool,
}

impl SubdomainsCommand {
    pub async fn execute(&self, quiet: bool) -> CliResult<()> {
        let settings = AppSettings::load()?;
        let domain = Domain::parse(&self.domain)?;
        let labels = self.load_labels()?;

        let show_ui = !quiet && self.output == OutputFormat::Plain;
        if show_ui {
            output::print_scan_header(
                "subdomains",
                domain.as_str(),
                &format!("Brute forcing {} candidates...", labels.len()),
            );
            if !self.no_passive {
                output::print_info("Querying certificate-transparency logs first");
            }
        }

        let pb = show_ui.then(|| output::progress_bar(labels.len() as u64, "DNS brute force"));
        let progress: Option<ProgressFn> = pb.clone().map(|bar| {
            Arc::new(move |done: u64, _total: u64| bar.set_position(done)) as ProgressFn
        });

        let opts = SubdomainScanOptions {
            labels,
            concurrency: self.concurrency.unwrap_or(settings.dns_concurrency),
            probe_timeout: Duration::from_millis(
                self.timeout_ms.unwrap_or(settings.dns_timeout_ms),
            ),
            passive: !self.no_passive,
        };

        let report = recon::discover_subdomains(domain, opts, progress).await;

        if let Some(bar) = pb {
            bar.finish_with_message("Discovery complete");
        }

        if !self.no_save && settings.auto_save_reports {
            let store = ReportStore::new()?;
            let record = ReconRecord::new(
                "subdomains",
                report.domain.as_str(),
                report.record_fields(),
            );
            store.save(&record)?;
            if show_ui {
                output::print_info(&format!("Report saved as {}", record.id.short()));
            }
        }

        output::print_subdomain_report(&report, self.output)?;
        Ok(())
    }

    /// Candidate labels from the wordlist file, or the builtin list.
    /// Blank lines and `#` comments are skipped.
    fn load_labels(&self) -> CliResult<Vec<String>> {
        let labels = match &self.wordlist {
            Some(path) => fs::read_to_string(path)?
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(str::to_string)
                .collect(),
            None => SUBDOMAIN_LABELS.iter().map(|s| s.to_string()).collect(),
        };
        Ok(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    fn command(args: &[&str]) -> SubdomainsCommand {
        SubdomainsCommand::try_parse_from(
            std::iter::once("subdomains").chain(args.iter().copied()),
        )
        .unwrap()
    }

    #[test]
    fn test_builtin_labels_by_default() {
        let cmd = command(&["example.com"]);
        let labels = cmd.load_labels().unwrap();
        assert_eq!(labels.len(), SUBDOMAIN_LABELS.len());
    }

    #[test]
    fn test_wordlist_file_skips_comments_and_blanks() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# infra").unwrap();
        writeln!(file, "www").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  mail  ").unwrap();

        let cmd = command(&[
            "example.com",
            "--wordlist",
            file.path().to_str().unwrap(),
        ]);
        let labels = cmd.load_labels().unwrap();
        assert_eq!(labels, vec!["www", "mail"]);
    }

    #[test]
    fn test_missing_wordlist_is_an_error() {
        let cmd = command(&["example.com", "--wordlist", "/no/such/file"]);
        assert!(cmd.load_labels().is_err());
    }
}
