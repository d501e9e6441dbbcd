//! `wraith history` subcommand.

use crate::error::CliResult;
use crate::output;
use crate::storage::ReportStore;
use clap::Parser;

/// View and maintain saved reports.
#[derive(Parser, Debug)]
pub struct HistoryCommand {
    /// Number of recent reports to show
    #[arg(short = 'n', long, default_value = "10")]
    pub count: usize,

    /// Delete all saved reports
    #[arg(long)]
    pub clear: bool,

    /// Delete reports older than N days
    #[arg(long, value_name = "DAYS")]
    pub prune: Option<i64>,
}

impl HistoryCommand {
    pub fn execute(&self) -> CliResult<()> {
        let store = ReportStore::new()?;

        if self.clear {
            let deleted = store.clear()?;
            output::print_info(&format!("Deleted {} report(s)", deleted));
            return Ok(());
        }

        if let Some(days) = self.prune {
            let deleted = store.prune(chrono::Duration::days(days))?;
            output::print_info(&format!("Pruned {} report(s) older than {} days", deleted, days));
            return Ok(());
        }

        let records = store.list_recent(self.count)?;
        if records.is_empty() {
            output::print_info("No saved reports.");
            return Ok(());
        }

        for record in &records {
            println!("  {}  {}", record.id.short(), record.summary());
        }
        Ok(())
    }
}
