//! CLI subcommand definitions and handlers.
//!
//! Implements a git-like subcommand architecture:
//! - `wraith ports <target>` - TCP port scan with banner capture
//! - `wraith subdomains <domain>` - passive + brute-force subdomain discovery
//! - `wraith usernames <name>` - profile existence check across platforms
//! - `wraith history` - list and maintain saved reports

mod history;
mod ports;
mod subdomains;
mod usernames;

pub use history::HistoryCommand;
pub use ports::PortsCommand;
pub use subdomains::SubdomainsCommand;
pub use usernames::UsernamesCommand;

use clap::{Parser, Subcommand};

/// wraith - a concurrent network reconnaissance toolkit.
///
/// Every scan fans independent network probes out across a bounded worker
/// pool and always finishes with a deterministic, sorted report.
#[derive(Parser, Debug)]
#[command(name = "wraith")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A concurrent network reconnaissance toolkit", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a target for open TCP ports
    #[command(alias = "p")]
    Ports(PortsCommand),

    /// Discover subdomains of a domain
    #[command(alias = "s")]
    Subdomains(SubdomainsCommand),

    /// Search for a username across platforms
    #[command(alias = "u")]
    Usernames(UsernamesCommand),

    /// View and maintain saved reports
    #[command(alias = "h")]
    History(HistoryCommand),
}

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable plain text
    Plain,
    /// JSON structured output
    Json,
    /// CSV format for data analysis
    Csv,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Plain
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}
