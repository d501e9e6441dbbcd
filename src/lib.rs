//! # wraith - A Concurrent Network Reconnaissance Toolkit
//!
//! wraith probes network-addressable targets with bounded concurrency:
//! TCP port scanning with banner capture, passive + active subdomain
//! discovery, and username searches across public platforms.
//!
//! ## Features
//!
//! - **One probe engine**: every module fans out through the same bounded
//!   worker pool with per-probe timeouts and live progress
//! - **Deterministic reports**: results are deduplicated and sorted by key,
//!   independent of completion order
//! - **Passive + active discovery**: certificate-transparency logs merged
//!   with DNS brute force, passive provenance preserved
//! - **Banner grabbing**: service identification on open ports
//! - **Multiple output formats**: plain text, JSON, and CSV
//! - **Report persistence**: every scan can be saved and listed later
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use wraith::recon::{scan_ports, PortScanOptions};
//! use wraith::types::ScanTarget;
//!
//! #[tokio::main]
//! async fn main() {
//!     let target = ScanTarget::resolve("192.168.1.1").await.unwrap();
//!     let report = scan_ports(target, PortScanOptions::default(), None).await;
//!
//!     for entry in &report.report.entries {
//!         println!("open: {}", entry.key);
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`engine`] - the shared worker pool, outcome model, and aggregator
//! - [`probes`] - TCP, DNS, and HTTP probe executors
//! - [`recon`] - the per-module scan orchestrators
//! - [`types`] - validated ports, domains, and targets
//! - [`config`] / [`storage`] - settings and saved reports
//! - [`output`] - progress and report rendering

pub mod banner;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod platforms;
pub mod probes;
pub mod recon;
pub mod services;
pub mod storage;
pub mod types;
pub mod wordlist;

// Re-export commonly used types
pub use engine::{AggregateReport, Aggregator, FailureKind, ProbeJob, ProbeOutcome, Prober};
pub use error::{CliError, CliResult};
pub use types::{Domain, Port, PortSpec, ScanTarget};
