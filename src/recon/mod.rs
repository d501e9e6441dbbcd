//! Scan orchestrators.
//!
//! Each submodule wires one reconnaissance workflow onto the shared probe
//! engine: build jobs from input, run the pool, aggregate, and wrap the
//! result with run metadata for the output and storage layers.

pub mod ports;
pub mod subdomains;
pub mod usernames;

pub use ports::{scan_ports, PortScanOptions, PortScanReport};
pub use subdomains::{discover_subdomains, SubdomainScanOptions, SubdomainScanReport};
pub use usernames::{search_username, UsernameScanOptions, UsernameScanReport};
