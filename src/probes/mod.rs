//! Concrete probe executors.
//!
//! Each prober performs exactly one kind of bounded network operation and
//! plugs into the shared worker pool:
//!
//! - [`TcpProber`] - TCP connect with banner capture
//! - [`DnsProber`] - A-record resolution of candidate hostnames
//! - [`HttpProber`] - HTTP GET existence checks against profile URLs
//! - [`crtsh`] - the passive certificate-transparency lookup (not pooled;
//!   one best-effort request per scan)

pub mod crtsh;
pub mod dns;
pub mod http;
pub mod tcp;

pub use dns::DnsProber;
pub use http::HttpProber;
pub use tcp::TcpProber;
