//! TCP connect prober with banner capture.
//!
//! Uses the operating system's socket API via tokio; no special privileges
//! required. A full handshake is completed for every open port, so this is
//! the reliable-but-loud way to scan.

use crate::banner::grab_banner;
use crate::engine::{FailureKind, ProbeJob, ProbeOutcome, Prober};
use crate::services::service_description;
use crate::types::Port;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io;
use std::net::{IpAddr, SocketAddr};
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Probes one `(ip, port)` pair per job; the target address is fixed for
/// the whole batch.
pub struct TcpProber {
    target: IpAddr,
}

impl TcpProber {
    pub fn new(target: IpAddr) -> Self {
        Self { target }
    }
}

#[async_trait]
impl Prober for TcpProber {
    type Key = Port;

    async fn probe(&self, job: &ProbeJob<Port>) -> ProbeOutcome<Port> {
        let port = job.key.as_u16();
        let addr = SocketAddr::new(self.target, port);

        match timeout(job.timeout, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => {
                // Reading a banner is opportunistic; an unreadable service
                // is still an open port.
                let banner = grab_banner(stream, port).await;

                let mut payload = BTreeMap::new();
                payload.insert(
                    "service".to_string(),
                    service_description(port).to_string(),
                );
                payload.insert("banner".to_string(), banner);

                ProbeOutcome::found(job.key, payload)
            }
            Ok(Err(e)) => ProbeOutcome::missed(job.key, classify_connect_error(&e)),
            Err(_) => ProbeOutcome::missed(job.key, FailureKind::Timeout),
        }
    }
}

fn classify_connect_error(e: &io::Error) -> FailureKind {
    match e.kind() {
        io::ErrorKind::ConnectionRefused => FailureKind::Refused,
        io::ErrorKind::TimedOut => FailureKind::Timeout,
        _ => FailureKind::Unreachable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;
    use std::time::{Duration, Instant};
    use tokio::net::TcpListener;

    fn job(port: u16, timeout_ms: u64) -> ProbeJob<Port> {
        ProbeJob::new(
            Port::new(port).unwrap(),
            "test",
            Duration::from_millis(timeout_ms),
        )
    }

    #[tokio::test]
    async fn test_closed_port_is_a_miss() {
        let prober = TcpProber::new(IpAddr::V4(Ipv4Addr::LOCALHOST));

        // Port 1 is almost certainly closed on localhost
        let outcome = prober.probe(&job(1, 200)).await;
        assert!(!outcome.success);
        assert!(outcome.failure.is_some());
    }

    #[tokio::test]
    async fn test_open_port_is_found_with_service_name() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let prober = TcpProber::new(IpAddr::V4(Ipv4Addr::LOCALHOST));
        let outcome = prober.probe(&job(port, 1000)).await;

        assert!(outcome.success);
        assert!(outcome.payload.contains_key("service"));
        assert!(outcome.payload.contains_key("banner"));
    }

    #[tokio::test]
    async fn test_probe_respects_timeout_bound() {
        // 10.255.255.1 is a black-hole address on most networks; whether the
        // connect times out or errors immediately, the probe must finish
        // well inside timeout plus a small epsilon.
        let prober = TcpProber::new("10.255.255.1".parse().unwrap());

        let start = Instant::now();
        let outcome = prober.probe(&job(80, 250)).await;
        let elapsed = start.elapsed();

        assert!(!outcome.success);
        assert!(elapsed < Duration::from_millis(1500), "took {:?}", elapsed);
    }

    #[test]
    fn test_connect_error_classification() {
        let refused = io::Error::new(io::ErrorKind::ConnectionRefused, "refused");
        assert_eq!(classify_connect_error(&refused), FailureKind::Refused);

        let timed_out = io::Error::new(io::ErrorKind::TimedOut, "slow");
        assert_eq!(classify_connect_error(&timed_out), FailureKind::Timeout);

        let other = io::Error::new(io::ErrorKind::AddrNotAvailable, "no route");
        assert_eq!(classify_connect_error(&other), FailureKind::Unreachable);
    }
}
