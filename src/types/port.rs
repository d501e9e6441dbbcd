//! Port types with validation and parsing.
//!
//! The `Port` newtype ensures values are always valid port numbers (1-65535).
//! `PortSpec` parses the user-facing port selection syntax and carries the
//! curated top-ports profile.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated network port number (1-65535).
///
/// Using a newtype prevents accidental misuse of raw u16 values and keeps
/// port 0 unrepresentable in job lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Port(u16);

impl Port {
    /// Minimum valid port number.
    pub const MIN: u16 = 1;
    /// Maximum valid port number.
    pub const MAX: u16 = 65535;

    /// Create a new Port from a u16, returning None if invalid.
    #[inline]
    pub const fn new(port: u16) -> Option<Self> {
        if port >= Self::MIN {
            Some(Self(port))
        } else {
            None
        }
    }

    /// Get the raw port number.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for Port {
    type Error = PortError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(PortError::OutOfRange(value as u32))
    }
}

impl From<Port> for u16 {
    fn from(port: Port) -> Self {
        port.0
    }
}

/// Error type for port parsing and validation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PortError {
    #[error("port {0} is out of valid range (1-65535)")]
    OutOfRange(u32),
    #[error("invalid port number: {0}")]
    InvalidFormat(String),
    #[error("invalid port range: start ({0}) > end ({1})")]
    InvalidRange(u16, u16),
    #[error("empty port specification")]
    Empty,
}

/// The most commonly exposed TCP ports, used by the default quick scan.
const TOP_PORTS: [u16; 97] = [
    20, 21, 22, 23, 25, 53, 67, 68, 69, 80, 110, 111, 119, 123, 135, 137, 138, 139, 143, 161, 162,
    179, 194, 389, 443, 445, 465, 514, 515, 520, 521, 543, 544, 548, 554, 587, 631, 636, 873, 902,
    993, 995, 1080, 1194, 1433, 1434, 1521, 1701, 1723, 1812, 1813, 2049, 2082, 2083, 2181, 2222,
    3128, 3306, 3389, 4443, 5060, 5222, 5432, 5900, 5938, 6379, 6660, 6661, 6662, 6663, 6665,
    6667, 6697, 8000, 8008, 8080, 8081, 8443, 8888, 9000, 9090, 9091, 9200, 9300, 9418, 9999,
    10000, 11211, 27017, 27018, 28017, 50000, 50070, 50075, 50090, 60010, 60030,
];

/// A port selection: the curated top-ports profile, explicit ports, inclusive
/// ranges, or a mix.
///
/// Supported syntax:
/// - `top` - the curated quick-scan list
/// - single port: `80`
/// - comma-separated: `80,443,8080`
/// - range: `1-1000`
/// - mixed: `22,80,443,8000-9000`
///
/// All forms produce a sorted, deduplicated port list, and malformed input is
/// rejected before any job is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortSpec {
    ports: Vec<Port>,
}

impl PortSpec {
    /// The curated quick-scan profile.
    pub fn top_ports() -> Self {
        let ports = TOP_PORTS.iter().filter_map(|&p| Port::new(p)).collect();
        Self { ports }
    }

    /// All selected ports, sorted ascending without duplicates.
    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    pub fn len(&self) -> usize {
        self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    fn from_ports(mut ports: Vec<Port>) -> Self {
        ports.sort_unstable();
        ports.dedup();
        Self { ports }
    }
}

impl FromStr for PortSpec {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PortError::Empty);
        }
        if s.eq_ignore_ascii_case("top") {
            return Ok(Self::top_ports());
        }

        let mut ports = Vec::new();

        for part in s.split(',') {
            let part = part.trim();
            if part.contains('-') {
                let bounds: Vec<&str> = part.split('-').collect();
                if bounds.len() != 2 {
                    return Err(PortError::InvalidFormat(part.to_string()));
                }

                let start = parse_port_number(bounds[0])?;
                let end = parse_port_number(bounds[1])?;
                if start.as_u16() > end.as_u16() {
                    return Err(PortError::InvalidRange(start.as_u16(), end.as_u16()));
                }

                ports.extend((start.as_u16()..=end.as_u16()).filter_map(Port::new));
            } else {
                ports.push(parse_port_number(part)?);
            }
        }

        if ports.is_empty() {
            return Err(PortError::Empty);
        }

        Ok(Self::from_ports(ports))
    }
}

fn parse_port_number(s: &str) -> Result<Port, PortError> {
    let s = s.trim();
    let raw: u32 = s
        .parse()
        .map_err(|_| PortError::InvalidFormat(s.to_string()))?;
    if raw > Port::MAX as u32 {
        return Err(PortError::OutOfRange(raw));
    }
    Port::new(raw as u16).ok_or(PortError::OutOfRange(raw))
}

impl fmt::Display for PortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.ports.iter().map(|p| p.to_string()).collect();
        write!(f, "{}", parts.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_validation() {
        assert!(Port::new(0).is_none());
        assert!(Port::new(1).is_some());
        assert!(Port::new(80).is_some());
        assert!(Port::new(65535).is_some());
    }

    #[test]
    fn test_parse_single_and_list() {
        let spec: PortSpec = "80".parse().unwrap();
        assert_eq!(spec.len(), 1);

        let spec: PortSpec = "80,443,8080".parse().unwrap();
        let ports: Vec<u16> = spec.ports().iter().map(|p| p.as_u16()).collect();
        assert_eq!(ports, vec![80, 443, 8080]);
    }

    #[test]
    fn test_parse_range_and_mixed() {
        let spec: PortSpec = "1-100".parse().unwrap();
        assert_eq!(spec.len(), 100);

        let spec: PortSpec = "22,80,443,8000-8010".parse().unwrap();
        assert_eq!(spec.len(), 14);
    }

    #[test]
    fn test_parse_dedup_and_sort() {
        let spec: PortSpec = "443,80,80,443".parse().unwrap();
        let ports: Vec<u16> = spec.ports().iter().map(|p| p.as_u16()).collect();
        assert_eq!(ports, vec![80, 443]);
    }

    #[test]
    fn test_inverted_range_rejected() {
        assert!(matches!(
            "500-10".parse::<PortSpec>(),
            Err(PortError::InvalidRange(500, 10))
        ));
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(matches!(
            "70000".parse::<PortSpec>(),
            Err(PortError::OutOfRange(70000))
        ));
        assert!("0".parse::<PortSpec>().is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        assert!("abc".parse::<PortSpec>().is_err());
        assert!("1-2-3".parse::<PortSpec>().is_err());
        assert!("".parse::<PortSpec>().is_err());
    }

    #[test]
    fn test_top_ports_profile() {
        let spec = PortSpec::top_ports();
        assert!(!spec.is_empty());
        assert!(spec.ports().iter().any(|p| p.as_u16() == 22));
        assert!(spec.ports().iter().any(|p| p.as_u16() == 443));

        let parsed: PortSpec = "top".parse().unwrap();
        assert_eq!(parsed, spec);
    }
}
