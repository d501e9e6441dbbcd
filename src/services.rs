//! Service detection based on well-known port numbers.
//!
//! Provides mapping from port numbers to likely service names.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Static map of well-known ports to service names.
static PORT_SERVICES: LazyLock<HashMap<u16, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        (21, "FTP"),
        (22, "SSH"),
        (23, "Telnet"),
        (25, "SMTP"),
        (53, "DNS"),
        (80, "HTTP"),
        (110, "POP3"),
        (111, "RPCBind"),
        (135, "MSRPC"),
        (139, "NetBIOS"),
        (143, "IMAP"),
        (443, "HTTPS"),
        (445, "SMB"),
        (465, "SMTPS"),
        (587, "SMTP-Submission"),
        (993, "IMAPS"),
        (995, "POP3S"),
        (1433, "MSSQL"),
        (1521, "Oracle"),
        (1723, "PPTP"),
        (2049, "NFS"),
        (3306, "MySQL"),
        (3389, "RDP"),
        (5432, "PostgreSQL"),
        (5900, "VNC"),
        (5985, "WinRM"),
        (6379, "Redis"),
        (8080, "HTTP-Proxy"),
        (8443, "HTTPS-Alt"),
        (8888, "HTTP-Alt"),
        (9090, "WebSM"),
        (9200, "Elasticsearch"),
        (27017, "MongoDB"),
    ])
});

/// Look up the probable service name for a given port.
///
/// Returns `None` if the port is not in the well-known services table.
pub fn service_name(port: u16) -> Option<&'static str> {
    PORT_SERVICES.get(&port).copied()
}

/// Get a descriptive string for the service on a port.
///
/// Returns `"Unknown"` if the port is not recognized.
pub fn service_description(port: u16) -> &'static str {
    service_name(port).unwrap_or("Unknown")
}
