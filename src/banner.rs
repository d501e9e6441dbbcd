//! Banner grabbing for open TCP ports.
//!
//! Attempts to retrieve a short service banner from an already-established
//! connection. Failure at any step is tolerated; the open port itself is the
//! finding, the banner is garnish.

use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Maximum bytes to read for a banner.
const MAX_BANNER_SIZE: usize = 1024;

/// Secondary read timeout once the connection is open.
const BANNER_TIMEOUT: Duration = Duration::from_secs(2);

/// Probe line to elicit a response from HTTP-speaking services.
const HTTP_PROBE: &[u8] = b"HEAD / HTTP/1.0\r\n\r\n";

/// Maximum characters of banner kept for display.
const BANNER_DISPLAY_LEN: usize = 60;

/// Grab a banner from an open TCP stream.
///
/// Tries the data the service volunteers first; if the port looks like HTTP,
/// sends a minimal HEAD probe and reads again. Returns an empty string when
/// nothing could be read — never an error.
pub async fn grab_banner(mut stream: TcpStream, port: u16) -> String {
    let mut buffer = vec![0u8; MAX_BANNER_SIZE];

    match timeout(BANNER_TIMEOUT, stream.read(&mut buffer)).await {
        Ok(Ok(n)) if n > 0 => return first_line(&buffer[..n]),
        _ => {}
    }

    if is_http_port(port) && stream.write_all(HTTP_PROBE).await.is_ok() {
        if let Ok(Ok(n)) = timeout(BANNER_TIMEOUT, stream.read(&mut buffer)).await {
            if n > 0 {
                return first_line(&buffer[..n]);
            }
        }
    }

    String::new()
}

/// Check if a port is commonly used for HTTP services.
fn is_http_port(port: u16) -> bool {
    matches!(
        port,
        80 | 443 | 8000 | 8008 | 8080 | 8081 | 8443 | 8888 | 9000 | 9090
    )
}

/// Reduce raw banner bytes to a printable first line, bounded for display.
fn first_line(data: &[u8]) -> String {
    let text: String = data
        .iter()
        .map(|&b| {
            if b.is_ascii_graphic() || b == b' ' || b == b'\t' {
                b as char
            } else if b == b'\n' || b == b'\r' {
                '\n'
            } else {
                '.'
            }
        })
        .collect();

    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("")
        .chars()
        .take(BANNER_DISPLAY_LEN)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line_trims_crlf() {
        assert_eq!(first_line(b"SSH-2.0-OpenSSH_8.9\r\n"), "SSH-2.0-OpenSSH_8.9");
    }

    #[test]
    fn test_first_line_takes_only_first() {
        let data = b"HTTP/1.0 200 OK\r\nServer: nginx\r\n\r\n";
        assert_eq!(first_line(data), "HTTP/1.0 200 OK");
    }

    #[test]
    fn test_first_line_bounded_length() {
        let long = vec![b'a'; 500];
        assert_eq!(first_line(&long).len(), BANNER_DISPLAY_LEN);
    }

    #[test]
    fn test_first_line_masks_binary() {
        assert_eq!(first_line(b"\x01\x02abc\x03"), "..abc.");
    }

    #[test]
    fn test_is_http_port() {
        assert!(is_http_port(80));
        assert!(is_http_port(8080));
        assert!(!is_http_port(22));
    }
}
