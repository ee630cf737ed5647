//! # Server Configuration
//!
//! Bind address handling for the `serve` command.

use std::net::SocketAddr;

/// Errors that can occur when resolving the bind address.
#[derive(Debug, thiserror::Error)]
pub enum BindAddressError {
    /// The host and port do not form a socket address.
    #[error("Invalid address {host}:{port}: {source}")]
    Invalid {
        host:   String,
        port:   u16,
        #[source]
        source: std::net::AddrParseError,
    },
}

impl From<BindAddressError> for error::AppError {
    fn from(err: BindAddressError) -> Self { error::AppError::config(err) }
}

/// Parses a host and port into a SocketAddr.
///
/// IPv6 hosts are bracketed before the port is appended, so `::1` and
/// `[::1]` both work.
pub fn parse_socket_addr(host: &str, port: u16) -> Result<SocketAddr, BindAddressError> {
    let addr_str = if host.contains(':') && !host.starts_with('[') {
        format!("[{}]:{}", host, port)
    }
    else {
        format!("{}:{}", host, port)
    };
    addr_str.parse().map_err(|source| {
        BindAddressError::Invalid {
            host: host.to_string(),
            port,
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_socket_addr() {
        let addr = parse_socket_addr("0.0.0.0", 8000).unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:8000");
    }

    #[test]
    fn test_parse_socket_addr_ipv6() {
        let addr = parse_socket_addr("::1", 3000).unwrap();
        assert_eq!(addr.to_string(), "[::1]:3000");
    }

    #[test]
    fn test_parse_socket_addr_bracketed_ipv6() {
        let addr = parse_socket_addr("[2001:db8::1]", 8080).unwrap();
        assert_eq!(addr.to_string(), "[2001:db8::1]:8080");
    }

    #[test]
    fn test_parse_socket_addr_rejects_hostnames() {
        let err = parse_socket_addr("not a host", 8000).unwrap_err();
        assert!(err.to_string().starts_with("Invalid address not a host:8000"));
    }
}
