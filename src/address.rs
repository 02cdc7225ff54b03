//! Validation of the transfer destination.
//!
//! Everything here is pure: no sockets are created and no names are resolved,
//! so a caller can re-validate on every keystroke.
use std::{
    fmt,
    net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr},
    path::Path,
};

use crate::stream::error::TransferError;

/// Highest valid TCP port.
pub const MAX_PORT: u32 = u16::MAX as u32;

/// Which host literals are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HostPolicy {
    /// Four dot-separated decimal octets, nothing else.
    #[default]
    Ipv4Only,
    /// Dotted-decimal IPv4 or any IPv6 literal.
    AllowIpv6,
}

/// Returns `true` if `candidate` is a dotted-decimal IPv4 address.
pub fn validate_host(candidate: &str) -> bool {
    parse_dotted_ipv4(candidate).is_some()
}

/// Same as [validate_host], with IPv6 literals accepted under [HostPolicy::AllowIpv6].
pub fn validate_host_with(candidate: &str, policy: HostPolicy) -> bool {
    parse_host(candidate, policy).is_some()
}

/// Returns `true` if `candidate` is a usable TCP port, `1..=65535`.
pub fn validate_port(candidate: u32) -> bool {
    (1..=MAX_PORT).contains(&candidate)
}

/// The composed "ready to send" check: valid host, valid port, and a file picked.
pub fn ready_to_send(host: &str, port: u32, selected_file: Option<&Path>) -> bool {
    validate_host(host) && validate_port(port) && selected_file.is_some()
}

/// Parses four dot-separated tokens of 1 to 3 ASCII digits, each at most 255.
///
/// Leading zeros are read as plain integers (`"010"` is 10), which
/// [Ipv4Addr]'s own parser would reject.
fn parse_dotted_ipv4(candidate: &str) -> Option<Ipv4Addr> {
    let mut octets = [0u8; 4];
    let mut tokens = candidate.split('.');

    for octet in octets.iter_mut() {
        let token = tokens.next()?;
        if token.is_empty() || token.len() > 3 || !token.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        *octet = token.parse::<u8>().ok()?;
    }

    // A fifth token means too many octets
    if tokens.next().is_some() {
        return None;
    }

    Some(Ipv4Addr::from(octets))
}

fn parse_host(candidate: &str, policy: HostPolicy) -> Option<IpAddr> {
    if let Some(v4) = parse_dotted_ipv4(candidate) {
        return Some(IpAddr::V4(v4));
    }
    match policy {
        HostPolicy::Ipv4Only => None,
        HostPolicy::AllowIpv6 => candidate.parse::<Ipv6Addr>().ok().map(IpAddr::V6),
    }
}

/// A validated transfer destination.
///
/// Only obtainable through [Endpoint::parse], [Endpoint::parse_with] or the
/// validating [SocketAddr] conversions, so holding one means both host and
/// port already passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoint {
    host: IpAddr,
    port: u16,
}

impl Endpoint {
    /// Validates `host` as strict IPv4 and `port` as `1..=65535`.
    pub fn parse(host: &str, port: u32) -> Result<Self, TransferError> {
        Self::parse_with(host, port, HostPolicy::Ipv4Only)
    }

    pub fn parse_with(host: &str, port: u32, policy: HostPolicy) -> Result<Self, TransferError> {
        let host = parse_host(host, policy).ok_or_else(|| TransferError::InvalidHost {
            host: host.to_string(),
        })?;

        if !validate_port(port) {
            return Err(TransferError::InvalidPort { port });
        }

        Ok(Self {
            host,
            port: port as u16,
        })
    }

    /// Validates an already-parsed socket address under `policy`.
    pub fn from_socket_addr(addr: SocketAddr, policy: HostPolicy) -> Result<Self, TransferError> {
        if policy == HostPolicy::Ipv4Only && !addr.is_ipv4() {
            return Err(TransferError::InvalidHost {
                host: addr.ip().to_string(),
            });
        }

        let port = u32::from(addr.port());
        if !validate_port(port) {
            return Err(TransferError::InvalidPort { port });
        }

        Ok(Self {
            host: addr.ip(),
            port: addr.port(),
        })
    }

    pub fn host(&self) -> IpAddr {
        self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.socket_addr(), f)
    }
}

/// Applies the same rules as [Endpoint::parse]: IPv4 only, port `1..=65535`.
impl TryFrom<SocketAddr> for Endpoint {
    type Error = TransferError;

    fn try_from(addr: SocketAddr) -> Result<Self, Self::Error> {
        Self::from_socket_addr(addr, HostPolicy::Ipv4Only)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_host_accepts_dotted_decimal() {
        assert!(validate_host("192.168.1.167"));
        assert!(validate_host("0.0.0.0"));
        assert!(validate_host("255.255.255.255"));
        assert!(validate_host("127.0.0.1"));
        // Leading zeros are still integers in range
        assert!(validate_host("010.001.000.255"));
    }

    #[test]
    fn test_validate_host_rejects_out_of_range_octets() {
        assert!(!validate_host("999.1.1.1"));
        assert!(!validate_host("256.0.0.1"));
        assert!(!validate_host("1.2.3.1000"));
    }

    #[test]
    fn test_validate_host_rejects_wrong_token_count() {
        assert!(!validate_host("1.2.3"));
        assert!(!validate_host("1.2.3.4.5"));
        assert!(!validate_host("1"));
        assert!(!validate_host("..."));
        assert!(!validate_host("1.2..4"));
        assert!(!validate_host("1.2.3.4."));
    }

    #[test]
    fn test_validate_host_rejects_extraneous_characters() {
        assert!(!validate_host(""));
        assert!(!validate_host(" 1.2.3.4"));
        assert!(!validate_host("1.2.3.4 "));
        assert!(!validate_host("+1.2.3.4"));
        assert!(!validate_host("1.2.3.-4"));
        assert!(!validate_host("1.2.3.4:80"));
        assert!(!validate_host("a.b.c.d"));
        assert!(!validate_host("localhost"));
        assert!(!validate_host("1.2.3.٤")); // non-ASCII digit
    }

    #[test]
    fn test_validate_host_is_ipv4_only_by_default() {
        assert!(!validate_host("::1"));
        assert!(!validate_host_with("::1", HostPolicy::Ipv4Only));
        assert!(validate_host_with("::1", HostPolicy::AllowIpv6));
        assert!(validate_host_with("fe80::1", HostPolicy::AllowIpv6));
        assert!(validate_host_with("10.0.0.1", HostPolicy::AllowIpv6));
        assert!(!validate_host_with("fe80::zz", HostPolicy::AllowIpv6));
        assert!(!validate_host_with("", HostPolicy::AllowIpv6));
    }

    #[test]
    fn test_validate_port_bounds() {
        assert!(validate_port(9020));
        assert!(validate_port(1));
        assert!(validate_port(65535));
        assert!(!validate_port(0));
        assert!(!validate_port(65536));
        assert!(!validate_port(u32::MAX));
    }

    #[test]
    fn test_validation_is_idempotent() {
        for _ in 0..3 {
            assert!(validate_host("192.168.1.167"));
            assert!(!validate_host("1.2.3"));
            assert!(validate_port(65535));
            assert!(!validate_port(0));
        }
    }

    #[test]
    fn test_ready_to_send() {
        let file = Path::new("notes.txt");
        assert!(ready_to_send("10.0.0.2", 9020, Some(file)));
        assert!(!ready_to_send("10.0.0.2", 9020, None));
        assert!(!ready_to_send("10.0.0", 9020, Some(file)));
        assert!(!ready_to_send("10.0.0.2", 0, Some(file)));
    }

    #[test]
    fn test_endpoint_parse() {
        let endpoint = Endpoint::parse("192.168.1.167", 9020).expect("valid endpoint");
        assert_eq!(endpoint.host(), IpAddr::V4(Ipv4Addr::new(192, 168, 1, 167)));
        assert_eq!(endpoint.port(), 9020);
        assert_eq!(endpoint.to_string(), "192.168.1.167:9020");

        let endpoint = Endpoint::parse("010.0.0.1", 80).expect("valid endpoint");
        assert_eq!(endpoint.host(), IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)));
    }

    #[test]
    fn test_endpoint_parse_errors() {
        let err = Endpoint::parse("1.2.3", 9020).unwrap_err();
        assert!(matches!(err, TransferError::InvalidHost { ref host } if host == "1.2.3"));

        let err = Endpoint::parse("1.2.3.4", 65536).unwrap_err();
        assert!(matches!(err, TransferError::InvalidPort { port: 65536 }));

        // Host is checked first
        let err = Endpoint::parse("", 0).unwrap_err();
        assert!(matches!(err, TransferError::InvalidHost { .. }));
    }

    #[test]
    fn test_endpoint_from_socket_addr_validates() {
        let addr: SocketAddr = "127.0.0.1:9020".parse().expect("valid socket address");
        let endpoint = Endpoint::try_from(addr).expect("valid endpoint");
        assert_eq!(endpoint.socket_addr(), addr);

        let zero_port: SocketAddr = "0.0.0.0:0".parse().expect("valid socket address");
        let err = Endpoint::try_from(zero_port).unwrap_err();
        assert!(matches!(err, TransferError::InvalidPort { port: 0 }));

        let v6: SocketAddr = "[::1]:9020".parse().expect("valid socket address");
        let err = Endpoint::try_from(v6).unwrap_err();
        assert!(matches!(err, TransferError::InvalidHost { ref host } if host == "::1"));

        let endpoint = Endpoint::from_socket_addr(v6, HostPolicy::AllowIpv6)
            .expect("IPv6 allowed by policy");
        assert_eq!(endpoint.port(), 9020);
    }

    #[test]
    fn test_endpoint_ipv6_display() {
        let endpoint =
            Endpoint::parse_with("::1", 9020, HostPolicy::AllowIpv6).expect("valid endpoint");
        assert_eq!(endpoint.to_string(), "[::1]:9020");
    }
}
