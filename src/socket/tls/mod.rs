//! TLS configuration for outbound connections.
//!
//! Curve, protocol and version names follow BoringSSL's spelling so that a
//! [`TlsOptions`] value maps one-to-one onto an `SslConnectorBuilder`.

use boring::ssl::SslVersion;
use std::fmt;

pub mod options;

pub use self::options::{TlsOptions, TlsOptionsBuilder};

/// Named elliptic curve (TLS supported group).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Curve {
    /// secp256r1
    P256,
    /// secp384r1
    P384,
    /// secp521r1
    P521,
    X25519,
}

impl Curve {
    /// Name understood by `SSL_CTX_set1_curves_list`.
    pub const fn name(self) -> &'static str {
        match self {
            Curve::P256 => "P-256",
            Curve::P384 => "P-384",
            Curve::P521 => "P-521",
            Curve::X25519 => "X25519",
        }
    }

    /// Join curves into a colon separated preference list.
    pub fn list(curves: &[Curve]) -> String {
        curves
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(":")
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// TLS protocol version bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TlsVersion(pub SslVersion);

impl TlsVersion {
    pub const TLS_1_2: TlsVersion = TlsVersion(SslVersion::TLS1_2);
    pub const TLS_1_3: TlsVersion = TlsVersion(SslVersion::TLS1_3);
}

/// Application protocol advertised through ALPN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlpnProtocol(&'static str);

impl AlpnProtocol {
    pub const HTTP1: AlpnProtocol = AlpnProtocol("http/1.1");
    pub const HTTP2: AlpnProtocol = AlpnProtocol("h2");

    pub const fn as_str(self) -> &'static str {
        self.0
    }
}
