use std::io;
use thiserror::Error;

/// Network errors surfaced by transports.
///
/// Codes follow Chromium's `net_error_list.h` so they stay comparable with
/// logs from browsers.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum NetError {
    // Connection Errors
    #[error("Connection closed (TCP FIN)")]
    ConnectionClosed,
    #[error("Connection reset (TCP RST)")]
    ConnectionReset,
    #[error("Connection refused")]
    ConnectionRefused,
    #[error("Connection aborted")]
    ConnectionAborted,
    #[error("Connection failed")]
    ConnectionFailed,
    #[error("Name not resolved")]
    NameNotResolved,
    #[error("SSL protocol error")]
    SslProtocolError,
    #[error("Address unreachable")]
    AddressUnreachable,
    #[error("SSL version or cipher mismatch")]
    SslVersionOrCipherMismatch,
    #[error("Connection timed out")]
    ConnectionTimedOut,
    #[error("ALPN negotiation failed")]
    AlpnNegotiationFailed,

    // Certificate Errors
    #[error("Certificate invalid")]
    CertInvalid,

    // HTTP Errors
    #[error("Invalid URL")]
    InvalidUrl,
    #[error("Unknown URL scheme")]
    UnknownUrlScheme,
    #[error("Empty response")]
    EmptyResponse,
    #[error("Invalid HTTP response")]
    InvalidHttpResponse,

    // Body handling
    #[error("HTTP body error")]
    HttpBodyError,
    #[error("Invalid UTF-8 in body")]
    InvalidUtf8,
    #[error("JSON parse error")]
    JsonParseError,

    #[error("Unknown error ({0})")]
    Unknown(i32),
}

impl NetError {
    pub fn as_i32(&self) -> i32 {
        match self {
            NetError::ConnectionClosed => -100,
            NetError::ConnectionReset => -101,
            NetError::ConnectionRefused => -102,
            NetError::ConnectionAborted => -103,
            NetError::ConnectionFailed => -104,
            NetError::NameNotResolved => -105,
            NetError::SslProtocolError => -107,
            NetError::AddressUnreachable => -109,
            NetError::SslVersionOrCipherMismatch => -113,
            NetError::ConnectionTimedOut => -118,
            NetError::AlpnNegotiationFailed => -122,

            NetError::CertInvalid => -207,

            NetError::InvalidUrl => -300,
            NetError::UnknownUrlScheme => -302,
            NetError::EmptyResponse => -324,
            NetError::InvalidHttpResponse => -370,
            // Custom codes, outside Chromium's ranges
            NetError::HttpBodyError => -10001,
            NetError::InvalidUtf8 => -10002,
            NetError::JsonParseError => -10003,
            NetError::Unknown(code) => *code,
        }
    }

    /// Classify an I/O error raised while connecting or exchanging bytes.
    pub fn from_io(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::ConnectionRefused => NetError::ConnectionRefused,
            io::ErrorKind::ConnectionReset => NetError::ConnectionReset,
            io::ErrorKind::ConnectionAborted => NetError::ConnectionAborted,
            io::ErrorKind::TimedOut => NetError::ConnectionTimedOut,
            io::ErrorKind::AddrNotAvailable => NetError::AddressUnreachable,
            io::ErrorKind::UnexpectedEof => NetError::EmptyResponse,
            _ => NetError::ConnectionFailed,
        }
    }
}

impl From<i32> for NetError {
    fn from(code: i32) -> Self {
        match code {
            -100 => NetError::ConnectionClosed,
            -101 => NetError::ConnectionReset,
            -102 => NetError::ConnectionRefused,
            -103 => NetError::ConnectionAborted,
            -104 => NetError::ConnectionFailed,
            -105 => NetError::NameNotResolved,
            -107 => NetError::SslProtocolError,
            -109 => NetError::AddressUnreachable,
            -113 => NetError::SslVersionOrCipherMismatch,
            -118 => NetError::ConnectionTimedOut,
            -122 => NetError::AlpnNegotiationFailed,
            -207 => NetError::CertInvalid,
            -300 => NetError::InvalidUrl,
            -302 => NetError::UnknownUrlScheme,
            -324 => NetError::EmptyResponse,
            -370 => NetError::InvalidHttpResponse,
            -10001 => NetError::HttpBodyError,
            -10002 => NetError::InvalidUtf8,
            -10003 => NetError::JsonParseError,
            code => NetError::Unknown(code),
        }
    }
}

impl From<io::Error> for NetError {
    fn from(err: io::Error) -> Self {
        NetError::from_io(&err)
    }
}
