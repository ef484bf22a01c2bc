use super::{AlpnProtocol, Curve, TlsVersion};
use crate::base::neterror::NetError;
use boring::ssl::{SslConnectorBuilder, SslOptions, SslVerifyMode};
use boring::x509::X509;

/// Builder for `TlsOptions`.
#[must_use]
#[derive(Debug, Clone)]
pub struct TlsOptionsBuilder {
    config: TlsOptions,
}

/// TLS connection configuration options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsOptions {
    /// ALPN protocols.
    pub alpn_protocols: Vec<AlpnProtocol>,

    /// Minimum TLS version.
    pub min_tls_version: Option<TlsVersion>,

    /// Maximum TLS version.
    pub max_tls_version: Option<TlsVersion>,

    /// Enable session tickets.
    pub session_ticket: bool,

    /// Cipher suite configuration string.
    pub cipher_list: Option<String>,

    /// Curve preference, most preferred first. Empty keeps BoringSSL's default.
    pub curves: Vec<Curve>,

    /// Supported signature algorithms.
    pub sigalgs_list: Option<String>,

    /// Enable OCSP stapling.
    pub enable_ocsp_stapling: bool,

    /// Enable Signed Certificate Timestamps (SCT).
    pub enable_signed_cert_timestamps: bool,

    /// Enable GREASE.
    pub grease_enabled: Option<bool>,

    /// Verify the peer certificate chain and its name or IP address.
    pub verify_peer: bool,

    /// Extra DER-encoded trust anchors, added to the system store.
    pub root_certificates: Vec<Vec<u8>>,
}

impl Default for TlsOptions {
    fn default() -> Self {
        Self {
            // The transport only speaks HTTP/1.1.
            alpn_protocols: vec![AlpnProtocol::HTTP1],
            min_tls_version: Some(TlsVersion::TLS_1_2),
            max_tls_version: Some(TlsVersion::TLS_1_3),
            session_ticket: true,
            cipher_list: None,
            curves: Vec::new(),
            sigalgs_list: None,
            enable_ocsp_stapling: false,
            enable_signed_cert_timestamps: false,
            grease_enabled: None,
            verify_peer: true,
            root_certificates: Vec::new(),
        }
    }
}

impl Default for TlsOptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TlsOptionsBuilder {
    pub fn new() -> Self {
        Self {
            config: TlsOptions::default(),
        }
    }

    pub fn alpn_protocols<I>(mut self, alpn: I) -> Self
    where
        I: IntoIterator<Item = AlpnProtocol>,
    {
        self.config.alpn_protocols = alpn.into_iter().collect();
        self
    }

    pub fn min_tls_version(mut self, version: TlsVersion) -> Self {
        self.config.min_tls_version = Some(version);
        self
    }

    pub fn max_tls_version(mut self, version: TlsVersion) -> Self {
        self.config.max_tls_version = Some(version);
        self
    }

    pub fn session_ticket(mut self, enabled: bool) -> Self {
        self.config.session_ticket = enabled;
        self
    }

    pub fn cipher_list(mut self, ciphers: &str) -> Self {
        self.config.cipher_list = Some(ciphers.to_string());
        self
    }

    pub fn curves(mut self, curves: &[Curve]) -> Self {
        self.config.curves = curves.to_vec();
        self
    }

    pub fn sigalgs_list(mut self, sigalgs: &str) -> Self {
        self.config.sigalgs_list = Some(sigalgs.to_string());
        self
    }

    pub fn grease_enabled(mut self, enabled: bool) -> Self {
        self.config.grease_enabled = Some(enabled);
        self
    }

    pub fn enable_ocsp_stapling(mut self, enabled: bool) -> Self {
        self.config.enable_ocsp_stapling = enabled;
        self
    }

    pub fn enable_signed_cert_timestamps(mut self, enabled: bool) -> Self {
        self.config.enable_signed_cert_timestamps = enabled;
        self
    }

    /// Disable certificate verification. Only meant for local testing.
    pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.config.verify_peer = !accept;
        self
    }

    /// Trust an additional root certificate, DER encoded.
    pub fn add_root_certificate_der(mut self, der: impl Into<Vec<u8>>) -> Self {
        self.config.root_certificates.push(der.into());
        self
    }

    pub fn build(self) -> TlsOptions {
        self.config
    }
}

impl TlsOptions {
    pub fn builder() -> TlsOptionsBuilder {
        TlsOptionsBuilder::new()
    }

    /// Curve preference in `SSL_CTX_set1_curves_list` syntax, if any is set.
    pub fn curves_list(&self) -> Option<String> {
        if self.curves.is_empty() {
            None
        } else {
            Some(Curve::list(&self.curves))
        }
    }

    /// Apply this configuration to an SSL connector builder.
    pub fn apply_to_builder(&self, builder: &mut SslConnectorBuilder) -> Result<(), NetError> {
        if let Some(min) = self.min_tls_version {
            builder
                .set_min_proto_version(Some(min.0))
                .map_err(|_| NetError::SslProtocolError)?;
        }
        if let Some(max) = self.max_tls_version {
            builder
                .set_max_proto_version(Some(max.0))
                .map_err(|_| NetError::SslProtocolError)?;
        }

        if let Some(ciphers) = &self.cipher_list {
            builder
                .set_cipher_list(ciphers)
                .map_err(|_| NetError::SslVersionOrCipherMismatch)?;
        }

        if !self.alpn_protocols.is_empty() {
            let mut alpn_wire = Vec::new();
            for proto in &self.alpn_protocols {
                let proto = proto.as_str();
                if proto.len() > 255 {
                    return Err(NetError::AlpnNegotiationFailed);
                }
                alpn_wire.push(proto.len() as u8);
                alpn_wire.extend_from_slice(proto.as_bytes());
            }
            builder
                .set_alpn_protos(&alpn_wire)
                .map_err(|_| NetError::AlpnNegotiationFailed)?;
        }

        if let Some(sigalgs) = &self.sigalgs_list {
            builder
                .set_sigalgs_list(sigalgs)
                .map_err(|_| NetError::SslProtocolError)?;
        }

        if let Some(curves) = self.curves_list() {
            builder
                .set_curves_list(&curves)
                .map_err(|_| NetError::SslProtocolError)?;
        }

        if !self.session_ticket {
            builder.set_options(SslOptions::NO_TICKET);
        }

        if let Some(grease) = self.grease_enabled {
            builder.set_grease_enabled(grease);
        }
        if self.enable_ocsp_stapling {
            builder.enable_ocsp_stapling();
        }
        if self.enable_signed_cert_timestamps {
            builder.enable_signed_cert_timestamps();
        }

        for der in &self.root_certificates {
            let cert = X509::from_der(der).map_err(|_| NetError::CertInvalid)?;
            builder
                .cert_store_mut()
                .add_cert(cert)
                .map_err(|_| NetError::CertInvalid)?;
        }

        if self.verify_peer {
            builder.set_verify(SslVerifyMode::PEER);
        } else {
            builder.set_verify(SslVerifyMode::NONE);
        }

        Ok(())
    }
}
