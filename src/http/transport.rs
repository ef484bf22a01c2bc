//! Request-sending capability and the default HTTP/1.1 transport.
//!
//! A [`Transport`] turns one request into one response. Transports that own a
//! TLS configuration may additionally expose it through
//! [`Transport::tls_configurable`], which lets wrappers adjust the handshake
//! without knowing the concrete transport type.

use crate::base::neterror::NetError;
use crate::http::HttpResponse;
use crate::socket::connectjob::ConnectJob;
use crate::socket::tls::TlsOptions;
use bytes::Bytes;
use futures::future::BoxFuture;
use http::header::HOST;
use http::{HeaderValue, Request, Uri, Version};
use http_body_util::Full;
use hyper::client::conn::http1;
use hyper_util::rt::TokioIo;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Future returned by [`Transport::round_trip`].
pub type TransportFuture<'a> = BoxFuture<'a, Result<HttpResponse, NetError>>;

/// Sends a single request and yields its response.
pub trait Transport: Send + Sync {
    /// Execute one HTTP exchange.
    fn round_trip(&self, request: Request<Bytes>) -> TransportFuture<'_>;

    /// Mutable access to the TLS configuration, when the transport has one.
    fn tls_configurable(&mut self) -> Option<&mut dyn TlsConfigurable> {
        None
    }
}

/// A transport whose TLS configuration can be read and replaced.
pub trait TlsConfigurable {
    fn tls_options(&self) -> &TlsOptions;

    fn set_tls_options(&mut self, options: TlsOptions);
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn round_trip(&self, request: Request<Bytes>) -> TransportFuture<'_> {
        (**self).round_trip(request)
    }

    fn tls_configurable(&mut self) -> Option<&mut dyn TlsConfigurable> {
        (**self).tls_configurable()
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn round_trip(&self, request: Request<Bytes>) -> TransportFuture<'_> {
        (**self).round_trip(request)
    }

    /// Only available while this is the sole handle to the transport.
    fn tls_configurable(&mut self) -> Option<&mut dyn TlsConfigurable> {
        Arc::get_mut(self).and_then(|inner| inner.tls_configurable())
    }
}

/// Default transport: one connection per request, DNS → TCP → TLS → HTTP/1.1.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    tls_options: TlsOptions,
    timeout: Option<Duration>,
}

/// Builder for [`HttpTransport`].
#[must_use]
#[derive(Debug, Clone, Default)]
pub struct HttpTransportBuilder {
    tls_options: Option<TlsOptions>,
    timeout: Option<Duration>,
}

impl HttpTransportBuilder {
    /// Set TLS options.
    pub fn tls_options(mut self, opts: TlsOptions) -> Self {
        self.tls_options = Some(opts);
        self
    }

    /// Bound the whole exchange (connect, send, response head).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> HttpTransport {
        HttpTransport {
            tls_options: self.tls_options.unwrap_or_default(),
            timeout: self.timeout,
        }
    }
}

impl HttpTransport {
    /// Create a transport with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> HttpTransportBuilder {
        HttpTransportBuilder::default()
    }

    /// Create a transport using the given TLS options.
    pub fn with_tls_options(tls_options: TlsOptions) -> Self {
        Self {
            tls_options,
            timeout: None,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    async fn send(&self, request: Request<Bytes>) -> Result<HttpResponse, NetError> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.exchange(request))
                .await
                .map_err(|_| NetError::ConnectionTimedOut)?,
            None => self.exchange(request).await,
        }
    }

    async fn exchange(&self, request: Request<Bytes>) -> Result<HttpResponse, NetError> {
        let url = Url::parse(&request.uri().to_string()).map_err(|_| NetError::InvalidUrl)?;
        match url.scheme() {
            "http" | "https" => {}
            _ => return Err(NetError::UnknownUrlScheme),
        }

        let socket = ConnectJob::connect(&url, &self.tls_options).await?;
        tracing::trace!(
            url = %url,
            tls = socket.is_tls(),
            alpn = ?socket.negotiated_alpn().map(String::from_utf8_lossy),
            "connected"
        );

        let (mut sender, conn) = http1::handshake(TokioIo::new(socket))
            .await
            .map_err(|_| NetError::ConnectionFailed)?;
        tokio::spawn(async move {
            if let Err(e) = conn.await {
                tracing::debug!(error = %e, "connection driver failed");
            }
        });

        let (mut parts, body) = request.into_parts();
        if !parts.headers.contains_key(HOST) {
            parts.headers.insert(HOST, host_header(&url)?);
        }
        parts.uri = origin_form(&url)?;
        parts.version = Version::HTTP_11;

        let response = sender
            .send_request(Request::from_parts(parts, Full::new(body)))
            .await
            .map_err(|e| {
                tracing::debug!(url = %url, error = %e, "request failed");
                classify_hyper_error(&e)
            })?;

        tracing::debug!(url = %url, status = %response.status(), "response received");
        Ok(HttpResponse::from_hyper(response))
    }
}

impl Transport for HttpTransport {
    fn round_trip(&self, request: Request<Bytes>) -> TransportFuture<'_> {
        Box::pin(self.send(request))
    }

    fn tls_configurable(&mut self) -> Option<&mut dyn TlsConfigurable> {
        Some(self)
    }
}

impl TlsConfigurable for HttpTransport {
    fn tls_options(&self) -> &TlsOptions {
        &self.tls_options
    }

    fn set_tls_options(&mut self, options: TlsOptions) {
        self.tls_options = options;
    }
}

/// `Host` value for a URL; the port is only kept when it is not the default.
fn host_header(url: &Url) -> Result<HeaderValue, NetError> {
    let host = url.host_str().ok_or(NetError::InvalidUrl)?;
    let value = match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    };
    HeaderValue::from_str(&value).map_err(|_| NetError::InvalidUrl)
}

fn origin_form(url: &Url) -> Result<Uri, NetError> {
    let target = match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    };
    target.parse().map_err(|_| NetError::InvalidUrl)
}

fn classify_hyper_error(err: &hyper::Error) -> NetError {
    if err.is_timeout() {
        NetError::ConnectionTimedOut
    } else if err.is_incomplete_message() {
        NetError::EmptyResponse
    } else if err.is_parse() {
        NetError::InvalidHttpResponse
    } else if err.is_canceled() || err.is_closed() {
        NetError::ConnectionClosed
    } else {
        NetError::ConnectionFailed
    }
}
