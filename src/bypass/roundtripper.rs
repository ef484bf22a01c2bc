use super::options::Options;
use super::tls::cloudflare_tls_options;
use crate::http::transport::{TlsConfigurable, Transport, TransportFuture};
use crate::http::HttpTransport;
use bytes::Bytes;
use http::Request;

/// Where requests go after the headers are merged.
#[derive(Debug, Clone)]
enum Inner<T> {
    Supplied(T),
    /// No transport was given at wrap time.
    Fallback(HttpTransport),
}

/// Transport decorator adding browser-like headers to every request.
///
/// Created by [`add_cloudflare_bypass`](super::add_cloudflare_bypass). The
/// options are fixed for the lifetime of the decorator and only read while
/// sending, so one instance can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct CloudflareRoundTripper<T> {
    inner: Inner<T>,
    options: Options,
}

impl<T: Transport> CloudflareRoundTripper<T> {
    /// Wrap `inner` without touching its TLS configuration.
    pub fn new(inner: T, options: Options) -> Self {
        Self {
            inner: Inner::Supplied(inner),
            options,
        }
    }

    /// Decorator over a fresh [`HttpTransport`] with the Cloudflare curves.
    pub(super) fn fallback(options: Options) -> Self {
        Self {
            inner: Inner::Fallback(HttpTransport::with_tls_options(cloudflare_tls_options())),
            options,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The wrapped transport, `None` when running on the fallback transport.
    pub fn inner(&self) -> Option<&T> {
        match &self.inner {
            Inner::Supplied(inner) => Some(inner),
            Inner::Fallback(_) => None,
        }
    }

    /// Unwrap the decorator, returning the supplied transport if there was one.
    pub fn into_inner(self) -> Option<T> {
        match self.inner {
            Inner::Supplied(inner) => Some(inner),
            Inner::Fallback(_) => None,
        }
    }
}

impl CloudflareRoundTripper<HttpTransport> {
    /// Decorator over a fresh [`HttpTransport`] carrying only the Cloudflare
    /// curve preference on top of default TLS settings.
    pub fn standalone(options: Options) -> Self {
        Self::fallback(options)
    }
}

impl<T: Transport> Transport for CloudflareRoundTripper<T> {
    fn round_trip(&self, mut request: Request<Bytes>) -> TransportFuture<'_> {
        let added = self.options.merge_into(request.headers_mut());
        tracing::trace!(uri = %request.uri(), added, "merged default headers");

        match &self.inner {
            Inner::Supplied(inner) => inner.round_trip(request),
            Inner::Fallback(fallback) => fallback.round_trip(request),
        }
    }

    fn tls_configurable(&mut self) -> Option<&mut dyn TlsConfigurable> {
        match &mut self.inner {
            Inner::Supplied(inner) => inner.tls_configurable(),
            Inner::Fallback(fallback) => fallback.tls_configurable(),
        }
    }
}
