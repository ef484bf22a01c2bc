//! Cloudflare first-request bypass.
//!
//! Wraps a [`Transport`] so that outgoing requests carry the headers a browser
//! would send and the TLS handshake offers a curve list Cloudflare accepts.
//! Challenges are not solved; this only avoids being flagged on the very
//! first request.
//!
//! ```rust,ignore
//! use cloudflarebp::bypass::add_cloudflare_bypass;
//! use cloudflarebp::http::{HttpTransport, Transport};
//!
//! let transport = add_cloudflare_bypass(Some(HttpTransport::new()), None);
//! let request = http::Request::get("https://example.com").body(bytes::Bytes::new())?;
//! let response = transport.round_trip(request).await?;
//! ```

mod options;
mod roundtripper;
mod tls;

pub use self::options::{
    Options, OptionsBuilder, DEFAULT_ACCEPT, DEFAULT_ACCEPT_LANGUAGE, DEFAULT_USER_AGENT,
};
pub use self::roundtripper::CloudflareRoundTripper;
pub use self::tls::{cloudflare_curves, cloudflare_tls_options, configure_tls, CLOUDFLARE_CURVES};

use crate::http::Transport;

/// Wrap `inner` with the Cloudflare bypass.
///
/// If `inner` exposes its TLS configuration, its curve preference is replaced
/// with [`CLOUDFLARE_CURVES`]; other TLS settings are left alone. Without an
/// inner transport, requests go to a fresh
/// [`HttpTransport`](crate::http::HttpTransport) built with those curves.
/// `options` defaults to [`Options::default_options`].
pub fn add_cloudflare_bypass<T: Transport>(
    inner: Option<T>,
    options: Option<Options>,
) -> CloudflareRoundTripper<T> {
    let options = options.unwrap_or_else(Options::default_options);

    match inner {
        Some(mut inner) => {
            match inner.tls_configurable() {
                Some(tls) => {
                    configure_tls(tls);
                    tracing::debug!("applied Cloudflare curve preference to inner transport");
                }
                None => tracing::debug!("inner transport has no TLS configuration; curves unchanged"),
            }
            CloudflareRoundTripper::new(inner, options)
        }
        None => CloudflareRoundTripper::fallback(options),
    }
}
