//! TLS curve preference accepted by Cloudflare's first-request checks.
//!
//! See <https://wiki.mozilla.org/Security/Server_Side_TLS> if the list ever
//! needs updating.

use crate::http::transport::TlsConfigurable;
use crate::socket::tls::{Curve, TlsOptions};

/// Curve preference, most preferred first.
pub const CLOUDFLARE_CURVES: [Curve; 4] = [Curve::P256, Curve::P384, Curve::P521, Curve::X25519];

/// The Cloudflare curve preference as an owned list.
pub fn cloudflare_curves() -> Vec<Curve> {
    CLOUDFLARE_CURVES.to_vec()
}

/// Default TLS options with only the curve preference changed.
pub fn cloudflare_tls_options() -> TlsOptions {
    TlsOptions::builder().curves(&CLOUDFLARE_CURVES).build()
}

/// Overwrite the curve preference of `target`; every other TLS setting is kept.
pub fn configure_tls(target: &mut dyn TlsConfigurable) {
    let mut options = target.tls_options().clone();
    options.curves = cloudflare_curves();
    target.set_tls_options(options);
}
