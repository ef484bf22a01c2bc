//! # cloudflarebp
//!
//! A transport decorator that keeps outbound HTTP requests from being flagged
//! by Cloudflare on the very first request.
//!
//! Wrapping a transport with [`add_cloudflare_bypass`] does two things:
//!
//! - **Headers**: `Accept`, `Accept-Language` and `User-Agent` are filled in
//!   with browser values when the request does not already carry them.
//! - **TLS**: the curve preference of the wrapped transport becomes
//!   `P-256, P-384, P-521, X25519`, when the transport exposes its TLS
//!   configuration.
//!
//! It does not solve challenges, keep cookies or retry anything.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cloudflarebp::{add_cloudflare_bypass, HttpTransport, Transport};
//!
//! #[tokio::main]
//! async fn main() {
//!     let transport = add_cloudflare_bypass(Some(HttpTransport::new()), None);
//!     let request = http::Request::get("https://example.com")
//!         .body(bytes::Bytes::new())
//!         .unwrap();
//!     let response = transport.round_trip(request).await.unwrap();
//!     println!("Status: {}", response.status());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error definitions
//! - [`bypass`] - The header/TLS decorator and its options
//! - [`http`] - Transport trait, default transport and responses
//! - [`socket`] - Connection setup and TLS options

pub mod base;
pub mod bypass;
pub mod http;
pub mod socket;

pub use crate::base::neterror::NetError;
pub use crate::bypass::{add_cloudflare_bypass, CloudflareRoundTripper, Options};
pub use crate::http::{HttpResponse, HttpTransport, TlsConfigurable, Transport};
pub use crate::socket::tls::{Curve, TlsOptions};
