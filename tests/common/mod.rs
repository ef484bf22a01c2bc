//! Shared helpers for integration tests.
#![allow(dead_code)]

use boring::asn1::Asn1Time;
use boring::bn::BigNum;
use boring::ec::{EcGroup, EcKey};
use boring::hash::MessageDigest;
use boring::nid::Nid;
use boring::pkey::{PKey, Private};
use boring::ssl::{SslAcceptor, SslMethod};
use boring::x509::extension::{BasicConstraints, SubjectAlternativeName};
use boring::x509::{X509Name, X509NameBuilder, X509};
use bytes::Bytes;
use cloudflarebp::base::neterror::NetError;
use cloudflarebp::http::transport::TransportFuture;
use cloudflarebp::{HttpResponse, TlsConfigurable, TlsOptions, Transport};
use http::{HeaderMap, Request, StatusCode};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

/// Start a plain HTTP/1.1 server that answers every request with `body` and
/// forwards the raw request head to the returned channel.
pub async fn start_capture_server(
    body: &'static str,
) -> (SocketAddr, mpsc::UnboundedReceiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            let tx = tx.clone();
            tokio::spawn(async move {
                if let Some(head) = answer(socket, body).await {
                    let _ = tx.send(head);
                }
            });
        }
    });

    (addr, rx)
}

/// Read one request head, reply with `body` and close. Returns the head.
async fn answer<S>(mut socket: S, body: &'static str) -> Option<String>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    loop {
        let n = match socket.read(&mut buf).await {
            Ok(0) | Err(_) => return None,
            Ok(n) => n,
        };
        head.extend_from_slice(&buf[..n]);
        if head.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }

    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
    Some(String::from_utf8_lossy(&head).into_owned())
}

/// Start an HTTPS server on 127.0.0.1 presenting `cert`.
///
/// When `curves` is set the server accepts only those key exchange groups.
pub async fn start_tls_server(
    cert: X509,
    key: PKey<Private>,
    curves: Option<&str>,
    body: &'static str,
) -> SocketAddr {
    let mut builder = SslAcceptor::mozilla_intermediate(SslMethod::tls()).unwrap();
    builder.set_certificate(&cert).unwrap();
    builder.set_private_key(&key).unwrap();
    if let Some(curves) = curves {
        builder.set_curves_list(curves).unwrap();
    }
    let acceptor = Arc::new(builder.build());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            let acceptor = Arc::clone(&acceptor);
            tokio::spawn(async move {
                if let Ok(stream) = tokio_boring::accept(&acceptor, socket).await {
                    answer(stream, body).await;
                }
            });
        }
    });

    addr
}

/// Throwaway certificate authority for local TLS servers.
pub struct TestCa {
    pub cert: X509,
    key: PKey<Private>,
}

impl TestCa {
    pub fn new() -> Self {
        let key = ec_key();
        let name = common_name("cloudflarebp test root");

        let mut builder = X509::builder().unwrap();
        builder.set_version(2).unwrap();
        builder.set_serial_number(&serial(1)).unwrap();
        builder.set_subject_name(&name).unwrap();
        builder.set_issuer_name(&name).unwrap();
        builder.set_pubkey(&key).unwrap();
        builder.set_not_before(&Asn1Time::days_from_now(0).unwrap()).unwrap();
        builder.set_not_after(&Asn1Time::days_from_now(1).unwrap()).unwrap();
        builder
            .append_extension(BasicConstraints::new().critical().ca().build().unwrap())
            .unwrap();
        builder.sign(&key, MessageDigest::sha256()).unwrap();

        Self {
            cert: builder.build(),
            key,
        }
    }

    pub fn der(&self) -> Vec<u8> {
        self.cert.to_der().unwrap()
    }

    /// Issue a server certificate for the given DNS names and IP addresses.
    pub fn issue(&self, dns_names: &[&str], ips: &[&str]) -> (X509, PKey<Private>) {
        let key = ec_key();

        let mut builder = X509::builder().unwrap();
        builder.set_version(2).unwrap();
        builder.set_serial_number(&serial(2)).unwrap();
        builder.set_subject_name(&common_name("server")).unwrap();
        builder.set_issuer_name(self.cert.subject_name()).unwrap();
        builder.set_pubkey(&key).unwrap();
        builder.set_not_before(&Asn1Time::days_from_now(0).unwrap()).unwrap();
        builder.set_not_after(&Asn1Time::days_from_now(1).unwrap()).unwrap();

        let mut san = SubjectAlternativeName::new();
        for name in dns_names {
            san.dns(name);
        }
        for ip in ips {
            san.ip(ip);
        }
        let san = san
            .build(&builder.x509v3_context(Some(&self.cert), None))
            .unwrap();
        builder.append_extension(san).unwrap();
        builder.sign(&self.key, MessageDigest::sha256()).unwrap();

        (builder.build(), key)
    }
}

fn ec_key() -> PKey<Private> {
    let group = EcGroup::from_curve_name(Nid::X9_62_PRIME256V1).unwrap();
    PKey::from_ec_key(EcKey::generate(&group).unwrap()).unwrap()
}

fn common_name(cn: &str) -> X509Name {
    let mut name = X509NameBuilder::new().unwrap();
    name.append_entry_by_nid(Nid::COMMONNAME, cn).unwrap();
    name.build()
}

fn serial(n: u32) -> boring::asn1::Asn1Integer {
    BigNum::from_u32(n).unwrap().to_asn1_integer().unwrap()
}

/// Address on localhost with nothing listening.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// Find a header line in a raw request head, case-insensitively.
pub fn header_line<'a>(head: &'a str, name: &str) -> Option<&'a str> {
    head.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        key.trim()
            .eq_ignore_ascii_case(name)
            .then(|| value.trim())
    })
}

pub fn empty_request(uri: &str) -> Request<Bytes> {
    Request::get(uri).body(Bytes::new()).unwrap()
}

/// In-memory transport that records the headers it receives.
#[derive(Clone, Default)]
pub struct RecordingTransport {
    pub seen: Arc<Mutex<Vec<HeaderMap>>>,
    pub fail_with: Option<NetError>,
}

impl RecordingTransport {
    pub fn failing(err: NetError) -> Self {
        Self {
            seen: Arc::default(),
            fail_with: Some(err),
        }
    }

    pub fn last_headers(&self) -> HeaderMap {
        self.seen.lock().unwrap().last().cloned().unwrap_or_default()
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

impl Transport for RecordingTransport {
    fn round_trip(&self, request: Request<Bytes>) -> TransportFuture<'_> {
        self.seen.lock().unwrap().push(request.headers().clone());
        let result = match self.fail_with {
            Some(err) => Err(err),
            None => Ok(HttpResponse::from_parts(
                StatusCode::OK,
                HeaderMap::new(),
                "recorded",
            )),
        };
        Box::pin(async move { result })
    }
}

/// In-memory transport that also owns a TLS configuration.
#[derive(Default)]
pub struct TlsRecordingTransport {
    pub recorder: RecordingTransport,
    pub tls: TlsOptions,
}

impl Transport for TlsRecordingTransport {
    fn round_trip(&self, request: Request<Bytes>) -> TransportFuture<'_> {
        self.recorder.round_trip(request)
    }

    fn tls_configurable(&mut self) -> Option<&mut dyn TlsConfigurable> {
        Some(self)
    }
}

impl TlsConfigurable for TlsRecordingTransport {
    fn tls_options(&self) -> &TlsOptions {
        &self.tls
    }

    fn set_tls_options(&mut self, options: TlsOptions) {
        self.tls = options;
    }
}
