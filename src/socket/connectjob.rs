use crate::base::neterror::NetError;
use crate::socket::client::SocketType;
use crate::socket::tls::TlsOptions;
use boring::ssl::{SslConnector, SslMethod};
use tokio::net::TcpStream;
use url::Url;

/// Manages the connection process: DNS -> TCP -> SSL.
/// Roughly equivalent to net::ConnectJob.
pub struct ConnectJob;

impl ConnectJob {
    pub async fn connect(url: &Url, tls: &TlsOptions) -> Result<SocketType, NetError> {
        let host = url.host_str().ok_or(NetError::InvalidUrl)?;
        let port = url.port_or_known_default().ok_or(NetError::InvalidUrl)?;

        // 1. DNS Resolution
        let lookup = host.trim_start_matches('[').trim_end_matches(']');
        let addrs: Vec<_> = tokio::net::lookup_host((lookup, port))
            .await
            .map_err(|e| {
                tracing::debug!(host = %host, error = %e, "DNS resolution failed");
                NetError::NameNotResolved
            })?
            .collect();
        if addrs.is_empty() {
            return Err(NetError::NameNotResolved);
        }
        tracing::debug!(host = %host, count = addrs.len(), "DNS resolution complete");

        // 2. TCP Connect, first address that answers wins
        let mut last_err = NetError::ConnectionFailed;
        let mut stream = None;
        for addr in addrs {
            match TcpStream::connect(addr).await {
                Ok(s) => {
                    stream = Some(s);
                    break;
                }
                Err(e) => {
                    tracing::debug!(%addr, error = %e, "TCP connect failed");
                    last_err = NetError::from_io(&e);
                }
            }
        }
        let stream = stream.ok_or(last_err)?;
        if let Err(e) = stream.set_nodelay(true) {
            tracing::debug!(host = %host, error = %e, "failed to set TCP_NODELAY");
        }

        if url.scheme() != "https" {
            return Ok(SocketType::Tcp(stream));
        }

        // 3. SSL Handshake
        let mut builder =
            SslConnector::builder(SslMethod::tls()).map_err(|_| NetError::SslProtocolError)?;
        tls.apply_to_builder(&mut builder)?;

        let connector = builder.build();
        // SNI is left out for IP literals, which are checked against the IP SAN.
        let config = connector
            .configure()
            .map_err(|_| NetError::SslProtocolError)?;

        let tls_stream = tokio_boring::connect(config, lookup, stream)
            .await
            .map_err(|e| {
                tracing::debug!(host = %host, error = ?e, "SSL handshake failed");
                NetError::SslProtocolError
            })?;

        Ok(SocketType::Ssl(tls_stream))
    }
}
