//! Response body, streamed from the connection or already in memory.

use crate::base::neterror::NetError;
use bytes::Bytes;
use http_body_util::BodyExt;
use hyper::body::Incoming;

/// Response body wrapper.
pub enum ResponseBody {
    /// Body still being read from the connection.
    Streaming(Incoming),
    /// Body produced without a connection, e.g. by a custom transport.
    Full(Bytes),
}

impl ResponseBody {
    /// Wrap a hyper body.
    pub fn new(inner: Incoming) -> Self {
        ResponseBody::Streaming(inner)
    }

    /// Read entire body as bytes.
    pub async fn bytes(self) -> Result<Bytes, NetError> {
        match self {
            ResponseBody::Streaming(inner) => {
                let collected = inner.collect().await.map_err(|_| NetError::HttpBodyError)?;
                Ok(collected.to_bytes())
            }
            ResponseBody::Full(bytes) => Ok(bytes),
        }
    }

    /// Read body as UTF-8 string.
    pub async fn text(self) -> Result<String, NetError> {
        let bytes = self.bytes().await?;
        String::from_utf8(bytes.to_vec()).map_err(|_| NetError::InvalidUtf8)
    }

    /// Read body as JSON, deserializing to type T.
    #[cfg(feature = "json")]
    pub async fn json<T: serde::de::DeserializeOwned>(self) -> Result<T, NetError> {
        let bytes = self.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|_| NetError::JsonParseError)
    }
}

impl From<Bytes> for ResponseBody {
    fn from(bytes: Bytes) -> Self {
        ResponseBody::Full(bytes)
    }
}

impl std::fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseBody::Streaming(_) => f.write_str("ResponseBody::Streaming"),
            ResponseBody::Full(b) => write!(f, "ResponseBody::Full({} bytes)", b.len()),
        }
    }
}
