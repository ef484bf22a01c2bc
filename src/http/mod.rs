pub mod response;
pub mod responsebody;
pub mod transport;

// Re-exports for convenience
pub use response::HttpResponse;
pub use responsebody::ResponseBody;
pub use transport::{HttpTransport, HttpTransportBuilder, TlsConfigurable, Transport};
