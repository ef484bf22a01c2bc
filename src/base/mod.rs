//! Base types and error handling.
//!
//! - [`NetError`](neterror::NetError): Network error codes matching `net_error_list.h`

pub mod neterror;
