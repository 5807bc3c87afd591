//! Port definitions (interfaces)
//!
//! Ports define the boundary between the request core and the outside
//! world. The original system bound these capabilities to an ambient
//! host context; here they are explicit injected interfaces so the core
//! stays pure and independently testable.

mod credentials_provider;
mod http_transport;

pub use credentials_provider::{CredentialsError, CredentialsProvider};
pub use http_transport::{
    HttpTransport, MultipartField, TransportError, WireBody, WireRequest, WireResponse,
};
