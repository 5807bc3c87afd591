//! Port adapters

mod reqwest_transport;
mod static_credentials;

pub use reqwest_transport::ReqwestTransport;
pub use static_credentials::StaticCredentialsProvider;
