//! Countersign Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports defined in
//! the application layer: a reqwest-backed HTTP transport and an
//! in-memory credentials provider, plus helpers for assembling
//! multipart bodies and loading attachments from disk.

pub mod adapters;
pub mod http;

pub use adapters::{ReqwestTransport, StaticCredentialsProvider};
pub use http::{attachment_from_path, build_multipart_form};
