//! HTTP body helpers

mod multipart;

pub use multipart::{attachment_from_path, build_multipart_form};
