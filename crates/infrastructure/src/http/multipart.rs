//! Multipart form assembly
//!
//! Builds `reqwest` multipart forms from the wire-level field list: one
//! part per text field or attachment, with the declared content type or
//! a guess from the filename.

use std::path::Path;

use mime::Mime;
use reqwest::multipart::{Form, Part};

use countersign_application::ports::{MultipartField, TransportError};
use countersign_domain::FileAttachment;

/// Builds a multipart form from wire fields.
///
/// # Errors
///
/// Returns [`TransportError::InvalidRequest`] when a declared content
/// type is not a parseable MIME type.
pub fn build_multipart_form(fields: &[MultipartField]) -> Result<Form, TransportError> {
    let mut form = Form::new();
    for field in fields {
        match field {
            MultipartField::Text { name, value } => {
                form = form.text(name.clone(), value.clone());
            }
            MultipartField::File(attachment) => {
                let mime_type = resolve_mime(attachment)?;
                let part = Part::bytes(attachment.bytes.clone())
                    .file_name(attachment.filename.clone())
                    .mime_str(mime_type.as_ref())
                    .map_err(|error| {
                        TransportError::InvalidRequest(format!(
                            "invalid content type for {}: {error}",
                            attachment.filename
                        ))
                    })?;
                form = form.part(attachment.field_name.clone(), part);
            }
        }
    }
    Ok(form)
}

fn resolve_mime(attachment: &FileAttachment) -> Result<Mime, TransportError> {
    match &attachment.content_type {
        Some(declared) => declared.parse().map_err(|_| {
            TransportError::InvalidRequest(format!(
                "invalid content type {declared} for {}",
                attachment.filename
            ))
        }),
        None => Ok(mime_guess::from_path(&attachment.filename).first_or_octet_stream()),
    }
}

/// Reads a file into an attachment, guessing the content type from the
/// path.
///
/// # Errors
///
/// Returns [`TransportError::InvalidRequest`] when the file cannot be
/// read.
pub async fn attachment_from_path(
    field_name: impl Into<String>,
    path: impl AsRef<Path>,
) -> Result<FileAttachment, TransportError> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await.map_err(|error| {
        TransportError::InvalidRequest(format!("{}: {error}", path.display()))
    })?;

    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("file")
        .to_string();
    let mime_type = mime_guess::from_path(path).first_or_octet_stream();

    Ok(FileAttachment::new(field_name, filename, bytes).with_content_type(mime_type.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_build_form_with_text_and_file() {
        let fields = vec![
            MultipartField::Text {
                name: "template_id".to_string(),
                value: "7".to_string(),
            },
            MultipartField::File(FileAttachment::new(
                "file",
                "contract.pdf",
                b"%PDF-1.7".to_vec(),
            )),
        ];

        assert!(build_multipart_form(&fields).is_ok());
    }

    #[test]
    fn test_declared_content_type_wins() {
        let attachment = FileAttachment::new("file", "scan.bin", vec![1, 2])
            .with_content_type("application/pdf");
        assert_eq!(resolve_mime(&attachment).unwrap().as_ref(), "application/pdf");
    }

    #[test]
    fn test_content_type_guessed_from_filename() {
        let attachment = FileAttachment::new("file", "photo.png", vec![1]);
        assert_eq!(resolve_mime(&attachment).unwrap().as_ref(), "image/png");

        let unknown = FileAttachment::new("file", "blob.unknownext", vec![1]);
        assert_eq!(
            resolve_mime(&unknown).unwrap().as_ref(),
            "application/octet-stream"
        );
    }

    #[test]
    fn test_invalid_declared_content_type_rejected() {
        let attachment =
            FileAttachment::new("file", "a.pdf", vec![1]).with_content_type("not a mime");
        let fields = vec![MultipartField::File(attachment)];
        assert!(matches!(
            build_multipart_form(&fields),
            Err(TransportError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_attachment_from_path() {
        let mut file = tempfile::Builder::new()
            .suffix(".pdf")
            .tempfile()
            .expect("temp file");
        file.write_all(b"%PDF-1.7 fixture").expect("write");

        let attachment = attachment_from_path("file", file.path())
            .await
            .expect("read should succeed");

        assert!(attachment.filename.ends_with(".pdf"));
        assert_eq!(attachment.content_type.as_deref(), Some("application/pdf"));
        assert_eq!(attachment.bytes, b"%PDF-1.7 fixture");
    }

    #[tokio::test]
    async fn test_attachment_from_missing_path() {
        let result = attachment_from_path("file", "/definitely/not/here.pdf").await;
        assert!(matches!(result, Err(TransportError::InvalidRequest(_))));
    }
}
