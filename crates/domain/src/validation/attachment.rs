//! File attachment validation

use crate::error::{DomainError, DomainResult};
use crate::request::{AttachmentPolicy, FileAttachment};

/// Magic-number signatures for the types we can verify.
const SIGNATURES: &[(&str, &[u8])] = &[
    ("pdf", b"%PDF"),
    ("png", &[0x89, b'P', b'N', b'G']),
    ("jpg", &[0xFF, 0xD8, 0xFF]),
    ("jpeg", &[0xFF, 0xD8, 0xFF]),
];

/// Checks an attachment against the policy: size ceiling, extension
/// allow-list and, when signature checking is enabled, the magic bytes
/// for pdf/png/jpeg.
///
/// # Errors
///
/// Returns [`DomainError::InvalidAttachment`] describing the first rule
/// the attachment violates.
pub fn validate_attachment(
    attachment: &FileAttachment,
    policy: &AttachmentPolicy,
) -> DomainResult<()> {
    if attachment.bytes.is_empty() {
        return Err(DomainError::InvalidAttachment(format!(
            "{} is empty",
            attachment.filename
        )));
    }
    if attachment.bytes.len() > policy.max_size {
        return Err(DomainError::InvalidAttachment(format!(
            "{} is {} bytes, above the {} byte limit",
            attachment.filename,
            attachment.bytes.len(),
            policy.max_size
        )));
    }

    let extension = attachment.extension().ok_or_else(|| {
        DomainError::InvalidAttachment(format!(
            "{} has no filename extension",
            attachment.filename
        ))
    })?;
    if !policy.allows_extension(&extension) {
        return Err(DomainError::InvalidAttachment(format!(
            "extension .{extension} is not allowed"
        )));
    }

    if policy.verify_signature
        && let Some((_, signature)) = SIGNATURES.iter().find(|(ext, _)| *ext == extension)
        && !attachment.bytes.starts_with(signature)
    {
        return Err(DomainError::InvalidAttachment(format!(
            "{} does not look like a .{extension} file",
            attachment.filename
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf(bytes: &[u8]) -> FileAttachment {
        FileAttachment::new("file", "contract.pdf", bytes.to_vec())
    }

    #[test]
    fn test_valid_pdf() {
        let policy = AttachmentPolicy::default();
        assert!(validate_attachment(&pdf(b"%PDF-1.7 rest"), &policy).is_ok());
    }

    #[test]
    fn test_size_ceiling() {
        let policy = AttachmentPolicy {
            max_size: 8,
            ..AttachmentPolicy::default()
        };
        let result = validate_attachment(&pdf(b"%PDF-1.7 too large"), &policy);
        assert!(matches!(result, Err(DomainError::InvalidAttachment(msg)) if msg.contains("limit")));
    }

    #[test]
    fn test_disallowed_extension() {
        let policy = AttachmentPolicy::default();
        let attachment = FileAttachment::new("file", "run.exe", vec![1, 2, 3]);
        let result = validate_attachment(&attachment, &policy);
        assert!(matches!(result, Err(DomainError::InvalidAttachment(msg)) if msg.contains(".exe")));
    }

    #[test]
    fn test_missing_extension() {
        let policy = AttachmentPolicy::default();
        let attachment = FileAttachment::new("file", "noext", vec![1]);
        assert!(validate_attachment(&attachment, &policy).is_err());
    }

    #[test]
    fn test_signature_mismatch() {
        let policy = AttachmentPolicy::default();
        let result = validate_attachment(&pdf(b"not a pdf at all"), &policy);
        assert!(matches!(result, Err(DomainError::InvalidAttachment(msg)) if msg.contains("look like")));
    }

    #[test]
    fn test_signature_check_disabled() {
        let policy = AttachmentPolicy {
            verify_signature: false,
            ..AttachmentPolicy::default()
        };
        assert!(validate_attachment(&pdf(b"not a pdf at all"), &policy).is_ok());
    }

    #[test]
    fn test_png_and_jpeg_signatures() {
        let policy = AttachmentPolicy::default();

        let png = FileAttachment::new("file", "scan.png", vec![0x89, b'P', b'N', b'G', 0x0D]);
        assert!(validate_attachment(&png, &policy).is_ok());

        let jpeg = FileAttachment::new("file", "photo.jpeg", vec![0xFF, 0xD8, 0xFF, 0xE0]);
        assert!(validate_attachment(&jpeg, &policy).is_ok());

        let bad_png = FileAttachment::new("file", "scan.png", vec![0x00, 0x01]);
        assert!(validate_attachment(&bad_png, &policy).is_err());
    }

    #[test]
    fn test_unverifiable_extension_passes_signature_check() {
        // No magic number registered for docx; only size and extension apply.
        let policy = AttachmentPolicy::default();
        let docx = FileAttachment::new("file", "contract.docx", vec![0x50, 0x4B]);
        assert!(validate_attachment(&docx, &policy).is_ok());
    }
}
