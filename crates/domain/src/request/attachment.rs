//! File attachment types

use serde::{Deserialize, Serialize};

/// Largest attachment the core will send, in bytes (50 MiB).
pub const MAX_ATTACHMENT_SIZE: usize = 50 * 1024 * 1024;

const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &[
    "pdf", "doc", "docx", "xls", "xlsx", "png", "jpg", "jpeg", "gif", "txt",
];

/// One part of a multipart request: raw bytes plus declared metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAttachment {
    /// Form field name the part is sent under.
    pub field_name: String,
    /// Declared filename, used for extension checks and MIME guessing.
    pub filename: String,
    /// Declared content type; guessed from the filename when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Raw file bytes.
    #[serde(with = "serde_bytes_base64")]
    pub bytes: Vec<u8>,
}

impl FileAttachment {
    /// Creates an attachment with no declared content type.
    #[must_use]
    pub fn new(
        field_name: impl Into<String>,
        filename: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            filename: filename.into(),
            content_type: None,
            bytes,
        }
    }

    /// Declares the content type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Returns the lowercased filename extension, if any.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        let (stem, extension) = self.filename.rsplit_once('.')?;
        if stem.is_empty() || extension.is_empty() {
            return None;
        }
        Some(extension.to_ascii_lowercase())
    }
}

/// Limits applied to every outgoing attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentPolicy {
    /// Size ceiling in bytes.
    pub max_size: usize,
    /// Lowercased extensions the policy accepts.
    pub allowed_extensions: Vec<String>,
    /// When set, pdf/png/jpeg bytes must start with the matching
    /// magic-number signature.
    pub verify_signature: bool,
}

impl AttachmentPolicy {
    /// Returns true if the extension is in the allow-list.
    #[must_use]
    pub fn allows_extension(&self, extension: &str) -> bool {
        self.allowed_extensions
            .iter()
            .any(|allowed| allowed == extension)
    }
}

impl Default for AttachmentPolicy {
    fn default() -> Self {
        Self {
            max_size: MAX_ATTACHMENT_SIZE,
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(ToString::to_string)
                .collect(),
            verify_signature: true,
        }
    }
}

/// Base64 (de)serialization for the raw bytes, so descriptors stay
/// printable when captured in logs or fixtures.
mod serde_bytes_base64 {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(D::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extension() {
        let attachment = FileAttachment::new("file", "contract.PDF", vec![1]);
        assert_eq!(attachment.extension(), Some("pdf".to_string()));
    }

    #[test]
    fn test_extension_missing() {
        assert_eq!(FileAttachment::new("file", "noext", vec![]).extension(), None);
        assert_eq!(
            FileAttachment::new("file", ".hidden", vec![]).extension(),
            None
        );
        assert_eq!(
            FileAttachment::new("file", "trailing.", vec![]).extension(),
            None
        );
    }

    #[test]
    fn test_policy_default_allows_pdf() {
        let policy = AttachmentPolicy::default();
        assert!(policy.allows_extension("pdf"));
        assert!(!policy.allows_extension("exe"));
        assert_eq!(policy.max_size, MAX_ATTACHMENT_SIZE);
        assert!(policy.verify_signature);
    }

    #[test]
    fn test_bytes_roundtrip_through_serde() {
        let attachment = FileAttachment::new("file", "a.pdf", b"%PDF-1.7 content".to_vec())
            .with_content_type("application/pdf");
        let json = serde_json::to_string(&attachment).unwrap();
        let decoded: FileAttachment = serde_json::from_str(&json).unwrap();
        assert_eq!(attachment, decoded);
    }
}
