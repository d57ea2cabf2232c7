//! Types shared by every format handler.

use serde::{Deserialize, Serialize};

/// One declared input/output capability of a handler.
///
/// The `mime` string is the identity used for graph matching; a format
/// without a MIME never becomes a graph node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Format {
    /// Human-readable name (e.g. "Portable Network Graphics").
    pub name: String,
    /// Short format code, used for display and as the handler-internal
    /// identifier.
    pub format: String,
    /// Filename extension, without the leading dot.
    pub extension: String,
    /// Canonical MIME string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
    /// Whether the handler can read this format as input.
    #[serde(default)]
    pub from: bool,
    /// Whether the handler can write this format as output.
    #[serde(default)]
    pub to: bool,
    /// Opaque identifier the handler itself uses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal: Option<String>,
}

impl Format {
    /// Creates a read/write format with a MIME identity.
    pub fn new(
        name: impl Into<String>,
        format: impl Into<String>,
        extension: impl Into<String>,
        mime: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            format: format.into(),
            extension: extension.into(),
            mime: Some(mime.into()),
            from: true,
            to: true,
            internal: None,
        }
    }

    /// Restricts the format to reading only.
    pub fn read_only(mut self) -> Self {
        self.from = true;
        self.to = false;
        self
    }

    /// Restricts the format to writing only.
    pub fn write_only(mut self) -> Self {
        self.from = false;
        self.to = true;
        self
    }

    /// The MIME string, if declared.
    pub fn mime(&self) -> Option<&str> {
        self.mime.as_deref()
    }
}

/// A named byte buffer flowing through a conversion chain.
///
/// Chains operate on ordered lists of these so multi-file inputs (e.g.
/// video concat) remain valid across conversions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileData {
    /// File name, including extension.
    pub name: String,
    /// File content.
    pub bytes: Vec<u8>,
}

impl FileData {
    /// Creates a new file from a name and its content.
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Whether the file carries no content. A handler returning any empty
    /// file is treated as a failed conversion.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_constructor() {
        let format = Format::new("Portable Network Graphics", "png", "png", "image/png");
        assert_eq!(format.format, "png");
        assert_eq!(format.mime(), Some("image/png"));
        assert!(format.from);
        assert!(format.to);
    }

    #[test]
    fn test_format_direction_restrictions() {
        let read = Format::new("SVG", "svg", "svg", "image/svg+xml").read_only();
        assert!(read.from);
        assert!(!read.to);

        let write = Format::new("PDF", "pdf", "pdf", "application/pdf").write_only();
        assert!(!write.from);
        assert!(write.to);
    }

    #[test]
    fn test_format_serialization_omits_empty_fields() {
        let format = Format {
            name: "Raw".to_string(),
            format: "raw".to_string(),
            extension: "raw".to_string(),
            mime: None,
            from: true,
            to: false,
            internal: None,
        };
        let json = serde_json::to_string(&format).unwrap();
        assert!(!json.contains("mime"));
        assert!(!json.contains("internal"));

        let parsed: Format = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, format);
    }

    #[test]
    fn test_file_data_empty() {
        assert!(FileData::new("a.png", Vec::new()).is_empty());
        assert!(!FileData::new("a.png", vec![1, 2, 3]).is_empty());
    }
}
