//! Document type detection

use crate::error::{Result, ScannerError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "docx" => Some(DocumentKind::Docx),
            _ => None,
        }
    }

    /// Parses a declared document type, rejecting anything but pdf/docx.
    pub fn from_declared(value: &str) -> Result<Self> {
        Self::from_extension(value).ok_or_else(|| {
            ScannerError::UnsupportedFormat(
                "Unsupported file format. Only PDF and DOCX are allowed.".to_string(),
            )
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Docx => "docx",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_supported_extensions_case_insensitively() {
        assert_eq!(DocumentKind::from_extension("pdf"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_extension("PDF"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_extension("docx"), Some(DocumentKind::Docx));
        assert_eq!(DocumentKind::from_extension("txt"), None);
    }

    #[test]
    fn test_rejects_unsupported_declared_type() {
        let err = DocumentKind::from_declared("doc").unwrap_err();
        assert!(matches!(err, ScannerError::UnsupportedFormat(_)));
    }
}
