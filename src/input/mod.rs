//! Input processing module
//! Handles document type detection, text extraction, and formatting checks

pub mod file_detector;
pub mod formatting;
pub mod manager;
pub mod text_extractor;

pub use file_detector::DocumentKind;
pub use formatting::{check_formatting, FormattingIssue, IssueKind};
pub use manager::{load_document, LoadedDocument};
pub use text_extractor::extract_text;
