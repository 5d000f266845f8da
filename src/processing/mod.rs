//! Text processing and analysis module

pub mod analyzer;
pub mod document;
pub mod scorer;
pub mod taxonomy;
pub mod text_processor;

pub use analyzer::{FeedbackRecord, ScanOutcome, Scanner};
pub use taxonomy::{CategoryScoreMap, CategoryTaxonomy};
