//! Report structure wrapping scan feedback with run metadata

use crate::processing::analyzer::{FeedbackRecord, ScanOutcome};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scan outcome packaged for presentation and persistence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// Resume file the scan ran against
    pub resume_file: String,

    /// Job title detected in the job description
    pub job_title: Option<String>,

    /// How many augmented keywords joined the job description's own
    pub augmented_skill_count: usize,

    /// Names of expected sections the resume lacks
    pub missing_sections: Vec<String>,

    /// Every keyword extracted from the resume, sorted
    pub resume_keywords: Vec<String>,

    /// Report metadata and generation info
    pub generated_at: DateTime<Utc>,
    pub scanner_version: String,
    pub processing_time_ms: u64,

    /// The scan feedback itself
    pub feedback: FeedbackRecord,
}

impl ScanReport {
    /// Package a finished scan for the formatters.
    pub fn from_scan(outcome: ScanOutcome, resume_file: &str) -> Self {
        Self {
            resume_file: resume_file.to_string(),
            job_title: outcome.job_title,
            augmented_skill_count: outcome.augmented_skill_count,
            missing_sections: outcome
                .missing_sections
                .iter()
                .map(|section| section.to_string())
                .collect(),
            resume_keywords: outcome.resume_keywords,
            generated_at: Utc::now(),
            scanner_version: env!("CARGO_PKG_VERSION").to_string(),
            processing_time_ms: outcome.processing_time_ms,
            feedback: outcome.feedback,
        }
    }
}
