//! Scan engine coordinating extraction, keyword analysis, and scoring

use crate::augment::SkillAugmenter;
use crate::config::Config;
use crate::error::{Result, ScannerError};
use crate::input::{check_formatting, extract_text, DocumentKind};
use crate::processing::document::{missing_sections, SectionKind};
use crate::processing::scorer::{overall_score, ScoreInputs};
use crate::processing::taxonomy::{Categorizer, CategoryScoreMap, CategoryTaxonomy};
use crate::processing::text_processor::{detect_job_title, extract_keywords, KeywordSet, Lexicon};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

pub const MISSING_INPUT_MESSAGE: &str = "Resume file and job description are required";

/// Scan engine that coordinates all analysis components
pub struct Scanner {
    config: Config,
    categorizer: Categorizer,
    augmenter: Arc<dyn SkillAugmenter>,
    lexicon: &'static Lexicon,
}

/// Feedback produced by a single resume scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    /// Overall weighted score (0 to 100)
    pub overall_score: f64,

    /// Keyword coverage percentage per taxonomy category
    pub category_scores: CategoryScoreMap,

    /// Job description keywords found in the resume, sorted
    pub matched_keywords: Vec<String>,

    /// Job description keywords absent from the resume, sorted
    pub missing_keywords: Vec<String>,

    /// Formatting issue descriptions in detection order
    pub issues: Vec<String>,
}

/// A finished scan: the feedback plus the context formatters draw on
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub feedback: FeedbackRecord,

    /// Job title detected in the job description, when one was found
    pub job_title: Option<String>,

    /// Augmented keywords that were not already in the job description
    pub augmented_skill_count: usize,

    /// Expected resume sections that were not found
    pub missing_sections: Vec<SectionKind>,

    /// Every keyword extracted from the resume, sorted
    pub resume_keywords: Vec<String>,

    /// Performance metrics
    pub processing_time_ms: u64,
}

impl Scanner {
    /// Create a scanner from configuration. A configured taxonomy file
    /// replaces the built-in category taxonomy.
    pub fn new(config: &Config, augmenter: Arc<dyn SkillAugmenter>) -> Result<Self> {
        let taxonomy = match &config.taxonomy_file {
            Some(path) => CategoryTaxonomy::from_toml_file(path)?,
            None => CategoryTaxonomy::builtin(),
        };
        let lexicon = Lexicon::english();
        let categorizer = Categorizer::new(taxonomy, lexicon)?;

        Ok(Self {
            config: config.clone(),
            categorizer,
            augmenter,
            lexicon,
        })
    }

    /// Scan resume bytes against a job description.
    ///
    /// Extraction failures abort the scan; formatting checks and skill
    /// augmentation degrade to issues and an unchanged keyword set instead.
    pub async fn scan(
        &self,
        resume_bytes: &[u8],
        resume_kind: DocumentKind,
        job_description: &str,
    ) -> Result<ScanOutcome> {
        let start_time = Instant::now();

        if resume_bytes.is_empty() || job_description.trim().is_empty() {
            return Err(ScannerError::InvalidInput(MISSING_INPUT_MESSAGE.to_string()));
        }

        // 1. Text extraction
        let resume_text = extract_text(resume_bytes, resume_kind)?;

        // 2. Formatting checks (reported as issues, never fatal)
        let issues = check_formatting(resume_bytes, resume_kind);

        // 3. Keyword extraction from both documents
        let resume_keywords = extract_keywords(&resume_text, self.lexicon);
        let mut jd_keywords = extract_keywords(job_description, self.lexicon);

        // 4. Augment the job description keywords from the detected title
        let job_title = detect_job_title(job_description, self.lexicon);
        let augmented_skill_count = self
            .augment_keywords(&mut jd_keywords, job_title.as_deref())
            .await;

        // 5. Keyword match-up
        let matched_keywords = sorted(resume_keywords.intersection(&jd_keywords));
        let missing_keywords = sorted(jd_keywords.difference(&resume_keywords));

        // 6. Category coverage across the resume
        let category_scores = self.categorizer.categorize(&resume_keywords, &resume_text);

        // 7. Section checks and overall score
        let missing = missing_sections(&resume_text);
        let score = overall_score(
            &ScoreInputs {
                matched_count: matched_keywords.len(),
                jd_keyword_count: jd_keywords.len(),
                category_scores: &category_scores,
                missing_section_count: missing.len(),
                issue_count: issues.len(),
            },
            &self.config.scoring,
        );

        info!(
            "Scan complete: {} matched, {} missing, score {:.1}",
            matched_keywords.len(),
            missing_keywords.len(),
            score
        );

        let resume_keyword_list = sorted(resume_keywords.iter());

        Ok(ScanOutcome {
            feedback: FeedbackRecord {
                overall_score: score,
                category_scores,
                matched_keywords,
                missing_keywords,
                issues: issues.into_iter().map(|issue| issue.detail).collect(),
            },
            job_title,
            augmented_skill_count,
            missing_sections: missing,
            resume_keywords: resume_keyword_list,
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        })
    }

    /// Merge augmenter results into the keyword set, returning how many
    /// terms were actually new. No title means no lookup.
    async fn augment_keywords(
        &self,
        jd_keywords: &mut KeywordSet,
        job_title: Option<&str>,
    ) -> usize {
        let Some(title) = job_title else {
            return 0;
        };

        let related = self.augmenter.related_skills(title).await;
        let mut added = 0;
        for skill in related {
            if jd_keywords.insert(skill) {
                added += 1;
            }
        }
        debug!("Augmentation added {} keywords for '{}'", added, title);
        added
    }
}

fn sorted<'a, I>(keywords: I) -> Vec<String>
where
    I: Iterator<Item = &'a String>,
{
    let mut list: Vec<String> = keywords.cloned().collect();
    list.sort();
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::augment::NoopAugmenter;
    use async_trait::async_trait;
    use docx_rs::{Docx, Paragraph, Run, Table, TableCell, TableRow};
    use std::collections::HashSet;

    struct StubAugmenter {
        skills: Vec<&'static str>,
    }

    #[async_trait]
    impl SkillAugmenter for StubAugmenter {
        async fn related_skills(&self, _job_title: &str) -> HashSet<String> {
            self.skills.iter().map(|s| s.to_string()).collect()
        }
    }

    fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
        let mut docx = Docx::new();
        for text in paragraphs {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)));
        }
        let mut buf = std::io::Cursor::new(Vec::new());
        docx.build().pack(&mut buf).unwrap();
        buf.into_inner()
    }

    fn docx_bytes_with_table(paragraph: &str) -> Vec<u8> {
        let docx = Docx::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text(paragraph)))
            .add_table(Table::new(vec![TableRow::new(vec![
                TableCell::new().add_paragraph(Paragraph::new())
            ])]));
        let mut buf = std::io::Cursor::new(Vec::new());
        docx.build().pack(&mut buf).unwrap();
        buf.into_inner()
    }

    fn scanner_with(augmenter: Arc<dyn SkillAugmenter>) -> Scanner {
        Scanner::new(&Config::default(), augmenter).unwrap()
    }

    #[tokio::test]
    async fn test_scan_matches_and_scores_plain_docx() {
        let scanner = scanner_with(Arc::new(NoopAugmenter));
        let resume = docx_bytes(&["I used Python and Flask daily"]);

        let outcome = scanner
            .scan(
                &resume,
                DocumentKind::Docx,
                "Looking for a Python developer with Flask experience",
            )
            .await
            .unwrap();

        assert_eq!(outcome.feedback.matched_keywords, vec!["flask", "python"]);
        assert_eq!(
            outcome.feedback.missing_keywords,
            vec!["developer", "experience", "look"]
        );
        assert!(outcome.feedback.issues.is_empty());
        assert_eq!(outcome.feedback.category_scores.len(), 8);
        assert!(outcome.feedback.category_scores["skills"] > 0.0);
        assert!(outcome.feedback.overall_score > 0.0);
        assert!(outcome.feedback.overall_score <= 100.0);
        assert_eq!(outcome.job_title.as_deref(), Some("python developer"));
        assert_eq!(outcome.augmented_skill_count, 0);
        assert_eq!(outcome.missing_sections.len(), 3);
    }

    #[tokio::test]
    async fn test_scan_rejects_missing_inputs() {
        let scanner = scanner_with(Arc::new(NoopAugmenter));

        let err = scanner
            .scan(b"", DocumentKind::Docx, "some job description")
            .await
            .unwrap_err();
        assert!(matches!(err, ScannerError::InvalidInput(_)));
        assert!(err.to_string().contains(MISSING_INPUT_MESSAGE));

        // Checked before extraction, so unreadable bytes do not change the error
        let err = scanner
            .scan(b"not a document", DocumentKind::Docx, "   \n")
            .await
            .unwrap_err();
        assert!(matches!(err, ScannerError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_scan_propagates_extraction_errors() {
        let scanner = scanner_with(Arc::new(NoopAugmenter));

        let err = scanner
            .scan(b"not a zip archive", DocumentKind::Docx, "Python developer")
            .await
            .unwrap_err();
        assert!(matches!(err, ScannerError::Extraction(_)));
        assert!(err.to_string().starts_with("Error extracting text:"));
    }

    #[tokio::test]
    async fn test_augmented_skills_count_as_missing() {
        let scanner = scanner_with(Arc::new(StubAugmenter {
            skills: vec!["kubernetes", "engineer"],
        }));
        let resume = docx_bytes(&["I write Go services"]);

        let outcome = scanner
            .scan(&resume, DocumentKind::Docx, "Platform engineer role")
            .await
            .unwrap();

        assert_eq!(outcome.job_title.as_deref(), Some("platform engineer"));
        // "engineer" was already a job description keyword
        assert_eq!(outcome.augmented_skill_count, 1);
        assert!(outcome
            .feedback
            .missing_keywords
            .contains(&"kubernetes".to_string()));
        assert!(outcome.feedback.matched_keywords.is_empty());
    }

    #[tokio::test]
    async fn test_table_issue_lands_in_feedback() {
        let scanner = scanner_with(Arc::new(NoopAugmenter));
        let resume = docx_bytes_with_table("Python experience");

        let outcome = scanner
            .scan(&resume, DocumentKind::Docx, "Python developer")
            .await
            .unwrap();

        assert_eq!(
            outcome.feedback.issues,
            vec!["Resume contains tables, which may not be ATS-friendly.".to_string()]
        );
    }

    #[tokio::test]
    async fn test_scan_with_custom_taxonomy_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taxonomy.toml");
        std::fs::write(&path, "languages = [\"python\", \"go\"]\n").unwrap();

        let config = Config {
            taxonomy_file: Some(path),
            ..Config::default()
        };
        let scanner = Scanner::new(&config, Arc::new(NoopAugmenter)).unwrap();
        let resume = docx_bytes(&["Python projects shipped weekly"]);

        let outcome = scanner
            .scan(&resume, DocumentKind::Docx, "Python developer")
            .await
            .unwrap();

        assert_eq!(outcome.feedback.category_scores.len(), 1);
        assert_eq!(outcome.feedback.category_scores["languages"], 50.0);
    }
}
