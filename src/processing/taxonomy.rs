//! Category taxonomy and keyword categorization

use crate::error::{Result, ScannerError};
use crate::processing::text_processor::{normalize_whitespace, KeywordSet, Lexicon};
use aho_corasick::AhoCorasick;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Per-category coverage scores in [0,100], in taxonomy order.
pub type CategoryScoreMap = IndexMap<String, f64>;

/// Immutable category → canonical-terms mapping, loaded once at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTaxonomy {
    categories: IndexMap<String, Vec<String>>,
}

impl CategoryTaxonomy {
    pub fn new(categories: IndexMap<String, Vec<String>>) -> Self {
        let categories = categories
            .into_iter()
            .map(|(name, terms)| {
                let terms = terms
                    .into_iter()
                    .map(|t| t.trim().to_lowercase())
                    .filter(|t| !t.is_empty())
                    .collect();
                (name, terms)
            })
            .collect();
        Self { categories }
    }

    /// The stock eight-category taxonomy.
    pub fn builtin() -> Self {
        let mut categories = IndexMap::new();
        categories.insert(
            "skills".to_string(),
            to_terms(&[
                "python", "flask", "django", "javascript", "typescript", "react", "angular",
                "vue", "html", "css", "tailwind", "sql", "mysql", "postgresql", "mongodb",
                "firebase", "git", "docker", "kubernetes", "linux", "bash", "aws", "azure",
                "gcp", "tensorflow", "pytorch", "machine learning", "deep learning",
                "data science", "nlp", "computer vision", "big data", "hadoop", "spark",
                "cloud computing", "blockchain", "cryptography", "cyber security",
                "ethical hacking", "penetration testing",
            ]),
        );
        categories.insert(
            "experience".to_string(),
            to_terms(&[
                "developer", "software engineer", "internship", "freelance", "full-time",
                "part-time", "contract", "consulting", "project management", "team lead",
                "scrum master", "agile development", "waterfall", "ci/cd", "devops",
                "system administration",
            ]),
        );
        categories.insert(
            "education".to_string(),
            to_terms(&[
                "bachelor", "master", "mba", "phd", "university", "college", "diploma",
                "bootcamp", "certification", "coursework", "degree", "online courses",
                "training",
            ]),
        );
        categories.insert(
            "soft_skills".to_string(),
            to_terms(&[
                "teamwork", "leadership", "problem-solving", "communication",
                "critical thinking", "time management", "multitasking", "adaptability",
                "creativity", "collaboration", "emotional intelligence", "decision making",
                "negotiation",
            ]),
        );
        categories.insert(
            "tools".to_string(),
            to_terms(&[
                "jira", "confluence", "notion", "figma", "adobe xd", "photoshop",
                "illustrator", "vs code", "intellij", "pycharm", "eclipse", "xcode",
                "android studio", "unity", "unreal engine", "blender", "autocad",
            ]),
        );
        categories.insert(
            "frameworks".to_string(),
            to_terms(&[
                "express", "nestjs", "fastapi", "spring", "hibernate", "ruby on rails",
                "laravel", "flutter", "react native", "electron", "next.js", "nuxt.js",
            ]),
        );
        categories.insert(
            "databases".to_string(),
            to_terms(&[
                "mysql", "postgresql", "sqlite", "mongodb", "firebase", "dynamodb",
                "cassandra", "redis",
            ]),
        );
        categories.insert(
            "cloud".to_string(),
            to_terms(&[
                "aws", "azure", "gcp", "heroku", "netlify", "vercel", "digital ocean",
                "cloudflare",
            ]),
        );

        Self::new(categories)
    }

    /// Loads a replacement taxonomy from a TOML file of
    /// `category = ["term", ...]` entries, preserving file order.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let categories: IndexMap<String, Vec<String>> = toml::from_str(&content)
            .map_err(|e| ScannerError::Configuration(format!("Failed to parse taxonomy: {}", e)))?;
        if categories.is_empty() {
            return Err(ScannerError::Configuration(
                "Taxonomy file defines no categories".to_string(),
            ));
        }
        Ok(Self::new(categories))
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.categories.iter()
    }
}

fn to_terms(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|t| t.to_string()).collect()
}

/// Scores keyword sets against an injected taxonomy.
///
/// Term-presence policy: a single alphabetic word matches the keyword set
/// (through the same lemmatizer the extractor uses, so "consulting" meets
/// "consulted"); any other term matches by case-insensitive substring
/// containment against the whitespace-normalized source text.
pub struct Categorizer {
    taxonomy: CategoryTaxonomy,
    single_keys: Vec<Vec<String>>,
    multi_matcher: Option<AhoCorasick>,
    multi_owner: Vec<usize>,
}

impl Categorizer {
    pub fn new(taxonomy: CategoryTaxonomy, lexicon: &Lexicon) -> Result<Self> {
        let mut single_keys = Vec::with_capacity(taxonomy.len());
        let mut multi_patterns: Vec<String> = Vec::new();
        let mut multi_owner: Vec<usize> = Vec::new();

        for (cat_idx, (_name, terms)) in taxonomy.iter().enumerate() {
            let mut singles = Vec::new();
            for term in terms {
                if term.chars().all(|c| c.is_alphabetic()) {
                    singles.push(lexicon.lemmatize(term));
                } else {
                    multi_patterns.push(term.clone());
                    multi_owner.push(cat_idx);
                }
            }
            single_keys.push(singles);
        }

        let multi_matcher = if multi_patterns.is_empty() {
            None
        } else {
            Some(
                AhoCorasick::builder()
                    .ascii_case_insensitive(true)
                    .build(&multi_patterns)
                    .map_err(|e| {
                        ScannerError::Processing(format!("Failed to build term matcher: {}", e))
                    })?,
            )
        };

        Ok(Self {
            taxonomy,
            single_keys,
            multi_matcher,
            multi_owner,
        })
    }

    pub fn taxonomy(&self) -> &CategoryTaxonomy {
        &self.taxonomy
    }

    /// Produces one score per category, in taxonomy order, even when the
    /// keyword set is empty.
    pub fn categorize(&self, keywords: &KeywordSet, source_text: &str) -> CategoryScoreMap {
        let normalized = normalize_whitespace(source_text);

        let mut multi_hits = vec![false; self.multi_owner.len()];
        if let Some(matcher) = &self.multi_matcher {
            for m in matcher.find_overlapping_iter(&normalized) {
                multi_hits[m.pattern().as_usize()] = true;
            }
        }

        let mut scores = CategoryScoreMap::new();
        for (cat_idx, (name, terms)) in self.taxonomy.iter().enumerate() {
            let total = terms.len();
            if total == 0 {
                scores.insert(name.clone(), 0.0);
                continue;
            }

            let single_matches = self.single_keys[cat_idx]
                .iter()
                .filter(|key| keywords.contains(key.as_str()))
                .count();
            let multi_matches = multi_hits
                .iter()
                .zip(self.multi_owner.iter())
                .filter(|(hit, owner)| **hit && **owner == cat_idx)
                .count();

            let score = (single_matches + multi_matches) as f64 / total as f64 * 100.0;
            scores.insert(name.clone(), score);
        }
        scores
    }
}
