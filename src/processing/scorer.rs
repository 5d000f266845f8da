//! Weighted overall scoring

use crate::config::ScoringConfig;
use crate::processing::taxonomy::CategoryScoreMap;

/// Everything the weighted policy consumes for one scan.
#[derive(Debug, Clone, Copy)]
pub struct ScoreInputs<'a> {
    pub matched_count: usize,
    pub jd_keyword_count: usize,
    pub category_scores: &'a CategoryScoreMap,
    pub missing_section_count: usize,
    pub issue_count: usize,
}

/// The weighted scoring policy: a keyword-coverage base blended with the
/// category average, minus flat deductions for missing sections and
/// formatting issues, clamped to [0,100].
pub fn overall_score(inputs: &ScoreInputs, config: &ScoringConfig) -> f64 {
    let base = if inputs.jd_keyword_count == 0 {
        0.0
    } else {
        inputs.matched_count as f64 / inputs.jd_keyword_count as f64 * 100.0
    };

    let category_avg = if inputs.category_scores.is_empty() {
        0.0
    } else {
        inputs.category_scores.values().sum::<f64>() / inputs.category_scores.len() as f64
    };

    let weighted = config.keyword_weight * base + config.category_weight * category_avg;
    let deductions = config.missing_section_penalty * inputs.missing_section_count as f64
        + config.issue_penalty * inputs.issue_count as f64;

    (weighted - deductions).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use indexmap::indexmap;

    fn default_scoring() -> crate::config::ScoringConfig {
        Config::default().scoring
    }

    #[test]
    fn test_reference_score() {
        let categories = indexmap! {
            "skills".to_string() => 50.0,
            "tools".to_string() => 0.0,
        };
        let inputs = ScoreInputs {
            matched_count: 2,
            jd_keyword_count: 5,
            category_scores: &categories,
            missing_section_count: 1,
            issue_count: 2,
        };
        // 0.7 * 40 + 0.3 * 25 - (5 + 20) = 10.5
        let score = overall_score(&inputs, &default_scoring());
        assert!((score - 10.5).abs() < 1e-9);
    }

    #[test]
    fn test_clamped_to_unit_range() {
        let empty = CategoryScoreMap::new();
        let full = indexmap! { "skills".to_string() => 100.0 };

        let floored = overall_score(
            &ScoreInputs {
                matched_count: 0,
                jd_keyword_count: 10,
                category_scores: &empty,
                missing_section_count: 3,
                issue_count: 10,
            },
            &default_scoring(),
        );
        assert_eq!(floored, 0.0);

        let ceiled = overall_score(
            &ScoreInputs {
                matched_count: 10,
                jd_keyword_count: 10,
                category_scores: &full,
                missing_section_count: 0,
                issue_count: 0,
            },
            &default_scoring(),
        );
        assert!(ceiled <= 100.0);
        assert!((ceiled - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_monotone_in_matches_and_issues() {
        let categories = indexmap! { "skills".to_string() => 20.0 };
        let config = default_scoring();

        let mut previous = -1.0;
        for matched in 0..=8 {
            let score = overall_score(
                &ScoreInputs {
                    matched_count: matched,
                    jd_keyword_count: 8,
                    category_scores: &categories,
                    missing_section_count: 1,
                    issue_count: 1,
                },
                &config,
            );
            assert!(score >= previous);
            previous = score;
        }

        let mut previous = 101.0;
        for issues in 0..=12 {
            let score = overall_score(
                &ScoreInputs {
                    matched_count: 4,
                    jd_keyword_count: 8,
                    category_scores: &categories,
                    missing_section_count: 1,
                    issue_count: issues,
                },
                &config,
            );
            assert!(score <= previous);
            previous = score;
        }
    }

    #[test]
    fn test_empty_jd_scores_from_categories_only() {
        let categories = indexmap! { "skills".to_string() => 40.0 };
        let inputs = ScoreInputs {
            matched_count: 0,
            jd_keyword_count: 0,
            category_scores: &categories,
            missing_section_count: 0,
            issue_count: 0,
        };
        let score = overall_score(&inputs, &default_scoring());
        assert!((score - 12.0).abs() < 1e-9);
    }
}
