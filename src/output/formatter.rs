//! Output formatters with console, JSON, and markdown support

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::ScanReport;
use colored::{Color, Colorize};
use std::collections::HashSet;
use std::path::Path;
use strsim::jaro_winkler;

/// Similarity floor for suggesting a missing keyword is a near-miss.
const NEAR_MATCH_THRESHOLD: f64 = 0.85;

/// Trait for formatting scan reports
pub trait OutputFormatter {
    fn format_report(&self, report: &ScanReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors and rich presentation
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for scripting and structured data
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for documentation and saved reports
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that coordinates the formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            use_colors,
            detailed,
        }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            3 => "▒",
            _ => "░",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            3 => Color::Yellow,
            _ => Color::White,
        };

        if self.use_colors {
            format!(
                "\n{} {}\n",
                prefix.color(color).bold(),
                title.color(color).bold()
            )
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: f64) -> String {
        let (badge, color) = if score >= 90.0 {
            ("EXCELLENT", Color::Green)
        } else if score >= 80.0 {
            ("VERY GOOD", Color::BrightGreen)
        } else if score >= 70.0 {
            ("GOOD", Color::Yellow)
        } else if score >= 60.0 {
            ("FAIR", Color::BrightYellow)
        } else if score >= 50.0 {
            ("BELOW AVG", Color::Red)
        } else {
            ("POOR", Color::BrightRed)
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn coverage_color(coverage: f64) -> Color {
        if coverage >= 50.0 {
            Color::Green
        } else if coverage > 0.0 {
            Color::Yellow
        } else {
            Color::Red
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ScanReport) -> Result<String> {
        let mut output = String::new();

        // Header
        output.push_str(&self.format_header("📊 RESUME SCAN REPORT", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.processing_time_ms
        ));
        output.push_str(&format!("Resume: {}\n", report.resume_file));

        // Summary
        output.push_str(&self.format_header("Summary", 2));
        output.push_str(&format!(
            "Overall Score: {:.1}% {}\n",
            report.feedback.overall_score,
            self.format_score_badge(report.feedback.overall_score)
        ));
        if let Some(title) = &report.job_title {
            output.push_str(&format!(
                "Job title: {}",
                self.colorize(title, Color::Cyan)
            ));
            if report.augmented_skill_count > 0 {
                output.push_str(&format!(
                    " (+{} augmented skills)",
                    report.augmented_skill_count
                ));
            }
            output.push('\n');
        }
        if !report.missing_sections.is_empty() {
            output.push_str(&format!(
                "Missing sections: {}\n",
                self.colorize(&report.missing_sections.join(", "), Color::Yellow)
            ));
        }

        // Category Coverage
        output.push_str(&self.format_header("Category Coverage", 2));
        for (category, coverage) in &report.feedback.category_scores {
            output.push_str(&format!(
                "  {:<14} {}\n",
                category,
                self.colorize(
                    &format!("{:.1}%", coverage),
                    Self::coverage_color(*coverage)
                )
            ));
        }

        // Keyword Match-Up
        output.push_str(&self.format_header("Keyword Match-Up", 2));
        output.push_str(&format!(
            "✅ Matched ({}): {}\n",
            report.feedback.matched_keywords.len(),
            self.colorize(&join_or_none(&report.feedback.matched_keywords), Color::Green)
        ));
        output.push_str(&format!(
            "❌ Missing ({}): {}\n",
            report.feedback.missing_keywords.len(),
            self.colorize(&join_or_none(&report.feedback.missing_keywords), Color::Red)
        ));

        // Formatting Issues
        if !report.feedback.issues.is_empty() {
            output.push_str(&self.format_header("⚠️ Formatting Issues", 2));
            for issue in &report.feedback.issues {
                output.push_str(&format!("  • {}\n", self.colorize(issue, Color::Yellow)));
            }
        }

        if self.detailed {
            // Detailed Analysis (only in detailed mode)
            output.push_str(&self.format_header("📊 Detailed Analysis", 2));

            output.push_str(&self.format_header("Resume Keywords", 3));
            output.push_str(&format!("  {}\n", join_or_none(&report.resume_keywords)));

            let near = near_matches(report);
            if !near.is_empty() {
                output.push_str(&self.format_header("Near Matches", 3));
                for (missing, candidate, similarity) in near {
                    output.push_str(&format!(
                        "  • '{}' may be present as '{}' ({:.0}% similar)\n",
                        self.colorize(&missing, Color::Red),
                        self.colorize(&candidate, Color::Green),
                        similarity * 100.0
                    ));
                }
            }
        }

        // Footer
        output.push_str(&format!(
            "\n{} Generated by Resume Scanner v{}\n",
            self.colorize("ℹ️", Color::Blue),
            report.scanner_version
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ScanReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(&report.feedback)?)
        } else {
            Ok(serde_json::to_string(&report.feedback)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_score_badge(score: f64) -> &'static str {
        if score >= 90.0 {
            "🟢 Excellent"
        } else if score >= 80.0 {
            "🟡 Very Good"
        } else if score >= 70.0 {
            "🟠 Good"
        } else if score >= 60.0 {
            "🔴 Fair"
        } else if score >= 50.0 {
            "🔴 Below Average"
        } else {
            "🔴 Poor"
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ScanReport) -> Result<String> {
        let mut output = String::new();

        // Title
        output.push_str("# 📊 Resume Scan Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms\n",
                report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.processing_time_ms
            ));
            output.push_str(&format!("**Resume:** `{}`\n\n", report.resume_file));
        }

        // Summary
        output.push_str("## Summary\n\n");
        output.push_str(&format!(
            "**Overall Score:** {:.1}% {}\n\n",
            report.feedback.overall_score,
            Self::markdown_score_badge(report.feedback.overall_score)
        ));
        if let Some(title) = &report.job_title {
            output.push_str(&format!("**Job Title:** {}", title));
            if report.augmented_skill_count > 0 {
                output.push_str(&format!(
                    " (+{} augmented skills)",
                    report.augmented_skill_count
                ));
            }
            output.push_str("\n\n");
        }

        // Category Coverage
        output.push_str("### Category Coverage\n\n");
        output.push_str("| Category | Coverage |\n");
        output.push_str("|----------|----------|\n");
        for (category, coverage) in &report.feedback.category_scores {
            output.push_str(&format!("| {} | {:.1}% |\n", category, coverage));
        }
        output.push_str("\n");

        // Matched Keywords
        output.push_str(&format!(
            "### ✅ Matched Keywords ({})\n\n",
            report.feedback.matched_keywords.len()
        ));
        output.push_str(&format!(
            "{}\n\n",
            code_join_or_none(&report.feedback.matched_keywords)
        ));

        // Missing Keywords
        output.push_str(&format!(
            "### ❌ Missing Keywords ({})\n\n",
            report.feedback.missing_keywords.len()
        ));
        output.push_str(&format!(
            "{}\n\n",
            code_join_or_none(&report.feedback.missing_keywords)
        ));

        // Formatting Issues
        if !report.feedback.issues.is_empty() {
            output.push_str("### ⚠️ Formatting Issues\n\n");
            for issue in &report.feedback.issues {
                output.push_str(&format!("- {}\n", issue));
            }
            output.push_str("\n");
        }

        // Missing Sections
        if !report.missing_sections.is_empty() {
            output.push_str("### Missing Sections\n\n");
            for section in &report.missing_sections {
                output.push_str(&format!("- {}\n", section));
            }
            output.push_str("\n");
        }

        // Footer
        if self.include_metadata {
            output.push_str("---\n\n");
            output.push_str(&format!(
                "*Generated by Resume Scanner v{}*\n",
                report.scanner_version
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
        }
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_metadata: bool,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn generate_report(&self, report: &ScanReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// For each missing keyword, the closest unmatched resume keyword at or
/// above the similarity threshold.
fn near_matches(report: &ScanReport) -> Vec<(String, String, f64)> {
    let matched: HashSet<&str> = report
        .feedback
        .matched_keywords
        .iter()
        .map(String::as_str)
        .collect();

    report
        .feedback
        .missing_keywords
        .iter()
        .filter_map(|missing| {
            report
                .resume_keywords
                .iter()
                .filter(|keyword| !matched.contains(keyword.as_str()))
                .map(|keyword| (keyword, jaro_winkler(missing, keyword)))
                .max_by(|a, b| a.1.total_cmp(&b.1))
                .filter(|(_, similarity)| *similarity >= NEAR_MATCH_THRESHOLD)
                .map(|(keyword, similarity)| (missing.clone(), keyword.clone(), similarity))
        })
        .collect()
}

fn join_or_none(keywords: &[String]) -> String {
    if keywords.is_empty() {
        "none".to_string()
    } else {
        keywords.join(", ")
    }
}

fn code_join_or_none(keywords: &[String]) -> String {
    if keywords.is_empty() {
        "none".to_string()
    } else {
        format!("`{}`", keywords.join("`, `"))
    }
}

// Utility functions for saving reports
pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_scan{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_scan{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_scan{}.md", base_name, timestamp_suffix),
    }
}
