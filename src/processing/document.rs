//! Resume section detection

use serde::{Deserialize, Serialize};

/// Sections a scored resume is expected to carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionKind {
    Skills,
    Experience,
    Education,
}

pub const EXPECTED_SECTIONS: [SectionKind; 3] = [
    SectionKind::Skills,
    SectionKind::Experience,
    SectionKind::Education,
];

impl SectionKind {
    fn heading_synonyms(&self) -> &'static [&'static str] {
        match self {
            SectionKind::Skills => &[
                "skills",
                "technical skills",
                "core competencies",
                "technologies",
            ],
            SectionKind::Experience => &[
                "experience",
                "work experience",
                "professional experience",
                "employment history",
                "work history",
            ],
            SectionKind::Education => &[
                "education",
                "academic background",
                "qualifications",
                "academics",
            ],
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionKind::Skills => write!(f, "Skills"),
            SectionKind::Experience => write!(f, "Experience"),
            SectionKind::Education => write!(f, "Education"),
        }
    }
}

/// Expected sections with no recognizable heading in the text, in the
/// fixed skills/experience/education order.
pub fn missing_sections(text: &str) -> Vec<SectionKind> {
    EXPECTED_SECTIONS
        .iter()
        .copied()
        .filter(|section| !has_section_heading(text, *section))
        .collect()
}

fn has_section_heading(text: &str, section: SectionKind) -> bool {
    text.lines().any(|line| is_heading_for(line, section))
}

fn is_heading_for(line: &str, section: SectionKind) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.len() > 40 {
        return false;
    }
    let lowered = trimmed.to_lowercase();
    let lowered = lowered.trim_end_matches(':').trim_end();

    section.heading_synonyms().iter().any(|synonym| {
        match lowered.strip_prefix(synonym) {
            // heading must end after the synonym or continue non-alphabetically,
            // so "experienced developer" does not count as a heading
            Some(rest) => rest.chars().next().map_or(true, |c| !c.is_alphabetic()),
            None => false,
        }
    })
}
