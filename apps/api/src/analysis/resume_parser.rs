//! Resume Parser: turns raw extracted resume text into a `CandidateProfile`.
//!
//! Parsing never fails. Anything that cannot be recognised comes back as `None`
//! or an empty list and is reported through `CandidateProfile::extraction_gaps`.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::lexicon::SkillLexicon;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap());

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+?\d{1,3}[\s.-]?)?(?:\(\d{3}\)|\d{3})[\s.-]?\d{3}[\s.-]?\d{4}\b").unwrap()
});

/// Only the document header is searched for a name.
const NAME_SEARCH_LINES: usize = 10;
const NAME_MAX_WORDS: usize = 4;

const EDUCATION_HEADERS: &[&str] = &[
    "education",
    "education and training",
    "academic background",
    "academic history",
    "qualifications",
    "academic qualifications",
];

const EXPERIENCE_HEADERS: &[&str] = &[
    "experience",
    "work experience",
    "professional experience",
    "relevant experience",
    "work history",
    "employment",
    "employment history",
    "career history",
];

/// Headers that close an education/experience section without opening one.
const OTHER_HEADERS: &[&str] = &[
    "summary",
    "professional summary",
    "profile",
    "objective",
    "skills",
    "technical skills",
    "core competencies",
    "projects",
    "certifications",
    "awards",
    "publications",
    "languages",
    "interests",
    "hobbies",
    "references",
    "contact",
    "volunteer experience",
];

/// Words that disqualify a header line from being read as the candidate's name.
const NAME_STOPWORDS: &[&str] = &["resume", "curriculum", "vitae", "cv", "page"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceMetadata {
    pub char_count: usize,
    pub word_count: usize,
    pub line_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skills: BTreeSet<String>,
    pub education: Vec<String>,
    pub experience: Vec<String>,
    pub source: SourceMetadata,
}

/// A profile field the parser could not populate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionGap {
    Name,
    Email,
    Phone,
    Skills,
    Education,
    Experience,
}

impl CandidateProfile {
    pub fn extraction_gaps(&self) -> Vec<ExtractionGap> {
        let mut gaps = Vec::new();
        if self.name.is_none() {
            gaps.push(ExtractionGap::Name);
        }
        if self.email.is_none() {
            gaps.push(ExtractionGap::Email);
        }
        if self.phone.is_none() {
            gaps.push(ExtractionGap::Phone);
        }
        if self.skills.is_empty() {
            gaps.push(ExtractionGap::Skills);
        }
        if self.education.is_empty() {
            gaps.push(ExtractionGap::Education);
        }
        if self.experience.is_empty() {
            gaps.push(ExtractionGap::Experience);
        }
        gaps
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    Education,
    Experience,
    Other,
}

/// Parses raw resume text into a profile.
pub fn parse(raw_text: &str, lexicon: &SkillLexicon) -> CandidateProfile {
    let (education, experience) = extract_sections(raw_text);

    let profile = CandidateProfile {
        name: extract_name(raw_text),
        email: extract_email(raw_text),
        phone: extract_phone(raw_text),
        skills: lexicon.extract_skills(raw_text),
        education,
        experience,
        source: SourceMetadata {
            char_count: raw_text.chars().count(),
            word_count: raw_text.split_whitespace().count(),
            line_count: raw_text.lines().count(),
        },
    };

    let gaps = profile.extraction_gaps();
    if gaps.is_empty() {
        debug!("Resume parsed with {} skills", profile.skills.len());
    } else {
        warn!("Degraded resume extraction, missing: {gaps:?}");
    }

    profile
}

fn extract_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

fn extract_phone(text: &str) -> Option<String> {
    PHONE_RE.find(text).map(|m| m.as_str().trim().to_string())
}

/// First short, letters-only line in the document header.
fn extract_name(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(NAME_SEARCH_LINES)
        .find(|line| looks_like_name(line))
        .map(str::to_string)
}

fn looks_like_name(line: &str) -> bool {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() || words.len() > NAME_MAX_WORDS || line.chars().count() <= 2 {
        return false;
    }
    if !line
        .chars()
        .all(|c| c.is_alphabetic() || c.is_whitespace() || matches!(c, '.' | '\'' | '-'))
    {
        return false;
    }
    if classify_header(line).is_some() {
        return false;
    }
    let lower = line.to_lowercase();
    !lower
        .split_whitespace()
        .any(|w| NAME_STOPWORDS.contains(&w))
}

fn classify_header(line: &str) -> Option<Section> {
    let normalized = line
        .trim()
        .trim_matches(|c: char| matches!(c, '#' | '*' | '=' | '_' | '-'))
        .trim()
        .trim_end_matches(':')
        .trim()
        .to_lowercase();

    if EDUCATION_HEADERS.contains(&normalized.as_str()) {
        Some(Section::Education)
    } else if EXPERIENCE_HEADERS.contains(&normalized.as_str()) {
        Some(Section::Experience)
    } else if OTHER_HEADERS.contains(&normalized.as_str()) {
        Some(Section::Other)
    } else {
        None
    }
}

/// Splits the text into (education, experience) entries. Each non-blank line under
/// a recognised header becomes one entry, trimmed but otherwise verbatim.
fn extract_sections(text: &str) -> (Vec<String>, Vec<String>) {
    let mut education = Vec::new();
    let mut experience = Vec::new();
    let mut current: Option<Section> = None;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(section) = classify_header(trimmed) {
            current = Some(section);
            continue;
        }
        match current {
            Some(Section::Education) => education.push(trimmed.to_string()),
            Some(Section::Experience) => experience.push(trimmed.to_string()),
            Some(Section::Other) | None => {}
        }
    }

    (education, experience)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = r#"
        Jane Doe
        jane.doe@example.com | (555) 123-4567

        Summary
        Backend engineer who likes Python and JS.

        Experience
        Senior Engineer, Acme Corp (2019-2023): led migration to Docker and AWS
        Engineer, Beta Inc (2016-2019): built Django services on PostgreSQL

        Education:
        B.Sc. Computer Science, State University, 2016

        Skills
        Python, JavaScript, Docker, AWS, PostgreSQL, Django
    "#;

    fn lexicon() -> SkillLexicon {
        SkillLexicon::builtin().unwrap()
    }

    #[test]
    fn test_parses_contact_fields() {
        let profile = parse(RESUME, &lexicon());
        assert_eq!(profile.name.as_deref(), Some("Jane Doe"));
        assert_eq!(profile.email.as_deref(), Some("jane.doe@example.com"));
        assert_eq!(profile.phone.as_deref(), Some("(555) 123-4567"));
    }

    #[test]
    fn test_parses_canonical_skills() {
        let profile = parse(RESUME, &lexicon());
        let expected: BTreeSet<String> = ["aws", "django", "docker", "javascript", "postgresql", "python"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(profile.skills, expected);
    }

    #[test]
    fn test_parses_sections_verbatim() {
        let profile = parse(RESUME, &lexicon());
        assert_eq!(profile.experience.len(), 2);
        assert!(profile.experience[0].starts_with("Senior Engineer, Acme Corp"));
        assert_eq!(
            profile.education,
            vec!["B.Sc. Computer Science, State University, 2016".to_string()]
        );
    }

    #[test]
    fn test_section_closed_by_other_header() {
        let profile = parse(RESUME, &lexicon());
        assert!(!profile
            .education
            .iter()
            .any(|e| e.contains("Python, JavaScript")));
    }

    #[test]
    fn test_no_headers_yields_empty_sections() {
        let profile = parse("Worked at Acme. Studied at State University.", &lexicon());
        assert!(profile.education.is_empty());
        assert!(profile.experience.is_empty());
    }

    #[test]
    fn test_work_history_header_is_experience() {
        let profile = parse("WORK HISTORY\nBarista, Cafe Uno\n", &lexicon());
        assert_eq!(profile.experience, vec!["Barista, Cafe Uno".to_string()]);
    }

    #[test]
    fn test_garbage_input_degrades_without_failing() {
        let profile = parse("%%%% 1234 ####", &lexicon());
        assert_eq!(profile.name, None);
        assert_eq!(profile.email, None);
        assert!(profile.skills.is_empty());
        assert_eq!(profile.extraction_gaps().len(), 6);
    }

    #[test]
    fn test_name_skips_resume_banner() {
        let profile = parse("Curriculum Vitae\nJohn Smith\n", &lexicon());
        assert_eq!(profile.name.as_deref(), Some("John Smith"));
    }

    #[test]
    fn test_name_ignores_long_sentences() {
        assert!(!looks_like_name("I am a software engineer with ten years"));
        assert!(!looks_like_name("Experience"));
        assert!(looks_like_name("Mary-Jane O'Neil"));
    }

    #[test]
    fn test_phone_formats() {
        assert_eq!(extract_phone("call 555.123.4567").as_deref(), Some("555.123.4567"));
        assert_eq!(extract_phone("+1 555-123-4567").as_deref(), Some("+1 555-123-4567"));
        assert_eq!(extract_phone("no number here"), None);
    }

    #[test]
    fn test_source_metadata() {
        let profile = parse("one two\nthree", &lexicon());
        assert_eq!(profile.source.word_count, 3);
        assert_eq!(profile.source.line_count, 2);
        assert_eq!(profile.source.char_count, 13);
    }

    #[test]
    fn test_parse_is_deterministic() {
        let lex = lexicon();
        assert_eq!(parse(RESUME, &lex), parse(RESUME, &lex));
    }
}
