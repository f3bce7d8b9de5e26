//! Requirement Analyzer: turns free-form job-requirement text into a `RequirementProfile`.
//!
//! Uses the same tokenizer and alias resolution as the resume parser. Skills that
//! only appear on "nice to have" lines (or under such a header) are weighted down;
//! everything else is a hard requirement with the default weight of 1.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::lexicon::{tokenize, SkillLexicon};

/// Weight given to skills that are only mentioned as preferred.
pub const PREFERRED_WEIGHT: f64 = 0.5;

/// Weight of a required skill that carries no explicit weight.
pub const DEFAULT_WEIGHT: f64 = 1.0;

const PREFERRED_MARKERS: &[&str] = &[
    "nice to have",
    "nice-to-have",
    "preferred",
    "bonus",
    "a plus",
    "desirable",
    "optional",
];

const REQUIRED_MARKERS: &[&str] = &[
    "required",
    "requirements",
    "must have",
    "must-have",
    "qualifications",
    "you have",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequirementProfile {
    /// canonical skill → optional weight in [0, 1]; `None` means `DEFAULT_WEIGHT`
    pub required_skills: BTreeMap<String, Option<f64>>,
    pub raw_text: String,
}

impl RequirementProfile {
    pub fn is_empty(&self) -> bool {
        self.required_skills.is_empty()
    }

    pub fn weight_of(&self, skill: &str) -> Option<f64> {
        self.required_skills
            .get(skill)
            .map(|w| effective_weight(*w))
    }

    pub fn total_weight(&self) -> f64 {
        self.required_skills
            .values()
            .map(|w| effective_weight(*w))
            .sum()
    }
}

pub fn effective_weight(weight: Option<f64>) -> f64 {
    weight.unwrap_or(DEFAULT_WEIGHT).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Priority {
    Required,
    Preferred,
}

/// Analyzes requirement text. Empty or whitespace-only text yields an empty
/// profile, which the matching engine scores with its neutral value.
pub fn analyze(raw_text: &str, lexicon: &SkillLexicon) -> RequirementProfile {
    if raw_text.trim().is_empty() {
        warn!("Job requirements are empty; matching will fall back to the neutral score");
        return RequirementProfile {
            required_skills: BTreeMap::new(),
            raw_text: raw_text.to_string(),
        };
    }

    let mut required_skills: BTreeMap<String, Option<f64>> = BTreeMap::new();
    let mut block = Priority::Required;

    for line in raw_text.lines() {
        let skills = lexicon.extract_skills(line);

        // A marker line with no skills switches the block that follows it.
        let line_priority = line_priority(line);
        if skills.is_empty() {
            if let Some(priority) = line_priority {
                block = priority;
            }
            continue;
        }

        let weight = match line_priority.unwrap_or(block) {
            Priority::Required => None,
            Priority::Preferred => Some(PREFERRED_WEIGHT),
        };

        for skill in skills {
            required_skills
                .entry(skill)
                .and_modify(|existing| *existing = stronger(*existing, weight))
                .or_insert(weight);
        }
    }

    debug!("Analyzed requirements: {} skills", required_skills.len());

    RequirementProfile {
        required_skills,
        raw_text: raw_text.to_string(),
    }
}

/// Whichever marker appears first on the line decides its priority
/// ("Preferred qualifications: ..." is preferred). Markers match whole tokens,
/// so "a plus" does not fire inside "Java plus".
fn line_priority(line: &str) -> Option<Priority> {
    let tokens = tokenize(line);
    let preferred_at = first_marker(&tokens, PREFERRED_MARKERS);
    let required_at = first_marker(&tokens, REQUIRED_MARKERS);

    match (required_at, preferred_at) {
        (Some(r), Some(p)) if r < p => Some(Priority::Required),
        (_, Some(_)) => Some(Priority::Preferred),
        (Some(_), None) => Some(Priority::Required),
        (None, None) => None,
    }
}

/// Token index of the earliest marker occurrence.
fn first_marker(tokens: &[String], markers: &[&str]) -> Option<usize> {
    markers
        .iter()
        .filter_map(|marker| {
            let needle = tokenize(marker);
            tokens.windows(needle.len()).position(|window| window == needle.as_slice())
        })
        .min()
}

fn stronger(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    if effective_weight(a) >= effective_weight(b) {
        a
    } else {
        b
    }
}
