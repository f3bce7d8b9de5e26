//! Recommendation Generator: maps a match result and the candidate profile to an
//! `InterviewPlan`.
//!
//! The plan is a pure function of its inputs: no randomness and no timestamps,
//! so identical inputs produce byte-identical plans.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::analysis::matching::MatchResult;
use crate::analysis::questions::{
    depth_question, gap_question, learning_follow_up, mentions_keyword, BEHAVIORAL_TRIGGERS,
    GENERAL_BEHAVIORAL_QUESTIONS, PROBLEM_SOLVING_QUESTIONS,
};
use crate::analysis::resume_parser::{CandidateProfile, ExtractionGap};
use crate::analysis::tier::MatchTier;
use crate::lexicon::{tokenize, SkillLexicon};

const MAX_TECHNICAL_QUESTIONS: usize = 6;
const MIN_TECHNICAL_QUESTIONS: usize = 3;
const MAX_FOLLOW_UP_QUESTIONS: usize = 5;
const MAX_FOCUS_SKILLS: usize = 5;
/// Fewer listed skills than this triggers a follow-up asking for more detail.
const SPARSE_SKILL_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterviewFormat {
    #[serde(rename = "Technical Deep-Dive")]
    TechnicalDeepDive,
    #[serde(rename = "Standard Screening")]
    StandardScreening,
    #[serde(rename = "Brief Screening")]
    BriefScreening,
    #[serde(rename = "Not Recommended")]
    NotRecommended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Junior,
    Mid,
    Senior,
}

impl ExperienceLevel {
    /// Senior: more than 3 experience entries or any senior/lead title.
    /// Mid: more than 1 entry or more than 8 skills. Otherwise junior.
    pub fn classify(candidate: &CandidateProfile) -> Self {
        let senior_title = candidate.experience.iter().any(|entry| {
            let tokens = tokenize(entry);
            mentions_keyword(&tokens, "senior") || mentions_keyword(&tokens, "lead")
        });
        if candidate.experience.len() > 3 || senior_title {
            ExperienceLevel::Senior
        } else if candidate.experience.len() > 1 || candidate.skills.len() > 8 {
            ExperienceLevel::Mid
        } else {
            ExperienceLevel::Junior
        }
    }

    fn behavioral_question_count(&self) -> usize {
        match self {
            ExperienceLevel::Junior => 2,
            ExperienceLevel::Mid => 3,
            ExperienceLevel::Senior => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralRecommendation {
    pub priority: Priority,
    pub recommendation: String,
    pub focus_areas: BTreeSet<String>,
    pub red_flags: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewPlan {
    pub format: InterviewFormat,
    pub duration: String,
    pub stages: Vec<String>,
    pub experience_level: ExperienceLevel,
    pub general_recommendation: GeneralRecommendation,
    pub technical_questions: Vec<String>,
    pub behavioral_questions: Vec<String>,
    pub follow_up_questions: Vec<String>,
}

/// Per-format row of the rule table.
struct FormatRule {
    duration: &'static str,
    stages: &'static [&'static str],
    /// (depth questions from matched skills, gap questions from missing skills)
    question_mix: (usize, usize),
}

fn format_rule(format: InterviewFormat) -> FormatRule {
    match format {
        InterviewFormat::TechnicalDeepDive => FormatRule {
            duration: "2-3 hours",
            stages: &[
                "Phone screen (30 minutes)",
                "Technical deep-dive (1 hour)",
                "System design discussion (45 minutes)",
                "Onsite panel interview (1 hour)",
            ],
            question_mix: (4, 2),
        },
        InterviewFormat::StandardScreening => FormatRule {
            duration: "1.5-2 hours",
            stages: &[
                "Phone screen (30 minutes)",
                "Technical assessment (1 hour)",
                "Skills gap discussion (15 minutes)",
            ],
            question_mix: (2, 3),
        },
        InterviewFormat::BriefScreening => FormatRule {
            duration: "45 minutes",
            stages: &[
                "Phone screen (20 minutes)",
                "Basic technical assessment (25 minutes)",
            ],
            question_mix: (1, 3),
        },
        InterviewFormat::NotRecommended => FormatRule {
            duration: "15 minutes",
            stages: &["Recruiter review (15 minutes)"],
            question_mix: (0, 3),
        },
    }
}

/// Builds the interview plan for a scored candidate.
pub fn recommend(
    result: &MatchResult,
    candidate: &CandidateProfile,
    lexicon: &SkillLexicon,
) -> InterviewPlan {
    let format = select_format(result);
    let rule = format_rule(format);
    let experience_level = ExperienceLevel::classify(candidate);

    InterviewPlan {
        format,
        duration: rule.duration.to_string(),
        stages: rule.stages.iter().map(|s| s.to_string()).collect(),
        experience_level,
        general_recommendation: general_recommendation(result, format),
        technical_questions: technical_questions(result, lexicon, rule.question_mix),
        behavioral_questions: behavioral_questions(candidate, experience_level),
        follow_up_questions: follow_up_questions(result, candidate),
    }
}

fn select_format(result: &MatchResult) -> InterviewFormat {
    match result.tier {
        MatchTier::High => InterviewFormat::TechnicalDeepDive,
        MatchTier::Medium => InterviewFormat::StandardScreening,
        // nothing required was matched at all
        MatchTier::Low if result.matched_skills.is_empty() && !result.missing_skills.is_empty() => {
            InterviewFormat::NotRecommended
        }
        MatchTier::Low => InterviewFormat::BriefScreening,
    }
}

/// Missing skills with critical ones first, each group in canonical order.
fn prioritized_missing(result: &MatchResult) -> Vec<&String> {
    result
        .critical_missing
        .iter()
        .chain(
            result
                .missing_skills
                .iter()
                .filter(|s| !result.critical_missing.contains(*s)),
        )
        .collect()
}

fn general_recommendation(result: &MatchResult, format: InterviewFormat) -> GeneralRecommendation {
    let missing = prioritized_missing(result);
    let missing_list = |n: usize| {
        missing
            .iter()
            .take(n)
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    match format {
        InterviewFormat::TechnicalDeepDive => {
            let mut focus_areas: BTreeSet<String> = result
                .matched_skills
                .iter()
                .take(MAX_FOCUS_SKILLS)
                .cloned()
                .collect();
            if focus_areas.is_empty() {
                focus_areas.insert("Technical depth".to_string());
                focus_areas.insert("System design".to_string());
            }
            let red_flags = if missing.is_empty() {
                "Watch for overconfidence or lack of teamwork".to_string()
            } else {
                format!("Confirm remaining gaps: {}", missing_list(3))
            };
            GeneralRecommendation {
                priority: Priority::High,
                recommendation: "Strong candidate - recommend immediate technical interview"
                    .to_string(),
                focus_areas,
                red_flags,
            }
        }
        InterviewFormat::StandardScreening => {
            let mut focus_areas: BTreeSet<String> = result
                .matched_skills
                .iter()
                .take(3)
                .map(|s| format!("Validate {s}"))
                .collect();
            focus_areas.extend(missing.iter().take(3).map(|s| format!("Probe {s}")));
            if focus_areas.is_empty() {
                focus_areas.insert("Technical skills".to_string());
                focus_areas.insert("Learning ability".to_string());
            }
            let red_flags = if missing.is_empty() {
                "Confirm the depth behind the listed skills".to_string()
            } else {
                format!("Assess willingness to learn missing skills: {}", missing_list(3))
            };
            GeneralRecommendation {
                priority: Priority::Medium,
                recommendation: "Potential candidate - interview with focus on skill gaps"
                    .to_string(),
                focus_areas,
                red_flags,
            }
        }
        InterviewFormat::BriefScreening | InterviewFormat::NotRecommended => {
            let mut focus_areas: BTreeSet<String> = ["Learning ability", "Motivation"]
                .iter()
                .map(|s| s.to_string())
                .collect();
            focus_areas.extend(missing.iter().take(3).map(|s| format!("Probe {s}")));
            let recommendation = if format == InterviewFormat::NotRecommended {
                "Does not meet the current requirements - not recommended for interview"
            } else {
                "Weak match - brief screening to assess learning potential"
            };
            GeneralRecommendation {
                priority: Priority::Low,
                recommendation: recommendation.to_string(),
                focus_areas,
                red_flags: low_match_red_flags(result),
            }
        }
    }
}

fn low_match_red_flags(result: &MatchResult) -> String {
    let missing = result.missing_skills.len();
    let required = missing + result.matched_skills.len();
    if missing == 0 {
        return "No required skills to compare against; score reflects the neutral default"
            .to_string();
    }

    let mut text = format!("Missing {missing} of {required} required skills");
    if !result.critical_missing.is_empty() {
        let critical: Vec<&str> = result.critical_missing.iter().map(String::as_str).collect();
        text.push_str(&format!(
            ", including {} critical: {}",
            critical.len(),
            critical.join(", ")
        ));
    }
    text.push_str(". May require significant training investment");
    text
}

/// Gap questions first, then depth checks on matched skills, topped up with general
/// problem-solving questions.
fn technical_questions(
    result: &MatchResult,
    lexicon: &SkillLexicon,
    (depth_count, gap_count): (usize, usize),
) -> Vec<String> {
    let mut questions: Vec<String> = prioritized_missing(result)
        .into_iter()
        .take(gap_count)
        .map(|skill| gap_question(skill, lexicon.category(skill)))
        .collect();

    questions.extend(
        result
            .matched_skills
            .iter()
            .take(depth_count)
            .map(|skill| depth_question(skill, lexicon.category(skill))),
    );

    for general in PROBLEM_SOLVING_QUESTIONS {
        if questions.len() >= MIN_TECHNICAL_QUESTIONS {
            break;
        }
        questions.push(general.to_string());
    }

    dedup_in_order(&mut questions);
    questions.truncate(MAX_TECHNICAL_QUESTIONS);
    questions
}

fn behavioral_questions(candidate: &CandidateProfile, level: ExperienceLevel) -> Vec<String> {
    let entries: Vec<Vec<String>> = candidate.experience.iter().map(|e| tokenize(e)).collect();
    let mut questions: Vec<String> = BEHAVIORAL_TRIGGERS
        .iter()
        .filter(|(keywords, _)| {
            entries
                .iter()
                .any(|tokens| keywords.iter().any(|k| mentions_keyword(tokens, k)))
        })
        .map(|(_, question)| question.to_string())
        .collect();

    questions.extend(GENERAL_BEHAVIORAL_QUESTIONS.iter().map(|q| q.to_string()));
    dedup_in_order(&mut questions);
    questions.truncate(level.behavioral_question_count());
    questions
}

fn follow_up_questions(result: &MatchResult, candidate: &CandidateProfile) -> Vec<String> {
    let gaps = candidate.extraction_gaps();
    let mut questions = Vec::new();

    if gaps.contains(&ExtractionGap::Education) {
        questions.push(
            "We could not find an education section. Can you walk us through your education or formal training?"
                .to_string(),
        );
    }
    if gaps.contains(&ExtractionGap::Experience) {
        questions.push(
            "Your work history was not clear from the resume. Can you describe your most recent roles and responsibilities?"
                .to_string(),
        );
    }
    if candidate.skills.len() < SPARSE_SKILL_COUNT {
        questions.push(
            "Which tools and technologies have you used most in the last two years?".to_string(),
        );
    }
    if gaps.contains(&ExtractionGap::Email) || gaps.contains(&ExtractionGap::Phone) {
        questions
            .push("Please confirm the best email address and phone number to reach you.".to_string());
    }
    if gaps.contains(&ExtractionGap::Name) {
        questions.push("Please confirm your full name as it should appear in our records.".to_string());
    }

    questions.extend(
        prioritized_missing(result)
            .into_iter()
            .map(|skill| learning_follow_up(skill)),
    );

    dedup_in_order(&mut questions);
    questions.truncate(MAX_FOLLOW_UP_QUESTIONS);
    questions
}

fn dedup_in_order(items: &mut Vec<String>) {
    let mut seen = BTreeSet::new();
    items.retain(|item| seen.insert(item.clone()));
}
