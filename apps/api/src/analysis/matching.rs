//! Matching Engine: pluggable, trait-based scorer comparing a candidate profile
//! against a requirement profile.
//!
//! Default: `WeightedOverlapScorer` (pure, deterministic, exact-set logic).
//! `AppState` holds an `Arc<dyn MatchScorer>`, so another scoring policy can be
//! swapped in at startup without touching handlers or the rescoring coordinator.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::analysis::requirements::RequirementProfile;
use crate::analysis::resume_parser::CandidateProfile;
use crate::analysis::tier::MatchTier;
use crate::lexicon::tokenize;

/// Missing skills at or above this effective weight are reported as critical gaps.
pub const CRITICAL_WEIGHT: f64 = 0.75;

/// Score used when the requirement profile has nothing to match against.
pub const DEFAULT_NEUTRAL_SCORE: f64 = 0.5;

const DEGREE_KEYWORDS: &[&str] = &[
    "bachelor",
    "bachelors",
    "master",
    "masters",
    "phd",
    "doctorate",
    "degree",
    "diploma",
    "mba",
    "b.sc",
    "m.sc",
    "bsc",
    "msc",
];

// ────────────────────────────────────────────────────────────────────────────
// Output data model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Fraction in [0, 1]. Never scaled to a percentage here.
    pub score: f64,
    pub tier: MatchTier,
    pub matched_skills: BTreeSet<String>,
    pub missing_skills: BTreeSet<String>,
    /// Subset of `missing_skills` whose weight is at least `CRITICAL_WEIGHT`.
    pub critical_missing: BTreeSet<String>,
}

/// Tunable scoring policy. Bonuses are optional and default to zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchPolicy {
    pub neutral_score: f64,
    /// Added when candidate education and the requirement text share a degree keyword.
    pub education_bonus: f64,
    /// Added when an experience entry names one of the matched skills.
    pub experience_bonus: f64,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            neutral_score: DEFAULT_NEUTRAL_SCORE,
            education_bonus: 0.0,
            experience_bonus: 0.0,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to change how profiles are scored. Implementations must be
/// pure: identical inputs give identical results.
pub trait MatchScorer: Send + Sync {
    fn score(
        &self,
        candidate: &CandidateProfile,
        requirement: &RequirementProfile,
    ) -> MatchResult;

    /// Short label for logs.
    fn backend(&self) -> &'static str;
}

pub struct WeightedOverlapScorer {
    policy: MatchPolicy,
}

impl WeightedOverlapScorer {
    pub fn new(policy: MatchPolicy) -> Self {
        Self { policy }
    }
}

impl MatchScorer for WeightedOverlapScorer {
    fn score(
        &self,
        candidate: &CandidateProfile,
        requirement: &RequirementProfile,
    ) -> MatchResult {
        match_profiles(candidate, requirement, &self.policy)
    }

    fn backend(&self) -> &'static str {
        "weighted_overlap"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core algorithm
// ────────────────────────────────────────────────────────────────────────────

/// Weighted skill overlap.
///
/// 1. matched = candidate ∩ required, missing = required − candidate
/// 2. base = Σ weight(matched) / Σ weight(required), unweighted skills count 1
/// 3. empty requirements (or zero total weight) → `policy.neutral_score`
/// 4. optional education / experience bonuses, then clamp to [0, 1]
pub fn match_profiles(
    candidate: &CandidateProfile,
    requirement: &RequirementProfile,
    policy: &MatchPolicy,
) -> MatchResult {
    let mut matched_skills = BTreeSet::new();
    let mut missing_skills = BTreeSet::new();
    let mut critical_missing = BTreeSet::new();
    let mut matched_weight = 0.0_f64;

    for skill in requirement.required_skills.keys() {
        let weight = requirement.weight_of(skill).unwrap_or_default();
        if candidate.skills.contains(skill) {
            matched_weight += weight;
            matched_skills.insert(skill.clone());
        } else {
            if weight >= CRITICAL_WEIGHT {
                critical_missing.insert(skill.clone());
            }
            missing_skills.insert(skill.clone());
        }
    }

    let total_weight = requirement.total_weight();
    let raw_score = if total_weight <= 0.0 {
        policy.neutral_score
    } else {
        let mut score = matched_weight / total_weight;
        if policy.education_bonus > 0.0 && education_overlaps(candidate, requirement) {
            score += policy.education_bonus;
        }
        if policy.experience_bonus > 0.0 && experience_mentions(candidate, &matched_skills) {
            score += policy.experience_bonus;
        }
        score
    };
    let score = raw_score.clamp(0.0, 1.0);

    MatchResult {
        score,
        tier: MatchTier::from_score(score),
        matched_skills,
        missing_skills,
        critical_missing,
    }
}

fn degree_keywords(text: &str) -> BTreeSet<String> {
    tokenize(text)
        .into_iter()
        .filter(|t| DEGREE_KEYWORDS.contains(&t.as_str()))
        .collect()
}

fn education_overlaps(candidate: &CandidateProfile, requirement: &RequirementProfile) -> bool {
    let wanted = degree_keywords(&requirement.raw_text);
    if wanted.is_empty() {
        return false;
    }
    candidate
        .education
        .iter()
        .any(|entry| !degree_keywords(entry).is_disjoint(&wanted))
}

/// Canonical skill names only; aliases inside experience text are not resolved.
fn experience_mentions(candidate: &CandidateProfile, matched: &BTreeSet<String>) -> bool {
    candidate.experience.iter().any(|entry| {
        let haystack = format!(" {} ", tokenize(entry).join(" "));
        matched
            .iter()
            .any(|skill| haystack.contains(&format!(" {} ", tokenize(skill).join(" "))))
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn candidate(skills: &[&str]) -> CandidateProfile {
        CandidateProfile {
            skills: skills.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn requirement(skills: &[(&str, Option<f64>)]) -> RequirementProfile {
        RequirementProfile {
            required_skills: skills
                .iter()
                .map(|(s, w)| (s.to_string(), *w))
                .collect::<BTreeMap<_, _>>(),
            raw_text: String::new(),
        }
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_partial_overlap_scores_low() {
        let result = match_profiles(
            &candidate(&["python", "sql", "react"]),
            &requirement(&[("python", None), ("docker", None), ("aws", None)]),
            &MatchPolicy::default(),
        );
        assert_eq!(result.matched_skills, set(&["python"]));
        assert_eq!(result.missing_skills, set(&["docker", "aws"]));
        assert!((result.score - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(result.tier, MatchTier::Low);
    }

    #[test]
    fn test_full_coverage_scores_one() {
        let result = match_profiles(
            &candidate(&["python", "docker", "aws", "sql"]),
            &requirement(&[("python", None), ("docker", None), ("aws", None)]),
            &MatchPolicy::default(),
        );
        assert_eq!(result.matched_skills, set(&["python", "docker", "aws"]));
        assert!(result.missing_skills.is_empty());
        assert_eq!(result.score, 1.0);
        assert_eq!(result.tier, MatchTier::High);
    }

    #[test]
    fn test_empty_requirements_use_neutral_score() {
        let result = match_profiles(
            &candidate(&["python"]),
            &requirement(&[]),
            &MatchPolicy::default(),
        );
        assert_eq!(result.score, DEFAULT_NEUTRAL_SCORE);
        assert!(result.matched_skills.is_empty());
        assert!(result.missing_skills.is_empty());
        assert_eq!(result.tier, MatchTier::Medium);
    }

    #[test]
    fn test_neutral_score_is_configurable() {
        let policy = MatchPolicy {
            neutral_score: 0.2,
            ..Default::default()
        };
        let result = match_profiles(&candidate(&[]), &requirement(&[]), &policy);
        assert_eq!(result.score, 0.2);
        assert_eq!(result.tier, MatchTier::Low);
    }

    #[test]
    fn test_zero_total_weight_uses_neutral_score() {
        let result = match_profiles(
            &candidate(&["python"]),
            &requirement(&[("python", Some(0.0))]),
            &MatchPolicy::default(),
        );
        assert_eq!(result.score, DEFAULT_NEUTRAL_SCORE);
        assert_eq!(result.matched_skills, set(&["python"]));
    }

    #[test]
    fn test_weights_shift_score() {
        // matched 1.0 of total 1.5
        let result = match_profiles(
            &candidate(&["java"]),
            &requirement(&[("java", None), ("kubernetes", Some(0.5))]),
            &MatchPolicy::default(),
        );
        assert!((result.score - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(result.tier, MatchTier::Medium);
        assert!(result.critical_missing.is_empty());
    }

    #[test]
    fn test_critical_missing_only_counts_heavy_skills() {
        let result = match_profiles(
            &candidate(&[]),
            &requirement(&[("rust", None), ("kafka", Some(0.5)), ("go", Some(0.8))]),
            &MatchPolicy::default(),
        );
        assert_eq!(result.critical_missing, set(&["rust", "go"]));
        assert_eq!(result.missing_skills.len(), 3);
    }

    #[test]
    fn test_partition_invariant() {
        let req = requirement(&[("a", None), ("b", Some(0.3)), ("c", None), ("d", Some(1.0))]);
        for skills in [&["a"][..], &["a", "b", "c", "d", "e"], &[], &["e", "c"]] {
            let result = match_profiles(&candidate(skills), &req, &MatchPolicy::default());
            let union: BTreeSet<String> = result
                .matched_skills
                .union(&result.missing_skills)
                .cloned()
                .collect();
            let required: BTreeSet<String> = req.required_skills.keys().cloned().collect();
            assert_eq!(union, required);
            assert!(result.matched_skills.is_disjoint(&result.missing_skills));
            assert!((0.0..=1.0).contains(&result.score));
        }
    }

    #[test]
    fn test_bonuses_are_clamped() {
        let policy = MatchPolicy {
            neutral_score: 0.5,
            education_bonus: 0.5,
            experience_bonus: 0.5,
        };
        let mut cand = candidate(&["python"]);
        cand.education = vec!["Bachelor of Science, MIT".to_string()];
        cand.experience = vec!["Wrote Python services".to_string()];
        let mut req = requirement(&[("python", None)]);
        req.raw_text = "Python, bachelor's degree".to_string();

        let result = match_profiles(&cand, &req, &policy);
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn test_education_bonus_requires_keyword_overlap() {
        let policy = MatchPolicy {
            education_bonus: 0.1,
            ..Default::default()
        };
        let mut cand = candidate(&["python"]);
        cand.education = vec!["Master of Engineering".to_string()];
        let mut req = requirement(&[("python", None), ("aws", None)]);
        req.raw_text = "Python and AWS; master's degree preferred".to_string();
        let with_overlap = match_profiles(&cand, &req, &policy);
        assert!((with_overlap.score - 0.6).abs() < 1e-9);

        req.raw_text = "Python and AWS".to_string();
        let without = match_profiles(&cand, &req, &policy);
        assert!((without.score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_experience_bonus_uses_matched_skills() {
        let policy = MatchPolicy {
            experience_bonus: 0.1,
            ..Default::default()
        };
        let mut cand = candidate(&["python"]);
        cand.experience = vec!["Built data pipelines in Python at Acme".to_string()];
        let req = requirement(&[("python", None), ("aws", None)]);
        assert!((match_profiles(&cand, &req, &policy).score - 0.6).abs() < 1e-9);

        cand.experience = vec!["Managed a bakery".to_string()];
        assert!((match_profiles(&cand, &req, &policy).score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_scorer_is_idempotent() {
        let scorer = WeightedOverlapScorer::new(MatchPolicy::default());
        let cand = candidate(&["python", "sql"]);
        let req = requirement(&[("python", None), ("docker", Some(0.4))]);
        assert_eq!(scorer.score(&cand, &req), scorer.score(&cand, &req));
        assert_eq!(scorer.backend(), "weighted_overlap");
    }
}
