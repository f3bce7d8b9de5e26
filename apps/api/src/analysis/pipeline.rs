//! Glue between the pure analysis steps. Handlers and the rescoring coordinator
//! go through `Screener` so both use the same lexicon and scorer.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::analysis::interview::{recommend, InterviewPlan};
use crate::analysis::matching::{MatchResult, MatchScorer};
use crate::analysis::requirements::{analyze, RequirementProfile};
use crate::analysis::resume_parser::{parse, CandidateProfile};
use crate::lexicon::SkillLexicon;

/// Match result and interview plan for one candidate against one requirement profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub result: MatchResult,
    pub plan: InterviewPlan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Screening {
    pub profile: CandidateProfile,
    #[serde(flatten)]
    pub evaluation: Evaluation,
}

#[derive(Clone)]
pub struct Screener {
    lexicon: Arc<SkillLexicon>,
    scorer: Arc<dyn MatchScorer>,
}

impl Screener {
    pub fn new(lexicon: Arc<SkillLexicon>, scorer: Arc<dyn MatchScorer>) -> Self {
        Self { lexicon, scorer }
    }

    pub fn parse_resume(&self, raw_text: &str) -> CandidateProfile {
        parse(raw_text, &self.lexicon)
    }

    pub fn analyze_requirements(&self, raw_text: &str) -> RequirementProfile {
        let profile = analyze(raw_text, &self.lexicon);
        if profile.is_empty() && !raw_text.trim().is_empty() {
            warn!("No known skills found in job requirements; matching will use the neutral score");
        }
        profile
    }

    /// Scores a parsed profile and builds its interview plan.
    pub fn evaluate(
        &self,
        profile: &CandidateProfile,
        requirement: &RequirementProfile,
    ) -> Evaluation {
        let result = self.scorer.score(profile, requirement);
        debug!(
            "Scored with {}: {:.3} ({}), {} matched, {} missing",
            self.scorer.backend(),
            result.score,
            result.tier,
            result.matched_skills.len(),
            result.missing_skills.len()
        );
        let plan = recommend(&result, profile, &self.lexicon);
        Evaluation { result, plan }
    }

    /// Full pipeline for a freshly submitted resume.
    pub fn screen(&self, raw_text: &str, requirement: &RequirementProfile) -> Screening {
        let profile = self.parse_resume(raw_text);
        let evaluation = self.evaluate(&profile, requirement);
        info!(
            "Screened resume: {} skills, score {:.3} ({})",
            profile.skills.len(),
            evaluation.result.score,
            evaluation.result.tier
        );
        Screening {
            profile,
            evaluation,
        }
    }
}
