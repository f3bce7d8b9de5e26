//! Interview question banks.
//!
//! Lookups go from the most specific source to the least: a question written for
//! the exact skill, then one for the skill's lexicon category, then a generic
//! template. Every lookup is a plain table read so plans are reproducible.

use crate::lexicon::SkillCategory;

/// Depth questions for matched skills, keyed by canonical token.
const SKILL_DEPTH_QUESTIONS: &[(&str, &str)] = &[
    ("python", "How do you manage memory and performance in a long-running Python service?"),
    ("javascript", "How do you handle asynchronous operations and error propagation in JavaScript?"),
    ("typescript", "How do you model complex domain types in TypeScript without weakening type safety?"),
    ("java", "How do you approach multithreading and shared state in Java applications?"),
    ("sql", "Walk us through how you would diagnose and optimize a slow SQL query."),
    ("react", "How do you manage state and avoid unnecessary re-renders in a large React application?"),
    ("docker", "How do you keep Docker images small, secure and reproducible?"),
    ("kubernetes", "How would you debug a pod that keeps restarting in a Kubernetes cluster?"),
    ("aws", "Describe an AWS architecture you designed and the trade-offs you made."),
    ("postgresql", "How do you plan and run schema migrations on a busy PostgreSQL database?"),
    ("django", "How do you structure a Django project so it stays maintainable as it grows?"),
    ("node.js", "How do you keep the Node.js event loop responsive under CPU-heavy load?"),
    ("machine learning", "How do you detect and handle model drift once a model is in production?"),
    ("leadership", "Tell us about a time you had to align a team behind a decision they disagreed with."),
];

/// Probe questions for missing skills, keyed by canonical token.
const SKILL_GAP_QUESTIONS: &[(&str, &str)] = &[
    ("python", "Python is part of our stack. Which language do you know best, and how would you map its idioms to Python?"),
    ("javascript", "How much frontend or JavaScript work have you done, even informally?"),
    ("react", "Have you used a component-based frontend framework? How would you approach learning React?"),
    ("docker", "How have you packaged and deployed applications so far, and what do you know about containers?"),
    ("kubernetes", "What do you know about container orchestration, and how would you get productive with Kubernetes?"),
    ("aws", "What experience do you have with any cloud platform, and how would you ramp up on AWS?"),
    ("sql", "How have you stored and queried data in past projects without relational databases?"),
    ("agile", "How have your previous teams planned and tracked work?"),
];

fn category_depth_template(category: SkillCategory) -> &'static str {
    match category {
        SkillCategory::Language => "What are the trickiest parts of {skill} you have had to master, and how did you deal with them?",
        SkillCategory::Framework => "Describe a non-trivial feature you built with {skill} and how you structured it.",
        SkillCategory::Database => "How have you designed schemas and indexes in {skill} for your main access patterns?",
        SkillCategory::Cloud => "Which {skill} services have you run in production, and how did you control cost and security?",
        SkillCategory::DevOps => "How have you used {skill} in a CI/CD or deployment workflow?",
        SkillCategory::DataScience => "Walk us through an analysis or model you built with {skill}, from raw data to result.",
        SkillCategory::Mobile => "How do you handle releases, crashes and device fragmentation when shipping with {skill}?",
        SkillCategory::Testing => "How do you decide what to cover with {skill}, and how do you keep those tests reliable?",
        SkillCategory::Design => "Show us how you take a design from rough idea to handoff in {skill}.",
        SkillCategory::ProjectManagement => "How has {skill} worked in your teams, and what would you change about it?",
        SkillCategory::SoftSkill => "Give us a concrete example that demonstrates your {skill}.",
        SkillCategory::Other => "Describe the most complex work you have done with {skill}.",
    }
}

fn category_gap_template(category: SkillCategory) -> &'static str {
    match category {
        SkillCategory::Language => "{skill} is required for this role. How quickly have you picked up a new programming language before?",
        SkillCategory::Framework => "You have not listed {skill}. Which comparable frameworks have you used?",
        SkillCategory::Database => "You have not listed {skill}. Which databases have you worked with, and how transferable is that experience?",
        SkillCategory::Cloud => "What hands-on cloud experience do you have that would carry over to {skill}?",
        SkillCategory::DevOps => "How do you currently build and ship software, and what do you know about {skill}?",
        SkillCategory::DataScience => "What data analysis experience do you have that relates to {skill}?",
        SkillCategory::Mobile => "Have you built anything for mobile platforms, and how would you approach {skill}?",
        SkillCategory::Testing => "How do you test your code today, and have you used anything similar to {skill}?",
        SkillCategory::Design => "How do you collaborate with designers, and have you used tools like {skill}?",
        SkillCategory::ProjectManagement => "How have your teams organised work, and how familiar are you with {skill}?",
        SkillCategory::SoftSkill => "The role calls for strong {skill}. Tell us about a time you had to rely on it.",
        SkillCategory::Other => "This role requires {skill}. What related experience do you have?",
    }
}

/// General problem-solving questions used to top up short technical lists.
pub const PROBLEM_SOLVING_QUESTIONS: &[&str] = &[
    "How would you design a scalable web application architecture?",
    "How would you approach debugging a production issue with limited information?",
    "Explain how you would implement a caching strategy for a high-traffic service.",
    "How would you handle a data migration in a live system?",
];

/// Behavioral questions triggered by keywords found in experience entries.
/// Keywords match whole tokens; a trailing `*` marks a stem ("migrat*").
pub const BEHAVIORAL_TRIGGERS: &[(&[&str], &str)] = &[
    (
        &["led", "lead", "manager", "managed", "head of"],
        "Tell us about a time you led a team through a difficult delivery. What did you do when things went off track?",
    ),
    (
        &["mentor*", "coached", "onboard*", "trained"],
        "Describe a situation where you mentored a less experienced colleague. How did you measure their progress?",
    ),
    (
        &["migrat*", "refactor*", "rewrite", "rewrote", "redesign*"],
        "Tell us about a time you had to make a difficult technical decision, such as a migration or rewrite.",
    ),
    (
        &["client*", "customer*", "stakeholder*"],
        "Describe a project where you had to work closely with non-technical stakeholders.",
    ),
    (
        &["deadline*", "launch*", "shipped", "release*"],
        "How did you handle your tightest deadline? What did you cut, and why?",
    ),
    (
        &["team*", "collaborat*", "cross-functional"],
        "How do you handle disagreements with teammates about technical direction?",
    ),
    (
        &["startup*", "founded", "freelance*", "contract*"],
        "Tell us about a time you had to work with very little structure or guidance.",
    ),
];

/// Whether `tokens` (from `lexicon::tokenize`) contain `keyword`. Multi-word
/// keywords match consecutive tokens; a trailing `*` on the last word makes it
/// a prefix.
pub fn mentions_keyword(tokens: &[String], keyword: &str) -> bool {
    let words: Vec<&str> = keyword.split_whitespace().collect();
    if words.is_empty() {
        return false;
    }
    tokens.windows(words.len()).any(|window| {
        window.iter().zip(&words).all(|(token, word)| match word.strip_suffix('*') {
            Some(stem) => token.starts_with(stem),
            None => token == word,
        })
    })
}

/// Fallback behavioral questions, in the order they are used.
pub const GENERAL_BEHAVIORAL_QUESTIONS: &[&str] = &[
    "Tell us about a challenging project you worked on and how you overcame obstacles.",
    "Describe a situation where you had to learn a new technology quickly.",
    "How do you stay current with changes in your field?",
    "Tell us about a mistake you made at work and what you changed afterwards.",
];

/// Follow-ups for missing skills the candidate may be willing to learn.
const SKILL_FOLLOW_UPS: &[(&str, &str)] = &[
    ("python", "Would you be interested in learning Python? What's your approach to learning new programming languages?"),
    ("javascript", "How do you feel about learning JavaScript? What's your experience with frontend development?"),
    ("react", "Are you familiar with modern frontend frameworks? How do you approach learning new technologies?"),
    ("aws", "What's your experience with cloud platforms? How do you approach infrastructure management?"),
    ("docker", "Are you familiar with containerization? How do you approach deployment and DevOps?"),
    ("agile", "What's your experience with agile methodologies? How do you handle project management?"),
    ("leadership", "Describe your leadership experience. How do you motivate and guide team members?"),
    ("communication", "How do you communicate technical concepts to non-technical stakeholders?"),
];

fn lookup(table: &[(&str, &'static str)], skill: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(key, _)| *key == skill)
        .map(|(_, question)| *question)
}

fn fill(template: &str, skill: &str) -> String {
    template.replace("{skill}", skill)
}

/// A question verifying depth in a skill the candidate has.
pub fn depth_question(skill: &str, category: Option<SkillCategory>) -> String {
    match lookup(SKILL_DEPTH_QUESTIONS, skill) {
        Some(question) => question.to_string(),
        None => fill(
            category_depth_template(category.unwrap_or(SkillCategory::Other)),
            skill,
        ),
    }
}

/// A question probing a required skill the candidate lacks.
pub fn gap_question(skill: &str, category: Option<SkillCategory>) -> String {
    match lookup(SKILL_GAP_QUESTIONS, skill) {
        Some(question) => question.to_string(),
        None => fill(
            category_gap_template(category.unwrap_or(SkillCategory::Other)),
            skill,
        ),
    }
}

pub fn learning_follow_up(skill: &str) -> String {
    match lookup(SKILL_FOLLOW_UPS, skill) {
        Some(question) => question.to_string(),
        None => format!(
            "Would you be open to learning {skill}? How have you ramped up on an unfamiliar tool before?"
        ),
    }
}
