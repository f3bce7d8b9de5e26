//! Skill Lexicon: canonical skill vocabulary plus alias groups.
//!
//! Skill extraction is classification over this vocabulary: text is tokenized,
//! token windows are looked up in the alias table (longest phrase first), and every
//! hit resolves to the canonical token of its group. Nothing outside the lexicon is
//! ever reported as a skill, which keeps matching deterministic.
//!
//! The lexicon is immutable after load and shared as `Arc<SkillLexicon>`.

mod builtin;

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use builtin::BUILTIN_SKILLS;

/// Characters that stay inside a token besides letters and digits
/// ("c++", "c#", "node.js", "scikit-learn").
const TOKEN_INNER_CHARS: &[char] = &['+', '#', '.', '-'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Language,
    Framework,
    Database,
    Cloud,
    DevOps,
    DataScience,
    Mobile,
    Testing,
    Design,
    ProjectManagement,
    SoftSkill,
    Other,
}

/// One canonical skill and the aliases that resolve to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillEntry {
    pub name: String,
    #[serde(default = "default_category")]
    pub category: SkillCategory,
    #[serde(default)]
    pub aliases: Vec<String>,
}

fn default_category() -> SkillCategory {
    SkillCategory::Other
}

/// On-disk lexicon format (`SKILL_LEXICON_PATH`).
#[derive(Debug, Deserialize)]
struct LexiconFile {
    skills: Vec<SkillEntry>,
}

/// A malformed or missing lexicon. The engine cannot run without one, so these
/// surface at startup and are never retried.
#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("failed to read skill lexicon {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("skill lexicon is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("skill lexicon contains no skills")]
    Empty,

    #[error("skill lexicon entry has a blank name")]
    BlankName,

    #[error("skill '{0}' is defined more than once")]
    DuplicateSkill(String),

    #[error("skill '{skill}' has a blank alias")]
    BlankAlias { skill: String },

    #[error("alias '{alias}' is claimed by both '{first}' and '{second}'")]
    ConflictingAlias {
        alias: String,
        first: String,
        second: String,
    },
}

#[derive(Debug, Clone)]
pub struct SkillLexicon {
    skills: BTreeMap<String, SkillCategory>,
    /// normalized alias phrase → canonical token
    aliases: HashMap<String, String>,
    max_phrase_len: usize,
}

impl SkillLexicon {
    /// The compiled-in vocabulary.
    pub fn builtin() -> Result<Self, LexiconError> {
        let entries = BUILTIN_SKILLS
            .iter()
            .map(|(name, category, aliases)| SkillEntry {
                name: name.to_string(),
                category: *category,
                aliases: aliases.iter().map(|a| a.to_string()).collect(),
            })
            .collect();
        Self::from_entries(entries)
    }

    pub fn from_path(path: &Path) -> Result<Self, LexiconError> {
        let raw = std::fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, LexiconError> {
        let file: LexiconFile = serde_json::from_str(raw)?;
        Self::from_entries(file.skills)
    }

    pub fn from_entries(entries: Vec<SkillEntry>) -> Result<Self, LexiconError> {
        if entries.is_empty() {
            return Err(LexiconError::Empty);
        }

        let mut skills = BTreeMap::new();
        let mut aliases: HashMap<String, String> = HashMap::new();
        let mut max_phrase_len = 1;

        for entry in entries {
            let canonical = entry.name.trim().to_lowercase();
            if normalize_phrase(&canonical).is_empty() {
                return Err(LexiconError::BlankName);
            }
            if skills.insert(canonical.clone(), entry.category).is_some() {
                return Err(LexiconError::DuplicateSkill(canonical));
            }

            let mut phrases = vec![canonical.clone()];
            phrases.extend(entry.aliases);

            for alias in &phrases {
                let tokens = tokenize(alias);
                if tokens.is_empty() {
                    return Err(LexiconError::BlankAlias {
                        skill: canonical.clone(),
                    });
                }
                max_phrase_len = max_phrase_len.max(tokens.len());
                let key = tokens.join(" ");

                match aliases.get(&key) {
                    Some(owner) if owner != &canonical => {
                        return Err(LexiconError::ConflictingAlias {
                            alias: key,
                            first: owner.clone(),
                            second: canonical,
                        });
                    }
                    Some(_) => {}
                    None => {
                        aliases.insert(key, canonical.clone());
                    }
                }
            }
        }

        Ok(Self {
            skills,
            aliases,
            max_phrase_len,
        })
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn category(&self, skill: &str) -> Option<SkillCategory> {
        self.skills.get(skill).copied()
    }

    /// Extracts the set of canonical skills mentioned anywhere in `text`.
    ///
    /// At each token position the longest alias phrase wins, so "react native"
    /// is not also reported as "react".
    pub fn extract_skills(&self, text: &str) -> BTreeSet<String> {
        let tokens = tokenize(text);
        let mut found = BTreeSet::new();
        let mut i = 0;

        while i < tokens.len() {
            let longest = self.max_phrase_len.min(tokens.len() - i);
            let mut consumed = 1;
            for n in (1..=longest).rev() {
                let phrase = tokens[i..i + n].join(" ");
                if let Some(canonical) = self.aliases.get(&phrase) {
                    found.insert(canonical.clone());
                    consumed = n;
                    break;
                }
            }
            i += consumed;
        }

        found
    }
}

/// Lowercases and splits text into skill tokens. Separators are whitespace and
/// punctuation other than `+ # . -`; sentence punctuation is trimmed from the ends.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || TOKEN_INNER_CHARS.contains(&c)))
        .map(|raw| raw.trim_start_matches('-').trim_end_matches(['.', '-']))
        .filter(|token| token.chars().any(char::is_alphanumeric))
        .map(str::to_lowercase)
        .collect()
}

fn normalize_phrase(text: &str) -> String {
    tokenize(text).join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> SkillLexicon {
        SkillLexicon::builtin().unwrap()
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_builtin_lexicon_loads() {
        let lex = lexicon();
        assert!(lex.len() > 50);
        assert_eq!(lex.category("docker"), Some(SkillCategory::DevOps));
    }

    #[test]
    fn test_tokenize_keeps_symbolic_skill_names() {
        let tokens = tokenize("C++, C#, Node.js and scikit-learn.");
        assert_eq!(tokens, vec!["c++", "c#", "node.js", "and", "scikit-learn"]);
    }

    #[test]
    fn test_tokenize_splits_slashes_and_strips_bullets() {
        let tokens = tokenize("• Python/Django - CI/CD");
        assert_eq!(tokens, vec!["python", "django", "ci", "cd"]);
    }

    #[test]
    fn test_alias_resolves_to_canonical() {
        let lex = lexicon();
        let resolve = |term: &str| lex.extract_skills(term).into_iter().collect::<Vec<_>>();
        assert_eq!(resolve("JS"), vec!["javascript"]);
        assert_eq!(resolve("ReactJS"), vec!["react"]);
        assert_eq!(resolve("k8s"), vec!["kubernetes"]);
        assert_eq!(resolve("CI/CD"), vec!["ci/cd"]);
        assert!(resolve("cobol").is_empty());
    }

    #[test]
    fn test_extract_collapses_duplicate_mentions() {
        let lex = lexicon();
        let skills = lex.extract_skills("JS, JavaScript and more javascript. Also ES6.");
        assert_eq!(skills.len(), 1);
        assert!(skills.contains("javascript"));
    }

    #[test]
    fn test_extract_prefers_longest_phrase() {
        let lex = lexicon();
        let skills = lex.extract_skills("Built apps in React Native backed by SQL Server");
        assert!(skills.contains("react native"));
        assert!(skills.contains("sql server"));
        assert!(!skills.contains("react"));
        assert!(!skills.contains("sql"));
    }

    #[test]
    fn test_extract_ignores_substrings_inside_words() {
        let lex = lexicon();
        // "java" must not fire inside "javascript", nor "git" inside "digital"
        let skills = lex.extract_skills("Digital marketing with JavaScript");
        assert_eq!(skills.into_iter().collect::<Vec<_>>(), vec!["javascript"]);
    }

    #[test]
    fn test_empty_text_yields_empty_set() {
        assert!(lexicon().extract_skills("   \n").is_empty());
    }

    #[test]
    fn test_from_json_custom_lexicon() {
        let lex = SkillLexicon::from_json(
            r#"{"skills": [
                {"name": "Elixir", "category": "language", "aliases": ["ex"]},
                {"name": "phoenix"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(lex.len(), 2);
        assert_eq!(lex.extract_skills("Phoenix apps in EX"), set(&["elixir", "phoenix"]));
        assert_eq!(lex.category("phoenix"), Some(SkillCategory::Other));
    }

    #[test]
    fn test_empty_lexicon_is_rejected() {
        let err = SkillLexicon::from_json(r#"{"skills": []}"#).unwrap_err();
        assert!(matches!(err, LexiconError::Empty));
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        let err = SkillLexicon::from_json("{skills:").unwrap_err();
        assert!(matches!(err, LexiconError::Parse(_)));
    }

    #[test]
    fn test_conflicting_alias_is_rejected() {
        let err = SkillLexicon::from_json(
            r#"{"skills": [
                {"name": "javascript", "aliases": ["js"]},
                {"name": "jscript", "aliases": ["JS"]}
            ]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, LexiconError::ConflictingAlias { .. }));
    }

    #[test]
    fn test_blank_alias_is_rejected() {
        let err = SkillLexicon::from_json(r#"{"skills": [{"name": "rust", "aliases": [" - "]}]}"#)
            .unwrap_err();
        assert!(matches!(err, LexiconError::BlankAlias { .. }));
    }

    #[test]
    fn test_missing_file_is_rejected() {
        let err = SkillLexicon::from_path(Path::new("/nonexistent/lexicon.json")).unwrap_err();
        assert!(matches!(err, LexiconError::Io { .. }));
    }

    #[test]
    fn test_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.json");
        std::fs::write(&path, r#"{"skills": [{"name": "zig"}]}"#).unwrap();
        let lex = SkillLexicon::from_path(&path).unwrap();
        assert_eq!(lex.extract_skills("Zig"), set(&["zig"]));
    }
}
