use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::analysis::matching::{MatchPolicy, DEFAULT_NEUTRAL_SCORE};
use crate::rescoring::DEFAULT_CONCURRENCY;

/// Application configuration loaded from environment variables.
/// Startup fails if a value is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    /// `None` selects the in-memory candidate store.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub port: u16,
    pub rust_log: String,
    /// `None` selects the built-in skill lexicon.
    pub skill_lexicon_path: Option<PathBuf>,
    pub rescore_concurrency: usize,
    pub match_policy: MatchPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let rescore_concurrency = parse_env("RESCORE_CONCURRENCY", DEFAULT_CONCURRENCY)?;
        if rescore_concurrency == 0 {
            bail!("RESCORE_CONCURRENCY must be at least 1");
        }

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            database_max_connections: parse_env("DATABASE_MAX_CONNECTIONS", 10)?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            skill_lexicon_path: optional_env("SKILL_LEXICON_PATH").map(PathBuf::from),
            rescore_concurrency,
            match_policy: MatchPolicy {
                neutral_score: fraction_env("NEUTRAL_MATCH_SCORE", DEFAULT_NEUTRAL_SCORE)?,
                education_bonus: fraction_env("EDUCATION_BONUS", 0.0)?,
                experience_bonus: fraction_env("EXPERIENCE_BONUS", 0.0)?,
            },
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

fn fraction_env(key: &str, default: f64) -> Result<f64> {
    let value = parse_env(key, default)?;
    if !(0.0..=1.0).contains(&value) {
        bail!("{key} must be between 0 and 1, got {value}");
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    // variable names are unique per test

    #[test]
    fn test_parse_env_default_and_override() {
        assert_eq!(parse_env::<u16>("SCREENER_TEST_UNSET_PORT", 8080).unwrap(), 8080);
        std::env::set_var("SCREENER_TEST_PORT", " 9090 ");
        assert_eq!(parse_env::<u16>("SCREENER_TEST_PORT", 8080).unwrap(), 9090);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("SCREENER_TEST_CONCURRENCY", "many");
        let err = parse_env::<usize>("SCREENER_TEST_CONCURRENCY", 8).unwrap_err();
        assert!(err.to_string().contains("SCREENER_TEST_CONCURRENCY"));
    }

    #[test]
    fn test_fraction_env_bounds() {
        std::env::set_var("SCREENER_TEST_BONUS_OK", "0.1");
        assert_eq!(fraction_env("SCREENER_TEST_BONUS_OK", 0.0).unwrap(), 0.1);
        std::env::set_var("SCREENER_TEST_BONUS_BAD", "1.5");
        assert!(fraction_env("SCREENER_TEST_BONUS_BAD", 0.0).is_err());
        assert_eq!(fraction_env("SCREENER_TEST_BONUS_UNSET", 0.5).unwrap(), 0.5);
    }
}
