//! Configuration for the drill: file locations and scoring tunables.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::ReviewMode;

/// Settings loaded from `config.toml`. Every field falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Persistent word bank, rewritten at the end of every run.
    pub word_bank_path: PathBuf,
    /// Generated review, filled in by the learner.
    pub review_path: PathBuf,
    /// Mistake report written by grading.
    pub report_path: PathBuf,

    /// Maximum number of prompts in one review.
    pub review_size: usize,
    /// Cards scoring below this are eligible for review.
    pub review_threshold: f64,
    /// Eligible cards scoring below this are prompted from the back.
    pub direction_threshold: f64,
    pub correct_bonus: f64,
    /// Subtracted from every candidate on a wrong answer.
    pub incorrect_penalty: f64,

    pub default_mode: ReviewMode,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            word_bank_path: PathBuf::from("WordBank.txt"),
            review_path: PathBuf::from("Review.txt"),
            report_path: PathBuf::from("Grade.txt"),
            review_size: 50,
            review_threshold: 0.8,
            direction_threshold: 0.4,
            correct_bonus: 0.5,
            incorrect_penalty: 0.7,
            default_mode: ReviewMode::Random,
            log_level: "warn".to_string(),
        }
    }
}

/// Thresholds that drive review selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionTunables {
    pub review_size: usize,
    pub review_threshold: f64,
    pub direction_threshold: f64,
}

/// Score changes applied by grading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scoring {
    pub correct_bonus: f64,
    pub incorrect_penalty: f64,
}

impl Config {
    /// Get the default config file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vocab-drill")
            .join("config.toml")
    }

    /// Load config from `path` (or the default location), returning defaults
    /// if the file doesn't exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_path);

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml(&content).with_context(|| format!("Invalid config file: {:?}", path))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("review_threshold", self.review_threshold),
            ("direction_threshold", self.direction_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                bail!("{} must be within 0..=1, got {}", name, value);
            }
        }

        if !(self.correct_bonus.is_finite() && self.correct_bonus > 0.0) {
            bail!("correct_bonus must be positive, got {}", self.correct_bonus);
        }
        if !(self.incorrect_penalty.is_finite() && self.incorrect_penalty > 0.0) {
            bail!(
                "incorrect_penalty must be positive, got {}",
                self.incorrect_penalty
            );
        }
        if self.incorrect_penalty < self.correct_bonus {
            bail!(
                "incorrect_penalty ({}) must not be smaller than correct_bonus ({})",
                self.incorrect_penalty,
                self.correct_bonus
            );
        }

        Ok(())
    }

    pub fn selection(&self) -> SelectionTunables {
        SelectionTunables {
            review_size: self.review_size,
            review_threshold: self.review_threshold,
            direction_threshold: self.direction_threshold,
        }
    }

    pub fn scoring(&self) -> Scoring {
        Scoring {
            correct_bonus: self.correct_bonus,
            incorrect_penalty: self.incorrect_penalty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_are_valid() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            review_size = 10
            default_mode = "lowest-first"
            word_bank_path = "decks/jp.txt"
            "#,
        )
        .unwrap();

        assert_eq!(config.review_size, 10);
        assert_eq!(config.default_mode, ReviewMode::LowestFirst);
        assert_eq!(config.word_bank_path, PathBuf::from("decks/jp.txt"));
        assert_eq!(config.review_threshold, 0.8);
        assert_eq!(config.report_path, PathBuf::from("Grade.txt"));
    }

    #[test]
    fn test_rejects_bad_tunables() {
        assert!(Config::from_toml("review_threshold = 1.5").is_err());
        assert!(Config::from_toml("correct_bonus = 0.0").is_err());
        assert!(Config::from_toml("incorrect_penalty = -0.2").is_err());
        assert!(Config::from_toml("correct_bonus = 0.9\nincorrect_penalty = 0.5").is_err());
        assert!(Config::from_toml("default_mode = \"sideways\"").is_err());
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(Some(&dir.path().join("config.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "direction_threshold = 0.25\nlog_level = \"debug\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.selection().direction_threshold, 0.25);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_round_trips_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), config);
    }
}
