use std::{collections::HashSet, fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use wall_schema::BodyPart;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Largest accepted `max_score`; keeps a session total well inside `i32`.
pub const MAX_WALL_SCORE: i32 = 1_000_000;
/// Largest accepted PERFECT/GOOD multiplier.
pub const MAX_MULTIPLIER: f32 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Strikes this far (or further) from their hit point earn zero quality.
    pub max_distance: f32,
    /// Points a wall is worth before the cohesion bonus.
    pub max_score: i32,
    pub perfect_multiplier: f32,
    pub good_multiplier: f32,
    /// Body parts that must all strike a wall before it resolves.
    pub body_parts: Vec<BodyPart>,
    pub feedback_clear_secs: f64,
    pub step_feedback_secs: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            max_distance: 1.0,
            max_score: 100,
            perfect_multiplier: 1.0,
            good_multiplier: 0.8,
            body_parts: vec![BodyPart::LeftArm, BodyPart::RightArm],
            feedback_clear_secs: 2.0,
            step_feedback_secs: 1.5,
        }
    }
}

impl ScoringConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.body_parts.is_empty() {
            return Err(ConfigError::Invalid("body_parts must not be empty".into()));
        }

        let mut seen = HashSet::new();
        for part in &self.body_parts {
            if !seen.insert(*part) {
                return Err(ConfigError::Invalid(format!("body part {part} listed twice")));
            }
        }

        if !(self.max_distance > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "max_distance must be positive (got {})",
                self.max_distance
            )));
        }

        if !(0..=MAX_WALL_SCORE).contains(&self.max_score) {
            return Err(ConfigError::Invalid(format!(
                "max_score must be within 0..={MAX_WALL_SCORE} (got {})",
                self.max_score
            )));
        }

        for (name, value) in [
            ("perfect_multiplier", self.perfect_multiplier),
            ("good_multiplier", self.good_multiplier),
        ] {
            if !(0.0..=MAX_MULTIPLIER).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be within 0..={MAX_MULTIPLIER} (got {value})"
                )));
            }
        }

        Ok(())
    }

    pub fn part_count(&self) -> usize {
        self.body_parts.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    /// Quiet time before the first wall is released.
    pub intro_delay_secs: f64,
    /// Reach window for walls that do not carry their own lifetime.
    pub default_lifetime_secs: f64,
}

impl SpawnerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("intro_delay_secs", self.intro_delay_secs),
            ("default_lifetime_secs", self.default_lifetime_secs),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a finite non-negative number (got {value})"
                )));
            }
        }
        Ok(())
    }
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            intro_delay_secs: 5.0,
            default_lifetime_secs: 4.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ScoringConfig::from_json_str(r#"{ "max_score": 200 }"#).unwrap();
        assert_eq!(config.max_score, 200);
        assert_eq!(config.good_multiplier, 0.8);
        assert_eq!(config.body_parts, vec![BodyPart::LeftArm, BodyPart::RightArm]);
    }

    #[test]
    fn empty_roster_is_rejected() {
        let err = ScoringConfig::from_json_str(r#"{ "body_parts": [] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn duplicate_part_is_rejected() {
        let err = ScoringConfig::from_json_str(r#"{ "body_parts": ["LeftArm", "LeftArm"] }"#)
            .unwrap_err();
        assert!(err.to_string().contains("LeftArm listed twice"));
    }

    #[test]
    fn zero_max_distance_is_rejected() {
        let config = ScoringConfig {
            max_distance: 0.0,
            ..ScoringConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn max_score_is_bounded() {
        let at_bound = ScoringConfig {
            max_score: MAX_WALL_SCORE,
            perfect_multiplier: MAX_MULTIPLIER,
            ..ScoringConfig::default()
        };
        assert!(at_bound.validate().is_ok());

        let huge = ScoringConfig {
            max_score: 2_000_000_000,
            ..ScoringConfig::default()
        };
        assert!(huge.validate().unwrap_err().to_string().contains("max_score"));
    }

    #[test]
    fn out_of_range_multipliers_are_rejected() {
        for bad in [-0.5, f32::NAN, f32::INFINITY, MAX_MULTIPLIER + 1.0] {
            let config = ScoringConfig {
                good_multiplier: bad,
                ..ScoringConfig::default()
            };
            assert!(config.validate().is_err(), "accepted {bad}");
        }
    }
}
