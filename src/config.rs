use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use validator::{Validate, ValidationError};

use crate::models::CompatibilityWeights;

/// Tolerance for the weight-sum check
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct Settings {
    #[serde(default)]
    #[validate(nested)]
    pub cache: CacheSettings,
    #[serde(default)]
    #[validate(nested)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CacheSettings {
    /// Entries per map (personalities, behaviors, neuro profiles, scores);
    /// unbounded when unset
    #[serde(default)]
    #[validate(range(min = 1))]
    pub max_capacity: Option<u64>,
    /// Entry lifetime; entries stay until cleared when unset
    #[serde(default)]
    pub ttl_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ScoringSettings {
    #[serde(default)]
    #[validate(nested)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Copy, Deserialize, Validate)]
#[validate(schema(function = "validate_weight_sum"))]
pub struct WeightsConfig {
    #[serde(default = "default_personality_weight")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub personality: f64,
    #[serde(default = "default_behavior_weight")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub behavior: f64,
    #[serde(default = "default_interests_weight")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub interests: f64,
    #[serde(default = "default_communication_weight")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub communication: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            personality: default_personality_weight(),
            behavior: default_behavior_weight(),
            interests: default_interests_weight(),
            communication: default_communication_weight(),
        }
    }
}

fn default_personality_weight() -> f64 { 0.35 }
fn default_behavior_weight() -> f64 { 0.25 }
fn default_interests_weight() -> f64 { 0.20 }
fn default_communication_weight() -> f64 { 0.20 }

fn validate_weight_sum(weights: &WeightsConfig) -> Result<(), ValidationError> {
    let sum = weights.personality + weights.behavior + weights.interests + weights.communication;
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        let mut error = ValidationError::new("weight_sum");
        error.message = Some(format!("scoring weights must sum to 1.0, got {sum}").into());
        return Err(error);
    }
    Ok(())
}

impl From<WeightsConfig> for CompatibilityWeights {
    fn from(weights: WeightsConfig) -> Self {
        Self {
            personality: weights.personality,
            behavior: weights.behavior,
            interests: weights.interests,
            communication: weights.communication,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

fn environment() -> Environment {
    // e.g., COMPAT__CACHE__MAX_CAPACITY -> cache.max_capacity
    Environment::with_prefix("COMPAT")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with COMPAT__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(environment())
            .build()?;

        Self::checked(settings.try_deserialize()?)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        Self::checked(settings.try_deserialize()?)
    }

    fn checked(settings: Self) -> Result<Self, ConfigError> {
        settings
            .validate()
            .map_err(|e| ConfigError::Message(format!("invalid configuration: {e}")))?;
        Ok(settings)
    }
}
