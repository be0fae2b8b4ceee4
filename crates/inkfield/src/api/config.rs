use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::systems::schedule::SECRET_PHRASES;

/// Seed used when the config does not carry one.
pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("point size must be finite and positive, got {0}")]
    InvalidPointSize(f32),
    #[error("secret chance must be within [0, 1], got {0}")]
    InvalidSecretChance(f32),
    #[error("secret duration must be finite and non-negative, got {0}")]
    InvalidSecretDuration(f32),
}

/// Configuration for the effect, provided by the page variant.
///
/// Every field has a default, so a JSON document only needs the keys it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectConfig {
    /// Main text to dissolve.
    pub text: String,
    /// Text scrolled through the title and favicon.
    pub marquee_text: String,
    /// Pool the start-up secret is drawn from. Empty disables secrets.
    pub secret_phrases: Vec<String>,
    /// Probability of starting on a secret phrase.
    pub secret_chance: f32,
    /// Seconds before a secret phrase reverts to `text`.
    pub secret_duration: f32,
    /// Sample particle colours from the raster; white otherwise.
    pub use_color: bool,
    /// Point size on desktop.
    pub point_size: f32,
    /// Point size on mobile user agents.
    pub mobile_point_size: f32,
    /// Spawn the worm and its food.
    pub enable_creature: bool,
    /// RNG seed. `None` lets the host pick one.
    pub seed: Option<u64>,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            text: "zeo.lol🐱".to_string(),
            marquee_text: "zeo.lol".to_string(),
            secret_phrases: SECRET_PHRASES.iter().map(|s| s.to_string()).collect(),
            secret_chance: 0.5,
            secret_duration: 5.0,
            use_color: true,
            point_size: 1.0,
            mobile_point_size: 1.0,
            enable_creature: false,
            seed: None,
        }
    }
}

impl EffectConfig {
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_marquee_text(mut self, text: impl Into<String>) -> Self {
        self.marquee_text = text.into();
        self
    }

    pub fn with_secret_phrases<S: Into<String>>(mut self, phrases: impl IntoIterator<Item = S>) -> Self {
        self.secret_phrases = phrases.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_secret_chance(mut self, chance: f32) -> Self {
        self.secret_chance = chance;
        self
    }

    pub fn with_use_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    pub fn with_point_size(mut self, desktop: f32, mobile: f32) -> Self {
        self.point_size = desktop;
        self.mobile_point_size = mobile;
        self
    }

    pub fn with_creature(mut self, enabled: bool) -> Self {
        self.enable_creature = enabled;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn point_size_for(&self, is_mobile: bool) -> f32 {
        if is_mobile {
            self.mobile_point_size
        } else {
            self.point_size
        }
    }

    pub fn seed_or_default(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }

    /// Check value ranges serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for size in [self.point_size, self.mobile_point_size] {
            if !size.is_finite() || size <= 0.0 {
                return Err(ConfigError::InvalidPointSize(size));
            }
        }
        if !(0.0..=1.0).contains(&self.secret_chance) {
            return Err(ConfigError::InvalidSecretChance(self.secret_chance));
        }
        if !self.secret_duration.is_finite() || self.secret_duration < 0.0 {
            return Err(ConfigError::InvalidSecretDuration(self.secret_duration));
        }
        Ok(())
    }

    /// Parse a (possibly partial) JSON document and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }
}
