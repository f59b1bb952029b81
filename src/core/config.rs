//! Tracker configuration.
//!
//! Encounters are configured at startup with a `TrackerConfig`. Every
//! field has a default, so a config file only needs the keys it wants
//! to override:
//!
//! ```toml
//! seed = 42
//! default_effect_rounds = 3
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::ConfigError;

/// Tunables for an encounter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Dice seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,

    /// Duration of a status effect when the caller gives none.
    pub default_effect_rounds: u32,

    /// Damage rolled for every spell target.
    pub spell_damage: String,

    /// Source name recorded on effects added with no acting combatant.
    pub unknown_source: String,

    /// Lowest concentration save DC regardless of damage.
    pub min_concentration_dc: i32,

    /// Description substring that makes a spell attach a status effect.
    pub effect_keyword: String,

    /// Maximum number of history events retained.
    pub history_limit: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            seed: None,
            default_effect_rounds: 10,
            spell_damage: "1d6".to_string(),
            unknown_source: "Unknown".to_string(),
            min_concentration_dc: 10,
            effect_keyword: "effect".to_string(),
            history_limit: 256,
        }
    }
}

impl TrackerConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), "loaded tracker config");
        Ok(config)
    }

    /// Set a fixed dice seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the default status effect duration.
    #[must_use]
    pub fn with_default_effect_rounds(mut self, rounds: u32) -> Self {
        self.default_effect_rounds = rounds;
        self
    }

    /// Default effect duration, never below one round.
    #[must_use]
    pub fn effect_rounds(&self) -> u32 {
        self.default_effect_rounds.max(1)
    }
}
