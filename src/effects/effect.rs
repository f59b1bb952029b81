//! Status effect definitions.
//!
//! - `StatusEffect`: a timed effect attached to a combatant
//! - `EffectSpec`: what a caller asks to attach (duration optional)
//! - `EffectDraft`: a half-filled custom effect form, validated before commit

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::core::error::EffectError;

/// A named, timed effect on a combatant.
///
/// `remaining_rounds` is always at least 1 while the effect is attached;
/// the tracker drops an effect in the same step its countdown hits zero.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusEffect {
    pub name: String,
    pub description: String,
    pub remaining_rounds: u32,
    /// Name of the combatant whose turn it was when the effect was applied.
    pub source_name: String,
}

impl StatusEffect {
    /// Create an effect with a positive duration.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        rounds: NonZeroU32,
        source_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            remaining_rounds: rounds.get(),
            source_name: source_name.into(),
        }
    }

    /// Count down one round. Returns `true` if the effect has expired.
    pub fn tick(&mut self) -> bool {
        self.remaining_rounds = self.remaining_rounds.saturating_sub(1);
        self.remaining_rounds == 0
    }
}

/// A request to attach an effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Duration override; `None` uses the configured default.
    #[serde(default)]
    pub rounds: Option<NonZeroU32>,
}

impl EffectSpec {
    /// Create a spec with the default duration.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            rounds: None,
        }
    }

    /// Override the duration. Zero keeps the default.
    #[must_use]
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = NonZeroU32::new(rounds);
        self
    }
}

/// A custom effect as typed into a form.
///
/// Nothing is committed until `validate` succeeds and the resulting
/// spec is added; dropping a draft leaves the encounter untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EffectDraft {
    pub name: String,
    pub description: String,
    /// Duration text. Blank means the default duration.
    pub duration: String,
}

impl EffectDraft {
    /// Create a draft from raw form fields.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        duration: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            duration: duration.into(),
        }
    }

    /// Check the draft and turn it into an effect spec.
    pub fn validate(&self) -> Result<EffectSpec, EffectError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(EffectError::MissingName);
        }

        let duration = self.duration.trim();
        let rounds = if duration.is_empty() {
            None
        } else {
            let parsed = duration
                .parse::<u32>()
                .ok()
                .and_then(NonZeroU32::new)
                .ok_or_else(|| EffectError::InvalidDuration(duration.to_string()))?;
            Some(parsed)
        };

        Ok(EffectSpec {
            name: name.to_string(),
            description: self.description.trim().to_string(),
            rounds,
        })
    }
}
