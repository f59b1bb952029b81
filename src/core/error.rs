//! Error types for input validation.
//!
//! Combat commands never fail: unknown targets and bad amounts are
//! no-ops. These errors only surface from the validation steps that
//! sit in front of a command (parsing a dice spec, checking a custom
//! effect form, loading configuration).

use std::path::PathBuf;

/// A dice specification that is not a usable `NdM`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DiceError {
    #[error("missing 'd' separator in dice spec {0:?}")]
    MissingSeparator(String),

    #[error("dice count {0:?} is not a positive integer")]
    InvalidCount(String),

    #[error("die sides {0:?} is not a positive integer")]
    InvalidSides(String),

    #[error("dice spec {0:?} exceeds the supported range")]
    TooLarge(String),
}

/// A custom status effect that cannot be committed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EffectError {
    #[error("effect name is empty")]
    MissingName,

    #[error("effect duration {0:?} is not a positive integer")]
    InvalidDuration(String),
}

/// Failure loading a tracker configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}
