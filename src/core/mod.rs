//! Core engine types: IDs, dice, RNG, configuration, state, history.
//!
//! Everything the combat rules share lives here. The rules themselves
//! (`rules`, `effects`) only ever mutate a `CombatState` passed to them.

pub mod entity;
pub mod rng;
pub mod dice;
pub mod config;
pub mod error;
pub mod event;
pub mod state;

pub use entity::CombatantId;
pub use rng::{DiceRng, DiceRngState, DiceSource, ScriptedDice};
pub use dice::{roll, DiceSpec};
pub use config::TrackerConfig;
pub use error::{ConfigError, DiceError, EffectError};
pub use event::{CombatEvent, EventRecord};
pub use state::{CombatState, Phase};
