//! # combat-tracker
//!
//! A turn-based combat tracker for tabletop role-playing encounters.
//!
//! ## Design Principles
//!
//! 1. **One State Value**: Every rule operates on a single `CombatState`
//!    passed in by the caller. Rules are stateless unit structs.
//!
//! 2. **Injected Dice**: All randomness flows through a `DiceSource`, so a
//!    seeded `DiceRng` replays an encounter and a `ScriptedDice` pins
//!    exact faces in tests.
//!
//! 3. **Commands Never Fail**: Unknown targets, zero amounts and malformed
//!    dice are no-ops. Only the validation steps in front of a command
//!    (custom effect forms, config files) return errors.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: the roster, concentration set and
//!   history use `im-rs`, so snapshots are O(1) clones.
//!
//! - **Event History**: every committed transition is appended to a
//!   bounded history for replay and display.
//!
//! ## Modules
//!
//! - `core`: IDs, dice, RNG, configuration, state, history, errors
//! - `combatants`: stat blocks, combatant instances, template catalog
//! - `effects`: status effects and concentration
//! - `rules`: HP, initiative and action resolution
//! - `encounter`: the `Encounter` controller and its collaborators

pub mod core;
pub mod combatants;
pub mod effects;
pub mod rules;
pub mod encounter;

// Re-export commonly used types
pub use crate::core::{
    roll, CombatEvent, CombatState, CombatantId, ConfigError, DiceError, DiceRng, DiceRngState,
    DiceSource, DiceSpec, EffectError, EventRecord, Phase, ScriptedDice, TrackerConfig,
};

pub use crate::combatants::{
    ability_modifier, Ability, AbilityScores, Attack, Combatant, CombatantTemplate, HitPoints,
    NonAttackAction, Spell, SpellTemplate, TemplateCatalog,
};

pub use crate::effects::{
    concentration_dc, ConcentrationCheck, ConcentrationMonitor, EffectDraft, EffectSpec,
    EffectTracker, StatusEffect,
};

pub use crate::rules::{
    parse_hp_input, parse_initiative_input, ActionResolver, HpChange, HpResolver,
    InitiativePrompt, InitiativeScheduler, NoPrompt, SavingThrowReport, TargetHit, TurnChange,
};

pub use crate::encounter::{
    Encounter, EncounterBuilder, Notice, NoticeLog, Notifier, NullNotifier, SharedEncounter,
};
