//! Combatant definitions, instances, and the template catalog.
//!
//! - `definition`: normalized stat blocks and spell records
//! - `instance`: per-encounter combatant state
//! - `catalog`: name lookup over templates

mod definition;
mod instance;
mod catalog;

pub use definition::{
    ability_modifier, Ability, AbilityScores, Attack, CombatantTemplate, NonAttackAction, Spell,
    SpellTemplate,
};
pub use instance::{Combatant, HitPoints};
pub use catalog::TemplateCatalog;
