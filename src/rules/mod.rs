//! Combat rules.
//!
//! - `hp`: healing and damage with clamping and concentration checks
//! - `initiative`: initiative rolls and turn rotation
//! - `actions`: attacks, spells, saving throws
//!
//! Every rule is a stateless resolver over a `CombatState`, with dice
//! injected as a `DiceSource`.

mod hp;
mod initiative;
mod actions;

pub use hp::{parse_hp_input, HpChange, HpResolver};
pub use initiative::{
    parse_initiative_input, InitiativePrompt, InitiativeScheduler, NoPrompt, TurnChange,
};
pub use actions::{ActionResolver, SavingThrowReport, TargetHit};
