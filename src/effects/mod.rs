//! Status effects and concentration.
//!
//! - `StatusEffect` / `EffectSpec` / `EffectDraft`: effect data
//! - `EffectTracker`: attaches effects and counts them down per turn
//! - `ConcentrationMonitor`: concentration set and damage saves
//!
//! Both trackers are stateless: they operate on the `CombatState`
//! passed in, the same way every rule in the crate does.

mod effect;
mod tracker;
mod concentration;

pub use effect::{EffectDraft, EffectSpec, StatusEffect};
pub use tracker::EffectTracker;
pub use concentration::{concentration_dc, ConcentrationCheck, ConcentrationMonitor};
