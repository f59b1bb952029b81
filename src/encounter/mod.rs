//! Encounter controller.
//!
//! `Encounter` bundles a `CombatState` with its dice, initiative prompt
//! and notification sink, and is the entry point for every combat
//! command. `SharedEncounter` wraps one behind a mutex for callers on
//! several threads.

mod controller;
mod notify;
mod shared;

pub use controller::{Encounter, EncounterBuilder};
pub use notify::{Notice, NoticeLog, Notifier, NullNotifier};
pub use shared::SharedEncounter;
