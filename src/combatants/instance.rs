//! Combatant instances - runtime combatant state.
//!
//! `Combatant` is one roster slot in an encounter. It is a deep copy of
//! a template taken at add-time: two goblins spawned from the same
//! template share nothing afterwards.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::definition::{Ability, AbilityScores, Attack, CombatantTemplate, NonAttackAction, Spell};
use crate::core::entity::CombatantId;
use crate::effects::StatusEffect;

/// Current and maximum hit points.
///
/// Every write clamps `current` into `[0, max]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "HitPointsRecord")]
pub struct HitPoints {
    current: i32,
    max: i32,
}

#[derive(Deserialize)]
struct HitPointsRecord {
    current: i32,
    max: i32,
}

impl From<HitPointsRecord> for HitPoints {
    fn from(record: HitPointsRecord) -> Self {
        let mut hp = HitPoints::full(record.max);
        hp.set_current(record.current);
        hp
    }
}

impl HitPoints {
    /// Full health at `max` (negative max is treated as 0).
    #[must_use]
    pub fn full(max: i32) -> Self {
        let max = max.max(0);
        Self { current: max, max }
    }

    #[must_use]
    pub fn current(&self) -> i32 {
        self.current
    }

    #[must_use]
    pub fn max(&self) -> i32 {
        self.max
    }

    /// Set current HP, clamped into `[0, max]`.
    pub fn set_current(&mut self, value: i32) {
        self.current = value.clamp(0, self.max);
    }

    /// Add a signed delta, clamping the result. Returns the new value.
    pub fn apply(&mut self, delta: i32) -> i32 {
        self.set_current(self.current.saturating_add(delta));
        self.current
    }
}

/// A combatant in the roster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    /// Session-scoped instance ID.
    pub id: CombatantId,

    pub name: String,
    pub ability_scores: AbilityScores,
    pub armor_class: i32,
    pub hit_points: HitPoints,

    pub attacks: Vec<Attack>,
    pub non_attack_actions: Vec<NonAttackAction>,
    pub known_spells: Vec<Spell>,

    /// Active status effects in the order they were applied.
    ///
    /// SmallVec keeps the common case (a handful of effects) inline.
    pub effects: SmallVec<[StatusEffect; 4]>,

    /// Favorites have their initiative entered by hand.
    pub is_favorite: bool,

    /// Unset until initiative is rolled.
    pub initiative: Option<i32>,
}

impl Combatant {
    /// Create a fresh instance of a template.
    #[must_use]
    pub fn spawn(id: CombatantId, template: &CombatantTemplate) -> Self {
        Self {
            id,
            name: template.name.clone(),
            ability_scores: template.ability_scores,
            armor_class: template.armor_class,
            hit_points: HitPoints::full(template.hp_average),
            attacks: template.attacks.clone(),
            non_attack_actions: template.non_attack_actions.clone(),
            known_spells: template.known_spells.clone(),
            effects: SmallVec::new(),
            is_favorite: false,
            initiative: None,
        }
    }

    /// Ability modifier for this combatant.
    #[must_use]
    pub fn modifier(&self, ability: Ability) -> i32 {
        self.ability_scores.modifier(ability)
    }

    /// True when current HP is 0.
    #[must_use]
    pub fn is_down(&self) -> bool {
        self.hit_points.current() == 0
    }

    /// Look up an attack by name (case-insensitive).
    #[must_use]
    pub fn attack(&self, name: &str) -> Option<&Attack> {
        self.attacks.iter().find(|a| a.name.eq_ignore_ascii_case(name))
    }

    /// Look up a known spell by name (case-insensitive).
    #[must_use]
    pub fn spell(&self, name: &str) -> Option<&Spell> {
        self.known_spells.iter().find(|s| s.name.eq_ignore_ascii_case(name))
    }

    /// Check whether an effect with this name is active.
    #[must_use]
    pub fn has_effect(&self, name: &str) -> bool {
        self.effects.iter().any(|e| e.name == name)
    }
}
