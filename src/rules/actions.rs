//! Action resolution: attacks, spells, saving throws.
//!
//! Attacks always hit; there is no roll against armor class. Spells deal
//! a fixed damage roll to every target and attach a status effect named
//! after the spell when its description contains the effect keyword
//! (`"effect"` by default). The keyword match is a plain substring test.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::hp::{HpChange, HpResolver};
use crate::combatants::{Ability, Attack, Spell};
use crate::core::{dice, CombatState, CombatantId, DiceSource, TrackerConfig};
use crate::effects::{EffectSpec, EffectTracker, StatusEffect};

/// Damage dealt to one target by an attack or spell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetHit {
    pub target: CombatantId,
    /// Damage rolled (0 for a malformed dice spec).
    pub damage: i32,
    /// Committed HP change; `None` when no damage was dealt.
    pub change: Option<HpChange>,
    /// Effect attached by a spell, if any.
    pub effect: Option<StatusEffect>,
}

/// Outcome of a saving throw.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingThrowReport {
    pub id: CombatantId,
    pub name: String,
    pub ability: Ability,
    /// Natural d20.
    pub roll: u32,
    pub modifier: i32,
    pub total: i32,
}

impl std::fmt::Display for SavingThrowReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} save: {} ({:+}) = {}",
            self.name, self.ability, self.roll, self.modifier, self.total
        )
    }
}

/// Maps attacks and spells onto dice, HP and effect changes.
pub struct ActionResolver;

impl ActionResolver {
    /// Roll `attack.damage` separately for each target and apply it.
    ///
    /// Unknown targets are skipped without rolling.
    pub fn resolve_attack(
        state: &mut CombatState,
        attack: &Attack,
        targets: &[CombatantId],
        config: &TrackerConfig,
        rng: &mut dyn DiceSource,
    ) -> Vec<TargetHit> {
        let mut hits = Vec::with_capacity(targets.len());
        for &target in targets {
            if !state.contains(target) {
                continue;
            }

            let damage = dice::roll(&attack.damage, rng);
            let change =
                HpResolver::modify_hp(state, -damage, target, config.min_concentration_dc, rng);

            debug!(attack = %attack.name, %target, damage, "attack resolved");
            hits.push(TargetHit {
                target,
                damage,
                change,
                effect: None,
            });
        }
        hits
    }

    /// Apply the fixed spell damage to each target, plus the spell's
    /// status effect when its description mentions the effect keyword.
    ///
    /// Unknown targets are skipped without rolling.
    pub fn resolve_spell(
        state: &mut CombatState,
        spell: &Spell,
        targets: &[CombatantId],
        config: &TrackerConfig,
        rng: &mut dyn DiceSource,
    ) -> Vec<TargetHit> {
        let applies_effect =
            !config.effect_keyword.is_empty() && spell.description.contains(&config.effect_keyword);
        let spec = EffectSpec::new(spell.name.clone(), spell.description.clone());

        let mut hits = Vec::with_capacity(targets.len());
        for &target in targets {
            if !state.contains(target) {
                continue;
            }

            let damage = dice::roll(&config.spell_damage, rng);
            let change =
                HpResolver::modify_hp(state, -damage, target, config.min_concentration_dc, rng);
            let effect = if applies_effect {
                EffectTracker::add_effect(state, &spec, target, config)
            } else {
                None
            };

            debug!(
                spell = %spell.name,
                %target,
                damage,
                effect = effect.is_some(),
                "spell resolved"
            );
            hits.push(TargetHit {
                target,
                damage,
                change,
                effect,
            });
        }
        hits
    }

    /// Roll `1d20 + modifier` for the named ability. Does not touch state.
    #[must_use]
    pub fn roll_saving_throw(
        state: &CombatState,
        id: CombatantId,
        ability: Ability,
        rng: &mut dyn DiceSource,
    ) -> Option<SavingThrowReport> {
        let combatant = state.get(id)?;
        let modifier = combatant.modifier(ability);
        let roll = rng.d20();

        Some(SavingThrowReport {
            id,
            name: combatant.name.clone(),
            ability,
            roll,
            modifier,
            total: roll as i32 + modifier,
        })
    }
}
