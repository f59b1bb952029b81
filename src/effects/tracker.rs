//! Status effect lifecycle: attach and count down.
//!
//! Durations tick once per completed turn of the combatant carrying the
//! effect, not once per global round. Ending one combatant's turn never
//! touches effects on anyone else.

use std::num::NonZeroU32;

use tracing::debug;

use super::effect::{EffectSpec, StatusEffect};
use crate::core::{CombatEvent, CombatState, CombatantId, TrackerConfig};

/// Attaches and decays status effects on a `CombatState`.
pub struct EffectTracker;

impl EffectTracker {
    /// Attach an effect to `target`.
    ///
    /// The source is the acting combatant's name, or the configured
    /// unknown-source name before initiative. Returns the attached
    /// effect, or `None` if the target is unknown or the spec has no name.
    pub fn add_effect(
        state: &mut CombatState,
        spec: &EffectSpec,
        target: CombatantId,
        config: &TrackerConfig,
    ) -> Option<StatusEffect> {
        if spec.name.trim().is_empty() || !state.contains(target) {
            return None;
        }

        let source = state
            .acting()
            .map(|c| c.name.clone())
            .unwrap_or_else(|| config.unknown_source.clone());
        let rounds = spec
            .rounds
            .unwrap_or_else(|| NonZeroU32::new(config.effect_rounds()).unwrap_or(NonZeroU32::MIN));

        let effect = StatusEffect::new(spec.name.clone(), spec.description.clone(), rounds, source);
        state.get_mut(target)?.effects.push(effect.clone());

        debug!(%target, effect = %effect.name, rounds = effect.remaining_rounds, "effect added");
        state.record(CombatEvent::EffectAdded {
            id: target,
            name: effect.name.clone(),
            rounds: effect.remaining_rounds,
            source: effect.source_name.clone(),
        });
        Some(effect)
    }

    /// Count down every effect on `id` by one round and drop the expired.
    ///
    /// Returns the names of the effects that expired, in order.
    pub fn decay(state: &mut CombatState, id: CombatantId) -> Vec<String> {
        let Some(combatant) = state.get_mut(id) else {
            return Vec::new();
        };

        let mut expired = Vec::new();
        combatant.effects.retain(|effect| {
            if effect.tick() {
                expired.push(effect.name.clone());
                false
            } else {
                true
            }
        });

        for name in &expired {
            debug!(%id, effect = %name, "effect expired");
            state.record(CombatEvent::EffectExpired {
                id,
                name: name.clone(),
            });
        }
        expired
    }
}
