//! Hit point resolution.
//!
//! Positive amounts heal, negative amounts damage. Damage to a
//! concentrating combatant runs the concentration check first; the HP
//! change is then committed and clamped into `[0, max]` regardless of
//! the check's outcome. Overheal and overkill are not reported.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{CombatEvent, CombatState, CombatantId, DiceSource};
use crate::effects::{ConcentrationCheck, ConcentrationMonitor};

/// A committed HP change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HpChange {
    pub id: CombatantId,
    /// Requested signed amount.
    pub amount: i32,
    pub before: i32,
    pub after: i32,
    /// Present when the damage triggered a concentration check.
    pub concentration: Option<ConcentrationCheck>,
}

/// Applies healing and damage.
pub struct HpResolver;

impl HpResolver {
    /// Apply a signed HP change to `target`.
    ///
    /// Returns `None` without touching state (or the dice) when `amount`
    /// is zero or the target is unknown.
    pub fn modify_hp(
        state: &mut CombatState,
        amount: i32,
        target: CombatantId,
        min_concentration_dc: i32,
        rng: &mut dyn DiceSource,
    ) -> Option<HpChange> {
        if amount == 0 || !state.contains(target) {
            return None;
        }

        let concentration = if amount < 0 {
            let damage = i32::try_from(amount.unsigned_abs()).unwrap_or(i32::MAX);
            ConcentrationMonitor::check_on_damage(state, target, damage, min_concentration_dc, rng)
        } else {
            None
        };

        let hit_points = &mut state.get_mut(target)?.hit_points;
        let before = hit_points.current();
        let after = hit_points.apply(amount);

        debug!(%target, amount, before, after, "hp changed");
        state.record(CombatEvent::HpChanged {
            id: target,
            amount,
            before,
            after,
        });

        Some(HpChange {
            id: target,
            amount,
            before,
            after,
            concentration,
        })
    }
}

/// Parse a typed HP amount. Anything unparsable counts as `0`.
#[must_use]
pub fn parse_hp_input(input: &str) -> i32 {
    input.trim().parse().unwrap_or(0)
}
