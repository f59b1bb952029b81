//! Concentration tracking and the save-or-break check on damage.
//!
//! A concentrating combatant that takes damage rolls
//! `1d20 + CON modifier` against `DC = max(10, floor(damage / 2))`.
//! Falling short removes it from the concentration set. The check never
//! changes hit points; the HP resolver runs it before committing damage.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::combatants::Ability;
use crate::core::{CombatEvent, CombatState, CombatantId, DiceSource};

/// Outcome of a concentration check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConcentrationCheck {
    pub id: CombatantId,
    /// Damage that triggered the check.
    pub damage: i32,
    /// Natural d20.
    pub roll: u32,
    /// Constitution modifier.
    pub modifier: i32,
    pub total: i32,
    pub dc: i32,
    /// `true` if concentration held.
    pub maintained: bool,
}

/// Save DC for a given amount of damage.
#[must_use]
pub fn concentration_dc(damage: i32, min_dc: i32) -> i32 {
    min_dc.max(damage.div_euclid(2))
}

/// Maintains the concentration set on a `CombatState`.
pub struct ConcentrationMonitor;

impl ConcentrationMonitor {
    /// Flip concentration for `id`.
    ///
    /// Returns the new membership, or `None` if the ID is not in the roster.
    pub fn toggle(state: &mut CombatState, id: CombatantId) -> Option<bool> {
        if !state.contains(id) {
            return None;
        }

        let concentrating = !state.is_concentrating(id);
        state.set_concentrating(id, concentrating);

        debug!(%id, concentrating, "concentration toggled");
        state.record(CombatEvent::ConcentrationToggled { id, concentrating });
        Some(concentrating)
    }

    /// Run the concentration save for `id` taking `damage`.
    ///
    /// Returns `None` (and rolls nothing) when `id` is not concentrating.
    pub fn check_on_damage(
        state: &mut CombatState,
        id: CombatantId,
        damage: i32,
        min_dc: i32,
        rng: &mut dyn DiceSource,
    ) -> Option<ConcentrationCheck> {
        if !state.is_concentrating(id) {
            return None;
        }
        let modifier = state.get(id)?.modifier(Ability::Constitution);

        let dc = concentration_dc(damage, min_dc);
        let roll = rng.d20();
        let total = roll as i32 + modifier;
        let maintained = total >= dc;

        if !maintained {
            state.set_concentrating(id, false);
            info!(%id, roll, total, dc, "concentration broken");
        } else {
            debug!(%id, roll, total, dc, "concentration maintained");
        }

        let check = ConcentrationCheck {
            id,
            damage,
            roll,
            modifier,
            total,
            dc,
            maintained,
        };
        state.record(CombatEvent::ConcentrationChecked(check));
        Some(check)
    }
}
