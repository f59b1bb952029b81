//! Initiative and turn rotation.
//!
//! Phases: `Setup -> RolledInitiative`. Rolling is re-triggerable and
//! re-sorts the whole roster every time.
//!
//! ## Ordering
//!
//! Favorites get their initiative from an `InitiativePrompt`; everyone
//! else rolls `d20 + DEX modifier`. The roster is then sorted by
//! descending initiative. Ties keep the relative order the combatants
//! had in the turn order just before the roll (a stable sort).
//!
//! ## Rotation
//!
//! `end_turn` decays the acting combatant's effects, then moves it from
//! the front of the turn order to the back.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::combatants::{Ability, Combatant};
use crate::core::{CombatEvent, CombatState, CombatantId, DiceSource, Phase};
use crate::effects::EffectTracker;

/// Synchronous manual-entry channel for favorites' initiative.
///
/// Returns the raw text typed by the user, or `None` if the prompt was
/// dismissed. Both a dismissal and unparsable text count as `0`.
pub trait InitiativePrompt: Send {
    fn request_initiative(&mut self, combatant: &Combatant) -> Option<String>;
}

impl<F> InitiativePrompt for F
where
    F: FnMut(&Combatant) -> Option<String> + Send,
{
    fn request_initiative(&mut self, combatant: &Combatant) -> Option<String> {
        self(combatant)
    }
}

/// Prompt for non-interactive use: every favorite enters nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPrompt;

impl InitiativePrompt for NoPrompt {
    fn request_initiative(&mut self, _combatant: &Combatant) -> Option<String> {
        None
    }
}

/// Parse a typed initiative value. Anything unparsable counts as `0`.
#[must_use]
pub fn parse_initiative_input(input: Option<&str>) -> i32 {
    let Some(text) = input.map(str::trim).filter(|t| !t.is_empty()) else {
        return 0;
    };
    text.parse().unwrap_or_else(|_| {
        warn!(input = text, "unparsable initiative entry, using 0");
        0
    })
}

/// Result of ending a turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnChange {
    /// Combatant whose turn just ended.
    pub ended: CombatantId,
    /// Combatant now acting.
    pub next: CombatantId,
    /// Effects that expired on the ended combatant.
    pub expired: Vec<String>,
    /// Round number after the rotation.
    pub round: u32,
}

/// Rolls initiative and rotates turns.
pub struct InitiativeScheduler;

impl InitiativeScheduler {
    /// Roll initiative for the whole roster and sort it.
    ///
    /// Returns `(id, initiative)` pairs in the new turn order.
    pub fn roll_initiative(
        state: &mut CombatState,
        rng: &mut dyn DiceSource,
        prompt: &mut dyn InitiativePrompt,
    ) -> Vec<(CombatantId, i32)> {
        let values: Vec<i32> = state
            .turn_order()
            .iter()
            .map(|combatant| {
                if combatant.is_favorite {
                    let entry = prompt.request_initiative(combatant);
                    parse_initiative_input(entry.as_deref())
                } else {
                    rng.d20() as i32 + combatant.modifier(Ability::Dexterity)
                }
            })
            .collect();

        let mut roster: Vec<Combatant> = state.turn_order().iter().cloned().collect();
        for (combatant, value) in roster.iter_mut().zip(values) {
            combatant.initiative = Some(value);
        }
        // Vec::sort_by is stable: equal initiatives keep their prior order
        roster.sort_by(|a, b| b.initiative.cmp(&a.initiative));

        let order: Vec<(CombatantId, i32)> = roster
            .iter()
            .map(|c| (c.id, c.initiative.unwrap_or(0)))
            .collect();

        *state.turn_order_mut() = roster.into_iter().collect();
        state.start_rounds();

        info!(combatants = order.len(), "initiative rolled");
        state.record(CombatEvent::InitiativeRolled {
            order: order.clone(),
        });
        order
    }

    /// End the acting combatant's turn.
    ///
    /// Returns `None` before initiative is rolled or with an empty roster.
    pub fn end_turn(state: &mut CombatState) -> Option<TurnChange> {
        if state.phase() == Phase::Setup {
            return None;
        }
        let ended = state.acting()?.id;

        let expired = EffectTracker::decay(state, ended);

        let order = state.turn_order_mut();
        if let Some(front) = order.pop_front() {
            order.push_back(front);
        }
        state.advance_round_if_leader();

        let next = state.acting()?.id;
        debug!(%ended, %next, round = state.round(), "turn ended");
        state.record(CombatEvent::TurnEnded { ended, next });

        Some(TurnChange {
            ended,
            next,
            expired,
            round: state.round(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatants::{AbilityScores, CombatantTemplate};
    use crate::core::ScriptedDice;
    use crate::effects::EffectSpec;
    use crate::core::TrackerConfig;

    fn with_dex(name: &str, dex: i32) -> CombatantTemplate {
        CombatantTemplate::new(name, 10, 12)
            .with_scores(AbilityScores::default().with(Ability::Dexterity, dex))
    }

    #[test]
    fn test_roll_sorts_descending() {
        let mut state = CombatState::new();
        let slow = state.add(&with_dex("Slow", 8));
        let quick = state.add(&with_dex("Quick", 18));

        // Slow rolls 10 (-1 = 9), Quick rolls 10 (+4 = 14)
        let mut dice = ScriptedDice::new([10]);
        let order = InitiativeScheduler::roll_initiative(&mut state, &mut dice, &mut NoPrompt);

        assert_eq!(order, vec![(quick, 14), (slow, 9)]);
        assert_eq!(state.phase(), Phase::RolledInitiative);
        assert_eq!(state.acting().unwrap().id, quick);
        assert_eq!(state.get(slow).unwrap().initiative, Some(9));
    }

    #[test]
    fn test_ties_keep_prior_order() {
        let mut state = CombatState::new();
        let a = state.add(&with_dex("A", 10));
        let b = state.add(&with_dex("B", 10));
        let c = state.add(&with_dex("C", 10));

        let mut dice = ScriptedDice::new([7]);
        InitiativeScheduler::roll_initiative(&mut state, &mut dice, &mut NoPrompt);

        assert_eq!(state.order_ids(), vec![a, b, c]);
    }

    #[test]
    fn test_favorite_uses_prompt() {
        let mut state = CombatState::new();
        let hero = state.add(&with_dex("Hero", 10));
        let orc = state.add(&with_dex("Orc", 12));
        state.toggle_favorite(hero);

        let mut dice = ScriptedDice::new([2]);
        let mut prompt = |c: &Combatant| {
            assert_eq!(c.name, "Hero");
            Some("17".to_string())
        };
        let order = InitiativeScheduler::roll_initiative(&mut state, &mut dice, &mut prompt);

        assert_eq!(order, vec![(hero, 17), (orc, 3)]);
        assert_eq!(dice.rolls_made(), 1);
    }

    #[test]
    fn test_parse_initiative_input() {
        assert_eq!(parse_initiative_input(Some(" 15 ")), 15);
        assert_eq!(parse_initiative_input(Some("-2")), -2);
        assert_eq!(parse_initiative_input(Some("fast")), 0);
        assert_eq!(parse_initiative_input(Some("")), 0);
        assert_eq!(parse_initiative_input(None), 0);
    }

    #[test]
    fn test_end_turn_in_setup_is_noop() {
        let mut state = CombatState::new();
        let a = state.add(&with_dex("A", 10));
        state.add(&with_dex("B", 10));

        assert!(InitiativeScheduler::end_turn(&mut state).is_none());
        assert_eq!(state.order_ids()[0], a);
    }

    #[test]
    fn test_end_turn_rotates_and_counts_rounds() {
        let mut state = CombatState::new();
        let a = state.add(&with_dex("A", 14));
        let b = state.add(&with_dex("B", 10));
        let mut dice = ScriptedDice::new([10]);
        InitiativeScheduler::roll_initiative(&mut state, &mut dice, &mut NoPrompt);

        let change = InitiativeScheduler::end_turn(&mut state).unwrap();
        assert_eq!((change.ended, change.next, change.round), (a, b, 1));

        let change = InitiativeScheduler::end_turn(&mut state).unwrap();
        assert_eq!((change.ended, change.next, change.round), (b, a, 2));
    }

    #[test]
    fn test_end_turn_single_combatant() {
        let mut state = CombatState::new();
        let solo = state.add(&with_dex("Solo", 10));
        let mut dice = ScriptedDice::new([5]);
        InitiativeScheduler::roll_initiative(&mut state, &mut dice, &mut NoPrompt);

        let change = InitiativeScheduler::end_turn(&mut state).unwrap();
        assert_eq!((change.ended, change.next), (solo, solo));
        assert_eq!(change.round, 2);
    }

    #[test]
    fn test_end_turn_decays_only_actor() {
        let mut state = CombatState::new();
        let a = state.add(&with_dex("A", 14));
        let b = state.add(&with_dex("B", 10));
        let mut dice = ScriptedDice::new([10]);
        InitiativeScheduler::roll_initiative(&mut state, &mut dice, &mut NoPrompt);

        let config = TrackerConfig::default();
        let spec = EffectSpec::new("Dazed", "").with_rounds(1);
        EffectTracker::add_effect(&mut state, &spec, a, &config);
        EffectTracker::add_effect(&mut state, &spec, b, &config);

        let change = InitiativeScheduler::end_turn(&mut state).unwrap();

        assert_eq!(change.expired, vec!["Dazed".to_string()]);
        assert!(state.get(a).unwrap().effects.is_empty());
        assert_eq!(state.get(b).unwrap().effects.len(), 1);
    }
}
