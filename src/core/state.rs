//! Encounter state.
//!
//! ## CombatState
//!
//! The single mutable value every combat rule operates on:
//! - Turn order (the roster); the front combatant acts
//! - Concentration set
//! - Phase, round counter
//! - Event history
//!
//! Uses `im` persistent data structures so a snapshot of the whole
//! encounter is an O(1) clone.
//!
//! ## Invariants
//!
//! - Each `CombatantId` appears in the turn order at most once.
//! - Every concentrating ID belongs to a combatant in the turn order.
//! - Before initiative is rolled there is no acting combatant.
//! - After initiative is rolled a non-empty roster has a round leader.

use im::{OrdSet, Vector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::entity::CombatantId;
use super::event::{CombatEvent, EventRecord};
use crate::combatants::{Combatant, CombatantTemplate};

/// Encounter phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Roster is being assembled; nobody is acting.
    #[default]
    Setup,
    /// Initiative has been rolled; the front of the turn order acts.
    RolledInitiative,
}

const DEFAULT_HISTORY_LIMIT: usize = 256;

/// Complete state of one encounter.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CombatState {
    turn_order: Vector<Combatant>,
    concentrating: OrdSet<CombatantId>,
    phase: Phase,

    /// Round number (0 until initiative is rolled).
    round: u32,

    /// Combatant whose turn starts each round.
    round_leader: Option<CombatantId>,

    next_id: CombatantId,

    history: Vector<EventRecord>,
    next_sequence: u64,
    history_limit: usize,
}

impl Default for CombatState {
    fn default() -> Self {
        Self::new()
    }
}

impl CombatState {
    /// Create an empty encounter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            turn_order: Vector::new(),
            concentrating: OrdSet::new(),
            phase: Phase::Setup,
            round: 0,
            round_leader: None,
            next_id: CombatantId::FIRST,
            history: Vector::new(),
            next_sequence: 0,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Set the number of history records retained.
    #[must_use]
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    // === Roster ===

    /// Add a fresh instance of `template` to the end of the turn order.
    pub fn add(&mut self, template: &CombatantTemplate) -> CombatantId {
        let id = self.next_id;
        self.next_id = id.next();

        self.turn_order.push_back(Combatant::spawn(id, template));
        if self.phase == Phase::RolledInitiative && self.round_leader.is_none() {
            // First combatant after the roster emptied mid-combat
            self.round_leader = Some(id);
        }
        debug!(%id, name = %template.name, "combatant added");
        self.record(CombatEvent::CombatantAdded {
            id,
            name: template.name.clone(),
        });
        id
    }

    /// Remove a combatant from the turn order and the concentration set.
    ///
    /// Returns the removed combatant, or `None` if the ID is unknown.
    pub fn remove(&mut self, id: CombatantId) -> Option<Combatant> {
        let index = self.index_of(id)?;
        let removed = self.turn_order.remove(index);
        self.concentrating.remove(&id);

        if self.round_leader == Some(id) {
            // The combatant that slid into the leader's slot leads from now on
            self.round_leader = if self.turn_order.is_empty() {
                None
            } else {
                self.turn_order.get(index % self.turn_order.len()).map(|c| c.id)
            };
        }

        debug!(%id, name = %removed.name, "combatant removed");
        self.record(CombatEvent::CombatantRemoved { id });
        Some(removed)
    }

    /// Flip the favorite flag. Returns the new value, or `None` if unknown.
    pub fn toggle_favorite(&mut self, id: CombatantId) -> Option<bool> {
        let combatant = self.get_mut(id)?;
        combatant.is_favorite = !combatant.is_favorite;
        let favorite = combatant.is_favorite;

        self.record(CombatEvent::FavoriteToggled { id, favorite });
        Some(favorite)
    }

    /// Get a combatant.
    #[must_use]
    pub fn get(&self, id: CombatantId) -> Option<&Combatant> {
        self.turn_order.iter().find(|c| c.id == id)
    }

    /// Get a mutable combatant.
    pub(crate) fn get_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.turn_order.iter_mut().find(|c| c.id == id)
    }

    /// Check whether a combatant is in the roster.
    #[must_use]
    pub fn contains(&self, id: CombatantId) -> bool {
        self.index_of(id).is_some()
    }

    fn index_of(&self, id: CombatantId) -> Option<usize> {
        self.turn_order.iter().position(|c| c.id == id)
    }

    /// The roster in turn order.
    #[must_use]
    pub fn turn_order(&self) -> &Vector<Combatant> {
        &self.turn_order
    }

    /// IDs in turn order.
    #[must_use]
    pub fn order_ids(&self) -> Vec<CombatantId> {
        self.turn_order.iter().map(|c| c.id).collect()
    }

    pub(crate) fn turn_order_mut(&mut self) -> &mut Vector<Combatant> {
        &mut self.turn_order
    }

    /// Number of combatants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.turn_order.len()
    }

    /// Check if the roster is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turn_order.is_empty()
    }

    // === Turn ===

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The acting combatant, if initiative has been rolled.
    #[must_use]
    pub fn acting(&self) -> Option<&Combatant> {
        match self.phase {
            Phase::Setup => None,
            Phase::RolledInitiative => self.turn_order.front(),
        }
    }

    /// Current round number (0 before initiative).
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Enter round 1 with the current front as round leader.
    pub(crate) fn start_rounds(&mut self) {
        self.phase = Phase::RolledInitiative;
        self.round = 1;
        self.round_leader = self.turn_order.front().map(|c| c.id);
    }

    /// Bump the round counter if the round leader is acting again.
    pub(crate) fn advance_round_if_leader(&mut self) {
        let front = self.turn_order.front().map(|c| c.id);
        if front.is_some() && front == self.round_leader {
            self.round += 1;
            debug!(round = self.round, "new round");
        }
    }

    // === Concentration ===

    /// IDs currently concentrating, in ID order.
    #[must_use]
    pub fn concentrating(&self) -> &OrdSet<CombatantId> {
        &self.concentrating
    }

    /// Check whether a combatant is concentrating.
    #[must_use]
    pub fn is_concentrating(&self, id: CombatantId) -> bool {
        self.concentrating.contains(&id)
    }

    /// Set concentration membership. Unknown IDs are ignored.
    ///
    /// Returns `true` if membership changed.
    pub(crate) fn set_concentrating(&mut self, id: CombatantId, concentrating: bool) -> bool {
        if concentrating {
            self.contains(id) && self.concentrating.insert(id).is_none()
        } else {
            self.concentrating.remove(&id).is_some()
        }
    }

    // === History ===

    /// Retained event history, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<EventRecord> {
        &self.history
    }

    /// Append an event to the history.
    pub(crate) fn record(&mut self, event: CombatEvent) {
        let record = EventRecord::new(self.round, self.next_sequence, event);
        self.next_sequence += 1;
        self.history.push_back(record);
        while self.history.len() > self.history_limit {
            self.history.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goblin() -> CombatantTemplate {
        CombatantTemplate::new("Goblin", 7, 15)
    }

    #[test]
    fn test_new_state() {
        let state = CombatState::new();
        assert!(state.is_empty());
        assert_eq!(state.phase(), Phase::Setup);
        assert_eq!(state.round(), 0);
        assert!(state.acting().is_none());
    }

    #[test]
    fn test_add_assigns_fresh_ids() {
        let mut state = CombatState::new();
        let a = state.add(&goblin());
        let b = state.add(&goblin());

        assert_ne!(a, b);
        assert_eq!(state.len(), 2);
        assert_eq!(state.order_ids(), vec![a, b]);
        assert_eq!(state.get(b).unwrap().name, "Goblin");
    }

    #[test]
    fn test_toggle_favorite() {
        let mut state = CombatState::new();
        let id = state.add(&goblin());

        assert_eq!(state.toggle_favorite(id), Some(true));
        assert!(state.get(id).unwrap().is_favorite);
        assert_eq!(state.toggle_favorite(id), Some(false));
        assert_eq!(state.toggle_favorite(CombatantId(99)), None);
    }

    #[test]
    fn test_acting_requires_rolled_phase() {
        let mut state = CombatState::new();
        let id = state.add(&goblin());
        assert!(state.acting().is_none());

        state.start_rounds();
        assert_eq!(state.acting().unwrap().id, id);
        assert_eq!(state.round(), 1);
    }

    #[test]
    fn test_concentration_only_for_roster() {
        let mut state = CombatState::new();
        let id = state.add(&goblin());

        assert!(!state.set_concentrating(CombatantId(42), true));
        assert!(state.concentrating().is_empty());

        assert!(state.set_concentrating(id, true));
        assert!(!state.set_concentrating(id, true));
        assert!(state.is_concentrating(id));
        assert!(state.set_concentrating(id, false));
        assert!(!state.is_concentrating(id));
    }

    #[test]
    fn test_remove_evicts_concentration() {
        let mut state = CombatState::new();
        let a = state.add(&goblin());
        let b = state.add(&goblin());
        state.set_concentrating(a, true);

        let removed = state.remove(a).unwrap();
        assert_eq!(removed.id, a);
        assert!(!state.contains(a));
        assert!(!state.is_concentrating(a));
        assert_eq!(state.order_ids(), vec![b]);
        assert!(state.remove(a).is_none());
    }

    #[test]
    fn test_remove_round_leader_passes_lead() {
        let mut state = CombatState::new();
        let a = state.add(&goblin());
        let b = state.add(&goblin());
        state.start_rounds();

        state.remove(a);
        assert_eq!(state.round_leader, Some(b));

        state.remove(b);
        assert_eq!(state.round_leader, None);
        assert!(state.acting().is_none());
    }

    #[test]
    fn test_add_after_empty_roll_leads_round() {
        let mut state = CombatState::new();
        state.start_rounds();
        assert_eq!(state.round_leader, None);

        let a = state.add(&goblin());
        let b = state.add(&goblin());
        assert_eq!(state.round_leader, Some(a));
        assert_eq!(state.acting().unwrap().id, a);

        state.remove(a);
        state.remove(b);
        let c = state.add(&goblin());
        assert_eq!(state.round_leader, Some(c));
    }

    #[test]
    fn test_add_before_roll_has_no_leader() {
        let mut state = CombatState::new();
        state.add(&goblin());
        assert_eq!(state.round_leader, None);
    }

    #[test]
    fn test_ids_stay_unique_through_churn() {
        let mut state = CombatState::new();
        let a = state.add(&goblin());
        state.add(&goblin());
        state.remove(a);
        state.add(&goblin());
        state.add(&goblin());

        let mut ids = state.order_ids();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), state.len());
        assert!(!state.contains(a));
    }

    #[test]
    fn test_history_limit() {
        let mut state = CombatState::new().with_history_limit(2);
        for _ in 0..5 {
            state.add(&goblin());
        }

        assert_eq!(state.history().len(), 2);
        assert_eq!(state.history().front().unwrap().sequence, 3);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut state = CombatState::new();
        let id = state.add(&goblin());
        let snapshot = state.clone();

        state.get_mut(id).unwrap().hit_points.apply(-3);

        assert_eq!(snapshot.get(id).unwrap().hit_points.current(), 7);
        assert_eq!(state.get(id).unwrap().hit_points.current(), 4);
    }
}
