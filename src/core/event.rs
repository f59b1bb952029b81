//! Encounter history.
//!
//! Every committed state transition appends a `CombatEvent` to the
//! encounter history. The history is for replay and display only; no
//! rule reads it back. Pure queries such as saving throws are not
//! recorded.

use serde::{Deserialize, Serialize};

use super::entity::CombatantId;
use crate::effects::ConcentrationCheck;

/// A single committed state transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatEvent {
    CombatantAdded {
        id: CombatantId,
        name: String,
    },

    CombatantRemoved {
        id: CombatantId,
    },

    FavoriteToggled {
        id: CombatantId,
        favorite: bool,
    },

    /// Initiative was (re-)rolled; `order` is the resulting turn order.
    InitiativeRolled {
        order: Vec<(CombatantId, i32)>,
    },

    TurnEnded {
        ended: CombatantId,
        next: CombatantId,
    },

    HpChanged {
        id: CombatantId,
        amount: i32,
        before: i32,
        after: i32,
    },

    ConcentrationToggled {
        id: CombatantId,
        concentrating: bool,
    },

    ConcentrationChecked(ConcentrationCheck),

    EffectAdded {
        id: CombatantId,
        name: String,
        rounds: u32,
        source: String,
    },

    EffectExpired {
        id: CombatantId,
        name: String,
    },
}

/// A recorded event with ordering metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Round number when the event was committed (0 before initiative).
    pub round: u32,

    /// Monotonic sequence number across the encounter.
    pub sequence: u64,

    pub event: CombatEvent,
}

impl EventRecord {
    /// Create a new event record.
    #[must_use]
    pub fn new(round: u32, sequence: u64, event: CombatEvent) -> Self {
        Self {
            round,
            sequence,
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serde() {
        let record = EventRecord::new(
            2,
            17,
            CombatEvent::HpChanged {
                id: CombatantId(1),
                amount: -4,
                before: 10,
                after: 6,
            },
        );

        let json = serde_json::to_string(&record).unwrap();
        let restored: EventRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, restored);
    }
}
