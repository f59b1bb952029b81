//! Combatant identification.
//!
//! Every combatant added to an encounter gets a fresh `CombatantId`.
//! IDs are session-scoped: they are allocated monotonically by the
//! encounter state and never reused, even after a combatant is removed.
//!
//! ## Usage
//!
//! ```
//! use combat_tracker::core::CombatantId;
//!
//! let first = CombatantId::new(1);
//! let second = first.next();
//!
//! assert_eq!(second.raw(), 2);
//! assert!(first < second);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a combatant instance within one encounter.
///
/// Two combatants cloned from the same template always have different
/// IDs. Ordering follows allocation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CombatantId(pub u32);

impl CombatantId {
    /// The first ID handed out by a fresh encounter.
    pub const FIRST: CombatantId = CombatantId(1);

    /// Create a combatant ID from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The ID allocated right after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl From<u32> for CombatantId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CombatantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Combatant({})", self.0)
    }
}
