//! Thread-safe handle to an encounter.

use std::sync::Arc;

use parking_lot::Mutex;

use super::controller::Encounter;
use crate::core::CombatState;

/// Cloneable handle that serializes access to one `Encounter`.
///
/// Every command runs under the lock, so concurrent callers see each
/// command either fully applied or not at all.
#[derive(Clone, Debug)]
pub struct SharedEncounter {
    inner: Arc<Mutex<Encounter>>,
}

impl SharedEncounter {
    #[must_use]
    pub fn new(encounter: Encounter) -> Self {
        Self {
            inner: Arc::new(Mutex::new(encounter)),
        }
    }

    /// Run `f` with exclusive access to the encounter.
    pub fn with<R>(&self, f: impl FnOnce(&mut Encounter) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Consistent copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> CombatState {
        self.inner.lock().snapshot()
    }
}

impl From<Encounter> for SharedEncounter {
    fn from(encounter: Encounter) -> Self {
        Self::new(encounter)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::combatants::CombatantTemplate;
    use crate::core::TrackerConfig;

    #[test]
    fn test_concurrent_commands() {
        let shared = SharedEncounter::new(Encounter::new(TrackerConfig::default().with_seed(9)));
        let id = shared.with(|e| e.add_combatant(&CombatantTemplate::new("Ogre", 1000, 11)));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for _ in 0..25 {
                        shared.with(|e| e.modify_hp(-1, id));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = shared.snapshot();
        assert_eq!(snapshot.get(id).unwrap().hit_points.current(), 900);
    }

    #[test]
    fn test_snapshot_detached() {
        let shared: SharedEncounter = Encounter::default().into();
        let id = shared.with(|e| e.add_combatant(&CombatantTemplate::new("Ogre", 59, 11)));
        let before = shared.snapshot();

        shared.with(|e| e.modify_hp(-9, id));

        assert_eq!(before.get(id).unwrap().hit_points.current(), 59);
        assert_eq!(shared.snapshot().get(id).unwrap().hit_points.current(), 50);
    }
}
