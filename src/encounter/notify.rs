//! Outcome notifications.
//!
//! Saving throws and concentration checks are returned to the caller as
//! values and also pushed to a `Notifier`. The text is display-only;
//! nothing in the encounter depends on what a notifier does.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::effects::ConcentrationCheck;
use crate::rules::SavingThrowReport;

/// An outcome worth telling the user about.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notice {
    SavingThrow(SavingThrowReport),
    Concentration(ConcentrationCheck),
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::SavingThrow(report) => write!(f, "{}", report),
            Notice::Concentration(check) => write!(
                f,
                "{} concentration check: {} ({:+}) = {} vs DC {} - {}",
                check.id,
                check.roll,
                check.modifier,
                check.total,
                check.dc,
                if check.maintained { "maintained" } else { "broken" }
            ),
        }
    }
}

/// One-way notification sink.
pub trait Notifier: Send {
    fn notify(&mut self, notice: &Notice);
}

impl<F> Notifier for F
where
    F: FnMut(&Notice) + Send,
{
    fn notify(&mut self, notice: &Notice) {
        self(notice)
    }
}

/// Discards every notice.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&mut self, _notice: &Notice) {}
}

/// Collects notices into a shared list the caller can read back.
#[derive(Clone, Debug, Default)]
pub struct NoticeLog {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl NoticeLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything received so far.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().clone()
    }

    /// Take everything received so far, leaving the log empty.
    pub fn drain(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.notices.lock())
    }
}

impl Notifier for NoticeLog {
    fn notify(&mut self, notice: &Notice) {
        self.notices.lock().push(notice.clone());
    }
}
