//! Worker lifecycle state machine.
//!
//! One version moves `Installing -> Installed -> Activating -> Active` and
//! never back. A new version repeats the cycle in its own worker, coexisting
//! with the previous active version until its own activation completes.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerState {
    /// Precache population in progress (install event dispatched).
    Installing,
    /// Precache complete, waiting to activate.
    Installed,
    /// Stale-store eviction and client takeover in progress.
    Activating,
    /// Handling intercepted requests.
    Active,
}

impl WorkerState {
    /// Fetch events are only handled once activation has completed.
    pub fn can_intercept(self) -> bool {
        self == WorkerState::Active
    }

    pub fn can_advance_to(self, next: WorkerState) -> bool {
        matches!(
            (self, next),
            (WorkerState::Installing, WorkerState::Installed)
                | (WorkerState::Installed, WorkerState::Activating)
                | (WorkerState::Activating, WorkerState::Active)
        )
    }
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerState::Installing => write!(f, "installing"),
            WorkerState::Installed => write!(f, "installed"),
            WorkerState::Activating => write!(f, "activating"),
            WorkerState::Active => write!(f, "active"),
        }
    }
}
