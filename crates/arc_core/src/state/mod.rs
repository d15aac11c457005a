//! Global Competition Store
//!
//! Thread-safe process-wide store for runtime competition data. `AppState`
//! owns the competition list; callers take the read or write guard for the
//! duration of one operation and go through the aggregate's methods for
//! everything gated on status. Persistence is a collaborator's concern:
//! the whole store serializes to JSON.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::competition::{Competition, CompetitionInfo};

/// Global competition store singleton
pub static APP_STATE: Lazy<Arc<RwLock<AppState>>> =
    Lazy::new(|| Arc::new(RwLock::new(AppState::default())));

/// In-memory competition store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppState {
    pub competitions: Vec<Competition>,
}

impl AppState {
    /// Create a new empty store
    pub fn new() -> Self {
        Self { competitions: Vec::new() }
    }

    // ========================
    // Competition Management
    // ========================

    /// Create a competition from its configuration and return the new id.
    pub fn create_competition(&mut self, info: CompetitionInfo) -> Uuid {
        let competition = Competition::new(info);
        let id = competition.id;
        self.competitions.push(competition);
        id
    }

    /// Add an already-built competition, e.g. one restored from JSON.
    pub fn add_competition(&mut self, competition: Competition) {
        self.competitions.push(competition);
    }

    /// Get a competition by id
    pub fn competition(&self, id: Uuid) -> Option<&Competition> {
        self.competitions.iter().find(|c| c.id == id)
    }

    /// Get a mutable reference to a competition by id
    pub fn competition_mut(&mut self, id: Uuid) -> Option<&mut Competition> {
        self.competitions.iter_mut().find(|c| c.id == id)
    }

    /// Mutable lookup with a typed error for callers threading `?`.
    pub fn require_competition_mut(
        &mut self,
        id: Uuid,
    ) -> Result<&mut Competition, StoreError> {
        self.competition_mut(id).ok_or(StoreError::UnknownCompetition(id))
    }

    /// Remove a competition by id
    pub fn remove_competition(&mut self, id: Uuid) -> Option<Competition> {
        if let Some(idx) = self.competitions.iter().position(|c| c.id == id) {
            Some(self.competitions.remove(idx))
        } else {
            None
        }
    }
}

// ========================
// Global State Access Functions
// ========================

/// Get a read lock on the global store
pub fn get_state() -> std::sync::RwLockReadGuard<'static, AppState> {
    APP_STATE.read().expect("APP_STATE lock poisoned")
}

/// Get a write lock on the global store
pub fn get_state_mut() -> std::sync::RwLockWriteGuard<'static, AppState> {
    APP_STATE.write().expect("APP_STATE lock poisoned")
}

/// Reset the global store to empty
pub fn reset_state() {
    *APP_STATE.write().expect("APP_STATE lock poisoned") = AppState::new();
}

/// Replace the entire global store
pub fn set_state(new_state: AppState) {
    *APP_STATE.write().expect("APP_STATE lock poisoned") = new_state;
}
