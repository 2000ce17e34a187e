//! Application state for the PayTrack HTTP API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::service::Timekeeper;
use crate::store::{InMemoryStore, RecordStore};

/// Shared application state.
///
/// Holds the timekeeper service, which in turn owns the record store and
/// the payroll policy.
#[derive(Clone)]
pub struct AppState {
    keeper: Arc<Timekeeper>,
}

impl AppState {
    /// Creates application state over an existing record store.
    pub fn new(config: &ConfigLoader, store: Arc<dyn RecordStore>) -> Self {
        Self {
            keeper: Arc::new(Timekeeper::new(store, config.payroll().clone())),
        }
    }

    /// Creates application state over an in-memory store seeded with the
    /// configured roster.
    pub fn in_memory(config: &ConfigLoader) -> Self {
        let store = InMemoryStore::with_employees(config.employees().iter().cloned());
        Self::new(config, Arc::new(store))
    }

    /// Returns the timekeeper service.
    pub fn keeper(&self) -> &Timekeeper {
        &self.keeper
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone + Send + Sync + 'static>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_in_memory_state_is_seeded() {
        let config = ConfigLoader::load("./config").unwrap();
        let state = AppState::in_memory(&config);
        assert!(state.keeper().context_for("admin").is_ok());
    }

    #[test]
    fn test_empty_config_has_no_employees() {
        let config = ConfigLoader::from_config(AppConfig::default());
        let state = AppState::in_memory(&config);
        assert!(state.keeper().store().list_employees().unwrap().is_empty());
    }
}
