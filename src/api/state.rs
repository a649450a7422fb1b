//! Application state for the scheduler API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::overtime::{InMemoryOvertimeStore, OvertimeEngine, OvertimeStore};
use crate::scheduler::Scheduler;

/// Shared application state.
///
/// Holds the scheduler built from the loaded configuration and the overtime
/// engine sharing it.
#[derive(Clone)]
pub struct AppState {
    scheduler: Scheduler,
    overtime: Arc<OvertimeEngine>,
}

impl AppState {
    /// Creates a new application state backed by an in-memory overtime store.
    pub fn new(config: ConfigLoader) -> Self {
        Self::with_store(config, Arc::new(InMemoryOvertimeStore::new()))
    }

    /// Creates a new application state over the given overtime store.
    pub fn with_store(config: ConfigLoader, store: Arc<dyn OvertimeStore>) -> Self {
        let scheduler = Scheduler::new(config.into_config());
        let overtime = Arc::new(OvertimeEngine::new(scheduler.clone(), store));
        Self {
            scheduler,
            overtime,
        }
    }

    /// Returns the scheduler.
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Returns the overtime engine.
    pub fn overtime(&self) -> &OvertimeEngine {
        &self.overtime
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone + Send + Sync + 'static>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_scheduler_and_engine_share_configuration() {
        let state = AppState::new(ConfigLoader::load("./config/noc").unwrap());
        assert_eq!(
            state.scheduler().crews().len(),
            state.overtime().scheduler().crews().len()
        );
    }
}
