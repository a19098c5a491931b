//! Application state for the timesheet API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::error::TimesheetResult;
use crate::store::{InMemoryTimesheetStore, TimesheetStore};
use crate::workflow::TimesheetService;

/// Shared application state.
///
/// Holds the workflow service, which in turn owns the settings and the
/// directory, holiday calendar and timesheet store.
#[derive(Clone)]
pub struct AppState {
    service: Arc<TimesheetService>,
}

impl AppState {
    /// Creates a new application state around a service.
    pub fn new(service: TimesheetService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Builds state from loaded configuration with the given store.
    pub fn from_config(
        config: &ConfigLoader,
        store: Arc<dyn TimesheetStore>,
    ) -> TimesheetResult<Self> {
        Ok(Self::new(TimesheetService::from_config(config, store)?))
    }

    /// Builds state from loaded configuration with an empty in-memory store.
    pub fn in_memory(config: &ConfigLoader) -> TimesheetResult<Self> {
        Self::from_config(config, Arc::new(InMemoryTimesheetStore::new()))
    }

    /// Returns the workflow service.
    pub fn service(&self) -> &TimesheetService {
        &self.service
    }
}
