//! Application state for the query API

use std::sync::Arc;

use vhmi_core::{Integrity, StateStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Live vehicle snapshot written by the receive loop
    pub store: Arc<StateStore>,
    /// Stream integrity counters
    pub integrity: Arc<Integrity>,
}

impl AppState {
    pub fn new(store: Arc<StateStore>, integrity: Arc<Integrity>) -> Self {
        Self { store, integrity }
    }
}
