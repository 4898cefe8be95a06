//! Arrival timestamps per bus identifier

use std::collections::HashMap;

use parking_lot::RwLock;
use tokio::time::Instant;

/// Time the most recent frame was received, keyed by raw identifier
///
/// Written by the dispatcher for every frame, recognized or not. Read only
/// by the staleness monitor.
#[derive(Debug, Default)]
pub struct ArrivalTable {
    last_seen: RwLock<HashMap<u32, Instant>>,
}

impl ArrivalTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, id: u32, at: Instant) {
        self.last_seen.write().insert(id, at);
    }

    pub fn last_seen(&self, id: u32) -> Option<Instant> {
        self.last_seen.read().get(&id).copied()
    }
}
