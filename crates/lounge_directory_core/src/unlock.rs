//! crates/lounge_directory_core/src/unlock.rs
//!
//! One-way unlock flags for gated content, keyed by content id.

use crate::ports::{KeyValueStore, PortResult};
use std::sync::Arc;
use tracing::{info, warn};

const UNLOCKED: &str = "true";

/// Reads and sets per-content unlock flags. A flag never reverts once set.
#[derive(Clone)]
pub struct UnlockGate {
    store: Arc<dyn KeyValueStore>,
}

impl UnlockGate {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn storage_key(content_id: &str) -> String {
        format!("unlock_{content_id}")
    }

    /// Absent, malformed or unreadable flags all read as locked.
    pub fn is_unlocked(&self, content_id: &str) -> bool {
        match self.store.get(&Self::storage_key(content_id)) {
            Ok(value) => value.as_deref() == Some(UNLOCKED),
            Err(e) => {
                warn!("Failed to read unlock flag for {}: {}", content_id, e);
                false
            }
        }
    }

    pub fn unlock(&self, content_id: &str) -> PortResult<()> {
        if self.is_unlocked(content_id) {
            return Ok(());
        }
        self.store.set(&Self::storage_key(content_id), UNLOCKED)?;
        info!("Unlocked content {}", content_id);
        Ok(())
    }
}
