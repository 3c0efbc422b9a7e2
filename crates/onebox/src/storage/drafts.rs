//! Per-thread reply drafts

use std::sync::Arc;

use super::KeyValueStore;
use crate::error::Result;
use crate::models::ThreadId;

/// Saves composer content under `draft_<thread id>`
#[derive(Clone)]
pub struct DraftStore {
    store: Arc<dyn KeyValueStore>,
}

impl DraftStore {
    /// Create a draft store over a key-value store
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn key(thread_id: &ThreadId) -> String {
        format!("draft_{}", thread_id.as_str())
    }

    /// Save a draft for a thread, replacing any earlier one
    pub fn save(&self, thread_id: &ThreadId, content: &str) -> Result<()> {
        self.store.set(&Self::key(thread_id), content)?;
        Ok(())
    }

    /// Load the saved draft for a thread
    pub fn load(&self, thread_id: &ThreadId) -> Result<Option<String>> {
        Ok(self.store.get(&Self::key(thread_id))?)
    }

    /// Drop the draft, e.g. after the reply was sent
    pub fn discard(&self, thread_id: &ThreadId) -> Result<()> {
        self.store.remove(&Self::key(thread_id))?;
        Ok(())
    }
}
