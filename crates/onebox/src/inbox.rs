//! Caller-side inbox state
//!
//! Holds the thread list the front-end renders, the current selection and
//! client-only tag annotations. Only the front-end mutates it, in response to
//! operation results; the operations never touch it.

use log::debug;
use std::collections::HashMap;

use crate::error::Result;
use crate::models::{Ack, Thread, ThreadId};
use crate::operations::Onebox;
use crate::tagging::Tag;

#[derive(Debug, Clone, Default)]
pub struct Inbox {
    threads: Vec<Thread>,
    selected: Option<ThreadId>,
    tags: HashMap<ThreadId, Vec<Tag>>,
}

impl Inbox {
    /// Create an inbox from a thread list
    pub fn new(threads: Vec<Thread>) -> Self {
        Self {
            threads,
            ..Self::default()
        }
    }

    /// Fetch the thread list through the operations
    pub fn load(onebox: &Onebox) -> Result<Self> {
        Ok(Self::new(onebox.list_threads()?))
    }

    /// Replace the list, keeping annotations for threads that are still present
    pub fn replace(&mut self, threads: Vec<Thread>) {
        self.threads = threads;
        let threads = &self.threads;
        self.tags.retain(|id, _| threads.iter().any(|t| &t.id == id));
        if let Some(selected) = &self.selected
            && !self.threads.iter().any(|t| &t.id == selected)
        {
            self.selected = None;
        }
    }

    /// Threads in display order
    pub fn threads(&self) -> &[Thread] {
        &self.threads
    }

    /// Number of threads
    pub fn len(&self) -> usize {
        self.threads.len()
    }

    /// Whether the inbox is empty
    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }

    /// Find a thread by id
    pub fn get(&self, id: &ThreadId) -> Option<&Thread> {
        self.threads.iter().find(|t| &t.id == id)
    }

    /// Select a thread for the detail pane
    pub fn select(&mut self, id: &ThreadId) -> Option<&Thread> {
        let position = self.threads.iter().position(|t| &t.id == id)?;
        self.selected = Some(id.clone());
        self.threads.get(position)
    }

    /// Currently selected thread
    pub fn selected(&self) -> Option<&Thread> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    /// Clear the selection
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Remove the first thread with this id. Other entries are untouched.
    pub fn remove(&mut self, id: &ThreadId) -> Option<Thread> {
        let position = self.threads.iter().position(|t| &t.id == id)?;
        let removed = self.threads.remove(position);
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        if !self.threads.iter().any(|t| &t.id == id) {
            self.tags.remove(id);
        }
        debug!("Removed thread {} from inbox", id);
        Some(removed)
    }

    /// Delete through the operations, then drop the thread locally
    pub fn delete(&mut self, onebox: &Onebox, id: &ThreadId) -> Result<Ack> {
        let ack = onebox.delete_thread(id)?;
        self.remove(id);
        Ok(ack)
    }

    /// Attach tags to a thread, replacing earlier ones
    pub fn apply_tags(&mut self, id: &ThreadId, tags: Vec<Tag>) {
        if tags.is_empty() {
            self.tags.remove(id);
        } else {
            self.tags.insert(id.clone(), tags);
        }
    }

    /// Tags attached to a thread
    pub fn tags(&self, id: &ThreadId) -> &[Tag] {
        self.tags.get(id).map(Vec::as_slice).unwrap_or_default()
    }
}
