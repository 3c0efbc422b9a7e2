//! Data sources behind the domain operations
//!
//! A `DataSource` answers each user intent. Two implementations exist:
//! `LiveSource` talks to the remote API and `MockSource` serves the canned
//! catalog. One is chosen at startup from the configured environment.

mod live;
mod mock;

pub use live::LiveSource;
pub use mock::{MOCK_TOKEN, MockDataProvider, MockSource};

use crate::error::Result;
use crate::models::{Ack, Credential, Reply, Thread, ThreadId};

/// Backend for the domain operations
pub trait DataSource: Send + Sync {
    /// Short label used in logs
    fn name(&self) -> &'static str;

    /// All threads in the inbox
    fn list_threads(&self) -> Result<Vec<Thread>>;

    /// One thread by ID
    fn get_thread(&self, id: &ThreadId) -> Result<Thread>;

    fn delete_thread(&self, id: &ThreadId) -> Result<Ack>;

    fn send_reply(&self, id: &ThreadId, reply: &Reply) -> Result<Ack>;

    /// Exchange an OAuth callback token for a credential
    fn authenticate(&self, token: Option<&str>) -> Result<Credential>;
}
