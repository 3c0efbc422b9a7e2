//! Domain operations
//!
//! One method per user intent. Each delegates to the data source chosen at
//! startup and applies the fallback policy when a live call fails:
//! - reads (list, get) are served from the mock catalog
//! - writes (delete, reply) are acknowledged optimistically
//!
//! Optimistic acknowledgment means the caller never sees a write failure.
//! Both behaviours can be switched off through `FallbackPolicy`.

use log::{info, warn};
use std::sync::Arc;

use crate::config::{Environment, FallbackPolicy, OneboxConfig};
use crate::error::Result;
use crate::models::{Ack, Credential, Reply, Thread, ThreadId};
use crate::source::{DataSource, LiveSource, MockDataProvider, MockSource};
use crate::storage::{CredentialStore, KeyValueStore};
use crate::tester::DirectRequestRunner;
use crate::transport::{ApiClient, HttpTransport};

/// Entry point the front-end calls for inbox actions
pub struct Onebox {
    source: Arc<dyn DataSource>,
    fallback: MockDataProvider,
    policy: FallbackPolicy,
    credentials: CredentialStore,
}

impl Onebox {
    /// Wire an explicit data source
    pub fn new(
        source: Arc<dyn DataSource>,
        policy: FallbackPolicy,
        credentials: CredentialStore,
    ) -> Self {
        Self {
            source,
            fallback: MockDataProvider::new(),
            policy,
            credentials,
        }
    }

    /// Build from configuration, choosing the data source once.
    ///
    /// Returns the operations together with the tester's runner, which
    /// shares the same API client but always uses the network.
    pub fn from_config(
        config: &OneboxConfig,
        store: Arc<dyn KeyValueStore>,
        transport: Arc<dyn HttpTransport>,
    ) -> (Self, DirectRequestRunner) {
        let credentials = CredentialStore::new(store);
        let api = ApiClient::new(config.api_base.clone(), transport, credentials.clone());

        let source: Arc<dyn DataSource> = match config.environment {
            Environment::Development => Arc::new(MockSource::new()),
            Environment::Production => Arc::new(LiveSource::new(api.clone())),
        };
        info!(
            "Onebox using {} data source against {}",
            source.name(),
            config.api_base
        );

        let runner = DirectRequestRunner::new(api, config.relay);
        (Self::new(source, config.fallback, credentials), runner)
    }

    /// Name of the data source chosen at startup
    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Fallback policy in effect
    pub fn policy(&self) -> FallbackPolicy {
        self.policy
    }

    /// Credential store shared with the API client
    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// List inbox threads
    pub fn list_threads(&self) -> Result<Vec<Thread>> {
        match self.source.list_threads() {
            Err(e) if e.is_transport_failure() && self.policy.mock_reads_on_failure => {
                warn!("Thread list call failed, using mock data: {}", e);
                Ok(self.fallback.list())
            }
            result => result,
        }
    }

    /// Fetch one thread
    pub fn get_thread(&self, id: &ThreadId) -> Result<Thread> {
        match self.source.get_thread(id) {
            Err(e) if e.is_transport_failure() && self.policy.mock_reads_on_failure => {
                warn!("Thread {} call failed, using mock data: {}", id, e);
                self.fallback.get(id)
            }
            result => result,
        }
    }

    /// Delete a thread
    pub fn delete_thread(&self, id: &ThreadId) -> Result<Ack> {
        match self.source.delete_thread(id) {
            Err(e) if e.is_transport_failure() && self.policy.optimistic_acks => {
                warn!("Delete of thread {} failed, acknowledging anyway: {}", id, e);
                Ok(self.fallback.delete(id))
            }
            Ok(ack) => {
                info!("Deleted thread {}", id);
                Ok(ack)
            }
            result => result,
        }
    }

    /// Send a reply to a thread
    pub fn send_reply(&self, id: &ThreadId, reply: &Reply) -> Result<Ack> {
        match self.source.send_reply(id, reply) {
            Err(e) if e.is_transport_failure() && self.policy.optimistic_acks => {
                warn!("Reply to thread {} failed, acknowledging anyway: {}", id, e);
                Ok(self.fallback.send_reply(id, reply))
            }
            Ok(ack) => {
                info!("Sent reply to thread {}", id);
                Ok(ack)
            }
            result => result,
        }
    }

    /// Exchange a callback token for a credential. Does not persist it.
    pub fn login_with_google(&self, token: Option<&str>) -> Result<Credential> {
        self.source.authenticate(token)
    }
}
