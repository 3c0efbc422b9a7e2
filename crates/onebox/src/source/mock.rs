//! Canned catalog used in development and as the fallback for failed reads

use log::debug;

use super::DataSource;
use crate::error::{Error, Result};
use crate::models::{Ack, Credential, Reply, Thread, ThreadId, UserProfile};

/// Token handed out by the mock login
pub const MOCK_TOKEN: &str = "mock_token_12345";

/// Fixed collection of three sample threads
///
/// The catalog never changes: deletes and replies report success without
/// touching it. Callers keep their own copy of the list.
#[derive(Debug, Clone)]
pub struct MockDataProvider {
    threads: Vec<Thread>,
}

impl MockDataProvider {
    /// Create the provider with the sample catalog
    pub fn new() -> Self {
        Self {
            threads: vec![
                sample(
                    "1",
                    "john.doe@example.com",
                    "John Doe",
                    "Project Discussion Follow-up",
                    "Hey, I wanted to follow up on our meeting yesterday...",
                    "<p>Hey,</p><p>I wanted to follow up on our meeting yesterday. I think we have a good plan going forward with the project. Let me know if you have any questions.</p><p>Best regards,<br/>John</p>",
                    "2023-03-15T10:30:00Z",
                    "https://randomuser.me/api/portraits/men/1.jpg",
                ),
                sample(
                    "2",
                    "sarah.parker@example.com",
                    "Sarah Parker",
                    "Monthly Report - February 2023",
                    "Please find attached the monthly report for February 2023...",
                    "<p>Hi there,</p><p>Please find attached the monthly report for February 2023. We exceeded our sales targets by 15% this month!</p><p>Regards,<br/>Sarah</p>",
                    "2023-03-14T15:45:00Z",
                    "https://randomuser.me/api/portraits/women/2.jpg",
                ),
                sample(
                    "3",
                    "mike.wilson@example.com",
                    "Mike Wilson",
                    "Team Building Event",
                    "We are planning a team building event next month...",
                    "<p>Hello everyone,</p><p>We are planning a team building event next month. It will be on the 15th of April. Please mark your calendars!</p><p>Best,<br/>Mike</p>",
                    "2023-03-13T09:20:00Z",
                    "https://randomuser.me/api/portraits/men/3.jpg",
                ),
            ],
        }
    }

    /// All threads in catalog order
    pub fn list(&self) -> Vec<Thread> {
        self.threads.clone()
    }

    /// Look up a thread, or `NotFound`
    pub fn get(&self, id: &ThreadId) -> Result<Thread> {
        self.threads
            .iter()
            .find(|t| &t.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound(id.clone()))
    }

    /// Canned delete acknowledgment; the catalog is unchanged
    pub fn delete(&self, _id: &ThreadId) -> Ack {
        Ack::ok("Thread deleted successfully (mock)")
    }

    /// Canned reply acknowledgment
    pub fn send_reply(&self, _id: &ThreadId, _reply: &Reply) -> Ack {
        Ack::ok("Reply sent successfully (mock)")
    }

    /// Fixed credential used in development
    pub fn credential(&self) -> Credential {
        Credential::new(
            MOCK_TOKEN,
            UserProfile {
                name: "John Doe".to_string(),
                email: "john.doe@example.com".to_string(),
                picture: "https://randomuser.me/api/portraits/men/1.jpg".to_string(),
            },
        )
    }
}

impl Default for MockDataProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(clippy::too_many_arguments)]
fn sample(
    id: &str,
    from: &str,
    from_name: &str,
    subject: &str,
    preview: &str,
    body: &str,
    timestamp: &str,
    avatar: &str,
) -> Thread {
    Thread {
        id: ThreadId::new(id),
        from: from.to_string(),
        from_name: from_name.to_string(),
        to: "me@example.com".to_string(),
        subject: subject.to_string(),
        preview: preview.to_string(),
        body: body.to_string(),
        timestamp: timestamp.to_string(),
        avatar: avatar.to_string(),
    }
}

/// DataSource serving the mock catalog; never performs network I/O
#[derive(Debug, Clone, Default)]
pub struct MockSource {
    provider: MockDataProvider,
}

impl MockSource {
    /// Create a mock source over a fresh provider
    pub fn new() -> Self {
        Self::default()
    }
}

impl DataSource for MockSource {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn list_threads(&self) -> Result<Vec<Thread>> {
        debug!("Using mock thread list");
        Ok(self.provider.list())
    }

    fn get_thread(&self, id: &ThreadId) -> Result<Thread> {
        debug!("Using mock thread data for {}", id);
        self.provider.get(id)
    }

    fn delete_thread(&self, id: &ThreadId) -> Result<Ack> {
        Ok(self.provider.delete(id))
    }

    fn send_reply(&self, id: &ThreadId, reply: &Reply) -> Result<Ack> {
        Ok(self.provider.send_reply(id, reply))
    }

    fn authenticate(&self, _token: Option<&str>) -> Result<Credential> {
        debug!("Using mock login");
        Ok(self.provider.credential())
    }
}
