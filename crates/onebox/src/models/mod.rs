//! Domain models for Onebox entities

mod credential;
mod reply;
mod thread;

pub use credential::{Credential, UserProfile};
pub use reply::{Ack, Reply};
pub use thread::{Thread, ThreadId};
