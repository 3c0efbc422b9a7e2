//! Local persisted state
//!
//! A small key-value abstraction stands in for browser local storage. Typed
//! wrappers own each key so nothing else touches the raw slots.

mod credentials;
mod drafts;
mod file;
mod memory;
mod theme;
mod traits;

pub use credentials::CredentialStore;
pub use drafts::DraftStore;
pub use file::FileStore;
pub use memory::InMemoryStore;
pub use theme::{Theme, ThemeStore};
pub use traits::KeyValueStore;
