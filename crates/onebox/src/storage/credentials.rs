//! Credential store: the one place the login record is read and written

use anyhow::Context;
use log::info;
use std::sync::Arc;

use super::KeyValueStore;
use crate::error::Result;
use crate::models::Credential;

/// Key holding the serialized credential
const CREDENTIAL_KEY: &str = "credential";

/// Typed accessor over the persisted credential slot
///
/// Populated at login, cleared at logout. The token is always derived from
/// this record; there is no separate token slot.
#[derive(Clone)]
pub struct CredentialStore {
    store: Arc<dyn KeyValueStore>,
}

impl CredentialStore {
    /// Create a credential store over a key-value store
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Current credential, if signed in
    pub fn get(&self) -> Result<Option<Credential>> {
        let Some(raw) = self.store.get(CREDENTIAL_KEY)? else {
            return Ok(None);
        };
        let credential: Credential = serde_json::from_str(&raw).context("Stored credential is corrupt")?;
        Ok(Some(credential))
    }

    /// Current bearer token, if signed in
    pub fn token(&self) -> Result<Option<String>> {
        Ok(self.get()?.map(|c| c.token))
    }

    /// Persist a credential, replacing any earlier one
    pub fn set(&self, credential: &Credential) -> Result<()> {
        let raw = serde_json::to_string(credential)?;
        self.store.set(CREDENTIAL_KEY, &raw)?;
        info!("Stored credential for {}", credential.user.email);
        Ok(())
    }

    /// Remove the stored credential
    pub fn clear(&self) -> Result<()> {
        self.store.remove(CREDENTIAL_KEY)?;
        info!("Cleared stored credential");
        Ok(())
    }

    /// Whether a non-empty token is stored
    pub fn is_signed_in(&self) -> Result<bool> {
        Ok(self.token()?.is_some_and(|t| !t.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::UserProfile;
    use crate::storage::InMemoryStore;

    fn credential(token: &str) -> Credential {
        Credential::new(
            token,
            UserProfile {
                name: "Ada".into(),
                email: "ada@example.com".into(),
                picture: String::new(),
            },
        )
    }

    #[test]
    fn test_lifecycle() {
        let creds = CredentialStore::new(Arc::new(InMemoryStore::new()));
        assert!(!creds.is_signed_in().unwrap());
        assert!(creds.token().unwrap().is_none());

        creds.set(&credential("abc")).unwrap();
        assert_eq!(creds.token().unwrap().as_deref(), Some("abc"));
        assert_eq!(creds.get().unwrap().unwrap().user.name, "Ada");

        creds.clear().unwrap();
        assert!(creds.get().unwrap().is_none());
    }

    #[test]
    fn test_token_read_fresh_after_replacement() {
        let kv = Arc::new(InMemoryStore::new());
        let creds = CredentialStore::new(kv.clone());
        creds.set(&credential("first")).unwrap();

        // A second handle over the same store replaces the record
        CredentialStore::new(kv).set(&credential("second")).unwrap();
        assert_eq!(creds.token().unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_corrupt_record_is_storage_error() {
        let kv = Arc::new(InMemoryStore::new());
        kv.set(CREDENTIAL_KEY, "{not json").unwrap();
        let creds = CredentialStore::new(kv);
        assert!(matches!(creds.get(), Err(Error::Storage(_))));
    }
}
