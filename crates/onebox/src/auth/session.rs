//! Login state: callback completion, current user, logout

use log::{error, info};

use super::CallbackParams;
use crate::error::Result;
use crate::models::{Credential, UserProfile};
use crate::operations::Onebox;

/// Session facade used by the login and callback screens
pub struct Session<'a> {
    onebox: &'a Onebox,
}

impl<'a> Session<'a> {
    /// Create a session over the operations
    pub fn new(onebox: &'a Onebox) -> Self {
        Self { onebox }
    }

    /// Complete the OAuth redirect and persist the resulting credential.
    ///
    /// A redirect carrying both `token` and `user` is trusted as-is;
    /// otherwise the token (possibly absent) goes through the data source's
    /// authenticate call. On error the caller should send the user back to
    /// login after `CALLBACK_RETRY_DELAY`.
    pub fn complete_callback(&self, callback: &str) -> Result<Credential> {
        let params = CallbackParams::parse(callback);

        let outcome = match params.credential() {
            Some(direct) => direct,
            None => {
                info!("No token or user data in callback, trying API validation");
                self.onebox.login_with_google(params.token.as_deref())
            }
        };

        let credential = match outcome {
            Ok(credential) => credential,
            Err(e) => {
                error!("Error handling authentication callback: {}", e);
                return Err(e);
            }
        };

        self.onebox.credentials().set(&credential)?;
        info!("Signed in as {}", credential.user.email);
        Ok(credential)
    }

    /// Profile of the signed-in user, if any
    pub fn current_user(&self) -> Result<Option<UserProfile>> {
        Ok(self.onebox.credentials().get()?.map(|c| c.user))
    }

    /// Whether a credential is stored
    pub fn is_signed_in(&self) -> Result<bool> {
        self.onebox.credentials().is_signed_in()
    }

    /// Forget the stored credential
    pub fn logout(&self) -> Result<()> {
        self.onebox.credentials().clear()?;
        info!("Signed out");
        Ok(())
    }
}
