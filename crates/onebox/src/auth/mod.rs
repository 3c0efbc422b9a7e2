//! Google OAuth login
//!
//! This module provides:
//! - The login redirect URL and browser launch
//! - Consumption of the `/auth/callback` redirect
//! - A session facade over the credential store (login state, logout)

mod callback;
mod session;

pub use callback::CallbackParams;
pub use session::Session;

use log::{info, warn};
use std::time::Duration;

use crate::transport::ApiClient;

/// How long the front-end waits before sending a failed callback back to login
pub const CALLBACK_RETRY_DELAY: Duration = Duration::from_secs(3);

/// Path on the front-end origin that receives the OAuth redirect
pub const CALLBACK_PATH: &str = "/auth/callback";

/// URL that starts the Google login flow and returns to `origin`
pub fn google_login_url(api_base: &str, origin: &str) -> String {
    let redirect = format!("{}{}", origin.trim_end_matches('/'), CALLBACK_PATH);
    format!(
        "{}/{}?redirect_to={}",
        api_base.trim_end_matches('/'),
        ApiClient::GOOGLE_LOGIN_PATH,
        urlencoding::encode(&redirect)
    )
}

/// Open the login URL in the system browser and return it
pub fn redirect_to_google_login(api_base: &str, origin: &str) -> String {
    let url = google_login_url(api_base, origin);
    info!("Redirecting to: {}", url);

    if let Err(e) = open::that(&url) {
        warn!("Failed to open browser: {}. Please open the URL manually.", e);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_google_login_url() {
        let url = google_login_url("https://api.example.com/api/v1/", "http://localhost:3000/");
        assert_eq!(
            url,
            "https://api.example.com/api/v1/auth/google-login?redirect_to=http%3A%2F%2Flocalhost%3A3000%2Fauth%2Fcallback"
        );
    }
}
