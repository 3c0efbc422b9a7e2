//! Parsing of the OAuth callback redirect

use url::Url;

use crate::error::{Error, Result};
use crate::models::{Credential, UserProfile};

/// Query parameters delivered to `/auth/callback`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackParams {
    pub token: Option<String>,
    /// URL-encoded JSON user profile
    pub user: Option<String>,
}

impl CallbackParams {
    /// Parse a full callback URL, a path with a query, a `?query` or a
    /// bare query string
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        let query = match Url::parse(input) {
            Ok(url) => url.query().unwrap_or_default().to_string(),
            Err(_) => match input.split_once('?') {
                Some((_, query)) => query.to_string(),
                None => input.to_string(),
            },
        };

        let mut params = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let value = value.into_owned();
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "token" => params.token = Some(value),
                "user" => params.user = Some(value),
                _ => {}
            }
        }
        params
    }

    /// Credential carried directly in the redirect, if both parts are present
    pub fn credential(&self) -> Option<Result<Credential>> {
        let token = self.token.as_ref()?;
        let user = self.user.as_ref()?;
        Some(parse_user(user).map(|user| Credential::new(token.clone(), user)))
    }
}

/// Decode the user profile, tolerating one extra layer of percent-encoding
fn parse_user(raw: &str) -> Result<UserProfile> {
    if let Ok(user) = serde_json::from_str(raw) {
        return Ok(user);
    }
    let decoded = urlencoding::decode(raw)
        .map_err(|_| Error::authentication("Authentication failed: malformed user data"))?;
    serde_json::from_str(&decoded)
        .map_err(|_| Error::authentication("Authentication failed: malformed user data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_url() {
        let params = CallbackParams::parse(
            "http://localhost:3000/auth/callback?token=abc&user=%7B%22name%22%3A%22Ada%22%2C%22email%22%3A%22ada%40example.com%22%7D",
        );
        assert_eq!(params.token.as_deref(), Some("abc"));
        let cred = params.credential().unwrap().unwrap();
        assert_eq!(cred.token, "abc");
        assert_eq!(cred.user.email, "ada@example.com");
    }

    #[test]
    fn test_parse_path_and_query() {
        let params =
            CallbackParams::parse("/auth/callback?token=abc&user=%7B%22name%22%3A%22Ada%22%7D");
        assert_eq!(params.token.as_deref(), Some("abc"));
        assert_eq!(params.user.as_deref(), Some(r#"{"name":"Ada"}"#));
        assert_eq!(params.credential().unwrap().unwrap().user.name, "Ada");
    }

    #[test]
    fn test_parse_double_encoded_user() {
        let user = urlencoding::encode(r#"{"name":"Ada","email":"ada@example.com"}"#);
        let query = format!("?token=abc&user={}", urlencoding::encode(&user));
        let cred = CallbackParams::parse(&query).credential().unwrap().unwrap();
        assert_eq!(cred.user.name, "Ada");
    }

    #[test]
    fn test_missing_user_yields_no_direct_credential() {
        let params = CallbackParams::parse("token=abc");
        assert_eq!(params.token.as_deref(), Some("abc"));
        assert!(params.credential().is_none());

        let empty = CallbackParams::parse("http://localhost:3000/auth/callback");
        assert_eq!(empty, CallbackParams::default());
    }

    #[test]
    fn test_malformed_user_is_authentication_error() {
        let params = CallbackParams::parse("token=abc&user=notjson");
        assert!(matches!(
            params.credential().unwrap(),
            Err(Error::Authentication(_))
        ));
    }
}
