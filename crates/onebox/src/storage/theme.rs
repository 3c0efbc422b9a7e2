//! UI theme preference

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::KeyValueStore;
use crate::error::{Error, Result};

const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Stored form of the theme
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The other theme
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(Error::validation(format!("Unknown theme: {}", other))),
        }
    }
}

/// Persisted theme preference
#[derive(Clone)]
pub struct ThemeStore {
    store: Arc<dyn KeyValueStore>,
}

impl ThemeStore {
    /// Create a theme store over a key-value store
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Saved theme; light when unset or unrecognized
    pub fn get(&self) -> Result<Theme> {
        Ok(self
            .store
            .get(THEME_KEY)?
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default())
    }

    /// Persist a theme preference
    pub fn set(&self, theme: Theme) -> Result<()> {
        self.store.set(THEME_KEY, theme.as_str())?;
        Ok(())
    }

    /// Flip and persist, returning the new theme
    pub fn toggle(&self) -> Result<Theme> {
        let next = self.get()?.toggled();
        self.set(next)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;

    #[test]
    fn test_default_and_toggle() {
        let themes = ThemeStore::new(Arc::new(InMemoryStore::new()));
        assert_eq!(themes.get().unwrap(), Theme::Light);
        assert_eq!(themes.toggle().unwrap(), Theme::Dark);
        assert_eq!(themes.get().unwrap(), Theme::Dark);
        assert_eq!(themes.toggle().unwrap(), Theme::Light);
    }

    #[test]
    fn test_unrecognized_value_falls_back_to_light() {
        let kv = Arc::new(InMemoryStore::new());
        kv.set(THEME_KEY, "solarized").unwrap();
        assert_eq!(ThemeStore::new(kv).get().unwrap(), Theme::Light);
    }

    #[test]
    fn test_parse() {
        assert_eq!("Dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert!("blue".parse::<Theme>().is_err());
    }
}
