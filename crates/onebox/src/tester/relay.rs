//! Public CORS relays the tester can route through

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Candidate relay prefixes; one is active at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RelayProxy {
    /// `https://cors-anywhere.herokuapp.com/` (target appended as-is)
    #[serde(rename = "cors-anywhere")]
    CorsAnywhere,
    /// `https://api.allorigins.win/raw?url=`
    #[serde(rename = "allorigins")]
    AllOrigins,
    /// `https://corsproxy.io/?`
    #[default]
    #[serde(rename = "corsproxy")]
    CorsProxyIo,
}

impl RelayProxy {
    pub const ALL: [RelayProxy; 3] = [
        RelayProxy::CorsAnywhere,
        RelayProxy::AllOrigins,
        RelayProxy::CorsProxyIo,
    ];

    /// URL prefix of the relay
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::CorsAnywhere => "https://cors-anywhere.herokuapp.com/",
            Self::AllOrigins => "https://api.allorigins.win/raw?url=",
            Self::CorsProxyIo => "https://corsproxy.io/?",
        }
    }

    /// Short name used in config
    pub fn name(&self) -> &'static str {
        match self {
            Self::CorsAnywhere => "cors-anywhere",
            Self::AllOrigins => "allorigins",
            Self::CorsProxyIo => "corsproxy",
        }
    }

    /// Rewrite `target` to go through this relay
    pub fn wrap(&self, target: &str) -> String {
        match self {
            // cors-anywhere takes the raw URL as its path
            Self::CorsAnywhere => format!("{}{}", self.prefix(), target),
            Self::AllOrigins | Self::CorsProxyIo => {
                format!("{}{}", self.prefix(), urlencoding::encode(target))
            }
        }
    }
}

impl fmt::Display for RelayProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RelayProxy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|r| r.name() == wanted || r.prefix() == wanted)
            .ok_or_else(|| Error::validation(format!("Unknown relay: {}", s)))
    }
}
