//! HTTP backend config module.
//!
//! This module contains the representation of the remote collections
//! configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_LETTERS_URL: &str = "https://dear-stranger.herokuapp.com/messages";
pub const DEFAULT_REPORTS_URL: &str = "https://dear-stranger.herokuapp.com/reports";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Represents the remote collections configuration.
#[derive(Debug, Clone, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct HttpConfig {
    /// Represents the URL of the letters collection.
    pub letters_url: String,
    /// Represents the URL of the reports collection.
    pub reports_url: String,
    /// Represents the timeout of a whole request, in seconds.
    pub timeout_secs: Option<u64>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            letters_url: DEFAULT_LETTERS_URL.to_owned(),
            reports_url: DEFAULT_REPORTS_URL.to_owned(),
            timeout_secs: None,
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}
