//! Backend config module.
//!
//! This module contains the representation of the backend
//! configuration of the user account.

#[cfg(feature = "http-backend")]
use crate::HttpConfig;

/// Represents the backend configuration of the user account.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum BackendConfig {
    None,
    #[cfg(feature = "http-backend")]
    Http(HttpConfig),
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::None
    }
}
