//! Backend module.
//!
//! This module exposes the backend trait, which reads the remote
//! letters and reports collections. It can be used to create custom
//! backend implementations.

use std::result;
use thiserror::Error;

use crate::{backend, BackendConfig, Letters, Reports};

#[cfg(feature = "http-backend")]
use crate::HttpBackend;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot build backend with an empty config")]
    BuildBackendError,

    #[cfg(feature = "http-backend")]
    #[error(transparent)]
    HttpBackendError(#[from] backend::http::Error),
    #[error(transparent)]
    MemoryBackendError(#[from] backend::memory::Error),
}

pub type Result<T> = result::Result<T, Error>;

/// Reads the remote collections. Nothing is filtered remotely: both
/// methods return the whole collection.
pub trait Backend {
    fn list_letters(&self) -> Result<Letters>;
    fn list_reports(&self) -> Result<Reports>;
}

#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct BackendBuilder;

impl BackendBuilder {
    pub fn build(backend_config: &BackendConfig) -> Result<Box<dyn Backend>> {
        match backend_config {
            #[cfg(feature = "http-backend")]
            BackendConfig::Http(http_config) => Ok(Box::new(HttpBackend::new(http_config)?)),
            BackendConfig::None => Err(Error::BuildBackendError),
        }
    }
}
