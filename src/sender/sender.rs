//! Sender module.
//!
//! This module contains the sender interface, which writes to the
//! remote letters and reports collections.

use std::result;
use thiserror::Error;

use crate::{backend, BackendConfig, Draft, Report};

#[cfg(feature = "http-backend")]
use crate::HttpBackend;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot build sender with an empty config")]
    BuildSenderError,

    #[cfg(feature = "http-backend")]
    #[error(transparent)]
    HttpSenderError(#[from] backend::http::Error),
    #[error(transparent)]
    MemorySenderError(#[from] backend::memory::Error),
}

pub type Result<T> = result::Result<T, Error>;

pub trait Sender {
    /// Posts a new letter written by `sender_id` at `timestamp`
    /// (milliseconds since epoch). The store assigns the identifier.
    fn send_letter(&mut self, sender_id: &str, draft: &Draft, timestamp: i64) -> Result<()>;
    fn send_report(&mut self, report: &Report) -> Result<()>;
}

#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct SenderBuilder;

impl SenderBuilder {
    pub fn build(backend_config: &BackendConfig) -> Result<Box<dyn Sender>> {
        match backend_config {
            #[cfg(feature = "http-backend")]
            BackendConfig::Http(http_config) => Ok(Box::new(HttpBackend::new(http_config)?)),
            BackendConfig::None => Err(Error::BuildSenderError),
        }
    }
}
