//! Memory backend module.
//!
//! This module contains a backend keeping both collections in memory.
//! Clones share the same store, so one clone can be used as backend
//! and another one as sender.

use log::debug;
use std::{
    result,
    sync::{Arc, RwLock},
};
use thiserror::Error;
use uuid::Uuid;

use crate::{backend, sender, Backend, Draft, Letter, Letters, Report, Reports, Sender};

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot lock memory store")]
    LockStoreError,
}

pub type Result<T> = result::Result<T, Error>;

#[derive(Debug, Default)]
struct Store {
    letters: Letters,
    reports: Reports,
}

#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    store: Arc<RwLock<Store>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a letter as is, keeping its identifier.
    pub fn add_letter(&self, letter: Letter) -> Result<()> {
        self.store
            .write()
            .map_err(|_| Error::LockStoreError)?
            .letters
            .push(letter);
        Ok(())
    }

    pub fn add_report(&self, report: Report) -> Result<()> {
        self.store
            .write()
            .map_err(|_| Error::LockStoreError)?
            .reports
            .push(report);
        Ok(())
    }

    fn letters(&self) -> Result<Letters> {
        Ok(self
            .store
            .read()
            .map_err(|_| Error::LockStoreError)?
            .letters
            .clone())
    }

    fn reports(&self) -> Result<Reports> {
        Ok(self
            .store
            .read()
            .map_err(|_| Error::LockStoreError)?
            .reports
            .clone())
    }
}

impl Backend for MemoryBackend {
    fn list_letters(&self) -> backend::Result<Letters> {
        Ok(self.letters()?)
    }

    fn list_reports(&self) -> backend::Result<Reports> {
        Ok(self.reports()?)
    }
}

impl Sender for MemoryBackend {
    fn send_letter(&mut self, sender_id: &str, draft: &Draft, timestamp: i64) -> sender::Result<()> {
        let letter = draft.to_letter(Uuid::new_v4(), sender_id, timestamp);
        debug!("storing letter {}", letter.id);
        self.add_letter(letter)?;
        Ok(())
    }

    fn send_report(&mut self, report: &Report) -> sender::Result<()> {
        debug!("storing report of letter {}", report.letter_id);
        self.add_report(report.clone())?;
        Ok(())
    }
}
