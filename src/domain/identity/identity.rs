//! Identity module.
//!
//! This module contains the representation of the local identity of
//! an installation, and the store persisting it. The identity is
//! generated once, on first use, and never rotated.

use log::{debug, warn};
use std::{
    fmt, fs,
    io::{self, prelude::*},
    ops,
    path::{Path, PathBuf},
    result,
};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot open identity file {1}")]
    OpenIdentityFileError(#[source] io::Error, PathBuf),
    #[error("cannot read identity file {1}")]
    ReadIdentityFileError(#[source] io::Error, PathBuf),
    #[error("cannot create identity directory {1}")]
    CreateIdentityDirError(#[source] io::Error, PathBuf),
    #[error("cannot write identity file {1}")]
    WriteIdentityFileError(#[source] io::Error, PathBuf),
}

pub type Result<T> = result::Result<T, Error>;

/// Represents the opaque identifier of an installation.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Identity(String);

impl Identity {
    pub fn new<I: ToString>(id: I) -> Self {
        Self(id.to_string())
    }

    /// Generates a fresh random identity.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ops::Deref for Identity {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Represents the file holding the local identity.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IdentityStore {
    path: PathBuf,
}

impl IdentityStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_owned(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored identity. Returns `None` if the file does not
    /// exist yet or holds nothing.
    pub fn read(&self) -> Result<Option<Identity>> {
        let mut file = match fs::File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(Error::OpenIdentityFileError(err, self.path.to_owned())),
        };

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|err| Error::ReadIdentityFileError(err, self.path.to_owned()))?;

        let id = content.trim();
        Ok(if id.is_empty() {
            None
        } else {
            Some(Identity::new(id))
        })
    }

    /// Writes the given identity, creating the parent directory if
    /// needed.
    pub fn write(&self, identity: &Identity) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .map_err(|err| Error::CreateIdentityDirError(err, dir.to_owned()))?;
        }

        fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .map_err(|err| Error::OpenIdentityFileError(err, self.path.to_owned()))?
            .write_all(identity.as_str().as_bytes())
            .map_err(|err| Error::WriteIdentityFileError(err, self.path.to_owned()))?;

        Ok(())
    }

    /// Gets the stored identity, or generates and stores a new one.
    /// Store failures never propagate: an unreadable store counts as
    /// an empty one, and a failed write only loses persistence.
    pub fn load_or_create(&self) -> Identity {
        match self.read() {
            Ok(Some(identity)) => {
                debug!("identity found at {:?}", self.path);
                return identity;
            }
            Ok(None) => debug!("no identity found at {:?}", self.path),
            Err(err) => warn!("cannot read identity, generating a new one: {}", err),
        }

        let identity = Identity::generate();
        if let Err(err) = self.write(&identity) {
            warn!("cannot store identity: {}", err);
        }

        identity
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use tempfile::tempdir;

    use super::{Identity, IdentityStore};

    #[test]
    fn load_or_create_persists() {
        let dir = tempdir().unwrap();
        let store = IdentityStore::new(dir.path().join("nested").join("uuid"));

        assert_eq!(None, store.read().unwrap());

        let identity = store.load_or_create();
        assert!(!identity.is_empty());
        assert_eq!(Some(identity.clone()), store.read().unwrap());
        assert_eq!(identity, store.load_or_create());
    }

    #[test]
    fn blank_file_counts_as_missing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("uuid");
        fs::write(&path, "  \n").unwrap();

        let store = IdentityStore::new(&path);
        assert_eq!(None, store.read().unwrap());

        fs::write(&path, "stored-id\n").unwrap();
        assert_eq!(Some(Identity::new("stored-id")), store.read().unwrap());
    }

    #[test]
    fn unreadable_store_regenerates() {
        let dir = tempdir().unwrap();
        // a directory cannot be read as a file
        let store = IdentityStore::new(dir.path());

        assert!(store.read().is_err());
        let identity = store.load_or_create();
        assert!(!identity.is_empty());
        assert_ne!(identity, store.load_or_create());
    }
}
