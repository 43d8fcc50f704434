//! Account config module.
//!
//! This module contains the representation of the user configuration:
//! where the local identity lives, which remote collections to talk
//! to, and the tuning of the local send rules.

use log::debug;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
    result,
    time::Duration,
};
use thiserror::Error;

use crate::{BackendConfig, IdentityStore, LastSendPolicy, SeenKey, DEFAULT_COOLDOWN};

#[cfg(feature = "http-backend")]
use crate::HttpConfig;

pub const DEFAULT_MIN_BODY_LEN: usize = 51;
pub const DEFAULT_MAX_BODY_LEN: usize = 1000;

const APP_DIR: &str = "dear-stranger";
const CONFIG_FILE: &str = "config.toml";
const IDENTITY_FILE: &str = "uuid";

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read config file {1}")]
    ReadConfigFileError(#[source] std::io::Error, PathBuf),
    #[error("cannot parse config file {1}")]
    ParseConfigFileError(#[source] toml::de::Error, PathBuf),
    #[error("cannot find config directory")]
    FindConfigDirError,
}

pub type Result<T> = result::Result<T, Error>;

/// Represents the configuration of the user account.
#[derive(Debug, Default, Clone, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AccountConfig {
    /// Represents the file holding the local identity.
    pub identity_path: Option<PathBuf>,

    /// Represents the minimum interval between two unsolicited
    /// letters, in seconds.
    pub cooldown_secs: Option<u64>,
    /// Represents which sends refresh the last send time.
    pub last_send_policy: Option<LastSendPolicy>,
    /// Represents what identifies a received letter as already seen.
    pub seen_key: Option<SeenKey>,

    /// Represents the minimum number of characters of a letter.
    pub min_body_len: Option<usize>,
    /// Represents the maximum number of characters of a letter.
    pub max_body_len: Option<usize>,

    /// Represents the remote collections configuration.
    #[cfg(feature = "http-backend")]
    pub http: Option<HttpConfig>,
}

impl AccountConfig {
    /// Gets the default config file path, located in the user config
    /// directory.
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
            .ok_or(Error::FindConfigDirError)
    }

    /// Parses the config file at the given path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("reading config file {:?}", path);

        let content = fs::read_to_string(path)
            .map_err(|err| Error::ReadConfigFileError(err, path.to_owned()))?;
        Self::from_toml(&content, path)
    }

    fn from_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|err| Error::ParseConfigFileError(err, path.to_owned()))
    }

    /// Gets the identity file path. Tries to expand shell variables,
    /// falls back to the user data directory, then to the temporary
    /// directory.
    pub fn identity_path(&self) -> PathBuf {
        self.identity_path
            .as_ref()
            .and_then(|path| path.to_str())
            .and_then(|path| shellexpand::full(path).ok())
            .map(|path| PathBuf::from(path.to_string()))
            .unwrap_or_else(|| {
                dirs::data_dir()
                    .unwrap_or_else(env::temp_dir)
                    .join(APP_DIR)
                    .join(IDENTITY_FILE)
            })
    }

    pub fn identity_store(&self) -> IdentityStore {
        IdentityStore::new(self.identity_path())
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_COOLDOWN)
    }

    pub fn last_send_policy(&self) -> LastSendPolicy {
        self.last_send_policy.unwrap_or_default()
    }

    pub fn seen_key(&self) -> SeenKey {
        self.seen_key.unwrap_or_default()
    }

    pub fn min_body_len(&self) -> usize {
        self.min_body_len.unwrap_or(DEFAULT_MIN_BODY_LEN)
    }

    pub fn max_body_len(&self) -> usize {
        self.max_body_len.unwrap_or(DEFAULT_MAX_BODY_LEN)
    }

    /// Gets the backend configuration matching the account.
    pub fn backend_config(&self) -> BackendConfig {
        #[cfg(feature = "http-backend")]
        if let Some(http) = self.http.as_ref() {
            return BackendConfig::Http(http.clone());
        }

        BackendConfig::None
    }
}
