pub mod backend;
pub mod config;
pub mod records;

pub use self::backend::{Error, HttpBackend, Result};
pub use self::config::{HttpConfig, DEFAULT_LETTERS_URL, DEFAULT_REPORTS_URL};
