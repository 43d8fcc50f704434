pub mod config;

pub use self::config::{AccountConfig, DEFAULT_MAX_BODY_LEN, DEFAULT_MIN_BODY_LEN};
