mod backend;
mod config;

#[cfg(feature = "http-backend")]
pub mod http;
pub mod memory;

pub use self::backend::{Backend, BackendBuilder, Error, Result};
pub use self::config::BackendConfig;
#[cfg(feature = "http-backend")]
pub use self::http::{HttpBackend, HttpConfig};
pub use self::memory::MemoryBackend;
