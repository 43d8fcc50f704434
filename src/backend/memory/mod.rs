pub mod backend;

pub use self::backend::{Error, MemoryBackend, Result};
