pub mod identity;

pub use self::identity::{Error, Identity, IdentityStore, Result};
