pub mod account;
pub use account::*;

pub mod gate;
pub use gate::*;

pub mod identity;
pub use identity::{Identity, IdentityStore};

pub mod letter;
pub use letter::*;

pub mod mailbox;
pub use mailbox::*;

pub mod report;
pub use report::*;
