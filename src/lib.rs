pub mod backend;
pub use backend::*;

pub mod sender;
pub use sender::*;

pub mod domain;
pub use domain::*;

pub mod session;
pub use session::{RefreshToken, SendOutcome, Session, SessionState};
