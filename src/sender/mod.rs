mod sender;

pub use self::sender::{Error, Result, Sender, SenderBuilder};
