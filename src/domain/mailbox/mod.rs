pub mod mailbox;
pub mod receive;
pub mod thread;

pub use self::mailbox::{project, Mailbox};
pub use self::receive::{select_unseen, SeenKey, SeenLetters};
pub use self::thread::Threads;
