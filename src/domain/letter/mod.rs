pub mod draft;
pub mod letter;
pub mod letters;

pub use self::draft::{Draft, Error, Result, DEFAULT_HUE};
pub use self::letter::Letter;
pub use self::letters::Letters;
