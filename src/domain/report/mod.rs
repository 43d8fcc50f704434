pub mod report;
pub mod reports;

pub use self::report::Report;
pub use self::reports::{excluded_for, Reports};
