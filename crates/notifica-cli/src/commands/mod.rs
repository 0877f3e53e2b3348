pub mod common;
pub mod count;
pub mod list;
pub mod read;
pub mod watch;
