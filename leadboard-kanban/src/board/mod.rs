//! Board commands

mod get;
mod init;
mod load;

pub(crate) use get::column_view;
pub use get::{snapshot, GetBoard};
pub use init::InitBoard;
pub use load::LoadBoard;
