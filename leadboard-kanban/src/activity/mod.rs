//! Activity commands

mod list;

pub use list::ListActivity;
