//! Lead commands

mod add;
mod delete;
mod drop;
mod get;
mod list;
mod mv;

pub use add::AddLead;
pub use delete::DeleteLead;
pub use drop::DropLead;
pub use get::GetLead;
pub use list::ListLeads;
pub use mv::MoveLead;
