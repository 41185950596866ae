//! Display model implementations for table and JSON output
//!
//! Display models transform entities into CLI-friendly formats with
//! appropriate column names and serialization.

mod common;
mod repo;
mod team;
mod user;

pub use repo::RepoDisplay;
pub use team::{TeamDisplay, team_record};
pub use user::{MemberDisplay, MembershipDisplay};
