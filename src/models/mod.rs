//! Display models for CLI output
//!
//! Converts client entities into CLI-friendly rows without touching the
//! network: only fields already known are shown.

pub mod display;

pub use display::{MemberDisplay, MembershipDisplay, RepoDisplay, TeamDisplay};
