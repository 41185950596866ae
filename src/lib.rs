//! Typed bindings for GitHub organization teams.
//!
//! Entities such as [`Team`] are built from whatever JSON the API returned
//! and fetch their full representation lazily, the first time a field that
//! was not part of that JSON is read:
//!
//! ```no_run
//! use std::sync::Arc;
//! use ghteam::{GithubClient, Requester, Team};
//!
//! # async fn demo() -> ghteam::Result<()> {
//! let client: Arc<dyn Requester> = Arc::new(GithubClient::new(Some("token".into()), None)?);
//! let mut team = Team::from_id(client, 189850);
//! println!("{:?}", team.members_count().await?); // one GET /teams/189850
//! println!("{:?}", team.privacy().await?); // no request
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
mod models;
mod output;

pub use client::models::{NamedUser, Organization, Repository, Resource, Team, TeamMembership};
pub use client::params::{
    EditTeam, MemberRoleFilter, MembershipRole, Param, RepoPermission, TeamPrivacy,
};
pub use client::{Attribute, Completable, GithubClient, JsonResponse, PaginatedList, Requester};
pub use error::{Error, Result};
