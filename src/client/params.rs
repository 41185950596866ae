//! Typed arguments for team operations
//!
//! String forms are parsed with `FromStr`, so invalid roles or permissions
//! are rejected locally with a [`ValidationError`] before any request. The
//! enums also derive `clap::ValueEnum` so the CLI accepts them directly.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Result, ValidationError};

/// An optional request argument.
///
/// `Unspecified` keeps the key out of the request body entirely, while `Null`
/// sends an explicit JSON `null` (e.g. to detach a team from its parent).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Param<T> {
    #[default]
    Unspecified,
    Null,
    Set(T),
}

impl<T: Serialize> Param<T> {
    /// Insert `key` into `body` unless unspecified.
    pub fn write_into(&self, body: &mut Map<String, Value>, key: &str) -> Result<()> {
        match self {
            Param::Unspecified => {}
            Param::Null => {
                body.insert(key.to_string(), Value::Null);
            }
            Param::Set(value) => {
                body.insert(key.to_string(), serde_json::to_value(value)?);
            }
        }
        Ok(())
    }
}

impl<T> From<Option<T>> for Param<T> {
    /// `None` maps to an explicit null, not to "unspecified".
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Param::Set(v),
            None => Param::Null,
        }
    }
}

/// Role of a user within a team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MembershipRole {
    #[default]
    Member,
    Maintainer,
}

impl MembershipRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipRole::Member => "member",
            MembershipRole::Maintainer => "maintainer",
        }
    }
}

impl FromStr for MembershipRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "member" => Ok(MembershipRole::Member),
            "maintainer" => Ok(MembershipRole::Maintainer),
            _ => Err(ValidationError::InvalidValue {
                field: "role",
                value: s.to_string(),
                expected: "one of: member, maintainer",
            }),
        }
    }
}

/// Role filter for listing team members
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum MemberRoleFilter {
    Member,
    Maintainer,
    All,
}

impl MemberRoleFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRoleFilter::Member => "member",
            MemberRoleFilter::Maintainer => "maintainer",
            MemberRoleFilter::All => "all",
        }
    }
}

impl FromStr for MemberRoleFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "member" => Ok(MemberRoleFilter::Member),
            "maintainer" => Ok(MemberRoleFilter::Maintainer),
            "all" => Ok(MemberRoleFilter::All),
            _ => Err(ValidationError::InvalidValue {
                field: "role filter",
                value: s.to_string(),
                expected: "one of: member, maintainer, all",
            }),
        }
    }
}

/// Permission a team holds on a repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RepoPermission {
    Pull,
    Triage,
    Push,
    Maintain,
    Admin,
}

impl RepoPermission {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepoPermission::Pull => "pull",
            RepoPermission::Triage => "triage",
            RepoPermission::Push => "push",
            RepoPermission::Maintain => "maintain",
            RepoPermission::Admin => "admin",
        }
    }
}

impl FromStr for RepoPermission {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pull" => Ok(RepoPermission::Pull),
            "triage" => Ok(RepoPermission::Triage),
            "push" => Ok(RepoPermission::Push),
            "maintain" => Ok(RepoPermission::Maintain),
            "admin" => Ok(RepoPermission::Admin),
            _ => Err(ValidationError::InvalidValue {
                field: "permission",
                value: s.to_string(),
                expected: "one of: pull, triage, push, maintain, admin",
            }),
        }
    }
}

/// Team visibility within its organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TeamPrivacy {
    Secret,
    Closed,
}

impl TeamPrivacy {
    pub fn as_str(&self) -> &'static str {
        match self {
            TeamPrivacy::Secret => "secret",
            TeamPrivacy::Closed => "closed",
        }
    }
}

impl FromStr for TeamPrivacy {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "secret" => Ok(TeamPrivacy::Secret),
            "closed" => Ok(TeamPrivacy::Closed),
            _ => Err(ValidationError::InvalidValue {
                field: "privacy",
                value: s.to_string(),
                expected: "one of: secret, closed",
            }),
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(MembershipRole, MemberRoleFilter, RepoPermission, TeamPrivacy);

/// Arguments for `PATCH /teams/:id`.
///
/// The name is always sent; every other field is sent only when supplied.
///
/// # Example
/// ```ignore
/// let edit = EditTeam::new("Justice League")
///     .description("Fighting for justice")
///     .privacy(TeamPrivacy::Closed);
/// team.edit(edit).await?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTeam {
    pub name: String,
    pub description: Param<String>,
    pub permission: Param<RepoPermission>,
    pub privacy: Param<TeamPrivacy>,
    pub parent_team_id: Param<u64>,
}

impl EditTeam {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: Param::Unspecified,
            permission: Param::Unspecified,
            privacy: Param::Unspecified,
            parent_team_id: Param::Unspecified,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Param::Set(description.into());
        self
    }

    pub fn permission(mut self, permission: RepoPermission) -> Self {
        self.permission = Param::Set(permission);
        self
    }

    pub fn privacy(mut self, privacy: TeamPrivacy) -> Self {
        self.privacy = Param::Set(privacy);
        self
    }

    /// Nest the team under another team.
    pub fn parent_team_id(mut self, id: u64) -> Self {
        self.parent_team_id = Param::Set(id);
        self
    }

    /// Move the team back to the top level.
    pub fn no_parent(mut self) -> Self {
        self.parent_team_id = Param::Null;
        self
    }

    /// Validate and build the request body.
    pub fn to_body(&self) -> Result<Value> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }

        let mut body = Map::new();
        body.insert("name".to_string(), Value::String(self.name.clone()));
        self.description.write_into(&mut body, "description")?;
        self.permission.write_into(&mut body, "permission")?;
        self.privacy.write_into(&mut body, "privacy")?;
        self.parent_team_id.write_into(&mut body, "parent_team_id")?;
        Ok(Value::Object(body))
    }
}
