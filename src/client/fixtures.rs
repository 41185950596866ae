//! Test fixtures and builders for API payloads
//!
//! Builders produce the JSON the GitHub API would send, with sensible
//! defaults, so tests can feed entities and mocks realistic data.
//! Import via `use crate::client::fixtures::*` in test modules.

#![allow(dead_code)] // Builder methods are available for future tests

use serde_json::{Map, Value, json};

const API: &str = "https://api.github.com";

// ============================================================================
// UserJson
// ============================================================================

/// Builder for user payloads.
///
/// # Example
/// ```ignore
/// let user = UserJson::new("octocat")
///     .name("The Octocat")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct UserJson {
    login: String,
    id: u64,
    name: Option<String>,
    email: Option<String>,
}

impl UserJson {
    pub fn new(login: impl Into<String>) -> Self {
        let login = login.into();
        Self {
            id: 1000 + login.len() as u64,
            login,
            name: None,
            email: None,
        }
    }

    pub fn id(mut self, id: u64) -> Self {
        self.id = id;
        self
    }

    /// Set the display name (detail representation only).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the public email (detail representation only).
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn build(self) -> Value {
        let mut user = json!({
            "login": self.login,
            "id": self.id,
            "url": format!("{}/users/{}", API, self.login),
            "html_url": format!("https://github.com/{}", self.login),
            "type": "User",
            "site_admin": false
        });
        insert_opt(&mut user, "name", self.name);
        insert_opt(&mut user, "email", self.email);
        user
    }
}

// ============================================================================
// RepoJson
// ============================================================================

/// Builder for repository payloads.
#[derive(Debug, Clone)]
pub struct RepoJson {
    owner: String,
    name: String,
    id: u64,
    private: bool,
    default_branch: Option<String>,
}

impl RepoJson {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            id: 3544490,
            private: false,
            default_branch: None,
        }
    }

    pub fn private(mut self, private: bool) -> Self {
        self.private = private;
        self
    }

    /// Set the default branch (detail representation only).
    pub fn default_branch(mut self, branch: impl Into<String>) -> Self {
        self.default_branch = Some(branch.into());
        self
    }

    pub fn build(self) -> Value {
        let full_name = format!("{}/{}", self.owner, self.name);
        let mut repo = json!({
            "id": self.id,
            "name": self.name,
            "full_name": full_name,
            "owner": UserJson::new(self.owner.as_str()).build(),
            "private": self.private,
            "url": format!("{}/repos/{}", API, full_name),
            "html_url": format!("https://github.com/{}", full_name)
        });
        insert_opt(&mut repo, "default_branch", self.default_branch);
        repo
    }
}

// ============================================================================
// TeamJson
// ============================================================================

/// Builder for team payloads.
///
/// The plain build matches a team as listed or embedded; `detailed()` adds
/// the fields only `GET /teams/:id` returns.
///
/// # Example
/// ```ignore
/// let team = TeamJson::new(189850).detailed().parent(42).build();
/// ```
#[derive(Debug, Clone)]
pub struct TeamJson {
    id: u64,
    name: String,
    description: Option<String>,
    parent: Option<u64>,
    detailed: bool,
}

impl TeamJson {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            name: format!("Team {}", id),
            description: None,
            parent: None,
            detailed: false,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Embed a parent team fragment.
    pub fn parent(mut self, id: u64) -> Self {
        self.parent = Some(id);
        self
    }

    /// Include counts, privacy and the owning organization.
    pub fn detailed(mut self) -> Self {
        self.detailed = true;
        self
    }

    pub fn build(self) -> Value {
        let url = format!("{}/teams/{}", API, self.id);
        let mut team = json!({
            "id": self.id,
            "url": url,
            "name": self.name,
            "slug": self.name.to_lowercase().replace(' ', "-"),
            "permission": "pull",
            "members_url": format!("{}/members{{/member}}", url),
            "repositories_url": format!("{}/repos", url)
        });
        if let Some(description) = self.description {
            set(&mut team, "description", Value::from(description));
        }
        if let Some(parent) = self.parent {
            set(&mut team, "parent", TeamJson::new(parent).build());
        }
        if self.detailed {
            set(&mut team, "members_count", json!(1));
            set(&mut team, "repos_count", json!(0));
            set(&mut team, "privacy", json!("closed"));
            set(&mut team, "organization", org_json("BeaverSoftware"));
            if !team["description"].is_string() {
                set(&mut team, "description", Value::Null);
            }
        }
        team
    }
}

// ============================================================================
// Other payloads
// ============================================================================

/// Organization fragment as embedded in a team.
pub fn org_json(login: &str) -> Value {
    json!({
        "login": login,
        "id": 1424031,
        "url": format!("{}/orgs/{}", API, login),
        "description": null
    })
}

/// Team membership record.
pub fn membership_json(team_id: u64, login: &str, role: &str, state: &str) -> Value {
    json!({
        "url": format!("{}/teams/{}/memberships/{}", API, team_id, login),
        "role": role,
        "state": state
    })
}

fn object(value: &mut Value) -> &mut Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => unreachable!("fixtures always build objects"),
    }
}

fn set(value: &mut Value, key: &str, field: Value) {
    object(value).insert(key.to_string(), field);
}

fn insert_opt(value: &mut Value, key: &str, field: Option<String>) {
    if let Some(field) = field {
        set(value, key, Value::from(field));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_fragment_omits_detail_fields() {
        let team = TeamJson::new(7).build();
        assert_eq!(team["slug"], "team-7");
        assert!(team.get("members_count").is_none());
        assert!(team.get("organization").is_none());
    }

    #[test]
    fn test_detailed_team_keeps_explicit_description() {
        let team = TeamJson::new(7).description("x").detailed().build();
        assert_eq!(team["description"], "x");
        assert_eq!(team["organization"]["login"], "BeaverSoftware");

        let plain = TeamJson::new(7).detailed().build();
        assert!(plain["description"].is_null());
    }

    #[test]
    fn test_repo_owner_is_embedded_user() {
        let repo = RepoJson::new("o", "n").build();
        assert_eq!(repo["owner"]["login"], "o");
        assert_eq!(repo["url"], "https://api.github.com/repos/o/n");
        assert!(repo.get("default_branch").is_none());
    }
}
