//! GitHub team
//!
//! Field reads go through the completion protocol: a team embedded in another
//! response (or built from an id) fetches `GET /teams/:id` the first time an
//! unknown field is read, and never again afterwards.
//!
//! Mutations never trigger completion. They address the team through its
//! `url` field when known, falling back to `/teams/:id`.

use std::fmt;
use std::sync::Arc;

use log::{debug, warn};
use reqwest::Method;
use serde::Serialize;
use serde_json::{Map, Value, json};

use super::{
    NamedUser, Organization, Repository, Resource, TeamMembership, append_segments, expect_object,
};
use crate::client::params::{EditTeam, MemberRoleFilter, MembershipRole, RepoPermission};
use crate::client::{
    Attribute, Completable, CompletionState, JsonResponse, PREVIEW_HEADERS, PaginatedList,
    Requester,
};
use crate::error::{Result, ValidationError};

/// An organization team.
#[derive(Clone, Serialize)]
pub struct Team {
    #[serde(skip)]
    state: CompletionState,

    #[serde(skip_serializing_if = "Attribute::is_unset")]
    pub(crate) id: Attribute<u64>,
    #[serde(skip_serializing_if = "Attribute::is_unset")]
    pub(crate) members_count: Attribute<u64>,
    #[serde(skip_serializing_if = "Attribute::is_unset")]
    pub(crate) members_url: Attribute<String>,
    #[serde(skip_serializing_if = "Attribute::is_unset")]
    pub(crate) name: Attribute<String>,
    #[serde(skip_serializing_if = "Attribute::is_unset")]
    pub(crate) description: Attribute<String>,
    #[serde(skip_serializing_if = "Attribute::is_unset")]
    pub(crate) permission: Attribute<String>,
    #[serde(skip_serializing_if = "Attribute::is_unset")]
    pub(crate) repos_count: Attribute<u64>,
    #[serde(skip_serializing_if = "Attribute::is_unset")]
    pub(crate) repositories_url: Attribute<String>,
    #[serde(skip_serializing_if = "Attribute::is_unset")]
    pub(crate) slug: Attribute<String>,
    #[serde(skip_serializing_if = "Attribute::is_unset")]
    pub(crate) url: Attribute<String>,
    #[serde(skip_serializing_if = "Attribute::is_unset")]
    pub(crate) organization: Attribute<Organization>,
    #[serde(skip_serializing_if = "Attribute::is_unset")]
    pub(crate) privacy: Attribute<String>,
    #[serde(skip_serializing_if = "Attribute::is_unset")]
    pub(crate) parent: Attribute<Box<Team>>,
}

/// `true` for 204, `false` otherwise. Statuses other than 404 are logged.
fn no_content(response: &JsonResponse, action: &str) -> bool {
    match response.status {
        204 => true,
        404 => false,
        status => {
            warn!(
                "{} returned unexpected status {}: {}",
                action,
                status,
                response.message()
            );
            false
        }
    }
}

impl Team {
    fn empty(requester: Arc<dyn Requester>, completed: bool) -> Self {
        Self {
            state: CompletionState::new(requester, completed),
            id: Attribute::Unset,
            members_count: Attribute::Unset,
            members_url: Attribute::Unset,
            name: Attribute::Unset,
            description: Attribute::Unset,
            permission: Attribute::Unset,
            repos_count: Attribute::Unset,
            repositories_url: Attribute::Unset,
            slug: Attribute::Unset,
            url: Attribute::Unset,
            organization: Attribute::Unset,
            privacy: Attribute::Unset,
            parent: Attribute::Unset,
        }
    }

    /// A not-yet-fetched team known only by id.
    pub fn from_id(requester: Arc<dyn Requester>, id: u64) -> Self {
        let mut team = Self::empty(requester, false);
        team.id = Attribute::Present(Some(id));
        team
    }

    /// Numeric id, without fetching.
    pub fn identity(&self) -> Option<u64> {
        self.id.known().copied()
    }

    fn requester(&self) -> Arc<dyn Requester> {
        Arc::clone(self.state.requester())
    }

    /// Team URL extended with percent-encoded path segments.
    fn endpoint(&self, segments: &[&str]) -> Result<String> {
        append_segments(&self.resource_url()?, segments)
    }

    /// `{team}/repos/{owner}/{name}`
    fn repo_endpoint(&self, repo: &Repository) -> Result<String> {
        let (owner, name) = repo.segments()?;
        self.endpoint(&["repos", owner.as_str(), name.as_str()])
    }

    // ========================================================================
    // Fields
    // ========================================================================

    pub async fn id(&mut self) -> Result<Option<u64>> {
        self.complete_if_not_set(self.id.is_set()).await?;
        self.id.copied()
    }

    pub async fn members_count(&mut self) -> Result<Option<u64>> {
        self.complete_if_not_set(self.members_count.is_set()).await?;
        self.members_count.copied()
    }

    pub async fn members_url(&mut self) -> Result<Option<&str>> {
        self.complete_if_not_set(self.members_url.is_set()).await?;
        self.members_url.as_str()
    }

    pub async fn name(&mut self) -> Result<Option<&str>> {
        self.complete_if_not_set(self.name.is_set()).await?;
        self.name.as_str()
    }

    pub async fn description(&mut self) -> Result<Option<&str>> {
        self.complete_if_not_set(self.description.is_set()).await?;
        self.description.as_str()
    }

    pub async fn permission(&mut self) -> Result<Option<&str>> {
        self.complete_if_not_set(self.permission.is_set()).await?;
        self.permission.as_str()
    }

    pub async fn repos_count(&mut self) -> Result<Option<u64>> {
        self.complete_if_not_set(self.repos_count.is_set()).await?;
        self.repos_count.copied()
    }

    pub async fn repositories_url(&mut self) -> Result<Option<&str>> {
        self.complete_if_not_set(self.repositories_url.is_set()).await?;
        self.repositories_url.as_str()
    }

    pub async fn slug(&mut self) -> Result<Option<&str>> {
        self.complete_if_not_set(self.slug.is_set()).await?;
        self.slug.as_str()
    }

    pub async fn url(&mut self) -> Result<Option<&str>> {
        self.complete_if_not_set(self.url.is_set()).await?;
        self.url.as_str()
    }

    pub async fn organization(&mut self) -> Result<Option<&Organization>> {
        self.complete_if_not_set(self.organization.is_set()).await?;
        self.organization.value()
    }

    pub async fn privacy(&mut self) -> Result<Option<&str>> {
        self.complete_if_not_set(self.privacy.is_set()).await?;
        self.privacy.as_str()
    }

    pub async fn parent(&mut self) -> Result<Option<&Team>> {
        self.complete_if_not_set(self.parent.is_set()).await?;
        Ok(self.parent.value()?.map(Box::as_ref))
    }

    // ========================================================================
    // Members
    // ========================================================================

    /// `PUT /teams/:id/members/:user`
    #[deprecated(note = "use `add_membership` instead")]
    pub async fn add_to_members(&self, member: &NamedUser) -> Result<()> {
        let url = self.endpoint(&["members", member.identity()?])?;
        self.requester()
            .request_json_and_check(Method::PUT, &url, None, &[])
            .await?;
        Ok(())
    }

    /// `PUT /teams/:id/memberships/:user`. The role defaults to `member`.
    pub async fn add_membership(
        &self,
        member: &NamedUser,
        role: Option<MembershipRole>,
    ) -> Result<TeamMembership> {
        let url = self.endpoint(&["memberships", member.identity()?])?;
        let body = json!({ "role": role.unwrap_or_default().as_str() });
        let requester = self.requester();
        let response = requester
            .request_json_and_check(Method::PUT, &url, Some(&body), PREVIEW_HEADERS)
            .await?;
        let fields = expect_object(&response, "team membership")?;
        Ok(TeamMembership::from_fields(requester, fields, true))
    }

    /// `GET /teams/:id/memberships/:user`
    pub async fn get_membership(&self, member: &NamedUser) -> Result<TeamMembership> {
        let url = self.endpoint(&["memberships", member.identity()?])?;
        let requester = self.requester();
        let response = requester
            .request_json_and_check(Method::GET, &url, None, PREVIEW_HEADERS)
            .await?;
        let fields = expect_object(&response, "team membership")?;
        Ok(TeamMembership::from_fields(requester, fields, true))
    }

    /// `GET /teams/:id/members`, optionally filtered by role.
    pub fn get_members(&self, role: Option<MemberRoleFilter>) -> Result<PaginatedList<NamedUser>> {
        let url = self.endpoint(&["members"])?;
        let query = role
            .map(|r| vec![("role", r.as_str().to_string())])
            .unwrap_or_default();
        Ok(PaginatedList::new(self.requester(), url, query, PREVIEW_HEADERS))
    }

    /// `GET /teams/:id/members/:user`; `true` iff the server answers 204.
    pub async fn has_in_members(&self, member: &NamedUser) -> Result<bool> {
        let url = self.endpoint(&["members", member.identity()?])?;
        let response = self
            .requester()
            .request_json(Method::GET, &url, None, &[])
            .await?;
        Ok(no_content(&response, "Membership check"))
    }

    /// `DELETE /teams/:id/memberships/:user`; `true` iff the server answers 204.
    pub async fn remove_membership(&self, member: &NamedUser) -> Result<bool> {
        let url = self.endpoint(&["memberships", member.identity()?])?;
        let response = self
            .requester()
            .request_json(Method::DELETE, &url, None, PREVIEW_HEADERS)
            .await?;
        Ok(no_content(&response, "Membership removal"))
    }

    /// `DELETE /teams/:id/members/:user`
    #[deprecated(note = "use `remove_membership` instead")]
    pub async fn remove_from_members(&self, member: &NamedUser) -> Result<()> {
        let url = self.endpoint(&["members", member.identity()?])?;
        self.requester()
            .request_json_and_check(Method::DELETE, &url, None, &[])
            .await?;
        Ok(())
    }

    // ========================================================================
    // Repositories
    // ========================================================================

    /// `PUT /teams/:id/repos/:owner/:repo`
    pub async fn add_to_repos(&self, repo: &Repository) -> Result<()> {
        let url = self.repo_endpoint(repo)?;
        self.requester()
            .request_json_and_check(Method::PUT, &url, None, PREVIEW_HEADERS)
            .await?;
        Ok(())
    }

    /// `PUT /teams/:id/repos/:owner/:repo` with a permission body
    pub async fn set_repo_permission(
        &self,
        repo: &Repository,
        permission: RepoPermission,
    ) -> Result<()> {
        let url = self.repo_endpoint(repo)?;
        let body = json!({ "permission": permission.as_str() });
        self.requester()
            .request_json_and_check(Method::PUT, &url, Some(&body), PREVIEW_HEADERS)
            .await?;
        Ok(())
    }

    /// `GET /teams/:id/repos`
    pub fn get_repos(&self) -> Result<PaginatedList<Repository>> {
        let url = self.endpoint(&["repos"])?;
        Ok(PaginatedList::new(self.requester(), url, Vec::new(), PREVIEW_HEADERS))
    }

    /// `GET /teams/:id/repos/:owner/:repo`; `true` iff the server answers 204.
    pub async fn has_in_repos(&self, repo: &Repository) -> Result<bool> {
        let url = self.repo_endpoint(repo)?;
        let response = self
            .requester()
            .request_json(Method::GET, &url, None, PREVIEW_HEADERS)
            .await?;
        Ok(no_content(&response, "Repository check"))
    }

    /// `DELETE /teams/:id/repos/:owner/:repo`
    pub async fn remove_from_repos(&self, repo: &Repository) -> Result<()> {
        let url = self.repo_endpoint(repo)?;
        self.requester()
            .request_json_and_check(Method::DELETE, &url, None, PREVIEW_HEADERS)
            .await?;
        Ok(())
    }

    // ========================================================================
    // Team itself
    // ========================================================================

    /// `GET /teams/:id/teams`
    pub fn get_subteams(&self) -> Result<PaginatedList<Team>> {
        let url = self.endpoint(&["teams"])?;
        Ok(PaginatedList::new(self.requester(), url, Vec::new(), PREVIEW_HEADERS))
    }

    /// `PATCH /teams/:id`, then refresh fields from the response.
    pub async fn edit(&mut self, edit: EditTeam) -> Result<()> {
        let body = edit.to_body()?;
        let url = self.resource_url()?;
        let response = self
            .requester()
            .request_json_and_check(Method::PATCH, &url, Some(&body), PREVIEW_HEADERS)
            .await?;
        let fields = expect_object(&response, "team")?;
        self.apply_fields(fields);
        debug!("Edited team {}", url);
        Ok(())
    }

    /// `DELETE /teams/:id`; `true` iff the server answers 204.
    pub async fn delete(&self) -> Result<bool> {
        let url = self.resource_url()?;
        let response = self
            .requester()
            .request_json(Method::DELETE, &url, None, PREVIEW_HEADERS)
            .await?;
        Ok(no_content(&response, "Team deletion"))
    }
}

impl Completable for Team {
    const KIND: &'static str = "Team";

    fn state(&self) -> &CompletionState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut CompletionState {
        &mut self.state
    }

    fn resource_url(&self) -> Result<String> {
        if let Some(url) = self.url.known() {
            return Ok(url.clone());
        }
        let id = self
            .identity()
            .ok_or(ValidationError::MissingIdentity("Team"))?;
        append_segments(self.state.requester().base_url(), &["teams", id.to_string().as_str()])
    }

    fn apply_fields(&mut self, fields: &Map<String, Value>) {
        if let Some(v) = fields.get("id") {
            self.id = Attribute::int("id", v);
        }
        if let Some(v) = fields.get("members_count") {
            self.members_count = Attribute::int("members_count", v);
        }
        if let Some(v) = fields.get("members_url") {
            self.members_url = Attribute::string("members_url", v);
        }
        if let Some(v) = fields.get("name") {
            self.name = Attribute::string("name", v);
        }
        if let Some(v) = fields.get("description") {
            self.description = Attribute::string("description", v);
        }
        if let Some(v) = fields.get("permission") {
            self.permission = Attribute::string("permission", v);
        }
        if let Some(v) = fields.get("repos_count") {
            self.repos_count = Attribute::int("repos_count", v);
        }
        if let Some(v) = fields.get("repositories_url") {
            self.repositories_url = Attribute::string("repositories_url", v);
        }
        if let Some(v) = fields.get("slug") {
            self.slug = Attribute::string("slug", v);
        }
        if let Some(v) = fields.get("url") {
            self.url = Attribute::string("url", v);
        }
        if let Some(v) = fields.get("organization") {
            let requester = self.requester();
            self.organization = Attribute::entity("organization", v, |obj| {
                Organization::from_fields(requester, obj, false)
            });
        }
        if let Some(v) = fields.get("privacy") {
            self.privacy = Attribute::string("privacy", v);
        }
        if let Some(v) = fields.get("parent") {
            let requester = self.requester();
            self.parent = Attribute::entity("parent", v, |obj| {
                Box::new(Team::from_fields(requester, obj, false))
            });
        }
    }
}

impl Resource for Team {
    fn from_fields(
        requester: Arc<dyn Requester>,
        fields: &Map<String, Value>,
        completed: bool,
    ) -> Self {
        let mut team = Self::empty(requester, completed);
        team.apply_fields(fields);
        team
    }
}

impl fmt::Debug for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Team(id={:?}, name={:?}, parent={:?})",
            self.id.known(),
            self.name.known(),
            self.parent.known()
        )
    }
}
