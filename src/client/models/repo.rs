//! GitHub repository

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use super::{NamedUser, Resource, append_segments, is_plain_segment};
use crate::client::{Attribute, Completable, CompletionState, Requester};
use crate::error::{Result, ValidationError};

/// Split `owner/name` into two path segments.
fn split_full_name(full_name: &str) -> Result<(&str, &str)> {
    full_name
        .split_once('/')
        .filter(|(owner, name)| {
            is_plain_segment(owner) && is_plain_segment(name) && !name.contains('/')
        })
        .ok_or_else(|| {
            ValidationError::InvalidValue {
                field: "repository",
                value: full_name.to_string(),
                expected: "owner/name",
            }
            .into()
        })
}

/// A repository, addressed as `owner/name`.
#[derive(Clone, Serialize)]
pub struct Repository {
    #[serde(skip)]
    state: CompletionState,

    #[serde(skip_serializing_if = "Attribute::is_unset")]
    pub(crate) id: Attribute<u64>,
    #[serde(skip_serializing_if = "Attribute::is_unset")]
    pub(crate) name: Attribute<String>,
    #[serde(skip_serializing_if = "Attribute::is_unset")]
    pub(crate) full_name: Attribute<String>,
    #[serde(skip_serializing_if = "Attribute::is_unset")]
    pub(crate) owner: Attribute<NamedUser>,
    #[serde(skip_serializing_if = "Attribute::is_unset")]
    pub(crate) private: Attribute<bool>,
    #[serde(skip_serializing_if = "Attribute::is_unset")]
    pub(crate) description: Attribute<String>,
    #[serde(skip_serializing_if = "Attribute::is_unset")]
    pub(crate) url: Attribute<String>,
    #[serde(skip_serializing_if = "Attribute::is_unset")]
    pub(crate) html_url: Attribute<String>,
    #[serde(skip_serializing_if = "Attribute::is_unset")]
    pub(crate) default_branch: Attribute<String>,
}

impl Repository {
    fn empty(requester: Arc<dyn Requester>, completed: bool) -> Self {
        Self {
            state: CompletionState::new(requester, completed),
            id: Attribute::Unset,
            name: Attribute::Unset,
            full_name: Attribute::Unset,
            owner: Attribute::Unset,
            private: Attribute::Unset,
            description: Attribute::Unset,
            url: Attribute::Unset,
            html_url: Attribute::Unset,
            default_branch: Attribute::Unset,
        }
    }

    /// A not-yet-fetched repository known only by `owner/name`.
    pub fn from_full_name(requester: Arc<dyn Requester>, full_name: &str) -> Result<Self> {
        let (owner, name) = split_full_name(full_name)?;

        let mut repo = Self::empty(requester, false);
        repo.full_name = Attribute::Present(Some(full_name.to_string()));
        repo.name = Attribute::Present(Some(name.to_string()));
        let owner_fields = Map::from_iter([("login".to_string(), Value::from(owner))]);
        repo.owner = Attribute::Present(Some(NamedUser::from_fields(
            Arc::clone(repo.state.requester()),
            &owner_fields,
            false,
        )));
        Ok(repo)
    }

    /// `owner/name` used in URLs, without fetching.
    pub fn identity(&self) -> Result<String> {
        let full_name = match (self.full_name.known(), self.owner.known(), self.name.known()) {
            (Some(full_name), _, _) => full_name.clone(),
            (None, Some(owner), Some(name)) => format!("{}/{}", owner.identity()?, name),
            _ => return Err(ValidationError::MissingIdentity("Repository").into()),
        };
        split_full_name(&full_name)?;
        Ok(full_name)
    }

    /// Owner and name as separate path segments.
    pub(crate) fn segments(&self) -> Result<(String, String)> {
        let full_name = self.identity()?;
        let (owner, name) = split_full_name(&full_name)?;
        Ok((owner.to_string(), name.to_string()))
    }

    pub async fn id(&mut self) -> Result<Option<u64>> {
        self.complete_if_not_set(self.id.is_set()).await?;
        self.id.copied()
    }

    pub async fn name(&mut self) -> Result<Option<&str>> {
        self.complete_if_not_set(self.name.is_set()).await?;
        self.name.as_str()
    }

    pub async fn full_name(&mut self) -> Result<Option<&str>> {
        self.complete_if_not_set(self.full_name.is_set()).await?;
        self.full_name.as_str()
    }

    pub async fn owner(&mut self) -> Result<Option<&NamedUser>> {
        self.complete_if_not_set(self.owner.is_set()).await?;
        self.owner.value()
    }

    pub async fn private(&mut self) -> Result<Option<bool>> {
        self.complete_if_not_set(self.private.is_set()).await?;
        self.private.copied()
    }

    pub async fn description(&mut self) -> Result<Option<&str>> {
        self.complete_if_not_set(self.description.is_set()).await?;
        self.description.as_str()
    }

    pub async fn url(&mut self) -> Result<Option<&str>> {
        self.complete_if_not_set(self.url.is_set()).await?;
        self.url.as_str()
    }

    pub async fn html_url(&mut self) -> Result<Option<&str>> {
        self.complete_if_not_set(self.html_url.is_set()).await?;
        self.html_url.as_str()
    }

    pub async fn default_branch(&mut self) -> Result<Option<&str>> {
        self.complete_if_not_set(self.default_branch.is_set()).await?;
        self.default_branch.as_str()
    }
}

impl Completable for Repository {
    const KIND: &'static str = "Repository";

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
        let (owner, name) = self.segments()?;
        append_segments(self.state.requester().base_url(), &["repos", owner.as_str(), name.as_str()])
    }

    fn apply_fields(&mut self, fields: &Map<String, Value>) {
        if let Some(v) = fields.get("id") {
            self.id = Attribute::int("id", v);
        }
        if let Some(v) = fields.get("name") {
            self.name = Attribute::string("name", v);
        }
        if let Some(v) = fields.get("full_name") {
            self.full_name = Attribute::string("full_name", v);
        }
        if let Some(v) = fields.get("owner") {
            let requester = Arc::clone(self.state.requester());
            self.owner = Attribute::entity("owner", v, |obj| {
                NamedUser::from_fields(requester, obj, false)
            });
        }
        if let Some(v) = fields.get("private") {
            self.private = Attribute::bool("private", v);
        }
        if let Some(v) = fields.get("description") {
            self.description = Attribute::string("description", v);
        }
        if let Some(v) = fields.get("url") {
            self.url = Attribute::string("url", v);
        }
        if let Some(v) = fields.get("html_url") {
            self.html_url = Attribute::string("html_url", v);
        }
        if let Some(v) = fields.get("default_branch") {
            self.default_branch = Attribute::string("default_branch", v);
        }
    }
}

impl Resource for Repository {
    fn from_fields(
        requester: Arc<dyn Requester>,
        fields: &Map<String, Value>,
        completed: bool,
    ) -> Self {
        let mut repo = Self::empty(requester, completed);
        repo.apply_fields(fields);
        repo
    }
}

impl fmt::Debug for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Repository(full_name={:?})", self.full_name.known())
    }
}
