//! GitHub organization

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use super::{Resource, append_segments};
use crate::client::{Attribute, Completable, CompletionState, Requester};
use crate::error::{Result, ValidationError};

/// Organization owning a team.
#[derive(Clone, Serialize)]
pub struct Organization {
    #[serde(skip)]
    state: CompletionState,

    #[serde(skip_serializing_if = "Attribute::is_unset")]
    pub(crate) login: Attribute<String>,
    #[serde(skip_serializing_if = "Attribute::is_unset")]
    pub(crate) id: Attribute<u64>,
    #[serde(skip_serializing_if = "Attribute::is_unset")]
    pub(crate) name: Attribute<String>,
    #[serde(skip_serializing_if = "Attribute::is_unset")]
    pub(crate) description: Attribute<String>,
    #[serde(skip_serializing_if = "Attribute::is_unset")]
    pub(crate) url: Attribute<String>,
    #[serde(skip_serializing_if = "Attribute::is_unset")]
    pub(crate) html_url: Attribute<String>,
    #[serde(skip_serializing_if = "Attribute::is_unset")]
    pub(crate) public_repos: Attribute<u64>,
    #[serde(skip_serializing_if = "Attribute::is_unset")]
    pub(crate) created_at: Attribute<DateTime<Utc>>,
}

impl Organization {
    fn empty(requester: Arc<dyn Requester>, completed: bool) -> Self {
        Self {
            state: CompletionState::new(requester, completed),
            login: Attribute::Unset,
            id: Attribute::Unset,
            name: Attribute::Unset,
            description: Attribute::Unset,
            url: Attribute::Unset,
            html_url: Attribute::Unset,
            public_repos: Attribute::Unset,
            created_at: Attribute::Unset,
        }
    }

    pub async fn login(&mut self) -> Result<Option<&str>> {
        self.complete_if_not_set(self.login.is_set()).await?;
        self.login.as_str()
    }

    pub async fn id(&mut self) -> Result<Option<u64>> {
        self.complete_if_not_set(self.id.is_set()).await?;
        self.id.copied()
    }

    pub async fn name(&mut self) -> Result<Option<&str>> {
        self.complete_if_not_set(self.name.is_set()).await?;
        self.name.as_str()
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

    pub async fn public_repos(&mut self) -> Result<Option<u64>> {
        self.complete_if_not_set(self.public_repos.is_set()).await?;
        self.public_repos.copied()
    }

    pub async fn created_at(&mut self) -> Result<Option<DateTime<Utc>>> {
        self.complete_if_not_set(self.created_at.is_set()).await?;
        Ok(self.created_at.value()?.copied())
    }
}

impl Completable for Organization {
    const KIND: &'static str = "Organization";

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
        let login = self
            .login
            .known()
            .ok_or(ValidationError::MissingIdentity("Organization"))?;
        append_segments(self.state.requester().base_url(), &["orgs", login.as_str()])
    }

    fn apply_fields(&mut self, fields: &Map<String, Value>) {
        if let Some(v) = fields.get("login") {
            self.login = Attribute::string("login", v);
        }
        if let Some(v) = fields.get("id") {
            self.id = Attribute::int("id", v);
        }
        if let Some(v) = fields.get("name") {
            self.name = Attribute::string("name", v);
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
        if let Some(v) = fields.get("public_repos") {
            self.public_repos = Attribute::int("public_repos", v);
        }
        if let Some(v) = fields.get("created_at") {
            self.created_at = Attribute::datetime("created_at", v);
        }
    }
}

impl Resource for Organization {
    fn from_fields(
        requester: Arc<dyn Requester>,
        fields: &Map<String, Value>,
        completed: bool,
    ) -> Self {
        let mut org = Self::empty(requester, completed);
        org.apply_fields(fields);
        org
    }
}

impl fmt::Debug for Organization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Organization(login={:?})", self.login.known())
    }
}
