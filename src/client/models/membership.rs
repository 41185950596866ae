//! A user's membership in a team

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use super::Resource;
use crate::client::{Attribute, Completable, CompletionState, Requester};
use crate::error::{Result, ValidationError};

/// Membership record returned by the team membership endpoints.
#[derive(Clone, Serialize)]
pub struct TeamMembership {
    #[serde(skip)]
    state: CompletionState,

    #[serde(skip_serializing_if = "Attribute::is_unset")]
    pub(crate) url: Attribute<String>,
    #[serde(skip_serializing_if = "Attribute::is_unset")]
    pub(crate) role: Attribute<String>,
    #[serde(rename = "state", skip_serializing_if = "Attribute::is_unset")]
    pub(crate) state_name: Attribute<String>,
}

impl TeamMembership {
    pub async fn url(&mut self) -> Result<Option<&str>> {
        self.complete_if_not_set(self.url.is_set()).await?;
        self.url.as_str()
    }

    /// `member` or `maintainer`
    pub async fn role(&mut self) -> Result<Option<&str>> {
        self.complete_if_not_set(self.role.is_set()).await?;
        self.role.as_str()
    }

    /// `active` or `pending`
    pub async fn membership_state(&mut self) -> Result<Option<&str>> {
        self.complete_if_not_set(self.state_name.is_set()).await?;
        self.state_name.as_str()
    }
}

impl Completable for TeamMembership {
    const KIND: &'static str = "TeamMembership";

    fn state(&self) -> &CompletionState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut CompletionState {
        &mut self.state
    }

    fn resource_url(&self) -> Result<String> {
        self.url
            .known()
            .cloned()
            .ok_or_else(|| ValidationError::MissingIdentity("TeamMembership").into())
    }

    fn apply_fields(&mut self, fields: &Map<String, Value>) {
        if let Some(v) = fields.get("url") {
            self.url = Attribute::string("url", v);
        }
        if let Some(v) = fields.get("role") {
            self.role = Attribute::string("role", v);
        }
        if let Some(v) = fields.get("state") {
            self.state_name = Attribute::string("state", v);
        }
    }
}

impl Resource for TeamMembership {
    fn from_fields(
        requester: Arc<dyn Requester>,
        fields: &Map<String, Value>,
        completed: bool,
    ) -> Self {
        let mut membership = Self {
            state: CompletionState::new(requester, completed),
            url: Attribute::Unset,
            role: Attribute::Unset,
            state_name: Attribute::Unset,
        };
        membership.apply_fields(fields);
        membership
    }
}

impl fmt::Debug for TeamMembership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TeamMembership(role={:?}, state={:?})",
            self.role.known(),
            self.state_name.known()
        )
    }
}
