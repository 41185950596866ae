//! GitHub user

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use super::{Resource, append_segments, is_plain_segment};
use crate::client::{Attribute, Completable, CompletionState, Requester};
use crate::error::{Result, ValidationError};

/// A GitHub user, addressed by login.
#[derive(Clone, Serialize)]
pub struct NamedUser {
    #[serde(skip)]
    state: CompletionState,

    #[serde(skip_serializing_if = "Attribute::is_unset")]
    pub(crate) login: Attribute<String>,
    #[serde(skip_serializing_if = "Attribute::is_unset")]
    pub(crate) id: Attribute<u64>,
    #[serde(skip_serializing_if = "Attribute::is_unset")]
    pub(crate) name: Attribute<String>,
    #[serde(skip_serializing_if = "Attribute::is_unset")]
    pub(crate) email: Attribute<String>,
    #[serde(skip_serializing_if = "Attribute::is_unset")]
    pub(crate) url: Attribute<String>,
    #[serde(skip_serializing_if = "Attribute::is_unset")]
    pub(crate) html_url: Attribute<String>,
    #[serde(rename = "type", skip_serializing_if = "Attribute::is_unset")]
    pub(crate) user_type: Attribute<String>,
    #[serde(skip_serializing_if = "Attribute::is_unset")]
    pub(crate) site_admin: Attribute<bool>,
}

impl NamedUser {
    fn empty(requester: Arc<dyn Requester>, completed: bool) -> Self {
        Self {
            state: CompletionState::new(requester, completed),
            login: Attribute::Unset,
            id: Attribute::Unset,
            name: Attribute::Unset,
            email: Attribute::Unset,
            url: Attribute::Unset,
            html_url: Attribute::Unset,
            user_type: Attribute::Unset,
            site_admin: Attribute::Unset,
        }
    }

    /// A not-yet-fetched user known only by login.
    pub fn from_login(requester: Arc<dyn Requester>, login: impl Into<String>) -> Self {
        let mut user = Self::empty(requester, false);
        user.login = Attribute::Present(Some(login.into()));
        user
    }

    /// Login used in URLs, without fetching.
    ///
    /// Logins that would not survive as a single path segment (empty, `.`
    /// or `..`) are rejected here, before any request.
    pub fn identity(&self) -> Result<&str> {
        let login = self
            .login
            .known()
            .ok_or(ValidationError::MissingIdentity("NamedUser"))?;
        if !is_plain_segment(login) {
            return Err(ValidationError::InvalidValue {
                field: "login",
                value: login.clone(),
                expected: "a GitHub login",
            }
            .into());
        }
        Ok(login)
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

    pub async fn email(&mut self) -> Result<Option<&str>> {
        self.complete_if_not_set(self.email.is_set()).await?;
        self.email.as_str()
    }

    pub async fn url(&mut self) -> Result<Option<&str>> {
        self.complete_if_not_set(self.url.is_set()).await?;
        self.url.as_str()
    }

    pub async fn html_url(&mut self) -> Result<Option<&str>> {
        self.complete_if_not_set(self.html_url.is_set()).await?;
        self.html_url.as_str()
    }

    /// `User`, `Organization` or `Bot`
    pub async fn user_type(&mut self) -> Result<Option<&str>> {
        self.complete_if_not_set(self.user_type.is_set()).await?;
        self.user_type.as_str()
    }

    pub async fn site_admin(&mut self) -> Result<Option<bool>> {
        self.complete_if_not_set(self.site_admin.is_set()).await?;
        self.site_admin.copied()
    }
}

impl Completable for NamedUser {
    const KIND: &'static str = "NamedUser";

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
        append_segments(self.state.requester().base_url(), &["users", self.identity()?])
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
        if let Some(v) = fields.get("email") {
            self.email = Attribute::string("email", v);
        }
        if let Some(v) = fields.get("url") {
            self.url = Attribute::string("url", v);
        }
        if let Some(v) = fields.get("html_url") {
            self.html_url = Attribute::string("html_url", v);
        }
        if let Some(v) = fields.get("type") {
            self.user_type = Attribute::string("type", v);
        }
        if let Some(v) = fields.get("site_admin") {
            self.site_admin = Attribute::bool("site_admin", v);
        }
    }
}

impl Resource for NamedUser {
    fn from_fields(
        requester: Arc<dyn Requester>,
        fields: &Map<String, Value>,
        completed: bool,
    ) -> Self {
        let mut user = Self::empty(requester, completed);
        user.apply_fields(fields);
        user
    }
}

impl fmt::Debug for NamedUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NamedUser(login={:?})", self.login.known())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures::UserJson;
    use crate::client::mock::MockRequester;
    use crate::error::Error;
    use reqwest::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_from_login_completes_from_users_endpoint() {
        let mock = Arc::new(
            MockRequester::new()
                .respond(
                    Method::GET,
                    "/users/hubot",
                    200,
                    UserJson::new("hubot").name("Hubot").build(),
                )
                .await,
        );
        let mut user = NamedUser::from_login(mock.clone(), "hubot");

        assert_eq!(user.login().await.unwrap(), Some("hubot"));
        assert_eq!(mock.call_count().await, 0);

        assert_eq!(user.name().await.unwrap(), Some("Hubot"));
        assert_eq!(user.user_type().await.unwrap(), Some("User"));
        assert_eq!(mock.call_count().await, 1);
    }

    #[tokio::test]
    async fn test_embedded_user_completes_from_its_url() {
        let fragment = UserJson::new("octocat").build();
        let mock = Arc::new(
            MockRequester::new()
                .respond(
                    Method::GET,
                    "/users/octocat",
                    200,
                    UserJson::new("octocat").email("octocat@github.com").build(),
                )
                .await,
        );
        let mut user =
            NamedUser::from_fields(mock.clone(), fragment.as_object().unwrap(), false);

        assert_eq!(user.email().await.unwrap(), Some("octocat@github.com"));
        assert_eq!(mock.captured_requests().await[0].path, "/users/octocat");
    }

    #[test]
    fn test_identity_requires_login() {
        let mock = Arc::new(MockRequester::new());
        let user = NamedUser::from_fields(mock, json!({"id": 1}).as_object().unwrap(), false);
        assert!(matches!(
            user.identity(),
            Err(Error::Validation(ValidationError::MissingIdentity("NamedUser")))
        ));
    }

    #[test]
    fn test_identity_rejects_dot_segments() {
        for login in ["", ".", ".."] {
            let mock = Arc::new(MockRequester::new());
            let user = NamedUser::from_login(mock, login);
            assert!(
                matches!(
                    user.identity(),
                    Err(Error::Validation(ValidationError::InvalidValue { field: "login", .. }))
                ),
                "{login:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_resource_url_encodes_login() {
        let mock = Arc::new(MockRequester::new());
        let user = NamedUser::from_login(mock, "a?b");
        assert_eq!(
            user.resource_url().unwrap(),
            "https://api.github.com/users/a%3Fb"
        );
    }

    #[test]
    fn test_serialize_skips_unknown_fields() {
        let mock = Arc::new(MockRequester::new());
        let user = NamedUser::from_login(mock, "octocat");
        assert_eq!(serde_json::to_value(&user).unwrap(), json!({"login": "octocat"}));
        assert_eq!(format!("{:?}", user), r#"NamedUser(login=Some("octocat"))"#);
    }
}
