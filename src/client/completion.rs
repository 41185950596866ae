//! Lazy completion of partially-known entities
//!
//! An entity built from an embedded JSON fragment only knows some of its
//! fields. The first read of an unset field fetches the full representation
//! once, applies it, and marks the entity complete. After that, unset fields
//! are simply absent from the API and reading them never hits the network.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use reqwest::Method;
use serde_json::{Map, Value};

use super::Requester;
use crate::error::{ApiError, Result};

/// Per-entity completion bookkeeping plus the requester used to talk to the API.
#[derive(Clone)]
pub struct CompletionState {
    requester: Arc<dyn Requester>,
    completed: bool,
}

impl CompletionState {
    pub fn new(requester: Arc<dyn Requester>, completed: bool) -> Self {
        Self {
            requester,
            completed,
        }
    }

    pub fn requester(&self) -> &Arc<dyn Requester> {
        &self.requester
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }
}

impl fmt::Debug for CompletionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionState")
            .field("completed", &self.completed)
            .finish()
    }
}

/// An entity whose missing fields can be filled by fetching its canonical URL.
#[async_trait]
pub trait Completable: Send {
    /// Entity kind, used in logs and errors
    const KIND: &'static str;

    fn state(&self) -> &CompletionState;

    fn state_mut(&mut self) -> &mut CompletionState;

    /// Canonical URL of the full representation
    fn resource_url(&self) -> Result<String>;

    /// Replace every recognized field present in `fields`; leave the rest alone.
    fn apply_fields(&mut self, fields: &Map<String, Value>);

    fn is_completed(&self) -> bool {
        self.state().is_completed()
    }

    /// Fetch the full representation if the field is unset and the entity is
    /// not complete yet.
    async fn complete_if_not_set(&mut self, is_set: bool) -> Result<()> {
        if is_set || self.is_completed() {
            return Ok(());
        }
        fetch_and_apply(self).await
    }

    /// Fetch the full representation unless that already happened.
    async fn ensure_loaded(&mut self) -> Result<()> {
        if self.is_completed() {
            return Ok(());
        }
        fetch_and_apply(self).await
    }
}

/// One GET of the entity's URL. Fields are applied only after the whole
/// response has been received and validated.
async fn fetch_and_apply<E: Completable + ?Sized>(entity: &mut E) -> Result<()> {
    let url = entity.resource_url()?;
    let requester = Arc::clone(entity.state().requester());

    debug!("Completing {} from {}", E::KIND, url);
    let response = requester
        .request_json_and_check(Method::GET, &url, None, &[])
        .await?;

    let fields = response.body.as_object().ok_or_else(|| {
        ApiError::InvalidResponse(format!("expected a JSON object for {} at {}", E::KIND, url))
    })?;

    entity.apply_fields(fields);
    entity.state_mut().completed = true;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Attribute;
    use crate::client::mock::MockRequester;
    use serde_json::json;

    struct Probe {
        state: CompletionState,
        a: Attribute<u64>,
        b: Attribute<String>,
    }

    impl Completable for Probe {
        const KIND: &'static str = "Probe";

        fn state(&self) -> &CompletionState {
            &self.state
        }

        fn state_mut(&mut self) -> &mut CompletionState {
            &mut self.state
        }

        fn resource_url(&self) -> Result<String> {
            Ok("/probes/1".to_string())
        }

        fn apply_fields(&mut self, fields: &Map<String, Value>) {
            if let Some(v) = fields.get("a") {
                self.a = Attribute::int("a", v);
            }
            if let Some(v) = fields.get("b") {
                self.b = Attribute::string("b", v);
            }
        }
    }

    fn probe(requester: Arc<dyn Requester>, completed: bool) -> Probe {
        Probe {
            state: CompletionState::new(requester, completed),
            a: Attribute::Unset,
            b: Attribute::Unset,
        }
    }

    #[tokio::test]
    async fn test_set_field_never_fetches() {
        let mock = Arc::new(MockRequester::new());
        let mut p = probe(mock.clone(), false);

        p.complete_if_not_set(true).await.unwrap();
        assert_eq!(mock.call_count().await, 0);
        assert!(!p.is_completed());
    }

    #[tokio::test]
    async fn test_completed_entity_never_fetches() {
        let mock = Arc::new(MockRequester::new());
        let mut p = probe(mock.clone(), true);

        p.complete_if_not_set(false).await.unwrap();
        p.ensure_loaded().await.unwrap();
        assert_eq!(mock.call_count().await, 0);
    }

    #[tokio::test]
    async fn test_unset_field_fetches_once() {
        let mock = Arc::new(
            MockRequester::new()
                .respond(Method::GET, "/probes/1", 200, json!({"a": 7, "b": "x"}))
                .await,
        );
        let mut p = probe(mock.clone(), false);

        p.complete_if_not_set(p.a.is_set()).await.unwrap();
        p.complete_if_not_set(false).await.unwrap();
        p.ensure_loaded().await.unwrap();

        assert_eq!(mock.call_count().await, 1);
        assert!(p.is_completed());
        assert_eq!(p.a.copied().unwrap(), Some(7));
        assert_eq!(p.b.as_str().unwrap(), Some("x"));
    }

    #[tokio::test]
    async fn test_non_object_body_leaves_state_untouched() {
        let mock = Arc::new(
            MockRequester::new()
                .respond(Method::GET, "/probes/1", 200, json!([1, 2, 3]))
                .await,
        );
        let mut p = probe(mock.clone(), false);

        let err = p.ensure_loaded().await.unwrap_err();
        assert!(err.to_string().contains("Probe"));
        assert!(!p.is_completed());
        assert!(p.a.is_unset());
    }
}
