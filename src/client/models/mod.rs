//! GitHub resource entities
//!
//! Every entity stores its fields as [`Attribute`](super::Attribute)s and
//! fills missing ones on demand through [`Completable`]. Nested entities are
//! owned snapshots built from the embedded JSON, never live links.

use std::sync::Arc;

use reqwest::Url;
use serde_json::{Map, Value};

use super::{Completable, JsonResponse, Requester};
use crate::error::{ApiError, Result, ValidationError};

mod membership;
mod org;
mod repo;
mod team;
mod user;

pub use membership::TeamMembership;
pub use org::Organization;
pub use repo::Repository;
pub use team::Team;
pub use user::NamedUser;

/// An entity that can be built from a JSON object.
pub trait Resource: Completable + Sized {
    /// Build from response fields. `completed` marks a full-detail response.
    fn from_fields(
        requester: Arc<dyn Requester>,
        fields: &Map<String, Value>,
        completed: bool,
    ) -> Self;
}

/// Body of a response that must be a JSON object.
pub(crate) fn expect_object<'a>(
    response: &'a JsonResponse,
    what: &str,
) -> Result<&'a Map<String, Value>> {
    response.body.as_object().ok_or_else(|| {
        ApiError::InvalidResponse(format!("expected a JSON object for {}", what)).into()
    })
}

/// Whether `value` can stand as one URL path segment as typed.
///
/// Empty, `.` and `..` segments would be dropped or resolved away by URL
/// normalisation and address a different resource.
pub(crate) fn is_plain_segment(value: &str) -> bool {
    !value.is_empty() && value != "." && value != ".."
}

/// Append percent-encoded path segments to an absolute URL.
pub(crate) fn append_segments(base: &str, segments: &[&str]) -> Result<String> {
    let invalid = || ValidationError::InvalidValue {
        field: "URL",
        value: base.to_string(),
        expected: "an absolute http(s) URL",
    };
    let mut url = Url::parse(base).map_err(|_| invalid())?;
    url.path_segments_mut()
        .map_err(|_| invalid())?
        .pop_if_empty()
        .extend(segments);
    Ok(url.to_string())
}
