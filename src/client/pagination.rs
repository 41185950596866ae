//! Paginated list of API resources
//!
//! GitHub pages collections with `per_page`/`page` query parameters and
//! advertises the next page in the `Link` response header. A list is lazy:
//! nothing is fetched until the first call to [`PaginatedList::next_page`].

use std::marker::PhantomData;
use std::sync::Arc;

use log::debug;
use reqwest::{Method, Url};

use super::Requester;
use super::models::Resource;
use crate::error::{ApiError, Result, ValidationError};

/// Largest page size accepted by the GitHub API.
pub const MAX_PER_PAGE: usize = 100;

/// Pagination parameters for list requests.
///
/// # Example
/// ```ignore
/// let params = PaginationParams::new().per_page(50).page(2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationParams {
    /// Number of items per page (max 100)
    pub per_page: Option<usize>,
    /// First page to fetch (1-indexed)
    pub page: Option<usize>,
}

impl PaginationParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size, clamped to [`MAX_PER_PAGE`].
    pub fn per_page(mut self, size: usize) -> Self {
        self.per_page = Some(size.clamp(1, MAX_PER_PAGE));
        self
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }

    /// Convert to query string parameters.
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(size) = self.per_page {
            params.push(("per_page", size.to_string()));
        }
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        params
    }
}

/// Extract the `rel="next"` target from a `Link` header.
pub fn next_link(header: &str) -> Option<String> {
    header.split(',').find_map(|part| {
        let (target, rels) = part.split_once(';')?;
        let is_next = rels
            .split(';')
            .any(|rel| rel.trim() == r#"rel="next""#);
        if !is_next {
            return None;
        }
        let target = target.trim();
        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(str::to_string)
    })
}

/// Lazily fetched, page-by-page collection of `T`.
///
/// Items are built as not-yet-complete entities from the list representation.
pub struct PaginatedList<T> {
    requester: Arc<dyn Requester>,
    url: String,
    query: Vec<(&'static str, String)>,
    pagination: PaginationParams,
    headers: &'static [(&'static str, &'static str)],
    next_url: Option<String>,
    started: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Resource> PaginatedList<T> {
    pub fn new(
        requester: Arc<dyn Requester>,
        url: impl Into<String>,
        query: Vec<(&'static str, String)>,
        headers: &'static [(&'static str, &'static str)],
    ) -> Self {
        let url = url.into();
        let url = if url.starts_with('/') {
            format!("{}{}", requester.base_url().trim_end_matches('/'), url)
        } else {
            url
        };
        Self {
            requester,
            url,
            query,
            pagination: PaginationParams::default(),
            headers,
            next_url: None,
            started: false,
            _marker: PhantomData,
        }
    }

    /// Override paging before the first fetch.
    pub fn with_pagination(mut self, pagination: PaginationParams) -> Self {
        self.pagination = pagination;
        self
    }

    /// URL of the first page, with query parameters applied
    pub fn first_url(&self) -> Result<String> {
        let mut url = Url::parse(&self.url).map_err(|_| ValidationError::InvalidValue {
            field: "URL",
            value: self.url.clone(),
            expected: "an absolute http(s) URL",
        })?;
        let params: Vec<(&str, String)> = self
            .query
            .iter()
            .cloned()
            .chain(self.pagination.to_query_params())
            .collect();
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Ok(url.to_string())
    }

    /// Fetch the next page. Returns `None` once the list is exhausted.
    pub async fn next_page(&mut self) -> Result<Option<Vec<T>>> {
        let url = if self.started {
            match self.next_url.take() {
                Some(url) => url,
                None => return Ok(None),
            }
        } else {
            self.first_url()?
        };

        debug!("Fetching page {}", url);
        let response = self
            .requester
            .request_json_and_check(Method::GET, &url, None, self.headers)
            .await?;

        let items = response.body.as_array().ok_or_else(|| {
            ApiError::InvalidResponse(format!("expected a JSON array from {}", url))
        })?;
        let page = items
            .iter()
            .map(|item| {
                item.as_object()
                    .map(|fields| T::from_fields(Arc::clone(&self.requester), fields, false))
                    .ok_or_else(|| {
                        ApiError::InvalidResponse(format!("non-object list item from {}", url))
                            .into()
                    })
            })
            .collect::<Result<Vec<T>>>()?;

        self.started = true;
        self.next_url = response.header("link").and_then(next_link);
        Ok(Some(page))
    }

    /// Fetch every remaining page.
    pub async fn collect_all(mut self) -> Result<Vec<T>> {
        let mut all = Vec::new();
        while let Some(page) = self.next_page().await? {
            all.extend(page);
        }
        debug!("Collected {} items", all.len());
        Ok(all)
    }
}
