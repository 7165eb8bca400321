// ── Generic paged resource ──
//
// Departments, employees, projects and dependents share one set of
// endpoints: list, create, update, delete and search. The differences
// (path, list key, page parameter name, key shape, search fields) are
// carried as associated items on the `Resource` trait.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use strum::{AsRefStr, Display, EnumIter, EnumString};
use tracing::debug;

use crate::auth::BearerToken;
use crate::client::ApiClient;
use crate::error::Error;
use crate::page::{Page, PageRequest, SearchRequest};

/// Search arguments: field name to search text.
pub type Criteria = BTreeMap<String, String>;

/// Entity families exposed by the API.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum ResourceKind {
    Department,
    Employee,
    Project,
    Dependent,
}

impl ResourceKind {
    /// Singular noun, e.g. `department`.
    pub fn singular(self) -> &'static str {
        match self {
            Self::Department => "department",
            Self::Employee => "employee",
            Self::Project => "project",
            Self::Dependent => "dependent",
        }
    }

    /// Plural noun, e.g. `departments`.
    pub fn plural(self) -> &'static str {
        match self {
            Self::Department => "departments",
            Self::Employee => "employees",
            Self::Project => "projects",
            Self::Dependent => "dependents",
        }
    }
}

/// Identifier of a single entity, rendered as one or more URL path segments.
pub trait ResourceKey: fmt::Debug + fmt::Display + Clone + PartialEq + Send + Sync + 'static {
    fn path_segments(&self) -> Vec<String>;
}

impl ResourceKey for i64 {
    fn path_segments(&self) -> Vec<String> {
        vec![self.to_string()]
    }
}

/// An entity family served under `/{PATH}`.
pub trait Resource:
    Serialize + DeserializeOwned + fmt::Debug + Clone + PartialEq + Send + Sync + 'static
{
    type Key: ResourceKey;

    const KIND: ResourceKind;
    /// Collection path, without slashes.
    const PATH: &'static str;
    /// Name of the array inside the paged envelope.
    const LIST_KEY: &'static str;
    /// Query parameter carrying the page number on `GET /{PATH}`.
    const PAGE_PARAM: &'static str;
    /// Fields the server accepts inside `searchArgs`.
    const SEARCH_FIELDS: &'static [&'static str];

    fn key(&self) -> Self::Key;
}

// ── Endpoints ────────────────────────────────────────────────────────

impl ApiClient {
    /// `GET /{PATH}?{PAGE_PARAM}=n&pageSize=s`
    pub async fn list<R: Resource>(
        &self,
        token: &BearerToken,
        page: PageRequest,
    ) -> Result<Page<R>, Error> {
        let url = self.endpoint([R::PATH])?;
        let query = [
            (R::PAGE_PARAM, page.page_number().to_string()),
            ("pageSize", page.page_size().to_string()),
        ];
        self.get(url, token, &query).await
    }

    /// `POST /{PATH}`, returning the server's representation.
    pub async fn create<R: Resource>(&self, token: &BearerToken, item: &R) -> Result<R, Error> {
        let url = self.endpoint([R::PATH])?;
        self.post(url, Some(token), item).await
    }

    /// `PUT /{PATH}` with the whole entity.
    pub async fn update<R: Resource>(&self, token: &BearerToken, item: &R) -> Result<R, Error> {
        let url = self.endpoint([R::PATH])?;
        self.put(url, token, item).await
    }

    /// `DELETE /{PATH}/{key}`, returning the acknowledgment body.
    pub async fn delete<R: Resource>(
        &self,
        token: &BearerToken,
        key: &R::Key,
    ) -> Result<Value, Error> {
        let segments = std::iter::once(R::PATH.to_owned()).chain(key.path_segments());
        let url = self.endpoint(segments)?;
        self.delete_json(url, token).await
    }

    /// `POST /{PATH}/search` with `{searchArgs, pageNumber, pageSize}`.
    pub async fn search<R: Resource>(
        &self,
        token: &BearerToken,
        criteria: &Criteria,
        page: PageRequest,
    ) -> Result<Page<R>, Error> {
        let url = self.endpoint([R::PATH, "search"])?;
        debug!(kind = %R::KIND, fields = criteria.len(), "search");
        self.post(url, Some(token), &SearchRequest::new(criteria, page))
            .await
    }
}
