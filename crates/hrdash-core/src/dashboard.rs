// ── Dashboard facade ──
//
// Owns the API client, the state tree and the session storage. Every
// action reads the current token from the auth slice when it starts,
// moves its container to pending, performs one HTTP call and then
// settles the container as fulfilled or rejected.

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use hrdash_api::{
    ApiClient, BearerToken, ChangePasswordRequest, Criteria, DEFAULT_BASE_URL, Department,
    Dependent, EditUserRequest, Employee, Page, PageRequest, Project, TransportConfig, UserInfo,
};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::search::SearchQuery;
use crate::session::{self, SessionStorage};
use crate::state::{
    AuthEvent, AuthState, OperationEvent, Query, ResourceEvent, ResourceState, RootState,
    SliceWatch, StateTree, TreeResource,
};
use crate::validate;

const LOGIN_FAILED: &str = "Login failed";
const LOGOUT_FAILED: &str = "Failed to log out";
const CHANGE_PASSWORD_FAILED: &str = "Failed to Change Password";
const EDIT_PROFILE_FAILED: &str = "Failed to update profile";

/// Connection settings for a [`Dashboard`].
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Which step of a resource action failed, for the fallback message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Fetch,
    Filter,
    Add,
    Update,
    Delete,
}

impl Step {
    fn fallback(self, kind: hrdash_api::ResourceKind) -> String {
        match self {
            Self::Fetch => format!("Failed to fetch {}", kind.plural()),
            Self::Filter => format!("Failed to filter {}", kind.plural()),
            Self::Add => format!("Failed to add {}", kind.singular()),
            Self::Update => format!("Failed to update {}", kind.singular()),
            Self::Delete => format!("Failed to delete {}", kind.singular()),
        }
    }
}

// ── Dashboard ────────────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<DashboardInner>`.
#[derive(Clone)]
pub struct Dashboard {
    inner: Arc<DashboardInner>,
}

struct DashboardInner {
    api: ApiClient,
    tree: StateTree,
    storage: Arc<dyn SessionStorage>,
}

impl Dashboard {
    /// Build a dashboard and rehydrate any session found in `storage`.
    pub fn new(config: &DashboardConfig, storage: Arc<dyn SessionStorage>) -> Result<Self, CoreError> {
        let transport = TransportConfig::default().with_timeout(config.timeout);
        let api = ApiClient::new(&config.base_url, &transport)?;
        Ok(Self::with_client(api, storage))
    }

    /// Build a dashboard around an existing client.
    pub fn with_client(api: ApiClient, storage: Arc<dyn SessionStorage>) -> Self {
        let auth = match session::restore(storage.as_ref()) {
            Ok(Some(stored)) => {
                debug!(user = %stored.user.email, "restored stored session");
                AuthState::restored(stored.token, stored.user)
            }
            Ok(None) => AuthState::default(),
            Err(e) => {
                warn!(error = %e, "could not read stored session, starting signed out");
                AuthState::default()
            }
        };

        Self {
            inner: Arc::new(DashboardInner {
                api,
                tree: StateTree::new(auth),
                storage,
            }),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// The live state tree, for subscribing to individual slices.
    pub fn tree(&self) -> &StateTree {
        &self.inner.tree
    }

    /// A copy of the whole state tree.
    pub fn state(&self) -> RootState {
        self.inner.tree.snapshot()
    }

    /// The current auth slice.
    pub fn session(&self) -> AuthState {
        self.inner.tree.auth.get()
    }

    fn token(&self) -> BearerToken {
        self.inner.tree.auth.get().token
    }

    // ── Entity handles ───────────────────────────────────────────────

    pub fn resource<R: TreeResource>(&self) -> ResourceHandle<R> {
        ResourceHandle {
            dashboard: self.clone(),
            _entity: PhantomData,
        }
    }

    pub fn departments(&self) -> ResourceHandle<Department> {
        self.resource()
    }

    pub fn employees(&self) -> ResourceHandle<Employee> {
        self.resource()
    }

    pub fn projects(&self) -> ResourceHandle<Project> {
        self.resource()
    }

    pub fn dependents(&self) -> ResourceHandle<Dependent> {
        self.resource()
    }

    // ── Session lifecycle ────────────────────────────────────────────

    /// Authenticate and persist the session.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<UserInfo, CoreError> {
        let tree = &self.inner.tree;
        if !tree.auth.dispatch(AuthEvent::LoginPending) {
            return Err(CoreError::validation("a login is already in progress"));
        }

        if let Err(e) = validate::credentials(email, password.expose_secret()) {
            return Err(self.login_failed(e));
        }

        match self.inner.api.login(email, password).await {
            Ok(resp) => {
                let applied = tree.auth.dispatch(AuthEvent::LoginFulfilled {
                    token: resp.token.clone(),
                    user: resp.user.clone(),
                });
                if !applied {
                    warn!(user = %resp.user.email, "session changed while logging in");
                    return Err(CoreError::validation("the login was interrupted"));
                }
                if let Err(e) = session::persist(self.inner.storage.as_ref(), &resp.token, &resp.user) {
                    warn!(error = %e, "session not persisted");
                }
                tree.logout.dispatch(OperationEvent::Reset);
                info!(user = %resp.user.email, role = %resp.user.role, "logged in");
                Ok(resp.user)
            }
            Err(err) => {
                let err = CoreError::from_api(err, LOGIN_FAILED);
                warn!(error = %err, "login rejected");
                Err(self.login_failed(err))
            }
        }
    }

    /// A failed login leaves no session behind, in memory or on disk.
    fn login_failed(&self, err: CoreError) -> CoreError {
        self.clear_storage();
        self.inner.tree.auth.dispatch(AuthEvent::LoginRejected {
            message: err.message().to_owned(),
        });
        err
    }

    /// Invalidate the session on the server, then forget it locally.
    ///
    /// On failure the session stays active and the error lands on the
    /// logout container.
    pub async fn logout(&self) -> Result<(), CoreError> {
        let tree = &self.inner.tree;
        let token = self.token();
        if !tree.auth.dispatch(AuthEvent::LogoutPending) {
            return Err(CoreError::validation("not logged in"));
        }
        tree.logout.dispatch(OperationEvent::Pending);

        match self.inner.api.logout(&token).await {
            Ok(_) => {
                self.clear_storage();
                tree.auth.dispatch(AuthEvent::LogoutFulfilled);
                tree.logout.dispatch(OperationEvent::Fulfilled);
                info!("logged out");
                Ok(())
            }
            Err(err) => {
                let err = self.rejected(err, LOGOUT_FAILED, &token);
                tree.auth.dispatch(AuthEvent::LogoutRejected);
                tree.logout.dispatch(OperationEvent::Rejected {
                    message: err.message().to_owned(),
                });
                Err(err)
            }
        }
    }

    /// Change the password. Success ends the session: the server
    /// invalidates the token, so the user has to log in again.
    pub async fn change_password(&self, request: &ChangePasswordRequest) -> Result<(), CoreError> {
        let slice = &self.inner.tree.change_password;
        let token = self.token();
        slice.dispatch(OperationEvent::Pending);

        if let Err(e) = validate::new_password(
            request.new_password.expose_secret(),
            request.confirm_password.expose_secret(),
        ) {
            slice.dispatch(OperationEvent::Rejected {
                message: e.message().to_owned(),
            });
            return Err(e);
        }

        match self.inner.api.change_password(&token, request).await {
            Ok(_) => {
                slice.dispatch(OperationEvent::Fulfilled);
                self.end_session(&token, None);
                info!("password changed, session closed");
                Ok(())
            }
            Err(err) => {
                let err = self.rejected(err, CHANGE_PASSWORD_FAILED, &token);
                slice.dispatch(OperationEvent::Rejected {
                    message: err.message().to_owned(),
                });
                Err(err)
            }
        }
    }

    /// Update the signed-in user's name and/or email.
    pub async fn edit_profile(&self, request: &EditUserRequest) -> Result<UserInfo, CoreError> {
        let tree = &self.inner.tree;
        let token = self.token();
        tree.user.dispatch(OperationEvent::Pending);

        let checked = if request.is_empty() {
            Err(CoreError::validation("nothing to update"))
        } else if let Some(email) = request.email.as_deref() {
            validate::email(email)
        } else {
            Ok(())
        };
        if let Err(e) = checked {
            tree.user.dispatch(OperationEvent::Rejected {
                message: e.message().to_owned(),
            });
            return Err(e);
        }

        match self.inner.api.edit_user(&token, request).await {
            Ok(_) => {
                tree.auth.dispatch(AuthEvent::ProfileUpdated {
                    full_name: request.full_name.clone(),
                    email: request.email.clone(),
                });
                let user = tree.auth.get().user.unwrap_or_default();
                if let Err(e) = session::persist_profile(self.inner.storage.as_ref(), &user) {
                    warn!(error = %e, "updated profile not persisted");
                }
                tree.user.dispatch(OperationEvent::Fulfilled);
                info!("profile updated");
                Ok(user)
            }
            Err(err) => {
                let err = self.rejected(err, EDIT_PROFILE_FAILED, &token);
                tree.user.dispatch(OperationEvent::Rejected {
                    message: err.message().to_owned(),
                });
                Err(err)
            }
        }
    }

    // ── Private helpers ──────────────────────────────────────────────

    /// Normalize an API failure. A refused `token` ends the session it
    /// belongs to.
    fn rejected(&self, err: hrdash_api::Error, fallback: &str, token: &BearerToken) -> CoreError {
        let err = CoreError::from_api(err, fallback);
        warn!(error = %err, status = ?err.status(), "request rejected");
        if err.is_unauthorized() {
            self.end_session(token, Some(err.message().to_owned()));
        }
        err
    }

    fn end_session(&self, token: &BearerToken, message: Option<String>) {
        let ended = self.inner.tree.auth.dispatch(AuthEvent::SessionEnded {
            token: token.clone(),
            message,
        });
        if ended {
            self.clear_storage();
            info!("session ended");
        } else {
            debug!("refused token no longer current, session kept");
        }
    }

    fn clear_storage(&self) {
        if let Err(e) = self.inner.storage.clear() {
            warn!(error = %e, "could not clear stored session");
        }
    }
}

// ── ResourceHandle ───────────────────────────────────────────────────

/// Actions and state for one entity family.
pub struct ResourceHandle<R: TreeResource> {
    dashboard: Dashboard,
    _entity: PhantomData<fn() -> R>,
}

impl<R: TreeResource> Clone for ResourceHandle<R> {
    fn clone(&self) -> Self {
        Self {
            dashboard: self.dashboard.clone(),
            _entity: PhantomData,
        }
    }
}

impl<R: TreeResource> ResourceHandle<R> {
    /// Current container value.
    pub fn state(&self) -> ResourceState<R> {
        self.slice().get()
    }

    /// Subscribe to container changes.
    pub fn watch(&self) -> SliceWatch<ResourceState<R>> {
        self.slice().watch()
    }

    /// Fetch one page.
    pub async fn list<P>(&self, page: P) -> Result<Page<R>, CoreError>
    where
        P: TryInto<PageRequest>,
        hrdash_api::Error: From<P::Error>,
    {
        let query = to_page(page).map(Query::List);
        self.fetch(query, Step::Fetch).await
    }

    /// Fetch one page filtered by `criteria` on the server.
    pub async fn search<P>(&self, criteria: Criteria, page: P) -> Result<Page<R>, CoreError>
    where
        P: TryInto<PageRequest>,
        hrdash_api::Error: From<P::Error>,
    {
        let query = to_page(page).map(|page| Query::Search { criteria, page });
        self.fetch(query, Step::Filter).await
    }

    /// Search from a text box and category picker. Blank text lists.
    pub async fn search_text<P>(&self, query: &SearchQuery, page: P) -> Result<Page<R>, CoreError>
    where
        P: TryInto<PageRequest>,
        hrdash_api::Error: From<P::Error>,
    {
        let built = to_page(page).and_then(|page| {
            Ok(match query.criteria::<R>()? {
                Some(criteria) => Query::Search { criteria, page },
                None => Query::List(page),
            })
        });
        let step = match built {
            Ok(Query::List(_)) => Step::Fetch,
            _ => Step::Filter,
        };
        self.fetch(built, step).await
    }

    /// Re-run the last list/search, or list the first page if none ran yet.
    pub async fn refresh(&self) -> Result<Page<R>, CoreError> {
        let query = self
            .state()
            .last_query
            .unwrap_or_else(|| Query::List(PageRequest::first()));
        let step = match query {
            Query::List(_) => Step::Fetch,
            Query::Search { .. } => Step::Filter,
        };
        self.fetch(Ok(query), step).await
    }

    pub async fn create(&self, item: &R) -> Result<R, CoreError> {
        self.slice().dispatch(ResourceEvent::MutationPending);
        let token = self.dashboard.token();
        let result = self.dashboard.api().create(&token, item).await;
        self.settle(result, Step::Add, &token, |created| {
            serde_json::to_value(created).unwrap_or_default()
        })
    }

    pub async fn update(&self, item: &R) -> Result<R, CoreError> {
        self.slice().dispatch(ResourceEvent::MutationPending);
        let token = self.dashboard.token();
        let result = self.dashboard.api().update(&token, item).await;
        self.settle(result, Step::Update, &token, |updated| {
            serde_json::to_value(updated).unwrap_or_default()
        })
    }

    pub async fn delete(&self, key: &R::Key) -> Result<Value, CoreError> {
        self.slice().dispatch(ResourceEvent::MutationPending);
        let token = self.dashboard.token();
        let result = self.dashboard.api().delete::<R>(&token, key).await;
        self.settle(result, Step::Delete, &token, Value::clone)
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn slice(&self) -> &crate::state::Slice<ResourceState<R>> {
        self.dashboard.tree().resource::<R>()
    }

    async fn fetch(&self, query: Result<Query, CoreError>, step: Step) -> Result<Page<R>, CoreError> {
        let slice = self.slice();
        let seq = slice.next_seq();
        slice.dispatch(ResourceEvent::FetchPending {
            seq,
            query: query.as_ref().ok().cloned(),
        });

        let result = match query {
            Ok(query) => {
                let token = self.dashboard.token();
                let api = self.dashboard.api();
                debug!(kind = %R::KIND, seq, ?query, "fetching");
                let response = match &query {
                    Query::List(page) => api.list::<R>(&token, *page).await,
                    Query::Search { criteria, page } => api.search::<R>(&token, criteria, *page).await,
                };
                response.map_err(|e| self.dashboard.rejected(e, &step.fallback(R::KIND), &token))
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(page) => {
                info!(kind = %R::KIND, seq, count = page.len(), "page loaded");
                slice.dispatch(ResourceEvent::FetchFulfilled {
                    seq,
                    page: page.clone(),
                });
                Ok(page)
            }
            Err(err) => {
                slice.dispatch(ResourceEvent::FetchRejected {
                    seq,
                    message: err.message().to_owned(),
                });
                Err(err)
            }
        }
    }

    fn settle<T>(
        &self,
        result: Result<T, hrdash_api::Error>,
        step: Step,
        token: &BearerToken,
        ack: impl FnOnce(&T) -> Value,
    ) -> Result<T, CoreError> {
        match result {
            Ok(value) => {
                info!(kind = %R::KIND, ?step, "mutation accepted");
                self.slice().dispatch(ResourceEvent::MutationFulfilled { ack: ack(&value) });
                Ok(value)
            }
            Err(err) => {
                let err = self.dashboard.rejected(err, &step.fallback(R::KIND), token);
                self.slice().dispatch(ResourceEvent::MutationRejected {
                    message: err.message().to_owned(),
                });
                Err(err)
            }
        }
    }
}

fn to_page<P>(page: P) -> Result<PageRequest, CoreError>
where
    P: TryInto<PageRequest>,
    hrdash_api::Error: From<P::Error>,
{
    page.try_into()
        .map_err(|e| CoreError::from(hrdash_api::Error::from(e)))
}
