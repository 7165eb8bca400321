//! State and actions for the HR admin dashboard, layered on `hrdash-api`.
//!
//! - **[`Dashboard`]**: the facade consumers hold. It owns the API client,
//!   the [`StateTree`] and a [`SessionStorage`]. Session actions
//!   ([`login`](Dashboard::login), [`logout`](Dashboard::logout),
//!   [`change_password`](Dashboard::change_password),
//!   [`edit_profile`](Dashboard::edit_profile)) live on it directly, and
//!   each entity family is reached through a [`ResourceHandle`].
//!
//! - **State containers** ([`state`]): one [`Slice`](state::Slice) per
//!   concern, each a pure reducer behind a `tokio::sync::watch` channel.
//!   [`RootState`] is a point-in-time copy of all of them.
//!
//! - **Session storage** ([`session`]): the token and profile survive
//!   restarts through a key/value [`SessionStorage`]. [`MemoryStorage`] is
//!   the in-process implementation; `hrdash-config` provides a file-backed one.
//!
//! - **Input checks**: [`SearchQuery`] turns a search box into server
//!   criteria, [`validate`] holds the login and password rules, and
//!   [`forms`] converts text-field drafts into entities.

pub mod dashboard;
pub mod error;
pub mod forms;
pub mod search;
pub mod session;
pub mod state;
pub mod validate;

// ── Primary re-exports ──────────────────────────────────────────────
pub use dashboard::{Dashboard, DashboardConfig, ResourceHandle};
pub use error::CoreError;
pub use forms::{DepartmentForm, DependentForm, EmployeeForm, ProjectForm, iso_timestamp};
pub use search::{ALL, SearchQuery};
pub use session::{MemoryStorage, SessionKey, SessionStorage, StoredSession};
pub use state::{
    AuthEvent, AuthPhase, AuthState, OperationEvent, OperationState, Query, ResourceEvent,
    ResourceState, RootState, SliceWatch, StateTree, TreeResource,
};

// ── API re-exports ──────────────────────────────────────────────────
pub use hrdash_api::{
    BearerToken, ChangePasswordRequest, Criteria, DEFAULT_BASE_URL, Department, Dependent, DependentKey,
    EditUserRequest, Employee, Page, PageRequest, Project, ProjectMember, Resource, ResourceKind,
    UserInfo,
};
