// hrdash-api: Async Rust client for the HR administration REST API

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod page;
pub mod resource;
pub mod transport;

pub use auth::{BearerToken, ChangePasswordRequest, EditUserRequest, LoginResponse, UserInfo};
pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use error::Error;
pub use models::{Department, Dependent, DependentKey, Employee, Project, ProjectMember};
pub use page::{Page, PageRequest};
pub use resource::{Criteria, Resource, ResourceKey, ResourceKind};
pub use transport::TransportConfig;
