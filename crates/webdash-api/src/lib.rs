//! Async client for the WebDynamo admin dashboard REST API.
//!
//! [`ApiClient`] wraps a `reqwest::Client` and exposes one inherent method
//! per backend endpoint (auth, users, roles, permissions, projects, SEO
//! pages, contact messages). Responses are normalised at this boundary:
//! the backend's `"success"`/`"Success"`/`"error"`/`"Error"` status strings
//! never leak past [`ApiStatus`], and every failure is an [`Error`].

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

mod auth;
mod contact;
mod permissions;
mod projects;
mod roles;
mod seo;
mod users;

pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use error::Error;
pub use models::{
    Acknowledgement, ApiPermission, ApiProject, ApiRole, ApiSeoPage, ApiStatus, ApiUser,
    ContactMessage, ImageUpload, LoginSuccess, Page, PageLink, PermissionItem, PermissionRequest,
    ProjectPayload, RegisterRequest, RoleMember, RoleRequest, SeoRequest, Technology,
    UpdateUserRequest,
};
pub use transport::{TlsMode, TransportConfig};
