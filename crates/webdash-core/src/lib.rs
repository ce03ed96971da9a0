//! Business logic for the WebDynamo admin dashboard, independent of any
//! front end.
//!
//! - **[`Dashboard`]** wires an [`ApiClient`](webdash_api::ApiClient), the
//!   [`SessionStore`] and a [`Toaster`] together for one backend.
//! - **[`SessionStore`]** owns the signed-in user, persists the token and
//!   user snapshot through a [`SessionStorage`], and publishes state
//!   through a `watch` channel.
//! - **[`guard`]** decides whether a navigation is allowed or redirected.
//! - **[`rbac`]** answers role and permission checks against the session.
//! - **[`crud`]** drives every entity screen through one
//!   load / dialog / submit / refetch cycle ([`CrudPage`]).

pub mod config;
pub mod convert;
pub mod crud;
pub mod dashboard;
pub mod error;
pub mod guard;
pub mod model;
pub mod rbac;
pub mod session;
pub mod storage;
pub mod toast;
pub mod validate;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{DashboardConfig, Environment, TlsVerification};
pub use crud::{CrudPage, Dialog, FormMode, MutableResource, PageState, Phase, Resource};
pub use dashboard::Dashboard;
pub use error::CoreError;
pub use guard::{GuardDecision, Redirect};
pub use model::{Permission, Role, Session, SessionUpdate};
pub use rbac::Requirement;
pub use session::{SessionState, SessionStore};
pub use storage::{FileStorage, MemoryStorage, SameSite, SessionStorage, StorageError, StoredToken};
pub use toast::{Toast, ToastKind, Toaster};
pub use validate::{FieldError, ValidationErrors};
