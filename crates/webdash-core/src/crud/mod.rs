// ── Generic CRUD workflow ──
//
// Every entity screen follows one shape: fetch the list, open a
// create/edit/delete dialog, validate, submit, refetch, toast. The shape
// lives in `CrudPage<R>`; each entity only supplies a `Resource` adapter
// naming its endpoints, form draft and validation rules.

use std::fmt::Debug;
use std::future::Future;

use webdash_api::{Acknowledgement, ApiClient, Error as ApiError};

use crate::validate::ValidationErrors;

mod contacts;
mod page;
mod permissions;
mod projects;
mod roles;
mod seo;
mod users;

pub use contacts::ContactMessages;
pub use page::{CrudPage, Dialog, PageState, Phase};
pub use permissions::{PermissionDraft, Permissions};
pub use projects::Projects;
pub use roles::{RoleDraft, Roles};
pub use seo::SeoPages;
pub use users::{UserDraft, Users};

/// Whether a draft is being validated for creation or for an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// A listable backend collection.
pub trait Resource: Send + Sync + 'static {
    type Record: Clone + Debug + Send + Sync + 'static;
    /// Form state for create/edit. `()` for read-only resources.
    type Draft: Clone + Debug + Default + Send + Sync + 'static;

    /// Singular display name, e.g. `"Project"`.
    const ENTITY: &'static str;
    /// Plural lowercase name, e.g. `"projects"`.
    const PLURAL: &'static str;
    /// Dashboard path of the screen showing this collection.
    const ROUTE: &'static str;

    fn id(record: &Self::Record) -> u64;

    /// Fields the search box matches against.
    fn search_fields(record: &Self::Record) -> Vec<&str>;

    fn list(
        &self,
        api: &ApiClient,
    ) -> impl Future<Output = Result<Vec<Self::Record>, ApiError>> + Send;

    /// Case-insensitive substring match over [`search_fields`](Self::search_fields).
    fn matches(record: &Self::Record, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        needle.is_empty()
            || Self::search_fields(record)
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// A collection the dashboard can create, edit and delete in.
pub trait MutableResource: Resource {
    /// Seed an edit form with a record's current values.
    fn draft_from(record: &Self::Record) -> Self::Draft;

    fn validate(draft: &Self::Draft, mode: FormMode) -> Result<(), ValidationErrors>;

    fn create(
        &self,
        api: &ApiClient,
        draft: &Self::Draft,
    ) -> impl Future<Output = Result<Acknowledgement, ApiError>> + Send;

    fn update(
        &self,
        api: &ApiClient,
        id: u64,
        draft: &Self::Draft,
    ) -> impl Future<Output = Result<Acknowledgement, ApiError>> + Send;

    fn delete(
        &self,
        api: &ApiClient,
        id: u64,
    ) -> impl Future<Output = Result<Acknowledgement, ApiError>> + Send;
}
