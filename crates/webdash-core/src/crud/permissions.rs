// Permissions screen.

use webdash_api::{Acknowledgement, ApiClient, Error as ApiError, PermissionItem, PermissionRequest};

use super::{FormMode, MutableResource, Resource};
use crate::validate::{ValidationErrors, Validator};

#[derive(Debug, Default)]
pub struct Permissions;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionDraft {
    pub name: String,
    pub guard_name: Option<String>,
}

impl PermissionDraft {
    fn request(&self) -> PermissionRequest {
        PermissionRequest {
            name: self.name.trim().to_owned(),
            guard_name: self.guard_name.clone().filter(|g| !g.is_empty()),
        }
    }
}

impl Resource for Permissions {
    type Record = PermissionItem;
    type Draft = PermissionDraft;

    const ENTITY: &'static str = "Permission";
    const PLURAL: &'static str = "permissions";
    const ROUTE: &'static str = "/dashboard/users/permission";

    fn id(record: &PermissionItem) -> u64 {
        record.id
    }

    fn search_fields(record: &PermissionItem) -> Vec<&str> {
        vec![record.name.as_str()]
    }

    async fn list(&self, api: &ApiClient) -> Result<Vec<PermissionItem>, ApiError> {
        api.list_permissions().await
    }
}

impl MutableResource for Permissions {
    fn draft_from(record: &PermissionItem) -> PermissionDraft {
        PermissionDraft {
            name: record.name.clone(),
            guard_name: None,
        }
    }

    fn validate(draft: &PermissionDraft, _mode: FormMode) -> Result<(), ValidationErrors> {
        Validator::new().required("name", &draft.name).finish()
    }

    async fn create(
        &self,
        api: &ApiClient,
        draft: &PermissionDraft,
    ) -> Result<Acknowledgement, ApiError> {
        api.create_permission(&draft.request()).await
    }

    async fn update(
        &self,
        api: &ApiClient,
        id: u64,
        draft: &PermissionDraft,
    ) -> Result<Acknowledgement, ApiError> {
        api.update_permission(id, &draft.request()).await
    }

    async fn delete(&self, api: &ApiClient, id: u64) -> Result<Acknowledgement, ApiError> {
        api.delete_permission(id).await
    }
}
