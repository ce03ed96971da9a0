// Roles screen.

use webdash_api::{Acknowledgement, ApiClient, ApiRole, Error as ApiError, RoleRequest};

use super::{FormMode, MutableResource, Resource};
use crate::validate::{ValidationErrors, Validator};

#[derive(Debug, Default)]
pub struct Roles;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleDraft {
    pub name: String,
    /// Permission names granted by the role.
    pub permissions: Vec<String>,
}

impl RoleDraft {
    fn request(&self) -> RoleRequest {
        RoleRequest {
            name: self.name.trim().to_owned(),
            permission: self.permissions.clone(),
        }
    }
}

impl Resource for Roles {
    type Record = ApiRole;
    type Draft = RoleDraft;

    const ENTITY: &'static str = "Role";
    const PLURAL: &'static str = "roles";
    const ROUTE: &'static str = "/dashboard/users/role";

    fn id(record: &ApiRole) -> u64 {
        record.id
    }

    fn search_fields(record: &ApiRole) -> Vec<&str> {
        let mut fields = vec![record.name.as_str()];
        fields.extend(record.permissions.iter().map(|p| p.name.as_str()));
        fields
    }

    async fn list(&self, api: &ApiClient) -> Result<Vec<ApiRole>, ApiError> {
        api.list_roles().await
    }
}

impl MutableResource for Roles {
    fn draft_from(record: &ApiRole) -> RoleDraft {
        RoleDraft {
            name: record.name.clone(),
            permissions: record.permissions.iter().map(|p| p.name.clone()).collect(),
        }
    }

    fn validate(draft: &RoleDraft, _mode: FormMode) -> Result<(), ValidationErrors> {
        Validator::new().required("name", &draft.name).finish()
    }

    async fn create(&self, api: &ApiClient, draft: &RoleDraft) -> Result<Acknowledgement, ApiError> {
        api.create_role(&draft.request()).await
    }

    async fn update(
        &self,
        api: &ApiClient,
        id: u64,
        draft: &RoleDraft,
    ) -> Result<Acknowledgement, ApiError> {
        api.update_role(id, &draft.request()).await
    }

    async fn delete(&self, api: &ApiClient, id: u64) -> Result<Acknowledgement, ApiError> {
        api.delete_role(id).await
    }
}
