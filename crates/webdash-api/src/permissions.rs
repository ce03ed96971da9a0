// Permission endpoints

use tracing::debug;

use crate::client::{ApiClient, Extra};
use crate::error::Error;
use crate::models::{Acknowledgement, PermissionItem, PermissionListPayload, PermissionRequest};

impl ApiClient {
    /// `GET /permissions`
    pub async fn list_permissions(&self) -> Result<Vec<PermissionItem>, Error> {
        let url = self.url("/permissions")?;
        debug!("listing permissions");
        Ok(self.get::<PermissionListPayload>(url).await?.payload.permission)
    }

    /// Same shape as [`list_permissions`](Self::list_permissions), served
    /// from the older `GET /permission_list` route.
    pub async fn permission_list(&self) -> Result<Vec<PermissionItem>, Error> {
        let url = self.url("/permission_list")?;
        debug!("listing permissions (legacy route)");
        Ok(self.get::<PermissionListPayload>(url).await?.payload.permission)
    }

    /// `POST /permissions` with `{name, guard_name?}`
    pub async fn create_permission(&self, req: &PermissionRequest) -> Result<Acknowledgement, Error> {
        let url = self.url("/permissions")?;
        debug!(name = %req.name, "creating permission");
        Ok(self.post::<Extra>(url, req).await?.ack())
    }

    /// `PUT /permissions/{id}` with `{name, guard_name?}`
    pub async fn update_permission(
        &self,
        id: u64,
        req: &PermissionRequest,
    ) -> Result<Acknowledgement, Error> {
        let url = self.url(&format!("/permissions/{id}"))?;
        debug!(id, "updating permission");
        Ok(self.put::<Extra>(url, req).await?.ack())
    }

    /// `DELETE /permissions/{id}`
    pub async fn delete_permission(&self, id: u64) -> Result<Acknowledgement, Error> {
        let url = self.url(&format!("/permissions/{id}"))?;
        debug!(id, "deleting permission");
        Ok(self.delete::<Extra>(url).await?.ack())
    }
}
