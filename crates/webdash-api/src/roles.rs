// Role endpoints
//
// Role updates are query-encoded (`?name=..&permission[]=..`) rather than
// sent as a JSON body; the backend only reads them from the query string.

use std::collections::BTreeMap;

use tracing::debug;

use crate::client::{ApiClient, Extra};
use crate::error::Error;
use crate::models::{
    Acknowledgement, ApiRole, RoleListPayload, RoleMember, RoleMembersPayload, RoleNamesPayload,
    RoleRequest,
};

impl ApiClient {
    /// All roles with their nested permissions.
    ///
    /// `GET /roles`
    pub async fn list_roles(&self) -> Result<Vec<ApiRole>, Error> {
        let url = self.url("/roles")?;
        debug!("listing roles");
        Ok(self.get::<RoleListPayload>(url).await?.payload.role)
    }

    /// Role id → name map.
    ///
    /// `GET /role_list`
    pub async fn role_names(&self) -> Result<BTreeMap<String, String>, Error> {
        let url = self.url("/role_list")?;
        debug!("listing role names");
        Ok(self.get::<RoleNamesPayload>(url).await?.payload.roles)
    }

    /// Users grouped by role name.
    ///
    /// `GET /role_wise_user`
    pub async fn role_members(&self) -> Result<BTreeMap<String, Vec<RoleMember>>, Error> {
        let url = self.url("/role_wise_user")?;
        debug!("listing role members");
        Ok(self.get::<RoleMembersPayload>(url).await?.payload.roles)
    }

    /// `POST /roles` with `{name, permission: [...]}`
    pub async fn create_role(&self, req: &RoleRequest) -> Result<Acknowledgement, Error> {
        let url = self.url("/roles")?;
        debug!(name = %req.name, "creating role");
        Ok(self.post::<Extra>(url, req).await?.ack())
    }

    /// `PUT /roles/{id}?name={name}&permission[]={p}...`
    pub async fn update_role(&self, id: u64, req: &RoleRequest) -> Result<Acknowledgement, Error> {
        let pairs = std::iter::once(("name", req.name.as_str()))
            .chain(req.permission.iter().map(|p| ("permission[]", p.as_str())));
        let url = self.url_with_query(&format!("/roles/{id}"), pairs)?;
        debug!(id, "updating role");
        Ok(self.put_empty::<Extra>(url).await?.ack())
    }

    /// `DELETE /roles/{id}`
    pub async fn delete_role(&self, id: u64) -> Result<Acknowledgement, Error> {
        let url = self.url(&format!("/roles/{id}"))?;
        debug!(id, "deleting role");
        Ok(self.delete::<Extra>(url).await?.ack())
    }
}
