// User management endpoints

use tracing::debug;

use crate::client::{ApiClient, Extra};
use crate::error::Error;
use crate::models::{Acknowledgement, ApiUser, Page, RegisterRequest, UpdateUserRequest, UserListPayload};

impl ApiClient {
    /// One page of users.
    ///
    /// `GET /user_list?page={page}`
    pub async fn list_users(&self, page: u32) -> Result<Page<ApiUser>, Error> {
        let page = page.max(1).to_string();
        let url = self.url_with_query("/user_list", [("page", page.as_str())])?;
        debug!(page = %page, "listing users");
        Ok(self.get::<UserListPayload>(url).await?.payload.users)
    }

    /// Register a new user.
    ///
    /// `POST /register` with `{name, email, password, roles}`
    pub async fn register_user(&self, req: &RegisterRequest) -> Result<Acknowledgement, Error> {
        let url = self.url("/register")?;
        debug!(email = %req.email, "registering user");
        Ok(self.post::<Extra>(url, req).await?.ack())
    }

    /// `PUT /user_update/{id}`
    pub async fn update_user(&self, id: u64, req: &UpdateUserRequest) -> Result<Acknowledgement, Error> {
        let url = self.url(&format!("/user_update/{id}"))?;
        debug!(id, "updating user");
        Ok(self.put::<Extra>(url, req).await?.ack())
    }

    /// `DELETE /user_delete/{id}`
    pub async fn delete_user(&self, id: u64) -> Result<Acknowledgement, Error> {
        let url = self.url(&format!("/user_delete/{id}"))?;
        debug!(id, "deleting user");
        Ok(self.delete::<Extra>(url).await?.ack())
    }
}
