// Users screen: paginated list, registration and profile edits.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use secrecy::{ExposeSecret, SecretString};
use webdash_api::{
    Acknowledgement, ApiClient, ApiUser, Error as ApiError, RegisterRequest, UpdateUserRequest,
};

use super::{FormMode, MutableResource, Resource};
use crate::validate::{ValidationErrors, Validator};

const MIN_PASSWORD_LEN: usize = 6;

/// Pagination position reported by the last fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageInfo {
    pub current_page: u32,
    pub last_page: u32,
    pub per_page: u32,
    pub total: u64,
}

/// The users collection, one backend page at a time.
#[derive(Debug)]
pub struct Users {
    page: u32,
    info: ArcSwapOption<PageInfo>,
}

impl Users {
    pub fn page(page: u32) -> Self {
        Self {
            page: page.max(1),
            info: ArcSwapOption::empty(),
        }
    }

    /// Pagination reported by the most recent successful fetch.
    pub fn page_info(&self) -> Option<PageInfo> {
        self.info.load_full().map(|info| *info)
    }
}

impl Default for Users {
    fn default() -> Self {
        Self::page(1)
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    /// Only sent on registration.
    pub password: Option<SecretString>,
    pub roles: Vec<String>,
    pub status: Option<String>,
    pub branch_id: Option<u64>,
}

impl Resource for Users {
    type Record = ApiUser;
    type Draft = UserDraft;

    const ENTITY: &'static str = "User";
    const PLURAL: &'static str = "users";
    const ROUTE: &'static str = "/dashboard/users/user";

    fn id(record: &ApiUser) -> u64 {
        record.id
    }

    fn search_fields(record: &ApiUser) -> Vec<&str> {
        vec![record.name.as_str(), record.email.as_str()]
    }

    async fn list(&self, api: &ApiClient) -> Result<Vec<ApiUser>, ApiError> {
        let page = api.list_users(self.page).await?;
        self.info.store(Some(Arc::new(PageInfo {
            current_page: page.current_page,
            last_page: page.last_page,
            per_page: page.per_page,
            total: page.total,
        })));
        Ok(page.data)
    }
}

impl MutableResource for Users {
    fn draft_from(record: &ApiUser) -> UserDraft {
        UserDraft {
            name: record.name.clone(),
            email: record.email.clone(),
            password: None,
            roles: record.roles.iter().map(|r| r.name.clone()).collect(),
            status: record.status.clone(),
            branch_id: None,
        }
    }

    fn validate(draft: &UserDraft, mode: FormMode) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.required("name", &draft.name)
            .required("email", &draft.email)
            .email("email", &draft.email);

        if mode == FormMode::Create {
            let password = draft
                .password
                .as_ref()
                .map(|p| p.expose_secret())
                .unwrap_or_default();
            v.min_len("password", password, MIN_PASSWORD_LEN);
            if draft.roles.is_empty() {
                v.required("roles", "");
            }
        }
        v.finish()
    }

    async fn create(&self, api: &ApiClient, draft: &UserDraft) -> Result<Acknowledgement, ApiError> {
        let req = RegisterRequest {
            name: draft.name.trim().to_owned(),
            email: draft.email.trim().to_owned(),
            password: draft
                .password
                .clone()
                .unwrap_or_else(|| SecretString::from(String::new())),
            roles: draft.roles.join(","),
        };
        api.register_user(&req).await
    }

    async fn update(
        &self,
        api: &ApiClient,
        id: u64,
        draft: &UserDraft,
    ) -> Result<Acknowledgement, ApiError> {
        let req = UpdateUserRequest {
            name: draft.name.trim().to_owned(),
            email: draft.email.trim().to_owned(),
            status: draft.status.clone(),
            branch_id: draft.branch_id,
            roles: (!draft.roles.is_empty()).then(|| draft.roles.clone()),
        };
        api.update_user(id, &req).await
    }

    async fn delete(&self, api: &ApiClient, id: u64) -> Result<Acknowledgement, ApiError> {
        api.delete_user(id).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn registration_requires_password_and_role() {
        let draft = UserDraft {
            name: "Ana".into(),
            email: "ana@x.com".into(),
            password: Some("12345".to_string().into()),
            ..UserDraft::default()
        };
        let errors = Users::validate(&draft, FormMode::Create).unwrap_err();
        assert!(errors.for_field("password").is_some());
        assert!(errors.for_field("roles").is_some());

        // Edits never resend the password.
        Users::validate(&draft, FormMode::Edit).unwrap();
    }
}
