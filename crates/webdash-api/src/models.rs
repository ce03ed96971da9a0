// Wire models for the dashboard REST API
//
// Field names mirror the backend's snake_case JSON. Every list/detail
// payload is deserialized leniently (`#[serde(default)]`) because the
// backend omits nullable columns rather than sending `null`.

use std::collections::BTreeMap;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ── Envelope ────────────────────────────────────────────────────────

/// The backend's `status` field, normalised from its four spellings.
///
/// `"success"`/`"Success"` and `"error"`/`"Error"` both occur in the wild;
/// downstream code only ever sees this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ApiStatus {
    #[serde(rename = "success", alias = "Success")]
    Success,
    #[serde(rename = "error", alias = "Error")]
    Error,
}

/// Generic `{status, message, ...}` envelope. The payload fields are
/// flattened so each endpoint can name its own key (`data`, `users`, `role`).
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: Option<ApiStatus>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub payload: T,
}

/// Result of a mutating call that returns no entity worth keeping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Acknowledgement {
    /// Backend-supplied message, if any.
    pub message: Option<String>,
}

// ── Auth ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct LoginPayload {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<ApiUser>,
}

/// Successful `POST /login`.
#[derive(Debug, Clone)]
pub struct LoginSuccess {
    pub token: SecretString,
    pub user: ApiUser,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProfilePayload {
    pub user: ApiUser,
}

// ── Users ───────────────────────────────────────────────────────────

/// User record as returned by `/login`, `/profile` and `/user_list`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiUser {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub email_verified_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub roles: Vec<ApiRole>,
    pub branch: Option<String>,
    pub all_permissions: Vec<ApiPermission>,
    pub permissions: Vec<ApiPermission>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Laravel-style pagination link.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLink {
    pub url: Option<String>,
    pub label: String,
    pub active: bool,
}

/// Laravel-style paginated collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Page<T> {
    pub current_page: u32,
    pub data: Vec<T>,
    pub from: Option<u32>,
    pub last_page: u32,
    pub per_page: u32,
    pub to: Option<u32>,
    pub total: u64,
    pub next_page_url: Option<String>,
    pub prev_page_url: Option<String>,
    pub links: Vec<PageLink>,
}

impl<T> Page<T> {
    /// Whether another page follows this one.
    pub fn has_next(&self) -> bool {
        self.current_page < self.last_page
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserListPayload {
    #[serde(default)]
    pub users: Page<ApiUser>,
}

/// `POST /register` body.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
    /// Comma-separated role names.
    pub roles: String,
}

/// `PUT /user_update/{id}` body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateUserRequest {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
}

// ── Roles ───────────────────────────────────────────────────────────

/// Role with its nested permissions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiRole {
    pub id: u64,
    pub name: String,
    pub guard_name: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub permissions: Vec<ApiPermission>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RoleListPayload {
    #[serde(default)]
    pub role: Vec<ApiRole>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RoleNamesPayload {
    #[serde(default)]
    pub roles: BTreeMap<String, String>,
}

/// One row of `GET /role_wise_user`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleMember {
    pub user_id: u64,
    pub email: String,
    pub name: String,
    pub role_name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RoleMembersPayload {
    #[serde(default)]
    pub roles: BTreeMap<String, Vec<RoleMember>>,
}

/// `POST /roles` body. Update uses the same data, query-encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoleRequest {
    pub name: String,
    pub permission: Vec<String>,
}

// ── Permissions ─────────────────────────────────────────────────────

/// Permission as embedded in roles and users.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiPermission {
    pub id: u64,
    pub name: String,
    pub guard_name: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Simplified permission from `GET /permissions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionItem {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PermissionListPayload {
    #[serde(default)]
    pub permission: Vec<PermissionItem>,
}

/// `POST /permissions` and `PUT /permissions/{id}` body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PermissionRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guard_name: Option<String>,
}

// ── Projects ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Technology {
    pub name: String,
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiProject {
    pub id: u64,
    pub title: String,
    pub short_description: String,
    pub category: String,
    pub image_url: Option<String>,
    pub duration: String,
    pub team_size: String,
    pub rating: String,
    pub client: String,
    pub year: String,
    pub technologies: Vec<Technology>,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
    #[serde(deserialize_with = "flag")]
    pub status: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// File attached to a multipart project submission as `image_url`.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Create/update payload for projects.
///
/// Serialized as JSON when `image` is `None`, otherwise as a multipart form.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectPayload {
    pub title: String,
    pub short_description: String,
    pub category: String,
    pub duration: String,
    pub team_size: String,
    pub rating: String,
    pub client: String,
    pub year: String,
    pub technologies: Vec<Technology>,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
    pub status: bool,
    #[serde(skip)]
    pub image: Option<ImageUpload>,
}

impl ProjectPayload {
    /// Text fields of the multipart form, in submission order.
    pub(crate) fn form_fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("title".to_owned(), self.title.clone()),
            ("short_description".to_owned(), self.short_description.clone()),
            ("category".to_owned(), self.category.clone()),
            ("duration".to_owned(), self.duration.clone()),
            ("team_size".to_owned(), self.team_size.clone()),
            ("rating".to_owned(), self.rating.clone()),
            ("client".to_owned(), self.client.clone()),
            ("year".to_owned(), self.year.clone()),
            ("live_url".to_owned(), self.live_url.clone().unwrap_or_default()),
            ("github_url".to_owned(), self.github_url.clone().unwrap_or_default()),
            ("status".to_owned(), if self.status { "1" } else { "0" }.to_owned()),
        ];
        for (i, tech) in self.technologies.iter().enumerate() {
            fields.push((format!("technologies[{i}][name]"), tech.name.clone()));
            fields.push((format!("technologies[{i}][icon]"), tech.icon.clone()));
        }
        fields
    }
}

/// An absent `data` key (e.g. a non-JSON 200) decodes as `T::default()`.
#[derive(Debug, Deserialize)]
pub(crate) struct DataPayload<T> {
    #[serde(default)]
    pub data: T,
}

// ── SEO ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSeoPage {
    pub id: u64,
    pub page_name: String,
    pub page_slug: String,
    pub meta_title: String,
    pub meta_description: String,
    pub meta_keywords: String,
    #[serde(deserialize_with = "flag")]
    pub status: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// `POST /seos` and `PUT /seos/{id}` body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeoRequest {
    pub page_name: String,
    pub page_slug: String,
    pub meta_title: String,
    pub meta_description: String,
    pub meta_keywords: String,
    pub status: bool,
}

// ── Contact ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactMessage {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email_address: String,
    pub company: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub created_at: String,
    pub updated_at: String,
}

impl ContactMessage {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }
}

/// `GET /contact-messages` uses `{success: bool}` instead of `status`.
#[derive(Debug, Deserialize)]
pub(crate) struct ContactListPayload {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Vec<ContactMessage>,
}

// ── Serde helpers ───────────────────────────────────────────────────

fn expose<S: Serializer>(secret: &SecretString, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(secret.expose_secret())
}

/// Unknown status strings are treated as absent rather than failing the parse.
fn lenient_status<'de, D: Deserializer<'de>>(d: D) -> Result<Option<ApiStatus>, D::Error> {
    let raw = Option::<serde_json::Value>::deserialize(d)?;
    Ok(raw.and_then(|v| serde_json::from_value(v).ok()))
}

/// Accept `true`/`false`, `1`/`0` and `"1"`/`"0"` for boolean columns.
fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Int(i64),
        Str(String),
    }

    Ok(match Raw::deserialize(d)? {
        Raw::Bool(b) => b,
        Raw::Int(n) => n != 0,
        Raw::Str(s) => matches!(s.as_str(), "1" | "true" | "active"),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use serde_json::json;

    #[test]
    fn status_accepts_both_capitalisations() {
        for (raw, expected) in [
            ("success", ApiStatus::Success),
            ("Success", ApiStatus::Success),
            ("error", ApiStatus::Error),
            ("Error", ApiStatus::Error),
        ] {
            let parsed: ApiStatus = serde_json::from_value(json!(raw)).unwrap();
            assert_eq!(parsed, expected);
        }
    }

    #[test]
    fn project_status_accepts_numeric_flags() {
        let project: ApiProject =
            serde_json::from_value(json!({ "id": 3, "title": "Site", "status": 1 })).unwrap();
        assert!(project.status);

        let project: ApiProject =
            serde_json::from_value(json!({ "id": 3, "status": "0" })).unwrap();
        assert!(!project.status);
    }

    #[test]
    fn project_form_fields_flatten_technologies() {
        let payload = ProjectPayload {
            title: "Portal".into(),
            technologies: vec![
                Technology { name: "Rust".into(), icon: "rust.svg".into() },
                Technology { name: "Vue".into(), icon: "vue.svg".into() },
            ],
            status: true,
            ..ProjectPayload::default()
        };
        let fields = payload.form_fields();

        assert!(fields.contains(&("status".into(), "1".into())));
        assert!(fields.contains(&("github_url".into(), String::new())));
        assert!(fields.contains(&("technologies[1][icon]".into(), "vue.svg".into())));
    }

    #[test]
    fn register_request_exposes_password_on_the_wire() {
        let req = RegisterRequest {
            name: "Ana".into(),
            email: "ana@x.com".into(),
            password: "secret1".to_string().into(),
            roles: "admin".into(),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["password"], "secret1");
        assert!(!format!("{req:?}").contains("secret1"));
    }
}
