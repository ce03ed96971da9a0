// ── Session snapshot ──
//
// The authenticated actor as persisted to `user-data.json`. Roles and
// permissions are captured at login and only change through
// `SessionStore::update_user` or `refresh_profile`.

use serde::{Deserialize, Serialize};

/// Smallest named capability unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub guard_name: String,
}

/// Named permission bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub guard_name: String,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

/// The currently authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: u64,
    pub email: String,
    pub name: String,
    pub avatar: Option<String>,
    pub email_verified_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub roles: Vec<Role>,
    pub branch: Option<String>,
    /// Role-derived and direct permissions combined.
    pub all_permissions: Vec<Permission>,
    /// Directly assigned permissions.
    pub permissions: Vec<Permission>,
}

impl Session {
    pub fn role_names(&self) -> impl Iterator<Item = &str> {
        self.roles.iter().map(|r| r.name.as_str())
    }

    /// Effective permission names, deduplicated, in snapshot order.
    pub fn permission_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for p in self.all_permissions.iter().chain(&self.permissions) {
            if !names.contains(&p.name.as_str()) {
                names.push(&p.name);
            }
        }
        names
    }
}

/// Partial update, shallow-merged into the live session.
///
/// `None` leaves a field untouched. Nullable fields use a nested `Option`
/// so they can be cleared explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionUpdate {
    pub email: Option<String>,
    pub name: Option<String>,
    pub avatar: Option<Option<String>>,
    pub email_verified_at: Option<Option<String>>,
    pub updated_at: Option<String>,
    pub roles: Option<Vec<Role>>,
    pub branch: Option<Option<String>>,
    pub all_permissions: Option<Vec<Permission>>,
    pub permissions: Option<Vec<Permission>>,
}

impl SessionUpdate {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Merge into `session`, field by field.
    pub fn apply(self, session: &mut Session) {
        if let Some(v) = self.email {
            session.email = v;
        }
        if let Some(v) = self.name {
            session.name = v;
        }
        if let Some(v) = self.avatar {
            session.avatar = v;
        }
        if let Some(v) = self.email_verified_at {
            session.email_verified_at = v;
        }
        if let Some(v) = self.updated_at {
            session.updated_at = v;
        }
        if let Some(v) = self.roles {
            session.roles = v;
        }
        if let Some(v) = self.branch {
            session.branch = v;
        }
        if let Some(v) = self.all_permissions {
            session.all_permissions = v;
        }
        if let Some(v) = self.permissions {
            session.permissions = v;
        }
    }
}
