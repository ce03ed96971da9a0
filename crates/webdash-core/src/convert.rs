// ── API → domain conversion ──
//
// Maps `webdash_api` wire types into the persisted session snapshot.

use webdash_api::{ApiPermission, ApiRole, ApiUser};

use crate::model::{Permission, Role, Session, SessionUpdate};

const AVATAR_BASE: &str = "https://api.dicebear.com/7.x/avataaars/svg";

/// Generated avatar URL for an email address.
pub fn avatar_url(email: &str) -> String {
    let seed: String = url::form_urlencoded::byte_serialize(email.as_bytes()).collect();
    format!("{AVATAR_BASE}?seed={seed}")
}

impl From<&ApiPermission> for Permission {
    fn from(p: &ApiPermission) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            guard_name: p.guard_name.clone(),
        }
    }
}

impl From<&ApiRole> for Role {
    fn from(r: &ApiRole) -> Self {
        Self {
            id: r.id,
            name: r.name.clone(),
            guard_name: r.guard_name.clone(),
            permissions: r.permissions.iter().map(Permission::from).collect(),
        }
    }
}

impl From<&ApiUser> for Session {
    fn from(u: &ApiUser) -> Self {
        Self {
            id: u.id,
            email: u.email.clone(),
            name: u.name.clone(),
            avatar: Some(avatar_url(&u.email)),
            email_verified_at: u.email_verified_at.clone(),
            created_at: u.created_at.clone(),
            updated_at: u.updated_at.clone(),
            roles: u.roles.iter().map(Role::from).collect(),
            branch: u.branch.clone(),
            all_permissions: u.all_permissions.iter().map(Permission::from).collect(),
            permissions: u.permissions.iter().map(Permission::from).collect(),
        }
    }
}

/// Everything `/profile` can change about an existing session.
impl From<&ApiUser> for SessionUpdate {
    fn from(u: &ApiUser) -> Self {
        let fresh = Session::from(u);
        Self {
            email: Some(fresh.email),
            name: Some(fresh.name),
            avatar: Some(fresh.avatar),
            email_verified_at: Some(fresh.email_verified_at),
            updated_at: Some(fresh.updated_at),
            roles: Some(fresh.roles),
            branch: Some(fresh.branch),
            all_permissions: Some(fresh.all_permissions),
            permissions: Some(fresh.permissions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avatar_is_seeded_by_email() {
        let user = ApiUser {
            id: 1,
            email: "admin@x.com".into(),
            ..ApiUser::default()
        };
        let session = Session::from(&user);
        assert_eq!(
            session.avatar.as_deref(),
            Some("https://api.dicebear.com/7.x/avataaars/svg?seed=admin%40x.com")
        );
    }
}
