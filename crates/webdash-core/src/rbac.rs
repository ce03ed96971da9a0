// ── Role-based access checks ──
//
// Pure functions over a session snapshot. Nothing here talks to the
// backend: a permission revoked server-side stays effective until the
// next login or `SessionStore::refresh_profile`.

use crate::model::Session;

/// Case-insensitive role membership. `false` without a session.
pub fn has_role(session: Option<&Session>, role: &str) -> bool {
    session.is_some_and(|s| s.roles.iter().any(|r| r.name.eq_ignore_ascii_case(role)))
}

/// Case-insensitive permission check against the effective permission set
/// first, then the directly assigned set. `false` without a session.
pub fn has_permission(session: Option<&Session>, permission: &str) -> bool {
    let Some(session) = session else {
        return false;
    };
    session
        .all_permissions
        .iter()
        .any(|p| p.name.eq_ignore_ascii_case(permission))
        || session
            .permissions
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(permission))
}

/// A single access requirement, as asked by a caller deciding what to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    Role(String),
    Permission(String),
}

impl Requirement {
    pub fn is_met(&self, session: Option<&Session>) -> bool {
        match self {
            Self::Role(name) => has_role(session, name),
            Self::Permission(name) => has_permission(session, name),
        }
    }
}

impl std::fmt::Display for Requirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Role(name) => write!(f, "role {name}"),
            Self::Permission(name) => write!(f, "permission {name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Permission, Role};

    fn perm(name: &str) -> Permission {
        Permission {
            id: 0,
            name: name.into(),
            guard_name: "web".into(),
        }
    }

    fn session() -> Session {
        Session {
            id: 1,
            email: "admin@x.com".into(),
            name: "Admin".into(),
            avatar: None,
            email_verified_at: None,
            created_at: String::new(),
            updated_at: String::new(),
            roles: vec![Role {
                id: 1,
                name: "Admin".into(),
                guard_name: "web".into(),
                permissions: vec![],
            }],
            branch: None,
            all_permissions: vec![perm("user-list")],
            permissions: vec![perm("Report-Export")],
        }
    }

    #[test]
    fn role_match_ignores_case() {
        let s = session();
        assert!(has_role(Some(&s), "admin"));
        assert!(has_role(Some(&s), "ADMIN"));
        assert!(!has_role(Some(&s), "editor"));
    }

    #[test]
    fn permission_checks_both_sets() {
        let s = session();
        assert!(has_permission(Some(&s), "USER-LIST"));
        assert!(has_permission(Some(&s), "report-export"));
        assert!(!has_permission(Some(&s), "user-delete"));
    }

    #[test]
    fn no_session_denies_everything() {
        assert!(!has_role(None, "admin"));
        assert!(!has_permission(None, "user-list"));
        assert!(!Requirement::Role("admin".into()).is_met(None));
    }
}
