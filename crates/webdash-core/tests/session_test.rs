#![allow(clippy::unwrap_used)]
// Session lifecycle against a mocked backend.

use std::sync::Arc;

use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use webdash_api::ApiClient;
use webdash_core::guard;
use webdash_core::{
    CoreError, Environment, FileStorage, GuardDecision, MemoryStorage, SameSite, Session,
    SessionState, SessionStorage, SessionStore, SessionUpdate, StorageError, StoredToken,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn user_json() -> serde_json::Value {
    json!({
        "id": 7,
        "name": "Admin",
        "email": "admin@x.com",
        "email_verified_at": null,
        "created_at": "2024-01-01T00:00:00.000000Z",
        "updated_at": "2024-01-02T00:00:00.000000Z",
        "roles": [{ "id": 1, "name": "Admin", "guard_name": "web", "permissions": [] }],
        "branch": null,
        "all_permissions": [{ "id": 4, "name": "user-list", "guard_name": "web" }],
        "permissions": []
    })
}

fn api_for(base: &str) -> Arc<ApiClient> {
    Arc::new(ApiClient::with_client(
        reqwest::Client::new(),
        Url::parse(base).unwrap(),
    ))
}

fn store(server: &MockServer, storage: Arc<dyn SessionStorage>) -> SessionStore {
    SessionStore::new(api_for(&server.uri()), storage, Environment::Production)
}

fn password(p: &str) -> SecretString {
    p.to_string().into()
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({ "email": "admin@x.com", "password": "secret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "message": "Login successful",
            "token": "tok-abc",
            "user": user_json(),
        })))
        .mount(server)
        .await;
}

fn seeded_session() -> Session {
    Session {
        id: 7,
        email: "admin@x.com".into(),
        name: "Admin".into(),
        avatar: None,
        email_verified_at: None,
        created_at: "2024-01-01".into(),
        updated_at: "2024-01-01".into(),
        roles: vec![],
        branch: None,
        all_permissions: vec![],
        permissions: vec![],
    }
}

fn live_token() -> StoredToken {
    StoredToken {
        token: "stored-tok".to_string().into(),
        expires_at: Utc::now() + Duration::days(3),
        secure: true,
        same_site: SameSite::Lax,
    }
}

// ── Initialization ──────────────────────────────────────────────────

#[tokio::test]
async fn test_initialize_without_stored_session() {
    let server = MockServer::start().await;
    let session = store(&server, Arc::new(MemoryStorage::new()));

    assert!(session.is_loading());
    session.initialize();

    assert_eq!(
        session.state(),
        SessionState {
            user: None,
            is_loading: false,
            is_authenticated: false,
        }
    );
}

#[tokio::test]
async fn test_initialize_restores_stored_session() {
    let server = MockServer::start().await;
    let storage = Arc::new(MemoryStorage::new());
    storage.save_token(&live_token()).unwrap();
    storage.save_user(&seeded_session()).unwrap();

    let session = store(&server, storage);
    session.initialize();

    assert!(session.is_authenticated());
    assert_eq!(session.current().unwrap().email, "admin@x.com");
    assert!(session.token_present());
}

#[tokio::test]
async fn test_initialize_ignores_user_without_token() {
    let server = MockServer::start().await;
    let storage = Arc::new(MemoryStorage::new());
    storage.save_user(&seeded_session()).unwrap();

    let session = store(&server, storage);
    session.initialize();

    assert!(!session.is_authenticated());
    assert!(session.current().is_none());
}

#[tokio::test]
async fn test_corrupt_snapshot_is_cleared() {
    let server = MockServer::start().await;
    let storage = Arc::new(MemoryStorage::new().with_raw_user("{definitely not json"));
    storage.save_token(&live_token()).unwrap();

    let session = store(&server, Arc::clone(&storage) as Arc<dyn SessionStorage>);
    session.initialize();

    assert!(!session.is_authenticated());
    assert!(!session.is_loading());
    assert!(storage.raw_user().is_none());
    assert!(storage.load_token().unwrap().is_none());
}

// ── Login ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_persists_token_and_user() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(FileStorage::new(dir.path()));

    let session = store(&server, Arc::clone(&storage) as Arc<dyn SessionStorage>);
    session.initialize();
    let redirect = session.login("admin@x.com", &password("secret")).await.unwrap();

    assert_eq!(redirect.location, "/dashboard");
    assert!(session.is_authenticated());
    assert!(session.has_role("admin"));
    assert!(session.has_permission("USER-LIST"));
    assert!(!session.has_permission("user-delete"));

    let token = storage.active_token().unwrap().unwrap();
    assert_eq!(token.token.expose_secret(), "tok-abc");
    assert!(token.secure);
    assert_eq!(token.same_site, SameSite::Lax);
    let remaining = token.expires_at - Utc::now();
    assert!(remaining > Duration::days(6) && remaining <= Duration::days(7));

    let user = storage.load_user().unwrap();
    assert_eq!(user.clone().map(Arc::new), session.current());
    assert!(user.unwrap().avatar.unwrap().contains("seed=admin%40x.com"));

    assert_eq!(
        guard::evaluate("/dashboard", session.token_present()),
        GuardDecision::Allow
    );
}

/// Accepts the token but fails to persist the user snapshot.
#[derive(Debug, Default)]
struct UserSlotFails(MemoryStorage);

impl SessionStorage for UserSlotFails {
    fn load_token(&self) -> Result<Option<StoredToken>, StorageError> {
        self.0.load_token()
    }
    fn save_token(&self, token: &StoredToken) -> Result<(), StorageError> {
        self.0.save_token(token)
    }
    fn clear_token(&self) -> Result<(), StorageError> {
        self.0.clear_token()
    }
    fn load_user(&self) -> Result<Option<Session>, StorageError> {
        self.0.load_user()
    }
    fn save_user(&self, _user: &Session) -> Result<(), StorageError> {
        Err(StorageError::Poisoned { slot: "user" })
    }
    fn clear_user(&self) -> Result<(), StorageError> {
        self.0.clear_user()
    }
}

#[tokio::test]
async fn test_login_leaves_no_token_when_snapshot_cannot_be_saved() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    let storage = Arc::new(UserSlotFails::default());

    let session = store(&server, Arc::clone(&storage) as Arc<dyn SessionStorage>);
    session.initialize();
    let err = session.login("admin@x.com", &password("secret")).await.unwrap_err();

    assert!(matches!(err, CoreError::Storage(_)));
    assert!(storage.load_token().unwrap().is_none());
    assert!(!session.is_authenticated());
    assert!(!session.token_present());
    assert_eq!(
        guard::evaluate("/auth/login", session.token_present()),
        GuardDecision::Allow
    );
}

#[tokio::test]
async fn test_login_in_development_is_not_secure() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    let storage = Arc::new(MemoryStorage::new());

    let session = SessionStore::new(
        api_for(&server.uri()),
        Arc::clone(&storage) as Arc<dyn SessionStorage>,
        Environment::Development,
    );
    session.login("admin@x.com", &password("secret")).await.unwrap();

    assert!(!storage.load_token().unwrap().unwrap().secure);
}

#[tokio::test]
async fn test_login_requires_credentials() {
    let server = MockServer::start().await;
    let session = store(&server, Arc::new(MemoryStorage::new()));

    let err = session.login("  ", &password("x")).await.unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));
    assert!(err.to_string().contains("Email and password are required"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_rejected_login_keeps_session_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "status": "error",
            "message": "Invalid credentials",
        })))
        .mount(&server)
        .await;
    let storage = Arc::new(MemoryStorage::new());

    let session = store(&server, Arc::clone(&storage) as Arc<dyn SessionStorage>);
    session.initialize();
    let err = session.login("admin@x.com", &password("wrong")).await.unwrap_err();

    match err {
        CoreError::AuthenticationFailed { message } => assert_eq!(message, "Invalid credentials"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!session.is_authenticated());
    assert!(!session.is_loading());
    assert!(storage.load_token().unwrap().is_none());
}

#[tokio::test]
async fn test_unreachable_backend_is_a_network_error() {
    let session = SessionStore::new(
        api_for("http://127.0.0.1:9"),
        Arc::new(MemoryStorage::new()),
        Environment::Production,
    );

    let err = session.login("admin@x.com", &password("secret")).await.unwrap_err();

    assert!(matches!(err, CoreError::Network { .. }), "got {err:?}");
    assert!(!session.is_authenticated());
}

// ── Logout ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_logout_clears_even_when_backend_fails() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("POST"))
        .and(path("/logout"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    let storage = Arc::new(MemoryStorage::new());

    let session = store(&server, Arc::clone(&storage) as Arc<dyn SessionStorage>);
    session.login("admin@x.com", &password("secret")).await.unwrap();
    let redirect = session.logout().await;

    assert_eq!(redirect.location, "/auth/login");
    assert!(!session.is_authenticated());
    assert!(session.current().is_none());
    assert!(storage.load_token().unwrap().is_none());
    assert!(storage.raw_user().is_none());
}

#[tokio::test]
async fn test_logout_clears_when_backend_unreachable() {
    let storage = Arc::new(MemoryStorage::new());
    storage.save_token(&live_token()).unwrap();
    storage.save_user(&seeded_session()).unwrap();

    let session = SessionStore::new(
        api_for("http://127.0.0.1:9"),
        Arc::clone(&storage) as Arc<dyn SessionStorage>,
        Environment::Production,
    );
    session.initialize();
    assert!(session.is_authenticated());

    session.logout().await;

    assert!(!session.is_authenticated());
    assert!(!session.token_present());
}

// ── Updates ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_user_merges_and_persists() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    let storage = Arc::new(MemoryStorage::new());

    let session = store(&server, Arc::clone(&storage) as Arc<dyn SessionStorage>);
    session.login("admin@x.com", &password("secret")).await.unwrap();
    let mut rx = session.subscribe();
    rx.borrow_and_update();

    session.update_user(SessionUpdate::name("Renamed")).unwrap();

    assert!(rx.has_changed().unwrap());
    let current = session.current().unwrap();
    assert_eq!(current.name, "Renamed");
    assert_eq!(current.email, "admin@x.com");
    assert_eq!(current.roles.len(), 1);
    assert_eq!(storage.load_user().unwrap().unwrap().name, "Renamed");
}

#[tokio::test]
async fn test_update_user_without_session_is_noop() {
    let server = MockServer::start().await;
    let storage = Arc::new(MemoryStorage::new());
    let session = store(&server, Arc::clone(&storage) as Arc<dyn SessionStorage>);
    session.initialize();

    session.update_user(SessionUpdate::name("Ghost")).unwrap();

    assert!(session.current().is_none());
    assert!(storage.raw_user().is_none());
}

#[tokio::test]
async fn test_refresh_profile_replaces_permissions() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    let mut fresh = user_json();
    fresh["all_permissions"] = json!([{ "id": 9, "name": "project-create", "guard_name": "web" }]);
    Mock::given(method("GET"))
        .and(path("/profile"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "status": "success", "user": fresh })),
        )
        .mount(&server)
        .await;

    let session = store(&server, Arc::new(MemoryStorage::new()));
    session.login("admin@x.com", &password("secret")).await.unwrap();
    assert!(session.has_permission("user-list"));

    let refreshed = session.refresh_profile().await.unwrap();

    assert_eq!(refreshed.permission_names(), vec!["project-create"]);
    assert!(!session.has_permission("user-list"));
    assert!(session.has_permission("project-create"));
}

#[tokio::test]
async fn test_refresh_profile_requires_session() {
    let server = MockServer::start().await;
    let session = store(&server, Arc::new(MemoryStorage::new()));
    session.initialize();

    let err = session.refresh_profile().await.unwrap_err();
    assert!(matches!(err, CoreError::NotAuthenticated));
}

// ── Invalidation ────────────────────────────────────────────────────

#[tokio::test]
async fn test_unauthorized_response_invalidates_session() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/profile"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "Unauthenticated." })))
        .mount(&server)
        .await;
    let storage = Arc::new(MemoryStorage::new());

    let session = store(&server, Arc::clone(&storage) as Arc<dyn SessionStorage>);
    session.login("admin@x.com", &password("secret")).await.unwrap();

    let err = session.refresh_profile().await.unwrap_err();

    assert!(matches!(err, CoreError::SessionExpired));
    assert!(!session.is_authenticated());
    assert!(storage.load_token().unwrap().is_none());
}
