// ── Session store ──
//
// Single source of truth for who is logged in. State lives in a
// `watch` channel so front ends can observe transitions; the token and
// user snapshot are persisted through a `SessionStorage` so a session
// survives restarts. Constructed once and injected wherever needed.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{TimeDelta, Utc};
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::watch;
use tracing::{debug, info, warn};
use webdash_api::ApiClient;

use crate::config::{DEFAULT_TOKEN_TTL, Environment};
use crate::error::CoreError;
use crate::guard::Redirect;
use crate::model::{Session, SessionUpdate};
use crate::rbac;
use crate::storage::{SameSite, SessionStorage, StoredToken};

/// Observable session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub user: Option<Arc<Session>>,
    pub is_loading: bool,
    pub is_authenticated: bool,
}

impl Default for SessionState {
    /// Loading until `initialize` has run.
    fn default() -> Self {
        Self {
            user: None,
            is_loading: true,
            is_authenticated: false,
        }
    }
}

impl SessionState {
    fn signed_out() -> Self {
        Self {
            user: None,
            is_loading: false,
            is_authenticated: false,
        }
    }

    fn signed_in(user: Session) -> Self {
        Self {
            user: Some(Arc::new(user)),
            is_loading: false,
            is_authenticated: true,
        }
    }
}

/// Session service. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    api: Arc<ApiClient>,
    storage: Arc<dyn SessionStorage>,
    environment: Environment,
    token_ttl: Duration,
    state: watch::Sender<SessionState>,
    initialized: AtomicBool,
}

impl SessionStore {
    pub fn new(api: Arc<ApiClient>, storage: Arc<dyn SessionStorage>, environment: Environment) -> Self {
        Self::with_ttl(api, storage, environment, DEFAULT_TOKEN_TTL)
    }

    pub fn with_ttl(
        api: Arc<ApiClient>,
        storage: Arc<dyn SessionStorage>,
        environment: Environment,
        token_ttl: Duration,
    ) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            inner: Arc::new(SessionInner {
                api,
                storage,
                environment,
                token_ttl,
                state,
                initialized: AtomicBool::new(false),
            }),
        }
    }

    // ── Observation ──────────────────────────────────────────────────

    /// Subscribe to state transitions.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    pub fn state(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    pub fn current(&self) -> Option<Arc<Session>> {
        self.inner.state.borrow().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().is_loading
    }

    /// Whether an unexpired token is stored. This is all the route guard
    /// looks at.
    pub fn token_present(&self) -> bool {
        match self.inner.storage.active_token() {
            Ok(token) => token.is_some(),
            Err(e) => {
                warn!(error = %e, "unreadable token; treating as absent");
                false
            }
        }
    }

    // ── RBAC ─────────────────────────────────────────────────────────

    pub fn has_role(&self, role: &str) -> bool {
        rbac::has_role(self.current().as_deref(), role)
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        rbac::has_permission(self.current().as_deref(), permission)
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Restore a persisted session. Runs once; later calls are no-ops.
    ///
    /// Both a live token and a readable snapshot are required. Unreadable
    /// storage clears both slots and leaves the session empty.
    pub fn initialize(&self) {
        if self.inner.initialized.swap(true, Ordering::SeqCst) {
            debug!("session already initialized");
            return;
        }

        let storage = &self.inner.storage;
        let restored = storage
            .active_token()
            .and_then(|token| Ok((token, storage.load_user()?)));

        match restored {
            Ok((Some(token), Some(user))) => {
                info!(user = %user.email, "restored session");
                self.inner.api.set_token(Some(token.token));
                self.inner.state.send_replace(SessionState::signed_in(user));
            }
            Ok(_) => {
                debug!("no stored session");
                self.inner.state.send_modify(|s| s.is_loading = false);
            }
            Err(e) => {
                warn!(error = %e, "failed to restore session; clearing storage");
                self.clear_storage();
                self.inner.state.send_replace(SessionState::signed_out());
            }
        }
    }

    /// Authenticate and persist the session.
    ///
    /// On success returns the redirect into the protected area.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<Redirect, CoreError> {
        self.inner.state.send_modify(|s| s.is_loading = true);

        let result = self.try_login(email.trim(), password).await;
        if let Err(ref e) = result {
            warn!(error = %e, "login failed");
            self.inner.state.send_modify(|s| s.is_loading = false);
        }
        result
    }

    async fn try_login(&self, email: &str, password: &SecretString) -> Result<Redirect, CoreError> {
        if email.is_empty() || password.expose_secret().is_empty() {
            let field = if email.is_empty() { "email" } else { "password" };
            return Err(CoreError::validation(field, "Email and password are required"));
        }

        let login = self.inner.api.login(email, password).await.map_err(|e| match e {
            webdash_api::Error::Rejected { message }
            | webdash_api::Error::Unauthorized { message }
            | webdash_api::Error::Api { message, .. } => CoreError::AuthenticationFailed { message },
            other => CoreError::from(other),
        })?;

        let session = Session::from(&login.user);
        let ttl = TimeDelta::from_std(self.inner.token_ttl).unwrap_or(TimeDelta::days(7));
        let token = StoredToken {
            token: login.token,
            expires_at: Utc::now() + ttl,
            secure: self.inner.environment.is_production(),
            same_site: SameSite::Lax,
        };

        // A token without its user snapshot would read as logged in.
        let persisted = self
            .inner
            .storage
            .save_token(&token)
            .and_then(|()| self.inner.storage.save_user(&session));
        if let Err(e) = persisted {
            self.clear_storage();
            return Err(e.into());
        }
        self.inner.api.set_token(Some(token.token));

        info!(user = %session.email, "logged in");
        self.inner.state.send_replace(SessionState::signed_in(session));
        Ok(Redirect::dashboard())
    }

    /// End the session. Never fails: the backend call is best-effort and
    /// local state is cleared regardless.
    pub async fn logout(&self) -> Redirect {
        self.inner.state.send_modify(|s| s.is_loading = true);

        if let Err(e) = self.inner.api.logout().await {
            warn!(error = %e, "backend logout failed; clearing local session anyway");
        }

        self.inner.api.set_token(None);
        self.clear_storage();
        self.inner.state.send_replace(SessionState::signed_out());
        info!("logged out");
        Redirect::login()
    }

    /// Shallow-merge `update` into the live session and persist it.
    /// No-op without a session.
    pub fn update_user(&self, update: SessionUpdate) -> Result<(), CoreError> {
        let Some(current) = self.current() else {
            debug!("update_user without a session; ignoring");
            return Ok(());
        };

        let mut merged = Session::clone(&current);
        update.apply(&mut merged);
        self.inner.storage.save_user(&merged)?;
        self.inner.state.send_modify(|s| s.user = Some(Arc::new(merged)));
        Ok(())
    }

    /// Re-read the user from `GET /profile`, replacing the role and
    /// permission snapshot.
    pub async fn refresh_profile(&self) -> Result<Arc<Session>, CoreError> {
        if self.current().is_none() {
            return Err(CoreError::NotAuthenticated);
        }

        let user = match self.inner.api.profile().await {
            Ok(user) => user,
            Err(e) => {
                self.observe(&e);
                return Err(e.into());
            }
        };

        self.update_user(SessionUpdate::from(&user))?;
        self.current().ok_or(CoreError::NotAuthenticated)
    }

    /// Inspect an API failure; a 401 force-clears the session.
    /// Returns `true` if the session was invalidated.
    pub fn observe(&self, err: &webdash_api::Error) -> bool {
        if err.is_unauthorized() {
            self.invalidate();
            true
        } else {
            false
        }
    }

    /// Drop the session after the backend rejected the token.
    pub fn invalidate(&self) {
        warn!("token rejected by backend; clearing session");
        self.inner.api.set_token(None);
        self.clear_storage();
        self.inner.state.send_replace(SessionState::signed_out());
    }

    fn clear_storage(&self) {
        if let Err(e) = self.inner.storage.clear_all() {
            warn!(error = %e, "failed to clear session storage");
        }
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &*self.inner.state.borrow())
            .field("environment", &self.inner.environment)
            .finish_non_exhaustive()
    }
}
