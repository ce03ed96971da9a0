// ── Dashboard facade ──
//
// Wires the API client, session store and toaster together for one
// backend. Front ends hold a `Dashboard` and ask it for pages.

use std::future::Future;
use std::sync::Arc;

use tracing::debug;
use webdash_api::ApiClient;

use crate::config::DashboardConfig;
use crate::crud::{CrudPage, Resource};
use crate::error::CoreError;
use crate::guard::{self, GuardDecision};
use crate::session::SessionStore;
use crate::storage::SessionStorage;
use crate::toast::Toaster;

/// Entry point for consumers. Cheaply cloneable.
#[derive(Clone)]
pub struct Dashboard {
    inner: Arc<DashboardInner>,
}

struct DashboardInner {
    config: DashboardConfig,
    api: Arc<ApiClient>,
    session: SessionStore,
    toaster: Toaster,
}

impl Dashboard {
    /// Build the HTTP client from `config` and restore any stored session.
    pub fn new(config: DashboardConfig, storage: Arc<dyn SessionStorage>) -> Result<Self, CoreError> {
        let api = ApiClient::new(config.api_url.clone(), &config.transport())?;
        Ok(Self::with_api(config, api, storage))
    }

    /// Use a pre-built client (tests, custom middleware).
    pub fn with_api(config: DashboardConfig, api: ApiClient, storage: Arc<dyn SessionStorage>) -> Self {
        let api = Arc::new(api);
        let session =
            SessionStore::with_ttl(Arc::clone(&api), storage, config.environment, config.token_ttl);
        session.initialize();

        Self {
            inner: Arc::new(DashboardInner {
                config,
                api,
                session,
                toaster: Toaster::new(),
            }),
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.inner.config
    }

    pub fn api(&self) -> &Arc<ApiClient> {
        &self.inner.api
    }

    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    pub fn toaster(&self) -> &Toaster {
        &self.inner.toaster
    }

    /// Run the route guard for a navigation to `path`.
    pub fn navigate(&self, path: &str) -> GuardDecision {
        let decision = guard::evaluate(path, self.inner.session.token_present());
        debug!(path, ?decision, "navigation");
        decision
    }

    /// A fresh page for `resource` sharing this dashboard's session and toasts.
    pub fn page<R: Resource>(&self, resource: R) -> CrudPage<R> {
        CrudPage::new(
            resource,
            Arc::clone(&self.inner.api),
            self.inner.session.clone(),
            self.inner.toaster.clone(),
        )
    }

    /// Await an ad-hoc API call, invalidating the session on a 401.
    pub async fn call<T, F>(&self, fut: F) -> Result<T, CoreError>
    where
        F: Future<Output = Result<T, webdash_api::Error>>,
    {
        fut.await.map_err(|e| {
            self.inner.session.observe(&e);
            CoreError::from(e)
        })
    }
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("api", &self.inner.api)
            .field("session", &self.inner.session)
            .finish_non_exhaustive()
    }
}
