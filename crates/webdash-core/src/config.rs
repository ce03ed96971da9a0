// ── Runtime dashboard configuration ──
//
// Describes *where* the backend lives and how the session credential is
// persisted. Never touches disk itself: the CLI builds a
// `DashboardConfig` from its profile and hands it in.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

/// Deployment environment. Controls the `secure` flag on the stored token.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Environment {
    #[default]
    Production,
    Development,
}

impl Environment {
    pub fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (local development backends).
    DangerAcceptInvalid,
}

impl From<&TlsVerification> for webdash_api::TlsMode {
    fn from(tls: &TlsVerification) -> Self {
        match tls {
            TlsVerification::SystemDefaults => Self::System,
            TlsVerification::CustomCa(path) => Self::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => Self::DangerAcceptInvalid,
        }
    }
}

/// Lifetime of the persisted token cookie.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Configuration for one dashboard backend.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// API root (e.g. `https://wa.acibd.com/api/webdynamo/api`).
    pub api_url: Url,
    pub environment: Environment,
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
    /// How long a stored token stays valid.
    pub token_ttl: Duration,
}

impl DashboardConfig {
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            environment: Environment::default(),
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            token_ttl: DEFAULT_TOKEN_TTL,
        }
    }

    pub(crate) fn transport(&self) -> webdash_api::TransportConfig {
        webdash_api::TransportConfig {
            tls: (&self.tls).into(),
            timeout: self.timeout,
        }
    }
}
