//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text and distinct exit codes.

use miette::Diagnostic;
use thiserror::Error;

use webdash_config::ConfigError;
use webdash_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the dashboard backend")]
    #[diagnostic(
        code(webdash::connection_failed),
        help(
            "{message}\n\
             Check the profile's api_url, or pass --insecure (-k) for a self-signed backend."
        )
    )]
    ConnectionFailed { message: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(webdash::auth_failed),
        help("Check the email and password, or store the password with: webdash config set-password")
    )]
    AuthFailed { message: String },

    #[error("Not logged in")]
    #[diagnostic(
        code(webdash::not_logged_in),
        help("Run: webdash login\nThe guard would redirect to {redirect}")
    )]
    NotLoggedIn { redirect: String },

    #[error("Session expired")]
    #[diagnostic(code(webdash::session_expired), help("The stored session was cleared. Run: webdash login"))]
    SessionExpired,

    #[error("No password configured for profile '{profile}'")]
    #[diagnostic(
        code(webdash::no_credentials),
        help(
            "Store one with: webdash config set-password\n\
             Or set WEBDASH_PASSWORD."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(webdash::not_found),
        help("Run: webdash {list_command} to see available records")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(webdash::api_error))]
    ApiError { message: String, status: Option<u16> },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(webdash::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(webdash::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: webdash config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("{message}")]
    #[diagnostic(code(webdash::config))]
    Config { message: String },

    #[error("Session storage error: {message}")]
    #[diagnostic(
        code(webdash::storage),
        help("Remove the profile's session directory and log in again.")
    )]
    Storage { message: String },

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Prompt failed: {message}")]
    #[diagnostic(
        code(webdash::prompt),
        help("Pass the value as a flag, or --yes (-y) to skip confirmation.")
    )]
    Prompt { message: String },

    /// Already reported on stdout/stderr; only the exit code remains.
    #[error("exit status {0}")]
    Reported(i32),

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. }
            | Self::NotLoggedIn { .. }
            | Self::SessionExpired
            | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } | Self::ApiError { status: Some(404), .. } => exit_code::NOT_FOUND,
            Self::ApiError { status: Some(403), .. } => exit_code::PERMISSION,
            Self::Validation { .. } | Self::Prompt { .. } => exit_code::USAGE,
            Self::Reported(code) => *code,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(errors) => CliError::Validation {
                field: errors
                    .iter()
                    .map(|e| e.field)
                    .collect::<Vec<_>>()
                    .join(", "),
                reason: errors
                    .iter()
                    .map(|e| e.message.as_str())
                    .collect::<Vec<_>>()
                    .join("; "),
            },

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::SessionExpired => CliError::SessionExpired,

            CoreError::NotAuthenticated => CliError::NotLoggedIn {
                redirect: webdash_core::guard::LOGIN_PATH.into(),
            },

            CoreError::Api { message, status } => CliError::ApiError { message, status },

            CoreError::Network { message } => CliError::ConnectionFailed { message },

            CoreError::NotFound { entity, identifier } => CliError::NotFound {
                list_command: format!("{} list", list_command_for(&entity)),
                resource_type: entity,
                identifier,
            },

            CoreError::Storage(e) => CliError::Storage {
                message: e.to_string(),
            },

            CoreError::Config { message } => CliError::Config { message },

            other @ (CoreError::NoDialog(_) | CoreError::Unsupported(_)) => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}

pub(crate) fn list_command_for(entity: &str) -> &'static str {
    match entity {
        "User" => "users",
        "Role" => "roles",
        "Permission" => "permissions",
        "Project" => "projects",
        "SEO page" => "seo",
        _ => "contacts",
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}
