// ── Route guard ──
//
// Presence-based navigation gate. Runs before any dashboard screen and
// decides purely from whether a token is stored; the backend stays the
// authority on whether that token is still valid.

use url::form_urlencoded;

/// Protected area prefix and home.
pub const DASHBOARD_HOME: &str = "/dashboard";
/// Login screen.
pub const LOGIN_PATH: &str = "/auth/login";
/// Query parameter carrying the originally requested path.
pub const CALLBACK_PARAM: &str = "callbackUrl";

const AUTH_PREFIX: &str = "/auth";

/// Paths that never reach the guard.
const BYPASS_PREFIXES: &[&str] = &["/_next/static", "/_next/image", "/favicon.ico", "/public", "/api"];

/// Where a navigation should go instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub location: String,
}

impl Redirect {
    pub fn to(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }

    pub fn dashboard() -> Self {
        Self::to(DASHBOARD_HOME)
    }

    pub fn login() -> Self {
        Self::to(LOGIN_PATH)
    }

    /// Login redirect remembering `target`.
    pub fn login_with_callback(target: &str) -> Self {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair(CALLBACK_PARAM, target)
            .finish();
        Self::to(format!("{LOGIN_PATH}?{query}"))
    }

    /// The `callbackUrl` carried by this redirect, decoded.
    pub fn callback(&self) -> Option<String> {
        let (_, query) = self.location.split_once('?')?;
        form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == CALLBACK_PARAM)
            .map(|(_, v)| v.into_owned())
    }
}

impl std::fmt::Display for Redirect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.location)
    }
}

/// Outcome of one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(Redirect),
}

/// Which part of the app a path belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass {
    Protected,
    Auth,
    Root,
    Public,
}

fn under(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// `path` without its query string or fragment.
fn pathname(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or(path)
}

pub fn classify(path: &str) -> PathClass {
    let path = pathname(path);
    if path == "/" || path.is_empty() {
        PathClass::Root
    } else if under(path, DASHBOARD_HOME) {
        PathClass::Protected
    } else if under(path, AUTH_PREFIX) {
        PathClass::Auth
    } else {
        PathClass::Public
    }
}

/// Decide a navigation to `path` given whether a token is stored.
pub fn evaluate(path: &str, token_present: bool) -> GuardDecision {
    let path = pathname(path);
    if BYPASS_PREFIXES.iter().any(|p| under(path, p)) {
        return GuardDecision::Allow;
    }

    match (classify(path), token_present) {
        (PathClass::Protected, false) => {
            GuardDecision::Redirect(Redirect::login_with_callback(path))
        }
        (PathClass::Auth | PathClass::Root, true) => GuardDecision::Redirect(Redirect::dashboard()),
        (PathClass::Root, false) => GuardDecision::Redirect(Redirect::login()),
        _ => GuardDecision::Allow,
    }
}
