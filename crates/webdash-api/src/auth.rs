// Authentication endpoints
//
// Token-based: `POST /login` returns an opaque bearer token which the
// caller installs with `ApiClient::set_token`. The client never stores
// credentials itself.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;

use crate::client::{ApiClient, Extra};
use crate::error::Error;
use crate::models::{Acknowledgement, ApiStatus, ApiUser, LoginPayload, LoginSuccess, ProfilePayload};

impl ApiClient {
    /// Exchange credentials for a bearer token.
    ///
    /// `POST /login` with `{email, password}`. Anything other than an
    /// explicit `status: "success"` carrying both a token and a user is
    /// reported as `Error::Rejected` with the backend message
    /// (or `"Login failed"`).
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<LoginSuccess, Error> {
        let url = self.url("/login")?;
        debug!(email, "logging in");

        let body = json!({
            "email": email,
            "password": password.expose_secret(),
        });
        let envelope = self.post::<LoginPayload>(url, &body).await?;

        let message = envelope.message.filter(|m| !m.is_empty());
        match (envelope.status, envelope.payload.token, envelope.payload.user) {
            (Some(ApiStatus::Success), Some(token), Some(user)) if !token.is_empty() => {
                Ok(LoginSuccess {
                    token: token.into(),
                    user,
                    message,
                })
            }
            _ => Err(Error::Rejected {
                message: message.unwrap_or_else(|| "Login failed".into()),
            }),
        }
    }

    /// Invalidate the current token server-side.
    ///
    /// `POST /logout` (no body)
    pub async fn logout(&self) -> Result<Acknowledgement, Error> {
        let url = self.url("/logout")?;
        debug!("logging out");
        Ok(self.post_empty::<Extra>(url).await?.ack())
    }

    /// Fetch the authenticated user.
    ///
    /// `GET /profile`
    pub async fn profile(&self) -> Result<ApiUser, Error> {
        let url = self.url("/profile")?;
        debug!("fetching profile");
        Ok(self.get::<ProfilePayload>(url).await?.payload.user)
    }
}
