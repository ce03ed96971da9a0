// Dashboard API HTTP client
//
// Wraps `reqwest::Client` with bearer-token injection, URL construction
// and response normalisation. Endpoint modules (auth, users, roles, ...)
// are implemented as inherent methods in separate files so this module
// stays focused on transport mechanics.

use arc_swap::ArcSwapOption;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::models::{Acknowledgement, ApiStatus, Envelope};
use crate::transport::TransportConfig;

/// Default production backend.
pub const DEFAULT_BASE_URL: &str = "https://wa.acibd.com/api/webdynamo/api";

/// Payload type for envelopes whose extra fields are irrelevant.
pub(crate) type Extra = serde_json::Map<String, serde_json::Value>;

/// Raw HTTP client for the dashboard backend.
///
/// Every request carries `Accept: application/json` and, once a token has
/// been set, `Authorization: Bearer <token>`. Responses are normalised
/// before the caller sees them: non-2xx statuses and `status: "error"`
/// envelopes both come back as [`Error`].
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: ArcSwapOption<SecretString>,
}

impl ApiClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// `base_url` is the API root; endpoint paths are appended verbatim
    /// (e.g. `https://host/api` + `/login`).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            token: ArcSwapOption::empty(),
        }
    }

    /// The API root URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Token management ─────────────────────────────────────────────

    /// Install or clear the bearer token used on subsequent requests.
    pub fn set_token(&self, token: Option<SecretString>) {
        debug!(present = token.is_some(), "updating bearer token");
        self.token.store(token.map(std::sync::Arc::new));
    }

    /// Whether a bearer token is currently installed.
    pub fn has_token(&self) -> bool {
        self.token.load().is_some()
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}{endpoint}`.
    pub(crate) fn url(&self, endpoint: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{endpoint}"))?)
    }

    /// Build `{base}{endpoint}` with query pairs appended in order.
    pub(crate) fn url_with_query<'a>(
        &self,
        endpoint: &str,
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Url, Error> {
        let mut url = self.url(endpoint)?;
        url.query_pairs_mut().extend_pairs(pairs);
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    fn prepare(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.header(ACCEPT, "application/json");
        match self.token.load_full() {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    /// Send a GET request and unwrap the status envelope.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<Envelope<T>, Error> {
        debug!("GET {}", url);
        self.send(self.http.get(url)).await
    }

    /// Send a GET request whose response does not follow the status envelope.
    pub(crate) async fn get_raw<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);
        let resp = self.prepare(self.http.get(url)).send().await?;
        parse_response(resp).await
    }

    /// Send a POST request with a JSON body.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<Envelope<T>, Error> {
        debug!("POST {}", url);
        self.send(self.http.post(url).json(body)).await
    }

    /// Send a POST request without a body.
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, url: Url) -> Result<Envelope<T>, Error> {
        debug!("POST {}", url);
        self.send(self.http.post(url)).await
    }

    /// Send a POST request with a multipart body. The boundary header is
    /// left to reqwest.
    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        url: Url,
        form: reqwest::multipart::Form,
    ) -> Result<Envelope<T>, Error> {
        debug!("POST (multipart) {}", url);
        self.send(self.http.post(url).multipart(form)).await
    }

    /// Send a PUT request with a JSON body.
    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<Envelope<T>, Error> {
        debug!("PUT {}", url);
        self.send(self.http.put(url).json(body)).await
    }

    /// Send a PUT request whose data travels in the query string.
    pub(crate) async fn put_empty<T: DeserializeOwned>(&self, url: Url) -> Result<Envelope<T>, Error> {
        debug!("PUT {}", url);
        self.send(self.http.put(url)).await
    }

    /// Send a DELETE request.
    pub(crate) async fn delete<T: DeserializeOwned>(&self, url: Url) -> Result<Envelope<T>, Error> {
        debug!("DELETE {}", url);
        self.send(self.http.delete(url)).await
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<Envelope<T>, Error> {
        let resp = self.prepare(builder).send().await?;
        let envelope: Envelope<T> = parse_response(resp).await?;
        check_status(envelope)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("has_token", &self.has_token())
            .finish_non_exhaustive()
    }
}

impl<T> Envelope<T> {
    /// Drop the payload, keeping only the backend message.
    pub(crate) fn ack(self) -> Acknowledgement {
        Acknowledgement {
            message: self.message.filter(|m| !m.is_empty()),
        }
    }
}

/// Reject `status: "error"` envelopes that arrived with a 2xx status.
/// A missing status counts as success.
fn check_status<T>(envelope: Envelope<T>) -> Result<Envelope<T>, Error> {
    match envelope.status {
        Some(ApiStatus::Error) => Err(Error::Rejected {
            message: envelope
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "Request failed".into()),
        }),
        _ => Ok(envelope),
    }
}

/// Normalise an HTTP response.
///
/// - non-JSON, 2xx: decode `T` from an empty object
/// - non-JSON, non-2xx: `Error::Http`
/// - JSON, non-2xx: `Error::Api` carrying the body's `message`
/// - 401 in either case: `Error::Unauthorized`
async fn parse_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();
    let is_json = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"));

    trace!(%status, is_json, "response received");

    if !is_json {
        if status.is_success() {
            return decode("{}".to_owned());
        }
        let fallback = generic_message(status);
        return Err(if status == StatusCode::UNAUTHORIZED {
            Error::Unauthorized { message: fallback }
        } else {
            Error::Http {
                status: status.as_u16(),
            }
        });
    }

    let body = resp.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| generic_message(status));
        return Err(if status == StatusCode::UNAUTHORIZED {
            Error::Unauthorized { message }
        } else {
            Error::Api {
                status: status.as_u16(),
                message,
            }
        });
    }

    decode(body)
}

fn decode<T: DeserializeOwned>(body: String) -> Result<T, Error> {
    serde_json::from_str(&body).map_err(|e| {
        let preview = body.chars().take(200).collect::<String>();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body,
        }
    })
}

fn generic_message(status: StatusCode) -> String {
    format!("HTTP error! status: {}", status.as_u16())
}
