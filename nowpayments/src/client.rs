//! The API client: request dispatch and authentication.
//!
//! [`Client`] owns the validated credentials, the normalized base URL
//! and a shared `reqwest` client. Every domain operation goes through
//! [`Client::send`], which resolves the named route, attaches the
//! `x-api-key` header (or a bearer token on privileged routes),
//! performs exactly one request attempt, and decodes the response
//! through the envelope decoder. Retry policy belongs to the caller.

use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::config::Credentials;
use crate::envelope;
use crate::error::Error;
use crate::route;

/// Parameters for one dispatch through [`Client::send`].
#[derive(Debug)]
pub(crate) struct SendRequest<'a> {
    /// Symbolic route name, resolved against the route table.
    route: &'static str,
    /// Path suffix appended verbatim to the route path (an ID).
    path: Option<&'a str>,
    /// Query string parameters.
    query: &'a [(&'static str, String)],
    /// JSON request body.
    body: Option<Value>,
    /// Bearer token for JWT-authenticated routes.
    bearer: Option<&'a str>,
}

impl<'a> SendRequest<'a> {
    pub(crate) fn new(route: &'static str) -> Self {
        Self { route, path: None, query: &[], body: None, bearer: None }
    }

    pub(crate) fn with_path(mut self, path: &'a str) -> Self {
        self.path = Some(path);
        self
    }

    pub(crate) fn with_query(mut self, query: &'a [(&'static str, String)]) -> Self {
        self.query = query;
        self
    }

    pub(crate) fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub(crate) fn with_bearer(mut self, token: &'a str) -> Self {
        self.bearer = Some(token);
        self
    }
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    token: String,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    message: String,
}

/// A NOWPayments API client.
///
/// Construct once with [`Client::new`] and share by reference;
/// concurrent requests are fine, the underlying `reqwest` client pools
/// connections internally.
///
/// # Example
///
/// ```no_run
/// use nowpayments::{Client, Credentials};
///
/// # async fn demo() -> Result<(), nowpayments::Error> {
/// let credentials = Credentials::load("config.json")?;
/// let client = Client::new(credentials)?;
/// let message = client.status().await?;
/// # Ok(())
/// # }
/// ```
pub struct Client {
    credentials: Credentials,
    /// Base URL with any trailing slash stripped; route paths carry
    /// their own leading slash.
    base_url: String,
    http: reqwest::Client,
    debug: bool,
}

impl Client {
    /// Default timeout applied when no `reqwest` client is injected.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates a client from validated credentials.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if any credential field is missing or
    /// the server URL does not parse.
    pub fn new(credentials: Credentials) -> Result<Self, Error> {
        credentials.validate()?;
        let base_url = credentials.server.trim_end_matches('/').to_owned();
        let http = reqwest::Client::builder()
            .timeout(Self::DEFAULT_TIMEOUT)
            .build()
            .expect("failed to build reqwest::Client");
        Ok(Self { credentials, base_url, http, debug: false })
    }

    /// Replaces the HTTP client with a pre-configured one (custom
    /// timeouts, proxying, TLS settings).
    #[must_use]
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Toggles debug mode: outgoing requests and raw response bodies
    /// are emitted as `tracing` debug events. Behavior and return
    /// values are unchanged.
    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Returns the normalized base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns true when the client points at the sandbox environment.
    #[must_use]
    pub fn is_sandbox(&self) -> bool {
        self.credentials.is_sandbox()
    }

    /// Exchanges the configured login and password for a JWT.
    ///
    /// The token is short-lived and not cached: privileged operations
    /// perform a fresh exchange on every call.
    ///
    /// # Errors
    ///
    /// Returns an error tagged with the `auth` route on transport
    /// failure, non-2xx status, or a malformed body.
    pub async fn authenticate(&self) -> Result<String, Error> {
        let body = serde_json::json!({
            "email": self.credentials.login,
            "password": self.credentials.password,
        });
        let response: AuthResponse = self.send(SendRequest::new("auth").with_body(body)).await?;
        Ok(response.token)
    }

    /// Liveness probe against the API, returning its status message.
    ///
    /// # Errors
    ///
    /// Returns an error tagged with the `status` route.
    pub async fn status(&self) -> Result<String, Error> {
        let response: StatusResponse = self.send(SendRequest::new("status")).await?;
        Ok(response.message)
    }

    /// Dispatches one request and decodes the response body into `T`.
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        request: SendRequest<'_>,
    ) -> Result<T, Error> {
        let route = route::resolve(request.route)?;

        let mut target = format!("{}{}", self.base_url, route.path);
        if let Some(path) = request.path {
            target.push_str(path);
        }
        let url = Url::parse(&target).map_err(|source| Error::Url { route: route.name, source })?;

        let mut req = self.http.request(route.method.clone(), url.clone());
        // The API key authenticates plain routes; JWT-authenticated
        // routes carry a bearer token instead.
        req = match request.bearer {
            Some(token) => req.bearer_auth(token),
            None => req.header("x-api-key", &self.credentials.api_key),
        };
        if !request.query.is_empty() {
            req = req.query(request.query);
        }
        if let Some(body) = &request.body {
            req = req.json(body);
        }

        if self.debug {
            tracing::debug!(
                route = route.name,
                method = %route.method,
                url = %url,
                body = %request.body.as_ref().map(ToString::to_string).unwrap_or_default(),
                "sending request"
            );
        }

        let response = req
            .send()
            .await
            .map_err(|source| Error::Transport { route: route.name, source })?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|source| Error::Transport { route: route.name, source })?;

        if self.debug {
            tracing::debug!(
                route = route.name,
                status = %status,
                body = %String::from_utf8_lossy(&bytes),
                "received response"
            );
        }

        if !status.is_success() {
            return Err(Error::Api {
                route: route.name,
                status,
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        envelope::decode_body(route.name, &bytes)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

/// Builds a client pointed at a test server, with the credential
/// values the config tests use.
#[cfg(test)]
pub(crate) fn test_client(server: &str) -> Client {
    Client::new(Credentials {
        api_key: "key".into(),
        ipn_secret_key: "key".into(),
        login: "mylogin".into(),
        password: "mypass".into(),
        server: server.to_owned(),
    })
    .unwrap()
}
