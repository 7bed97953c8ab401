//! Authenticated request gateway with transparent token refresh
//!
//! Every call to the backend goes through [`Gateway`]. On the way out it
//! attaches `Authorization: Bearer <access>` when an access token is
//! stored; absent a token the request is sent unauthenticated and left to
//! fail server-side if the endpoint requires auth.
//!
//! On the way back a `401 Unauthorized` triggers recovery: the gateway
//! exchanges the stored refresh token for a new access token, persists it,
//! and replays the failed request once with the fresh credential. A `401`
//! on the replayed request is terminal. Any other status, success or
//! failure, passes through untouched.
//!
//! # Single-flight refresh
//!
//! Multiple requests can be in flight when an access token expires, and
//! all of them come back `401` in the same window. Only the first starts
//! a refresh exchange; the rest subscribe to the in-flight outcome and
//! suspend until it settles. A successful exchange wakes every subscriber
//! with the new token and each replays its own request; a failed exchange
//! fails them all, clears both stored credentials, and fires the
//! session-invalidated hook exactly once.
//!
//! The in-flight marker is taken synchronously before the first await of
//! the exchange and cleared before its outcome is published, so a request
//! failing after the window settled starts a new window rather than
//! waiting on a stale one.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, Response, StatusCode};
use serde::Serialize;
use tokio::sync::{broadcast, Mutex};
use url::Url;

use crate::auth::store::CredentialStore;
use crate::error::{Result, StockroomError};

/// Refresh endpoint, relative to the backend origin.
const REFRESH_PATH: &str = "/api/token/refresh/";

/// Callback invoked once when a refresh fails and the session is cleared.
///
/// The embedding application decides what "go back to login" means: a CLI
/// prints a hint, a GUI navigates to its login screen.
pub type SessionInvalidatedHook = Box<dyn Fn() + Send + Sync>;

/// Outcome of one refresh exchange, broadcast to every request that was
/// waiting on it. `Failed` carries only the reason text so the value
/// stays `Clone` across the channel; each waiter rebuilds its own error.
#[derive(Debug, Clone)]
enum RefreshOutcome {
    Refreshed(String),
    Failed(String),
}

/// One part of a multipart form body.
///
/// Requests must be rebuildable for replay after a refresh, and
/// `reqwest::multipart::Form` is consumed on send, so multipart bodies
/// are described as parts and assembled fresh for every attempt.
#[derive(Debug, Clone)]
pub enum FormPart {
    /// A plain text field.
    Text {
        /// Field name.
        name: String,
        /// Field value.
        value: String,
    },
    /// A file upload field.
    File {
        /// Field name.
        name: String,
        /// File name reported to the server.
        file_name: String,
        /// MIME type of the content.
        mime: String,
        /// Raw file content.
        bytes: Vec<u8>,
    },
}

/// Request body, held in a replayable form.
#[derive(Debug, Clone)]
enum Payload {
    Empty,
    Json(serde_json::Value),
    Multipart(Vec<FormPart>),
}

/// Authenticated HTTP client for the backend.
///
/// Cheap to share behind an `Arc`; all interior state is synchronized.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use std::time::Duration;
/// use url::Url;
/// use stockroom::auth::gateway::Gateway;
/// use stockroom::auth::store::MemoryStore;
///
/// # async fn example() -> stockroom::error::Result<()> {
/// let gateway = Gateway::new(
///     Url::parse("http://localhost:8000")?,
///     Arc::new(MemoryStore::new()),
///     Duration::from_secs(30),
/// );
/// let response = gateway.get("/api/items/").await?;
/// println!("status: {}", response.status());
/// # Ok(())
/// # }
/// ```
pub struct Gateway {
    /// Underlying reqwest HTTP client.
    http: reqwest::Client,
    /// Backend origin; request paths are joined onto this.
    base_url: Url,
    /// Durable storage for the credential pair.
    store: Arc<dyn CredentialStore>,
    /// In-flight refresh marker. `Some` while an exchange is underway;
    /// late 401s subscribe to the sender instead of starting another.
    refresh_slot: Mutex<Option<broadcast::Sender<RefreshOutcome>>>,
    /// Invoked once per failed refresh, after credentials are cleared.
    on_session_invalidated: Option<SessionInvalidatedHook>,
}

impl Gateway {
    /// Constructs a gateway for the given backend origin.
    ///
    /// The `timeout` applies to each individual request, the refresh
    /// exchange included, so a hung refresh endpoint fails its window
    /// instead of suspending every caller indefinitely.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Backend origin (e.g. `http://localhost:8000`).
    /// * `store` - Durable credential storage.
    /// * `timeout` - Per-request timeout.
    pub fn new(base_url: Url, store: Arc<dyn CredentialStore>, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            // Default reqwest client construction cannot fail unless TLS
            // initialisation fails, which is a fatal startup condition on
            // any supported platform.
            .expect("failed to build reqwest client");

        Self {
            http,
            base_url,
            store,
            refresh_slot: Mutex::new(None),
            on_session_invalidated: None,
        }
    }

    /// Registers the hook fired when a refresh fails and the session is
    /// invalidated. At most one hook; the last registration wins.
    #[must_use]
    pub fn on_session_invalidated(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_session_invalidated = Some(Box::new(hook));
        self
    }

    /// Returns the backend origin this gateway targets.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns a handle to the credential store, for callers that manage
    /// the session lifecycle (login persists a pair, logout clears it).
    pub fn credential_store(&self) -> Arc<dyn CredentialStore> {
        Arc::clone(&self.store)
    }

    /// Issues a GET request.
    pub async fn get(&self, path: &str) -> Result<Response> {
        self.execute(Method::GET, path, Payload::Empty).await
    }

    /// Issues a DELETE request.
    pub async fn delete(&self, path: &str) -> Result<Response> {
        self.execute(Method::DELETE, path, Payload::Empty).await
    }

    /// Issues a POST request with a JSON body.
    pub async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<Response> {
        let value = serde_json::to_value(body).map_err(StockroomError::Serialization)?;
        self.execute(Method::POST, path, Payload::Json(value)).await
    }

    /// Issues a PUT request with a JSON body.
    pub async fn put_json<B: Serialize>(&self, path: &str, body: &B) -> Result<Response> {
        let value = serde_json::to_value(body).map_err(StockroomError::Serialization)?;
        self.execute(Method::PUT, path, Payload::Json(value)).await
    }

    /// Issues a POST request with a multipart form body.
    ///
    /// The parts are kept and the form rebuilt if the request has to be
    /// replayed after a token refresh.
    pub async fn post_multipart(&self, path: &str, parts: Vec<FormPart>) -> Result<Response> {
        self.execute(Method::POST, path, Payload::Multipart(parts))
            .await
    }

    // -----------------------------------------------------------------------
    // Request lifecycle
    // -----------------------------------------------------------------------

    /// Dispatches a request, recovering from an expired access token at
    /// most once.
    ///
    /// Response handling:
    ///
    /// - any status but `401`: returned unchanged, errors included.
    /// - `401`, first time: refresh (or wait for the in-flight refresh),
    ///   then replay with the new token.
    /// - `401` on the replay: terminal [`StockroomError::Authentication`].
    async fn execute(&self, method: Method, path: &str, payload: Payload) -> Result<Response> {
        let mut replayed = false;
        let mut access = self.store.load_access()?;

        loop {
            let response = self
                .dispatch(method.clone(), path, &payload, access.as_deref())
                .await?;

            let status = response.status();
            tracing::debug!("response: {} {}", status, path);

            if status != StatusCode::UNAUTHORIZED {
                return Ok(response);
            }
            if replayed {
                return Err(StockroomError::Authentication(format!(
                    "request to {path} was rejected again after a credential refresh"
                ))
                .into());
            }

            tracing::debug!("401 from {}, entering credential refresh", path);
            replayed = true;
            access = Some(self.refresh_access().await?);
        }
    }

    /// Builds and sends one attempt of a request.
    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        payload: &Payload,
        access: Option<&str>,
    ) -> Result<Response> {
        let url = self.endpoint(path)?;
        tracing::debug!("request: {} {}", method, url);

        let mut req = self.http.request(method, url);
        if let Some(token) = access {
            req = req.bearer_auth(token);
        }

        req = match payload {
            Payload::Empty => req,
            Payload::Json(value) => req.json(value),
            Payload::Multipart(parts) => req.multipart(build_form(parts)?),
        };

        Ok(req.send().await.map_err(StockroomError::Http)?)
    }

    /// Resolves a request path against the backend origin.
    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path).map_err(StockroomError::Url)?)
    }

    // -----------------------------------------------------------------------
    // Refresh coordination
    // -----------------------------------------------------------------------

    /// Returns a fresh access token, joining the in-flight exchange when
    /// one exists and starting one otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`StockroomError::SessionExpired`] when the exchange fails
    /// for any reason; by then both stored credentials have been cleared
    /// and the session hook has fired.
    async fn refresh_access(&self) -> Result<String> {
        // Decide, under the lock and without suspending, whether this
        // request owns the exchange or waits on one already underway.
        let waiter = {
            let mut slot = self.refresh_slot.lock().await;
            match slot.as_ref() {
                Some(tx) => Some(tx.subscribe()),
                None => {
                    let (tx, _) = broadcast::channel(1);
                    *slot = Some(tx);
                    None
                }
            }
        };

        if let Some(mut rx) = waiter {
            tracing::debug!("refresh already in flight, waiting on its outcome");
            return match rx.recv().await {
                Ok(RefreshOutcome::Refreshed(token)) => Ok(token),
                Ok(RefreshOutcome::Failed(reason)) => {
                    Err(StockroomError::SessionExpired(reason).into())
                }
                Err(_) => Err(StockroomError::SessionExpired(
                    "refresh outcome channel closed".to_string(),
                )
                .into()),
            };
        }

        let outcome = self.run_refresh().await;

        // Clear the marker before publishing: a request failing after this
        // point belongs to a new failure window.
        let sender = self.refresh_slot.lock().await.take();
        if let Some(tx) = sender {
            let _ = tx.send(outcome.clone());
        }

        match outcome {
            RefreshOutcome::Refreshed(token) => Ok(token),
            RefreshOutcome::Failed(reason) => Err(StockroomError::SessionExpired(reason).into()),
        }
    }

    /// Performs one refresh exchange against the backend.
    ///
    /// Success persists the new access token. Every failure mode, missing
    /// refresh token, transport error, rejection, malformed response,
    /// converges on [`Self::invalidate_session`].
    async fn run_refresh(&self) -> RefreshOutcome {
        let refresh = match self.store.load_refresh() {
            Ok(Some(token)) => token,
            Ok(None) => return self.invalidate_session("no refresh token stored".to_string()),
            Err(e) => return self.invalidate_session(format!("credential store read failed: {e}")),
        };

        let url = match self.endpoint(REFRESH_PATH) {
            Ok(url) => url,
            Err(e) => return self.invalidate_session(format!("bad refresh endpoint: {e}")),
        };

        let result = self
            .http
            .post(url)
            .json(&serde_json::json!({ "refresh": refresh }))
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => return self.invalidate_session(format!("refresh request failed: {e}")),
        };

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return self.invalidate_session(format!("refresh endpoint returned {status}: {body}"));
        }

        let parsed: RefreshResponse = match response.json().await {
            Ok(parsed) => parsed,
            Err(e) => return self.invalidate_session(format!("malformed refresh response: {e}")),
        };

        if let Err(e) = self.store.save_access(&parsed.access) {
            return self.invalidate_session(format!("failed to persist access token: {e}"));
        }

        tracing::debug!("access token refreshed");
        RefreshOutcome::Refreshed(parsed.access)
    }

    /// Clears both credentials, fires the session hook, and wraps the
    /// reason into a `Failed` outcome.
    fn invalidate_session(&self, reason: String) -> RefreshOutcome {
        tracing::warn!("session invalidated: {}", reason);

        if let Err(e) = self.store.clear() {
            tracing::warn!("failed to clear stored credentials: {}", e);
        }
        if let Some(hook) = &self.on_session_invalidated {
            hook();
        }

        RefreshOutcome::Failed(reason)
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Success body of the refresh endpoint.
#[derive(Debug, serde::Deserialize)]
struct RefreshResponse {
    access: String,
}

/// Assembles a `reqwest` multipart form from replayable parts.
fn build_form(parts: &[FormPart]) -> Result<reqwest::multipart::Form> {
    let mut form = reqwest::multipart::Form::new();
    for part in parts {
        form = match part {
            FormPart::Text { name, value } => form.text(name.clone(), value.clone()),
            FormPart::File {
                name,
                file_name,
                mime,
                bytes,
            } => {
                let file = reqwest::multipart::Part::bytes(bytes.clone())
                    .file_name(file_name.clone())
                    .mime_str(mime)
                    .map_err(StockroomError::Http)?;
                form.part(name.clone(), file)
            }
        };
    }
    Ok(form)
}
