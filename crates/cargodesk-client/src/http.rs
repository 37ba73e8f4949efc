//! # HTTP Client Wrapper
//!
//! The single network boundary of the workspace. Every service call funnels
//! through [`ApiClient`], which attaches the bearer token, performs the
//! one-shot 401 refresh, and classifies failures for the normalizer.
//!
//! ## Refresh Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      One-Shot 401 Refresh                               │
//! │                                                                         │
//! │  request ──► 401? ──no──► response                                     │
//! │               │                                                         │
//! │              yes (and not flagged skip_refresh)                        │
//! │               │                                                         │
//! │               ▼                                                         │
//! │  POST /refresh-token { refreshToken }                                  │
//! │               │                                                         │
//! │        ┌──────┴──────┐                                                 │
//! │        ▼             ▼                                                 │
//! │     success       failure                                              │
//! │        │             │                                                 │
//! │  persist tokens   clear tokens                                         │
//! │  replay ONCE      AuthExpired                                          │
//! │        │                                                               │
//! │        ▼                                                               │
//! │  still 401? → clear tokens, AuthExpired (never a second refresh)       │
//! │                                                                         │
//! │  Refreshes are single-flight: concurrent 401s queue on a gate, and a   │
//! │  waiter whose session changed while it waited reuses the winner's      │
//! │  tokens instead of spending the rotated refresh token again.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Classification
//! reqwest errors become [`TransportFailure::Timeout`] or
//! [`TransportFailure::Network`]; non-2xx responses become
//! [`TransportFailure::Status`] carrying the body's `message` field when one
//! exists. Services hand these to [`crate::normalize::normalize`].

use std::sync::Arc;
use std::time::Duration;

use reqwest::multipart::Form;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::normalize::TransportFailure;
use crate::session::SessionStore;

/// Result alias for raw (pre-normalization) transport calls.
pub type TransportResult<T> = Result<T, TransportFailure>;

/// A binary (PDF) response body plus its Content-Disposition header.
#[derive(Debug, Clone)]
pub struct BinaryResponse {
    pub bytes: Vec<u8>,
    pub content_disposition: Option<String>,
}

/// The HTTP client wrapper shared by all entity services.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
    session: SessionStore,
    /// Serializes refresh exchanges across clones of this client.
    refresh_gate: Arc<Mutex<()>>,
}

impl ApiClient {
    /// Builds a client from config and a session store.
    pub fn new(config: ClientConfig, session: SessionStore) -> ApiResult<Self> {
        url::Url::parse(&config.base_url)
            .map_err(|e| ApiError::config(format!("Invalid API base URL: {}", e)))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| ApiError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(ApiClient {
            http,
            config,
            session,
            refresh_gate: Arc::new(Mutex::new(())),
        })
    }

    /// The session store this client reads tokens from.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    // =========================================================================
    // JSON Verbs
    // =========================================================================

    /// GET returning the parsed JSON body.
    pub async fn get_json(&self, path: &str, query: &[(&str, String)]) -> TransportResult<Value> {
        let url = self.config.url(path);
        let response = self
            .send(|| self.http.get(&url).query(query), false)
            .await?;
        read_json(response).await
    }

    /// POST with a JSON body.
    pub async fn post_json(&self, path: &str, body: &Value) -> TransportResult<Value> {
        let url = self.config.url(path);
        let response = self
            .send(|| self.http.post(&url).json(body), false)
            .await?;
        read_json(response).await
    }

    /// POST with a JSON body, never attempting a token refresh.
    ///
    /// Used by login: a 401 there is a credential failure, not an expired
    /// session.
    pub async fn post_json_no_refresh(&self, path: &str, body: &Value) -> TransportResult<Value> {
        let url = self.config.url(path);
        let response = self.send(|| self.http.post(&url).json(body), true).await?;
        read_json(response).await
    }

    /// PUT with a JSON body.
    pub async fn put_json(&self, path: &str, body: &Value) -> TransportResult<Value> {
        let url = self.config.url(path);
        let response = self.send(|| self.http.put(&url).json(body), false).await?;
        read_json(response).await
    }

    /// PATCH with a JSON body.
    pub async fn patch_json(&self, path: &str, body: &Value) -> TransportResult<Value> {
        let url = self.config.url(path);
        let response = self
            .send(|| self.http.patch(&url).json(body), false)
            .await?;
        read_json(response).await
    }

    /// DELETE returning the parsed JSON body.
    pub async fn delete_json(&self, path: &str) -> TransportResult<Value> {
        let url = self.config.url(path);
        let response = self.send(|| self.http.delete(&url), false).await?;
        read_json(response).await
    }

    // =========================================================================
    // Multipart
    // =========================================================================

    /// POST a multipart form.
    ///
    /// `make_form` is a factory rather than a form because a replay after a
    /// token refresh needs to rebuild the body - `Form` is not cloneable.
    pub async fn post_form<F>(&self, path: &str, make_form: F) -> TransportResult<Value>
    where
        F: Fn() -> Form,
    {
        let url = self.config.url(path);
        let response = self
            .send(|| self.http.post(&url).multipart(make_form()), false)
            .await?;
        read_json(response).await
    }

    /// PUT a multipart form.
    pub async fn put_form<F>(&self, path: &str, make_form: F) -> TransportResult<Value>
    where
        F: Fn() -> Form,
    {
        let url = self.config.url(path);
        let response = self
            .send(|| self.http.put(&url).multipart(make_form()), false)
            .await?;
        read_json(response).await
    }

    // =========================================================================
    // Binary
    // =========================================================================

    /// GET a binary body (PDF downloads).
    pub async fn get_bytes(&self, path: &str) -> TransportResult<BinaryResponse> {
        let url = self.config.url(path);
        let response = self.send(|| self.http.get(&url), false).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_failure(response).await);
        }

        let content_disposition = response
            .headers()
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = response.bytes().await.map_err(classify)?.to_vec();

        Ok(BinaryResponse {
            bytes,
            content_disposition,
        })
    }

    // =========================================================================
    // Core Send + Refresh
    // =========================================================================

    /// Sends a request, refreshing the session once on 401.
    ///
    /// The refresh happens at most once per original request; a 401 on the
    /// replay clears the session and fails with `AuthExpired`.
    async fn send<F>(&self, make: F, skip_refresh: bool) -> TransportResult<Response>
    where
        F: Fn() -> RequestBuilder,
    {
        let token = self.session.access_token().await;
        let response = self.dispatch(&make, token.as_deref()).await?;

        if response.status() != StatusCode::UNAUTHORIZED || skip_refresh {
            return Ok(response);
        }

        debug!("received 401, attempting token refresh");
        self.refresh_tokens(token.as_deref()).await?;

        let fresh = self.session.access_token().await;
        let retried = self.dispatch(&make, fresh.as_deref()).await?;
        if retried.status() == StatusCode::UNAUTHORIZED {
            warn!("request still unauthorized after refresh, clearing session");
            self.session.clear().await;
            return Err(TransportFailure::AuthExpired);
        }

        Ok(retried)
    }

    /// Builds and sends one request with the given bearer token attached.
    async fn dispatch<F>(&self, make: &F, token: Option<&str>) -> TransportResult<Response>
    where
        F: Fn() -> RequestBuilder,
    {
        let mut request = make();
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.map_err(classify)
    }

    /// Exchanges the refresh token for a new token pair.
    ///
    /// Refreshes are single-flight behind the gate, with a double check
    /// inside it: a caller whose access token already changed while it
    /// waited reuses the winner's session instead of spending the rotated
    /// refresh token on a second, doomed exchange. A genuine failure clears
    /// the session. The exchange itself never carries a bearer token and is
    /// never retried.
    async fn refresh_tokens(&self, stale_access: Option<&str>) -> TransportResult<()> {
        let _gate = self.refresh_gate.lock().await;

        if self.session.access_token().await.as_deref() != stale_access {
            debug!("session already refreshed by a concurrent request");
            return Ok(());
        }

        let Some(refresh_token) = self.session.refresh_token().await else {
            self.session.clear().await;
            return Err(TransportFailure::AuthExpired);
        };

        let url = self.config.url("refresh-token");
        let body = serde_json::json!({ "refreshToken": refresh_token });

        let response = match self.http.post(&url).json(&body).send().await {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                warn!(status = response.status().as_u16(), "token refresh rejected");
                self.session.clear().await;
                return Err(TransportFailure::AuthExpired);
            }
            Err(e) => {
                warn!(error = %e, "token refresh request failed");
                self.session.clear().await;
                return Err(TransportFailure::AuthExpired);
            }
        };

        let payload: Value = response.json().await.unwrap_or(Value::Null);
        let access = payload["data"]["accessToken"].as_str();
        let refresh = payload["data"]["refreshToken"].as_str();

        match (access, refresh) {
            (Some(access), Some(refresh)) => {
                self.session
                    .set_tokens(access.to_string(), refresh.to_string())
                    .await;
                info!("session refreshed");
                Ok(())
            }
            _ => {
                warn!("token refresh response missing tokens");
                self.session.clear().await;
                Err(TransportFailure::AuthExpired)
            }
        }
    }
}

// =============================================================================
// Response / Error Helpers
// =============================================================================

/// Classifies a reqwest error into the transport taxonomy.
fn classify(error: reqwest::Error) -> TransportFailure {
    if error.is_timeout() {
        TransportFailure::Timeout
    } else {
        debug!(error = %error, "request failed before a response arrived");
        TransportFailure::Network
    }
}

/// Reads a successful response body as JSON; non-2xx becomes a status
/// failure. An unparseable 2xx body becomes `Null` so the envelope layer
/// reports a decode failure with full context.
async fn read_json(response: Response) -> TransportResult<Value> {
    let status = response.status();
    if !status.is_success() {
        return Err(status_failure(response).await);
    }

    let text = response.text().await.map_err(classify)?;
    Ok(serde_json::from_str(&text).unwrap_or(Value::Null))
}

/// Builds a `Status` failure, extracting the server's message when present.
async fn status_failure(response: Response) -> TransportFailure {
    let status = response.status().as_u16();

    let server_message = response.text().await.ok().and_then(|text| {
        let value: Value = serde_json::from_str(&text).ok()?;
        value
            .get("message")
            .or_else(|| value.get("error"))
            .and_then(Value::as_str)
            .map(str::to_string)
    });

    TransportFailure::Status {
        status,
        server_message,
    }
}
