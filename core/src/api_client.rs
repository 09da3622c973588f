//! HTTP client for the remote alert collection.
//!
//! One method per mutation kind against `/denuncias`, plus the login
//! call that obtains the bearer token in the first place. Every
//! collection call runs inside [`AuthGate::with_auth`], so a missing
//! token short-circuits locally before any request is built. This is a
//! pure boundary adapter: nothing here touches the reconciler, and
//! non-2xx responses are translated into typed failures, never retried.

use alerta_protocol::AlertRecord;
use serde::Deserialize;
use thiserror::Error;

use crate::auth::{AuthGate, GateError};
use crate::config::Config;

/// Errors from remote operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No stored token; no request was sent.
    #[error("not authenticated")]
    NotAuthenticated,

    /// Transport-level failure (includes timeouts).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("server rejected request ({status}): {message}")]
    ServerRejected {
        /// HTTP status code.
        status: u16,
        /// Decoded error body when present, else a generic message.
        message: String,
    },

    /// A success response carried a body we could not decode.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Result type for remote operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error body shape the service uses for rejections.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// The list endpoint returns either a Spring-style page object or a
/// bare array, depending on the deployment.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListBody {
    Page { content: Vec<AlertRecord> },
    Plain(Vec<AlertRecord>),
}

/// Login response.
#[derive(Debug, Deserialize)]
struct LoginBody {
    token: Option<String>,
}

/// Client for the remote `/denuncias` collection.
pub struct SyncClient {
    client: reqwest::Client,
    base_url: String,
    gate: AuthGate,
}

impl SyncClient {
    pub fn new(config: &Config) -> Self {
        Self::with_client(
            reqwest::Client::new(),
            config.base_url.clone(),
            AuthGate::new(config.home.clone()),
        )
    }

    /// Client with custom parts, used by tests.
    pub fn with_client(client: reqwest::Client, base_url: String, gate: AuthGate) -> Self {
        Self {
            client,
            base_url,
            gate,
        }
    }

    pub fn gate(&self) -> &AuthGate {
        &self.gate
    }

    fn collection_url(&self) -> String {
        format!("{}/denuncias", self.base_url)
    }

    fn record_url(&self, id: &str) -> String {
        format!("{}/denuncias/{id}", self.base_url)
    }

    /// Exchanges credentials for a bearer token. Not gated: this is the
    /// one call that runs without a stored token.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<String> {
        let response = self
            .client
            .post(format!("{}/login", self.base_url))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(reject(response).await);
        }

        let body: LoginBody = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(format!("login response: {e}")))?;
        body.token
            .ok_or_else(|| ApiError::Parse("login response carried no token".to_string()))
    }

    /// Creates a validated draft; the server-assigned id is merged into
    /// the returned record.
    pub async fn create(&self, record: &AlertRecord) -> ApiResult<AlertRecord> {
        let url = self.collection_url();
        self.gated(move |token| async move {
            tracing::debug!("POST {url}");
            let response = self
                .client
                .post(&url)
                .bearer_auth(token)
                .json(record)
                .send()
                .await?;

            if !response.status().is_success() {
                return Err(reject(response).await);
            }

            // The server echoes the stored record. An empty or foreign
            // body falls back to the submitted draft unchanged.
            let text = response.text().await.unwrap_or_default();
            Ok(serde_json::from_str(&text).unwrap_or_else(|_| record.clone()))
        })
        .await
    }

    /// Fetches the full collection, in server order.
    pub async fn list(&self) -> ApiResult<Vec<AlertRecord>> {
        let url = self.collection_url();
        self.gated(move |token| async move {
            tracing::debug!("GET {url}");
            let response = self.client.get(&url).bearer_auth(token).send().await?;

            if !response.status().is_success() {
                return Err(reject(response).await);
            }

            let body: ListBody = response
                .json()
                .await
                .map_err(|e| ApiError::Parse(format!("list response: {e}")))?;
            Ok(match body {
                ListBody::Page { content } => content,
                ListBody::Plain(records) => records,
            })
        })
        .await
    }

    /// Replaces the record under `id` with the given validated fields.
    pub async fn update(&self, id: &str, record: &AlertRecord) -> ApiResult<AlertRecord> {
        let url = self.record_url(id);
        self.gated(move |token| async move {
            tracing::debug!("PUT {url}");
            let response = self
                .client
                .put(&url)
                .bearer_auth(token)
                .json(record)
                .send()
                .await?;

            if !response.status().is_success() {
                return Err(reject(response).await);
            }

            let text = response.text().await.unwrap_or_default();
            Ok(serde_json::from_str(&text).unwrap_or_else(|_| {
                let mut acknowledged = record.clone();
                acknowledged.id = Some(id.to_string());
                acknowledged
            }))
        })
        .await
    }

    /// Deletes the record under `id`.
    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        let url = self.record_url(id);
        self.gated(move |token| async move {
            tracing::debug!("DELETE {url}");
            let response = self.client.delete(&url).bearer_auth(token).send().await?;

            if !response.status().is_success() {
                return Err(reject(response).await);
            }
            Ok(())
        })
        .await
    }

    /// Runs an operation behind the auth gate, flattening the gate's
    /// short-circuit into the API error taxonomy.
    async fn gated<T, F, Fut>(&self, op: F) -> ApiResult<T>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        match self.gate.with_auth(op).await {
            Ok(value) => Ok(value),
            Err(GateError::Unauthenticated) => Err(ApiError::NotAuthenticated),
            Err(GateError::Op(e)) => Err(e),
        }
    }
}

/// Turns a non-2xx response into `ServerRejected`, decoding the error
/// body when the service provided one.
async fn reject(response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => body.message,
        Err(_) if !text.trim().is_empty() => text,
        Err(_) => format!("request failed with status {status}"),
    };
    tracing::warn!(status, "server rejected request: {message}");
    ApiError::ServerRejected { status, message }
}
