pub mod endpoints;

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::error::{CricbetError, Result};
use crate::session::SessionStore;
use crate::types::{ApiErrorBody, RefreshRequest, RefreshResponse};

/// HTTP client wrapper for the CricBet REST API.
///
/// Attaches the session's bearer token to every request and transparently
/// refreshes it once on a 401: the failed request is replayed with the new
/// token, and a second 401 (or a failed refresh) clears the session.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    session: SessionStore,
    // Serializes token refreshes so concurrent 401s trigger one refresh.
    refresh_lock: Arc<Mutex<()>>,
}

impl HttpClient {
    pub fn new(base_url: &str, session: SessionStore, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
            refresh_lock: Arc::new(Mutex::new(())),
        })
    }

    /// GET a JSON resource.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::GET, path, None::<&()>).await
    }

    /// POST a JSON body and decode a JSON response.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.request(Method::POST, path, Some(body)).await
    }

    /// POST with no body.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::POST, path, None::<&()>).await
    }

    async fn request<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let token = self.session.access_token();
        let resp = self
            .send(method.clone(), path, body, token.as_deref())
            .await?;

        // Only authenticated requests are eligible for the refresh-and-retry
        // protocol; a 401 on an anonymous call (e.g. bad login) is final.
        if resp.status() == StatusCode::UNAUTHORIZED {
            if let Some(stale) = token {
                let fresh = self.refresh_access_token(&stale).await?;
                let retry = self.send(method, path, body, Some(&fresh)).await?;
                if retry.status() == StatusCode::UNAUTHORIZED {
                    tracing::warn!(path, "still unauthorized after token refresh, clearing session");
                    self.session.clear();
                    return Err(CricbetError::SessionExpired(
                        "request unauthorized after token refresh".to_string(),
                    ));
                }
                return Self::decode(retry).await;
            }
        }

        Self::decode(resp).await
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        token: Option<&str>,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.request(method, &url);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(body);
        }
        req.send().await.map_err(CricbetError::Request)
    }

    /// Exchanges the refresh token for a new access token.
    ///
    /// `stale` is the access token that just failed; if another request
    /// already replaced it while we waited on the lock, the replacement is
    /// returned without issuing a second refresh.
    async fn refresh_access_token(&self, stale: &str) -> Result<String> {
        let _guard = self.refresh_lock.lock().await;

        if let Some(current) = self.session.access_token() {
            if current != stale {
                return Ok(current);
            }
        }

        let Some(refresh) = self.session.refresh_token() else {
            self.session.clear();
            return Err(CricbetError::SessionExpired(
                "no refresh token available".to_string(),
            ));
        };

        let url = format!("{}/token/refresh/", self.base_url);
        let result = async {
            let resp = self
                .client
                .post(&url)
                .json(&RefreshRequest { refresh })
                .send()
                .await?;
            Self::decode::<RefreshResponse>(resp).await
        }
        .await;

        match result {
            Ok(resp) => {
                tracing::debug!("access token refreshed");
                self.session.set_access_token(resp.access.clone());
                Ok(resp.access)
            }
            Err(e) => {
                tracing::warn!(error = %e, "token refresh failed, clearing session");
                self.session.clear();
                Err(CricbetError::SessionExpired(format!(
                    "token refresh failed: {e}"
                )))
            }
        }
    }

    async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CricbetError::Http {
                status: status.as_u16(),
                message: extract_error_message(&body),
            });
        }
        resp.json::<T>().await.map_err(CricbetError::Request)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }
}

/// Pulls the human-readable message out of a `{"error": ...}` or
/// `{"detail": ...}` envelope, falling back to the raw body.
fn extract_error_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) {
        if let Some(msg) = parsed.error.or(parsed.detail) {
            return msg;
        }
    }
    body.to_string()
}
