//! Dashboard HTTP client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;

use super::DashboardApi;
use super::models::{AlertRule, ApiResponse, LoginData, LoginRequest, Server};
use super::token::{AuthApi, TokenManager};
use crate::error::{ApiError, Result};

/// Timeout for individual HTTP requests
const HTTP_TIMEOUT_SECS: u64 = 30;

/// Login endpoint bound to one set of dashboard credentials.
///
/// Kept separate from [`DashboardClient`] so the token cache can drive logins
/// without a reference cycle back into the client.
pub struct AuthEndpoint {
    http: HttpClient,
    base_url: String,
    username: String,
    password: String,
}

#[async_trait]
impl AuthApi for AuthEndpoint {
    async fn login(&self) -> Result<String> {
        let url = format!("{}/api/v1/login", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&LoginRequest {
                username: &self.username,
                password: &self.password,
            })
            .send()
            .await
            .map_err(|err| {
                log::debug!("login transport error: {err}");
                ApiError::AuthenticationFailed
            })?;

        let status = response.status();
        if !status.is_success() {
            log::debug!("login rejected with status {status}");
            return Err(ApiError::AuthenticationFailed.into());
        }

        let body: ApiResponse<LoginData> = response.json().await.map_err(|err| {
            log::debug!("unreadable login response: {err}");
            ApiError::AuthenticationFailed
        })?;

        match body.data {
            Some(data) => Ok(data.token),
            None => Err(ApiError::AuthenticationFailed.into()),
        }
    }
}

/// Dashboard API client.
///
/// Owns the bearer token cache; each request fetches a token from it (a cache
/// hit or a transparent login) and retries exactly once with a fresh token
/// when the dashboard answers 401.
pub struct DashboardClient {
    http: HttpClient,
    base_url: String,
    tokens: TokenManager<AuthEndpoint>,
}

impl DashboardClient {
    /// Create a client for the dashboard at `dashboard_url`
    pub fn new(dashboard_url: &str, username: &str, password: &str) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let base_url = dashboard_url.trim_end_matches('/').to_string();
        let auth = AuthEndpoint {
            http: http.clone(),
            base_url: base_url.clone(),
            username: username.to_string(),
            password: password.to_string(),
        };

        Ok(Self {
            http,
            base_url,
            tokens: TokenManager::new(auth),
        })
    }

    /// Verify the configured credentials by performing a login.
    ///
    /// The resulting token lands in the cache, so the first subsequent
    /// request reuses it.
    pub async fn authenticate(&self) -> Result<()> {
        self.tokens.get_token().await.map(|_| ())
    }

    /// Authenticated GET with a single retry on a rejected token
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let token = self.tokens.get_token().await?;
        log::debug!("GET {path}");
        let mut response = self.send(path, &token).await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            log::debug!("token rejected, re-authenticating");
            self.tokens.invalidate().await;
            let token = self.tokens.get_token().await?;
            response = self.send(path, &token).await?;

            if response.status() == StatusCode::UNAUTHORIZED {
                return Err(ApiError::Unauthorized.into());
            }
        }

        Self::handle(response).await
    }

    async fn send(&self, path: &str, token: &str) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await
            .map_err(ApiError::from)?;
        Ok(response)
    }

    /// Map a non-401 response into the envelope payload or an error
    async fn handle<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        match status {
            StatusCode::OK => {
                let body: ApiResponse<T> = response.json().await.map_err(|e| {
                    ApiError::InvalidResponse(format!("Failed to parse response: {e}"))
                })?;

                match body.data {
                    Some(data) => Ok(data),
                    None => {
                        log::debug!("response carried no data (success={})", body.success);
                        let detail = body
                            .error
                            .unwrap_or_else(|| "response carried no data".to_string());
                        Err(ApiError::InvalidResponse(detail).into())
                    }
                }
            }
            StatusCode::NOT_FOUND => {
                let detail = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Resource not found".to_string());
                Err(ApiError::NotFound(detail).into())
            }
            StatusCode::BAD_REQUEST => {
                let detail = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Bad request".to_string());
                Err(ApiError::BadRequest(detail).into())
            }
            status if status.is_server_error() => {
                let detail = response
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("Server error: {status}"));
                Err(ApiError::ServerError(detail).into())
            }
            _ => Err(ApiError::InvalidResponse(format!("Unexpected status code: {status}")).into()),
        }
    }
}

#[async_trait]
impl DashboardApi for DashboardClient {
    async fn list_servers(&self) -> Result<Vec<Server>> {
        self.get("/api/v1/server").await
    }

    async fn get_server(&self, id: u64) -> Result<Server> {
        // The dashboard exposes no single-server endpoint; filter the list
        let servers = self.list_servers().await?;
        servers
            .into_iter()
            .find(|server| server.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("Server {id}")).into())
    }

    async fn list_alert_rules(&self) -> Result<Vec<AlertRule>> {
        self.get("/api/v1/alert-rule").await
    }
}
