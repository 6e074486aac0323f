//! Bearer token cache with lazy refresh
//!
//! The dashboard issues a JWT on login and expects it as a bearer token on
//! every subsequent request. [`TokenManager`] keeps the most recent token in
//! memory, re-authenticating only when it has expired, and serializes
//! concurrent refresh attempts so at most one login call is in flight at a
//! time. The token is never written to disk.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;

use crate::error::{ApiError, Result};

/// Safety margin subtracted from the JWT `exp` claim
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Assumed validity when no expiry can be read from the token
const FALLBACK_TTL_SECS: i64 = 1800;

/// Login operation used to mint fresh bearer tokens
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Authenticate against the dashboard and return a bearer token string
    async fn login(&self) -> Result<String>;
}

#[async_trait]
impl<A: AuthApi + ?Sized> AuthApi for Arc<A> {
    async fn login(&self) -> Result<String> {
        (**self).login().await
    }
}

/// Cached token and its computed expiry.
///
/// Both fields are set together on a successful login and cleared together by
/// invalidation; no state where one is present without the other is reachable.
#[derive(Debug, Default)]
struct TokenState {
    token: Option<String>,
    expires_at: Option<DateTime<Utc>>,
}

/// In-memory bearer token cache.
///
/// All state lives behind one async mutex, held across the login call itself,
/// so the read-check-refresh-store sequence is a single critical section:
/// callers arriving during an in-progress refresh wait for it to finish and
/// observe its result, success or failure, instead of issuing their own
/// login. The refresh generation counter is how a waiter tells a refresh
/// completed while it was blocked on the lock.
///
/// Constructed by and owned by the API client; there is no global instance.
pub struct TokenManager<A> {
    auth: A,
    /// Incremented after every completed login attempt, under the lock
    generation: AtomicU64,
    state: Mutex<TokenState>,
}

impl<A: AuthApi> TokenManager<A> {
    pub fn new(auth: A) -> Self {
        Self {
            auth,
            generation: AtomicU64::new(0),
            state: Mutex::new(TokenState::default()),
        }
    }

    /// Return a valid bearer token, logging in if the cached one is stale.
    ///
    /// A cached token whose expiry is strictly in the future is returned
    /// without any network call. Otherwise a login is performed and the new
    /// token cached with an expiry of the JWT `exp` claim minus 60 seconds,
    /// or now plus 30 minutes when the claim cannot be read.
    ///
    /// Callers that block behind an in-flight refresh share its outcome: a
    /// refresh that completed while they waited yields either its cached
    /// token or its authentication failure, never a second login.
    ///
    /// On login failure the cache is left untouched and the error propagates
    /// to the caller; the next call re-checks expiry and retries the login.
    pub async fn get_token(&self) -> Result<String> {
        let snapshot = self.generation.load(Ordering::SeqCst);
        let mut state = self.state.lock().await;

        if let (Some(token), Some(expires_at)) = (state.token.as_ref(), state.expires_at) {
            if expires_at > Utc::now() {
                return Ok(token.clone());
            }
        }

        // No usable token. If a refresh completed while this caller was
        // waiting for the lock, it failed (a success would have hit the
        // cache check above); share that failure instead of logging in again.
        if self.generation.load(Ordering::SeqCst) != snapshot {
            return Err(ApiError::AuthenticationFailed.into());
        }

        log::debug!("bearer token missing or expired, logging in");
        let result = self.auth.login().await;
        self.generation.fetch_add(1, Ordering::SeqCst);
        let token = result?;
        let expires_at = jwt_expiry(&token)
            .unwrap_or_else(|| Utc::now() + Duration::seconds(FALLBACK_TTL_SECS));

        state.token = Some(token.clone());
        state.expires_at = Some(expires_at);
        Ok(token)
    }

    /// Drop the cached token so the next [`get_token`](Self::get_token)
    /// performs a fresh login.
    ///
    /// Called by the request layer after the dashboard rejects a request as
    /// unauthorized, so a known-bad token is not presented again.
    pub async fn invalidate(&self) {
        let mut state = self.state.lock().await;
        state.token = None;
        state.expires_at = None;
    }

    #[cfg(test)]
    async fn cached(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let state = self.state.lock().await;
        (state.token.clone(), state.expires_at)
    }
}

/// Extract the expiry of a JWT bearer token: the `exp` claim minus a
/// 60-second margin.
///
/// The payload segment is `=`-padded to a multiple of 4 and decoded with the
/// standard base64 alphabet. Payloads that use the base64url-specific
/// characters `-`/`_` therefore fail to decode and fall through to the
/// fallback TTL, matching the dashboard clients this tool interoperates with.
///
/// Returns `None` on any failure (segment count, base64, JSON, missing or
/// non-numeric `exp`); never an error.
fn jwt_expiry(token: &str) -> Option<DateTime<Utc>> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() < 2 {
        return None;
    }

    let mut payload = parts[1].to_string();
    while payload.len() % 4 != 0 {
        payload.push('=');
    }

    let bytes = general_purpose::STANDARD.decode(&payload).ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    // NumericDate permits fractions; truncate to whole seconds
    let exp = claims.get("exp")?.as_f64()?;

    let expires_at = DateTime::from_timestamp(exp as i64, 0)?;
    Some(expires_at - Duration::seconds(EXPIRY_MARGIN_SECS))
}
