//! HTTP adapter: the single chokepoint for all network I/O.
//!
//! Every feature crate talks to the rental API through [`ApiClient`]. The
//! adapter attaches the bearer token from the credential jar, decodes JSON
//! bodies, and applies the one global policy of the client: an
//! authorization-denied response purges the jar and hard-redirects to the
//! sign-in page, whatever the caller was doing.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::credentials::{self, ACCESS_TOKEN_KEY, CredentialStore};
use crate::envelope::Envelope;
use crate::error::{PlatformError, Result};
use crate::navigation::Navigator;
use crate::routes::Route;

/// Default API origin and base path.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5050/api/v1";
/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "WHEELBASE_API_BASE_URL";
/// Default whole-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(100);

/// Connection settings for [`ApiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Scheme, host, and base path every endpoint path is appended to.
    pub base_url: String,
    /// Whole-request timeout, connection included.
    pub timeout: Duration,
}

impl ApiConfig {
    /// Configuration with the stock base URL and timeout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Configuration honoring the [`BASE_URL_ENV`] override.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_override(std::env::var(BASE_URL_ENV).ok())
    }

    fn from_override(base_url: Option<String>) -> Self {
        let mut config = Self::new();
        if let Some(base_url) = base_url.filter(|url| !url.is_empty()) {
            config.base_url = base_url;
        }
        config
    }

    /// Replace the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Replace the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP client for the rental API.
///
/// Cheap to clone; all clones share one connection pool, one credential
/// jar, and one navigator.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    credentials: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    /// Build a client over the given credential jar and navigator.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Internal`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(
        config: ApiConfig,
        credentials: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PlatformError::Internal(format!("http client construction: {e}")))?;

        Ok(Self {
            http,
            config,
            credentials,
            navigator,
        })
    }

    /// The configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// GET `path` and decode the JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::AuthorizationDenied`] after the global 401
    /// policy has run, [`PlatformError::Api`] for any other non-success
    /// status, and [`PlatformError::Transport`] /
    /// [`PlatformError::InvalidResponse`] for network and decode failures.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::GET, path, None::<&()>).await
    }

    /// POST `body` as JSON to `path` and decode the JSON body.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::get`].
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, path, Some(body)).await
    }

    /// POST to `path` with no body and decode the JSON body.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::get`].
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::POST, path, None::<&()>).await
    }

    /// PATCH `body` as JSON to `path` and decode the JSON body.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::get`].
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::PATCH, path, Some(body)).await
    }

    async fn request<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.config.base_url, path);
        tracing::debug!(%method, %url, "api request");

        let mut request = self.http.request(method, &url);

        // Bearer injection. An unreadable jar downgrades to an
        // unauthenticated request rather than failing the call.
        match self.credentials.read(ACCESS_TOKEN_KEY) {
            Ok(Some(token)) => request = request.bearer_auth(token),
            Ok(None) => {}
            Err(error) => {
                tracing::warn!(%error, "credential jar unreadable, sending unauthenticated");
            }
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| PlatformError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| PlatformError::InvalidResponse(e.to_string()));
        }

        let body_text = response.text().await.unwrap_or_else(|_| String::new());
        Err(self.map_failure(status, &body_text))
    }

    /// Map a non-success response to its error, applying the global
    /// authorization-denied policy as a side effect of the 401 arm.
    fn map_failure(&self, status: StatusCode, body: &str) -> PlatformError {
        if status == StatusCode::UNAUTHORIZED {
            self.handle_authorization_denied();
            return PlatformError::AuthorizationDenied;
        }

        let message = serde_json::from_str::<Envelope<serde_json::Value>>(body)
            .ok()
            .and_then(|envelope| envelope.message)
            .unwrap_or_else(|| {
                if body.is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                } else {
                    body.to_string()
                }
            });

        PlatformError::Api {
            status: status.as_u16(),
            message,
        }
    }

    /// Purge persisted credentials and force a redirect to sign-in.
    fn handle_authorization_denied(&self) {
        tracing::warn!("authorization denied, purging credentials and redirecting to sign-in");
        if let Err(error) = credentials::purge_credentials(self.credentials.as_ref()) {
            tracing::error!(%error, "credential purge failed while handling authorization denial");
        }
        self.navigator.force_redirect(Route::SignIn);
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_url)
            .field("timeout", &self.config.timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::{REFRESH_TOKEN_KEY, USER_KEY};
    use crate::mocks::{MockCredentialStore, MockNavigator, NavigationCall};

    #[allow(clippy::expect_used)] // Test setup
    fn client_with(jar: &MockCredentialStore, navigator: &MockNavigator) -> ApiClient {
        ApiClient::new(
            ApiConfig::new(),
            Arc::new(jar.clone()),
            Arc::new(navigator.clone()),
        )
        .expect("client should build")
    }

    #[test]
    fn test_config_defaults() {
        let config = ApiConfig::new();
        assert_eq!(config.base_url, "http://localhost:5050/api/v1");
        assert_eq!(config.timeout, Duration::from_secs(100));
        assert_eq!(config, ApiConfig::default());
    }

    #[test]
    fn test_config_override() {
        let config = ApiConfig::from_override(Some("https://api.wheelbase.app/api/v1".to_string()));
        assert_eq!(config.base_url, "https://api.wheelbase.app/api/v1");

        // Empty override falls back to the default.
        let config = ApiConfig::from_override(Some(String::new()));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);

        let config = ApiConfig::from_override(None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_config_builders() {
        let config = ApiConfig::new()
            .with_base_url("http://staging:8080/api/v1")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.base_url, "http://staging:8080/api/v1");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_client_creation() {
        let jar = MockCredentialStore::new();
        let navigator = MockNavigator::new();
        let client = client_with(&jar, &navigator);
        assert_eq!(client.config().base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_authorization_denied_purges_and_redirects() {
        let jar = MockCredentialStore::with_entries(&[
            (ACCESS_TOKEN_KEY, "stale"),
            (REFRESH_TOKEN_KEY, "stale"),
            (USER_KEY, "{}"),
        ]);
        let navigator = MockNavigator::new();
        let client = client_with(&jar, &navigator);

        let error = client.map_failure(StatusCode::UNAUTHORIZED, "");

        assert_eq!(error, PlatformError::AuthorizationDenied);
        assert!(jar.is_empty(), "jar should be purged");
        assert_eq!(
            navigator.last(),
            Some(NavigationCall::ForceRedirect(Route::SignIn))
        );
    }

    #[test]
    fn test_server_message_is_extracted() {
        let jar = MockCredentialStore::new();
        let navigator = MockNavigator::new();
        let client = client_with(&jar, &navigator);

        let error = client.map_failure(
            StatusCode::CONFLICT,
            r#"{"status":"failed","message":"Car is already booked"}"#,
        );

        assert_eq!(
            error,
            PlatformError::Api {
                status: 409,
                message: "Car is already booked".to_string(),
            }
        );
        // Only 401 triggers the global policy.
        assert_eq!(navigator.last(), None);
    }

    #[test]
    fn test_empty_body_falls_back_to_canonical_reason() {
        let jar = MockCredentialStore::new();
        let navigator = MockNavigator::new();
        let client = client_with(&jar, &navigator);

        let error = client.map_failure(StatusCode::NOT_FOUND, "");

        assert_eq!(
            error,
            PlatformError::Api {
                status: 404,
                message: "Not Found".to_string(),
            }
        );
    }
}
