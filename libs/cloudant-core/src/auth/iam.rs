use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use http::HeaderMap;
use http::header::{ACCEPT, AUTHORIZATION, HeaderValue};
use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::time::Instant;
use url::Url;
use zeroize::Zeroizing;

use super::{AuthError, AuthType, Authenticator, check_credential, format_http_error};
use crate::builder::HttpClientBuilder;
use crate::client::HttpClient;
use crate::config::HttpClientConfig;
use crate::secret::SecretString;

/// Default IAM endpoint (the token path is appended)
pub const DEFAULT_IAM_URL: &str = "https://iam.cloud.ibm.com";

const TOKEN_PATH: &str = "/identity/token";
const GRANT_TYPE_APIKEY: &str = "urn:ibm:params:oauth:grant-type:apikey";

/// Fraction of the token lifetime after which a new token is requested.
const REFRESH_FRACTION: f64 = 0.8;

/// Lifetime assumed when the token endpoint omits `expires_in`.
const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Upper bound on the `expires_in` the cache honours.
const MAX_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Configuration for [`IamAuthenticator`].
///
/// `Debug` redacts the API key and client secret.
pub struct IamOptions {
    /// IBM Cloud API key
    pub apikey: SecretString,
    /// IAM base URL or full token URL; defaults to [`DEFAULT_IAM_URL`]
    pub url: Option<String>,
    /// Optional client id for Basic authentication against the token endpoint
    pub client_id: Option<String>,
    /// Client secret paired with `client_id`
    pub client_secret: Option<SecretString>,
    /// Space-separated scopes to request
    pub scope: Option<String>,
    /// Override for the token endpoint transport configuration.
    /// When `None`, [`HttpClientConfig::token_endpoint()`] is used.
    pub http_config: Option<HttpClientConfig>,
}

impl IamOptions {
    #[must_use]
    pub fn new(apikey: impl Into<SecretString>) -> Self {
        Self {
            apikey: apikey.into(),
            url: None,
            client_id: None,
            client_secret: None,
            scope: None,
            http_config: None,
        }
    }
}

impl fmt::Debug for IamOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IamOptions")
            .field("apikey", &"[REDACTED]")
            .field("url", &self.url)
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "[REDACTED]"))
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

/// IAM token response; `Deserialize` only so tokens never get re-serialized.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
}

struct CachedToken {
    access_token: SecretString,
    refresh_at: Instant,
    expires_at: Instant,
}

/// Exchanges an IBM Cloud API key for IAM access tokens.
///
/// Tokens are cached and reused until 80% of their lifetime has passed. A
/// failed refresh falls back to the cached token while it is still valid.
/// Concurrent callers share a single in-flight token request.
pub struct IamAuthenticator {
    client: HttpClient,
    token_url: Url,
    apikey: SecretString,
    client_id: Option<String>,
    client_secret: Option<SecretString>,
    scope: Option<String>,
    cache: Mutex<Option<CachedToken>>,
}

impl IamAuthenticator {
    /// Create an IAM authenticator using the default endpoint
    ///
    /// # Errors
    /// Returns `AuthError::InvalidConfig` if the API key is empty
    pub fn new(apikey: impl Into<SecretString>) -> Result<Self, AuthError> {
        Self::with_options(IamOptions::new(apikey))
    }

    /// Create an IAM authenticator from explicit options
    ///
    /// # Errors
    /// Returns `AuthError::InvalidConfig` if the API key is empty, the URL
    /// is malformed, or only one of `client_id`/`client_secret` is set.
    /// Returns `AuthError::Http` if the transport cannot be built.
    pub fn with_options(options: IamOptions) -> Result<Self, AuthError> {
        let token_url = token_url(options.url.as_deref().unwrap_or(DEFAULT_IAM_URL))?;

        let http_config = options.http_config.unwrap_or_else(|| {
            let config = HttpClientConfig::token_endpoint();
            if token_url.scheme() == "http" {
                config.allow_insecure_http()
            } else {
                config
            }
        });
        let client = HttpClientBuilder::with_config(http_config)
            .build()
            .map_err(|e| AuthError::Http(format_http_error(&e, "IAM token")))?;

        let auth = Self {
            client,
            token_url,
            apikey: options.apikey,
            client_id: options.client_id,
            client_secret: options.client_secret,
            scope: options.scope,
            cache: Mutex::new(None),
        };
        auth.validate()?;
        Ok(auth)
    }

    /// Token endpoint this authenticator posts to
    #[must_use]
    pub fn token_url(&self) -> &Url {
        &self.token_url
    }

    async fn request_token(&self) -> Result<CachedToken, AuthError> {
        let apikey = Zeroizing::new(self.apikey.expose().to_owned());
        let mut fields: Vec<(&str, &str)> = vec![
            ("grant_type", GRANT_TYPE_APIKEY),
            ("apikey", &apikey),
            ("response_type", "cloud_iam"),
        ];
        if let Some(ref scope) = self.scope {
            fields.push(("scope", scope));
        }

        let mut builder = self
            .client
            .post(self.token_url.as_str())
            .header(ACCEPT.as_str(), "application/json");

        if let (Some(id), Some(secret)) = (&self.client_id, &self.client_secret) {
            let credentials = Zeroizing::new(format!("{id}:{}", secret.expose()));
            let encoded = Zeroizing::new(general_purpose::STANDARD.encode(credentials.as_bytes()));
            let header_value = Zeroizing::new(format!("Basic {}", &*encoded));
            builder = builder.header(AUTHORIZATION.as_str(), &header_value);
        }

        let requested_at = Instant::now();
        let response = builder
            .form(fields.as_slice())
            .map_err(|e| AuthError::Http(format_http_error(&e, "IAM token")))?
            .send()
            .await
            .map_err(|e| AuthError::Http(format_http_error(&e, "IAM token")))?;

        let token: TokenResponse = response
            .error_for_status()
            .map_err(|e| AuthError::Http(format_http_error(&e, "IAM token")))?
            .json()
            .await
            .map_err(|e| AuthError::Http(format_http_error(&e, "IAM token")))?;

        if let Some(ref tt) = token.token_type
            && !tt.eq_ignore_ascii_case("bearer")
        {
            return Err(AuthError::UnsupportedTokenType(tt.clone()));
        }
        if token.access_token.is_empty() {
            return Err(AuthError::InvalidResponse("empty access_token".into()));
        }

        let lifetime = token
            .expires_in
            .map_or(DEFAULT_TTL, Duration::from_secs)
            .min(MAX_TTL);

        tracing::info!(
            token_url = %self.token_url,
            expires_in_secs = lifetime.as_secs(),
            "acquired IAM access token"
        );

        Ok(CachedToken {
            access_token: SecretString::new(token.access_token),
            refresh_at: requested_at + lifetime.mul_f64(REFRESH_FRACTION),
            expires_at: requested_at + lifetime,
        })
    }
}

impl fmt::Debug for IamAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IamAuthenticator")
            .field("token_url", &self.token_url.as_str())
            .field("client_id", &self.client_id)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Authenticator for IamAuthenticator {
    fn auth_type(&self) -> AuthType {
        AuthType::Iam
    }

    fn validate(&self) -> Result<(), AuthError> {
        check_credential("apikey", self.apikey.expose())?;
        match (&self.client_id, &self.client_secret) {
            (Some(_), None) | (None, Some(_)) => Err(AuthError::InvalidConfig(
                "client_id and client_secret must be set together".into(),
            )),
            _ => Ok(()),
        }
    }

    async fn authenticate(&self, headers: &mut HeaderMap, _service_url: &Url) -> Result<(), AuthError> {
        let mut cache = self.cache.lock().await;
        let now = Instant::now();

        let needs_refresh = cache.as_ref().is_none_or(|t| now >= t.refresh_at);
        if needs_refresh {
            match self.request_token().await {
                Ok(token) => *cache = Some(token),
                Err(e) => match cache.as_ref() {
                    Some(t) if now < t.expires_at => {
                        tracing::warn!(error = %e, "IAM token refresh failed; using cached token");
                    }
                    _ => return Err(e),
                },
            }
        }

        let token = cache
            .as_ref()
            .ok_or_else(|| AuthError::InvalidResponse("no IAM token available".into()))?;
        let header = Zeroizing::new(format!("Bearer {}", token.access_token.expose()));
        let mut value = HeaderValue::from_str(&header)
            .map_err(|_| AuthError::InvalidResponse("access token is not a valid header value".into()))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
        Ok(())
    }
}

/// Resolve the token URL from a base URL or a full token URL
fn token_url(raw: &str) -> Result<Url, AuthError> {
    let trimmed = raw.trim_end_matches('/');
    let full = if trimmed.ends_with(TOKEN_PATH) {
        trimmed.to_owned()
    } else {
        format!("{trimmed}{TOKEN_PATH}")
    };
    Url::parse(&full).map_err(|e| AuthError::InvalidConfig(format!("invalid IAM URL '{raw}': {e}")))
}
