use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use http::HeaderMap;
use http::header::{ACCEPT, COOKIE, HeaderValue, SET_COOKIE};
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::time::Instant;
use url::Url;
use zeroize::Zeroizing;

use super::{AuthError, AuthType, Authenticator, check_credential, format_http_error};
use crate::builder::HttpClientBuilder;
use crate::client::HttpClient;
use crate::config::HttpClientConfig;
use crate::secret::SecretString;

const SESSION_COOKIE: &str = "AuthSession";

/// Session lifetime assumed when the cookie carries no `Max-Age` (`CouchDB` default).
const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(600);

const REFRESH_FRACTION: f64 = 0.8;

/// Upper bound on the `Max-Age` the cache honours.
const MAX_SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Configuration for [`CouchDbSessionAuthenticator`]
pub struct SessionOptions {
    pub username: String,
    pub password: SecretString,
    /// Override for the `_session` transport configuration.
    ///
    /// When `None`, [`HttpClientConfig::token_endpoint()`] with plain HTTP
    /// allowed is used: the session endpoint lives on the service URL, which
    /// the service client has already vetted.
    pub http_config: Option<HttpClientConfig>,
}

impl fmt::Debug for SessionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionOptions")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct SessionRequest<'a> {
    name: &'a str,
    password: &'a str,
}

struct CachedSession {
    /// `Url::origin` of the service the cookie was issued for
    origin: String,
    cookie: SecretString,
    refresh_at: Instant,
    expires_at: Instant,
}

/// `CouchDB` cookie authentication.
///
/// Posts the credentials to `{service_url}/_session`, keeps the returned
/// `AuthSession` cookie and sends it as `Cookie` on every request. The
/// session is renewed once 80% of its `Max-Age` has elapsed.
pub struct CouchDbSessionAuthenticator {
    client: HttpClient,
    username: String,
    password: SecretString,
    session: Mutex<Option<CachedSession>>,
}

impl CouchDbSessionAuthenticator {
    /// Create a session authenticator
    ///
    /// # Errors
    /// Returns `AuthError::InvalidConfig` if the username or password is empty
    pub fn new(
        username: impl Into<String>,
        password: impl Into<SecretString>,
    ) -> Result<Self, AuthError> {
        Self::with_options(SessionOptions {
            username: username.into(),
            password: password.into(),
            http_config: None,
        })
    }

    /// Create a session authenticator from explicit options
    ///
    /// # Errors
    /// Returns `AuthError::InvalidConfig` for empty credentials, or
    /// `AuthError::Http` if the transport cannot be built
    pub fn with_options(options: SessionOptions) -> Result<Self, AuthError> {
        let http_config = options
            .http_config
            .unwrap_or_else(|| HttpClientConfig::token_endpoint().allow_insecure_http());
        let client = HttpClientBuilder::with_config(http_config)
            .build()
            .map_err(|e| AuthError::Http(format_http_error(&e, "CouchDB session")))?;

        let auth = Self {
            client,
            username: options.username,
            password: options.password,
            session: Mutex::new(None),
        };
        auth.validate()?;
        Ok(auth)
    }

    async fn request_session(&self, service_url: &Url) -> Result<CachedSession, AuthError> {
        let mut session_url = service_url.clone();
        session_url
            .path_segments_mut()
            .map_err(|()| AuthError::InvalidConfig("service URL cannot be a base".into()))?
            .pop_if_empty()
            .push("_session");

        let password = Zeroizing::new(self.password.expose().to_owned());
        let requested_at = Instant::now();
        let response = self
            .client
            .post(session_url.as_str())
            .header(ACCEPT.as_str(), "application/json")
            .json(&SessionRequest {
                name: &self.username,
                password: &password,
            })
            .map_err(|e| AuthError::Http(format_http_error(&e, "CouchDB session")))?
            .send()
            .await
            .map_err(|e| AuthError::Http(format_http_error(&e, "CouchDB session")))?
            .error_for_status()
            .map_err(|e| AuthError::Http(format_http_error(&e, "CouchDB session")))?;

        let (value, max_age) = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find_map(parse_session_cookie)
            .ok_or_else(|| {
                AuthError::InvalidResponse(format!("no {SESSION_COOKIE} cookie in _session response"))
            })?;

        let lifetime = max_age.unwrap_or(DEFAULT_SESSION_TTL).min(MAX_SESSION_TTL);
        tracing::info!(
            url = %session_url,
            username = %self.username,
            max_age_secs = lifetime.as_secs(),
            "acquired CouchDB session cookie"
        );

        Ok(CachedSession {
            origin: service_url.origin().ascii_serialization(),
            cookie: SecretString::new(format!("{SESSION_COOKIE}={value}")),
            refresh_at: requested_at + lifetime.mul_f64(REFRESH_FRACTION),
            expires_at: requested_at + lifetime,
        })
    }
}

impl fmt::Debug for CouchDbSessionAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CouchDbSessionAuthenticator")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Authenticator for CouchDbSessionAuthenticator {
    fn auth_type(&self) -> AuthType {
        AuthType::CouchDbSession
    }

    fn validate(&self) -> Result<(), AuthError> {
        check_credential("username", &self.username)?;
        check_credential("password", self.password.expose())
    }

    async fn authenticate(&self, headers: &mut HeaderMap, service_url: &Url) -> Result<(), AuthError> {
        let mut session = self.session.lock().await;
        let now = Instant::now();
        let origin = service_url.origin().ascii_serialization();

        let reusable = session
            .as_ref()
            .is_some_and(|s| s.origin == origin && now < s.refresh_at);
        if !reusable {
            match self.request_session(service_url).await {
                Ok(fresh) => *session = Some(fresh),
                Err(e) => match session.as_ref() {
                    Some(s) if s.origin == origin && now < s.expires_at => {
                        tracing::warn!(error = %e, "session renewal failed; using current cookie");
                    }
                    _ => return Err(e),
                },
            }
        }

        let cookie = session
            .as_ref()
            .ok_or_else(|| AuthError::InvalidResponse("no session cookie available".into()))?;
        let mut value = HeaderValue::from_str(cookie.cookie.expose())
            .map_err(|_| AuthError::InvalidResponse("session cookie is not a valid header value".into()))?;
        value.set_sensitive(true);
        headers.insert(COOKIE, value);
        Ok(())
    }
}

/// Extract the `AuthSession` value and `Max-Age` from one `Set-Cookie` header
fn parse_session_cookie(header: &str) -> Option<(String, Option<Duration>)> {
    let mut parts = header.split(';').map(str::trim);
    let (name, value) = parts.next()?.split_once('=')?;
    if name != SESSION_COOKIE || value.is_empty() {
        return None;
    }

    let max_age = parts.find_map(|attr| {
        let (key, val) = attr.split_once('=')?;
        key.eq_ignore_ascii_case("max-age")
            .then(|| val.parse::<u64>().ok().map(Duration::from_secs))
            .flatten()
    });

    Some((value.to_owned(), max_age))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn parses_auth_session_cookie() {
        let (value, max_age) = parse_session_cookie(
            "AuthSession=YWRtaW46NUU; Version=1; Expires=Tue, 05 Mar 2030 14:06:11 GMT; \
             Max-Age=86400; Path=/; HttpOnly",
        )
        .unwrap();
        assert_eq!(value, "YWRtaW46NUU");
        assert_eq!(max_age, Some(Duration::from_secs(86_400)));

        let (_, max_age) = parse_session_cookie("AuthSession=abc; Path=/").unwrap();
        assert!(max_age.is_none());

        assert!(parse_session_cookie("Other=abc; Path=/").is_none());
        assert!(parse_session_cookie("AuthSession=; Path=/").is_none());
    }

    #[tokio::test]
    async fn posts_credentials_and_reuses_cookie() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/_session")
                .json_body(json!({"name": "admin", "password": "pass"}));
            then.status(200)
                .header("set-cookie", "AuthSession=c2Vzc2lvbg; Max-Age=600; Path=/; HttpOnly")
                .json_body(json!({"ok": true, "name": "admin", "roles": ["_admin"]}));
        });

        let auth = CouchDbSessionAuthenticator::new("admin", "pass").unwrap();
        let url = Url::parse(&server.base_url()).unwrap();

        for _ in 0..2 {
            let mut headers = HeaderMap::new();
            auth.authenticate(&mut headers, &url).await.unwrap();
            assert_eq!(headers[COOKIE], "AuthSession=c2Vzc2lvbg");
        }

        mock.assert_calls(1);
    }

    #[tokio::test]
    async fn huge_max_age_is_capped() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/_session");
            then.status(200)
                .header("set-cookie", "AuthSession=abc; Max-Age=18446744073709551615; Path=/")
                .json_body(json!({"ok": true, "name": "admin", "roles": []}));
        });

        let auth = CouchDbSessionAuthenticator::new("admin", "pass").unwrap();
        let url = Url::parse(&server.base_url()).unwrap();
        for _ in 0..2 {
            let mut headers = HeaderMap::new();
            auth.authenticate(&mut headers, &url).await.unwrap();
            assert_eq!(headers[COOKIE], "AuthSession=abc");
        }

        mock.assert_calls(1);
    }

    #[tokio::test]
    async fn unauthorized_session_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/_session");
            then.status(401)
                .json_body(json!({"error": "unauthorized", "reason": "Name or password is incorrect."}));
        });

        let auth = CouchDbSessionAuthenticator::new("admin", "wrong").unwrap();
        let url = Url::parse(&server.base_url()).unwrap();
        let err = auth.authenticate(&mut HeaderMap::new(), &url).await.unwrap_err();

        assert!(err.to_string().contains("401"));
        assert!(!err.to_string().contains("wrong"));
    }

    #[tokio::test]
    async fn missing_cookie_is_invalid_response() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/_session");
            then.status(200).json_body(json!({"ok": true}));
        });

        let auth = CouchDbSessionAuthenticator::new("admin", "pass").unwrap();
        let url = Url::parse(&server.base_url()).unwrap();
        let err = auth.authenticate(&mut HeaderMap::new(), &url).await.unwrap_err();

        assert!(matches!(err, AuthError::InvalidResponse(_)));
    }

    #[test]
    fn rejects_empty_credentials() {
        assert!(CouchDbSessionAuthenticator::new("", "pass").is_err());
        assert!(CouchDbSessionAuthenticator::new("admin", "").is_err());
    }
}
