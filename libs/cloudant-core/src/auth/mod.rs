//! Request authenticators.
//!
//! An [`Authenticator`] decorates every outgoing service request with
//! credentials. Construction validates the configuration so that a client
//! can never be built around an authenticator that is certain to fail.

mod basic;
mod bearer;
mod iam;
mod noauth;
mod session;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use http::HeaderMap;
use thiserror::Error;
use url::Url;

use crate::error::HttpError;
use crate::properties::ServiceProperties;

pub use basic::BasicAuthenticator;
pub use bearer::BearerTokenAuthenticator;
pub use iam::{DEFAULT_IAM_URL, IamAuthenticator, IamOptions};
pub use noauth::NoAuthAuthenticator;
pub use session::{CouchDbSessionAuthenticator, SessionOptions};

/// Errors raised while configuring an authenticator or acquiring credentials.
///
/// No variant ever renders a password, API key or token.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    /// Authenticator configuration is invalid (empty credentials, bad URL, ...)
    #[error("invalid authenticator configuration: {0}")]
    InvalidConfig(String),

    /// The configured authentication type is not supported
    #[error("unsupported authentication type '{0}'")]
    UnknownAuthType(String),

    /// HTTP transport or status error while talking to a token or session endpoint
    #[error("{0}")]
    Http(String),

    /// The token or session endpoint returned an unusable response
    #[error("invalid authentication response: {0}")]
    InvalidResponse(String),

    /// The token endpoint returned a `token_type` that is not `Bearer`
    #[error("unsupported token type: {0}")]
    UnsupportedTokenType(String),
}

/// Supported authentication schemes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AuthType {
    NoAuth,
    Basic,
    BearerToken,
    Iam,
    CouchDbSession,
}

impl AuthType {
    /// Canonical name as used in `<SERVICE>_AUTH_TYPE`
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AuthType::NoAuth => "noAuth",
            AuthType::Basic => "basic",
            AuthType::BearerToken => "bearerToken",
            AuthType::Iam => "iam",
            AuthType::CouchDbSession => "couchdb_session",
        }
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthType {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "noauth" => Ok(AuthType::NoAuth),
            "basic" => Ok(AuthType::Basic),
            "bearertoken" => Ok(AuthType::BearerToken),
            "iam" => Ok(AuthType::Iam),
            "couchdb_session" => Ok(AuthType::CouchDbSession),
            _ => Err(AuthError::UnknownAuthType(s.to_owned())),
        }
    }
}

/// Decorates outgoing requests with credentials.
///
/// Implementations must be cheap to share across tasks; token-based
/// authenticators cache and refresh their tokens internally.
#[async_trait]
pub trait Authenticator: Send + Sync + fmt::Debug {
    /// Scheme implemented by this authenticator
    fn auth_type(&self) -> AuthType;

    /// Check the configuration without contacting any server
    ///
    /// # Errors
    /// Returns `AuthError::InvalidConfig` describing the first problem found
    fn validate(&self) -> Result<(), AuthError>;

    /// Add credentials to the headers of a request addressed to `service_url`
    ///
    /// # Errors
    /// Returns an error when credentials cannot be produced (for example the
    /// token endpoint rejected the API key)
    async fn authenticate(&self, headers: &mut HeaderMap, service_url: &Url)
    -> Result<(), AuthError>;
}

/// Build an authenticator from external service properties.
///
/// `AUTH_TYPE` selects the scheme (case-insensitive). Without it, `iam` is
/// assumed when `APIKEY` is present.
///
/// # Errors
/// Returns `AuthError::UnknownAuthType` for an unsupported type, and
/// `AuthError::InvalidConfig` when the type is missing or the required
/// properties for the chosen type are absent or empty.
pub fn authenticator_from_properties(
    props: &ServiceProperties,
) -> Result<Arc<dyn Authenticator>, AuthError> {
    let auth_type = match props.get(ServiceProperties::AUTH_TYPE) {
        Some(value) => value.parse::<AuthType>()?,
        None if props.get(ServiceProperties::APIKEY).is_some() => AuthType::Iam,
        None => {
            return Err(AuthError::InvalidConfig(format!(
                "no authentication type configured for service '{}'",
                props.service_name()
            )));
        }
    };

    if props.get_bool(ServiceProperties::AUTH_DISABLE_SSL) {
        tracing::warn!(
            service = props.service_name(),
            "AUTH_DISABLE_SSL is set but certificate verification cannot be disabled; ignoring"
        );
    }

    let required = |name: &str| {
        props.get(name).map(str::to_owned).ok_or_else(|| {
            AuthError::InvalidConfig(format!("{auth_type} authentication requires {name}"))
        })
    };

    let authenticator: Arc<dyn Authenticator> = match auth_type {
        AuthType::NoAuth => Arc::new(NoAuthAuthenticator::new()),
        AuthType::Basic => Arc::new(BasicAuthenticator::new(
            required(ServiceProperties::USERNAME)?,
            required(ServiceProperties::PASSWORD)?,
        )?),
        AuthType::BearerToken => Arc::new(BearerTokenAuthenticator::new(required(
            ServiceProperties::BEARER_TOKEN,
        )?)?),
        AuthType::Iam => Arc::new(IamAuthenticator::with_options(IamOptions {
            apikey: required(ServiceProperties::APIKEY)?.into(),
            url: props.get(ServiceProperties::AUTH_URL).map(str::to_owned),
            client_id: props.get(ServiceProperties::CLIENT_ID).map(str::to_owned),
            client_secret: props
                .get(ServiceProperties::CLIENT_SECRET)
                .map(Into::into),
            scope: props.get(ServiceProperties::SCOPE).map(str::to_owned),
            http_config: None,
        })?),
        AuthType::CouchDbSession => Arc::new(CouchDbSessionAuthenticator::new(
            required(ServiceProperties::USERNAME)?,
            required(ServiceProperties::PASSWORD)?,
        )?),
    };

    tracing::debug!(
        service = props.service_name(),
        auth_type = %auth_type,
        "authenticator created from external configuration"
    );
    Ok(authenticator)
}

/// Render an [`HttpError`] with a context prefix, omitting response bodies.
pub(crate) fn format_http_error(e: &HttpError, prefix: &str) -> String {
    match e {
        HttpError::HttpStatus { status, .. } => format!("{prefix} HTTP {status}"),
        HttpError::Json(err) => format!("{prefix} JSON parse failed: {err}"),
        HttpError::Timeout(duration) => format!("{prefix} request timed out after {duration:?}"),
        HttpError::Transport(err) => format!("{prefix} transport error: {err}"),
        HttpError::BodyTooLarge { limit, actual } => {
            format!("{prefix} response too large: limit {limit} bytes, got {actual} bytes")
        }
        HttpError::Tls(err) => format!("{prefix} TLS error: {err}"),
        HttpError::RequestBuild(err) => format!("{prefix} request build failed: {err}"),
        HttpError::InvalidHeaderName(err) => format!("{prefix} invalid header name: {err}"),
        HttpError::InvalidHeaderValue(_) => format!("{prefix} invalid header value"),
        HttpError::FormEncode(err) => format!("{prefix} form encode error: {err}"),
        HttpError::InvalidUri { url, reason, .. } => {
            format!("{prefix} invalid URL '{url}': {reason}")
        }
        HttpError::InvalidScheme { scheme, reason } => {
            format!("{prefix} invalid scheme '{scheme}': {reason}")
        }
    }
}

/// Reject empty or template-wrapped credential values.
pub(crate) fn check_credential(name: &str, value: &str) -> Result<(), AuthError> {
    if value.is_empty() {
        return Err(AuthError::InvalidConfig(format!("{name} must not be empty")));
    }
    if has_bad_first_or_last_char(value) {
        return Err(AuthError::InvalidConfig(format!(
            "{name} must not start or end with '{{', '}}' or '\"'; remove the brackets or quotes"
        )));
    }
    Ok(())
}

/// True when the value is wrapped in `{`, `}` or `"` (an unexpanded template)
#[must_use]
pub fn has_bad_first_or_last_char(value: &str) -> bool {
    let bad = |c: char| matches!(c, '{' | '}' | '"');
    value.starts_with(bad) || value.ends_with(bad)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn props(pairs: &[(&str, &str)]) -> ServiceProperties {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        ServiceProperties::from_map("cloudant", map)
    }

    #[test]
    fn auth_type_parses_case_insensitively() {
        assert_eq!("NOAUTH".parse::<AuthType>().unwrap(), AuthType::NoAuth);
        assert_eq!("Basic".parse::<AuthType>().unwrap(), AuthType::Basic);
        assert_eq!("bearerToken".parse::<AuthType>().unwrap(), AuthType::BearerToken);
        assert_eq!("IAM".parse::<AuthType>().unwrap(), AuthType::Iam);
        assert_eq!(
            "COUCHDB_SESSION".parse::<AuthType>().unwrap(),
            AuthType::CouchDbSession
        );
        assert!(matches!(
            "kerberos".parse::<AuthType>(),
            Err(AuthError::UnknownAuthType(t)) if t == "kerberos"
        ));
    }

    #[test]
    fn auth_type_round_trips_canonical_names() {
        for t in [
            AuthType::NoAuth,
            AuthType::Basic,
            AuthType::BearerToken,
            AuthType::Iam,
            AuthType::CouchDbSession,
        ] {
            assert_eq!(t.as_str().parse::<AuthType>().unwrap(), t);
        }
    }

    #[test]
    fn from_properties_basic() {
        let auth = authenticator_from_properties(&props(&[
            ("AUTH_TYPE", "basic"),
            ("USERNAME", "admin"),
            ("PASSWORD", "pass"),
        ]))
        .unwrap();
        assert_eq!(auth.auth_type(), AuthType::Basic);
    }

    #[test]
    fn from_properties_defaults_to_iam_with_apikey() {
        let auth = authenticator_from_properties(&props(&[("APIKEY", "key")])).unwrap();
        assert_eq!(auth.auth_type(), AuthType::Iam);
    }

    #[test]
    fn from_properties_without_type_or_apikey_fails() {
        let err = authenticator_from_properties(&props(&[("USERNAME", "admin")])).unwrap_err();
        assert!(matches!(err, AuthError::InvalidConfig(_)));
    }

    #[test]
    fn from_properties_unknown_type_fails() {
        let err = authenticator_from_properties(&props(&[("AUTH_TYPE", "digest")])).unwrap_err();
        assert!(matches!(err, AuthError::UnknownAuthType(_)));
    }

    #[test]
    fn from_properties_missing_password_names_property() {
        let err = authenticator_from_properties(&props(&[
            ("AUTH_TYPE", "couchdb_session"),
            ("USERNAME", "admin"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("PASSWORD"));
    }

    #[test]
    fn from_properties_noauth_and_bearer() {
        let auth = authenticator_from_properties(&props(&[("AUTH_TYPE", "noauth")])).unwrap();
        assert_eq!(auth.auth_type(), AuthType::NoAuth);

        let auth = authenticator_from_properties(&props(&[
            ("AUTH_TYPE", "bearertoken"),
            ("BEARER_TOKEN", "tok"),
        ]))
        .unwrap();
        assert_eq!(auth.auth_type(), AuthType::BearerToken);
    }

    #[test]
    fn format_http_error_excludes_body() {
        let err = HttpError::HttpStatus {
            status: http::StatusCode::BAD_REQUEST,
            body_preview: "apikey=secret".into(),
            content_type: None,
        };
        let msg = format_http_error(&err, "IAM token");
        assert_eq!(msg, "IAM token HTTP 400 Bad Request");
    }

    #[test]
    fn format_http_error_names_each_failure() {
        let timeout = format_http_error(&HttpError::Timeout(std::time::Duration::from_secs(3)), "_session");
        assert_eq!(timeout, "_session request timed out after 3s");

        let scheme = format_http_error(
            &HttpError::InvalidScheme {
                scheme: "http".into(),
                reason: "HTTPS required".into(),
            },
            "IAM token",
        );
        assert_eq!(scheme, "IAM token invalid scheme 'http': HTTPS required");

        let too_large = format_http_error(&HttpError::BodyTooLarge { limit: 10, actual: 20 }, "IAM token");
        assert!(too_large.contains("limit 10 bytes"));
    }

    #[test]
    fn bad_first_or_last_char() {
        assert!(has_bad_first_or_last_char("{url}"));
        assert!(has_bad_first_or_last_char("\"quoted\""));
        assert!(has_bad_first_or_last_char("trailing}"));
        assert!(!has_bad_first_or_last_char("https://example.com"));
        assert!(check_credential("apikey", "").is_err());
        assert!(check_credential("apikey", "{apikey}").is_err());
        assert!(check_credential("apikey", "abc").is_ok());
    }
}
