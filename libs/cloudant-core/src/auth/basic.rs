use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use http::header::{AUTHORIZATION, HeaderValue};
use http::HeaderMap;
use url::Url;
use zeroize::Zeroizing;

use super::{AuthError, AuthType, Authenticator, check_credential};
use crate::secret::SecretString;

/// HTTP Basic authentication (`Authorization: Basic base64(user:password)`)
#[derive(Debug, Clone)]
pub struct BasicAuthenticator {
    username: String,
    password: SecretString,
}

impl BasicAuthenticator {
    /// Create a basic authenticator
    ///
    /// # Errors
    /// Returns `AuthError::InvalidConfig` if the username or password is empty
    /// or wrapped in `{`, `}` or `"`
    pub fn new(
        username: impl Into<String>,
        password: impl Into<SecretString>,
    ) -> Result<Self, AuthError> {
        let auth = Self {
            username: username.into(),
            password: password.into(),
        };
        auth.validate()?;
        Ok(auth)
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    fn header_value(&self) -> Result<HeaderValue, AuthError> {
        let credentials = Zeroizing::new(format!("{}:{}", self.username, self.password.expose()));
        let encoded = Zeroizing::new(general_purpose::STANDARD.encode(credentials.as_bytes()));
        let header = Zeroizing::new(format!("Basic {}", &*encoded));
        let mut value = HeaderValue::from_str(&header)
            .map_err(|_| AuthError::InvalidConfig("credentials are not a valid header value".into()))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

#[async_trait]
impl Authenticator for BasicAuthenticator {
    fn auth_type(&self) -> AuthType {
        AuthType::Basic
    }

    fn validate(&self) -> Result<(), AuthError> {
        check_credential("username", &self.username)?;
        check_credential("password", self.password.expose())
    }

    async fn authenticate(&self, headers: &mut HeaderMap, _service_url: &Url) -> Result<(), AuthError> {
        headers.insert(AUTHORIZATION, self.header_value()?);
        Ok(())
    }
}
