use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use http::header::{AUTHORIZATION, HeaderValue};
use http::HeaderMap;
use url::Url;
use zeroize::Zeroizing;

use super::{AuthError, AuthType, Authenticator, check_credential};
use crate::secret::SecretString;

/// Sends a caller-managed bearer token (`Authorization: Bearer <token>`).
///
/// The token can be replaced at any time with [`set_bearer_token`](Self::set_bearer_token);
/// requests already in flight keep the token they were sent with.
#[derive(Debug)]
pub struct BearerTokenAuthenticator {
    token: RwLock<SecretString>,
}

impl BearerTokenAuthenticator {
    /// Create a bearer token authenticator
    ///
    /// # Errors
    /// Returns `AuthError::InvalidConfig` if the token is empty
    pub fn new(token: impl Into<SecretString>) -> Result<Self, AuthError> {
        let auth = Self {
            token: RwLock::new(token.into()),
        };
        auth.validate()?;
        Ok(auth)
    }

    /// Replace the token used for subsequent requests
    ///
    /// # Errors
    /// Returns `AuthError::InvalidConfig` if the new token is empty
    pub fn set_bearer_token(&self, token: impl Into<SecretString>) -> Result<(), AuthError> {
        let token = token.into();
        check_credential("bearer token", token.expose())?;
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
        Ok(())
    }
}

#[async_trait]
impl Authenticator for BearerTokenAuthenticator {
    fn auth_type(&self) -> AuthType {
        AuthType::BearerToken
    }

    fn validate(&self) -> Result<(), AuthError> {
        let token = self.token.read().unwrap_or_else(PoisonError::into_inner);
        check_credential("bearer token", token.expose())
    }

    async fn authenticate(&self, headers: &mut HeaderMap, _service_url: &Url) -> Result<(), AuthError> {
        let header = {
            let token = self.token.read().unwrap_or_else(PoisonError::into_inner);
            Zeroizing::new(format!("Bearer {}", token.expose()))
        };
        let mut value = HeaderValue::from_str(&header)
            .map_err(|_| AuthError::InvalidConfig("bearer token is not a valid header value".into()))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
        Ok(())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sets_bearer_header_and_follows_updates() {
        let auth = BearerTokenAuthenticator::new("first").unwrap();
        let url = Url::parse("https://example.cloudant.com").unwrap();

        let mut headers = HeaderMap::new();
        auth.authenticate(&mut headers, &url).await.unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer first");

        auth.set_bearer_token("second").unwrap();
        let mut headers = HeaderMap::new();
        auth.authenticate(&mut headers, &url).await.unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer second");
    }

    #[test]
    fn rejects_empty_token() {
        assert!(BearerTokenAuthenticator::new("").is_err());

        let auth = BearerTokenAuthenticator::new("tok").unwrap();
        assert!(auth.set_bearer_token("").is_err());
        assert!(auth.validate().is_ok());
    }

    #[test]
    fn debug_redacts_token() {
        let auth = BearerTokenAuthenticator::new("very-secret-token").unwrap();
        assert!(!format!("{auth:?}").contains("very-secret-token"));
    }
}
