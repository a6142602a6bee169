use async_trait::async_trait;
use http::HeaderMap;
use url::Url;

use super::{AuthError, AuthType, Authenticator};

/// Sends requests without credentials
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuthAuthenticator;

impl NoAuthAuthenticator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Authenticator for NoAuthAuthenticator {
    fn auth_type(&self) -> AuthType {
        AuthType::NoAuth
    }

    fn validate(&self) -> Result<(), AuthError> {
        Ok(())
    }

    async fn authenticate(&self, _headers: &mut HeaderMap, _service_url: &Url) -> Result<(), AuthError> {
        Ok(())
    }
}
