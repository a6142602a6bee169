use std::collections::HashMap;

use cloudant_core::{DetailedResponse, SdkError};
use http::Method;

use crate::CloudantV1;
use crate::common::request;
use crate::models::{ApiKeysResult, OkResult, Security};

#[derive(Debug, Clone, Default)]
pub struct GetSecurityOptions {
    pub db: String,
    pub headers: HashMap<String, String>,
}

impl GetSecurityOptions {
    #[must_use]
    pub fn new(db: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PutSecurityOptions {
    pub db: String,
    pub security: Security,
    pub headers: HashMap<String, String>,
}

impl PutSecurityOptions {
    #[must_use]
    pub fn new(db: impl Into<String>, security: Security) -> Self {
        Self {
            db: db.into(),
            security,
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PostApiKeysOptions {
    pub headers: HashMap<String, String>,
}

/// Cloudant-specific permissions of a database
#[derive(Debug, Clone, Default)]
pub struct PutCloudantSecurityConfigurationOptions {
    pub db: String,
    pub security: Security,
    pub headers: HashMap<String, String>,
}

impl PutCloudantSecurityConfigurationOptions {
    #[must_use]
    pub fn new(db: impl Into<String>, security: Security) -> Self {
        Self {
            db: db.into(),
            security,
            headers: HashMap::new(),
        }
    }
}

impl CloudantV1 {
    pub async fn get_security(
        &self,
        options: &GetSecurityOptions,
    ) -> Result<DetailedResponse<Security>, SdkError> {
        let request = request(Method::GET, "/{db}/_security", "getSecurity")
            .path_param("db", options.db.as_str())
            .accept_json()
            .custom_headers(&options.headers);
        self.service.send_json(request).await
    }

    /// Replace the security document of a database
    pub async fn put_security(
        &self,
        options: &PutSecurityOptions,
    ) -> Result<DetailedResponse<OkResult>, SdkError> {
        let request = request(Method::PUT, "/{db}/_security", "putSecurity")
            .path_param("db", options.db.as_str())
            .accept_json()
            .json_body(&options.security)
            .custom_headers(&options.headers);
        self.service.send_json(request).await
    }

    /// Generate a legacy API key
    pub async fn post_api_keys(
        &self,
        options: &PostApiKeysOptions,
    ) -> Result<DetailedResponse<ApiKeysResult>, SdkError> {
        let request = request(Method::POST, "/_api/v2/api_keys", "postApiKeys")
            .accept_json()
            .custom_headers(&options.headers);
        self.service.send_json(request).await
    }

    pub async fn put_cloudant_security_configuration(
        &self,
        options: &PutCloudantSecurityConfigurationOptions,
    ) -> Result<DetailedResponse<OkResult>, SdkError> {
        let request = request(
            Method::PUT,
            "/_api/v2/db/{db}/_security",
            "putCloudantSecurityConfiguration",
        )
        .path_param("db", options.db.as_str())
        .accept_json()
        .json_body(&options.security)
        .custom_headers(&options.headers);
        self.service.send_json(request).await
    }
}
