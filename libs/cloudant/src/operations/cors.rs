use std::collections::HashMap;

use cloudant_core::{DetailedResponse, SdkError};
use http::Method;
use serde::Serialize;

use crate::CloudantV1;
use crate::common::request;
use crate::models::{CorsInformation, OkResult};

#[derive(Debug, Clone, Default)]
pub struct GetCorsInformationOptions {
    pub headers: HashMap<String, String>,
}

#[derive(Debug, Clone, Default)]
pub struct PutCorsConfigurationOptions {
    /// Allowed origins; `["*"]` allows any origin
    pub origins: Vec<String>,
    pub allow_credentials: Option<bool>,
    pub enable_cors: Option<bool>,
    pub headers: HashMap<String, String>,
}

impl PutCorsConfigurationOptions {
    #[must_use]
    pub fn new(origins: Vec<String>) -> Self {
        Self {
            origins,
            ..Self::default()
        }
    }
}

#[derive(Serialize)]
struct CorsBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    allow_credentials: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    enable_cors: Option<bool>,
    origins: &'a [String],
}

impl CloudantV1 {
    pub async fn get_cors_information(
        &self,
        options: &GetCorsInformationOptions,
    ) -> Result<DetailedResponse<CorsInformation>, SdkError> {
        let request = request(Method::GET, "/_api/v2/user/config/cors", "getCorsInformation")
            .accept_json()
            .custom_headers(&options.headers);
        self.service.send_json(request).await
    }

    /// Replace the account CORS configuration
    pub async fn put_cors_configuration(
        &self,
        options: &PutCorsConfigurationOptions,
    ) -> Result<DetailedResponse<OkResult>, SdkError> {
        let request = request(Method::PUT, "/_api/v2/user/config/cors", "putCorsConfiguration")
            .accept_json()
            .json_body(&CorsBody {
                allow_credentials: options.allow_credentials,
                enable_cors: options.enable_cors,
                origins: &options.origins,
            })
            .custom_headers(&options.headers);
        self.service.send_json(request).await
    }
}
