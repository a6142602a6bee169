use std::collections::HashMap;

use cloudant_core::{DetailedResponse, SdkError};
use http::Method;

use crate::CloudantV1;
use crate::common::request;
use crate::models::SessionInformation;

#[derive(Debug, Clone, Default)]
pub struct GetSessionInformationOptions {
    pub headers: HashMap<String, String>,
}

impl CloudantV1 {
    /// Who the current credentials authenticate as
    pub async fn get_session_information(
        &self,
        options: &GetSessionInformationOptions,
    ) -> Result<DetailedResponse<SessionInformation>, SdkError> {
        let request = request(Method::GET, "/_session", "getSessionInformation")
            .accept_json()
            .custom_headers(&options.headers);
        self.service.send_json(request).await
    }
}
