use std::collections::HashMap;

use cloudant_core::{DetailedResponse, SdkError};
use http::Method;
use serde::Serialize;

use crate::CloudantV1;
use crate::common::request;
use crate::models::{CapacityThroughputInformation, ServerInformation, UuidsResult};

#[derive(Debug, Clone, Default)]
pub struct GetServerInformationOptions {
    pub headers: HashMap<String, String>,
}

#[derive(Debug, Clone, Default)]
pub struct GetUuidsOptions {
    /// Number of UUIDs to return
    pub count: Option<u32>,
    pub headers: HashMap<String, String>,
}

#[derive(Debug, Clone, Default)]
pub struct GetCapacityThroughputInformationOptions {
    pub headers: HashMap<String, String>,
}

#[derive(Debug, Clone, Default)]
pub struct PutCapacityThroughputConfigurationOptions {
    /// Target number of provisioned throughput blocks
    pub blocks: u32,
    pub headers: HashMap<String, String>,
}

impl PutCapacityThroughputConfigurationOptions {
    #[must_use]
    pub fn new(blocks: u32) -> Self {
        Self {
            blocks,
            headers: HashMap::new(),
        }
    }
}

#[derive(Serialize)]
struct CapacityThroughputConfiguration {
    blocks: u32,
}

impl CloudantV1 {
    /// Server information: version, vendor and enabled features (`GET /`)
    pub async fn get_server_information(
        &self,
        options: &GetServerInformationOptions,
    ) -> Result<DetailedResponse<ServerInformation>, SdkError> {
        let request = request(Method::GET, "/", "getServerInformation")
            .accept_json()
            .custom_headers(&options.headers);
        self.service.send_json(request).await
    }

    /// Generate UUIDs (`GET /_uuids`)
    pub async fn get_uuids(
        &self,
        options: &GetUuidsOptions,
    ) -> Result<DetailedResponse<UuidsResult>, SdkError> {
        let request = request(Method::GET, "/_uuids", "getUuids")
            .accept_json()
            .query_opt("count", options.count)
            .custom_headers(&options.headers);
        self.service.send_json(request).await
    }

    /// Current and target provisioned throughput capacity
    pub async fn get_capacity_throughput_information(
        &self,
        options: &GetCapacityThroughputInformationOptions,
    ) -> Result<DetailedResponse<CapacityThroughputInformation>, SdkError> {
        let request = request(
            Method::GET,
            "/_api/v2/user/capacity/throughput",
            "getCapacityThroughputInformation",
        )
        .accept_json()
        .custom_headers(&options.headers);
        self.service.send_json(request).await
    }

    /// Change the target provisioned throughput capacity
    pub async fn put_capacity_throughput_configuration(
        &self,
        options: &PutCapacityThroughputConfigurationOptions,
    ) -> Result<DetailedResponse<CapacityThroughputInformation>, SdkError> {
        let request = request(
            Method::PUT,
            "/_api/v2/user/capacity/throughput",
            "putCapacityThroughputConfiguration",
        )
        .accept_json()
        .json_body(&CapacityThroughputConfiguration {
            blocks: options.blocks,
        })
        .custom_headers(&options.headers);
        self.service.send_json(request).await
    }
}
