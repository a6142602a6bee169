use std::collections::HashMap;

use cloudant_core::{ByteStream, DetailedResponse, SdkError, ServiceRequest};
use http::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::CloudantV1;
use crate::common::request;
use crate::models::{ExplainResult, FindResult, IndexDefinition, IndexResult, IndexesInformation, OkResult};

/// Mango query body shared by `_find` and `_explain`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FindQuery {
    pub selector: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookmark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflicts: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_stats: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u64>,
    /// `[{"field": "asc"}]` entries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<HashMap<String, String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stable: Option<bool>,
    /// `true`, `false` or `lazy`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<String>,
    /// Design document name, or `[ddoc, index]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_index: Option<Vec<String>>,
    /// Read quorum; only meaningful for global queries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r: Option<u32>,
}

impl FindQuery {
    #[must_use]
    pub fn new(selector: Map<String, Value>) -> Self {
        Self {
            selector,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PostExplainOptions {
    pub db: String,
    pub query: FindQuery,
    pub headers: HashMap<String, String>,
}

impl PostExplainOptions {
    #[must_use]
    pub fn new(db: impl Into<String>, query: FindQuery) -> Self {
        Self {
            db: db.into(),
            query,
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PostFindOptions {
    pub db: String,
    pub query: FindQuery,
    pub headers: HashMap<String, String>,
}

impl PostFindOptions {
    #[must_use]
    pub fn new(db: impl Into<String>, query: FindQuery) -> Self {
        Self {
            db: db.into(),
            query,
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetIndexesInformationOptions {
    pub db: String,
    pub headers: HashMap<String, String>,
}

impl GetIndexesInformationOptions {
    #[must_use]
    pub fn new(db: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PostIndexOptions {
    pub db: String,
    pub index: IndexDefinition,
    /// Design document to create the index in; generated when unset
    pub ddoc: Option<String>,
    pub name: Option<String>,
    pub partitioned: Option<bool>,
    /// `json` (default) or `text`
    pub type_: Option<String>,
    pub headers: HashMap<String, String>,
}

impl PostIndexOptions {
    #[must_use]
    pub fn new(db: impl Into<String>, index: IndexDefinition) -> Self {
        Self {
            db: db.into(),
            index,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeleteIndexOptions {
    pub db: String,
    pub ddoc: String,
    /// `json` or `text`
    pub type_: String,
    pub index: String,
    pub headers: HashMap<String, String>,
}

impl DeleteIndexOptions {
    #[must_use]
    pub fn new(
        db: impl Into<String>,
        ddoc: impl Into<String>,
        type_: impl Into<String>,
        index: impl Into<String>,
    ) -> Self {
        Self {
            db: db.into(),
            ddoc: ddoc.into(),
            type_: type_.into(),
            index: index.into(),
            headers: HashMap::new(),
        }
    }
}

#[derive(Serialize)]
struct IndexBody<'a> {
    index: &'a IndexDefinition,
    #[serde(skip_serializing_if = "Option::is_none")]
    ddoc: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    partitioned: Option<bool>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    type_: Option<&'a str>,
}

impl CloudantV1 {
    /// Show which index a Mango query would use
    pub async fn post_explain(
        &self,
        options: &PostExplainOptions,
    ) -> Result<DetailedResponse<ExplainResult>, SdkError> {
        let request = request(Method::POST, "/{db}/_explain", "postExplain")
            .path_param("db", options.db.as_str())
            .accept_json()
            .json_body(&options.query)
            .custom_headers(&options.headers);
        self.service.send_json(request).await
    }

    /// Run a Mango query (`POST /{db}/_find`)
    pub async fn post_find(
        &self,
        options: &PostFindOptions,
    ) -> Result<DetailedResponse<FindResult>, SdkError> {
        self.service.send_json(find_request(options)).await
    }

    /// Like [`Self::post_find`], returning the unparsed JSON body
    pub async fn post_find_as_stream(
        &self,
        options: &PostFindOptions,
    ) -> Result<DetailedResponse<ByteStream>, SdkError> {
        self.service.send_stream(find_request(options)).await
    }

    /// Mango indexes of a database
    pub async fn get_indexes_information(
        &self,
        options: &GetIndexesInformationOptions,
    ) -> Result<DetailedResponse<IndexesInformation>, SdkError> {
        let request = request(Method::GET, "/{db}/_index", "getIndexesInformation")
            .path_param("db", options.db.as_str())
            .accept_json()
            .custom_headers(&options.headers);
        self.service.send_json(request).await
    }

    /// Create a Mango index
    pub async fn post_index(
        &self,
        options: &PostIndexOptions,
    ) -> Result<DetailedResponse<IndexResult>, SdkError> {
        let request = request(Method::POST, "/{db}/_index", "postIndex")
            .path_param("db", options.db.as_str())
            .accept_json()
            .json_body(&IndexBody {
                index: &options.index,
                ddoc: options.ddoc.as_deref(),
                name: options.name.as_deref(),
                partitioned: options.partitioned,
                type_: options.type_.as_deref(),
            })
            .custom_headers(&options.headers);
        self.service.send_json(request).await
    }

    /// Delete a Mango index
    pub async fn delete_index(
        &self,
        options: &DeleteIndexOptions,
    ) -> Result<DetailedResponse<OkResult>, SdkError> {
        let request = request(
            Method::DELETE,
            "/{db}/_index/_design/{ddoc}/{type}/{index}",
            "deleteIndex",
        )
        .path_param("db", options.db.as_str())
        .path_param("ddoc", options.ddoc.as_str())
        .path_param("type", options.type_.as_str())
        .path_param("index", options.index.as_str())
        .accept_json()
        .custom_headers(&options.headers);
        self.service.send_json(request).await
    }
}

fn find_request(options: &PostFindOptions) -> ServiceRequest {
    request(Method::POST, "/{db}/_find", "postFind")
        .path_param("db", options.db.as_str())
        .accept_json()
        .json_body(&options.query)
        .custom_headers(&options.headers)
}
