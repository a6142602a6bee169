use std::collections::HashMap;

use cloudant_core::{ByteStream, DetailedResponse, SdkError, ServiceRequest};
use http::Method;

use super::queries::FindQuery;
use super::searches::{SearchQuery, check_search_query};
use crate::CloudantV1;
use crate::common::request;
use crate::models::{
    AllDocsQuery, AllDocsResult, ExplainResult, FindResult, PartitionInformation, SearchResult,
    ViewQuery, ViewResult,
};

#[derive(Debug, Clone, Default)]
pub struct GetPartitionInformationOptions {
    pub db: String,
    pub partition_key: String,
    pub headers: HashMap<String, String>,
}

impl GetPartitionInformationOptions {
    #[must_use]
    pub fn new(db: impl Into<String>, partition_key: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            partition_key: partition_key.into(),
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PostPartitionAllDocsOptions {
    pub db: String,
    pub partition_key: String,
    pub query: AllDocsQuery,
    pub headers: HashMap<String, String>,
}

impl PostPartitionAllDocsOptions {
    #[must_use]
    pub fn new(db: impl Into<String>, partition_key: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            partition_key: partition_key.into(),
            ..Self::default()
        }
    }
}

/// Search within one partition.
///
/// Faceting and grouping (`counts`, `drilldown`, `group_*`, `ranges`) are
/// global-only and rejected before the request is sent.
#[derive(Debug, Clone, Default)]
pub struct PostPartitionSearchOptions {
    pub db: String,
    pub partition_key: String,
    pub ddoc: String,
    pub index: String,
    pub query: SearchQuery,
    pub headers: HashMap<String, String>,
}

impl PostPartitionSearchOptions {
    #[must_use]
    pub fn new(
        db: impl Into<String>,
        partition_key: impl Into<String>,
        ddoc: impl Into<String>,
        index: impl Into<String>,
        query: SearchQuery,
    ) -> Self {
        Self {
            db: db.into(),
            partition_key: partition_key.into(),
            ddoc: ddoc.into(),
            index: index.into(),
            query,
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PostPartitionViewOptions {
    pub db: String,
    pub partition_key: String,
    pub ddoc: String,
    pub view: String,
    pub query: ViewQuery,
    pub headers: HashMap<String, String>,
}

impl PostPartitionViewOptions {
    #[must_use]
    pub fn new(
        db: impl Into<String>,
        partition_key: impl Into<String>,
        ddoc: impl Into<String>,
        view: impl Into<String>,
    ) -> Self {
        Self {
            db: db.into(),
            partition_key: partition_key.into(),
            ddoc: ddoc.into(),
            view: view.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PostPartitionFindOptions {
    pub db: String,
    pub partition_key: String,
    pub query: FindQuery,
    pub headers: HashMap<String, String>,
}

impl PostPartitionFindOptions {
    #[must_use]
    pub fn new(db: impl Into<String>, partition_key: impl Into<String>, query: FindQuery) -> Self {
        Self {
            db: db.into(),
            partition_key: partition_key.into(),
            query,
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PostPartitionExplainOptions {
    pub db: String,
    pub partition_key: String,
    pub query: FindQuery,
    pub headers: HashMap<String, String>,
}

impl PostPartitionExplainOptions {
    #[must_use]
    pub fn new(db: impl Into<String>, partition_key: impl Into<String>, query: FindQuery) -> Self {
        Self {
            db: db.into(),
            partition_key: partition_key.into(),
            query,
            headers: HashMap::new(),
        }
    }
}

impl CloudantV1 {
    /// Document count and size of one partition
    pub async fn get_partition_information(
        &self,
        options: &GetPartitionInformationOptions,
    ) -> Result<DetailedResponse<PartitionInformation>, SdkError> {
        let request = request(
            Method::GET,
            "/{db}/_partition/{partition_key}",
            "getPartitionInformation",
        )
        .path_param("db", options.db.as_str())
        .path_param("partition_key", options.partition_key.as_str())
        .accept_json()
        .custom_headers(&options.headers);
        self.service.send_json(request).await
    }

    pub async fn post_partition_all_docs(
        &self,
        options: &PostPartitionAllDocsOptions,
    ) -> Result<DetailedResponse<AllDocsResult>, SdkError> {
        self.service.send_json(partition_all_docs_request(options)).await
    }

    pub async fn post_partition_all_docs_as_stream(
        &self,
        options: &PostPartitionAllDocsOptions,
    ) -> Result<DetailedResponse<ByteStream>, SdkError> {
        self.service.send_stream(partition_all_docs_request(options)).await
    }

    pub async fn post_partition_search(
        &self,
        options: &PostPartitionSearchOptions,
    ) -> Result<DetailedResponse<SearchResult>, SdkError> {
        self.service.send_json(partition_search_request(options)?).await
    }

    pub async fn post_partition_search_as_stream(
        &self,
        options: &PostPartitionSearchOptions,
    ) -> Result<DetailedResponse<ByteStream>, SdkError> {
        self.service.send_stream(partition_search_request(options)?).await
    }

    pub async fn post_partition_view(
        &self,
        options: &PostPartitionViewOptions,
    ) -> Result<DetailedResponse<ViewResult>, SdkError> {
        self.service.send_json(partition_view_request(options)).await
    }

    pub async fn post_partition_view_as_stream(
        &self,
        options: &PostPartitionViewOptions,
    ) -> Result<DetailedResponse<ByteStream>, SdkError> {
        self.service.send_stream(partition_view_request(options)).await
    }

    pub async fn post_partition_find(
        &self,
        options: &PostPartitionFindOptions,
    ) -> Result<DetailedResponse<FindResult>, SdkError> {
        self.service.send_json(partition_find_request(options)).await
    }

    pub async fn post_partition_find_as_stream(
        &self,
        options: &PostPartitionFindOptions,
    ) -> Result<DetailedResponse<ByteStream>, SdkError> {
        self.service.send_stream(partition_find_request(options)).await
    }

    pub async fn post_partition_explain(
        &self,
        options: &PostPartitionExplainOptions,
    ) -> Result<DetailedResponse<ExplainResult>, SdkError> {
        let request = request(
            Method::POST,
            "/{db}/_partition/{partition_key}/_explain",
            "postPartitionExplain",
        )
        .path_param("db", options.db.as_str())
        .path_param("partition_key", options.partition_key.as_str())
        .accept_json()
        .json_body(&options.query)
        .custom_headers(&options.headers);
        self.service.send_json(request).await
    }
}

fn partition_all_docs_request(options: &PostPartitionAllDocsOptions) -> ServiceRequest {
    request(
        Method::POST,
        "/{db}/_partition/{partition_key}/_all_docs",
        "postPartitionAllDocs",
    )
    .path_param("db", options.db.as_str())
    .path_param("partition_key", options.partition_key.as_str())
    .accept_json()
    .json_body(&options.query)
    .custom_headers(&options.headers)
}

fn partition_search_request(options: &PostPartitionSearchOptions) -> Result<ServiceRequest, SdkError> {
    let query = &options.query;
    check_search_query(query)?;
    let global_only = [
        ("counts", query.counts.is_some()),
        ("drilldown", query.drilldown.is_some()),
        ("group_field", query.group_field.is_some()),
        ("group_limit", query.group_limit.is_some()),
        ("group_sort", query.group_sort.is_some()),
        ("ranges", query.ranges.is_some()),
    ];
    if let Some((name, _)) = global_only.iter().find(|(_, set)| *set) {
        return Err(SdkError::Validation(format!(
            "{name} is not supported by partitioned search"
        )));
    }
    Ok(request(
        Method::POST,
        "/{db}/_partition/{partition_key}/_design/{ddoc}/_search/{index}",
        "postPartitionSearch",
    )
    .path_param("db", options.db.as_str())
    .path_param("partition_key", options.partition_key.as_str())
    .path_param("ddoc", options.ddoc.as_str())
    .path_param("index", options.index.as_str())
    .accept_json()
    .json_body(query)
    .custom_headers(&options.headers))
}

fn partition_view_request(options: &PostPartitionViewOptions) -> ServiceRequest {
    request(
        Method::POST,
        "/{db}/_partition/{partition_key}/_design/{ddoc}/_view/{view}",
        "postPartitionView",
    )
    .path_param("db", options.db.as_str())
    .path_param("partition_key", options.partition_key.as_str())
    .path_param("ddoc", options.ddoc.as_str())
    .path_param("view", options.view.as_str())
    .accept_json()
    .json_body(&options.query)
    .custom_headers(&options.headers)
}

fn partition_find_request(options: &PostPartitionFindOptions) -> ServiceRequest {
    request(
        Method::POST,
        "/{db}/_partition/{partition_key}/_find",
        "postPartitionFind",
    )
    .path_param("db", options.db.as_str())
    .path_param("partition_key", options.partition_key.as_str())
    .accept_json()
    .json_body(&options.query)
    .custom_headers(&options.headers)
}
