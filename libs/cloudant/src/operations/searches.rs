use std::collections::{BTreeMap, HashMap};

use cloudant_core::{ByteStream, DetailedResponse, SdkError, ServiceRequest};
use http::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::CloudantV1;
use crate::common::request;
use crate::models::{SearchAnalyzeResult, SearchInfoResult, SearchResult};

/// Lucene query body of `_search`.
///
/// `counts`, `drilldown`, `group_*` and `ranges` are rejected by
/// partitioned search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookmark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_post_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_pre_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_docs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<String>>,
    /// `ok` to accept a stale index
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counts: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drilldown: Option<Vec<Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_sort: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranges: Option<BTreeMap<String, BTreeMap<String, Value>>>,
}

impl SearchQuery {
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PostSearchAnalyzeOptions {
    pub analyzer: String,
    pub text: String,
    pub headers: HashMap<String, String>,
}

impl PostSearchAnalyzeOptions {
    #[must_use]
    pub fn new(analyzer: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            analyzer: analyzer.into(),
            text: text.into(),
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PostSearchOptions {
    pub db: String,
    pub ddoc: String,
    pub index: String,
    pub query: SearchQuery,
    pub headers: HashMap<String, String>,
}

impl PostSearchOptions {
    #[must_use]
    pub fn new(
        db: impl Into<String>,
        ddoc: impl Into<String>,
        index: impl Into<String>,
        query: SearchQuery,
    ) -> Self {
        Self {
            db: db.into(),
            ddoc: ddoc.into(),
            index: index.into(),
            query,
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetSearchInfoOptions {
    pub db: String,
    pub ddoc: String,
    pub index: String,
    pub headers: HashMap<String, String>,
}

impl GetSearchInfoOptions {
    #[must_use]
    pub fn new(db: impl Into<String>, ddoc: impl Into<String>, index: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            ddoc: ddoc.into(),
            index: index.into(),
            headers: HashMap::new(),
        }
    }
}

#[derive(Serialize)]
struct AnalyzeBody<'a> {
    analyzer: &'a str,
    text: &'a str,
}

impl CloudantV1 {
    /// Tokenize text with a search analyzer
    pub async fn post_search_analyze(
        &self,
        options: &PostSearchAnalyzeOptions,
    ) -> Result<DetailedResponse<SearchAnalyzeResult>, SdkError> {
        if options.analyzer.is_empty() {
            return Err(SdkError::Validation("analyzer must not be empty".to_owned()));
        }
        if options.text.is_empty() {
            return Err(SdkError::Validation("text must not be empty".to_owned()));
        }
        let request = request(Method::POST, "/_search_analyze", "postSearchAnalyze")
            .accept_json()
            .json_body(&AnalyzeBody {
                analyzer: &options.analyzer,
                text: &options.text,
            })
            .custom_headers(&options.headers);
        self.service.send_json(request).await
    }

    /// Query a search index
    pub async fn post_search(
        &self,
        options: &PostSearchOptions,
    ) -> Result<DetailedResponse<SearchResult>, SdkError> {
        self.service.send_json(search_request(options)?).await
    }

    /// Like [`Self::post_search`], returning the unparsed JSON body
    pub async fn post_search_as_stream(
        &self,
        options: &PostSearchOptions,
    ) -> Result<DetailedResponse<ByteStream>, SdkError> {
        self.service.send_stream(search_request(options)?).await
    }

    /// Size and sequence information of a search index
    pub async fn get_search_info(
        &self,
        options: &GetSearchInfoOptions,
    ) -> Result<DetailedResponse<SearchInfoResult>, SdkError> {
        let request = request(
            Method::GET,
            "/{db}/_design/{ddoc}/_search_info/{index}",
            "getSearchInfo",
        )
        .path_param("db", options.db.as_str())
        .path_param("ddoc", options.ddoc.as_str())
        .path_param("index", options.index.as_str())
        .accept_json()
        .custom_headers(&options.headers);
        self.service.send_json(request).await
    }
}

/// Reject a search without query text
pub(super) fn check_search_query(query: &SearchQuery) -> Result<(), SdkError> {
    if query.query.is_empty() {
        return Err(SdkError::Validation("query must not be empty".to_owned()));
    }
    Ok(())
}

fn search_request(options: &PostSearchOptions) -> Result<ServiceRequest, SdkError> {
    check_search_query(&options.query)?;
    Ok(
        request(Method::POST, "/{db}/_design/{ddoc}/_search/{index}", "postSearch")
            .path_param("db", options.db.as_str())
            .path_param("ddoc", options.ddoc.as_str())
            .path_param("index", options.index.as_str())
            .accept_json()
            .json_body(&options.query)
            .custom_headers(&options.headers),
    )
}
