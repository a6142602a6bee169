use std::collections::HashMap;

use cloudant_core::{ByteStream, DetailedResponse, SdkError, ServiceRequest};
use http::Method;
use serde::Serialize;

use crate::CloudantV1;
use crate::common::request;
use crate::models::{ViewQueriesResult, ViewQuery, ViewResult};

#[derive(Debug, Clone, Default)]
pub struct PostViewOptions {
    pub db: String,
    pub ddoc: String,
    pub view: String,
    pub query: ViewQuery,
    pub headers: HashMap<String, String>,
}

impl PostViewOptions {
    #[must_use]
    pub fn new(db: impl Into<String>, ddoc: impl Into<String>, view: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            ddoc: ddoc.into(),
            view: view.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PostViewQueriesOptions {
    pub db: String,
    pub ddoc: String,
    pub view: String,
    pub queries: Vec<ViewQuery>,
    pub headers: HashMap<String, String>,
}

impl PostViewQueriesOptions {
    #[must_use]
    pub fn new(
        db: impl Into<String>,
        ddoc: impl Into<String>,
        view: impl Into<String>,
        queries: Vec<ViewQuery>,
    ) -> Self {
        Self {
            db: db.into(),
            ddoc: ddoc.into(),
            view: view.into(),
            queries,
            headers: HashMap::new(),
        }
    }
}

#[derive(Serialize)]
struct ViewQueriesBody<'a> {
    queries: &'a [ViewQuery],
}

impl CloudantV1 {
    /// Query a MapReduce view
    pub async fn post_view(
        &self,
        options: &PostViewOptions,
    ) -> Result<DetailedResponse<ViewResult>, SdkError> {
        self.service.send_json(view_request(options)).await
    }

    /// Like [`Self::post_view`], returning the unparsed JSON body
    pub async fn post_view_as_stream(
        &self,
        options: &PostViewOptions,
    ) -> Result<DetailedResponse<ByteStream>, SdkError> {
        self.service.send_stream(view_request(options)).await
    }

    /// Run several queries against one view
    pub async fn post_view_queries(
        &self,
        options: &PostViewQueriesOptions,
    ) -> Result<DetailedResponse<ViewQueriesResult>, SdkError> {
        self.service.send_json(view_queries_request(options)).await
    }

    /// Like [`Self::post_view_queries`], returning the unparsed JSON body
    pub async fn post_view_queries_as_stream(
        &self,
        options: &PostViewQueriesOptions,
    ) -> Result<DetailedResponse<ByteStream>, SdkError> {
        self.service.send_stream(view_queries_request(options)).await
    }
}

fn view_request(options: &PostViewOptions) -> ServiceRequest {
    request(Method::POST, "/{db}/_design/{ddoc}/_view/{view}", "postView")
        .path_param("db", options.db.as_str())
        .path_param("ddoc", options.ddoc.as_str())
        .path_param("view", options.view.as_str())
        .accept_json()
        .json_body(&options.query)
        .custom_headers(&options.headers)
}

fn view_queries_request(options: &PostViewQueriesOptions) -> ServiceRequest {
    request(
        Method::POST,
        "/{db}/_design/{ddoc}/_view/{view}/queries",
        "postViewQueries",
    )
    .path_param("db", options.db.as_str())
    .path_param("ddoc", options.ddoc.as_str())
    .path_param("view", options.view.as_str())
    .accept_json()
    .json_body(&ViewQueriesBody {
        queries: &options.queries,
    })
    .custom_headers(&options.headers)
}
