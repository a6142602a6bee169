use std::collections::{BTreeMap, HashMap};

use cloudant_core::{DetailedResponse, SdkError};
use http::Method;

use crate::CloudantV1;
use crate::common::request;
use crate::models::{DocumentShardInfo, RevsDiff, ShardsInformation};

/// Revisions to compare, keyed by document ID
#[derive(Debug, Clone, Default)]
pub struct PostRevsDiffOptions {
    pub db: String,
    pub document_revisions: BTreeMap<String, Vec<String>>,
    pub headers: HashMap<String, String>,
}

impl PostRevsDiffOptions {
    #[must_use]
    pub fn new(db: impl Into<String>, document_revisions: BTreeMap<String, Vec<String>>) -> Self {
        Self {
            db: db.into(),
            document_revisions,
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetShardsInformationOptions {
    pub db: String,
    pub headers: HashMap<String, String>,
}

impl GetShardsInformationOptions {
    #[must_use]
    pub fn new(db: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetDocumentShardsInfoOptions {
    pub db: String,
    pub doc_id: String,
    pub headers: HashMap<String, String>,
}

impl GetDocumentShardsInfoOptions {
    #[must_use]
    pub fn new(db: impl Into<String>, doc_id: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            doc_id: doc_id.into(),
            headers: HashMap::new(),
        }
    }
}

impl CloudantV1 {
    /// Which of the given revisions the database is missing
    pub async fn post_revs_diff(
        &self,
        options: &PostRevsDiffOptions,
    ) -> Result<DetailedResponse<HashMap<String, RevsDiff>>, SdkError> {
        let request = request(Method::POST, "/{db}/_revs_diff", "postRevsDiff")
            .path_param("db", options.db.as_str())
            .accept_json()
            .json_body(&options.document_revisions)
            .custom_headers(&options.headers);
        self.service.send_json(request).await
    }

    pub async fn get_shards_information(
        &self,
        options: &GetShardsInformationOptions,
    ) -> Result<DetailedResponse<ShardsInformation>, SdkError> {
        let request = request(Method::GET, "/{db}/_shards", "getShardsInformation")
            .path_param("db", options.db.as_str())
            .accept_json()
            .custom_headers(&options.headers);
        self.service.send_json(request).await
    }

    /// Shard range and nodes holding a document
    pub async fn get_document_shards_info(
        &self,
        options: &GetDocumentShardsInfoOptions,
    ) -> Result<DetailedResponse<DocumentShardInfo>, SdkError> {
        let request = request(Method::GET, "/{db}/_shards/{doc_id}", "getDocumentShardsInfo")
            .path_param("db", options.db.as_str())
            .path_param("doc_id", options.doc_id.as_str())
            .accept_json()
            .custom_headers(&options.headers);
        self.service.send_json(request).await
    }
}
