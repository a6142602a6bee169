use std::collections::HashMap;

use cloudant_core::{DetailedResponse, SdkError};
use http::Method;

use super::{Body, with_body};
use crate::CloudantV1;
use crate::common::request;
use crate::models::{Document, DocumentResult};

/// Local documents are not replicated and have no revision history; `doc_id`
/// is the name after the `_local/` prefix.
#[derive(Debug, Clone, Default)]
pub struct DeleteLocalDocumentOptions {
    pub db: String,
    pub doc_id: String,
    pub batch: Option<String>,
    pub headers: HashMap<String, String>,
}

impl DeleteLocalDocumentOptions {
    #[must_use]
    pub fn new(db: impl Into<String>, doc_id: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            doc_id: doc_id.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetLocalDocumentOptions {
    pub db: String,
    pub doc_id: String,
    pub accept: Option<String>,
    pub if_none_match: Option<String>,
    pub attachments: Option<bool>,
    pub att_encoding_info: Option<bool>,
    pub local_seq: Option<bool>,
    pub headers: HashMap<String, String>,
}

impl GetLocalDocumentOptions {
    #[must_use]
    pub fn new(db: impl Into<String>, doc_id: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            doc_id: doc_id.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PutLocalDocumentOptions {
    pub db: String,
    pub doc_id: String,
    pub document: Body<Document>,
    pub batch: Option<String>,
    pub headers: HashMap<String, String>,
}

impl PutLocalDocumentOptions {
    #[must_use]
    pub fn new(
        db: impl Into<String>,
        doc_id: impl Into<String>,
        document: impl Into<Body<Document>>,
    ) -> Self {
        Self {
            db: db.into(),
            doc_id: doc_id.into(),
            document: document.into(),
            ..Self::default()
        }
    }
}

impl CloudantV1 {
    pub async fn delete_local_document(
        &self,
        options: &DeleteLocalDocumentOptions,
    ) -> Result<DetailedResponse<DocumentResult>, SdkError> {
        let request = request(Method::DELETE, "/{db}/_local/{doc_id}", "deleteLocalDocument")
            .path_param("db", options.db.as_str())
            .path_param("doc_id", options.doc_id.as_str())
            .accept_json()
            .query_opt("batch", options.batch.as_deref())
            .custom_headers(&options.headers);
        self.service.send_json(request).await
    }

    pub async fn get_local_document(
        &self,
        options: &GetLocalDocumentOptions,
    ) -> Result<DetailedResponse<Document>, SdkError> {
        let request = request(Method::GET, "/{db}/_local/{doc_id}", "getLocalDocument")
            .path_param("db", options.db.as_str())
            .path_param("doc_id", options.doc_id.as_str())
            .accept(options.accept.as_deref().unwrap_or("application/json"))
            .header_opt("If-None-Match", options.if_none_match.as_deref())
            .query_opt("attachments", options.attachments)
            .query_opt("att_encoding_info", options.att_encoding_info)
            .query_opt("local_seq", options.local_seq)
            .custom_headers(&options.headers);
        self.service.send_json(request).await
    }

    pub async fn put_local_document(
        &self,
        options: &PutLocalDocumentOptions,
    ) -> Result<DetailedResponse<DocumentResult>, SdkError> {
        let request = request(Method::PUT, "/{db}/_local/{doc_id}", "putLocalDocument")
            .path_param("db", options.db.as_str())
            .path_param("doc_id", options.doc_id.as_str())
            .accept_json()
            .query_opt("batch", options.batch.as_deref());
        let request = with_body(request, &options.document).custom_headers(&options.headers);
        self.service.send_json(request).await
    }
}
