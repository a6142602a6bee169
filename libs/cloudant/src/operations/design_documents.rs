use std::collections::HashMap;

use cloudant_core::{DetailedResponse, SdkError};
use http::Method;
use serde::Serialize;

use crate::CloudantV1;
use crate::common::request;
use crate::models::{
    AllDocsQueriesResult, AllDocsQuery, AllDocsResult, DesignDocument, DesignDocumentInformation,
    DocumentResult,
};

/// Options addressing a design document by database and name (without the
/// `_design/` prefix).
#[derive(Debug, Clone, Default)]
pub struct HeadDesignDocumentOptions {
    pub db: String,
    pub ddoc: String,
    pub if_none_match: Option<String>,
    pub headers: HashMap<String, String>,
}

impl HeadDesignDocumentOptions {
    #[must_use]
    pub fn new(db: impl Into<String>, ddoc: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            ddoc: ddoc.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeleteDesignDocumentOptions {
    pub db: String,
    pub ddoc: String,
    pub if_match: Option<String>,
    pub batch: Option<String>,
    pub rev: Option<String>,
    pub headers: HashMap<String, String>,
}

impl DeleteDesignDocumentOptions {
    #[must_use]
    pub fn new(db: impl Into<String>, ddoc: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            ddoc: ddoc.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetDesignDocumentOptions {
    pub db: String,
    pub ddoc: String,
    pub if_none_match: Option<String>,
    pub attachments: Option<bool>,
    pub att_encoding_info: Option<bool>,
    pub conflicts: Option<bool>,
    pub deleted_conflicts: Option<bool>,
    pub latest: Option<bool>,
    pub local_seq: Option<bool>,
    pub meta: Option<bool>,
    pub rev: Option<String>,
    pub revs: Option<bool>,
    pub revs_info: Option<bool>,
    pub headers: HashMap<String, String>,
}

impl GetDesignDocumentOptions {
    #[must_use]
    pub fn new(db: impl Into<String>, ddoc: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            ddoc: ddoc.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PutDesignDocumentOptions {
    pub db: String,
    pub ddoc: String,
    pub design_document: DesignDocument,
    pub if_match: Option<String>,
    pub batch: Option<String>,
    pub new_edits: Option<bool>,
    pub rev: Option<String>,
    pub headers: HashMap<String, String>,
}

impl PutDesignDocumentOptions {
    #[must_use]
    pub fn new(db: impl Into<String>, ddoc: impl Into<String>, design_document: DesignDocument) -> Self {
        Self {
            db: db.into(),
            ddoc: ddoc.into(),
            design_document,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetDesignDocumentInformationOptions {
    pub db: String,
    pub ddoc: String,
    pub headers: HashMap<String, String>,
}

impl GetDesignDocumentInformationOptions {
    #[must_use]
    pub fn new(db: impl Into<String>, ddoc: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            ddoc: ddoc.into(),
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PostDesignDocsOptions {
    pub db: String,
    pub query: AllDocsQuery,
    pub accept: Option<String>,
    pub headers: HashMap<String, String>,
}

impl PostDesignDocsOptions {
    #[must_use]
    pub fn new(db: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PostDesignDocsQueriesOptions {
    pub db: String,
    pub queries: Vec<AllDocsQuery>,
    pub accept: Option<String>,
    pub headers: HashMap<String, String>,
}

impl PostDesignDocsQueriesOptions {
    #[must_use]
    pub fn new(db: impl Into<String>, queries: Vec<AllDocsQuery>) -> Self {
        Self {
            db: db.into(),
            queries,
            ..Self::default()
        }
    }
}

#[derive(Serialize)]
struct QueriesBody<'a> {
    queries: &'a [AllDocsQuery],
}

impl CloudantV1 {
    pub async fn head_design_document(
        &self,
        options: &HeadDesignDocumentOptions,
    ) -> Result<DetailedResponse<()>, SdkError> {
        let request = request(Method::HEAD, "/{db}/_design/{ddoc}", "headDesignDocument")
            .path_param("db", options.db.as_str())
            .path_param("ddoc", options.ddoc.as_str())
            .header_opt("If-None-Match", options.if_none_match.as_deref())
            .custom_headers(&options.headers);
        self.service.send_head(request).await
    }

    pub async fn delete_design_document(
        &self,
        options: &DeleteDesignDocumentOptions,
    ) -> Result<DetailedResponse<DocumentResult>, SdkError> {
        let request = request(Method::DELETE, "/{db}/_design/{ddoc}", "deleteDesignDocument")
            .path_param("db", options.db.as_str())
            .path_param("ddoc", options.ddoc.as_str())
            .accept_json()
            .header_opt("If-Match", options.if_match.as_deref())
            .query_opt("batch", options.batch.as_deref())
            .query_opt("rev", options.rev.as_deref())
            .custom_headers(&options.headers);
        self.service.send_json(request).await
    }

    pub async fn get_design_document(
        &self,
        options: &GetDesignDocumentOptions,
    ) -> Result<DetailedResponse<DesignDocument>, SdkError> {
        let request = request(Method::GET, "/{db}/_design/{ddoc}", "getDesignDocument")
            .path_param("db", options.db.as_str())
            .path_param("ddoc", options.ddoc.as_str())
            .accept_json()
            .header_opt("If-None-Match", options.if_none_match.as_deref())
            .query_opt("attachments", options.attachments)
            .query_opt("att_encoding_info", options.att_encoding_info)
            .query_opt("conflicts", options.conflicts)
            .query_opt("deleted_conflicts", options.deleted_conflicts)
            .query_opt("latest", options.latest)
            .query_opt("local_seq", options.local_seq)
            .query_opt("meta", options.meta)
            .query_opt("rev", options.rev.as_deref())
            .query_opt("revs", options.revs)
            .query_opt("revs_info", options.revs_info)
            .custom_headers(&options.headers);
        self.service.send_json(request).await
    }

    pub async fn put_design_document(
        &self,
        options: &PutDesignDocumentOptions,
    ) -> Result<DetailedResponse<DocumentResult>, SdkError> {
        let request = request(Method::PUT, "/{db}/_design/{ddoc}", "putDesignDocument")
            .path_param("db", options.db.as_str())
            .path_param("ddoc", options.ddoc.as_str())
            .accept_json()
            .header_opt("If-Match", options.if_match.as_deref())
            .query_opt("batch", options.batch.as_deref())
            .query_opt("new_edits", options.new_edits)
            .query_opt("rev", options.rev.as_deref())
            .json_body(&options.design_document)
            .custom_headers(&options.headers);
        self.service.send_json(request).await
    }

    /// View index size and update state of a design document
    pub async fn get_design_document_information(
        &self,
        options: &GetDesignDocumentInformationOptions,
    ) -> Result<DetailedResponse<DesignDocumentInformation>, SdkError> {
        let request = request(
            Method::GET,
            "/{db}/_design/{ddoc}/_info",
            "getDesignDocumentInformation",
        )
        .path_param("db", options.db.as_str())
        .path_param("ddoc", options.ddoc.as_str())
        .accept_json()
        .custom_headers(&options.headers);
        self.service.send_json(request).await
    }

    /// Query the design documents of a database
    pub async fn post_design_docs(
        &self,
        options: &PostDesignDocsOptions,
    ) -> Result<DetailedResponse<AllDocsResult>, SdkError> {
        let request = request(Method::POST, "/{db}/_design_docs", "postDesignDocs")
            .path_param("db", options.db.as_str())
            .accept(options.accept.as_deref().unwrap_or("application/json"))
            .json_body(&options.query)
            .custom_headers(&options.headers);
        self.service.send_json(request).await
    }

    pub async fn post_design_docs_queries(
        &self,
        options: &PostDesignDocsQueriesOptions,
    ) -> Result<DetailedResponse<AllDocsQueriesResult>, SdkError> {
        let request = request(Method::POST, "/{db}/_design_docs/queries", "postDesignDocsQueries")
            .path_param("db", options.db.as_str())
            .accept(options.accept.as_deref().unwrap_or("application/json"))
            .json_body(&QueriesBody {
                queries: &options.queries,
            })
            .custom_headers(&options.headers);
        self.service.send_json(request).await
    }
}
