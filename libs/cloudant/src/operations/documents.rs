use std::collections::HashMap;

use cloudant_core::{ByteStream, DetailedResponse, SdkError, ServiceRequest};
use http::Method;
use serde::Serialize;

use super::{Body, with_body};
use crate::CloudantV1;
use crate::common::request;
use crate::models::{
    AllDocsQueriesResult, AllDocsQuery, AllDocsResult, BulkDocs, BulkGetQueryDocument,
    BulkGetResult, Document, DocumentResult,
};
use crate::validation::check_doc_id;

const MULTIPART_MIXED: &str = "multipart/mixed";
const MULTIPART_RELATED: &str = "multipart/related";

#[derive(Debug, Clone, Default)]
pub struct HeadDocumentOptions {
    pub db: String,
    pub doc_id: String,
    pub if_none_match: Option<String>,
    pub latest: Option<bool>,
    pub rev: Option<String>,
    pub headers: HashMap<String, String>,
}

impl HeadDocumentOptions {
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
pub struct PostDocumentOptions {
    pub db: String,
    pub document: Body<Document>,
    /// `ok` to acknowledge before the write is committed
    pub batch: Option<String>,
    pub headers: HashMap<String, String>,
}

impl PostDocumentOptions {
    #[must_use]
    pub fn new(db: impl Into<String>, document: impl Into<Body<Document>>) -> Self {
        Self {
            db: db.into(),
            document: document.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PostAllDocsOptions {
    pub db: String,
    pub query: AllDocsQuery,
    pub headers: HashMap<String, String>,
}

impl PostAllDocsOptions {
    #[must_use]
    pub fn new(db: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PostAllDocsQueriesOptions {
    pub db: String,
    pub queries: Vec<AllDocsQuery>,
    pub headers: HashMap<String, String>,
}

impl PostAllDocsQueriesOptions {
    #[must_use]
    pub fn new(db: impl Into<String>, queries: Vec<AllDocsQuery>) -> Self {
        Self {
            db: db.into(),
            queries,
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PostBulkDocsOptions {
    pub db: String,
    /// Documents to write, or a pre-serialized `_bulk_docs` JSON body
    pub bulk_docs: Body<BulkDocs>,
    pub headers: HashMap<String, String>,
}

impl PostBulkDocsOptions {
    #[must_use]
    pub fn new(db: impl Into<String>, bulk_docs: impl Into<Body<BulkDocs>>) -> Self {
        Self {
            db: db.into(),
            bulk_docs: bulk_docs.into(),
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PostBulkGetOptions {
    pub db: String,
    pub docs: Vec<BulkGetQueryDocument>,
    pub attachments: Option<bool>,
    pub att_encoding_info: Option<bool>,
    pub latest: Option<bool>,
    pub revs: Option<bool>,
    pub headers: HashMap<String, String>,
}

impl PostBulkGetOptions {
    #[must_use]
    pub fn new(db: impl Into<String>, docs: Vec<BulkGetQueryDocument>) -> Self {
        Self {
            db: db.into(),
            docs,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeleteDocumentOptions {
    pub db: String,
    pub doc_id: String,
    pub if_match: Option<String>,
    pub batch: Option<String>,
    pub rev: Option<String>,
    pub headers: HashMap<String, String>,
}

impl DeleteDocumentOptions {
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
pub struct GetDocumentOptions {
    pub db: String,
    pub doc_id: String,
    pub if_none_match: Option<String>,
    pub attachments: Option<bool>,
    pub att_encoding_info: Option<bool>,
    /// Only attachments changed after these revisions are included
    pub atts_since: Option<Vec<String>>,
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

impl GetDocumentOptions {
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
pub struct PutDocumentOptions {
    pub db: String,
    pub doc_id: String,
    pub document: Body<Document>,
    pub if_match: Option<String>,
    pub batch: Option<String>,
    /// `false` writes the document with its revision as-is
    pub new_edits: Option<bool>,
    pub rev: Option<String>,
    pub headers: HashMap<String, String>,
}

impl PutDocumentOptions {
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

#[derive(Serialize)]
struct AllDocsQueriesBody<'a> {
    queries: &'a [AllDocsQuery],
}

#[derive(Serialize)]
struct BulkGetBody<'a> {
    docs: &'a [BulkGetQueryDocument],
}

impl CloudantV1 {
    /// Check that a document exists and read its current revision from `ETag`
    pub async fn head_document(
        &self,
        options: &HeadDocumentOptions,
    ) -> Result<DetailedResponse<()>, SdkError> {
        check_doc_id(&options.doc_id)?;
        let request = request(Method::HEAD, "/{db}/{doc_id}", "headDocument")
            .path_param("db", options.db.as_str())
            .path_param("doc_id", options.doc_id.as_str())
            .header_opt("If-None-Match", options.if_none_match.as_deref())
            .query_opt("latest", options.latest)
            .query_opt("rev", options.rev.as_deref())
            .custom_headers(&options.headers);
        self.service.send_head(request).await
    }

    /// Create a document with a server-generated or body-supplied `_id`
    pub async fn post_document(
        &self,
        options: &PostDocumentOptions,
    ) -> Result<DetailedResponse<DocumentResult>, SdkError> {
        let request = request(Method::POST, "/{db}", "postDocument")
            .path_param("db", options.db.as_str())
            .accept_json()
            .query_opt("batch", options.batch.as_deref());
        let request = with_body(request, &options.document).custom_headers(&options.headers);
        self.service.send_json(request).await
    }

    /// Query all documents of a database (`POST /{db}/_all_docs`)
    pub async fn post_all_docs(
        &self,
        options: &PostAllDocsOptions,
    ) -> Result<DetailedResponse<AllDocsResult>, SdkError> {
        self.service.send_json(all_docs_request(options)).await
    }

    /// Like [`Self::post_all_docs`], returning the unparsed JSON body
    pub async fn post_all_docs_as_stream(
        &self,
        options: &PostAllDocsOptions,
    ) -> Result<DetailedResponse<ByteStream>, SdkError> {
        self.service.send_stream(all_docs_request(options)).await
    }

    /// Run several `_all_docs` queries in one request
    pub async fn post_all_docs_queries(
        &self,
        options: &PostAllDocsQueriesOptions,
    ) -> Result<DetailedResponse<AllDocsQueriesResult>, SdkError> {
        self.service.send_json(all_docs_queries_request(options)).await
    }

    /// Like [`Self::post_all_docs_queries`], returning the unparsed JSON body
    pub async fn post_all_docs_queries_as_stream(
        &self,
        options: &PostAllDocsQueriesOptions,
    ) -> Result<DetailedResponse<ByteStream>, SdkError> {
        self.service.send_stream(all_docs_queries_request(options)).await
    }

    /// Create, update or delete many documents at once.
    ///
    /// Per-document failures are reported in the result, not as an error.
    pub async fn post_bulk_docs(
        &self,
        options: &PostBulkDocsOptions,
    ) -> Result<DetailedResponse<Vec<DocumentResult>>, SdkError> {
        let request = request(Method::POST, "/{db}/_bulk_docs", "postBulkDocs")
            .path_param("db", options.db.as_str())
            .accept_json();
        let request = with_body(request, &options.bulk_docs).custom_headers(&options.headers);
        self.service.send_json(request).await
    }

    /// Fetch several documents, possibly at specific revisions
    pub async fn post_bulk_get(
        &self,
        options: &PostBulkGetOptions,
    ) -> Result<DetailedResponse<BulkGetResult>, SdkError> {
        let request = bulk_get_request(options, "application/json");
        self.service.send_json(request).await
    }

    /// Like [`Self::post_bulk_get`], returning the `multipart/mixed` body unparsed
    pub async fn post_bulk_get_as_mixed(
        &self,
        options: &PostBulkGetOptions,
    ) -> Result<DetailedResponse<ByteStream>, SdkError> {
        let request = bulk_get_request(options, MULTIPART_MIXED);
        self.service.send_stream(request).await
    }

    /// Like [`Self::post_bulk_get`], returning the `multipart/related` body unparsed
    pub async fn post_bulk_get_as_related(
        &self,
        options: &PostBulkGetOptions,
    ) -> Result<DetailedResponse<ByteStream>, SdkError> {
        let request = bulk_get_request(options, MULTIPART_RELATED);
        self.service.send_stream(request).await
    }

    /// Like [`Self::post_bulk_get`], returning the unparsed JSON body
    pub async fn post_bulk_get_as_stream(
        &self,
        options: &PostBulkGetOptions,
    ) -> Result<DetailedResponse<ByteStream>, SdkError> {
        let request = bulk_get_request(options, "application/json");
        self.service.send_stream(request).await
    }

    /// Mark a document deleted
    pub async fn delete_document(
        &self,
        options: &DeleteDocumentOptions,
    ) -> Result<DetailedResponse<DocumentResult>, SdkError> {
        check_doc_id(&options.doc_id)?;
        let request = request(Method::DELETE, "/{db}/{doc_id}", "deleteDocument")
            .path_param("db", options.db.as_str())
            .path_param("doc_id", options.doc_id.as_str())
            .accept_json()
            .header_opt("If-Match", options.if_match.as_deref())
            .query_opt("batch", options.batch.as_deref())
            .query_opt("rev", options.rev.as_deref())
            .custom_headers(&options.headers);
        self.service.send_json(request).await
    }

    /// Read a document (`GET /{db}/{doc_id}`)
    pub async fn get_document(
        &self,
        options: &GetDocumentOptions,
    ) -> Result<DetailedResponse<Document>, SdkError> {
        check_doc_id(&options.doc_id)?;
        let request = get_document_request(options, "application/json");
        self.service.send_json(request).await
    }

    /// Like [`Self::get_document`], returning the `multipart/mixed` body unparsed
    pub async fn get_document_as_mixed(
        &self,
        options: &GetDocumentOptions,
    ) -> Result<DetailedResponse<ByteStream>, SdkError> {
        check_doc_id(&options.doc_id)?;
        let request = get_document_request(options, MULTIPART_MIXED);
        self.service.send_stream(request).await
    }

    /// Like [`Self::get_document`], returning the `multipart/related` body unparsed
    pub async fn get_document_as_related(
        &self,
        options: &GetDocumentOptions,
    ) -> Result<DetailedResponse<ByteStream>, SdkError> {
        check_doc_id(&options.doc_id)?;
        let request = get_document_request(options, MULTIPART_RELATED);
        self.service.send_stream(request).await
    }

    /// Like [`Self::get_document`], returning the unparsed JSON body
    pub async fn get_document_as_stream(
        &self,
        options: &GetDocumentOptions,
    ) -> Result<DetailedResponse<ByteStream>, SdkError> {
        check_doc_id(&options.doc_id)?;
        let request = get_document_request(options, "application/json");
        self.service.send_stream(request).await
    }

    /// Create or update a document at a known ID
    pub async fn put_document(
        &self,
        options: &PutDocumentOptions,
    ) -> Result<DetailedResponse<DocumentResult>, SdkError> {
        check_doc_id(&options.doc_id)?;
        let request = request(Method::PUT, "/{db}/{doc_id}", "putDocument")
            .path_param("db", options.db.as_str())
            .path_param("doc_id", options.doc_id.as_str())
            .accept_json()
            .header_opt("If-Match", options.if_match.as_deref())
            .query_opt("batch", options.batch.as_deref())
            .query_opt("new_edits", options.new_edits)
            .query_opt("rev", options.rev.as_deref());
        let request = with_body(request, &options.document).custom_headers(&options.headers);
        self.service.send_json(request).await
    }
}

fn all_docs_request(options: &PostAllDocsOptions) -> ServiceRequest {
    request(Method::POST, "/{db}/_all_docs", "postAllDocs")
        .path_param("db", options.db.as_str())
        .accept_json()
        .json_body(&options.query)
        .custom_headers(&options.headers)
}

fn all_docs_queries_request(options: &PostAllDocsQueriesOptions) -> ServiceRequest {
    request(Method::POST, "/{db}/_all_docs/queries", "postAllDocsQueries")
        .path_param("db", options.db.as_str())
        .accept_json()
        .json_body(&AllDocsQueriesBody {
            queries: &options.queries,
        })
        .custom_headers(&options.headers)
}

fn bulk_get_request(options: &PostBulkGetOptions, accept: &str) -> ServiceRequest {
    request(Method::POST, "/{db}/_bulk_get", "postBulkGet")
        .path_param("db", options.db.as_str())
        .accept(accept)
        .query_opt("attachments", options.attachments)
        .query_opt("att_encoding_info", options.att_encoding_info)
        .query_opt("latest", options.latest)
        .query_opt("revs", options.revs)
        .json_body(&BulkGetBody {
            docs: &options.docs,
        })
        .custom_headers(&options.headers)
}

fn get_document_request(options: &GetDocumentOptions, accept: &str) -> ServiceRequest {
    request(Method::GET, "/{db}/{doc_id}", "getDocument")
        .path_param("db", options.db.as_str())
        .path_param("doc_id", options.doc_id.as_str())
        .accept(accept)
        .header_opt("If-None-Match", options.if_none_match.as_deref())
        .query_opt("attachments", options.attachments)
        .query_opt("att_encoding_info", options.att_encoding_info)
        .query_json_opt("atts_since", options.atts_since.as_ref())
        .query_opt("conflicts", options.conflicts)
        .query_opt("deleted_conflicts", options.deleted_conflicts)
        .query_opt("latest", options.latest)
        .query_opt("local_seq", options.local_seq)
        .query_opt("meta", options.meta)
        .query_opt("rev", options.rev.as_deref())
        .query_opt("revs", options.revs)
        .query_opt("revs_info", options.revs_info)
        .custom_headers(&options.headers)
}
