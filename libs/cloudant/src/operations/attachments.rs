use std::collections::HashMap;

use bytes::Bytes;
use cloudant_core::{ByteStream, DetailedResponse, SdkError};
use http::Method;

use crate::CloudantV1;
use crate::common::request;
use crate::models::DocumentResult;
use crate::validation::{check_attachment_name, check_doc_id};

#[derive(Debug, Clone, Default)]
pub struct HeadAttachmentOptions {
    pub db: String,
    pub doc_id: String,
    pub attachment_name: String,
    pub if_match: Option<String>,
    pub if_none_match: Option<String>,
    pub rev: Option<String>,
    pub headers: HashMap<String, String>,
}

impl HeadAttachmentOptions {
    #[must_use]
    pub fn new(
        db: impl Into<String>,
        doc_id: impl Into<String>,
        attachment_name: impl Into<String>,
    ) -> Self {
        Self {
            db: db.into(),
            doc_id: doc_id.into(),
            attachment_name: attachment_name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeleteAttachmentOptions {
    pub db: String,
    pub doc_id: String,
    pub attachment_name: String,
    pub if_match: Option<String>,
    pub rev: Option<String>,
    pub batch: Option<String>,
    pub headers: HashMap<String, String>,
}

impl DeleteAttachmentOptions {
    #[must_use]
    pub fn new(
        db: impl Into<String>,
        doc_id: impl Into<String>,
        attachment_name: impl Into<String>,
    ) -> Self {
        Self {
            db: db.into(),
            doc_id: doc_id.into(),
            attachment_name: attachment_name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetAttachmentOptions {
    pub db: String,
    pub doc_id: String,
    pub attachment_name: String,
    /// Accept header; `*/*` when unset
    pub accept: Option<String>,
    pub if_match: Option<String>,
    pub if_none_match: Option<String>,
    /// Byte range, e.g. `bytes=0-1023`
    pub range: Option<String>,
    pub rev: Option<String>,
    pub headers: HashMap<String, String>,
}

impl GetAttachmentOptions {
    #[must_use]
    pub fn new(
        db: impl Into<String>,
        doc_id: impl Into<String>,
        attachment_name: impl Into<String>,
    ) -> Self {
        Self {
            db: db.into(),
            doc_id: doc_id.into(),
            attachment_name: attachment_name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PutAttachmentOptions {
    pub db: String,
    pub doc_id: String,
    pub attachment_name: String,
    pub attachment: Bytes,
    pub content_type: String,
    pub if_match: Option<String>,
    pub rev: Option<String>,
    pub headers: HashMap<String, String>,
}

impl PutAttachmentOptions {
    #[must_use]
    pub fn new(
        db: impl Into<String>,
        doc_id: impl Into<String>,
        attachment_name: impl Into<String>,
        attachment: impl Into<Bytes>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            db: db.into(),
            doc_id: doc_id.into(),
            attachment_name: attachment_name.into(),
            attachment: attachment.into(),
            content_type: content_type.into(),
            ..Self::default()
        }
    }
}

impl CloudantV1 {
    pub async fn head_attachment(
        &self,
        options: &HeadAttachmentOptions,
    ) -> Result<DetailedResponse<()>, SdkError> {
        check_doc_id(&options.doc_id)?;
        check_attachment_name(&options.attachment_name)?;
        let request = request(Method::HEAD, "/{db}/{doc_id}/{attachment_name}", "headAttachment")
            .path_param("db", options.db.as_str())
            .path_param("doc_id", options.doc_id.as_str())
            .path_param("attachment_name", options.attachment_name.as_str())
            .header_opt("If-Match", options.if_match.as_deref())
            .header_opt("If-None-Match", options.if_none_match.as_deref())
            .query_opt("rev", options.rev.as_deref())
            .custom_headers(&options.headers);
        self.service.send_head(request).await
    }

    pub async fn delete_attachment(
        &self,
        options: &DeleteAttachmentOptions,
    ) -> Result<DetailedResponse<DocumentResult>, SdkError> {
        check_doc_id(&options.doc_id)?;
        check_attachment_name(&options.attachment_name)?;
        let request = request(
            Method::DELETE,
            "/{db}/{doc_id}/{attachment_name}",
            "deleteAttachment",
        )
        .path_param("db", options.db.as_str())
        .path_param("doc_id", options.doc_id.as_str())
        .path_param("attachment_name", options.attachment_name.as_str())
        .accept_json()
        .header_opt("If-Match", options.if_match.as_deref())
        .query_opt("rev", options.rev.as_deref())
        .query_opt("batch", options.batch.as_deref())
        .custom_headers(&options.headers);
        self.service.send_json(request).await
    }

    /// Download an attachment; the body is streamed unchanged
    pub async fn get_attachment(
        &self,
        options: &GetAttachmentOptions,
    ) -> Result<DetailedResponse<ByteStream>, SdkError> {
        check_doc_id(&options.doc_id)?;
        check_attachment_name(&options.attachment_name)?;
        let request = request(Method::GET, "/{db}/{doc_id}/{attachment_name}", "getAttachment")
            .path_param("db", options.db.as_str())
            .path_param("doc_id", options.doc_id.as_str())
            .path_param("attachment_name", options.attachment_name.as_str())
            .accept(options.accept.as_deref().unwrap_or("*/*"))
            .header_opt("If-Match", options.if_match.as_deref())
            .header_opt("If-None-Match", options.if_none_match.as_deref())
            .header_opt("Range", options.range.as_deref())
            .query_opt("rev", options.rev.as_deref())
            .custom_headers(&options.headers);
        self.service.send_stream(request).await
    }

    /// Upload an attachment, creating the document when it does not exist
    pub async fn put_attachment(
        &self,
        options: &PutAttachmentOptions,
    ) -> Result<DetailedResponse<DocumentResult>, SdkError> {
        check_doc_id(&options.doc_id)?;
        check_attachment_name(&options.attachment_name)?;
        if options.content_type.is_empty() {
            return Err(SdkError::Validation("content_type must not be empty".to_owned()));
        }
        let request = request(Method::PUT, "/{db}/{doc_id}/{attachment_name}", "putAttachment")
            .path_param("db", options.db.as_str())
            .path_param("doc_id", options.doc_id.as_str())
            .path_param("attachment_name", options.attachment_name.as_str())
            .accept_json()
            .header_opt("If-Match", options.if_match.as_deref())
            .query_opt("rev", options.rev.as_deref())
            .raw_body(options.attachment.clone(), options.content_type.as_str())
            .custom_headers(&options.headers);
        self.service.send_json(request).await
    }
}
