use std::collections::HashMap;

use cloudant_core::{ByteStream, DetailedResponse, SdkError, ServiceRequest};
use http::Method;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::CloudantV1;
use crate::common::request;
use crate::models::{ChangesResult, DbUpdates};

#[derive(Debug, Clone, Default)]
pub struct GetDbUpdatesOptions {
    pub descending: Option<bool>,
    /// `normal`, `longpoll`, `continuous` or `eventsource`
    pub feed: Option<String>,
    /// Heartbeat interval in milliseconds
    pub heartbeat: Option<u64>,
    pub limit: Option<u64>,
    /// Timeout in milliseconds
    pub timeout: Option<u64>,
    pub since: Option<String>,
    pub headers: HashMap<String, String>,
}

/// Options for `_changes`.
///
/// `doc_ids`, `fields` and `selector` form the request body and apply to
/// the `_doc_ids` and `_selector` filters.
#[derive(Debug, Clone, Default)]
pub struct PostChangesOptions {
    pub db: String,
    pub doc_ids: Option<Vec<String>>,
    pub fields: Option<Vec<String>>,
    pub selector: Option<Map<String, Value>>,
    pub last_event_id: Option<String>,
    pub att_encoding_info: Option<bool>,
    pub attachments: Option<bool>,
    pub conflicts: Option<bool>,
    pub descending: Option<bool>,
    /// `normal`, `longpoll`, `continuous` or `eventsource`
    pub feed: Option<String>,
    /// `_design`, `_doc_ids`, `_selector`, `_view` or `ddoc/filter`
    pub filter: Option<String>,
    pub heartbeat: Option<u64>,
    pub include_docs: Option<bool>,
    pub limit: Option<u64>,
    pub seq_interval: Option<u64>,
    pub since: Option<String>,
    /// `main_only` or `all_docs`
    pub style: Option<String>,
    pub timeout: Option<u64>,
    pub view: Option<String>,
    pub headers: HashMap<String, String>,
}

impl PostChangesOptions {
    #[must_use]
    pub fn new(db: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            ..Self::default()
        }
    }
}

#[derive(Serialize)]
struct ChangesBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    doc_ids: Option<&'a Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<&'a Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    selector: Option<&'a Map<String, Value>>,
}

impl CloudantV1 {
    /// Database creation, update and deletion events (`GET /_db_updates`)
    pub async fn get_db_updates(
        &self,
        options: &GetDbUpdatesOptions,
    ) -> Result<DetailedResponse<DbUpdates>, SdkError> {
        let request = request(Method::GET, "/_db_updates", "getDbUpdates")
            .accept_json()
            .query_opt("descending", options.descending)
            .query_opt("feed", options.feed.as_deref())
            .query_opt("heartbeat", options.heartbeat)
            .query_opt("limit", options.limit)
            .query_opt("timeout", options.timeout)
            .query_opt("since", options.since.as_deref())
            .custom_headers(&options.headers);
        self.service.send_json(request).await
    }

    /// Changes to documents in a database (`POST /{db}/_changes`)
    pub async fn post_changes(
        &self,
        options: &PostChangesOptions,
    ) -> Result<DetailedResponse<ChangesResult>, SdkError> {
        let request = changes_request(options, "postChanges");
        self.service.send_json(request).await
    }

    /// Like [`Self::post_changes`], returning the unparsed JSON body
    pub async fn post_changes_as_stream(
        &self,
        options: &PostChangesOptions,
    ) -> Result<DetailedResponse<ByteStream>, SdkError> {
        let request = changes_request(options, "postChanges");
        self.service.send_stream(request).await
    }
}

fn changes_request(options: &PostChangesOptions, operation_id: &'static str) -> ServiceRequest {
    request(Method::POST, "/{db}/_changes", operation_id)
        .path_param("db", options.db.as_str())
        .accept_json()
        .header_opt("Last-Event-ID", options.last_event_id.as_deref())
        .query_opt("att_encoding_info", options.att_encoding_info)
        .query_opt("attachments", options.attachments)
        .query_opt("conflicts", options.conflicts)
        .query_opt("descending", options.descending)
        .query_opt("feed", options.feed.as_deref())
        .query_opt("filter", options.filter.as_deref())
        .query_opt("heartbeat", options.heartbeat)
        .query_opt("include_docs", options.include_docs)
        .query_opt("limit", options.limit)
        .query_opt("seq_interval", options.seq_interval)
        .query_opt("since", options.since.as_deref())
        .query_opt("style", options.style.as_deref())
        .query_opt("timeout", options.timeout)
        .query_opt("view", options.view.as_deref())
        .json_body(&ChangesBody {
            doc_ids: options.doc_ids.as_ref(),
            fields: options.fields.as_ref(),
            selector: options.selector.as_ref(),
        })
        .custom_headers(&options.headers)
}
