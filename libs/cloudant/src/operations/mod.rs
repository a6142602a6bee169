//! API operations of [`CloudantV1`](crate::CloudantV1).
//!
//! Every operation takes an options struct by reference. Options carry the
//! operation's path, query and header parameters, its body and a `headers`
//! map of extra headers that override everything else the request sets.
//! Required path parameters are validated before anything is sent: an
//! empty value fails with `SdkError::Validation`.
//!
//! All operations fail with `SdkError::ServiceUrlMissing` when the client
//! has no service URL, `SdkError::Authentication` when credentials cannot
//! be obtained, `SdkError::Http` on transport failures and
//! `SdkError::Service` for non-2xx responses. JSON operations also fail
//! with `SdkError::Decode` when the body does not match the result model.
#![allow(clippy::missing_errors_doc)]

mod attachments;
mod authentication;
mod authorization;
mod changes;
mod cors;
mod databases;
mod design_documents;
mod documents;
mod geospatial;
mod local_documents;
mod monitoring;
mod partitions;
mod queries;
mod replication;
mod revisions;
mod searches;
mod server;
mod views;

use bytes::Bytes;
use cloudant_core::ServiceRequest;
use serde::Serialize;

pub use attachments::{
    DeleteAttachmentOptions, GetAttachmentOptions, HeadAttachmentOptions, PutAttachmentOptions,
};
pub use authentication::GetSessionInformationOptions;
pub use authorization::{
    GetSecurityOptions, PostApiKeysOptions, PutCloudantSecurityConfigurationOptions,
    PutSecurityOptions,
};
pub use changes::{GetDbUpdatesOptions, PostChangesOptions};
pub use cors::{GetCorsInformationOptions, PutCorsConfigurationOptions};
pub use databases::{
    DeleteDatabaseOptions, GetAllDbsOptions, GetDatabaseInformationOptions, HeadDatabaseOptions,
    PostDbsInfoOptions, PutDatabaseOptions,
};
pub use design_documents::{
    DeleteDesignDocumentOptions, GetDesignDocumentInformationOptions, GetDesignDocumentOptions,
    HeadDesignDocumentOptions, PostDesignDocsOptions, PostDesignDocsQueriesOptions,
    PutDesignDocumentOptions,
};
pub use documents::{
    DeleteDocumentOptions, GetDocumentOptions, HeadDocumentOptions, PostAllDocsOptions,
    PostAllDocsQueriesOptions, PostBulkDocsOptions, PostBulkGetOptions, PostDocumentOptions,
    PutDocumentOptions,
};
pub use geospatial::{GetGeoIndexInformationOptions, GetGeoOptions, PostGeoCleanupOptions};
pub use local_documents::{
    DeleteLocalDocumentOptions, GetLocalDocumentOptions, PutLocalDocumentOptions,
};
pub use monitoring::{
    GetActiveTasksOptions, GetActivityTrackerEventsOptions, GetCurrentThroughputInformationOptions,
    GetMembershipInformationOptions, GetUpInformationOptions, HeadUpInformationOptions,
    PostActivityTrackerEventsOptions,
};
pub use partitions::{
    GetPartitionInformationOptions, PostPartitionAllDocsOptions, PostPartitionExplainOptions,
    PostPartitionFindOptions, PostPartitionSearchOptions, PostPartitionViewOptions,
};
pub use queries::{
    DeleteIndexOptions, FindQuery, GetIndexesInformationOptions, PostExplainOptions,
    PostFindOptions, PostIndexOptions,
};
pub use replication::{
    DeleteReplicationDocumentOptions, GetReplicationDocumentOptions, GetSchedulerDocsOptions,
    GetSchedulerDocumentOptions, GetSchedulerJobOptions, GetSchedulerJobsOptions,
    HeadReplicationDocumentOptions, HeadSchedulerDocumentOptions, HeadSchedulerJobOptions,
    PutReplicationDocumentOptions,
};
pub use revisions::{GetDocumentShardsInfoOptions, GetShardsInformationOptions, PostRevsDiffOptions};
pub use searches::{
    GetSearchInfoOptions, PostSearchAnalyzeOptions, PostSearchOptions, SearchQuery,
};
pub use server::{
    GetCapacityThroughputInformationOptions, GetServerInformationOptions, GetUuidsOptions,
    PutCapacityThroughputConfigurationOptions,
};
pub use views::{PostViewOptions, PostViewQueriesOptions};

/// Body of a write: a model serialized as JSON, or bytes sent unchanged
/// (for example a `multipart/related` document with attachments).
#[derive(Debug, Clone, PartialEq)]
pub enum Body<T> {
    Json(T),
    Raw { bytes: Bytes, content_type: String },
}

impl<T> Body<T> {
    /// Raw body with an explicit content type
    pub fn raw(bytes: impl Into<Bytes>, content_type: impl Into<String>) -> Self {
        Self::Raw {
            bytes: bytes.into(),
            content_type: content_type.into(),
        }
    }
}

impl<T: Default> Default for Body<T> {
    fn default() -> Self {
        Self::Json(T::default())
    }
}

impl<T> From<T> for Body<T> {
    fn from(model: T) -> Self {
        Self::Json(model)
    }
}

/// Attach `body` to the request
fn with_body<T: Serialize>(request: ServiceRequest, body: &Body<T>) -> ServiceRequest {
    match body {
        Body::Json(model) => request.json_body(model),
        Body::Raw {
            bytes,
            content_type,
        } => request.raw_body(bytes.clone(), content_type.as_str()),
    }
}

/// `a,b,c` query value
fn comma_separated(values: &[String]) -> String {
    values.join(",")
}
