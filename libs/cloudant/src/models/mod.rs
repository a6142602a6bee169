//! Request and response bodies of the Cloudant API.
//!
//! JSON member names match the API exactly. Optional members are skipped
//! when unset. [`Document`], [`DesignDocument`], [`ReplicationDocument`] and
//! [`IndexField`] are open models: members they do not declare are kept and
//! reachable through [`cloudant_core::open::OpenModel`].

mod database;
mod design;
mod document;
mod query;
mod replication;
mod search;
mod security;
mod server;

pub use database::{
    Change, ChangesResult, ChangesResultItem, ContentInformationSizes, DatabaseInformation,
    DatabaseInformationCluster, DatabaseInformationProps, DbEvent, DbUpdates, DbsInfoResult,
    DocumentShardInfo, OkResult, PartitionInformation, PartitionInformationIndexes,
    PartitionInformationIndexesIndexes, PartitionInformationSizes,
    PartitionedIndexesDetailedInformation, PartitionedIndexesInformation, ShardsInformation,
};
pub use design::{
    Analyzer, AnalyzerConfiguration, DesignDocument, DesignDocumentInformation,
    DesignDocumentOptions, DesignDocumentViewIndex, DesignDocumentViewsMapReduce,
    GeoIndexDefinition, SearchIndexDefinition, UpdatesPending,
};
pub use document::{
    AllDocsQueriesResult, AllDocsQuery, AllDocsResult, Attachment, BulkDocs, BulkGetQueryDocument,
    BulkGetResult, BulkGetResultDocument, BulkGetResultItem, DocsResultRow, DocsResultRowValue,
    Document, DocumentResult, DocumentRevisionStatus, Revisions, RevsDiff,
};
pub use query::{
    ExecutionStats, ExplainResult, ExplainResultMrArgs, ExplainResultOpts, FindResult,
    IndexCandidate, IndexCandidateAnalysis, IndexCandidateReason, IndexDefinition, IndexField,
    IndexInformation, IndexResult, IndexTextOperatorDefaultField, IndexesInformation,
    ViewQueriesResult, ViewQuery, ViewResult, ViewResultRow,
};
pub use replication::{
    ReplicationCreateTargetParameters, ReplicationDatabase, ReplicationDatabaseAuth,
    ReplicationDatabaseAuthBasic, ReplicationDatabaseAuthIam, ReplicationDocument, SchedulerDocsResult,
    SchedulerDocument, SchedulerInfo, SchedulerJob, SchedulerJobEvent, SchedulerJobsResult,
};
pub use search::{
    FacetCounts, GeoIndexInformation, GeoIndexStats, GeoJsonFeature, GeoJsonGeometryObject,
    GeoResult, GeoResultRow, SearchAnalyzeResult, SearchIndexInfo, SearchInfoResult, SearchResult,
    SearchResultProperties, SearchResultRow,
};
pub use security::{ApiKeysResult, CorsInformation, Security, SecurityObject};
pub use server::{
    ActiveTask, ActivityTrackerEvents, CapacityThroughputInformation,
    CapacityThroughputInformationCurrent, CapacityThroughputInformationTarget,
    CurrentThroughputInformation, CurrentThroughputInformationThroughput, MembershipInformation,
    ServerInformation, ServerVendor, SessionAuthenticationInformation, SessionInformation,
    ThroughputInformation, UpInformation, UserContext, UuidsResult,
};

/// Base64 text on the wire, bytes in memory
mod base64_bytes {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(value: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(bytes) => serializer.serialize_str(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|text| STANDARD.decode(text).map_err(D::Error::custom))
            .transpose()
    }
}
