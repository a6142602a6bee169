use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerVendor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Welcome message of `GET /`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerInformation {
    pub couchdb: String,
    pub features: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub features_flags: Vec<String>,
    pub vendor: ServerVendor,
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UuidsResult {
    pub uuids: Vec<String>,
}

/// Provisioned throughput in blocks and operations per second
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThroughputInformation {
    pub blocks: u64,
    pub query: u64,
    pub read: u64,
    pub write: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapacityThroughputInformationCurrent {
    pub throughput: ThroughputInformation,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapacityThroughputInformationTarget {
    pub throughput: ThroughputInformation,
}

/// Current and target provisioned throughput capacity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapacityThroughputInformation {
    pub current: CapacityThroughputInformationCurrent,
    pub target: CapacityThroughputInformationTarget,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentThroughputInformationThroughput {
    pub query: u64,
    pub read: u64,
    pub write: u64,
}

/// Operations consumed in the current second
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentThroughputInformation {
    pub throughput: CurrentThroughputInformationThroughput,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MembershipInformation {
    pub all_nodes: Vec<String>,
    pub cluster_nodes: Vec<String>,
}

/// Health of the node (`/_up`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpInformation {
    pub seeds: Value,
    /// `maintenance_mode`, `nolb` or `ok`
    pub status: String,
}

/// Event types routed to IBM Cloud Activity Tracker
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityTrackerEvents {
    /// `management` and optionally `data`
    pub types: Vec<String>,
}

/// A task reported by `_active_tasks`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActiveTask {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changes_done: Option<u64>,
    pub database: String,
    pub node: String,
    pub pid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<u64>,
    pub started_on: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_changes: Option<u64>,
    /// `database_compaction`, `indexer`, `replication`, `search_indexer`, ...
    #[serde(rename = "type")]
    pub type_: String,
    pub updated_on: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub design_document: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexer_pid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replication_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continuous: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs_read: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs_written: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_write_failures: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

/// Identity a request runs as
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionAuthenticationInformation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authenticated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication_db: Option<String>,
    pub authentication_handlers: Vec<String>,
}

/// Result of `GET /_session`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionInformation {
    pub ok: bool,
    pub info: SessionAuthenticationInformation,
    #[serde(rename = "userCtx")]
    pub user_ctx: UserContext,
}
