use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Document;

/// Acknowledgement returned by write operations that produce no resource
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OkResult {
    pub ok: bool,
}

/// Data sizes in bytes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentInformationSizes {
    pub active: u64,
    pub external: u64,
    pub file: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseInformationCluster {
    pub n: u32,
    pub q: u32,
    pub r: u32,
    pub w: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseInformationProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partitioned: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionedIndexesDetailedInformation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionedIndexesInformation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexes: Option<PartitionedIndexesDetailedInformation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

/// Result of `GET /{db}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseInformation {
    pub cluster: DatabaseInformationCluster,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub committed_update_seq: Option<String>,
    pub compact_running: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compacted_seq: Option<String>,
    pub db_name: String,
    pub disk_format_version: u64,
    pub doc_count: u64,
    pub doc_del_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partitioned_indexes: Option<PartitionedIndexesInformation>,
    pub props: DatabaseInformationProps,
    pub sizes: ContentInformationSizes,
    pub update_seq: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
}

/// One entry of `_dbs_info`; `info` is absent when `error` is set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbsInfoResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<DatabaseInformation>,
    pub key: String,
}

/// A database lifecycle event from `_db_updates`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    pub db_name: String,
    pub seq: String,
    /// `created`, `updated` or `deleted`
    #[serde(rename = "type")]
    pub type_: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbUpdates {
    pub last_seq: String,
    pub results: Vec<DbEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Change {
    pub rev: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangesResultItem {
    pub changes: Vec<Change>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<Document>,
    pub id: String,
    pub seq: String,
}

/// Result of a non-continuous `_changes` request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangesResult {
    pub last_seq: String,
    pub pending: u64,
    pub results: Vec<ChangesResultItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionInformationIndexesIndexes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionInformationIndexes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexes: Option<PartitionInformationIndexesIndexes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionInformationSizes {
    pub active: u64,
    pub external: u64,
}

/// Result of `GET /{db}/_partition/{partition_key}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionInformation {
    pub db_name: String,
    pub doc_count: u64,
    pub doc_del_count: u64,
    pub partition: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partitioned_indexes: Option<PartitionInformationIndexes>,
    pub sizes: PartitionInformationSizes,
}

/// Shard ranges of a database mapped to the nodes holding them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShardsInformation {
    pub shards: BTreeMap<String, Vec<String>>,
}

/// Shard range and nodes holding one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentShardInfo {
    pub nodes: Vec<String>,
    pub range: String,
}
