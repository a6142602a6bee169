use std::collections::BTreeMap;

use cloudant_core::open::{self, OpenModel};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Attachment, DocumentRevisionStatus, Revisions, UserContext};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicationDatabaseAuthBasic {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicationDatabaseAuthIam {
    pub api_key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicationDatabaseAuth {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basic: Option<ReplicationDatabaseAuthBasic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iam: Option<ReplicationDatabaseAuthIam>,
}

/// Source or target of a replication
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicationDatabase {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<ReplicationDatabaseAuth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    pub url: String,
}

impl ReplicationDatabase {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

/// Parameters for a target database created by the replicator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicationCreateTargetParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partitioned: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<u32>,
}

/// A document in the `_replicator` database
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplicationDocument {
    #[serde(rename = "_attachments", skip_serializing_if = "Option::is_none")]
    pub attachments: Option<BTreeMap<String, Attachment>>,
    #[serde(rename = "_conflicts", skip_serializing_if = "Option::is_none")]
    pub conflicts: Option<Vec<String>>,
    #[serde(rename = "_deleted", skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
    #[serde(rename = "_deleted_conflicts", skip_serializing_if = "Option::is_none")]
    pub deleted_conflicts: Option<Vec<String>>,
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "_local_seq", skip_serializing_if = "Option::is_none")]
    pub local_seq: Option<String>,
    #[serde(rename = "_rev", skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    #[serde(rename = "_revisions", skip_serializing_if = "Option::is_none")]
    pub revisions: Option<Revisions>,
    #[serde(rename = "_revs_info", skip_serializing_if = "Option::is_none")]
    pub revs_info: Option<Vec<DocumentRevisionStatus>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkpoint_interval: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_timeout: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continuous: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_target: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_target_params: Option<ReplicationCreateTargetParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_connections: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_params: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retries_per_request: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since_seq: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub socket_options: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<ReplicationDatabase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_proxy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<ReplicationDatabase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_proxy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_bulk_get: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_checkpoints: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_ctx: Option<UserContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winning_revs_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker_batch_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker_processes: Option<u64>,
    #[serde(flatten, serialize_with = "open::serialize_unknown::<ReplicationDocument, _>")]
    properties: Map<String, Value>,
}

impl ReplicationDocument {
    /// Replication from `source` to `target`
    #[must_use]
    pub fn new(source: ReplicationDatabase, target: ReplicationDatabase) -> Self {
        Self {
            source: Some(source),
            target: Some(target),
            ..Self::default()
        }
    }
}

impl OpenModel for ReplicationDocument {
    const FIELD_NAMES: &'static [&'static str] = &[
        "_attachments",
        "_conflicts",
        "_deleted",
        "_deleted_conflicts",
        "_id",
        "_local_seq",
        "_rev",
        "_revisions",
        "_revs_info",
        "cancel",
        "checkpoint_interval",
        "connection_timeout",
        "continuous",
        "create_target",
        "create_target_params",
        "doc_ids",
        "filter",
        "http_connections",
        "owner",
        "query_params",
        "retries_per_request",
        "selector",
        "since_seq",
        "socket_options",
        "source",
        "source_proxy",
        "target",
        "target_proxy",
        "use_bulk_get",
        "use_checkpoints",
        "user_ctx",
        "winning_revs_only",
        "worker_batch_size",
        "worker_processes",
    ];

    fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    fn properties_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.properties
    }
}

/// Replication progress counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changes_pending: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkpointed_source_seq: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_write_failures: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs_read: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs_written: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_revisions_found: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revisions_checked: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_seq: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub through_seq: Option<String>,
}

/// Scheduler view of a `_replicator` document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerDocument {
    pub database: String,
    pub doc_id: String,
    pub error_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<SchedulerInfo>,
    pub last_updated: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_proxy: Option<String>,
    pub start_time: String,
    /// `initializing`, `running`, `completed`, `pending`, `crashing`, `error` or `failed`
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_proxy: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerDocsResult {
    pub total_rows: u64,
    pub docs: Vec<SchedulerDocument>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerJobEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub timestamp: String,
    #[serde(rename = "type")]
    pub type_: String,
}

/// A running replication job
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerJob {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_id: Option<String>,
    pub history: Vec<SchedulerJobEvent>,
    pub id: String,
    pub info: SchedulerInfo,
    pub node: String,
    pub pid: String,
    pub source: String,
    pub start_time: String,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerJobsResult {
    pub total_rows: u64,
    pub jobs: Vec<SchedulerJob>,
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn replication_document_round_trip() {
        let mut doc = ReplicationDocument::new(
            ReplicationDatabase {
                auth: Some(ReplicationDatabaseAuth {
                    iam: Some(ReplicationDatabaseAuthIam {
                        api_key: "key".into(),
                    }),
                    basic: None,
                }),
                ..ReplicationDatabase::new("https://source.example.com/db")
            },
            ReplicationDatabase::new("https://target.example.com/db"),
        );
        doc.id = Some("repl-1".into());
        doc.create_target = Some(true);
        doc.set_property("note", "nightly");

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            value,
            json!({
                "_id": "repl-1",
                "create_target": true,
                "source": {"auth": {"iam": {"api_key": "key"}}, "url": "https://source.example.com/db"},
                "target": {"url": "https://target.example.com/db"},
                "note": "nightly"
            })
        );

        let back: ReplicationDocument = serde_json::from_value(value).unwrap();
        assert_eq!(back, doc);
    }
}
