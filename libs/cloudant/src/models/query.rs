use cloudant_core::open::{self, OpenModel};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Analyzer, Document};

/// Query body of `_view` requests
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub att_encoding_info: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflicts: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descending: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_docs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inclusive_end: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_seq: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_key: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_key_doc_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_level: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduce: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_key: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_key_doc_id: Option<String>,
    /// `true`, `false` or `lazy`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewResultRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caused_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub ref_: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<Document>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub key: Value,
    pub value: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_rows: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_seq: Option<String>,
    pub rows: Vec<ViewResultRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewQueriesResult {
    pub results: Vec<ViewResult>,
}

/// Execution statistics of a `_find` request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionStats {
    pub execution_time_ms: f64,
    pub results_returned: u64,
    pub total_docs_examined: u64,
    pub total_keys_examined: u64,
    pub total_quorum_docs_examined: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FindResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookmark: Option<String>,
    pub docs: Vec<Document>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_stats: Option<ExecutionStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Field of a Mango index: `{"name": "asc"}` for JSON indexes,
/// `{"name": ..., "type": ...}` for text indexes.
///
/// The sort direction form is held as an additional property keyed by the
/// field path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexField {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `boolean`, `number` or `string`
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    #[serde(flatten, serialize_with = "open::serialize_unknown::<IndexField, _>")]
    properties: Map<String, Value>,
}

impl IndexField {
    /// JSON index field sorted in `direction` (`asc` or `desc`)
    #[must_use]
    pub fn sorted(field: impl Into<String>, direction: &str) -> Self {
        let mut index_field = Self::default();
        index_field.set_property(field, direction);
        index_field
    }

    /// Text index field with an explicit type
    #[must_use]
    pub fn typed(name: impl Into<String>, type_: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            type_: Some(type_.into()),
            properties: Map::new(),
        }
    }
}

impl OpenModel for IndexField {
    const FIELD_NAMES: &'static [&'static str] = &["name", "type"];

    fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    fn properties_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.properties
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexTextOperatorDefaultField {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analyzer: Option<Analyzer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// Definition of a Mango index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexDefinition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_analyzer: Option<Analyzer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_field: Option<IndexTextOperatorDefaultField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<IndexField>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_array_lengths: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partial_filter_selector: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexInformation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ddoc: Option<String>,
    pub def: IndexDefinition,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partitioned: Option<bool>,
    /// `json`, `special` or `text`
    #[serde(rename = "type")]
    pub type_: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexesInformation {
    pub total_rows: u64,
    pub indexes: Vec<IndexInformation>,
}

/// Outcome of index creation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexResult {
    pub id: String,
    pub name: String,
    /// `created` or `exists`
    pub result: String,
}

/// Arguments passed to the underlying view of a JSON index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplainResultMrArgs {
    #[serde(skip_serializing_if = "Value::is_null")]
    pub conflicts: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub end_key: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_docs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduce: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stable: Option<bool>,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub start_key: Value,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub update: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_type: Option<String>,
}

/// Options the query was planned with
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplainResultOpts {
    pub bookmark: String,
    pub conflicts: bool,
    pub execution_stats: bool,
    pub fields: Value,
    pub limit: u64,
    pub partition: String,
    pub r: u64,
    pub skip: u64,
    pub sort: Value,
    pub stable: bool,
    pub stale: bool,
    pub update: bool,
    pub use_index: Vec<String>,
}

/// Why an index was or was not chosen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexCandidateReason {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexCandidateAnalysis {
    pub covering: Option<bool>,
    pub ranking: u64,
    pub reasons: Vec<IndexCandidateReason>,
    pub usable: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexCandidate {
    pub analysis: IndexCandidateAnalysis,
    pub index: IndexInformation,
}

/// Query plan of `_explain`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplainResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub covering: Option<bool>,
    pub dbname: String,
    pub fields: Vec<String>,
    pub index: IndexInformation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_candidates: Option<Vec<IndexCandidate>>,
    pub limit: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mrargs: Option<ExplainResultMrArgs>,
    pub opts: ExplainResultOpts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partitioned: Option<Value>,
    pub selector: Map<String, Value>,
    pub skip: u64,
}
