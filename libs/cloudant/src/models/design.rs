use std::collections::BTreeMap;

use cloudant_core::open::{self, OpenModel};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Attachment, ContentInformationSizes, DocumentRevisionStatus, Revisions};

/// Map/reduce pair of a view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignDocumentViewsMapReduce {
    pub map: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduce: Option<String>,
}

impl DesignDocumentViewsMapReduce {
    #[must_use]
    pub fn new(map: impl Into<String>) -> Self {
        Self {
            map: map.into(),
            reduce: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignDocumentOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partitioned: Option<bool>,
}

/// Lucene analyzer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analyzer {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopwords: Option<Vec<String>>,
}

/// Analyzer with optional per-field analyzers (`perfield`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfiguration {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopwords: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, Analyzer>>,
}

/// Search index function and analyzer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchIndexDefinition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analyzer: Option<AnalyzerConfiguration>,
    pub index: String,
}

/// Geospatial index function
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoIndexDefinition {
    pub index: String,
}

/// A design document: views, search and geo indexes, filters and
/// update validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignDocument {
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
    pub autoupdate: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexes: Option<BTreeMap<String, SearchIndexDefinition>>,
    /// Defaults to `javascript`; `query` for Mango indexes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<DesignDocumentOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub st_indexes: Option<BTreeMap<String, GeoIndexDefinition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validate_doc_update: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views: Option<BTreeMap<String, DesignDocumentViewsMapReduce>>,
    #[serde(flatten, serialize_with = "open::serialize_unknown::<DesignDocument, _>")]
    properties: Map<String, Value>,
}

impl OpenModel for DesignDocument {
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
        "autoupdate",
        "filters",
        "indexes",
        "language",
        "options",
        "st_indexes",
        "validate_doc_update",
        "views",
    ];

    fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    fn properties_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.properties
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdatesPending {
    pub minimum: u64,
    pub preferred: u64,
    pub total: u64,
}

/// View index state of a design document (`_info`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignDocumentViewIndex {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collator_versions: Option<Vec<String>>,
    pub compact_running: bool,
    pub language: String,
    pub signature: String,
    pub sizes: ContentInformationSizes,
    pub updater_running: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updates_pending: Option<UpdatesPending>,
    pub waiting_clients: u64,
    pub waiting_commit: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignDocumentInformation {
    pub name: String,
    pub view_index: DesignDocumentViewIndex,
}
