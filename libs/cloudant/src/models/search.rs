use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Document;

/// Tokens produced by an analyzer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchAnalyzeResult {
    pub tokens: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResultRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<Document>,
    pub fields: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlights: Option<BTreeMap<String, Vec<String>>>,
    pub id: String,
}

/// Facet counts keyed by field, then by value
pub type FacetCounts = BTreeMap<String, BTreeMap<String, u64>>;

/// One group of a grouped search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResultProperties {
    pub total_rows: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookmark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counts: Option<FacetCounts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranges: Option<FacetCounts>,
    pub rows: Vec<SearchResultRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    pub total_rows: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookmark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counts: Option<FacetCounts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranges: Option<FacetCounts>,
    pub rows: Vec<SearchResultRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<SearchResultProperties>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchIndexInfo {
    pub committed_seq: u64,
    pub disk_size: u64,
    pub doc_count: u64,
    pub doc_del_count: u64,
    pub pending_seq: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchInfoResult {
    pub name: String,
    pub search_index: SearchIndexInfo,
}

/// GeoJSON geometry; `geometries` is used by `GeometryCollection`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoJsonGeometryObject {
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometries: Option<Vec<GeoJsonGeometryObject>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoJsonFeature {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "_rev", skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Vec<f64>>,
    pub geometry: GeoJsonGeometryObject,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Map<String, Value>>,
    #[serde(rename = "type")]
    pub type_: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoResultRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<Document>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<GeoJsonGeometryObject>,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
}

/// Result of a `_geo` query; `features` is filled for `format=geojson`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoResult {
    pub bookmark: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<GeoJsonFeature>>,
    pub rows: Vec<GeoResultRow>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoIndexStats {
    pub data_size: u64,
    pub disk_size: u64,
    pub doc_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoIndexInformation {
    pub geo_index: GeoIndexStats,
    pub name: String,
}
