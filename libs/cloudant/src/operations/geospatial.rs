use std::collections::HashMap;

use cloudant_core::{ByteStream, DetailedResponse, SdkError, ServiceRequest};
use http::Method;

use crate::CloudantV1;
use crate::common::request;
use crate::models::{GeoIndexInformation, GeoResult, OkResult};

/// Geospatial query against a geo index.
///
/// A query selects features with one of `bbox`, `g` (WKT geometry), a
/// `lat`/`lon`/`radius` circle or a `lat`/`lon`/`rangex`/`rangey` ellipse.
#[derive(Debug, Clone, Default)]
pub struct GetGeoOptions {
    pub db: String,
    pub ddoc: String,
    pub index: String,
    /// `minLon,minLat,maxLon,maxLat`
    pub bbox: Option<String>,
    pub bookmark: Option<String>,
    /// `legacy`, `geojson`, `view` or `application/vnd.geo+json`
    pub format: Option<String>,
    pub g: Option<String>,
    pub include_docs: Option<bool>,
    pub lat: Option<f64>,
    pub limit: Option<u64>,
    pub lon: Option<f64>,
    pub nearest: Option<bool>,
    pub radius: Option<f64>,
    pub rangex: Option<f64>,
    pub rangey: Option<f64>,
    /// `contains`, `contains_properly`, `covered_by`, `covers`,
    /// `crosses`, `disjoint`, `intersects` or `overlaps`
    pub relation: Option<String>,
    pub skip: Option<u64>,
    pub stale: Option<String>,
    pub headers: HashMap<String, String>,
}

impl GetGeoOptions {
    #[must_use]
    pub fn new(db: impl Into<String>, ddoc: impl Into<String>, index: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            ddoc: ddoc.into(),
            index: index.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PostGeoCleanupOptions {
    pub db: String,
    pub headers: HashMap<String, String>,
}

impl PostGeoCleanupOptions {
    #[must_use]
    pub fn new(db: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetGeoIndexInformationOptions {
    pub db: String,
    pub ddoc: String,
    pub index: String,
    pub headers: HashMap<String, String>,
}

impl GetGeoIndexInformationOptions {
    #[must_use]
    pub fn new(db: impl Into<String>, ddoc: impl Into<String>, index: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            ddoc: ddoc.into(),
            index: index.into(),
            headers: HashMap::new(),
        }
    }
}

impl CloudantV1 {
    /// Query a geospatial index
    pub async fn get_geo(
        &self,
        options: &GetGeoOptions,
    ) -> Result<DetailedResponse<GeoResult>, SdkError> {
        self.service.send_json(geo_request(options)).await
    }

    /// Like [`Self::get_geo`], returning the unparsed body (for example
    /// GeoJSON when `format` asks for it)
    pub async fn get_geo_as_stream(
        &self,
        options: &GetGeoOptions,
    ) -> Result<DetailedResponse<ByteStream>, SdkError> {
        self.service.send_stream(geo_request(options)).await
    }

    /// Remove geo index files no longer referenced by a design document
    pub async fn post_geo_cleanup(
        &self,
        options: &PostGeoCleanupOptions,
    ) -> Result<DetailedResponse<OkResult>, SdkError> {
        let request = request(Method::POST, "/{db}/_geo_cleanup", "postGeoCleanup")
            .path_param("db", options.db.as_str())
            .accept_json()
            .custom_headers(&options.headers);
        self.service.send_json(request).await
    }

    pub async fn get_geo_index_information(
        &self,
        options: &GetGeoIndexInformationOptions,
    ) -> Result<DetailedResponse<GeoIndexInformation>, SdkError> {
        let request = request(
            Method::GET,
            "/{db}/_design/{ddoc}/_geo_info/{index}",
            "getGeoIndexInformation",
        )
        .path_param("db", options.db.as_str())
        .path_param("ddoc", options.ddoc.as_str())
        .path_param("index", options.index.as_str())
        .accept_json()
        .custom_headers(&options.headers);
        self.service.send_json(request).await
    }
}

fn geo_request(options: &GetGeoOptions) -> ServiceRequest {
    request(Method::GET, "/{db}/_design/{ddoc}/_geo/{index}", "getGeo")
        .path_param("db", options.db.as_str())
        .path_param("ddoc", options.ddoc.as_str())
        .path_param("index", options.index.as_str())
        .accept_json()
        .query_opt("bbox", options.bbox.as_deref())
        .query_opt("bookmark", options.bookmark.as_deref())
        .query_opt("format", options.format.as_deref())
        .query_opt("g", options.g.as_deref())
        .query_opt("include_docs", options.include_docs)
        .query_opt("lat", options.lat)
        .query_opt("limit", options.limit)
        .query_opt("lon", options.lon)
        .query_opt("nearest", options.nearest)
        .query_opt("radius", options.radius)
        .query_opt("rangex", options.rangex)
        .query_opt("rangey", options.rangey)
        .query_opt("relation", options.relation.as_deref())
        .query_opt("skip", options.skip)
        .query_opt("stale", options.stale.as_deref())
        .custom_headers(&options.headers)
}
