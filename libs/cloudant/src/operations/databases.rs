use std::collections::HashMap;

use cloudant_core::{DetailedResponse, SdkError};
use http::Method;
use serde::Serialize;

use crate::CloudantV1;
use crate::common::request;
use crate::models::{DatabaseInformation, DbsInfoResult, OkResult};

#[derive(Debug, Clone, Default)]
pub struct HeadDatabaseOptions {
    pub db: String,
    pub headers: HashMap<String, String>,
}

impl HeadDatabaseOptions {
    #[must_use]
    pub fn new(db: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetAllDbsOptions {
    pub descending: Option<bool>,
    pub end_key: Option<String>,
    pub limit: Option<u64>,
    pub skip: Option<u64>,
    pub start_key: Option<String>,
    pub headers: HashMap<String, String>,
}

#[derive(Debug, Clone, Default)]
pub struct PostDbsInfoOptions {
    /// Database names
    pub keys: Vec<String>,
    pub headers: HashMap<String, String>,
}

impl PostDbsInfoOptions {
    #[must_use]
    pub fn new(keys: Vec<String>) -> Self {
        Self {
            keys,
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeleteDatabaseOptions {
    pub db: String,
    pub headers: HashMap<String, String>,
}

impl DeleteDatabaseOptions {
    #[must_use]
    pub fn new(db: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetDatabaseInformationOptions {
    pub db: String,
    pub headers: HashMap<String, String>,
}

impl GetDatabaseInformationOptions {
    #[must_use]
    pub fn new(db: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PutDatabaseOptions {
    pub db: String,
    pub partitioned: Option<bool>,
    /// Number of shards
    pub q: Option<u32>,
    pub headers: HashMap<String, String>,
}

impl PutDatabaseOptions {
    #[must_use]
    pub fn new(db: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            ..Self::default()
        }
    }
}

#[derive(Serialize)]
struct DbsInfoBody<'a> {
    keys: &'a [String],
}

impl CloudantV1 {
    /// Check that a database exists (`HEAD /{db}`)
    pub async fn head_database(
        &self,
        options: &HeadDatabaseOptions,
    ) -> Result<DetailedResponse<()>, SdkError> {
        let request = request(Method::HEAD, "/{db}", "headDatabase")
            .path_param("db", options.db.as_str())
            .custom_headers(&options.headers);
        self.service.send_head(request).await
    }

    /// Names of all databases (`GET /_all_dbs`)
    pub async fn get_all_dbs(
        &self,
        options: &GetAllDbsOptions,
    ) -> Result<DetailedResponse<Vec<String>>, SdkError> {
        let request = request(Method::GET, "/_all_dbs", "getAllDbs")
            .accept_json()
            .query_opt("descending", options.descending)
            .query_json_opt("end_key", options.end_key.as_ref())
            .query_opt("limit", options.limit)
            .query_opt("skip", options.skip)
            .query_json_opt("start_key", options.start_key.as_ref())
            .custom_headers(&options.headers);
        self.service.send_json(request).await
    }

    /// Information about several databases at once (`POST /_dbs_info`)
    pub async fn post_dbs_info(
        &self,
        options: &PostDbsInfoOptions,
    ) -> Result<DetailedResponse<Vec<DbsInfoResult>>, SdkError> {
        let request = request(Method::POST, "/_dbs_info", "postDbsInfo")
            .accept_json()
            .json_body(&DbsInfoBody { keys: &options.keys })
            .custom_headers(&options.headers);
        self.service.send_json(request).await
    }

    /// Delete a database (`DELETE /{db}`)
    pub async fn delete_database(
        &self,
        options: &DeleteDatabaseOptions,
    ) -> Result<DetailedResponse<OkResult>, SdkError> {
        let request = request(Method::DELETE, "/{db}", "deleteDatabase")
            .path_param("db", options.db.as_str())
            .accept_json()
            .custom_headers(&options.headers);
        self.service.send_json(request).await
    }

    /// Database metadata (`GET /{db}`)
    pub async fn get_database_information(
        &self,
        options: &GetDatabaseInformationOptions,
    ) -> Result<DetailedResponse<DatabaseInformation>, SdkError> {
        let request = request(Method::GET, "/{db}", "getDatabaseInformation")
            .path_param("db", options.db.as_str())
            .accept_json()
            .custom_headers(&options.headers);
        self.service.send_json(request).await
    }

    /// Create a database (`PUT /{db}`)
    pub async fn put_database(
        &self,
        options: &PutDatabaseOptions,
    ) -> Result<DetailedResponse<OkResult>, SdkError> {
        let request = request(Method::PUT, "/{db}", "putDatabase")
            .path_param("db", options.db.as_str())
            .accept_json()
            .query_opt("partitioned", options.partitioned)
            .query_opt("q", options.q)
            .custom_headers(&options.headers);
        self.service.send_json(request).await
    }
}
