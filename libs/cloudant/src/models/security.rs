use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Names and roles of admins or members
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityObject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub names: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
}

/// Security document of a database
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Security {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admins: Option<SecurityObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<SecurityObject>,
    /// Cloudant permissions by user or API key (`_reader`, `_writer`, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloudant: Option<BTreeMap<String, Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub couchdb_auth_only: Option<bool>,
}

/// Generated legacy API key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiKeysResult {
    pub ok: bool,
    pub key: String,
    pub password: String,
}

/// CORS settings of the account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsInformation {
    pub allow_credentials: bool,
    pub enable_cors: bool,
    pub origins: Vec<String>,
}
