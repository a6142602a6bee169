//! External service configuration.
//!
//! Properties for a service named `cloudant` are read from keys prefixed
//! `CLOUDANT_` (upper-cased, `-` replaced by `_`). Sources, first match wins:
//!
//! 1. the credentials file named by `IBM_CREDENTIALS_FILE`
//! 2. `ibm-credentials.env` in the working directory
//! 3. `ibm-credentials.env` in the home directory
//! 4. process environment variables
//!
//! A credentials file only counts as a match when it holds at least one
//! property for the service.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::SdkError;

/// Environment variable naming an explicit credentials file
pub const CREDENTIALS_FILE_ENV: &str = "IBM_CREDENTIALS_FILE";

/// Credentials file name searched in the working and home directories
pub const DEFAULT_CREDENTIALS_FILE_NAME: &str = "ibm-credentials.env";

/// Properties discovered for one service, keyed without the service prefix
#[derive(Debug, Clone, Default)]
pub struct ServiceProperties {
    service_name: String,
    values: HashMap<String, String>,
}

impl ServiceProperties {
    pub const URL: &'static str = "URL";
    pub const AUTH_TYPE: &'static str = "AUTH_TYPE";
    pub const USERNAME: &'static str = "USERNAME";
    pub const PASSWORD: &'static str = "PASSWORD";
    pub const APIKEY: &'static str = "APIKEY";
    pub const BEARER_TOKEN: &'static str = "BEARER_TOKEN";
    pub const AUTH_URL: &'static str = "AUTH_URL";
    pub const CLIENT_ID: &'static str = "CLIENT_ID";
    pub const CLIENT_SECRET: &'static str = "CLIENT_SECRET";
    pub const SCOPE: &'static str = "SCOPE";
    pub const AUTH_DISABLE_SSL: &'static str = "AUTH_DISABLE_SSL";
    pub const DISABLE_SSL: &'static str = "DISABLE_SSL";

    /// Discover properties for `service_name` from the configured sources.
    ///
    /// Returns an empty set when no source mentions the service.
    ///
    /// # Errors
    /// Returns `SdkError::Config` when a credentials file exists but cannot be parsed
    pub fn load(service_name: &str) -> Result<Self, SdkError> {
        for path in credentials_file_candidates() {
            if !path.is_file() {
                continue;
            }
            let props = Self::from_credentials_file(service_name, &path)?;
            if !props.is_empty() {
                tracing::debug!(
                    service = service_name,
                    path = %path.display(),
                    "loaded service properties from credentials file"
                );
                return Ok(props);
            }
        }

        let props = Self::from_env(service_name);
        if props.is_empty() {
            tracing::debug!(service = service_name, "no external properties found");
        } else {
            tracing::debug!(service = service_name, "loaded service properties from environment");
        }
        Ok(props)
    }

    /// Read properties for `service_name` from a dotenv-style credentials file
    ///
    /// # Errors
    /// Returns `SdkError::Config` if the file cannot be read or parsed
    pub fn from_credentials_file(service_name: &str, path: &Path) -> Result<Self, SdkError> {
        let iter = dotenvy::from_path_iter(path).map_err(|e| {
            SdkError::Config(format!("cannot read credentials file {}: {e}", path.display()))
        })?;

        let mut pairs = Vec::new();
        for item in iter {
            let pair = item.map_err(|e| {
                SdkError::Config(format!("malformed credentials file {}: {e}", path.display()))
            })?;
            pairs.push(pair);
        }
        Ok(Self::from_pairs(service_name, pairs))
    }

    /// Read properties for `service_name` from the process environment
    #[must_use]
    pub fn from_env(service_name: &str) -> Self {
        Self::from_pairs(service_name, std::env::vars())
    }

    /// Build from unprefixed property names (`URL`, `APIKEY`, ...)
    #[must_use]
    pub fn from_map(service_name: &str, values: HashMap<String, String>) -> Self {
        let values = values
            .into_iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k.to_ascii_uppercase(), v))
            .collect();
        Self {
            service_name: service_name.to_owned(),
            values,
        }
    }

    /// Keep only `<SERVICE>_*` keys and strip the prefix
    fn from_pairs(service_name: &str, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let prefix = format!("{}_", env_prefix(service_name));
        let values = pairs
            .into_iter()
            .filter_map(|(key, value)| {
                let property = key.strip_prefix(&prefix)?;
                (!property.is_empty() && !value.is_empty()).then(|| (property.to_owned(), value))
            })
            .collect();
        Self {
            service_name: service_name.to_owned(),
            values,
        }
    }

    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Value of a property; empty values count as unset
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&str> {
        self.values.get(property).map(String::as_str)
    }

    /// Property interpreted as a boolean (`true`, case-insensitive)
    #[must_use]
    pub fn get_bool(&self, property: &str) -> bool {
        self.get(property)
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
    }

    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.get(Self::URL)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// `my-service` → `MY_SERVICE`
fn env_prefix(service_name: &str) -> String {
    service_name.to_ascii_uppercase().replace('-', "_")
}

fn credentials_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(path) = std::env::var_os(CREDENTIALS_FILE_ENV).filter(|p| !p.is_empty()) {
        candidates.push(PathBuf::from(path));
    }
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join(DEFAULT_CREDENTIALS_FILE_NAME));
    }
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(DEFAULT_CREDENTIALS_FILE_NAME));
    }
    candidates
}
