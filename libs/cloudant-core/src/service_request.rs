use std::collections::HashMap;
use std::fmt::Display;

use bytes::Bytes;
use http::Method;
use serde::Serialize;
use url::Url;

use crate::error::SdkError;

/// Body of a service request
#[derive(Debug, Clone, Default)]
pub enum RequestPayload {
    #[default]
    Empty,
    /// Serialized JSON, sent as `application/json` unless overridden
    Json(Bytes),
    /// Opaque bytes with an explicit content type
    Raw { bytes: Bytes, content_type: String },
}

/// One API call: method, templated path, query, headers and body.
///
/// Path templates use `{name}` placeholders for whole segments. Each
/// parameter is percent-encoded as a single segment, so a `/` inside a
/// value never changes the addressed resource.
///
/// ```ignore
/// let request = ServiceRequest::new(Method::POST, "/{db}/_design/{ddoc}/_view/{view}")
///     .operation("postView")
///     .path_param("db", "orders")
///     .path_param("ddoc", "reports")
///     .path_param("view", "by_date")
///     .query_opt("limit", Some(10))
///     .accept_json()
///     .json_body(&view_query);
/// ```
#[derive(Debug)]
#[must_use = "ServiceRequest does nothing until sent through a BaseService"]
pub struct ServiceRequest {
    pub(crate) method: Method,
    template: &'static str,
    pub(crate) operation_id: Option<&'static str>,
    path_params: Vec<(&'static str, String)>,
    query: Vec<(String, String)>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) custom_headers: Vec<(String, String)>,
    pub(crate) payload: RequestPayload,
    /// Error captured while building, reported before anything is sent
    error: Option<SdkError>,
}

impl ServiceRequest {
    pub fn new(method: Method, template: &'static str) -> Self {
        Self {
            method,
            template,
            operation_id: None,
            path_params: Vec::new(),
            query: Vec::new(),
            headers: Vec::new(),
            custom_headers: Vec::new(),
            payload: RequestPayload::Empty,
            error: None,
        }
    }

    /// Operation identifier used in logs
    pub fn operation(mut self, operation_id: &'static str) -> Self {
        self.operation_id = Some(operation_id);
        self
    }

    /// Substitute `{name}` in the path template
    pub fn path_param(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.path_params.push((name, value.into()));
        self
    }

    /// Add a query parameter
    pub fn query(mut self, name: &str, value: impl Display) -> Self {
        self.query.push((name.to_owned(), value.to_string()));
        self
    }

    /// Add a query parameter only when a value is present
    pub fn query_opt<T: Display>(self, name: &str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.query(name, v),
            None => self,
        }
    }

    /// Add a query parameter whose value is JSON (`keys=["a","b"]`)
    pub fn query_json<T: Serialize + ?Sized>(mut self, name: &str, value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(json) => self.query.push((name.to_owned(), json)),
            Err(e) => self.defer(SdkError::Serialization(e)),
        }
        self
    }

    /// JSON-valued query parameter, only when a value is present
    pub fn query_json_opt<T: Serialize>(self, name: &str, value: Option<&T>) -> Self {
        match value {
            Some(v) => self.query_json(name, v),
            None => self,
        }
    }

    /// Add an operation-defined header
    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_owned(), value.into()));
        self
    }

    /// Add an operation-defined header only when a value is present
    pub fn header_opt(self, name: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.header(name, v),
            None => self,
        }
    }

    pub fn accept(self, value: &str) -> Self {
        self.header(http::header::ACCEPT.as_str(), value)
    }

    pub fn accept_json(self) -> Self {
        self.accept("application/json")
    }

    /// Caller-supplied headers; applied after every other header and override them
    pub fn custom_headers(mut self, headers: &HashMap<String, String>) -> Self {
        self.custom_headers
            .extend(headers.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    /// Serialize `body` as the JSON request body
    pub fn json_body<T: Serialize + ?Sized>(mut self, body: &T) -> Self {
        match serde_json::to_vec(body) {
            Ok(bytes) => self.payload = RequestPayload::Json(Bytes::from(bytes)),
            Err(e) => self.defer(SdkError::Serialization(e)),
        }
        self
    }

    /// Send `bytes` unchanged with the given content type
    pub fn raw_body(mut self, bytes: impl Into<Bytes>, content_type: impl Into<String>) -> Self {
        self.payload = RequestPayload::Raw {
            bytes: bytes.into(),
            content_type: content_type.into(),
        };
        self
    }

    fn defer(&mut self, error: SdkError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    /// Report deferred build errors and empty path parameters.
    pub(crate) fn check(&mut self) -> Result<(), SdkError> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        if let Some((name, _)) = self.path_params.iter().find(|(_, v)| v.is_empty()) {
            return Err(SdkError::validation(format!("{name} must not be empty")));
        }
        Ok(())
    }

    /// Resolve the template against `base` and append the query string.
    pub(crate) fn resolve_url(&self, base: &Url) -> Result<Url, SdkError> {
        let mut url = base.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                SdkError::validation(format!("service URL '{base}' cannot carry a path"))
            })?;
            segments.pop_if_empty();

            let mut pushed = false;
            for part in self.template.split('/').filter(|s| !s.is_empty()) {
                let value = match part.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
                    Some(name) => self.path_value(name)?,
                    None => part,
                };
                segments.push(value);
                pushed = true;
            }
            if !pushed {
                segments.push("");
            }
        }

        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &self.query {
                pairs.append_pair(name, value);
            }
        }
        Ok(url)
    }

    fn path_value(&self, name: &str) -> Result<&str, SdkError> {
        self.path_params
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
            .ok_or_else(|| SdkError::validation(format!("{name} must be set")))
    }
}
