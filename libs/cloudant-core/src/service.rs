use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use http::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::auth::{Authenticator, has_bad_first_or_last_char};
use crate::builder::HttpClientBuilder;
use crate::client::HttpClient;
use crate::config::{HttpClientConfig, TransportSecurity};
use crate::error::{HttpError, InvalidUriKind, SdkError};
use crate::response::{ByteStream, DetailedResponse, HttpResponse, RawResponse};
use crate::service_request::{RequestPayload, ServiceRequest};

/// Service URL, authenticator, transport and default headers of one client.
///
/// Dispatches [`ServiceRequest`]s and classifies the responses:
/// 2xx becomes a [`DetailedResponse`], anything else an [`SdkError::Service`]
/// carrying the raw response.
#[derive(Debug, Clone)]
pub struct BaseService {
    service_url: Option<Url>,
    authenticator: Arc<dyn Authenticator>,
    client: HttpClient,
    default_headers: HeaderMap,
}

impl BaseService {
    /// Create a service client.
    ///
    /// An empty `service_url` is accepted; every request then fails with
    /// [`SdkError::ServiceUrlMissing`] until a URL is set.
    ///
    /// # Errors
    /// Returns `SdkError::Authentication` if the authenticator fails
    /// validation, `SdkError::InvalidServiceUrl` for a malformed URL and
    /// `SdkError::Http` if the transport cannot be built.
    pub fn new(
        service_url: &str,
        authenticator: Arc<dyn Authenticator>,
        config: HttpClientConfig,
    ) -> Result<Self, SdkError> {
        authenticator.validate()?;
        let client = HttpClientBuilder::with_config(config).build()?;
        let mut service = Self {
            service_url: None,
            authenticator,
            client,
            default_headers: HeaderMap::new(),
        };
        service.set_service_url(service_url)?;
        Ok(service)
    }

    /// Replace the service URL; an empty string clears it.
    ///
    /// # Errors
    /// Returns `SdkError::InvalidServiceUrl` if the URL is wrapped in `{`,
    /// `}` or `"`, cannot be parsed or has no host.
    pub fn set_service_url(&mut self, service_url: &str) -> Result<(), SdkError> {
        self.service_url = parse_service_url(service_url)?;
        Ok(())
    }

    /// Rebuild the transport with another configuration.
    ///
    /// The service URL, authenticator and default headers are kept; pooled
    /// connections of the previous transport are dropped.
    ///
    /// # Errors
    /// Returns `SdkError::Http` if the transport cannot be built.
    pub fn set_http_config(&mut self, config: HttpClientConfig) -> Result<(), SdkError> {
        self.client = HttpClientBuilder::with_config(config).build()?;
        Ok(())
    }

    /// Transport security policy of the current transport
    #[must_use]
    pub fn transport_security(&self) -> TransportSecurity {
        self.client.transport_security()
    }

    /// Current service URL, if one is set
    #[must_use]
    pub fn service_url(&self) -> Option<&Url> {
        self.service_url.as_ref()
    }

    /// Replace the headers sent with every request
    ///
    /// # Errors
    /// Returns `SdkError::Http` if a name or value is not a valid HTTP header
    pub fn set_default_headers(&mut self, headers: &HashMap<String, String>) -> Result<(), SdkError> {
        let mut map = HeaderMap::new();
        for (name, value) in headers {
            map.insert(
                HeaderName::try_from(name.as_str()).map_err(HttpError::from)?,
                HeaderValue::try_from(value.as_str()).map_err(HttpError::from)?,
            );
        }
        self.default_headers = map;
        Ok(())
    }

    #[must_use]
    pub fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }

    #[must_use]
    pub fn authenticator(&self) -> &Arc<dyn Authenticator> {
        &self.authenticator
    }

    /// Dispatch a request and return the unread response.
    ///
    /// Header precedence, lowest to highest: operation headers, default
    /// headers, custom headers. Credentials are added last.
    ///
    /// # Errors
    /// Validation and serialization errors are reported before the service
    /// URL is checked; no request is sent in either case.
    pub async fn send(&self, mut request: ServiceRequest) -> Result<HttpResponse, SdkError> {
        request.check()?;
        let base = self.service_url.as_ref().ok_or(SdkError::ServiceUrlMissing)?;
        let url = request.resolve_url(base)?;

        let mut headers = HeaderMap::new();
        for (name, value) in &request.headers {
            headers.insert(
                HeaderName::try_from(name.as_str()).map_err(HttpError::from)?,
                HeaderValue::try_from(value.as_str()).map_err(HttpError::from)?,
            );
        }
        for (name, value) in &self.default_headers {
            headers.insert(name.clone(), value.clone());
        }
        for (name, value) in &request.custom_headers {
            headers.insert(
                HeaderName::try_from(name.as_str()).map_err(HttpError::from)?,
                HeaderValue::try_from(value.as_str()).map_err(HttpError::from)?,
            );
        }
        if let RequestPayload::Raw { content_type, .. } = &request.payload
            && !headers.contains_key(CONTENT_TYPE)
        {
            headers.insert(
                CONTENT_TYPE,
                HeaderValue::try_from(content_type.as_str()).map_err(HttpError::from)?,
            );
        }
        self.authenticator.authenticate(&mut headers, base).await?;

        tracing::debug!(
            method = %request.method,
            url = %url,
            operation = request.operation_id.unwrap_or("-"),
            "sending service request"
        );

        let builder = self
            .client
            .request(request.method.clone(), url.as_str())
            .header_map(&headers);
        let builder = match request.payload {
            RequestPayload::Empty => builder,
            RequestPayload::Json(bytes) => {
                let builder = if headers.contains_key(CONTENT_TYPE) {
                    builder
                } else {
                    builder.header(CONTENT_TYPE.as_str(), "application/json")
                };
                builder.body_bytes(bytes)
            }
            RequestPayload::Raw { bytes, .. } => builder.body_bytes(bytes),
        };

        let response = builder.send().await?;
        tracing::debug!(
            status = response.status().as_u16(),
            operation = request.operation_id.unwrap_or("-"),
            "received service response"
        );
        Ok(response)
    }

    /// Dispatch and decode a JSON response body into `T`.
    ///
    /// # Errors
    /// `SdkError::Service` for non-2xx statuses, `SdkError::Decode` (with the
    /// raw response) when a 2xx body does not match `T`.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        request: ServiceRequest,
    ) -> Result<DetailedResponse<T>, SdkError> {
        let raw = self.send(request).await?.into_raw().await?;
        if !raw.status.is_success() {
            return Err(service_error(raw));
        }

        match serde_json::from_slice::<T>(&raw.body) {
            Ok(result) => Ok(DetailedResponse {
                status: raw.status,
                headers: raw.headers,
                result,
            }),
            Err(source) => Err(SdkError::Decode {
                response: Box::new(raw),
                source,
            }),
        }
    }

    /// Dispatch and hand the 2xx body back unread.
    ///
    /// # Errors
    /// `SdkError::Service` for non-2xx statuses (the error body is read).
    pub async fn send_stream(
        &self,
        request: ServiceRequest,
    ) -> Result<DetailedResponse<ByteStream>, SdkError> {
        let response = self.send(request).await?;
        if !response.status().is_success() {
            return Err(service_error(response.into_raw().await?));
        }

        let (status, headers, result) = response.into_stream();
        Ok(DetailedResponse {
            status,
            headers,
            result,
        })
    }

    /// Dispatch a request whose response carries no body (`HEAD`).
    ///
    /// # Errors
    /// `SdkError::Service` for non-2xx statuses.
    pub async fn send_head(&self, request: ServiceRequest) -> Result<DetailedResponse<()>, SdkError> {
        let raw = self.send(request).await?.into_raw().await?;
        if !raw.status.is_success() {
            return Err(service_error(raw));
        }
        Ok(DetailedResponse {
            status: raw.status,
            headers: raw.headers,
            result: (),
        })
    }
}

fn parse_service_url(service_url: &str) -> Result<Option<Url>, SdkError> {
    if service_url.is_empty() {
        return Ok(None);
    }
    if has_bad_first_or_last_char(service_url) {
        return Err(SdkError::InvalidServiceUrl(HttpError::InvalidUri {
            url: service_url.to_owned(),
            kind: InvalidUriKind::Quoted,
            reason: "the URL must not start or end with '{', '}' or '\"'".to_owned(),
        }));
    }

    let url = Url::parse(service_url).map_err(|e| {
        SdkError::InvalidServiceUrl(HttpError::InvalidUri {
            url: service_url.to_owned(),
            kind: InvalidUriKind::ParseError,
            reason: e.to_string(),
        })
    })?;
    if !url.has_host() {
        return Err(SdkError::InvalidServiceUrl(HttpError::InvalidUri {
            url: service_url.to_owned(),
            kind: InvalidUriKind::MissingAuthority,
            reason: "missing host/authority".to_owned(),
        }));
    }
    Ok(Some(url))
}

/// Turn a non-2xx response into `SdkError::Service`
fn service_error(raw: RawResponse) -> SdkError {
    let message = error_message(raw.status, &raw.body);
    tracing::debug!(status = raw.status.as_u16(), %message, "service returned an error");
    SdkError::Service {
        response: Box::new(raw),
        message,
    }
}

/// Message for an error body.
///
/// `CouchDB` bodies (`{"error": ..., "reason": ...}`) give `error: reason`;
/// otherwise `message`, `errorMessage` or `errors[0].message` is used, and
/// finally the canonical status text.
fn error_message(status: StatusCode, body: &Bytes) -> String {
    let fallback = || {
        status
            .canonical_reason()
            .map_or_else(|| format!("HTTP {}", status.as_u16()), str::to_owned)
    };

    let Ok(Value::Object(obj)) = serde_json::from_slice::<Value>(body) else {
        return fallback();
    };
    let text = |key: &str| obj.get(key).and_then(Value::as_str).filter(|s| !s.is_empty());

    match (text("error"), text("reason")) {
        (Some(error), Some(reason)) => return format!("{error}: {reason}"),
        (Some(error), None) => return error.to_owned(),
        _ => {}
    }
    if let Some(message) = text("message").or_else(|| text("errorMessage")) {
        return message.to_owned();
    }
    obj.get("errors")
        .and_then(Value::as_array)
        .and_then(|errors| errors.first())
        .and_then(|first| first.get("message"))
        .and_then(Value::as_str)
        .map_or_else(fallback, str::to_owned)
}
