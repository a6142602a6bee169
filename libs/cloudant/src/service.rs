use std::collections::HashMap;
use std::sync::Arc;

use cloudant_core::properties::ServiceProperties;
use cloudant_core::{
    Authenticator, BaseService, HttpClientConfig, SdkError, TransportSecurity,
    authenticator_from_properties,
};

use crate::common;

/// URL used when neither the caller nor external configuration supplies one
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:5984";

/// Service name used to look up external configuration (`CLOUDANT_*`)
pub const DEFAULT_SERVICE_NAME: &str = "cloudant";

/// Construction options for [`CloudantV1`]
#[derive(Debug, Clone, Default)]
pub struct CloudantV1Options {
    /// Service URL; [`DEFAULT_SERVICE_URL`] when unset.
    ///
    /// With [`CloudantV1::new_from_external_config`] this overrides the
    /// discovered URL.
    pub url: Option<String>,
    /// Required for [`CloudantV1::new`]; built from external properties
    /// by [`CloudantV1::new_from_external_config`] when unset.
    pub authenticator: Option<Arc<dyn Authenticator>>,
    /// External configuration name; [`DEFAULT_SERVICE_NAME`] when unset
    pub service_name: Option<String>,
    /// Transport settings.
    ///
    /// When unset, the default configuration is used with the SDK user
    /// agent, and plain HTTP is allowed only while the service URL is
    /// `http://`. The transport is rebuilt when [`CloudantV1::set_service_url`]
    /// changes the scheme.
    pub http_config: Option<HttpClientConfig>,
}

/// Client for the Cloudant and `CouchDB` HTTP API.
///
/// Cloning is cheap: clones share the connection pool and authenticator.
/// Every operation is an `async` method taking its options by reference.
///
/// ```ignore
/// let auth = Arc::new(BasicAuthenticator::new("admin", "pass")?);
/// let client = CloudantV1::new(CloudantV1Options {
///     url: Some("https://example.cloudant.com".into()),
///     authenticator: Some(auth),
///     ..Default::default()
/// })?;
///
/// let info = client.get_server_information(&GetServerInformationOptions::default()).await?;
/// println!("{}", info.result.version);
/// ```
#[derive(Debug, Clone)]
pub struct CloudantV1 {
    pub(crate) service: BaseService,
    /// Transport settings to rebuild from when the URL scheme changes;
    /// `None` when the caller supplied an explicit `http_config`
    scheme_transport: Option<HttpClientConfig>,
}

impl CloudantV1 {
    /// Create a client from an explicit URL and authenticator.
    ///
    /// # Errors
    /// `SdkError::Config` without an authenticator, `SdkError::Authentication`
    /// when it fails validation and `SdkError::InvalidServiceUrl` for a
    /// malformed URL.
    pub fn new(options: CloudantV1Options) -> Result<Self, SdkError> {
        let authenticator = options
            .authenticator
            .ok_or_else(|| SdkError::Config("an authenticator is required".to_owned()))?;
        let url = options.url.unwrap_or_else(|| DEFAULT_SERVICE_URL.to_owned());
        let (http_config, scheme_transport) = match options.http_config {
            Some(config) => (config, None),
            None => {
                let config = default_http_config(&url);
                (config.clone(), Some(config))
            }
        };

        let service = BaseService::new(&url, authenticator, http_config)?;
        tracing::debug!(url = %url, "Cloudant client created");
        Ok(Self {
            service,
            scheme_transport,
        })
    }

    /// Create a client from external configuration.
    ///
    /// Properties are read for `options.service_name` (default `cloudant`)
    /// from a credentials file or the environment. An authenticator or URL
    /// in `options` takes precedence over the discovered values.
    ///
    /// # Errors
    /// `SdkError::Config` when the credentials file is unreadable,
    /// `SdkError::Authentication` for a missing, unknown or invalid auth
    /// type, and `SdkError::InvalidServiceUrl` for a malformed URL.
    pub fn new_from_external_config(options: CloudantV1Options) -> Result<Self, SdkError> {
        let service_name = options
            .service_name
            .clone()
            .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_owned());
        let props = ServiceProperties::load(&service_name)?;

        if props.get_bool(ServiceProperties::DISABLE_SSL) {
            tracing::warn!(
                service = %service_name,
                "DISABLE_SSL is set but certificate verification cannot be disabled; ignoring"
            );
        }

        let authenticator = match options.authenticator {
            Some(authenticator) => authenticator,
            None => authenticator_from_properties(&props)?,
        };
        let url = options
            .url
            .or_else(|| props.url().map(str::to_owned))
            .unwrap_or_else(|| DEFAULT_SERVICE_URL.to_owned());

        Self::new(CloudantV1Options {
            url: Some(url),
            authenticator: Some(authenticator),
            service_name: Some(service_name),
            http_config: options.http_config,
        })
    }

    /// Point the client at another URL; an empty string clears it.
    ///
    /// Without an explicit `http_config`, switching between `http://` and
    /// `https://` rebuilds the transport to match.
    ///
    /// # Errors
    /// `SdkError::InvalidServiceUrl` for a malformed URL and `SdkError::Http`
    /// if the transport cannot be rebuilt
    pub fn set_service_url(&mut self, url: &str) -> Result<(), SdkError> {
        self.service.set_service_url(url)?;
        if let (Some(config), Some(transport)) = (&self.scheme_transport, transport_for_url(url))
            && transport != self.service.transport_security()
        {
            tracing::debug!(url = %url, ?transport, "service URL scheme changed; rebuilding transport");
            self.service.set_http_config(HttpClientConfig {
                transport,
                ..config.clone()
            })?;
        }
        Ok(())
    }

    #[must_use]
    pub fn service_url(&self) -> Option<&str> {
        self.service.service_url().map(url::Url::as_str)
    }

    /// Replace the headers sent with every request
    ///
    /// # Errors
    /// `SdkError::Http` for an invalid header name or value
    pub fn set_default_headers(&mut self, headers: &HashMap<String, String>) -> Result<(), SdkError> {
        self.service.set_default_headers(headers)
    }

    #[must_use]
    pub fn authenticator(&self) -> &Arc<dyn Authenticator> {
        self.service.authenticator()
    }
}

fn default_http_config(url: &str) -> HttpClientConfig {
    HttpClientConfig {
        user_agent: common::user_agent(),
        transport: transport_for_url(url).unwrap_or_default(),
        ..HttpClientConfig::default()
    }
}

/// Transport policy a service URL needs; `None` for an empty or unparsable URL
fn transport_for_url(url: &str) -> Option<TransportSecurity> {
    let url = url::Url::parse(url).ok()?;
    Some(if url.scheme() == "http" {
        TransportSecurity::AllowInsecureHttp
    } else {
        TransportSecurity::TlsOnly
    })
}
