use std::time::Duration;

/// Default User-Agent string for HTTP requests
pub const DEFAULT_USER_AGENT: &str = concat!("cloudant-sdk-core/", env!("CARGO_PKG_VERSION"));

/// TLS root certificate source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum TlsRootConfig {
    /// Mozilla root certificates bundled at build time (default)
    #[default]
    WebPki,
    /// Root certificates from the operating system store
    Native,
}

/// Transport security policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransportSecurity {
    /// Only `https://` URLs are accepted (default)
    #[default]
    TlsOnly,
    /// Plain `http://` URLs are accepted as well.
    ///
    /// Needed for local `CouchDB` instances and mock servers.
    AllowInsecureHttp,
}

/// Transport configuration shared by every request a client sends
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Timeout for a single request, including reading response headers (default: 60s)
    pub request_timeout: Duration,

    /// Maximum decompressed body size accepted by buffered reads (default: 50 MB)
    ///
    /// Streamed responses ([`crate::ByteStream`]) are not limited.
    pub max_body_size: usize,

    /// User-Agent applied when a request does not set its own
    pub user_agent: String,

    /// Transport security policy
    pub transport: TransportSecurity,

    /// TLS root certificate source
    pub tls_roots: TlsRootConfig,

    /// Idle connection timeout for the pool; `None` keeps the hyper-util default
    pub pool_idle_timeout: Option<Duration>,

    /// Maximum idle connections kept per host
    pub pool_max_idle_per_host: usize,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(60),
            max_body_size: 50 * 1024 * 1024,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            transport: TransportSecurity::TlsOnly,
            tls_roots: TlsRootConfig::default(),
            pool_idle_timeout: Some(Duration::from_secs(90)),
            pool_max_idle_per_host: 32,
        }
    }
}

impl HttpClientConfig {
    /// Configuration for IAM token and `_session` endpoints.
    ///
    /// Short timeout and a small body limit; token responses are tiny.
    #[must_use]
    pub fn token_endpoint() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            max_body_size: 1024 * 1024,
            pool_idle_timeout: Some(Duration::from_secs(60)),
            pool_max_idle_per_host: 4,
            ..Self::default()
        }
    }

    /// Configuration for tests against local mock servers (plain HTTP allowed)
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            max_body_size: 1024 * 1024,
            transport: TransportSecurity::AllowInsecureHttp,
            pool_idle_timeout: Some(Duration::from_secs(10)),
            pool_max_idle_per_host: 4,
            ..Self::default()
        }
    }

    /// Same settings with plain HTTP allowed
    #[must_use]
    pub fn allow_insecure_http(mut self) -> Self {
        self.transport = TransportSecurity::AllowInsecureHttp;
        self
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HttpClientConfig::default();
        assert_eq!(config.request_timeout, Duration::from_secs(60));
        assert_eq!(config.max_body_size, 50 * 1024 * 1024);
        assert_eq!(config.transport, TransportSecurity::TlsOnly);
        assert_eq!(config.tls_roots, TlsRootConfig::WebPki);
        assert!(config.user_agent.starts_with("cloudant-sdk-core/"));
    }

    #[test]
    fn test_token_endpoint_config() {
        let config = HttpClientConfig::token_endpoint();
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.max_body_size, 1024 * 1024);
        assert_eq!(config.transport, TransportSecurity::TlsOnly);
    }

    #[test]
    fn test_for_testing_allows_http() {
        let config = HttpClientConfig::for_testing();
        assert_eq!(config.transport, TransportSecurity::AllowInsecureHttp);
    }

    #[test]
    fn test_allow_insecure_http_keeps_other_settings() {
        let config = HttpClientConfig::token_endpoint().allow_insecure_http();
        assert_eq!(config.transport, TransportSecurity::AllowInsecureHttp);
        assert_eq!(config.pool_max_idle_per_host, 4);
    }
}
