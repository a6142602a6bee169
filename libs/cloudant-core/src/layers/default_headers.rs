use crate::error::HttpError;
use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, Request, Response};
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// Tower layer that adds a fixed set of headers to every request.
///
/// A header is only added when the request does not already carry it, so
/// per-request values always win.
#[derive(Clone, Debug, Default)]
pub struct DefaultHeadersLayer {
    headers: HeaderMap,
}

impl DefaultHeadersLayer {
    /// Create an empty layer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header with the given name and value
    ///
    /// # Errors
    /// Returns `HttpError::InvalidHeaderName` or `HttpError::InvalidHeaderValue`
    /// if the pair is not a valid HTTP header
    pub fn try_header(mut self, name: &str, value: &str) -> Result<Self, HttpError> {
        let name = HeaderName::try_from(name)?;
        let value = HeaderValue::try_from(value)?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Create a layer that only sets `User-Agent`
    ///
    /// # Errors
    /// Returns `HttpError::InvalidHeaderValue` if the user agent string is not valid
    pub fn user_agent(user_agent: impl AsRef<str>) -> Result<Self, HttpError> {
        Self::new().try_header(http::header::USER_AGENT.as_str(), user_agent.as_ref())
    }
}

impl<S> Layer<S> for DefaultHeadersLayer {
    type Service = DefaultHeadersService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        DefaultHeadersService {
            inner,
            headers: self.headers.clone(),
        }
    }
}

/// Service produced by [`DefaultHeadersLayer`]
#[derive(Clone, Debug)]
pub struct DefaultHeadersService<S> {
    inner: S,
    headers: HeaderMap,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for DefaultHeadersService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        for (name, value) in &self.headers {
            if !req.headers().contains_key(name) {
                req.headers_mut().insert(name.clone(), value.clone());
            }
        }
        self.inner.call(req)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::{Method, StatusCode};
    use http_body_util::Full;
    use tower::ServiceExt;

    /// Echoes request headers back as response headers
    #[derive(Clone)]
    struct EchoHeaders;

    impl Service<Request<Full<Bytes>>> for EchoHeaders {
        type Response = Response<Full<Bytes>>;
        type Error = Box<dyn std::error::Error + Send + Sync>;
        type Future = std::future::Ready<Result<Self::Response, Self::Error>>;

        fn poll_ready(&mut self, _: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, req: Request<Full<Bytes>>) -> Self::Future {
            let mut resp = Response::builder()
                .status(StatusCode::OK)
                .body(Full::new(Bytes::new()))
                .unwrap();
            *resp.headers_mut() = req.headers().clone();
            std::future::ready(Ok(resp))
        }
    }

    fn request(headers: &[(&str, &str)]) -> Request<Full<Bytes>> {
        let mut builder = Request::builder()
            .method(Method::GET)
            .uri("http://localhost:5984/");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(Full::new(Bytes::new())).unwrap()
    }

    #[tokio::test]
    async fn test_default_headers_added() {
        let layer = DefaultHeadersLayer::user_agent("cloudant-test/1.0")
            .unwrap()
            .try_header("x-extra", "yes")
            .unwrap();
        let mut service = layer.layer(EchoHeaders);

        let resp = service.ready().await.unwrap().call(request(&[])).await.unwrap();

        assert_eq!(resp.headers()["user-agent"], "cloudant-test/1.0");
        assert_eq!(resp.headers()["x-extra"], "yes");
    }

    #[tokio::test]
    async fn test_existing_header_not_overwritten() {
        let layer = DefaultHeadersLayer::user_agent("cloudant-test/1.0").unwrap();
        let mut service = layer.layer(EchoHeaders);

        let resp = service
            .ready()
            .await
            .unwrap()
            .call(request(&[("user-agent", "custom/2.0")]))
            .await
            .unwrap();

        assert_eq!(resp.headers()["user-agent"], "custom/2.0");
        assert_eq!(resp.headers().get_all("user-agent").iter().count(), 1);
    }

    #[test]
    fn test_invalid_header_rejected() {
        assert!(DefaultHeadersLayer::user_agent("invalid\x00agent").is_err());
        assert!(DefaultHeadersLayer::new().try_header("bad header", "v").is_err());
    }
}
