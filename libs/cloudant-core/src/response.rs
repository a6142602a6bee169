use crate::error::HttpError;
use bytes::{Bytes, BytesMut};
use http::{HeaderMap, Response, StatusCode};
use http_body::Body as _;
use http_body_util::BodyExt;
use pin_project_lite::pin_project;
use serde::de::DeserializeOwned;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Maximum body preview size for error messages (8KB).
pub const ERROR_BODY_PREVIEW_LIMIT: usize = 8 * 1024;

/// Type alias for the boxed response body that supports decompression.
pub type ResponseBody =
    http_body_util::combinators::BoxBody<Bytes, Box<dyn std::error::Error + Send + Sync>>;

/// HTTP response wrapper with body-reading helpers
///
/// - `resp.error_for_status()?` - Check status without reading body
/// - `resp.bytes().await?` - Read raw bytes
/// - `resp.checked_bytes().await?` - Read bytes with status check
/// - `resp.json::<T>().await?` - Parse as JSON with status check
/// - `resp.into_stream()` - Unbuffered [`ByteStream`]
///
/// Buffered reads enforce the configured `max_body_size` limit.
#[derive(Debug)]
pub struct HttpResponse {
    pub(crate) inner: Response<ResponseBody>,
    pub(crate) max_body_size: usize,
}

impl HttpResponse {
    /// Get the response status code
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.inner.status()
    }

    /// Get the response headers
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    /// Check status and return error for non-2xx responses
    ///
    /// Does NOT read the response body.
    ///
    /// # Errors
    ///
    /// Returns `HttpError::HttpStatus` if the response status is not 2xx.
    pub fn error_for_status(self) -> Result<Self, HttpError> {
        if self.inner.status().is_success() {
            return Ok(self);
        }

        Err(HttpError::HttpStatus {
            status: self.inner.status(),
            body_preview: String::new(),
            content_type: content_type(self.inner.headers()),
        })
    }

    /// Read response body as bytes without status check
    ///
    /// # Errors
    /// Returns `HttpError::BodyTooLarge` if body exceeds `max_body_size`.
    pub async fn bytes(self) -> Result<Bytes, HttpError> {
        read_body_limited(self.inner.into_body(), self.max_body_size).await
    }

    /// Read response body as bytes with status check
    ///
    /// # Errors
    /// Returns `HttpError::HttpStatus` (with a body preview) if status is not 2xx.
    /// Returns `HttpError::BodyTooLarge` if body exceeds limit.
    pub async fn checked_bytes(self) -> Result<Bytes, HttpError> {
        let status = self.inner.status();
        if !status.is_success() {
            let content_type = content_type(self.inner.headers());
            let preview_limit = self.max_body_size.min(ERROR_BODY_PREVIEW_LIMIT);
            let body_preview = match read_body_limited(self.inner.into_body(), preview_limit).await
            {
                Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                Err(HttpError::BodyTooLarge { .. }) => "<body too large for preview>".to_owned(),
                Err(e) => return Err(e),
            };
            return Err(HttpError::HttpStatus {
                status,
                body_preview,
                content_type,
            });
        }

        self.bytes().await
    }

    /// Parse response body as JSON with status check
    ///
    /// # Errors
    /// Returns `HttpError::HttpStatus` if status is not 2xx.
    /// Returns `HttpError::BodyTooLarge` if body exceeds limit.
    /// Returns `HttpError::Json` if parsing fails.
    pub async fn json<T: DeserializeOwned>(self) -> Result<T, HttpError> {
        let body_bytes = self.checked_bytes().await?;
        Ok(serde_json::from_slice(&body_bytes)?)
    }

    /// Read the whole response into a [`RawResponse`] without status check
    ///
    /// # Errors
    /// Returns `HttpError::BodyTooLarge` if body exceeds limit.
    pub async fn into_raw(self) -> Result<RawResponse, HttpError> {
        let (parts, body) = self.inner.into_parts();
        let body = read_body_limited(body, self.max_body_size).await?;
        Ok(RawResponse {
            status: parts.status,
            headers: parts.headers,
            body,
        })
    }

    /// Split into status, headers and an unbuffered body stream.
    ///
    /// The stream is not limited by `max_body_size`.
    #[must_use]
    pub fn into_stream(self) -> (StatusCode, HeaderMap, ByteStream) {
        let (parts, body) = self.inner.into_parts();
        (parts.status, parts.headers, ByteStream::new(body))
    }

    /// Returns the configured max body size for this response.
    #[must_use]
    pub fn max_body_size(&self) -> usize {
        self.max_body_size
    }
}

fn content_type(headers: &HeaderMap) -> Option<String> {
    headers
        .get(http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

/// Read a (possibly decompressed) body, enforcing the byte limit on the
/// decompressed data.
async fn read_body_limited(body: ResponseBody, limit: usize) -> Result<Bytes, HttpError> {
    let mut collected = BytesMut::new();
    let mut body = std::pin::pin!(body);

    while let Some(frame) = body.frame().await {
        let frame = frame.map_err(HttpError::Transport)?;
        if let Some(chunk) = frame.data_ref() {
            if collected.len() + chunk.len() > limit {
                return Err(HttpError::BodyTooLarge {
                    limit,
                    actual: collected.len() + chunk.len(),
                });
            }
            collected.extend_from_slice(chunk);
        }
    }

    Ok(collected.freeze())
}

pin_project! {
    /// Unbuffered response body handed to the caller.
    ///
    /// Returned by the `*_as_stream`, `*_as_mixed`, `*_as_related` and
    /// attachment operations. Yields the bytes exactly as received (after
    /// transport decompression). The connection is released when the stream
    /// is dropped or exhausted.
    ///
    /// ```ignore
    /// let mut stream = service.post_changes_as_stream(&options).await?.result;
    /// while let Some(chunk) = stream.next().await {
    ///     handle(chunk?);
    /// }
    /// ```
    pub struct ByteStream {
        #[pin]
        inner: ResponseBody,
    }
}

impl ByteStream {
    pub(crate) fn new(inner: ResponseBody) -> Self {
        Self { inner }
    }

    /// Stream over an in-memory buffer
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        let body = http_body_util::Full::new(bytes.into())
            .map_err(|never: std::convert::Infallible| -> Box<dyn std::error::Error + Send + Sync> {
                match never {}
            })
            .boxed();
        Self::new(body)
    }

    /// Collect the remaining bytes into memory.
    ///
    /// # Errors
    /// Returns `HttpError::Transport` if the connection fails mid-body.
    pub async fn bytes(self) -> Result<Bytes, HttpError> {
        read_body_limited(self.inner, usize::MAX).await
    }

    /// Collect the remaining bytes as UTF-8 text (lossy).
    ///
    /// # Errors
    /// Returns `HttpError::Transport` if the connection fails mid-body.
    pub async fn text(self) -> Result<String, HttpError> {
        let bytes = self.bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Size hint reported by the underlying body, if exact
    #[must_use]
    pub fn content_length(&self) -> Option<u64> {
        self.inner.size_hint().exact()
    }
}

impl std::fmt::Debug for ByteStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ByteStream").finish_non_exhaustive()
    }
}

impl futures_core::Stream for ByteStream {
    type Item = Result<Bytes, HttpError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        loop {
            match this.inner.as_mut().poll_frame(cx) {
                Poll::Ready(Some(Ok(frame))) => {
                    // Trailers carry no payload
                    if let Ok(data) = frame.into_data() {
                        return Poll::Ready(Some(Ok(data)));
                    }
                }
                Poll::Ready(Some(Err(e))) => {
                    return Poll::Ready(Some(Err(HttpError::Transport(e))));
                }
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// A fully-read response: status, headers and the exact body bytes.
///
/// Attached to [`crate::SdkError::Service`] and [`crate::SdkError::Decode`].
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RawResponse {
    /// Body decoded as UTF-8 (lossy)
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Body parsed as JSON
    ///
    /// # Errors
    /// Returns the `serde_json` error if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Value of the `Content-Type` header
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }
}

/// Successful operation result: status, headers and the decoded body.
#[derive(Debug)]
pub struct DetailedResponse<T> {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub result: T,
}

impl<T> DetailedResponse<T> {
    /// Discard status and headers
    pub fn into_result(self) -> T {
        self.result
    }

    /// Transform the result, keeping status and headers
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> DetailedResponse<U> {
        DetailedResponse {
            status: self.status,
            headers: self.headers,
            result: f(self.result),
        }
    }

    /// Value of a response header as a string, if present and valid
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
