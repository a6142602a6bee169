#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![warn(warnings)]

//! Async client for the IBM Cloudant and Apache `CouchDB` HTTP API
//!
//! [`CloudantV1`] exposes one `async` method per API operation. Each method
//! takes an options struct by reference and returns a
//! [`DetailedResponse`] holding the HTTP status, the response headers and
//! the decoded result model.
//!
//! - Typed models in [`models`]; open models keep undeclared JSON members
//! - `*_as_stream` variants return the raw body as a [`ByteStream`]
//! - Authentication via [`BasicAuthenticator`], [`IamAuthenticator`],
//!   [`CouchDbSessionAuthenticator`], [`BearerTokenAuthenticator`] or
//!   [`NoAuthAuthenticator`]
//! - [`CloudantV1::new_from_external_config`] reads `CLOUDANT_*` settings
//!   from the environment or a credentials file
//!
//! # Example
//!
//! ```ignore
//! use cloudant::{BasicAuthenticator, CloudantV1, CloudantV1Options, GetDocumentOptions};
//! use std::sync::Arc;
//!
//! let client = CloudantV1::new(CloudantV1Options {
//!     url: Some("http://localhost:5984".into()),
//!     authenticator: Some(Arc::new(BasicAuthenticator::new("admin", "pass")?)),
//!     ..Default::default()
//! })?;
//!
//! let doc = client
//!     .get_document(&GetDocumentOptions::new("orders", "order-1"))
//!     .await?
//!     .result;
//! ```

pub mod common;
pub mod models;
pub mod operations;
mod service;
mod validation;

pub use cloudant_core::open::OpenModel;
pub use cloudant_core::{
    AuthType, Authenticator, BasicAuthenticator, BearerTokenAuthenticator, ByteStream,
    CouchDbSessionAuthenticator, DetailedResponse, HttpClientConfig, IamAuthenticator,
    NoAuthAuthenticator, RawResponse, SdkError, TransportSecurity,
};
pub use operations::*;
pub use service::{CloudantV1, CloudantV1Options, DEFAULT_SERVICE_NAME, DEFAULT_SERVICE_URL};
