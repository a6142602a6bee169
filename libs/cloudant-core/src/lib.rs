#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![warn(warnings)]

//! Core infrastructure shared by Cloudant service clients
//!
//! This crate provides:
//! - A hyper-based HTTP transport with rustls TLS, connection pooling,
//!   per-request timeouts and transparent response decompression
//! - [`ServiceRequest`]: path templating, query/header assembly and body
//!   serialization for a single API operation
//! - [`BaseService`]: service URL + authenticator ownership and response
//!   classification into [`DetailedResponse`] or [`SdkError`]
//! - Authenticators: no-auth, basic, bearer token, IAM and `CouchDB` session
//! - External configuration from credentials files and environment variables
//! - Serde helpers for "open" models that keep unknown JSON properties
//!
//! # Example
//!
//! ```ignore
//! use cloudant_core::{BaseService, BasicAuthenticator, ServiceRequest};
//! use std::sync::Arc;
//!
//! let auth = Arc::new(BasicAuthenticator::new("admin", "pass")?);
//! let service = BaseService::new("http://localhost:5984", auth, Default::default())?;
//!
//! let request = ServiceRequest::new(http::Method::GET, "/{db}")
//!     .path_param("db", "products")
//!     .accept_json();
//! let info: serde_json::Value = service.send_json(request).await?.result;
//! ```

pub mod auth;
mod builder;
mod client;
mod config;
mod error;
mod layers;
pub mod open;
pub mod properties;
mod request;
mod response;
mod secret;
mod service;
mod service_request;
mod tls;

pub use auth::{
    AuthError, AuthType, Authenticator, BasicAuthenticator, BearerTokenAuthenticator,
    CouchDbSessionAuthenticator, IamAuthenticator, NoAuthAuthenticator, authenticator_from_properties,
};
pub use builder::HttpClientBuilder;
pub use client::HttpClient;
pub use config::{DEFAULT_USER_AGENT, HttpClientConfig, TlsRootConfig, TransportSecurity};
pub use error::{HttpError, InvalidUriKind, SdkError};
pub use layers::{DefaultHeadersLayer, DefaultHeadersService};
pub use properties::ServiceProperties;
pub use request::RequestBuilder;
pub use response::{
    ByteStream, DetailedResponse, ERROR_BODY_PREVIEW_LIMIT, HttpResponse, RawResponse, ResponseBody,
};
pub use secret::SecretString;
pub use service::BaseService;
pub use service_request::{RequestPayload, ServiceRequest};
