//! Tower layers for the transport middleware stack
//!
//! - [`DefaultHeadersLayer`] - Adds headers (User-Agent and friends) to requests that lack them

mod default_headers;

pub use default_headers::{DefaultHeadersLayer, DefaultHeadersService};
