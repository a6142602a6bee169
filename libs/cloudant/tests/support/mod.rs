#![allow(dead_code)]

use std::sync::Arc;

use cloudant::{CloudantV1, CloudantV1Options, HttpClientConfig, NoAuthAuthenticator};
use httpmock::MockServer;

/// Client without credentials pointed at a mock server
pub fn client(server: &MockServer) -> CloudantV1 {
    client_for_url(&server.base_url())
}

pub fn client_for_url(url: &str) -> CloudantV1 {
    CloudantV1::new(CloudantV1Options {
        url: Some(url.to_owned()),
        authenticator: Some(Arc::new(NoAuthAuthenticator::new())),
        http_config: Some(HttpClientConfig::for_testing()),
        ..Default::default()
    })
    .expect("test client")
}

/// Client whose service URL has been cleared
pub fn client_without_url() -> CloudantV1 {
    let mut client = client_for_url("http://localhost:5984");
    client.set_service_url("").expect("clear service URL");
    client
}
