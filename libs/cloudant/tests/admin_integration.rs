//! Security, API key and CORS operations against a mock endpoint.

mod support;

use std::collections::BTreeMap;

use cloudant::models::{Security, SecurityObject};
use cloudant::{
    GetCorsInformationOptions, GetSecurityOptions, PostApiKeysOptions,
    PutCloudantSecurityConfigurationOptions, PutCorsConfigurationOptions, PutSecurityOptions,
};
use httpmock::prelude::*;
use serde_json::json;

fn members(names: &[&str]) -> SecurityObject {
    SecurityObject {
        names: Some(names.iter().map(|n| (*n).to_owned()).collect()),
        roles: None,
    }
}

#[tokio::test]
async fn security_document_read_and_replace() {
    let server = MockServer::start();
    let get = server.mock(|when, then| {
        when.method(GET).path("/orders/_security");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"admins":{"names":["ops"],"roles":["_admin"]},"members":{"names":[],"roles":[]}}"#);
    });
    let put = server.mock(|when, then| {
        when.method(PUT)
            .path("/orders/_security")
            .header("content-type", "application/json")
            .json_body(json!({"members": {"names": ["ada", "lin"]}, "couchdb_auth_only": true}));
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"ok":true}"#);
    });

    let client = support::client(&server);
    let current = client
        .get_security(&GetSecurityOptions::new("orders"))
        .await
        .unwrap()
        .result;
    let replacement = Security {
        members: Some(members(&["ada", "lin"])),
        couchdb_auth_only: Some(true),
        ..Default::default()
    };
    let written = client
        .put_security(&PutSecurityOptions::new("orders", replacement))
        .await
        .unwrap()
        .result;

    get.assert();
    put.assert();
    assert_eq!(
        current.admins.and_then(|a| a.roles),
        Some(vec!["_admin".to_owned()])
    );
    assert!(written.ok);
}

#[tokio::test]
async fn cloudant_permissions_go_to_account_api() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PUT)
            .path("/_api/v2/db/orders/_security")
            .json_body(json!({"cloudant": {"nobody": ["_reader"], "reporter": ["_reader", "_writer"]}}));
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"ok":true}"#);
    });

    let security = Security {
        cloudant: Some(BTreeMap::from([
            ("nobody".to_owned(), vec!["_reader".to_owned()]),
            (
                "reporter".to_owned(),
                vec!["_reader".to_owned(), "_writer".to_owned()],
            ),
        ])),
        ..Default::default()
    };
    let response = support::client(&server)
        .put_cloudant_security_configuration(&PutCloudantSecurityConfigurationOptions::new(
            "orders", security,
        ))
        .await
        .unwrap();

    mock.assert();
    assert!(response.result.ok);
}

#[tokio::test]
async fn post_api_keys_returns_generated_credentials() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/_api/v2/api_keys")
            .header("accept", "application/json");
        then.status(201)
            .header("content-type", "application/json")
            .body(r#"{"ok":true,"key":"generated-key","password":"generated-secret"}"#);
    });

    let keys = support::client(&server)
        .post_api_keys(&PostApiKeysOptions::default())
        .await
        .unwrap()
        .result;

    mock.assert();
    assert_eq!(keys.key, "generated-key");
    assert_eq!(keys.password, "generated-secret");
}

#[tokio::test]
async fn cors_configuration_read_and_replace() {
    let server = MockServer::start();
    let get = server.mock(|when, then| {
        when.method(GET).path("/_api/v2/user/config/cors");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"allow_credentials":false,"enable_cors":true,"origins":["https://app.example.com"]}"#);
    });
    let put = server.mock(|when, then| {
        when.method(PUT)
            .path("/_api/v2/user/config/cors")
            .json_body(json!({
                "allow_credentials": true,
                "enable_cors": true,
                "origins": ["https://app.example.com", "https://admin.example.com"]
            }));
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"ok":true}"#);
    });

    let client = support::client(&server);
    let current = client
        .get_cors_information(&GetCorsInformationOptions::default())
        .await
        .unwrap()
        .result;
    let mut origins = current.origins.clone();
    origins.push("https://admin.example.com".to_owned());
    let mut options = PutCorsConfigurationOptions::new(origins);
    options.allow_credentials = Some(true);
    options.enable_cors = Some(true);
    client.put_cors_configuration(&options).await.unwrap();

    get.assert();
    put.assert();
    assert!(current.enable_cors);
}
