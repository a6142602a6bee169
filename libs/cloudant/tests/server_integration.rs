//! Server-level operations against a mock Cloudant endpoint.

mod support;

use std::sync::Arc;

use cloudant::common::analytics_header;
use cloudant::{
    CloudantV1, CloudantV1Options, GetActiveTasksOptions, GetCapacityThroughputInformationOptions,
    GetCurrentThroughputInformationOptions, GetMembershipInformationOptions,
    GetServerInformationOptions, GetSessionInformationOptions, GetUpInformationOptions,
    GetUuidsOptions, HeadUpInformationOptions, NoAuthAuthenticator,
    PostActivityTrackerEventsOptions, PutCapacityThroughputConfigurationOptions, SdkError,
};
use httpmock::Method::HEAD;
use httpmock::prelude::*;
use serde_json::json;

#[tokio::test]
async fn get_server_information_decodes_welcome() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/")
            .header("accept", "application/json")
            .header(
                "X-IBMCloud-SDK-Analytics",
                analytics_header("getServerInformation"),
            );
        then.status(200)
            .header("content-type", "application/json")
            .body(
                r#"{"couchdb":"Couchdb","features":["Features"],"vendor":{"name":"Name","variant":"Variant","version":"Version"},"version":"Version"}"#,
            );
    });

    let response = support::client(&server)
        .get_server_information(&GetServerInformationOptions::default())
        .await
        .unwrap();

    mock.assert();
    assert_eq!(response.status, 200);
    let info = response.result;
    assert_eq!(info.couchdb, "Couchdb");
    assert_eq!(info.features, vec!["Features".to_owned()]);
    assert_eq!(info.vendor.name, "Name");
    assert_eq!(info.vendor.variant.as_deref(), Some("Variant"));
    assert_eq!(info.version, "Version");
}

#[tokio::test]
async fn get_uuids_sends_count() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/_uuids").query_param("count", "2");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"uuids":["a","b"]}"#);
    });

    let options = GetUuidsOptions {
        count: Some(2),
        ..Default::default()
    };
    let uuids = support::client(&server)
        .get_uuids(&options)
        .await
        .unwrap()
        .result
        .uuids;

    mock.assert();
    assert_eq!(uuids, ["a", "b"]);
}

#[tokio::test]
async fn session_information_decodes_user_context() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/_session");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"ok":true,"info":{"authenticated":"cookie","authentication_db":"_users","authentication_handlers":["cookie","default"]},"userCtx":{"name":"admin","roles":["_admin"]}}"#);
    });

    let session = support::client(&server)
        .get_session_information(&GetSessionInformationOptions::default())
        .await
        .unwrap()
        .result;

    mock.assert();
    assert!(session.ok);
    assert_eq!(session.user_ctx.name, "admin");
    assert_eq!(session.info.authenticated.as_deref(), Some("cookie"));
}

#[tokio::test]
async fn head_up_information_has_no_body() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(HEAD).path("/_up");
        then.status(200).header("x-couch-request-id", "abc");
    });

    let response = support::client(&server)
        .head_up_information(&HeadUpInformationOptions::default())
        .await
        .unwrap();

    mock.assert();
    assert_eq!(response.status, 200);
    assert_eq!(response.header("x-couch-request-id"), Some("abc"));
}

#[tokio::test]
async fn maintenance_mode_is_a_service_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/_up");
        then.status(503)
            .header("content-type", "application/json")
            .body(r#"{"status":"maintenance_mode","seeds":{}}"#);
    });

    let err = support::client(&server)
        .get_up_information(&GetUpInformationOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, SdkError::Service { .. }));
    assert_eq!(err.status().map(|s| s.as_u16()), Some(503));
    assert!(err.response().unwrap().text().contains("maintenance_mode"));
}

#[tokio::test]
async fn activity_tracker_events_require_types() {
    let err = support::client_without_url()
        .post_activity_tracker_events(&PostActivityTrackerEventsOptions::new(Vec::new()))
        .await
        .unwrap_err();
    assert!(matches!(err, SdkError::Validation(_)));
}

#[tokio::test]
async fn switching_from_https_to_http_url_keeps_client_usable() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"couchdb":"Welcome","version":"3.3.3","vendor":{"name":"The Apache Software Foundation"},"features":[]}"#);
    });

    let mut client = CloudantV1::new(CloudantV1Options {
        url: Some("https://example.cloudant.com".to_owned()),
        authenticator: Some(Arc::new(NoAuthAuthenticator::new())),
        ..Default::default()
    })
    .unwrap();
    client.set_service_url(&server.base_url()).unwrap();

    let info = client
        .get_server_information(&GetServerInformationOptions::default())
        .await
        .unwrap()
        .result;

    mock.assert();
    assert_eq!(info.version, "3.3.3");
}

#[tokio::test]
async fn uppercase_http_scheme_is_accepted() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/_uuids");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"uuids":["a"]}"#);
    });

    let url = server.base_url().replacen("http://", "HTTP://", 1);
    let client = CloudantV1::new(CloudantV1Options {
        url: Some(url),
        authenticator: Some(Arc::new(NoAuthAuthenticator::new())),
        ..Default::default()
    })
    .unwrap();

    client.get_uuids(&GetUuidsOptions::default()).await.unwrap();
    mock.assert();
}

#[tokio::test]
async fn capacity_throughput_round_trip() {
    let server = MockServer::start();
    let body = r#"{"current":{"throughput":{"blocks":1,"query":5,"read":100,"write":50}},"target":{"throughput":{"blocks":2,"query":10,"read":200,"write":100}}}"#;
    let get = server.mock(|when, then| {
        when.method(GET)
            .path("/_api/v2/user/capacity/throughput")
            .header("accept", "application/json");
        then.status(200)
            .header("content-type", "application/json")
            .body(body);
    });
    let put = server.mock(|when, then| {
        when.method(PUT)
            .path("/_api/v2/user/capacity/throughput")
            .header("content-type", "application/json")
            .json_body(json!({"blocks": 2}));
        then.status(202)
            .header("content-type", "application/json")
            .body(body);
    });

    let client = support::client(&server);
    let current = client
        .get_capacity_throughput_information(&GetCapacityThroughputInformationOptions::default())
        .await
        .unwrap()
        .result;
    let updated = client
        .put_capacity_throughput_configuration(&PutCapacityThroughputConfigurationOptions::new(2))
        .await
        .unwrap();

    get.assert();
    put.assert();
    assert_eq!(current.current.throughput.read, 100);
    assert_eq!(updated.status, 202);
    assert_eq!(updated.result.target.throughput.blocks, 2);
}

#[tokio::test]
async fn monitoring_endpoints_decode() {
    let server = MockServer::start();
    let throughput = server.mock(|when, then| {
        when.method(GET).path("/_api/v2/user/current/throughput");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"throughput":{"query":1,"read":2,"write":3}}"#);
    });
    let membership = server.mock(|when, then| {
        when.method(GET).path("/_membership");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"all_nodes":["node1","node2"],"cluster_nodes":["node1"]}"#);
    });
    let tasks = server.mock(|when, then| {
        when.method(GET).path("/_active_tasks");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"[{"database":"shards/00000000-1fffffff/orders","node":"node1","pid":"<0.1.0>","type":"indexer","started_on":1,"updated_on":2}]"#);
    });

    let client = support::client(&server);
    let current = client
        .get_current_throughput_information(&GetCurrentThroughputInformationOptions::default())
        .await
        .unwrap()
        .result;
    let nodes = client
        .get_membership_information(&GetMembershipInformationOptions::default())
        .await
        .unwrap()
        .result;
    let active = client
        .get_active_tasks(&GetActiveTasksOptions::default())
        .await
        .unwrap()
        .result;

    throughput.assert();
    membership.assert();
    tasks.assert();
    assert_eq!(current.throughput.write, 3);
    assert_eq!(nodes.all_nodes, ["node1", "node2"]);
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].node, "node1");
}

#[tokio::test]
async fn activity_tracker_events_send_types() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/_api/v2/user/activity_tracker/events")
            .json_body(json!({"types": ["management", "data"]}));
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"ok":true}"#);
    });

    let options =
        PostActivityTrackerEventsOptions::new(vec!["management".to_owned(), "data".to_owned()]);
    let result = support::client(&server)
        .post_activity_tracker_events(&options)
        .await
        .unwrap()
        .result;

    mock.assert();
    assert!(result.ok);
}
