//! Database, changes, revision, view and design document operations against a mock endpoint.

mod support;

use std::collections::BTreeMap;

use cloudant::models::{DesignDocument, DesignDocumentViewsMapReduce, ViewQuery};
use cloudant::{
    GetAllDbsOptions, GetDbUpdatesOptions, GetDesignDocumentInformationOptions,
    GetDocumentShardsInfoOptions, GetShardsInformationOptions, PostChangesOptions,
    PostDbsInfoOptions, PostDesignDocsOptions, PostRevsDiffOptions, PostViewQueriesOptions,
    PutDatabaseOptions, PutDesignDocumentOptions,
};
use httpmock::prelude::*;
use serde_json::json;

#[tokio::test]
async fn post_changes_sends_filter_body_and_last_event_id() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/orders/_changes")
            .header("Last-Event-ID", "7-g1")
            .query_param("filter", "_doc_ids")
            .query_param("include_docs", "true")
            .query_param("since", "now")
            .json_body(json!({"doc_ids": ["a", "b"]}));
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"last_seq":"9-g1","pending":0,"results":[{"id":"a","seq":"8-g1","changes":[{"rev":"2-x"}],"doc":{"_id":"a","_rev":"2-x","n":2}}]}"#);
    });

    let mut options = PostChangesOptions::new("orders");
    options.doc_ids = Some(vec!["a".to_owned(), "b".to_owned()]);
    options.filter = Some("_doc_ids".to_owned());
    options.include_docs = Some(true);
    options.since = Some("now".to_owned());
    options.last_event_id = Some("7-g1".to_owned());
    let changes = support::client(&server)
        .post_changes(&options)
        .await
        .unwrap()
        .result;

    mock.assert();
    assert_eq!(changes.last_seq, "9-g1");
    assert_eq!(changes.results[0].changes[0].rev, "2-x");
    assert_eq!(
        changes.results[0].doc.as_ref().and_then(|d| d.rev.as_deref()),
        Some("2-x")
    );
}

#[tokio::test]
async fn post_changes_without_filters_sends_empty_object() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/orders/_changes")
            .query_param("limit", "1")
            .json_body(json!({}));
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"last_seq":"1-a","pending":3,"results":[]}"#);
    });

    let mut options = PostChangesOptions::new("orders");
    options.limit = Some(1);
    let changes = support::client(&server)
        .post_changes(&options)
        .await
        .unwrap()
        .result;

    mock.assert();
    assert_eq!(changes.pending, 3);
}

#[tokio::test]
async fn get_db_updates_sends_feed_options() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/_db_updates")
            .query_param("feed", "normal")
            .query_param("since", "0");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"last_seq":"2-b","results":[{"db_name":"orders","type":"created","seq":"1-a"}]}"#);
    });

    let options = GetDbUpdatesOptions {
        feed: Some("normal".to_owned()),
        since: Some("0".to_owned()),
        ..Default::default()
    };
    let updates = support::client(&server)
        .get_db_updates(&options)
        .await
        .unwrap()
        .result;

    mock.assert();
    assert_eq!(updates.results[0].type_, "created");
}

#[tokio::test]
async fn database_listing_and_creation() {
    let server = MockServer::start();
    let all_dbs = server.mock(|when, then| {
        when.method(GET)
            .path("/_all_dbs")
            .query_param("start_key", r#""a""#)
            .query_param("limit", "2");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"["accounts","orders"]"#);
    });
    let dbs_info = server.mock(|when, then| {
        when.method(POST)
            .path("/_dbs_info")
            .json_body(json!({"keys": ["orders", "missing"]}));
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"[{"key":"orders","info":{"db_name":"orders","doc_count":3,"update_seq":"3-a"}},{"key":"missing","error":"not_found"}]"#);
    });
    let create = server.mock(|when, then| {
        when.method(PUT)
            .path("/events")
            .query_param("partitioned", "true")
            .query_param("q", "8");
        then.status(201)
            .header("content-type", "application/json")
            .body(r#"{"ok":true}"#);
    });

    let client = support::client(&server);
    let names = client
        .get_all_dbs(&GetAllDbsOptions {
            start_key: Some("a".to_owned()),
            limit: Some(2),
            ..Default::default()
        })
        .await
        .unwrap()
        .result;
    let infos = client
        .post_dbs_info(&PostDbsInfoOptions::new(vec![
            "orders".to_owned(),
            "missing".to_owned(),
        ]))
        .await
        .unwrap()
        .result;
    let mut put_options = PutDatabaseOptions::new("events");
    put_options.partitioned = Some(true);
    put_options.q = Some(8);
    let created = client.put_database(&put_options).await.unwrap();

    all_dbs.assert();
    dbs_info.assert();
    create.assert();
    assert_eq!(names, ["accounts", "orders"]);
    assert_eq!(infos[0].info.as_ref().map(|i| i.doc_count), Some(3));
    assert_eq!(infos[1].error.as_deref(), Some("not_found"));
    assert_eq!(created.status, 201);
    assert!(created.result.ok);
}

#[tokio::test]
async fn post_revs_diff_sends_revision_map() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/orders/_revs_diff")
            .json_body(json!({"order-1": ["1-a", "2-b"]}));
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"order-1":{"missing":["2-b"],"possible_ancestors":["1-a"]}}"#);
    });

    let revisions = BTreeMap::from([(
        "order-1".to_owned(),
        vec!["1-a".to_owned(), "2-b".to_owned()],
    )]);
    let diff = support::client(&server)
        .post_revs_diff(&PostRevsDiffOptions::new("orders", revisions))
        .await
        .unwrap()
        .result;

    mock.assert();
    assert_eq!(diff["order-1"].missing.as_deref(), Some(&["2-b".to_owned()][..]));
}

#[tokio::test]
async fn shard_information() {
    let server = MockServer::start();
    let shards = server.mock(|when, then| {
        when.method(GET).path("/orders/_shards");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"shards":{"00000000-7fffffff":["node1"],"80000000-ffffffff":["node2"]}}"#);
    });
    let doc_shard = server.mock(|when, then| {
        when.method(GET).path("/orders/_shards/order-1");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"range":"80000000-ffffffff","nodes":["node2"]}"#);
    });

    let client = support::client(&server);
    let all = client
        .get_shards_information(&GetShardsInformationOptions::new("orders"))
        .await
        .unwrap()
        .result;
    let one = client
        .get_document_shards_info(&GetDocumentShardsInfoOptions::new("orders", "order-1"))
        .await
        .unwrap()
        .result;

    shards.assert();
    doc_shard.assert();
    assert_eq!(all.shards.len(), 2);
    assert_eq!(one.range, "80000000-ffffffff");
}

#[tokio::test]
async fn design_document_write_and_info() {
    let server = MockServer::start();
    let put = server.mock(|when, then| {
        when.method(PUT)
            .path("/orders/_design/reports")
            .json_body(json!({
                "views": {"by_status": {"map": "function(doc) { emit(doc.status); }", "reduce": "_count"}}
            }));
        then.status(201)
            .header("content-type", "application/json")
            .body(r#"{"id":"_design/reports","rev":"1-a","ok":true}"#);
    });
    let info = server.mock(|when, then| {
        when.method(GET).path("/orders/_design/reports/_info");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"name":"reports","view_index":{"language":"javascript","signature":"sig","compact_running":false,"updater_running":true,"waiting_clients":0,"waiting_commit":false,"sizes":{"active":1,"external":2,"file":3}}}"#);
    });
    let listing = server.mock(|when, then| {
        when.method(POST)
            .path("/orders/_design_docs")
            .json_body(json!({"include_docs": false}));
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"total_rows":1,"rows":[{"id":"_design/reports","key":"_design/reports","value":{"rev":"1-a"}}]}"#);
    });

    let mut view = DesignDocumentViewsMapReduce::new("function(doc) { emit(doc.status); }");
    view.reduce = Some("_count".to_owned());
    let mut ddoc = DesignDocument::default();
    ddoc.views = Some(BTreeMap::from([("by_status".to_owned(), view)]));

    let client = support::client(&server);
    client
        .put_design_document(&PutDesignDocumentOptions::new("orders", "reports", ddoc))
        .await
        .unwrap();
    let index = client
        .get_design_document_information(&GetDesignDocumentInformationOptions::new(
            "orders", "reports",
        ))
        .await
        .unwrap()
        .result;
    let mut list_options = PostDesignDocsOptions::new("orders");
    list_options.query.include_docs = Some(false);
    let rows = client
        .post_design_docs(&list_options)
        .await
        .unwrap()
        .result
        .rows;

    put.assert();
    info.assert();
    listing.assert();
    assert!(index.view_index.updater_running);
    assert_eq!(rows[0].value.as_ref().map(|v| v.rev.as_str()), Some("1-a"));
}

#[tokio::test]
async fn post_view_queries_sends_query_list() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/orders/_design/reports/_view/by_status/queries")
            .json_body(json!({"queries": [{"keys": ["paid"]}, {"limit": 1, "skip": 2}]}));
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"results":[{"total_rows":2,"rows":[{"id":"a","key":"paid","value":1}]},{"total_rows":2,"rows":[]}]}"#);
    });

    let queries = vec![
        ViewQuery {
            keys: Some(vec![json!("paid")]),
            ..Default::default()
        },
        ViewQuery {
            limit: Some(1),
            skip: Some(2),
            ..Default::default()
        },
    ];
    let results = support::client(&server)
        .post_view_queries(&PostViewQueriesOptions::new(
            "orders", "reports", "by_status", queries,
        ))
        .await
        .unwrap()
        .result
        .results;

    mock.assert();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].rows[0].key, json!("paid"));
    assert!(results[1].rows.is_empty());
}
