//! Mango, search, partition and replication operations against a mock endpoint.

mod support;

use cloudant::models::{IndexDefinition, IndexField, ReplicationDatabase, ReplicationDocument, ViewQuery};
use cloudant::{
    DeleteIndexOptions, DeleteReplicationDocumentOptions, FindQuery, GetGeoIndexInformationOptions,
    GetGeoOptions, GetIndexesInformationOptions, GetPartitionInformationOptions,
    GetReplicationDocumentOptions, GetSchedulerDocsOptions, GetSchedulerDocumentOptions,
    GetSchedulerJobOptions, GetSchedulerJobsOptions, GetSearchInfoOptions, PostExplainOptions,
    PostFindOptions, PostGeoCleanupOptions, PostIndexOptions, PostPartitionAllDocsOptions,
    PostPartitionExplainOptions, PostPartitionFindOptions, PostPartitionSearchOptions,
    PostPartitionViewOptions, PostSearchAnalyzeOptions, PostSearchOptions,
    PutReplicationDocumentOptions, SdkError, SearchQuery,
};
use httpmock::prelude::*;
use serde_json::json;

fn selector(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("selector must be an object, got {other}"),
    }
}

#[tokio::test]
async fn post_find_sends_selector_and_decodes_docs() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/orders/_find")
            .json_body(json!({"selector": {"status": "paid"}, "limit": 2}));
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"docs":[{"_id":"a","status":"paid"}],"bookmark":"g1"}"#);
    });

    let mut query = FindQuery::new(selector(json!({"status": "paid"})));
    query.limit = Some(2);
    let result = support::client(&server)
        .post_find(&PostFindOptions::new("orders", query))
        .await
        .unwrap()
        .result;

    mock.assert();
    assert_eq!(result.docs.len(), 1);
    assert_eq!(result.docs[0].id.as_deref(), Some("a"));
    assert_eq!(result.bookmark.as_deref(), Some("g1"));
}

#[tokio::test]
async fn delete_index_addresses_type_and_name() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(DELETE)
            .path("/orders/_index/_design/idx/json/by_status");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"ok":true}"#);
    });

    let result = support::client(&server)
        .delete_index(&DeleteIndexOptions::new("orders", "idx", "json", "by_status"))
        .await
        .unwrap()
        .result;

    mock.assert();
    assert!(result.ok);
}

#[tokio::test]
async fn post_search_requires_query_text() {
    let options = PostSearchOptions::new("orders", "search", "by_name", SearchQuery::default());
    let err = support::client_without_url()
        .post_search(&options)
        .await
        .unwrap_err();
    assert!(matches!(err, SdkError::Validation(_)));
}

#[tokio::test]
async fn partition_search_uses_partition_path() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/orders/_partition/eu/_design/search/_search/by_name")
            .json_body(json!({"query": "name:ada"}));
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"total_rows":0,"rows":[]}"#);
    });

    let options = PostPartitionSearchOptions::new(
        "orders",
        "eu",
        "search",
        "by_name",
        SearchQuery::new("name:ada"),
    );
    let result = support::client(&server)
        .post_partition_search(&options)
        .await
        .unwrap()
        .result;

    mock.assert();
    assert_eq!(result.total_rows, 0);
}

#[tokio::test]
async fn put_replication_document_writes_to_replicator() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PUT)
            .path("/_replicator/nightly")
            .json_body(json!({
                "source": {"url": "https://a.example.com/orders"},
                "target": {"url": "https://b.example.com/orders"},
                "continuous": true,
                "owner": "ops"
            }));
        then.status(201)
            .header("content-type", "application/json")
            .body(r#"{"id":"nightly","rev":"1-a","ok":true}"#);
    });

    let mut doc = ReplicationDocument::new(
        ReplicationDatabase::new("https://a.example.com/orders"),
        ReplicationDatabase::new("https://b.example.com/orders"),
    );
    doc.continuous = Some(true);
    cloudant::OpenModel::set_property(&mut doc, "owner", "ops");

    support::client(&server)
        .put_replication_document(&PutReplicationDocumentOptions::new("nightly", doc))
        .await
        .unwrap();

    mock.assert();
}

#[tokio::test]
async fn scheduler_docs_states_are_comma_separated() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/_scheduler/docs")
            .query_param("states", "running,failed")
            .query_param("limit", "10");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"total_rows":0,"docs":[]}"#);
    });

    let options = GetSchedulerDocsOptions {
        limit: Some(10),
        states: vec!["running".to_owned(), "failed".to_owned()],
        ..Default::default()
    };
    support::client(&server)
        .get_scheduler_docs(&options)
        .await
        .unwrap();

    mock.assert();
}

#[tokio::test]
async fn partition_information_and_all_docs() {
    let server = MockServer::start();
    let info = server.mock(|when, then| {
        when.method(GET).path("/events/_partition/eu");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"db_name":"events","partition":"eu","doc_count":4,"doc_del_count":1,"sizes":{"active":10,"external":20}}"#);
    });
    let all_docs = server.mock(|when, then| {
        when.method(POST)
            .path("/events/_partition/eu/_all_docs")
            .json_body(json!({"include_docs": true, "limit": 1}));
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"total_rows":4,"rows":[{"id":"eu:1","key":"eu:1","value":{"rev":"1-a"},"doc":{"_id":"eu:1","_rev":"1-a"}}]}"#);
    });

    let client = support::client(&server);
    let partition = client
        .get_partition_information(&GetPartitionInformationOptions::new("events", "eu"))
        .await
        .unwrap()
        .result;
    let mut options = PostPartitionAllDocsOptions::new("events", "eu");
    options.query.include_docs = Some(true);
    options.query.limit = Some(1);
    let rows = client
        .post_partition_all_docs(&options)
        .await
        .unwrap()
        .result
        .rows;

    info.assert();
    all_docs.assert();
    assert_eq!(partition.doc_count, 4);
    assert_eq!(partition.sizes.external, 20);
    assert_eq!(rows[0].id.as_deref(), Some("eu:1"));
}

#[tokio::test]
async fn partition_view_find_and_explain() {
    let server = MockServer::start();
    let view = server.mock(|when, then| {
        when.method(POST)
            .path("/events/_partition/eu/_design/reports/_view/by_day")
            .json_body(json!({"reduce": false}));
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"rows":[{"id":"eu:1","key":"2024-01-01","value":null}]}"#);
    });
    let find = server.mock(|when, then| {
        when.method(POST)
            .path("/events/_partition/eu/_find")
            .json_body(json!({"selector": {"kind": "click"}}));
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"docs":[{"_id":"eu:1","kind":"click"}]}"#);
    });
    let explain = server.mock(|when, then| {
        when.method(POST)
            .path("/events/_partition/eu/_explain")
            .json_body(json!({"selector": {"kind": "click"}}));
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"dbname":"events","index":{"name":"_all_docs","type":"special","def":{"fields":[{"_id":"asc"}]}},"selector":{"kind":{"$eq":"click"}},"limit":25,"skip":0,"fields":[]}"#);
    });

    let client = support::client(&server);
    let mut view_options = PostPartitionViewOptions::new("events", "eu", "reports", "by_day");
    view_options.query = ViewQuery {
        reduce: Some(false),
        ..Default::default()
    };
    let rows = client
        .post_partition_view(&view_options)
        .await
        .unwrap()
        .result
        .rows;
    let query = FindQuery::new(selector(json!({"kind": "click"})));
    let docs = client
        .post_partition_find(&PostPartitionFindOptions::new("events", "eu", query.clone()))
        .await
        .unwrap()
        .result
        .docs;
    let plan = client
        .post_partition_explain(&PostPartitionExplainOptions::new("events", "eu", query))
        .await
        .unwrap()
        .result;

    view.assert();
    find.assert();
    explain.assert();
    assert_eq!(rows[0].key, json!("2024-01-01"));
    assert_eq!(docs.len(), 1);
    assert_eq!(plan.index.type_, "special");
    assert_eq!(plan.limit, 25);
}

#[tokio::test]
async fn explain_and_index_management() {
    let server = MockServer::start();
    let explain = server.mock(|when, then| {
        when.method(POST)
            .path("/orders/_explain")
            .json_body(json!({"selector": {"status": "paid"}, "execution_stats": true}));
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"dbname":"orders","index":{"ddoc":"_design/idx","name":"by_status","type":"json","def":{"fields":[{"status":"asc"}]}},"selector":{},"limit":25,"skip":0,"fields":[]}"#);
    });
    let create = server.mock(|when, then| {
        when.method(POST)
            .path("/orders/_index")
            .json_body(json!({
                "index": {"fields": [{"status": "asc"}]},
                "ddoc": "idx",
                "name": "by_status",
                "type": "json"
            }));
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"id":"_design/idx","name":"by_status","result":"created"}"#);
    });
    let list = server.mock(|when, then| {
        when.method(GET).path("/orders/_index");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"total_rows":1,"indexes":[{"ddoc":"_design/idx","name":"by_status","type":"json","def":{"fields":[{"status":"asc"}]}}]}"#);
    });

    let client = support::client(&server);
    let mut query = FindQuery::new(selector(json!({"status": "paid"})));
    query.execution_stats = Some(true);
    let plan = client
        .post_explain(&PostExplainOptions::new("orders", query))
        .await
        .unwrap()
        .result;

    let definition = IndexDefinition {
        fields: Some(vec![IndexField::sorted("status", "asc")]),
        ..Default::default()
    };
    let mut index_options = PostIndexOptions::new("orders", definition);
    index_options.ddoc = Some("idx".to_owned());
    index_options.name = Some("by_status".to_owned());
    index_options.type_ = Some("json".to_owned());
    let created = client
        .post_index(&index_options)
        .await
        .unwrap()
        .result;
    let indexes = client
        .get_indexes_information(&GetIndexesInformationOptions::new("orders"))
        .await
        .unwrap()
        .result;

    explain.assert();
    create.assert();
    list.assert();
    assert_eq!(plan.index.name, "by_status");
    assert_eq!(created.result, "created");
    assert_eq!(indexes.indexes[0].ddoc.as_deref(), Some("_design/idx"));
}

#[tokio::test]
async fn search_analyze_and_info() {
    let server = MockServer::start();
    let analyze = server.mock(|when, then| {
        when.method(POST)
            .path("/_search_analyze")
            .json_body(json!({"analyzer": "english", "text": "running dogs"}));
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"tokens":["run","dog"]}"#);
    });
    let info = server.mock(|when, then| {
        when.method(GET).path("/orders/_design/search/_search_info/by_name");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"name":"_design/search/by_name","search_index":{"pending_seq":7,"doc_del_count":0,"doc_count":5,"disk_size":1024,"committed_seq":7}}"#);
    });
    let search = server.mock(|when, then| {
        when.method(POST)
            .path("/orders/_design/search/_search/by_name")
            .json_body(json!({"query": "name:ada", "limit": 5, "counts": ["kind"]}));
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"total_rows":1,"bookmark":"g1","rows":[{"id":"a","order":[1.0,0],"fields":{"name":"ada"}}]}"#);
    });

    let client = support::client(&server);
    let tokens = client
        .post_search_analyze(&PostSearchAnalyzeOptions::new("english", "running dogs"))
        .await
        .unwrap()
        .result
        .tokens;
    let index = client
        .get_search_info(&GetSearchInfoOptions::new("orders", "search", "by_name"))
        .await
        .unwrap()
        .result;
    let mut query = SearchQuery::new("name:ada");
    query.limit = Some(5);
    query.counts = Some(vec!["kind".to_owned()]);
    let result = client
        .post_search(&PostSearchOptions::new("orders", "search", "by_name", query))
        .await
        .unwrap()
        .result;

    analyze.assert();
    info.assert();
    search.assert();
    assert_eq!(tokens, ["run", "dog"]);
    assert_eq!(index.search_index.doc_count, 5);
    assert_eq!(result.bookmark.as_deref(), Some("g1"));
}

#[tokio::test]
async fn search_analyze_requires_analyzer_and_text() {
    let client = support::client_without_url();
    for options in [
        PostSearchAnalyzeOptions::new("", "running dogs"),
        PostSearchAnalyzeOptions::new("english", ""),
    ] {
        let err = client.post_search_analyze(&options).await.unwrap_err();
        assert!(matches!(err, SdkError::Validation(_)), "{options:?}");
    }
}

#[tokio::test]
async fn geo_query_sends_circle_parameters() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/places/_design/geo/_geo/points")
            .query_param("lat", "51.5")
            .query_param("lon", "-0.12")
            .query_param("radius", "250")
            .query_param("relation", "contains")
            .query_param("include_docs", "true");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"bookmark":"g1","rows":[{"id":"london","rev":"1-a","geometry":{"type":"Point","coordinates":[-0.12,51.5]}}]}"#);
    });

    let mut options = GetGeoOptions::new("places", "geo", "points");
    options.lat = Some(51.5);
    options.lon = Some(-0.12);
    options.radius = Some(250.0);
    options.relation = Some("contains".to_owned());
    options.include_docs = Some(true);
    let result = support::client(&server)
        .get_geo(&options)
        .await
        .unwrap()
        .result;

    mock.assert();
    assert_eq!(result.bookmark, "g1");
    assert_eq!(result.rows[0].id, "london");
}

#[tokio::test]
async fn geo_index_information_and_cleanup() {
    let server = MockServer::start();
    let info = server.mock(|when, then| {
        when.method(GET).path("/places/_design/geo/_geo_info/points");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"name":"_design/geo/points","geo_index":{"data_size":10,"disk_size":20,"doc_count":3}}"#);
    });
    let cleanup = server.mock(|when, then| {
        when.method(POST).path("/places/_geo_cleanup");
        then.status(202)
            .header("content-type", "application/json")
            .body(r#"{"ok":true}"#);
    });

    let client = support::client(&server);
    let index = client
        .get_geo_index_information(&GetGeoIndexInformationOptions::new("places", "geo", "points"))
        .await
        .unwrap()
        .result;
    let cleaned = client
        .post_geo_cleanup(&PostGeoCleanupOptions::new("places"))
        .await
        .unwrap();

    info.assert();
    cleanup.assert();
    assert_eq!(index.geo_index.doc_count, 3);
    assert_eq!(cleaned.status, 202);
}

#[tokio::test]
async fn replication_document_read_and_cancel() {
    let server = MockServer::start();
    let get = server.mock(|when, then| {
        when.method(GET)
            .path("/_replicator/nightly")
            .query_param("revs", "true");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"_id":"nightly","_rev":"2-b","source":{"url":"https://a.example.com/orders"},"target":{"url":"https://b.example.com/orders"},"owner":"ops"}"#);
    });
    let delete = server.mock(|when, then| {
        when.method(DELETE)
            .path("/_replicator/nightly")
            .query_param("rev", "2-b");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"id":"nightly","rev":"3-c","ok":true}"#);
    });

    let client = support::client(&server);
    let mut get_options = GetReplicationDocumentOptions::new("nightly");
    get_options.revs = Some(true);
    let doc = client
        .get_replication_document(&get_options)
        .await
        .unwrap()
        .result;
    let mut delete_options = DeleteReplicationDocumentOptions::new("nightly");
    delete_options.rev = doc.rev.clone();
    client.delete_replication_document(&delete_options).await.unwrap();

    get.assert();
    delete.assert();
    assert_eq!(doc.owner.as_deref(), Some("ops"));
}

#[tokio::test]
async fn scheduler_document_and_jobs() {
    let server = MockServer::start();
    let doc = server.mock(|when, then| {
        when.method(GET).path("/_scheduler/docs/_replicator/nightly");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"database":"_replicator","doc_id":"nightly","error_count":0,"last_updated":"2024-01-01T00:00:00Z","start_time":"2024-01-01T00:00:00Z","state":"running","info":{"docs_read":10}}"#);
    });
    let jobs = server.mock(|when, then| {
        when.method(GET)
            .path("/_scheduler/jobs")
            .query_param("limit", "5")
            .query_param("skip", "1");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"total_rows":2,"jobs":[{"id":"abc+continuous","node":"node1","pid":"<0.1.0>","source":"https://a.example.com/orders/","target":"https://b.example.com/orders/","start_time":"2024-01-01T00:00:00Z","history":[{"type":"started","timestamp":"2024-01-01T00:00:00Z"}],"info":{}}]}"#);
    });
    let job = server.mock(|when, then| {
        when.method(GET).path("/_scheduler/jobs/abc+continuous");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"id":"abc+continuous","node":"node1","pid":"<0.1.0>","source":"s","target":"t","start_time":"2024-01-01T00:00:00Z","history":[],"info":{"changes_pending":0}}"#);
    });

    let client = support::client(&server);
    let state = client
        .get_scheduler_document(&GetSchedulerDocumentOptions::new("nightly"))
        .await
        .unwrap()
        .result;
    let listing = client
        .get_scheduler_jobs(&GetSchedulerJobsOptions {
            limit: Some(5),
            skip: Some(1),
            ..Default::default()
        })
        .await
        .unwrap()
        .result;
    let single = client
        .get_scheduler_job(&GetSchedulerJobOptions::new("abc+continuous"))
        .await
        .unwrap()
        .result;

    doc.assert();
    jobs.assert();
    job.assert();
    assert_eq!(state.state, "running");
    assert_eq!(state.info.and_then(|i| i.docs_read), Some(10));
    assert_eq!(listing.jobs[0].history[0].type_, "started");
    assert_eq!(single.info.changes_pending, Some(0));
}
