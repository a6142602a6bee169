//! Clients built from `CLOUDANT_*` environment variables and credentials files.

use std::io::Write;

use cloudant::{
    AuthType, CloudantV1, CloudantV1Options, GetAllDbsOptions, SdkError,
};
use httpmock::prelude::*;

const CREDENTIALS_FILE_ENV: &str = "IBM_CREDENTIALS_FILE";

fn from_env(vars: &[(&str, Option<&str>)]) -> Result<CloudantV1, SdkError> {
    let home = tempfile::tempdir().unwrap();
    let mut all: Vec<(&str, Option<&str>)> = vec![
        (CREDENTIALS_FILE_ENV, None),
        ("HOME", Some(home.path().to_str().unwrap())),
        ("CLOUDANT_URL", None),
        ("CLOUDANT_AUTH_TYPE", None),
        ("CLOUDANT_USERNAME", None),
        ("CLOUDANT_PASSWORD", None),
        ("CLOUDANT_APIKEY", None),
    ];
    all.retain(|(k, _)| !vars.iter().any(|(v, _)| v == k));
    all.extend_from_slice(vars);
    temp_env::with_vars(all, || {
        CloudantV1::new_from_external_config(CloudantV1Options::default())
    })
}

#[tokio::test]
async fn basic_credentials_from_environment() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/_all_dbs")
            .header("authorization", "Basic YWRtaW46cGFzcw==");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"["orders","users"]"#);
    });

    let url = server.base_url();
    let client = from_env(&[
        ("CLOUDANT_URL", Some(url.as_str())),
        ("CLOUDANT_AUTH_TYPE", Some("basic")),
        ("CLOUDANT_USERNAME", Some("admin")),
        ("CLOUDANT_PASSWORD", Some("pass")),
    ])
    .unwrap();
    assert_eq!(client.authenticator().auth_type(), AuthType::Basic);

    let dbs = client
        .get_all_dbs(&GetAllDbsOptions::default())
        .await
        .unwrap()
        .result;

    mock.assert();
    assert_eq!(dbs, ["orders", "users"]);
}

#[test]
fn apikey_implies_iam() {
    let client = from_env(&[
        ("CLOUDANT_URL", Some("https://example.cloudant.com")),
        ("CLOUDANT_APIKEY", Some("my-api-key")),
    ])
    .unwrap();
    assert_eq!(client.authenticator().auth_type(), AuthType::Iam);
    assert_eq!(client.service_url(), Some("https://example.cloudant.com/"));
}

#[test]
fn missing_auth_type_is_an_error() {
    let err = from_env(&[("CLOUDANT_URL", Some("https://example.cloudant.com"))]).unwrap_err();
    assert!(matches!(err, SdkError::Authentication(_)));
}

#[test]
fn unknown_auth_type_is_an_error() {
    let err = from_env(&[("CLOUDANT_AUTH_TYPE", Some("kerberos"))]).unwrap_err();
    assert!(matches!(err, SdkError::Authentication(_)));
}

#[test]
fn credentials_file_takes_precedence_over_environment() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ibm-credentials.env");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "CLOUDANT_URL=https://from-file.example.com").unwrap();
    writeln!(file, "CLOUDANT_AUTH_TYPE=noAuth").unwrap();
    drop(file);

    let client = from_env(&[
        (CREDENTIALS_FILE_ENV, Some(path.to_str().unwrap())),
        ("CLOUDANT_URL", Some("https://from-env.example.com")),
        ("CLOUDANT_AUTH_TYPE", Some("basic")),
    ])
    .unwrap();

    assert_eq!(client.authenticator().auth_type(), AuthType::NoAuth);
    assert_eq!(client.service_url(), Some("https://from-file.example.com/"));
}

#[test]
fn explicit_url_overrides_discovered_url() {
    let home = tempfile::tempdir().unwrap();
    let client = temp_env::with_vars(
        [
            (CREDENTIALS_FILE_ENV, None),
            ("HOME", Some(home.path().to_str().unwrap())),
            ("CLOUDANT_URL", Some("https://from-env.example.com")),
            ("CLOUDANT_AUTH_TYPE", Some("noauth")),
        ],
        || {
            CloudantV1::new_from_external_config(CloudantV1Options {
                url: Some("https://explicit.example.com".to_owned()),
                ..Default::default()
            })
        },
    )
    .unwrap();
    assert_eq!(client.service_url(), Some("https://explicit.example.com/"));
}

#[test]
fn alternate_service_name() {
    let home = tempfile::tempdir().unwrap();
    let client = temp_env::with_vars(
        [
            (CREDENTIALS_FILE_ENV, None),
            ("HOME", Some(home.path().to_str().unwrap())),
            ("REPLICA_URL", Some("https://replica.example.com")),
            ("REPLICA_AUTH_TYPE", Some("noauth")),
        ],
        || {
            CloudantV1::new_from_external_config(CloudantV1Options {
                service_name: Some("replica".to_owned()),
                ..Default::default()
            })
        },
    )
    .unwrap();
    assert_eq!(client.service_url(), Some("https://replica.example.com/"));
}
