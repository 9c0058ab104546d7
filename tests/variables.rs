//
//  gitlab-admin
//  tests/variables.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

mod common;

use gitlab_admin::api::{ApiError, NewVariable, VariableScope, VariableType, WriteAction};
use mockito::Matcher;
use serde_json::json;

use common::{client_for, variable};

#[tokio::test]
async fn upsert_creates_missing_variable() {
    let mut server = mockito::Server::new_async().await;

    let lookup = server
        .mock("GET", "/api/v4/groups/7/variables/API_URL")
        .with_status(404)
        .with_body(r#"{"message":"404 Variable Not Found"}"#)
        .expect(1)
        .create_async()
        .await;
    let create = server
        .mock("POST", "/api/v4/groups/7/variables")
        .match_body(Matcher::PartialJson(json!({
            "key": "API_URL",
            "value": "https://api.example.com",
            "variable_type": "env_var",
            "protected": false,
            "environment_scope": "*",
        })))
        .with_status(201)
        .with_body(variable("API_URL", "https://api.example.com", "*").to_string())
        .expect(1)
        .create_async()
        .await;
    let update = server
        .mock("PUT", "/api/v4/groups/7/variables/API_URL")
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server);
    let saved = client
        .create_or_update_variable(
            VariableScope::Group(7),
            &NewVariable::new("API_URL", "https://api.example.com"),
        )
        .await
        .unwrap();

    assert_eq!(saved.key, "API_URL");
    lookup.assert_async().await;
    create.assert_async().await;
    update.assert_async().await;
}

#[tokio::test]
async fn upsert_updates_existing_variable() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/api/v4/projects/5/variables/DEPLOY_KEY")
        .match_query(Matcher::UrlEncoded(
            "filter[environment_scope]".into(),
            "production".into(),
        ))
        .with_body(variable("DEPLOY_KEY", "old", "production").to_string())
        .expect(1)
        .create_async()
        .await;
    let update = server
        .mock("PUT", "/api/v4/projects/5/variables/DEPLOY_KEY")
        .match_body(Matcher::PartialJson(json!({
            "value": "new",
            "variable_type": "file",
            "protected": true,
            "masked": true,
            "environment_scope": "production",
        })))
        .with_body(json!({
            "key": "DEPLOY_KEY",
            "value": "new",
            "variable_type": "file",
            "protected": true,
            "masked": true,
            "environment_scope": "production",
        }).to_string())
        .expect(1)
        .create_async()
        .await;
    let create = server
        .mock("POST", "/api/v4/projects/5/variables")
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server);
    let var = NewVariable::new("DEPLOY_KEY", "new")
        .variable_type(VariableType::File)
        .protected(true)
        .masked(true)
        .environment_scope("production");
    let saved = client
        .create_or_update_variable(VariableScope::Project(5), &var)
        .await
        .unwrap();

    assert_eq!(saved.variable_type, VariableType::File);
    assert_eq!(saved.environment_scope, "production");
    update.assert_async().await;
    create.assert_async().await;
}

#[tokio::test]
async fn second_upsert_of_same_key_updates() {
    let mut server = mockito::Server::new_async().await;

    let absent = server
        .mock("GET", "/api/v4/groups/7/variables/REGION")
        .with_status(404)
        .expect(1)
        .create_async()
        .await;
    let present = server
        .mock("GET", "/api/v4/groups/7/variables/REGION")
        .with_body(variable("REGION", "eu-west-1", "*").to_string())
        .expect(1)
        .create_async()
        .await;
    let create = server
        .mock("POST", "/api/v4/groups/7/variables")
        .match_body(Matcher::PartialJson(json!({ "key": "REGION", "value": "eu-west-1" })))
        .with_status(201)
        .with_body(variable("REGION", "eu-west-1", "*").to_string())
        .expect(1)
        .create_async()
        .await;
    let update = server
        .mock("PUT", "/api/v4/groups/7/variables/REGION")
        .match_body(Matcher::PartialJson(json!({ "value": "eu-west-1" })))
        .with_body(variable("REGION", "eu-west-1", "*").to_string())
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let var = NewVariable::new("REGION", "eu-west-1");
    let first = client
        .create_or_update_variable(VariableScope::Group(7), &var)
        .await
        .unwrap();
    let second = client
        .create_or_update_variable(VariableScope::Group(7), &var)
        .await
        .unwrap();

    assert_eq!((first.key.as_str(), first.value.as_str()), ("REGION", "eu-west-1"));
    assert_eq!(first, second);
    absent.assert_async().await;
    present.assert_async().await;
    create.assert_async().await;
    update.assert_async().await;
}

#[tokio::test]
async fn failed_write_names_the_attempted_action() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/api/v4/groups/7/variables/TOKEN")
        .with_status(404)
        .create_async()
        .await;
    server
        .mock("POST", "/api/v4/groups/7/variables")
        .with_status(400)
        .with_body(r#"{"message":{"value":["is invalid"]}}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .create_or_update_variable(VariableScope::Group(7), &NewVariable::new("TOKEN", "x"))
        .await
        .unwrap_err();

    match &err {
        ApiError::Write { action, source } => {
            assert_eq!(*action, WriteAction::Create);
            assert_eq!(source.status().map(|s| s.as_u16()), Some(400));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().starts_with("Failed to create variable"));
}

#[tokio::test]
async fn lookup_failure_other_than_404_is_an_error() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/api/v4/groups/7/variables/TOKEN")
        .with_status(403)
        .with_body("forbidden")
        .create_async()
        .await;
    let create = server
        .mock("POST", "/api/v4/groups/7/variables")
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server);
    let lookup = client
        .get_variable(VariableScope::Group(7), "TOKEN", "*")
        .await;
    assert!(lookup.is_err());

    let upsert = client
        .create_or_update_variable(VariableScope::Group(7), &NewVariable::new("TOKEN", "x"))
        .await;
    assert!(upsert.is_err());
    create.assert_async().await;
}

#[tokio::test]
async fn missing_variable_is_none() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/api/v4/projects/5/variables/NOPE")
        .with_status(404)
        .create_async()
        .await;

    let client = client_for(&server);
    let found = client
        .get_variable(VariableScope::Project(5), "NOPE", "*")
        .await
        .unwrap();

    assert!(found.is_none());
}

#[tokio::test]
async fn list_walks_all_pages() {
    let mut server = mockito::Server::new_async().await;

    let full: Vec<_> = (0..100).map(|i| variable(&format!("VAR_{i}"), "v", "*")).collect();
    server
        .mock("GET", "/api/v4/projects/5/variables")
        .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
        .with_body(serde_json::Value::Array(full).to_string())
        .create_async()
        .await;
    server
        .mock("GET", "/api/v4/projects/5/variables")
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .with_body(json!([variable("LAST", "v", "staging")]).to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let variables = client.list_variables(VariableScope::Project(5)).await.unwrap();

    assert_eq!(variables.len(), 101);
    assert_eq!(variables[100].key, "LAST");
}

#[tokio::test]
async fn delete_filters_project_environment_scope() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("DELETE", "/api/v4/projects/5/variables/DB_HOST")
        .match_query(Matcher::UrlEncoded(
            "filter[environment_scope]".into(),
            "staging".into(),
        ))
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    client
        .delete_variable(VariableScope::Project(5), "DB_HOST", "staging")
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn group_delete_sends_no_filter() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("DELETE", "/api/v4/groups/7/variables/DB_HOST")
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    client
        .delete_variable(VariableScope::Group(7), "DB_HOST", "staging")
        .await
        .unwrap();

    mock.assert_async().await;
}
