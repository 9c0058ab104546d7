//
//  gitlab-admin
//  tests/projects.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

mod common;

use gitlab_admin::api::{ApiError, CreateProjectOptions, ListOrder};
use mockito::Matcher;
use serde_json::json;

use common::{client_for, deleted_project, group, project};

async fn name_probe(server: &mut mockito::ServerGuard, name: &str, body: serde_json::Value) -> mockito::Mock {
    server
        .mock("GET", "/api/v4/projects")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("search".into(), name.into()),
            Matcher::UrlEncoded("per_page".into(), "100".into()),
        ]))
        .with_body(body.to_string())
        .expect(1)
        .create_async()
        .await
}

#[tokio::test]
async fn create_appends_suffix_until_name_is_free() {
    let mut server = mockito::Server::new_async().await;

    let probes = vec![
        name_probe(&mut server, "demo", json!([project(1, "Demo"), project(2, "demo-app")])).await,
        name_probe(&mut server, "demo-1", json!([project(3, "demo-1")])).await,
        name_probe(&mut server, "demo-2", json!([project(4, "demo-20")])).await,
    ];
    let create = server
        .mock("POST", "/api/v4/projects")
        .match_body(Matcher::PartialJson(json!({ "name": "demo-2", "namespace_id": 10 })))
        .with_status(201)
        .with_body(project(5, "demo-2").to_string())
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let options = CreateProjectOptions {
        namespace_id: Some(10),
        shared_runners_enabled: None,
    };

    let mut taken = Vec::new();
    let created = client
        .create_project("demo", &options, |name| taken.push(name.to_string()))
        .await
        .unwrap();

    assert_eq!(created.id, 5);
    assert_eq!(created.name, "demo-2");
    assert_eq!(created.http_url_to_repo, "https://gitlab.example.com/acme/demo-2.git");
    assert_eq!(taken, vec!["demo", "demo-1"]);
    for probe in &probes {
        probe.assert_async().await;
    }
    create.assert_async().await;
}

#[tokio::test]
async fn soft_deleted_projects_still_hold_their_name() {
    let mut server = mockito::Server::new_async().await;

    let _taken = name_probe(&mut server, "api", json!([deleted_project(1, "api")])).await;
    let _free = name_probe(&mut server, "api-1", json!([])).await;
    server
        .mock("POST", "/api/v4/projects")
        .match_body(Matcher::PartialJson(json!({ "name": "api-1" })))
        .with_status(201)
        .with_body(project(2, "api-1").to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let created = client
        .create_project("api", &CreateProjectOptions::default(), |_| {})
        .await
        .unwrap();

    assert_eq!(created.name, "api-1");
}

#[tokio::test]
async fn create_with_rejected_token_is_unauthorized() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/api/v4/projects")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"message":"401 Unauthorized"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .create_project("demo", &CreateProjectOptions::default(), |_| {})
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized(_)));
}

#[tokio::test]
async fn create_failure_carries_status_and_body() {
    let mut server = mockito::Server::new_async().await;

    let _free = name_probe(&mut server, "demo", json!([])).await;
    server
        .mock("POST", "/api/v4/projects")
        .with_status(400)
        .with_body(r#"{"message":{"name":["has already been taken"]}}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .create_project("demo", &CreateProjectOptions::default(), |_| {})
        .await
        .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("400"));
    assert!(message.contains("has already been taken"));
}

#[tokio::test]
async fn projects_in_group_skip_soft_deleted_and_pass_options() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/api/v4/groups")
        .match_query(Matcher::UrlEncoded("search".into(), "acme".into()))
        .with_body(json!([group(10, "acme")]).to_string())
        .create_async()
        .await;
    let listing = server
        .mock("GET", "/api/v4/groups/10/projects")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("include_subgroups".into(), "true".into()),
            Matcher::UrlEncoded("order_by".into(), "last_activity_at".into()),
            Matcher::UrlEncoded("sort".into(), "desc".into()),
            Matcher::UrlEncoded("page".into(), "1".into()),
        ]))
        .with_body(
            json!([
                project(1, "api"),
                deleted_project(2, "legacy"),
                project(3, "web"),
            ])
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let projects = client
        .projects_in_group("acme", true, ListOrder::for_projects("Last_Activity_At", "desc"))
        .await
        .unwrap();

    let names: Vec<&str> = projects.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["api", "web"]);
    assert_eq!(projects[0].group_id(), 10);
    assert_eq!(projects[0].group_name(), Some("acme"));
    listing.assert_async().await;
}

#[tokio::test]
async fn transfer_sends_target_namespace() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("PUT", "/api/v4/projects/5/transfer")
        .match_header("authorization", "Bearer glpat-test")
        .match_body(Matcher::Json(json!({ "namespace": "platform/services" })))
        .with_body(project(5, "demo").to_string())
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let moved = client.transfer_project(5, "platform/services").await.unwrap();

    assert_eq!(moved.id, 5);
    mock.assert_async().await;
}

#[tokio::test]
async fn project_summary_counts_variables() {
    let mut server = mockito::Server::new_async().await;

    let mut described = project(5, "demo");
    described["description"] = json!("Demo service");
    server
        .mock("GET", "/api/v4/projects/5")
        .with_body(described.to_string())
        .create_async()
        .await;
    server
        .mock("GET", "/api/v4/projects/5/variables")
        .match_query(Matcher::Any)
        .with_body(
            json!([
                common::variable("A", "1", "*"),
                common::variable("B", "2", "production"),
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let summary = client.project_summary(5).await.unwrap();

    assert_eq!(summary.variable_count, 2);
    assert_eq!(summary.description, "Demo service");
    assert_eq!(summary.group_name, "acme");
    assert!(!summary.is_marked_for_deletion);
}
