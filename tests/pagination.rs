//
//  gitlab-admin
//  tests/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

mod common;

use gitlab_admin::api::{ApiError, ListOrder};
use mockito::Matcher;
use serde_json::json;

use common::{client_for, deleted_group, group, group_page, recording_client};

#[tokio::test]
async fn walks_pages_until_a_short_page() {
    let mut server = mockito::Server::new_async().await;

    let mut mocks = Vec::new();
    for (page, first, count) in [(1, 1, 100), (2, 101, 100), (3, 201, 37)] {
        mocks.push(
            server
                .mock("GET", "/api/v4/groups")
                .match_query(Matcher::AllOf(vec![
                    Matcher::UrlEncoded("page".into(), page.to_string()),
                    Matcher::UrlEncoded("per_page".into(), "100".into()),
                    Matcher::UrlEncoded("search".into(), "group".into()),
                ]))
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(group_page(first, count))
                .expect(1)
                .create_async()
                .await,
        );
    }

    let (client, messages) = recording_client(&server);
    let groups = client.search_groups("group", ListOrder::default()).await.unwrap();

    assert_eq!(groups.len(), 237);
    assert_eq!(groups[0].id, 1);
    assert_eq!(groups[236].id, 237);
    for mock in &mocks {
        mock.assert_async().await;
    }

    let messages = messages.lock().unwrap();
    assert!(messages.iter().any(|m| m == "Fetching page 3 of search results..."));
}

#[tokio::test]
async fn soft_deleted_entries_are_dropped_across_pages() {
    let mut server = mockito::Server::new_async().await;

    let deleted = [5, 150, 160, 237];
    for (page, first, count) in [(1u64, 1u64, 100u64), (2, 101, 100), (3, 201, 37)] {
        let items: Vec<serde_json::Value> = (first..first + count)
            .map(|id| {
                let name = format!("group-{}", id);
                if deleted.contains(&id) {
                    deleted_group(id, &name)
                } else {
                    group(id, &name)
                }
            })
            .collect();
        server
            .mock("GET", "/api/v4/groups")
            .match_query(Matcher::UrlEncoded("page".into(), page.to_string()))
            .with_body(serde_json::Value::Array(items).to_string())
            .expect(1)
            .create_async()
            .await;
    }

    let client = client_for(&server);
    let groups = client.search_groups("group", ListOrder::default()).await.unwrap();

    assert_eq!(groups.len(), 237 - deleted.len());
    assert!(groups.iter().all(|g| !deleted.contains(&g.id)));
    assert_eq!(groups.last().map(|g| g.id), Some(236));
}

#[tokio::test]
async fn total_pages_header_stops_after_last_full_page() {
    let mut server = mockito::Server::new_async().await;

    let first = server
        .mock("GET", "/api/v4/groups")
        .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
        .with_header("x-total-pages", "2")
        .with_body(group_page(1, 100))
        .expect(1)
        .create_async()
        .await;
    let second = server
        .mock("GET", "/api/v4/groups")
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .with_header("x-total-pages", "2")
        .with_body(group_page(101, 100))
        .expect(1)
        .create_async()
        .await;
    let third = server
        .mock("GET", "/api/v4/groups")
        .match_query(Matcher::UrlEncoded("page".into(), "3".into()))
        .with_body("[]")
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server);
    let groups = client.search_groups("group", ListOrder::default()).await.unwrap();

    assert_eq!(groups.len(), 200);
    first.assert_async().await;
    second.assert_async().await;
    third.assert_async().await;
}

#[tokio::test]
async fn failure_on_a_later_page_discards_everything() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/api/v4/groups")
        .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
        .with_body(group_page(1, 100))
        .create_async()
        .await;
    server
        .mock("GET", "/api/v4/groups")
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .search_groups("group", ListOrder::default())
        .await
        .unwrap_err();

    match err {
        ApiError::Status { status, body } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "boom");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn soft_deleted_groups_are_never_listed() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/api/v4/groups")
        .match_query(Matcher::Any)
        .with_body(
            json!([
                group(1, "platform"),
                deleted_group(2, "platform-old"),
                group(3, "platform-tools"),
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let groups = client
        .search_groups("platform", ListOrder::default())
        .await
        .unwrap();

    let ids: Vec<u64> = groups.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[tokio::test]
async fn invalid_order_falls_back_to_name_asc() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/api/v4/groups")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("order_by".into(), "name".into()),
            Matcher::UrlEncoded("sort".into(), "asc".into()),
        ]))
        .with_body("[]")
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let groups = client
        .search_groups("x", ListOrder::for_groups("bogus", "up"))
        .await
        .unwrap();

    assert!(groups.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn valid_order_is_sent_lowercase() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/api/v4/groups")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("order_by".into(), "id".into()),
            Matcher::UrlEncoded("sort".into(), "desc".into()),
        ]))
        .with_body("[]")
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    client
        .search_groups("x", ListOrder::for_groups("ID", "DESC"))
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn unauthorized_token_is_reported_as_such() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/api/v4/groups")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"message":"401 Unauthorized"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .search_groups("x", ListOrder::default())
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn undecodable_body_is_a_deserialize_error() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/api/v4/groups")
        .match_query(Matcher::Any)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .search_groups("x", ListOrder::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Deserialize { .. }));
}
