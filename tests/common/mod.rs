//
//  gitlab-admin
//  tests/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use gitlab_admin::api::GitLabClient;
use gitlab_admin::auth::AuthCredential;
use mockito::ServerGuard;
use serde_json::{json, Value};

/// A client pointed at the mock server's `/api/v4`.
pub fn client_for(server: &ServerGuard) -> GitLabClient {
    GitLabClient::with_base_url(&format!("{}/api/v4", server.url()))
        .unwrap()
        .with_auth(AuthCredential::personal_access_token("glpat-test"))
}

/// A client that also records every progress message.
pub fn recording_client(server: &ServerGuard) -> (GitLabClient, Arc<Mutex<Vec<String>>>) {
    let messages = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&messages);
    let client = client_for(server).with_observer(Arc::new(move |msg: &str| {
        sink.lock().unwrap().push(msg.to_string());
    }));
    (client, messages)
}

pub fn group(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "path": name.to_lowercase(),
        "full_path": format!("acme/{}", name.to_lowercase()),
        "web_url": format!("https://gitlab.example.com/groups/acme/{}", name.to_lowercase()),
        "parent_id": null,
    })
}

pub fn deleted_group(id: u64, name: &str) -> Value {
    let mut g = group(id, name);
    g["marked_for_deletion_on"] = json!("2026-10-01");
    g
}

pub fn project(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "path": name.to_lowercase(),
        "path_with_namespace": format!("acme/{}", name.to_lowercase()),
        "web_url": format!("https://gitlab.example.com/acme/{}", name.to_lowercase()),
        "http_url_to_repo": format!("https://gitlab.example.com/acme/{}.git", name.to_lowercase()),
        "ssh_url_to_repo": format!("git@gitlab.example.com:acme/{}.git", name.to_lowercase()),
        "namespace": { "id": 10, "name": "acme", "path": "acme", "kind": "group", "full_path": "acme" },
    })
}

pub fn deleted_project(id: u64, name: &str) -> Value {
    let mut p = project(id, name);
    p["marked_for_deletion_at"] = json!("2026-10-01");
    p
}

/// `count` active groups with IDs starting at `first_id`, as a JSON array.
pub fn group_page(first_id: u64, count: u64) -> String {
    let items: Vec<Value> = (first_id..first_id + count)
        .map(|id| group(id, &format!("group-{}", id)))
        .collect();
    Value::Array(items).to_string()
}

pub fn variable(key: &str, value: &str, scope: &str) -> Value {
    json!({
        "key": key,
        "value": value,
        "variable_type": "env_var",
        "protected": false,
        "masked": false,
        "environment_scope": scope,
    })
}
