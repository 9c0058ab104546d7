//
//  gitlab-admin
//  api/groups.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Group Operations
//!
//! Exact-match lookup, substring search and subgroup enumeration for GitLab
//! groups. Every listing walks all pages and drops groups marked for
//! deletion.
//!
//! ## Example
//!
//! ```rust,no_run
//! use gitlab_admin::api::{GitLabClient, ListOrder};
//!
//! # async fn example(client: &GitLabClient) -> gitlab_admin::api::ApiResult<()> {
//! for group in client.get_subgroups("platform", ListOrder::default()).await? {
//!     println!("{} (nested: {})", group.full_path, group.has_subgroups);
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use super::client::GitLabClient;
use super::common::{names_match, ApiResult, ListOrder, Lister, SoftDeletable};
use super::resolver::{GroupLookup, GroupRef};

/// A GitLab group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: u64,
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub full_path: String,
    #[serde(default)]
    pub web_url: String,
    #[serde(default)]
    pub parent_id: Option<u64>,

    /// Filled in by [`GitLabClient::get_subgroups`]; the API does not return it.
    #[serde(default)]
    pub has_subgroups: bool,

    #[serde(default)]
    pub marked_for_deletion_on: Option<String>,
}

impl SoftDeletable for Group {
    fn deletion_marker(&self) -> Option<&str> {
        self.marked_for_deletion_on.as_deref()
    }
}

impl GitLabClient {
    /// Finds groups whose name or path equals `name_or_id` (ignoring case).
    ///
    /// A numeric input is first tried as an ID: an active group is returned
    /// alone, a group marked for deletion yields an empty list, and a 404
    /// falls through to the name search.
    pub async fn find_groups(&self, name_or_id: &str, order: ListOrder) -> ApiResult<Vec<Group>> {
        self.observer()
            .message(&format!("Finding groups with name or ID: {}...", name_or_id));

        if let GroupRef::Id(id) = GroupRef::parse(name_or_id) {
            match self.get_group(id).await? {
                GroupLookup::Found(group) => {
                    self.observer()
                        .message(&format!("Found 1 group with ID {}", id));
                    return Ok(vec![group]);
                }
                GroupLookup::MarkedForDeletion => return Ok(Vec::new()),
                GroupLookup::Missing => {}
            }
        }

        let wanted = name_or_id.trim();
        let groups = Lister::new(self, "/groups", "groups")
            .order(order)
            .param("search", wanted)
            .fetch_active(|g: &Group| names_match(&g.name, wanted) || names_match(&g.path, wanted))
            .await?;

        self.observer().message(&format!(
            "Found {} group(s) matching '{}'",
            groups.len(),
            wanted
        ));
        Ok(groups)
    }

    /// Returns every active group matching `pattern` as a substring.
    pub async fn search_groups(&self, pattern: &str, order: ListOrder) -> ApiResult<Vec<Group>> {
        self.observer()
            .message(&format!("Searching for groups matching pattern: {}...", pattern));

        let groups = Lister::new(self, "/groups", "search results")
            .order(order)
            .param("search", pattern)
            .fetch_active(|_: &Group| true)
            .await?;

        self.observer().message(&format!(
            "Found {} group(s) matching pattern '{}'",
            groups.len(),
            pattern
        ));
        Ok(groups)
    }

    /// Lists the active subgroups of a group, with `has_subgroups` filled in.
    ///
    /// The group may be given by ID or name. Each subgroup is probed with
    /// a one-item request, at most [`probe_concurrency`] at a time. A failed
    /// probe is logged and leaves the flag `false`. Results keep the API
    /// ordering.
    ///
    /// [`probe_concurrency`]: GitLabClient::probe_concurrency
    pub async fn get_subgroups(&self, group: &str, order: ListOrder) -> ApiResult<Vec<Group>> {
        self.observer()
            .message(&format!("Retrieving subgroups for group {}...", group));

        let Some(group_id) = self.resolve_group_id(group).await? else {
            return Ok(Vec::new());
        };

        let mut subgroups = Lister::new(self, format!("/groups/{}/subgroups", group_id), "subgroups")
            .order(order)
            .fetch_active(|_: &Group| true)
            .await?;

        self.observer().message(&format!(
            "Found {} active subgroups, checking for nested subgroups...",
            subgroups.len()
        ));
        self.populate_has_subgroups(&mut subgroups).await;

        self.observer().message(&format!(
            "Retrieved a total of {} active subgroups",
            subgroups.len()
        ));
        Ok(subgroups)
    }

    /// Returns `true` if the group has at least one active subgroup.
    pub async fn has_active_subgroups(&self, group_id: u64) -> ApiResult<bool> {
        let children: Vec<Group> = self
            .get_query(
                &format!("/groups/{}/subgroups", group_id),
                &[("per_page", "1")],
                "subgroups data",
            )
            .await?;
        Ok(children.iter().any(|g| !g.is_marked_for_deletion()))
    }

    async fn populate_has_subgroups(&self, groups: &mut [Group]) {
        if groups.is_empty() {
            return;
        }

        let semaphore = Arc::new(Semaphore::new(self.probe_concurrency()));
        let mut probes = JoinSet::new();

        for (index, group) in groups.iter().enumerate() {
            let client = self.clone();
            let semaphore = Arc::clone(&semaphore);
            let group_id = group.id;

            probes.spawn(async move {
                let _permit = match semaphore.acquire().await {
                    Ok(permit) => permit,
                    Err(_) => return (index, group_id, Ok(false)),
                };
                (index, group_id, client.has_active_subgroups(group_id).await)
            });
        }

        while let Some(joined) = probes.join_next().await {
            match joined {
                Ok((index, _, Ok(nested))) => groups[index].has_subgroups = nested,
                Ok((_, group_id, Err(err))) => {
                    tracing::warn!(group_id, error = %err, "has-subgroups probe failed, assuming none");
                }
                Err(err) => {
                    tracing::warn!(error = %err, "has-subgroups probe task did not complete");
                }
            }
        }
    }
}
