//
//  gitlab-admin
//  api/projects.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Project Operations
//!
//! Listing, lookup, creation and transfer of GitLab projects.
//!
//! ## Name Negotiation
//!
//! [`GitLabClient::create_project`] never fails because a name is taken. It
//! searches for a project with the same name (ignoring case) and, on a
//! collision, tells the caller and tries `{name}-1`, `{name}-2`, ... until a
//! free name is found. The check and the create are separate requests, so a
//! concurrent create can still win the race.
//!
//! ## Example
//!
//! ```rust,no_run
//! use gitlab_admin::api::{CreateProjectOptions, GitLabClient};
//!
//! # async fn example(client: &GitLabClient) -> gitlab_admin::api::ApiResult<()> {
//! let created = client
//!     .create_project("demo", &CreateProjectOptions::default(), |taken| {
//!         println!("{} exists, trying another name", taken);
//!     })
//!     .await?;
//! println!("created {} at {}", created.name, created.http_url_to_repo);
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::client::GitLabClient;
use super::common::{names_match, ApiResult, ListOrder, Lister, SoftDeletable, PER_PAGE};

/// The group or user namespace that owns a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Namespace {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub path: String,
    /// `"group"` or `"user"`
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub full_path: String,
}

/// A GitLab project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub path_with_namespace: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub web_url: String,
    #[serde(default)]
    pub http_url_to_repo: String,
    #[serde(default)]
    pub ssh_url_to_repo: String,
    #[serde(default)]
    pub namespace: Option<Namespace>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_activity_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub marked_for_deletion_at: Option<String>,
}

impl Project {
    /// ID of the owning namespace, or 0 when the API omitted it.
    pub fn group_id(&self) -> u64 {
        self.namespace.as_ref().map(|ns| ns.id).unwrap_or(0)
    }

    /// Name of the owning namespace, if known.
    pub fn group_name(&self) -> Option<&str> {
        self.namespace.as_ref().map(|ns| ns.name.as_str())
    }
}

impl SoftDeletable for Project {
    fn deletion_marker(&self) -> Option<&str> {
        self.marked_for_deletion_at.as_deref()
    }
}

/// The user that owns the API token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub web_url: String,
}

/// The fields callers need after creating a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedProject {
    pub id: u64,
    /// Final name, including any `-N` suffix
    pub name: String,
    #[serde(default)]
    pub http_url_to_repo: String,
    #[serde(default)]
    pub ssh_url_to_repo: String,
    #[serde(default)]
    pub path_with_namespace: String,
    #[serde(default)]
    pub web_url: String,
}

/// Optional settings for [`GitLabClient::create_project`].
#[derive(Debug, Clone, Default)]
pub struct CreateProjectOptions {
    /// Namespace (group) to create the project in; the token owner's
    /// namespace when `None`
    pub namespace_id: Option<u64>,
    /// Enables or disables shared runners; the instance default when `None`
    pub shared_runners_enabled: Option<bool>,
}

#[derive(Serialize)]
struct CreateProjectBody<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    shared_runners_enabled: Option<bool>,
}

#[derive(Serialize)]
struct TransferBody<'a> {
    namespace: &'a str,
}

impl GitLabClient {
    /// Lists the active projects of a group, optionally including subgroups.
    ///
    /// The group may be given by ID or name.
    pub async fn projects_in_group(
        &self,
        group: &str,
        include_subgroups: bool,
        order: ListOrder,
    ) -> ApiResult<Vec<Project>> {
        self.observer()
            .message(&format!("Retrieving projects for group {}...", group));

        let Some(group_id) = self.resolve_group_id(group).await? else {
            return Ok(Vec::new());
        };

        let projects = Lister::new(self, format!("/groups/{}/projects", group_id), "projects")
            .order(order)
            .param("include_subgroups", include_subgroups)
            .fetch_active(|_: &Project| true)
            .await?;

        self.observer().message(&format!(
            "Retrieved a total of {} active projects from group {}",
            projects.len(),
            group
        ));
        Ok(projects)
    }

    /// Fetches a project by ID (`GET /projects/{id}`).
    pub async fn get_project(&self, project_id: u64) -> ApiResult<Project> {
        self.get(&format!("/projects/{}", project_id), "project data")
            .await
    }

    /// Returns `true` if any project visible to the token has this name
    /// (ignoring case). Projects marked for deletion still count.
    pub async fn project_name_taken(&self, name: &str) -> ApiResult<bool> {
        let per_page = PER_PAGE.to_string();
        let candidates: Vec<Project> = self
            .get_query(
                "/projects",
                &[("search", name), ("per_page", per_page.as_str())],
                "projects data",
            )
            .await?;
        Ok(candidates.iter().any(|p| names_match(&p.name, name)))
    }

    /// Creates a project, appending `-N` to the name until it is free.
    ///
    /// `on_exists` is called with each name found to be taken.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Unauthorized`](super::ApiError::Unauthorized) when the token is rejected
    /// - [`ApiError::Status`](super::ApiError::Status) for any other failed request
    pub async fn create_project<F>(
        &self,
        name: &str,
        options: &CreateProjectOptions,
        mut on_exists: F,
    ) -> ApiResult<CreatedProject>
    where
        F: FnMut(&str),
    {
        let mut candidate = name.to_string();
        let mut suffix = 0u32;

        while self.project_name_taken(&candidate).await? {
            on_exists(&candidate);
            suffix += 1;
            candidate = format!("{}-{}", name, suffix);
        }

        self.observer()
            .message(&format!("Creating project {}...", candidate));

        let body = CreateProjectBody {
            name: &candidate,
            namespace_id: options.namespace_id,
            shared_runners_enabled: options.shared_runners_enabled,
        };
        let created: CreatedProject = self.post("/projects", &body, "project data").await?;

        tracing::info!(project_id = created.id, name = %created.name, "project created");
        Ok(created)
    }

    /// Moves a project to another namespace (`PUT /projects/{id}/transfer`).
    ///
    /// `namespace` is a namespace ID or full path.
    pub async fn transfer_project(&self, project_id: u64, namespace: &str) -> ApiResult<Project> {
        self.observer().message(&format!(
            "Transferring project {} to namespace {}...",
            project_id, namespace
        ));
        self.put(
            &format!("/projects/{}/transfer", project_id),
            &TransferBody { namespace },
            "project data",
        )
        .await
    }
}
