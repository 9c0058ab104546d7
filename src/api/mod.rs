//
//  gitlab-admin
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! Typed access to the GitLab REST API v4 for group, project and CI/CD
//! variable administration.
//!
//! ## Architecture
//!
//! - [`client`]: Core HTTP client with authentication and request handling
//! - [`common`]: Error type, soft-delete predicate and pagination
//! - [`resolver`]: Turns a group ID or name into an ID
//! - [`groups`], [`projects`], [`variables`]: Domain operations
//! - [`summary`]: Aggregated views built from the above
//! - [`progress`]: Observer for progress messages
//!
//! Every operation is a method on [`GitLabClient`] returning [`ApiResult`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use gitlab_admin::api::{GitLabClient, ListOrder};
//! use gitlab_admin::auth::AuthCredential;
//!
//! # async fn example() -> gitlab_admin::api::ApiResult<()> {
//! let client = GitLabClient::new("gitlab.com")?
//!     .with_auth(AuthCredential::personal_access_token("glpat-xxxx"));
//!
//! let groups = client.find_groups("platform", ListOrder::for_groups("name", "asc")).await?;
//! for group in groups {
//!     let projects = client
//!         .projects_in_group(&group.id.to_string(), true, ListOrder::default())
//!         .await?;
//!     println!("{}: {} projects", group.full_path, projects.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Errors are returned as [`ApiError`] variants:
//!
//! - `Unauthorized`: 401, the token was rejected
//! - `Status`: any other non-success status, with the response body
//! - `Deserialize`: an unexpected response shape
//! - `NotFound`: a name that matched no active group
//! - `Write`: a failed variable create or update

pub mod client;
pub mod common;
pub mod groups;
pub mod progress;
pub mod projects;
pub mod resolver;
pub mod summary;
pub mod variables;

pub use client::GitLabClient;
pub use common::{ApiError, ApiResult, ListOrder, OrderBy, SoftDeletable, SortDirection, WriteAction};
pub use groups::Group;
pub use progress::{ProgressObserver, TracingObserver};
pub use projects::{CreateProjectOptions, CreatedProject, Namespace, Project, User};
pub use resolver::{GroupLookup, GroupRef};
pub use summary::{GroupSummary, ProjectSummary};
pub use variables::{NewVariable, Variable, VariableScope, VariableType, ALL_ENVIRONMENTS};
