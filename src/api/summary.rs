//
//  gitlab-admin
//  api/summary.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Group and project summaries
//!
//! Summaries combine a lookup with counts from follow-up listings. A failed
//! count is reported as 0 and logged; only the primary lookup can fail the
//! summary.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::client::GitLabClient;
use super::common::{ApiError, ApiResult, ListOrder, SoftDeletable};
use super::projects::Project;
use super::variables::VariableScope;

/// Counts and identity of a group.
#[derive(Debug, Clone, Serialize)]
pub struct GroupSummary {
    pub id: u64,
    pub name: String,
    pub full_path: String,
    pub web_url: String,
    pub parent_id: Option<u64>,
    pub subgroup_count: usize,
    pub project_count: usize,
}

/// Identity, ownership and variable count of a project.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSummary {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub web_url: String,
    pub path: String,
    pub group_id: u64,
    pub group_name: String,
    pub variable_count: usize,
    pub created_at: Option<DateTime<Utc>>,
    pub last_activity_at: Option<DateTime<Utc>>,
    pub is_marked_for_deletion: bool,
}

impl ProjectSummary {
    fn from_project(project: &Project, variable_count: usize) -> Self {
        Self {
            id: project.id,
            name: project.name.clone(),
            description: project.description.clone().unwrap_or_default(),
            web_url: project.web_url.clone(),
            path: project.path.clone(),
            group_id: project.group_id(),
            group_name: project.group_name().unwrap_or_default().to_string(),
            variable_count,
            created_at: project.created_at,
            last_activity_at: project.last_activity_at,
            is_marked_for_deletion: project.is_marked_for_deletion(),
        }
    }
}

fn count_or_zero<T>(result: ApiResult<Vec<T>>, what: &str, id: u64) -> usize {
    match result {
        Ok(items) => items.len(),
        Err(err) => {
            tracing::warn!(id, error = %err, "could not count {}, reporting 0", what);
            0
        }
    }
}

impl GitLabClient {
    /// Summarizes the first group whose name, path or ID matches exactly.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotFound`] when no active group matches.
    pub async fn group_summary(&self, group: &str) -> ApiResult<GroupSummary> {
        self.observer()
            .message(&format!("Getting summary for group: {}", group));

        let found = self
            .find_groups(group, ListOrder::default())
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::NotFound(format!("Group '{}' not found", group)))?;

        let id = found.id.to_string();
        let subgroup_count = count_or_zero(
            self.get_subgroups(&id, ListOrder::default()).await,
            "subgroups",
            found.id,
        );
        let project_count = count_or_zero(
            self.projects_in_group(&id, false, ListOrder::for_projects("name", "asc"))
                .await,
            "projects",
            found.id,
        );

        let summary = GroupSummary {
            id: found.id,
            name: found.name,
            full_path: found.full_path,
            web_url: found.web_url,
            parent_id: found.parent_id,
            subgroup_count,
            project_count,
        };

        self.observer().message(&format!(
            "Group summary completed: {} ({} subgroups, {} projects)",
            summary.name, summary.subgroup_count, summary.project_count
        ));
        Ok(summary)
    }

    /// Summarizes a project by ID.
    pub async fn project_summary(&self, project_id: u64) -> ApiResult<ProjectSummary> {
        self.observer()
            .message(&format!("Getting summary for project ID: {}", project_id));

        let project = self.get_project(project_id).await?;
        let variable_count = count_or_zero(
            self.list_variables(VariableScope::Project(project_id)).await,
            "variables",
            project_id,
        );

        Ok(ProjectSummary::from_project(&project, variable_count))
    }

    /// Summarizes every active project in a group.
    pub async fn group_projects_summary(
        &self,
        group: &str,
        include_subgroups: bool,
    ) -> ApiResult<Vec<ProjectSummary>> {
        self.observer()
            .message(&format!("Getting project summaries for group: {}", group));

        let projects = self
            .projects_in_group(group, include_subgroups, ListOrder::for_projects("name", "asc"))
            .await?;

        let mut summaries = Vec::with_capacity(projects.len());
        for project in &projects {
            let variable_count = count_or_zero(
                self.list_variables(VariableScope::Project(project.id)).await,
                "variables",
                project.id,
            );
            summaries.push(ProjectSummary::from_project(project, variable_count));
        }

        self.observer().message(&format!(
            "Retrieved summaries for {} projects",
            summaries.len()
        ));
        Ok(summaries)
    }
}
