//
//  gitlab-admin
//  cli/project.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Project commands

use anyhow::{bail, Context, Result};
use clap::{ArgGroup, Args, Subcommand};

use crate::api::{CreateProjectOptions, CreatedProject, Project, ProjectSummary};
use crate::config::Config;
use crate::output::{format_bool, print_field, print_header, TableOutput, TableRow};
use crate::util::{format_relative_time, truncate};

use super::GlobalOptions;

/// Create, view and transfer projects
#[derive(Args, Debug)]
pub struct ProjectCommand {
    #[command(subcommand)]
    pub command: ProjectSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ProjectSubcommand {
    /// Create a project, adding a -N suffix when the name is taken
    Create(CreateArgs),

    /// Show a project
    View(ViewArgs),

    /// Move a project to another namespace
    Transfer(TransferArgs),

    /// Summarize one project, or every active project of a group
    Summary(SummaryArgs),
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Project name
    pub name: String,

    /// Numeric ID of the namespace (group) to create the project in
    #[arg(long)]
    pub namespace_id: Option<u64>,

    /// Enable or disable shared runners
    #[arg(long)]
    pub shared_runners: Option<bool>,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Project ID
    pub id: u64,
}

#[derive(Args, Debug)]
pub struct TransferArgs {
    /// Project ID
    pub id: u64,

    /// Target namespace ID or full path; defaults to --namespace / core.namespace
    #[arg(long = "to")]
    pub target: Option<String>,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("target").required(true).args(["id", "group"])))]
pub struct SummaryArgs {
    /// Project ID
    pub id: Option<u64>,

    /// Summarize all active projects of this group (name or ID)
    #[arg(long)]
    pub group: Option<String>,

    /// With --group, include projects of descendant subgroups
    #[arg(long, requires = "group")]
    pub include_subgroups: bool,
}

impl ProjectCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;
        let client = global.client(&config)?;
        let writer = global.output();

        match &self.command {
            ProjectSubcommand::Create(args) => {
                let options = CreateProjectOptions {
                    namespace_id: args.namespace_id,
                    shared_runners_enabled: args.shared_runners,
                };
                let created = client
                    .create_project(&args.name, &options, |taken| {
                        writer.write_warning(&format!(
                            "Project '{}' already exists, trying another name",
                            taken
                        ));
                    })
                    .await
                    .with_context(|| format!("Failed to create project '{}'", args.name))?;
                writer.write(&created)
            }
            ProjectSubcommand::View(args) => {
                let project = client
                    .get_project(args.id)
                    .await
                    .with_context(|| format!("Failed to get project {}", args.id))?;
                writer.write(&project)
            }
            ProjectSubcommand::Transfer(args) => {
                let Some(target) = args.target.clone().or_else(|| global.namespace(&config)) else {
                    bail!("No target namespace; pass --to or set core.namespace");
                };
                let project = client
                    .transfer_project(args.id, &target)
                    .await
                    .with_context(|| format!("Failed to transfer project {} to {}", args.id, target))?;
                if global.json {
                    writer.write(&project)
                } else {
                    writer.write_success(&format!(
                        "Transferred {} to {}",
                        project.name, project.path_with_namespace
                    ));
                    Ok(())
                }
            }
            ProjectSubcommand::Summary(args) => match (&args.group, args.id) {
                (Some(group), _) => {
                    let summaries = client
                        .group_projects_summary(group, args.include_subgroups)
                        .await
                        .with_context(|| format!("Failed to summarize projects of '{}'", group))?;
                    writer.write_list(&summaries, &format!("Group '{}' has no active projects", group))
                }
                (None, Some(id)) => {
                    let summary = client
                        .project_summary(id)
                        .await
                        .with_context(|| format!("Failed to summarize project {}", id))?;
                    writer.write(&summary)
                }
                (None, None) => bail!("Pass a project ID or --group"),
            },
        }
    }
}

impl TableRow for Project {
    fn headers() -> &'static [&'static str] {
        &["ID", "NAME", "PATH", "LAST ACTIVITY"]
    }

    fn cells(&self, _color: bool) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.path_with_namespace.clone(),
            self.last_activity_at
                .map(format_relative_time)
                .unwrap_or_else(|| "-".to_string()),
        ]
    }
}

impl TableOutput for Project {
    fn print_table(&self, color: bool) {
        print_header(&self.path_with_namespace);
        print_field("ID", &self.id.to_string(), color);
        print_field("Name", &self.name, color);
        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            print_field("Description", description, color);
        }
        if let Some(namespace) = &self.namespace {
            print_field("Namespace", &format!("{} ({})", namespace.full_path, namespace.id), color);
        }
        print_field("URL", &self.web_url, color);
        print_field("HTTP clone", &self.http_url_to_repo, color);
        print_field("SSH clone", &self.ssh_url_to_repo, color);
        if let Some(created) = self.created_at {
            print_field("Created", &format_relative_time(created), color);
        }
        if let Some(activity) = self.last_activity_at {
            print_field("Last activity", &format_relative_time(activity), color);
        }
    }
}

impl TableOutput for CreatedProject {
    fn print_table(&self, color: bool) {
        print_header(&format!("Created {}", self.name));
        print_field("ID", &self.id.to_string(), color);
        print_field("Path", &self.path_with_namespace, color);
        print_field("URL", &self.web_url, color);
        print_field("HTTP clone", &self.http_url_to_repo, color);
        print_field("SSH clone", &self.ssh_url_to_repo, color);
    }
}

impl TableRow for ProjectSummary {
    fn headers() -> &'static [&'static str] {
        &["ID", "NAME", "GROUP", "VARIABLES", "DESCRIPTION"]
    }

    fn cells(&self, _color: bool) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.group_name.clone(),
            self.variable_count.to_string(),
            truncate(&self.description, 40),
        ]
    }
}

impl TableOutput for ProjectSummary {
    fn print_table(&self, color: bool) {
        print_header(&self.name);
        print_field("ID", &self.id.to_string(), color);
        print_field("Path", &self.path, color);
        print_field("Group", &format!("{} ({})", self.group_name, self.group_id), color);
        print_field("Variables", &self.variable_count.to_string(), color);
        print_field("Deletion pending", &format_bool(self.is_marked_for_deletion, color), color);
        print_field("URL", &self.web_url, color);
        if !self.description.is_empty() {
            print_field("Description", &self.description, color);
        }
    }
}

