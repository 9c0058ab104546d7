//
//  gitlab-admin
//  cli/group.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Group commands

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::api::{Group, GroupSummary, ListOrder};
use crate::config::Config;
use crate::output::{format_bool, print_field, print_header, TableOutput, TableRow};

use super::GlobalOptions;

/// Find, search and list groups
#[derive(Args, Debug)]
pub struct GroupCommand {
    #[command(subcommand)]
    pub command: GroupSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum GroupSubcommand {
    /// Find active groups by exact name (case-insensitive) or numeric ID
    Find(FindArgs),

    /// Search active groups whose name contains a pattern
    Search(SearchArgs),

    /// List the active direct subgroups of a group
    Subgroups(SubgroupsArgs),

    /// List the active projects of a group
    Projects(ProjectsArgs),

    /// Show a group with its subgroup and project counts
    Summary(SummaryArgs),
}

/// Sort options shared by group listings.
#[derive(Args, Debug, Clone)]
pub struct GroupOrderArgs {
    /// Field to order by: id, name, path or created_at
    #[arg(long, default_value = "name")]
    pub order_by: String,

    /// Sort direction: asc or desc
    #[arg(long, default_value = "asc")]
    pub sort: String,
}

impl GroupOrderArgs {
    fn list_order(&self) -> ListOrder {
        ListOrder::for_groups(&self.order_by, &self.sort)
    }
}

#[derive(Args, Debug)]
pub struct FindArgs {
    /// Group name or numeric ID
    pub group: String,

    #[command(flatten)]
    pub order: GroupOrderArgs,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Text the group name must contain
    pub pattern: String,

    #[command(flatten)]
    pub order: GroupOrderArgs,
}

#[derive(Args, Debug)]
pub struct SubgroupsArgs {
    /// Parent group name or numeric ID
    pub group: String,

    #[command(flatten)]
    pub order: GroupOrderArgs,
}

#[derive(Args, Debug)]
pub struct ProjectsArgs {
    /// Group name or numeric ID
    pub group: String,

    /// Include projects of all descendant subgroups
    #[arg(long)]
    pub include_subgroups: bool,

    /// Field to order by: id, name, path, created_at, updated_at or last_activity_at
    #[arg(long, default_value = "name")]
    pub order_by: String,

    /// Sort direction: asc or desc
    #[arg(long, default_value = "asc")]
    pub sort: String,
}

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Group name or numeric ID
    pub group: String,
}

impl GroupCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;
        let client = global.client(&config)?;
        let writer = global.output();

        match &self.command {
            GroupSubcommand::Find(args) => {
                let groups = client
                    .find_groups(&args.group, args.order.list_order())
                    .await
                    .with_context(|| format!("Failed to find group '{}'", args.group))?;
                writer.write_list(&groups, &format!("No active group matches '{}'", args.group))
            }
            GroupSubcommand::Search(args) => {
                let groups = client
                    .search_groups(&args.pattern, args.order.list_order())
                    .await
                    .with_context(|| format!("Failed to search groups for '{}'", args.pattern))?;
                writer.write_list(&groups, &format!("No active groups contain '{}'", args.pattern))
            }
            GroupSubcommand::Subgroups(args) => {
                let groups = client
                    .get_subgroups(&args.group, args.order.list_order())
                    .await
                    .with_context(|| format!("Failed to list subgroups of '{}'", args.group))?;
                writer.write_list(&groups, &format!("Group '{}' has no active subgroups", args.group))
            }
            GroupSubcommand::Projects(args) => {
                let order = ListOrder::for_projects(&args.order_by, &args.sort);
                let projects = client
                    .projects_in_group(&args.group, args.include_subgroups, order)
                    .await
                    .with_context(|| format!("Failed to list projects of '{}'", args.group))?;
                writer.write_list(&projects, &format!("Group '{}' has no active projects", args.group))
            }
            GroupSubcommand::Summary(args) => {
                let summary = client
                    .group_summary(&args.group)
                    .await
                    .with_context(|| format!("Failed to summarize group '{}'", args.group))?;
                writer.write(&summary)
            }
        }
    }
}

impl TableRow for Group {
    fn headers() -> &'static [&'static str] {
        &["ID", "NAME", "FULL PATH", "PARENT", "SUBGROUPS"]
    }

    fn cells(&self, color: bool) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.full_path.clone(),
            self.parent_id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
            format_bool(self.has_subgroups, color),
        ]
    }
}

impl TableOutput for GroupSummary {
    fn print_table(&self, color: bool) {
        print_header(&self.full_path);
        print_field("ID", &self.id.to_string(), color);
        print_field("Name", &self.name, color);
        print_field(
            "Parent",
            &self.parent_id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
            color,
        );
        print_field("Subgroups", &self.subgroup_count.to_string(), color);
        print_field("Projects", &self.project_count.to_string(), color);
        print_field("URL", &self.web_url, color);
    }
}
