//
//  gitlab-admin
//  cli/variable.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CI/CD variable commands.
//!
//! Every subcommand targets exactly one scope: `--group <name|id>` or
//! `--project <id>`.

use anyhow::{bail, Context, Result};
use clap::{ArgGroup, Args, Subcommand};

use crate::api::{GitLabClient, NewVariable, Variable, VariableScope, VariableType, ALL_ENVIRONMENTS};
use crate::config::Config;
use crate::output::{format_bool, print_field, print_header, OutputWriter, TableOutput, TableRow};

use super::GlobalOptions;

/// Manage CI/CD variables of a group or project
#[derive(Args, Debug)]
pub struct VariableCommand {
    #[command(subcommand)]
    pub command: VariableSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum VariableSubcommand {
    /// List variables
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show one variable
    Get(GetArgs),

    /// Create a variable, or update it if the key exists
    Set(SetArgs),

    /// Delete a variable
    #[command(visible_alias = "rm")]
    Delete(DeleteArgs),
}

/// Which group or project the variable belongs to.
#[derive(Args, Debug, Clone)]
#[command(group(ArgGroup::new("scope").required(true).args(["group", "project"])))]
pub struct ScopeArgs {
    /// Group name or numeric ID
    #[arg(long)]
    pub group: Option<String>,

    /// Project ID
    #[arg(long)]
    pub project: Option<u64>,
}

impl ScopeArgs {
    async fn resolve(&self, client: &GitLabClient) -> Result<VariableScope> {
        match (&self.group, self.project) {
            (_, Some(id)) => Ok(VariableScope::Project(id)),
            (Some(group), None) => match client.resolve_group_id(group).await? {
                Some(id) => Ok(VariableScope::Group(id)),
                None => bail!("Group '{}' is marked for deletion", group),
            },
            (None, None) => bail!("Pass --group or --project"),
        }
    }
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub scope: ScopeArgs,

    /// Print values instead of hiding them
    #[arg(long)]
    pub show_values: bool,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Variable key
    pub key: String,

    #[command(flatten)]
    pub scope: ScopeArgs,

    /// Environment scope of the variable
    #[arg(long, short = 'e', default_value = ALL_ENVIRONMENTS)]
    pub environment_scope: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Variable key
    pub key: String,

    /// Variable value
    pub value: String,

    #[command(flatten)]
    pub scope: ScopeArgs,

    /// Variable type: env_var or file
    #[arg(long = "type", short = 't', default_value = "env_var")]
    pub variable_type: VariableType,

    /// Only expose the variable to protected branches and tags
    #[arg(long)]
    pub protected: bool,

    /// Mask the value in job logs (project variables, needs variables.send_masked)
    #[arg(long)]
    pub masked: bool,

    /// Environment scope of the variable
    #[arg(long, short = 'e', default_value = ALL_ENVIRONMENTS)]
    pub environment_scope: String,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Variable key
    pub key: String,

    #[command(flatten)]
    pub scope: ScopeArgs,

    /// Environment scope of the variable
    #[arg(long, short = 'e', default_value = ALL_ENVIRONMENTS)]
    pub environment_scope: String,
}

impl VariableCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;
        let client = global.client(&config)?;
        let writer = global.output();

        match &self.command {
            VariableSubcommand::List(args) => {
                let scope = args.scope.resolve(&client).await?;
                let variables = client
                    .list_variables(scope)
                    .await
                    .with_context(|| format!("Failed to list variables of {}", scope))?;
                let rows: Vec<VariableRow> = variables
                    .into_iter()
                    .map(|variable| VariableRow::new(variable, args.show_values))
                    .collect();
                writer.write_list(&rows, &format!("No variables in {}", scope))
            }
            VariableSubcommand::Get(args) => {
                let scope = args.scope.resolve(&client).await?;
                match client
                    .get_variable(scope, &args.key, &args.environment_scope)
                    .await
                    .with_context(|| format!("Failed to get variable {}", args.key))?
                {
                    Some(variable) => writer.write(&variable),
                    None => bail!("Variable {} not found in {}", args.key, scope),
                }
            }
            VariableSubcommand::Set(args) => {
                let scope = args.scope.resolve(&client).await?;
                let masked = effective_masked(args.masked, scope, &config, &writer);
                let variable = NewVariable::new(&args.key, &args.value)
                    .variable_type(args.variable_type)
                    .protected(args.protected)
                    .masked(masked)
                    .environment_scope(&args.environment_scope);

                let saved = client
                    .create_or_update_variable(scope, &variable)
                    .await
                    .with_context(|| format!("Failed to save variable {} in {}", args.key, scope))?;

                if global.json {
                    writer.write(&saved)
                } else {
                    writer.write_success(&format!("Saved {} in {}", saved.key, scope));
                    Ok(())
                }
            }
            VariableSubcommand::Delete(args) => {
                let scope = args.scope.resolve(&client).await?;
                client
                    .delete_variable(scope, &args.key, &args.environment_scope)
                    .await
                    .with_context(|| format!("Failed to delete variable {} from {}", args.key, scope))?;
                writer.write_success(&format!("Deleted {} from {}", args.key, scope));
                Ok(())
            }
        }
    }
}

/// Whether `--masked` is actually sent.
fn effective_masked(requested: bool, scope: VariableScope, config: &Config, writer: &OutputWriter) -> bool {
    if !requested {
        return false;
    }
    match scope {
        VariableScope::Group(_) => {
            writer.write_warning("--masked is ignored for group variables");
            false
        }
        VariableScope::Project(_) if !config.variables.send_masked => {
            writer.write_warning(
                "--masked is ignored; run 'gla config set variables.send_masked true' to send it",
            );
            false
        }
        VariableScope::Project(_) => true,
    }
}

/// A list row that hides the value unless asked.
const HIDDEN_VALUE: &str = "********";

/// A listed variable. The value is replaced unless `--show-values` is given,
/// in table and JSON output alike.
#[derive(Debug, serde::Serialize)]
struct VariableRow {
    key: String,
    value: String,
    variable_type: VariableType,
    protected: bool,
    masked: bool,
    environment_scope: String,
}

impl VariableRow {
    fn new(variable: Variable, show_value: bool) -> Self {
        Self {
            value: if show_value {
                variable.value
            } else {
                HIDDEN_VALUE.to_string()
            },
            key: variable.key,
            variable_type: variable.variable_type,
            protected: variable.protected,
            masked: variable.masked,
            environment_scope: variable.environment_scope,
        }
    }
}

impl TableRow for VariableRow {
    fn headers() -> &'static [&'static str] {
        &["KEY", "VALUE", "TYPE", "ENVIRONMENT", "PROTECTED", "MASKED"]
    }

    fn cells(&self, color: bool) -> Vec<String> {
        vec![
            self.key.clone(),
            self.value.clone(),
            self.variable_type.to_string(),
            self.environment_scope.clone(),
            format_bool(self.protected, color),
            format_bool(self.masked, color),
        ]
    }
}

impl TableOutput for Variable {
    fn print_table(&self, color: bool) {
        print_header(&self.key);
        print_field("Value", &self.value, color);
        print_field("Type", self.variable_type.as_str(), color);
        print_field("Environment", &self.environment_scope, color);
        print_field("Protected", &format_bool(self.protected, color), color);
        print_field("Masked", &format_bool(self.masked, color), color);
    }
}
