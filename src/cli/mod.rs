//
//  gitlab-admin
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod auth;
mod completion;
mod config;
mod group;
mod project;
mod seed;
mod variable;

pub use auth::AuthCommand;
pub use completion::CompletionCommand;
pub use config::ConfigCommand;
pub use group::GroupCommand;
pub use project::ProjectCommand;
pub use seed::SeedCommand;
pub use variable::VariableCommand;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::api::{GitLabClient, ProgressObserver};
use crate::auth::{resolve_token, AuthCredential};
use crate::config::{Config, DEFAULT_DOMAIN};
use crate::output::{OutputFormat, OutputWriter};

/// gla - administer GitLab groups, projects and CI/CD variables
#[derive(Parser, Debug)]
#[command(
    name = "gla",
    version,
    about = "Administer GitLab groups, projects and CI/CD variables",
    long_about = "gla is a CLI for GitLab administration.\n\n\
                  It lists and searches groups and projects, skipping anything marked for \
                  deletion, manages CI/CD variables, and seeds new projects from a template.",
    propagate_version = true,
    after_help = "Use 'gla <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Options accepted by every command.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// GitLab domain, e.g. gitlab.example.com
    #[arg(long, global = true, env = "GL_DOMAIN")]
    pub domain: Option<String>,

    /// Personal access token; overrides the stored credential
    #[arg(long, global = true, env = "GL_PAT", hide_env_values = true)]
    pub token: Option<String>,

    /// Namespace new projects are transferred to
    #[arg(long, global = true, env = "GL_NAMESPACE")]
    pub namespace: Option<String>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable interactive prompts
    #[arg(long, global = true, env = "GL_NO_PROMPT")]
    pub no_prompt: bool,

    /// Print progress messages as requests are made
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

impl GlobalOptions {
    /// Domain from `--domain`/`GL_DOMAIN`, then config, then gitlab.com.
    pub fn domain(&self, config: &Config) -> String {
        self.domain
            .clone()
            .or_else(|| config.core.domain.clone())
            .unwrap_or_else(|| DEFAULT_DOMAIN.to_string())
    }

    /// Namespace from `--namespace`/`GL_NAMESPACE`, then config.
    pub fn namespace(&self, config: &Config) -> Option<String> {
        self.namespace
            .clone()
            .or_else(|| config.core.namespace.clone())
            .filter(|ns| !ns.is_empty())
    }

    /// Whether prompts may be shown.
    pub fn prompts_allowed(&self, config: &Config) -> bool {
        !self.no_prompt && config.prompt_enabled() && crate::interactive::is_interactive()
    }

    pub fn output(&self) -> OutputWriter {
        if self.json {
            OutputWriter::new(OutputFormat::Json)
        } else {
            OutputWriter::new(OutputFormat::Table)
        }
    }

    /// Token from `--token`/`GL_PAT`, then the keyring.
    pub fn require_token(&self, config: &Config) -> Result<String> {
        let domain = self.domain(config);
        resolve_token(self.token.as_deref(), &domain)?.with_context(|| {
            format!(
                "Not logged in to {}. Run 'gla auth login' or set GL_PAT.",
                domain
            )
        })
    }

    /// Builds an authenticated client from flags, config and the keyring.
    pub fn client(&self, config: &Config) -> Result<GitLabClient> {
        let domain = self.domain(config);
        let token = self.require_token(config)?;

        let mut client = GitLabClient::new(&domain)
            .with_context(|| format!("Failed to create client for {}", domain))?
            .with_auth(AuthCredential::personal_access_token(token))
            .with_probe_concurrency(config.api.probe_concurrency);

        if self.verbose {
            client = client.with_observer(Arc::new(ConsoleObserver));
        }

        Ok(client)
    }
}

/// Writes progress messages to stderr, dimmed.
struct ConsoleObserver;

impl ProgressObserver for ConsoleObserver {
    fn message(&self, message: &str) {
        eprintln!("{}", console::style(message).dim());
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authenticate with GitLab
    #[command(visible_alias = "login")]
    Auth(AuthCommand),

    /// Find, search and list groups
    #[command(visible_alias = "g")]
    Group(GroupCommand),

    /// Create, view and transfer projects
    #[command(visible_alias = "proj")]
    Project(ProjectCommand),

    /// Manage CI/CD variables of a group or project
    #[command(visible_alias = "var")]
    Variable(VariableCommand),

    /// Create a project and seed it from a template repository
    Seed(SeedCommand),

    /// Manage configuration
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),

    /// Show version information
    Version,
}
