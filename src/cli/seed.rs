//
//  gitlab-admin
//  cli/seed.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! `gla seed`: create a project and fill it from a template repository.
//!
//! Steps, in order:
//!
//! 1. Create the project, appending `-N` until the name is free
//! 2. Clone the template into a temporary folder
//! 3. Clone the new project, add a README and push it to `main`
//! 4. Copy the template files (without `.git`) into the project
//! 5. Commit and push on the chosen branch (empty means mainline)
//! 6. Remove the temporary folder
//! 7. Transfer the project to the configured namespace, if any

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::api::CreateProjectOptions;
use crate::config::Config;
use crate::git::GitRunner;
use crate::interactive::{
    prompt_confirm_with_default, prompt_input, prompt_input_optional, prompt_input_with_default,
};
use crate::util::{copy_tree, create_file_with_content, remove_dir_if_exists, replace_placeholder_in_file};

use super::GlobalOptions;

const CI_FILE: &str = ".gitlab-ci.yml";
const WORKLOAD_KEY: &str = "TF_VAR_TFE_WORKSPACE_NAME";
const WORKLOAD_PLACEHOLDER: &str = "\"<enter-workload-name>\"";

/// Create a project and seed it from a template repository
#[derive(Args, Debug)]
pub struct SeedCommand {
    /// Name of the new project
    #[arg(long)]
    pub name: Option<String>,

    /// Template repository URL
    #[arg(long)]
    pub template: Option<String>,

    /// Working folder the project is cloned into
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Temporary folder for the template clone
    #[arg(long)]
    pub clone_path: Option<PathBuf>,

    /// Branch for the template commit; mainline when empty
    #[arg(long)]
    pub branch: Option<String>,

    /// Commit message for the template files
    #[arg(long, short = 'm')]
    pub message: Option<String>,

    /// Numeric ID of the group to create the project in
    #[arg(long)]
    pub namespace_id: Option<u64>,

    /// Value for the workload placeholder in .gitlab-ci.yml
    #[arg(long)]
    pub workload: Option<String>,

    /// Do not transfer the project after seeding
    #[arg(long)]
    pub no_transfer: bool,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Resolved inputs of one seeding run.
#[derive(Debug)]
struct SeedPlan {
    root: PathBuf,
    template: String,
    message: String,
    name: String,
    clone_path: PathBuf,
    branch: String,
}

impl SeedCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;
        let prompts = global.prompts_allowed(&config);
        let plan = self.plan(prompts)?;

        print_plan(&plan);
        if !self.yes {
            if !prompts {
                bail!("Confirmation required; pass --yes to run without prompting");
            }
            if !prompt_confirm_with_default("Do you want to continue?", false)? {
                println!("Cancelled");
                return Ok(());
            }
        }

        let token = global.require_token(&config)?;
        let client = global.client(&config)?;
        let git = GitRunner::new();
        let writer = global.output();

        step(&format!("Creating a new GitLab project named {}", plan.name));
        let options = CreateProjectOptions {
            namespace_id: self.namespace_id,
            shared_runners_enabled: None,
        };
        let created = client
            .create_project(&plan.name, &options, |taken| {
                step(&format!(" - {} exists, establishing an available project name...", taken));
            })
            .await
            .with_context(|| format!("Failed to create project '{}'", plan.name))?;
        writer.write_success(&format!("{} ({}) has been created", created.name, created.id));

        let project_dir = plan.root.join(&created.name);

        let template_token = same_host(&plan.template, &global.domain(&config)).then_some(token.as_str());
        with_spinner(&format!("Downloading {}", plan.template), || {
            git.clone(&plan.template, template_token, &plan.clone_path)
        })?;

        with_spinner(&format!("Cloning {}", created.http_url_to_repo), || {
            git.clone(&created.http_url_to_repo, Some(&token), &project_dir)
        })?;

        let pushed = (|| -> Result<()> {
            create_file_with_content(&project_dir, "README.md", &format!("# {}", created.name))?;
            with_spinner("Pushing README to main", || {
                git.branch_commit_push(&project_dir, "initial commit", "main")
            })?;

            step(&format!(
                "Copying files from {} into {}",
                plan.clone_path.display(),
                project_dir.display()
            ));
            let copied = copy_tree(&plan.clone_path, &project_dir)?;
            tracing::info!(copied, "template files copied");

            if let Some(workload) = &self.workload {
                let ci_file = project_dir.join(CI_FILE);
                if ci_file.exists() {
                    let replaced = replace_placeholder_in_file(
                        &ci_file,
                        WORKLOAD_KEY,
                        WORKLOAD_PLACEHOLDER,
                        &format!("\"{}\"", workload),
                        ":",
                    )?;
                    if replaced == 0 {
                        writer.write_warning(&format!("No {} placeholder found in {}", WORKLOAD_KEY, CI_FILE));
                    }
                } else {
                    writer.write_warning(&format!("Template has no {}; --workload ignored", CI_FILE));
                }
            }

            with_spinner(&format!("Committing changes and pushing to gitlab:{}", created.name), || {
                git.branch_commit_push(&project_dir, &plan.message, &plan.branch)
            })?;
            Ok(())
        })();

        // The clone embedded the token in .git/config.
        if let Err(e) = git.set_remote_url(&project_dir, &created.http_url_to_repo) {
            writer.write_warning(&format!(
                "Could not remove credentials from {}: {:#}",
                project_dir.display(),
                e
            ));
        }
        pushed?;

        step(&format!("Tidying up by removing the {} folder", plan.clone_path.display()));
        remove_dir_if_exists(&plan.clone_path)?;

        if !self.no_transfer {
            if let Some(namespace) = global.namespace(&config) {
                step(&format!("Transferring {} to {}", created.name, namespace));
                if let Err(e) = client.transfer_project(created.id, &namespace).await {
                    writer.write_error(&format!("Transfer to {} failed: {}", namespace, e));
                }
            }
        }

        writer.write_success("Workflow completed successfully!");
        Ok(())
    }

    /// Fills every input from flags, prompting for missing ones when allowed.
    fn plan(&self, prompts: bool) -> Result<SeedPlan> {
        let home = directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));
        let default_root = home.join("source");

        let root = match &self.root {
            Some(root) => root.clone(),
            None if prompts => PathBuf::from(prompt_input_with_default(
                "Root folder for the project",
                &default_root.to_string_lossy(),
            )?),
            None => default_root,
        };

        let template = match &self.template {
            Some(url) => url.clone(),
            None if prompts => prompt_input("Template repository URL")?,
            None => bail!("--template is required when prompts are disabled"),
        };

        let message = match &self.message {
            Some(message) => message.clone(),
            None if prompts => prompt_input_with_default("Commit message", "initial commit")?,
            None => "initial commit".to_string(),
        };

        let name = match &self.name {
            Some(name) => name.clone(),
            None if prompts => prompt_input("Name for the new GitLab project")?,
            None => bail!("--name is required when prompts are disabled"),
        };
        if name.trim().is_empty() {
            bail!("Project name cannot be empty");
        }

        let default_clone = root.join(format!("{}-tmp", name));
        let clone_path = match &self.clone_path {
            Some(path) => path.clone(),
            None if prompts => PathBuf::from(prompt_input_with_default(
                "Local path to clone the template into",
                &default_clone.to_string_lossy(),
            )?),
            None => default_clone,
        };

        let branch = match &self.branch {
            Some(branch) => branch.clone(),
            None if prompts => {
                prompt_input_optional("Branch name (empty for mainline)")?.unwrap_or_default()
            }
            None => String::new(),
        };

        Ok(SeedPlan {
            root,
            template,
            message,
            name,
            clone_path,
            branch,
        })
    }
}

fn print_plan(plan: &SeedPlan) {
    let branch = if plan.branch.trim().is_empty() {
        "(mainline)"
    } else {
        plan.branch.as_str()
    };

    println!("{}", style("Summary of actions:").yellow().bold());
    println!(" - Working folder is {}", style(plan.root.display()).red());
    println!(" - Create a new GitLab project called {}", style(&plan.name).red());
    println!(
        " - Clone {} to folder {}",
        style(&plan.template).red(),
        style(plan.clone_path.display()).green()
    );
    println!(
        " - Copy files (except .git/) from {} to {}",
        style(plan.clone_path.display()).green(),
        style(plan.root.join(&plan.name).display()).red()
    );
    println!(" - Branch {}", style(branch).red());
    println!(" - Commit and push to {}", style(&plan.name).red());
}

/// Whether `url` points at the GitLab instance, so the token may be sent.
///
/// `domain` takes the same forms as the client accepts: a bare host, a
/// host with port, or a full `http(s)://` origin. Host and port must match.
fn same_host(url: &str, domain: &str) -> bool {
    let Ok(target) = url::Url::parse(url) else {
        return false;
    };
    let Some(instance) = instance_origin(domain) else {
        return false;
    };

    match (target.host_str(), instance.host_str()) {
        (Some(a), Some(b)) => {
            a.eq_ignore_ascii_case(b)
                && target.port_or_known_default() == instance.port_or_known_default()
        }
        _ => false,
    }
}

fn instance_origin(domain: &str) -> Option<url::Url> {
    let domain = domain.trim().trim_end_matches('/');
    if domain.is_empty() {
        return None;
    }
    if domain.starts_with("http://") || domain.starts_with("https://") {
        url::Url::parse(domain).ok()
    } else {
        url::Url::parse(&format!("https://{}", domain)).ok()
    }
}

/// Runs a blocking git step behind a spinner.
fn with_spinner<T>(message: &str, f: impl FnOnce() -> Result<T>) -> Result<T> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = f();
    pb.finish_and_clear();
    if result.is_ok() {
        step(message);
    }
    result
}

fn step(message: &str) {
    println!("{}", style(message).yellow());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_only_sent_to_own_host() {
        assert!(same_host("https://gitlab.example.com/acme/template.git", "gitlab.example.com"));
        assert!(!same_host("https://github.com/acme/template.git", "gitlab.example.com"));
        assert!(!same_host("git@gitlab.example.com:acme/template.git", "gitlab.example.com"));
    }

    #[test]
    fn test_same_host_accepts_every_domain_form() {
        assert!(same_host("https://gitlab.example.com/acme/t.git", "https://gitlab.example.com"));
        assert!(same_host("https://GitLab.Example.com/acme/t.git", "gitlab.example.com/"));
        assert!(same_host("http://localhost:8080/acme/t.git", "localhost:8080"));
        assert!(same_host("http://localhost:8080/acme/t.git", "http://localhost:8080"));
        assert!(same_host("https://gitlab.example.com:443/acme/t.git", "gitlab.example.com"));
    }

    #[test]
    fn test_same_host_requires_matching_port() {
        assert!(!same_host("http://localhost:9090/acme/t.git", "localhost:8080"));
        assert!(!same_host("http://gitlab.example.com/acme/t.git", "gitlab.example.com"));
        assert!(!same_host("https://gitlab.example.com/acme/t.git", ""));
    }

    #[test]
    fn test_plan_without_prompts_uses_defaults() {
        let cmd = SeedCommand {
            name: Some("demo".to_string()),
            template: Some("https://gitlab.com/acme/template.git".to_string()),
            root: Some(PathBuf::from("/work")),
            clone_path: None,
            branch: None,
            message: None,
            namespace_id: None,
            workload: None,
            no_transfer: false,
            yes: true,
        };

        let plan = cmd.plan(false).unwrap();
        assert_eq!(plan.clone_path, PathBuf::from("/work/demo-tmp"));
        assert_eq!(plan.message, "initial commit");
        assert!(plan.branch.is_empty());
    }

    #[test]
    fn test_plan_without_prompts_requires_name() {
        let cmd = SeedCommand {
            name: None,
            template: Some("https://gitlab.com/acme/template.git".to_string()),
            root: None,
            clone_path: None,
            branch: None,
            message: None,
            namespace_id: None,
            workload: None,
            no_transfer: true,
            yes: true,
        };

        assert!(cmd.plan(false).is_err());
    }
}
