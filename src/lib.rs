//
//  gitlab-admin
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # GitLab Admin Library
//!
//! A client library for administering GitLab groups, projects and CI/CD
//! variables over the REST v4 API, plus the `gla` command-line tool built on
//! it.
//!
//! ## Features
//!
//! - **Complete listings**: every list walks all pages (`X-Total-Pages`)
//! - **Soft-delete aware**: groups and projects pending deletion are hidden
//! - **Name or ID**: group arguments accept either form
//! - **Variable upsert**: create-or-update for group and project variables
//! - **Name negotiation**: project creation appends `-N` until a name is free
//! - **Template seeding**: clone, copy and push a template into a new project
//!
//! ## Module Structure
//!
//! - [`api`]: GitLab REST client and domain operations
//! - [`auth`]: Personal access tokens and keyring storage
//! - [`cli`]: Command-line interface definitions using clap
//! - [`config`]: Configuration file management
//! - [`git`]: Local git operations
//! - [`interactive`]: Interactive prompts
//! - [`output`]: Output formatting (Table, JSON)
//! - [`util`]: Filesystem and display helpers
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use gitlab_admin::api::{GitLabClient, ListOrder};
//! use gitlab_admin::auth::AuthCredential;
//!
//! # async fn run() -> Result<(), gitlab_admin::api::ApiError> {
//! let client = GitLabClient::new("gitlab.example.com")?
//!     .with_auth(AuthCredential::personal_access_token("glpat-..."));
//!
//! for group in client.search_groups("platform", ListOrder::default()).await? {
//!     println!("{} ({})", group.full_path, group.id);
//! }
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions.
///
/// Contains all `gla` commands, arguments and subcommands defined using the
/// clap derive API.
pub mod cli;

/// GitLab REST v4 client.
///
/// Handles authentication, pagination, soft-delete filtering, group
/// resolution and the group, project, variable and summary operations.
pub mod api;

/// Personal access tokens and secure credential storage.
pub mod auth;

/// Configuration file management.
///
/// Manages the CLI's configuration stored in platform-specific locations:
/// - Linux: `~/.config/gla/config.toml`
/// - macOS: `~/Library/Application Support/gla/config.toml`
/// - Windows: `%APPDATA%\gla\config.toml`
pub mod config;

/// Local git operations driven through the `git` executable.
pub mod git;

/// Output formatting for human-readable tables and JSON.
pub mod output;

/// Interactive terminal prompts.
pub mod interactive;

/// Filesystem and display helpers.
pub mod util;

/// Re-export of the main CLI struct for convenient access.
///
/// ```rust,no_run
/// use clap::Parser;
/// use gitlab_admin::Cli;
///
/// let cli = Cli::parse();
/// ```
pub use cli::Cli;

/// Re-export of the configuration struct.
pub use config::Config;

/// Re-export of the API client.
pub use api::GitLabClient;

/// Name of the CLI binary, also used for the configuration directory.
pub const APP_NAME: &str = "gla";

/// Crate version, taken from Cargo.toml at compile time.
///
/// ```rust
/// use gitlab_admin::VERSION;
///
/// println!("gla version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// - `0`: Success
/// - `1-3`: General errors and usage issues
/// - `4-7`: Authentication-related issues
/// - `8-15`: Resource-related issues
/// - `16-31`: Operation-related issues
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments.
    pub const USAGE: i32 = 2;

    /// Missing, invalid or rejected token.
    pub const AUTH_ERROR: i32 = 4;

    /// The requested group, project or variable does not exist.
    pub const NOT_FOUND: i32 = 8;

    /// The user declined a confirmation.
    pub const CANCELLED: i32 = 16;
}
