//
//  gitlab-admin
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gitlab_admin::api::ApiError;
use gitlab_admin::cli::{Cli, Commands};
use gitlab_admin::exit_codes;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_code_for(&e));
        }
    }
}

/// Logging goes to stderr, filtered by `GLA_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_env("GLA_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Maps API failures anywhere in the error chain to an exit code.
fn exit_code_for(error: &anyhow::Error) -> i32 {
    for cause in error.chain() {
        if let Some(api) = cause.downcast_ref::<ApiError>() {
            if api.is_unauthorized() {
                return exit_codes::AUTH_ERROR;
            }
            if api.is_not_found() || matches!(api, ApiError::NotFound(_)) {
                return exit_codes::NOT_FOUND;
            }
        }
    }
    exit_codes::ERROR
}

/// Main command dispatcher
async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Auth(cmd) => cmd.run(&cli.global).await,
        Commands::Group(cmd) => cmd.run(&cli.global).await,
        Commands::Project(cmd) => cmd.run(&cli.global).await,
        Commands::Variable(cmd) => cmd.run(&cli.global).await,
        Commands::Seed(cmd) => cmd.run(&cli.global).await,
        Commands::Config(cmd) => cmd.run(&cli.global).await,
        Commands::Completion(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("gla version {}", gitlab_admin::VERSION);
            Ok(())
        }
    }
}
