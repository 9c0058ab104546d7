//
//  gitlab-admin
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI configuration commands
//!
//! Reads and writes the dotted keys listed in [`CONFIG_KEYS`].

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use console::style;

use crate::config::{Config, CONFIG_KEYS};

use super::GlobalOptions;

/// Manage configuration
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Print a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// List all configuration values
    #[command(visible_alias = "ls")]
    List,

    /// Print the configuration file path
    Path,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Key, e.g. core.domain
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Key, e.g. core.domain
    pub key: String,

    /// New value
    pub value: String,
}

impl ConfigCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Get(args) => get(args, global),
            ConfigSubcommand::Set(args) => set(args, global),
            ConfigSubcommand::List => list(global),
            ConfigSubcommand::Path => path(global),
        }
    }
}

fn get(args: &GetArgs, global: &GlobalOptions) -> Result<()> {
    if !CONFIG_KEYS.contains(&args.key.as_str()) {
        bail!(
            "Unknown config key '{}'. Valid keys: {}",
            args.key,
            CONFIG_KEYS.join(", ")
        );
    }

    let config = Config::load()?;
    let value = config.get(&args.key);

    if global.json {
        let result = serde_json::json!({
            "key": args.key,
            "value": value,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if let Some(v) = value {
        println!("{}", v);
    }

    Ok(())
}

fn set(args: &SetArgs, global: &GlobalOptions) -> Result<()> {
    let mut config = Config::load()?;
    config.set(&args.key, &args.value)?;
    config.save()?;

    if !global.json {
        println!("{} Set {} to {}", style("✓").green(), args.key, args.value);
    }
    Ok(())
}

fn list(global: &GlobalOptions) -> Result<()> {
    let config = Config::load()?;

    if global.json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    for key in CONFIG_KEYS {
        let value = config.get(key).unwrap_or_default();
        println!("{}={}", style(key).bold(), value);
    }
    Ok(())
}

fn path(global: &GlobalOptions) -> Result<()> {
    let path = Config::config_path()?;

    if global.json {
        let result = serde_json::json!({ "path": path.display().to_string() });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", path.display());
    }
    Ok(())
}
