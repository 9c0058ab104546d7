//
//  gitlab-admin
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Loads and saves `gla` settings from a TOML file in the platform config
//! directory. Every field has a default, so a missing or partial file is
//! valid.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/gla/config.toml`
//! - **macOS**: `~/Library/Application Support/gla/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\gla\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [core]
//! domain = "gitlab.example.com"
//! namespace = "platform/services"
//! prompt = "enabled"
//!
//! [api]
//! probe_concurrency = 8
//!
//! [variables]
//! send_masked = false
//! ```
//!
//! ## Precedence
//!
//! Command-line flags and their environment variables (`GL_DOMAIN`,
//! `GL_PAT`, `GL_NAMESPACE`) override values from this file.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use gitlab_admin::config::Config;
//!
//! let mut config = Config::load()?;
//! config.set("core.domain", "gitlab.example.com")?;
//! config.save()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

mod file;

pub use file::*;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::api::client::DEFAULT_PROBE_CONCURRENCY;

/// Domain used when neither a flag nor the config names one.
pub const DEFAULT_DOMAIN: &str = "gitlab.com";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub core: CoreConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub variables: VariablesConfig,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// GitLab domain, e.g. `gitlab.com`
    #[serde(default)]
    pub domain: Option<String>,

    /// Namespace new projects are transferred to by `gla seed`
    #[serde(default)]
    pub namespace: Option<String>,

    /// `enabled` or `disabled`; disabled behaves like `--no-prompt`
    #[serde(default = "default_prompt")]
    pub prompt: String,
}

fn default_prompt() -> String {
    "enabled".to_string()
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            domain: None,
            namespace: None,
            prompt: default_prompt(),
        }
    }
}

/// API client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Maximum concurrent has-subgroups probes
    #[serde(default = "default_probe_concurrency")]
    pub probe_concurrency: usize,
}

fn default_probe_concurrency() -> usize {
    DEFAULT_PROBE_CONCURRENCY
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            probe_concurrency: default_probe_concurrency(),
        }
    }
}

/// CI/CD variable settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VariablesConfig {
    /// Honour `--masked` when writing project variables.
    ///
    /// Masking requested this way has not been seen to take effect on
    /// GitLab; the setting exists so the flag can be turned on once it does.
    /// Group variables never carry the flag.
    #[serde(default)]
    pub send_masked: bool,
}

/// Keys accepted by [`Config::get`] and [`Config::set`].
pub const CONFIG_KEYS: &[&str] = &[
    "core.domain",
    "core.namespace",
    "core.prompt",
    "api.probe_concurrency",
    "variables.send_masked",
];

impl Config {
    /// Loads the config file, or defaults when it does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads a config from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !config_exists(path) {
            return Ok(Self::default());
        }
        let content = read_config_file(path)?;
        toml::from_str(&content).with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Saves to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        write_config_file(path, &content)
    }

    /// Path of the config file.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Whether interactive prompts are allowed by config.
    pub fn prompt_enabled(&self) -> bool {
        !self.core.prompt.eq_ignore_ascii_case("disabled")
    }

    /// Reads a setting by dotted key. Unset optional values are `None`.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "core.domain" => self.core.domain.clone(),
            "core.namespace" => self.core.namespace.clone(),
            "core.prompt" => Some(self.core.prompt.clone()),
            "api.probe_concurrency" => Some(self.api.probe_concurrency.to_string()),
            "variables.send_masked" => Some(self.variables.send_masked.to_string()),
            _ => None,
        }
    }

    /// Updates a setting by dotted key.
    ///
    /// # Errors
    ///
    /// Fails for unknown keys and for values that do not parse.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "core.domain" => self.core.domain = Some(value.trim().to_string()),
            "core.namespace" => self.core.namespace = Some(value.trim().to_string()),
            "core.prompt" => match value {
                "enabled" | "disabled" => self.core.prompt = value.to_string(),
                _ => bail!("core.prompt must be 'enabled' or 'disabled'"),
            },
            "api.probe_concurrency" => {
                let width: usize = value
                    .parse()
                    .with_context(|| format!("'{}' is not a positive number", value))?;
                if width == 0 {
                    bail!("api.probe_concurrency must be at least 1");
                }
                self.api.probe_concurrency = width;
            }
            "variables.send_masked" => {
                self.variables.send_masked = value
                    .parse()
                    .with_context(|| format!("'{}' is not 'true' or 'false'", value))?;
            }
            _ => bail!(
                "Unknown config key '{}'. Valid keys: {}",
                key,
                CONFIG_KEYS.join(", ")
            ),
        }
        Ok(())
    }
}
