//
//  gitlab-admin
//  cli/auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Authentication commands.
//!
//! Tokens are stored in the system keyring, one per GitLab domain.

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};

use crate::api::GitLabClient;
use crate::auth::{read_token_from_stdin, validate_token, AuthCredential, KeyringStore};
use crate::config::Config;
use crate::interactive::{prompt_confirm_with_default, prompt_password};

use super::GlobalOptions;

/// Log in to, log out of, and inspect GitLab credentials
#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Store a personal access token for a GitLab domain
    Login(LoginArgs),

    /// Remove the stored token for a GitLab domain
    Logout,

    /// Show which user the stored token belongs to
    Status(StatusArgs),
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Read the token from standard input
    #[arg(long)]
    pub with_token: bool,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Display a masked form of the token
    #[arg(long, short = 't')]
    pub show_token: bool,
}

impl AuthCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AuthSubcommand::Login(args) => login(args, global).await,
            AuthSubcommand::Logout => logout(global).await,
            AuthSubcommand::Status(args) => status(args, global).await,
        }
    }
}

async fn login(args: &LoginArgs, global: &GlobalOptions) -> Result<()> {
    let keyring = KeyringStore::new();
    let mut config = Config::load()?;
    let domain = global.domain(&config);
    let prompts = global.prompts_allowed(&config);

    if let Some(existing) = keyring.get(&domain)? {
        if let Ok(user) = client_for(&domain, &existing)?.current_user().await {
            println!("Already logged in to {} as {}", domain, user.username);
            if !prompts || !prompt_confirm_with_default("Re-authenticate?", false)? {
                return Ok(());
            }
        }
    }

    let token = if args.with_token {
        read_token_from_stdin()?
    } else {
        if !prompts {
            bail!("Cannot prompt for a token; use --with-token and pipe it in");
        }
        println!();
        println!("To create a personal access token:");
        println!("  1. Go to https://{}/-/user_settings/personal_access_tokens", domain);
        println!("  2. Add a token with the 'api' and 'write_repository' scopes");
        println!("  3. Copy the generated token");
        println!();
        prompt_password("Personal access token")?
    };

    if !validate_token(&token) {
        bail!("Invalid token format");
    }

    println!("Validating token...");
    let user = client_for(&domain, &token)?
        .current_user()
        .await
        .with_context(|| format!("Token was rejected by {}", domain))?;

    keyring.store(&domain, &token)?;

    if config.core.domain.is_none() && global.domain.is_some() {
        config.core.domain = Some(domain.clone());
        config.save()?;
    }

    println!("Logged in to {} as {}", domain, user.username);
    Ok(())
}

async fn logout(global: &GlobalOptions) -> Result<()> {
    let keyring = KeyringStore::new();
    let config = Config::load()?;
    let domain = global.domain(&config);

    if keyring.get(&domain)?.is_none() {
        println!("Not logged in to {}", domain);
        return Ok(());
    }

    keyring.delete(&domain)?;
    println!("Logged out of {}", domain);
    Ok(())
}

async fn status(args: &StatusArgs, global: &GlobalOptions) -> Result<()> {
    let keyring = KeyringStore::new();
    let config = Config::load()?;
    let domain = global.domain(&config);

    let (token, source) = match global.token.as_deref().filter(|t| !t.trim().is_empty()) {
        Some(token) => (token.trim().to_string(), "GL_PAT / --token"),
        None => match keyring.get(&domain)? {
            Some(token) => (token, "keyring"),
            None => {
                println!("Not logged in to {}", domain);
                println!();
                println!("Run 'gla auth login' to authenticate");
                return Ok(());
            }
        },
    };

    println!("{}", domain);
    println!("  Token source: {}", source);
    match client_for(&domain, &token)?.current_user().await {
        Ok(user) => {
            println!("  Logged in as: {} ({})", user.username, user.name);
            println!("  Status: Active");
        }
        Err(e) if e.is_unauthorized() => println!("  Status: Invalid/Expired"),
        Err(e) => println!("  Status: Unknown ({})", e),
    }

    if args.show_token {
        println!("  Token: {}", mask_token(&token));
    }

    Ok(())
}

fn client_for(domain: &str, token: &str) -> Result<GitLabClient> {
    Ok(GitLabClient::new(domain)?.with_auth(AuthCredential::personal_access_token(token)))
}

fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("short"), "*****");
        assert_eq!(mask_token("glpat-abcdefgh1234"), "glpa...1234");
    }
}
