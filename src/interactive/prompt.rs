//
//  gitlab-admin
//  interactive/prompt.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Interactive Prompts
//!
//! Thin wrappers over `dialoguer` for the questions `gla` asks: text input,
//! masked token entry and yes/no confirmation.
//!
//! # Example
//!
//! ```no_run
//! use gitlab_admin::interactive::prompt::{prompt_confirm_with_default, prompt_input};
//!
//! let name = prompt_input("Project name").unwrap();
//! if prompt_confirm_with_default(&format!("Create '{}'?", name), true).unwrap() {
//!     println!("Creating {}", name);
//! }
//! ```

use anyhow::Result;
use dialoguer::{Confirm, Input, Password};

/// Prompts for non-empty text input.
pub fn prompt_input(message: &str) -> Result<String> {
    let input: String = Input::new().with_prompt(message).interact_text()?;
    Ok(input.trim().to_string())
}

/// Prompts for text input with a pre-filled default.
///
/// ```no_run
/// use gitlab_admin::interactive::prompt::prompt_input_with_default;
///
/// let branch = prompt_input_with_default("Branch", "develop").unwrap();
/// ```
pub fn prompt_input_with_default(message: &str, default: &str) -> Result<String> {
    let input: String = Input::new()
        .with_prompt(message)
        .default(default.to_string())
        .interact_text()?;
    Ok(input.trim().to_string())
}

/// Prompts for text input that may be left empty.
///
/// Returns `None` for empty input.
pub fn prompt_input_optional(message: &str) -> Result<Option<String>> {
    let input: String = Input::new()
        .with_prompt(message)
        .allow_empty(true)
        .interact_text()?;
    let input = input.trim();
    if input.is_empty() {
        Ok(None)
    } else {
        Ok(Some(input.to_string()))
    }
}

/// Prompts for a secret; input is not echoed.
pub fn prompt_password(message: &str) -> Result<String> {
    let password = Password::new().with_prompt(message).interact()?;
    Ok(password)
}

/// Prompts for a yes/no answer with a default.
pub fn prompt_confirm_with_default(message: &str, default: bool) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(default)
        .interact()?;
    Ok(confirmed)
}
