//
//  gitlab-admin
//  auth/token.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Personal access token input
//!
//! GitLab PATs are created under *User Settings > Access Tokens*. The admin
//! workflows need the `api` scope (and `write_repository` for seeding).
//! Tokens can be piped in (`echo $TOKEN | gla auth login --with-token`) or
//! entered at a hidden prompt.

use anyhow::{bail, Result};

/// Reads a token from the first line of standard input, trimmed.
pub fn read_token_from_stdin() -> Result<String> {
    use std::io::{self, BufRead};

    let stdin = io::stdin();
    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;

    let token = line.trim().to_string();
    if !validate_token(&token) {
        bail!("No valid token was provided on standard input");
    }
    Ok(token)
}

/// Checks the token format only: non-empty and free of whitespace.
///
/// ```rust
/// use gitlab_admin::auth::validate_token;
///
/// assert!(validate_token("glpat-AbC123xyz"));
/// assert!(!validate_token(""));
/// assert!(!validate_token("has space"));
/// ```
pub fn validate_token(token: &str) -> bool {
    !token.is_empty() && !token.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_token_rejects_whitespace() {
        assert!(validate_token("glpat-123"));
        assert!(!validate_token("glpat 123"));
        assert!(!validate_token("glpat-123\n"));
    }
}
