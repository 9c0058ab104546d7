//
//  gitlab-admin
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! GitLab's REST API is authenticated with a personal access token (PAT)
//! sent as a bearer token. This module holds the credential type applied to
//! every request, secure storage of tokens in the system keyring, and the
//! lookup order used by the CLI.
//!
//! ## Module Structure
//!
//! - [`keyring`]: Secure token storage using the system keyring
//! - [`token`]: Token input and format validation
//!
//! ## Token Resolution
//!
//! [`resolve_token`] looks for a token in this order:
//!
//! 1. An explicit value (the `--token` flag or the `GL_PAT` environment variable)
//! 2. The system keyring entry for the GitLab domain
//!
//! ## Example
//!
//! ```rust,no_run
//! use gitlab_admin::auth::{resolve_token, AuthCredential};
//!
//! fn credential_for(domain: &str) -> anyhow::Result<Option<AuthCredential>> {
//!     Ok(resolve_token(None, domain)?.map(AuthCredential::personal_access_token))
//! }
//! ```

mod keyring;
mod token;

pub use keyring::*;
pub use token::*;

use anyhow::Result;
use reqwest::RequestBuilder;

/// Credentials applied to GitLab API requests.
///
/// # Example
///
/// ```rust
/// use gitlab_admin::auth::AuthCredential;
///
/// let credential = AuthCredential::personal_access_token("glpat-abc123");
/// assert_eq!(credential.token(), "glpat-abc123");
/// ```
#[derive(Clone)]
pub enum AuthCredential {
    /// Personal access token sent as `Authorization: Bearer <token>`.
    PersonalAccessToken {
        /// The token string.
        token: String,
    },
}

impl AuthCredential {
    /// Builds a PAT credential.
    pub fn personal_access_token(token: impl Into<String>) -> Self {
        Self::PersonalAccessToken {
            token: token.into(),
        }
    }

    /// Returns the raw token, e.g. to embed in a git remote URL.
    pub fn token(&self) -> &str {
        match self {
            Self::PersonalAccessToken { token } => token,
        }
    }

    /// Adds the `Authorization` header to a request.
    pub fn apply_to_request(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::PersonalAccessToken { token } => request.bearer_auth(token),
        }
    }
}

impl std::fmt::Debug for AuthCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PersonalAccessToken { .. } => f
                .debug_struct("PersonalAccessToken")
                .field("token", &"<redacted>")
                .finish(),
        }
    }
}

/// Finds the token to use for `domain`.
///
/// An explicit, non-blank token wins; otherwise the keyring is consulted.
/// Returns `Ok(None)` when neither source has one.
pub fn resolve_token(explicit: Option<&str>, domain: &str) -> Result<Option<String>> {
    if let Some(token) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
        return Ok(Some(token.to_string()));
    }

    KeyringStore::new().get(domain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_token() {
        let credential = AuthCredential::personal_access_token("glpat-secret");
        let debug = format!("{:?}", credential);
        assert!(!debug.contains("glpat-secret"));
        assert!(debug.contains("redacted"));
    }

    #[test]
    fn test_explicit_token_wins() {
        let token = resolve_token(Some("  glpat-flag "), "gitlab.example.com").unwrap();
        assert_eq!(token.as_deref(), Some("glpat-flag"));
    }
}
