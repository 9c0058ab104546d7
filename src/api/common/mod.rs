//
//  gitlab-admin
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for the GitLab REST API
//!
//! This module provides the error type shared by every operation in the
//! [`api`](crate::api) layer, the soft-delete predicate applied by all
//! listings, and the pagination machinery (re-exported from [`pagination`]).
//!
//! # Overview
//!
//! - [`ApiError`] - Unified error type for all API operations
//! - [`ApiResult`] - `Result` alias used across the API layer
//! - [`SoftDeletable`] - Entities that carry a deletion marker
//! - Pagination types ([`Lister`], [`ListOrder`], [`Page`])
//!
//! # Example
//!
//! ```rust
//! use gitlab_admin::api::common::ApiError;
//!
//! fn describe(err: &ApiError) -> &'static str {
//!     match err {
//!         ApiError::Unauthorized(_) => "check the personal access token",
//!         ApiError::NotFound(_) => "nothing matched",
//!         _ => "request failed",
//!     }
//! }
//! ```

use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

mod pagination;

pub use pagination::*;

/// Result alias used by every operation in the API layer.
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified error type for all GitLab API operations.
///
/// Every public operation returns this error instead of panicking, so callers
/// decide whether to stop or carry on.
///
/// # Variants
///
/// | Variant | Description |
/// |---------|-------------|
/// | `Unauthorized` | HTTP 401, the token was rejected |
/// | `Status` | Any other non-success HTTP status |
/// | `Deserialize` | A response body could not be decoded |
/// | `NotFound` | A name or ID could not be resolved to an active entity |
/// | `Write` | A variable create/update failed |
/// | `Network` | Transport-level failure |
/// | `Unknown` | Unexpected runtime failure |
#[derive(Error, Debug)]
pub enum ApiError {
    /// The personal access token was rejected (HTTP 401).
    #[error("Unauthorized: the personal access token was rejected. {0}")]
    Unauthorized(String),

    /// The API answered with a non-success status.
    ///
    /// Carries the status code and the raw response body.
    #[error("{status}. {body}")]
    Status {
        /// HTTP status returned by the API
        status: StatusCode,
        /// Raw response body
        body: String,
    },

    /// A response body could not be decoded into the expected type.
    #[error("Failed to deserialize {what}: {message}")]
    Deserialize {
        /// What was being decoded (e.g. "groups data")
        what: String,
        /// Decoder message
        message: String,
    },

    /// A name or ID did not resolve to an active entity.
    #[error("{0}")]
    NotFound(String),

    /// A variable write failed.
    ///
    /// `action` reflects the existence check made before the write.
    #[error("Failed to {action} variable: {source}")]
    Write {
        /// Whether the failed call was an update or a create
        action: WriteAction,
        /// The underlying failure
        #[source]
        source: Box<ApiError>,
    },

    /// A network-level error occurred during the request.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// An unexpected runtime failure.
    #[error("An error occurred: {0}")]
    Unknown(String),
}

impl ApiError {
    /// Classifies a non-success HTTP status and its body into an error.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        if status == StatusCode::UNAUTHORIZED {
            Self::Unauthorized(body.to_string())
        } else {
            Self::Status {
                status,
                body: body.to_string(),
            }
        }
    }

    /// Builds a [`ApiError::Deserialize`] from a `serde_json` failure.
    pub fn deserialize(what: &str, err: serde_json::Error) -> Self {
        Self::Deserialize {
            what: what.to_string(),
            message: err.to_string(),
        }
    }

    /// Returns the HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Unauthorized(_) => Some(StatusCode::UNAUTHORIZED),
            Self::Status { status, .. } => Some(*status),
            Self::Write { source, .. } => source.status(),
            _ => None,
        }
    }

    /// Returns `true` when the API answered 404.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// Returns `true` when the token was rejected.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

/// The kind of write attempted by a variable upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteAction {
    /// The variable existed and a `PUT` was issued
    Update,
    /// The variable did not exist and a `POST` was issued
    Create,
}

impl fmt::Display for WriteAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Update => write!(f, "update"),
            Self::Create => write!(f, "create"),
        }
    }
}

/// Entities that GitLab can mark for deletion before removing them.
///
/// Soft-deleted entities stay reachable by ID but must never appear in a
/// listing. The lister applies [`is_marked_for_deletion`] to every page.
///
/// [`is_marked_for_deletion`]: SoftDeletable::is_marked_for_deletion
pub trait SoftDeletable {
    /// The raw deletion-marker timestamp, if the API returned one.
    fn deletion_marker(&self) -> Option<&str>;

    /// A non-empty deletion marker means the entity is pending deletion.
    fn is_marked_for_deletion(&self) -> bool {
        self.deletion_marker().is_some_and(|m| !m.is_empty())
    }
}

/// Case-insensitive name comparison used for exact-match filters.
pub fn names_match(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
