//
//  gitlab-admin
//  api/progress.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Progress reporting for long-running API operations
//!
//! Operations such as page walks and project creation emit short
//! human-readable messages ("Fetching page 2 of subgroups...") through a
//! [`ProgressObserver`] held by the client. The default observer forwards
//! them to `tracing`; any `Fn(&str) + Send + Sync` closure can be used
//! instead.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use gitlab_admin::api::GitLabClient;
//!
//! let client = GitLabClient::new("gitlab.com")?
//!     .with_observer(Arc::new(|msg: &str| eprintln!("> {}", msg)));
//! # Ok::<(), gitlab_admin::api::ApiError>(())
//! ```

/// Receives progress messages from API operations.
pub trait ProgressObserver: Send + Sync {
    /// Called once per progress event.
    fn message(&self, message: &str);
}

/// Forwards progress messages to `tracing` at `info` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ProgressObserver for TracingObserver {
    fn message(&self, message: &str) {
        tracing::info!("{}", message);
    }
}

impl<F> ProgressObserver for F
where
    F: Fn(&str) + Send + Sync,
{
    fn message(&self, message: &str) {
        self(message)
    }
}
