//
//  gitlab-admin
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Page-walking for GitLab list endpoints
//!
//! GitLab paginates list endpoints with `per_page` and `page` query
//! parameters and reports the page count in an `X-Total-Pages` header. The
//! header is dropped by some endpoints and proxies, so the walk also stops on
//! the first short page.
//!
//! # Overview
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Lister`] | Walks every page of an endpoint and accumulates the items |
//! | [`Page`] | One decoded page plus the optional total-page count |
//! | [`ListOrder`] | Validated `order_by` / `sort` pair |
//!
//! # Example
//!
//! ```rust,no_run
//! use gitlab_admin::api::common::{ListOrder, Lister};
//! use gitlab_admin::api::{GitLabClient, Group};
//!
//! # async fn example(client: &GitLabClient) -> gitlab_admin::api::ApiResult<()> {
//! let groups: Vec<Group> = Lister::new(client, "/groups", "groups")
//!     .order(ListOrder::for_groups("name", "asc"))
//!     .param("search", "platform")
//!     .fetch_active(|_| true)
//!     .await?;
//! println!("{} active groups", groups.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Notes
//!
//! - The walk is all-or-nothing: a failed page discards everything fetched so far
//! - Soft-deleted entities are filtered by [`Lister::fetch_active`], never by callers

use std::fmt;

use serde::de::DeserializeOwned;

use super::{ApiResult, SoftDeletable};
use crate::api::client::GitLabClient;

/// Page size requested from every list endpoint (the GitLab maximum).
pub const PER_PAGE: u32 = 100;

/// Response header carrying the number of pages.
pub const TOTAL_PAGES_HEADER: &str = "x-total-pages";

/// One decoded page of a list endpoint.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// Items returned on this page, before any filtering
    pub items: Vec<T>,

    /// Value of the `X-Total-Pages` header when present and numeric
    pub total_pages: Option<u32>,
}

/// Decides which page to request after `current`.
///
/// Returns `None` once the walk is complete:
/// - a page shorter than `per_page` is the last one;
/// - a full page stops the walk when the total-page header says `current`
///   was the last page;
/// - otherwise the next page is requested.
pub fn next_page(current: u32, returned: usize, per_page: u32, total_pages: Option<u32>) -> Option<u32> {
    if returned < per_page as usize {
        return None;
    }

    match total_pages {
        Some(total) if current >= total => None,
        _ => Some(current + 1),
    }
}

/// Fields GitLab can order listings by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderBy {
    Id,
    Name,
    Path,
    CreatedAt,
    UpdatedAt,
    LastActivityAt,
}

/// Ordering fields accepted by group listings.
pub const GROUP_ORDER_FIELDS: &[OrderBy] = &[OrderBy::Id, OrderBy::Name, OrderBy::Path, OrderBy::CreatedAt];

/// Ordering fields accepted by project listings.
pub const PROJECT_ORDER_FIELDS: &[OrderBy] = &[
    OrderBy::Id,
    OrderBy::Name,
    OrderBy::Path,
    OrderBy::CreatedAt,
    OrderBy::UpdatedAt,
    OrderBy::LastActivityAt,
];

impl OrderBy {
    /// The query-string value for this field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Path => "path",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::LastActivityAt => "last_activity_at",
        }
    }

    /// Parses `value` against an allow-list, falling back to [`OrderBy::Name`].
    ///
    /// Matching is case-insensitive.
    pub fn parse_allowed(value: &str, allowed: &[OrderBy]) -> Self {
        allowed
            .iter()
            .copied()
            .find(|field| field.as_str().eq_ignore_ascii_case(value.trim()))
            .unwrap_or(Self::Name)
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// `desc` in any case selects descending; anything else is ascending.
    pub fn parse_lenient(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated `order_by` / `sort` pair.
///
/// Invalid input never fails: unknown fields become `name` and unknown
/// directions become `asc`.
///
/// # Example
///
/// ```rust
/// use gitlab_admin::api::common::{ListOrder, OrderBy, SortDirection};
///
/// let order = ListOrder::for_groups("bogus", "up");
/// assert_eq!(order.order_by, OrderBy::Name);
/// assert_eq!(order.sort, SortDirection::Asc);
///
/// let order = ListOrder::for_projects("last_activity_at", "DESC");
/// assert_eq!(order.order_by, OrderBy::LastActivityAt);
/// assert_eq!(order.sort, SortDirection::Desc);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOrder {
    pub order_by: OrderBy,
    pub sort: SortDirection,
}

impl Default for ListOrder {
    fn default() -> Self {
        Self {
            order_by: OrderBy::Name,
            sort: SortDirection::Asc,
        }
    }
}

impl ListOrder {
    /// Validates against the group allow-list (`id`, `name`, `path`, `created_at`).
    pub fn for_groups(order_by: &str, sort: &str) -> Self {
        Self {
            order_by: OrderBy::parse_allowed(order_by, GROUP_ORDER_FIELDS),
            sort: SortDirection::parse_lenient(sort),
        }
    }

    /// Validates against the project allow-list, which adds `updated_at`
    /// and `last_activity_at` to the group fields.
    pub fn for_projects(order_by: &str, sort: &str) -> Self {
        Self {
            order_by: OrderBy::parse_allowed(order_by, PROJECT_ORDER_FIELDS),
            sort: SortDirection::parse_lenient(sort),
        }
    }
}

/// Walks every page of a GitLab list endpoint.
///
/// Built with the endpoint path and a short label used in progress messages
/// ("Fetching page 2 of subgroups..."). Extra query parameters are appended
/// after `per_page` and `page`.
pub struct Lister<'a> {
    client: &'a GitLabClient,
    path: String,
    what: String,
    params: Vec<(String, String)>,
}

impl<'a> Lister<'a> {
    pub fn new(client: &'a GitLabClient, path: impl Into<String>, what: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
            what: what.into(),
            params: Vec::new(),
        }
    }

    /// Adds a query parameter sent with every page request.
    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.params.push((key.to_string(), value.to_string()));
        self
    }

    /// Adds `order_by` and `sort`.
    pub fn order(self, order: ListOrder) -> Self {
        self.param("order_by", order.order_by).param("sort", order.sort)
    }

    /// Fetches every item on every page.
    pub async fn fetch_all<T: DeserializeOwned>(self) -> ApiResult<Vec<T>> {
        self.fetch_filtered(|_: &T| true).await
    }

    /// Fetches every item that is not marked for deletion and passes `keep`.
    pub async fn fetch_active<T, F>(self, keep: F) -> ApiResult<Vec<T>>
    where
        T: DeserializeOwned + SoftDeletable,
        F: Fn(&T) -> bool,
    {
        self.fetch_filtered(move |item: &T| !item.is_marked_for_deletion() && keep(item))
            .await
    }

    async fn fetch_filtered<T, F>(self, keep: F) -> ApiResult<Vec<T>>
    where
        T: DeserializeOwned,
        F: Fn(&T) -> bool,
    {
        let mut collected = Vec::new();
        let mut page = 1;

        loop {
            self.client
                .observer()
                .message(&format!("Fetching page {} of {}...", page, self.what));

            let mut query = vec![
                ("per_page".to_string(), PER_PAGE.to_string()),
                ("page".to_string(), page.to_string()),
            ];
            query.extend(self.params.iter().cloned());

            let batch: Page<T> = self
                .client
                .get_page(&self.path, &query, &format!("{} data", self.what))
                .await?;

            let returned = batch.items.len();
            tracing::debug!(path = %self.path, page, returned, total = ?batch.total_pages, "fetched page");
            collected.extend(batch.items.into_iter().filter(|item| keep(item)));

            match next_page(page, returned, PER_PAGE, batch.total_pages) {
                Some(next) => page = next,
                None => break,
            }
        }

        Ok(collected)
    }
}
