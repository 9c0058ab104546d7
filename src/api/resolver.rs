//
//  gitlab-admin
//  api/resolver.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Group name/ID resolution
//!
//! Commands accept a group as either a numeric ID or a free-text name. A
//! numeric value is looked up directly; a name is searched and the first
//! active result wins. Unlike [`find_groups`](GitLabClient::find_groups), name
//! resolution does not require an exact match.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use super::client::GitLabClient;
use super::common::{ApiError, ApiResult, SoftDeletable, PER_PAGE};
use super::groups::Group;

/// A user-supplied group reference.
///
/// ```rust
/// use gitlab_admin::api::GroupRef;
///
/// assert_eq!("42".parse::<GroupRef>().unwrap(), GroupRef::Id(42));
/// assert_eq!(
///     "platform".parse::<GroupRef>().unwrap(),
///     GroupRef::Name("platform".to_string())
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupRef {
    /// A decimal group ID
    Id(u64),
    /// A name, path or search term
    Name(String),
}

impl GroupRef {
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(id) = trimmed.parse::<u64>() {
                return Self::Id(id);
            }
        }
        Self::Name(trimmed.to_string())
    }
}

impl FromStr for GroupRef {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for GroupRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{}", id),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// Outcome of a direct group lookup by ID.
#[derive(Debug, Clone)]
pub enum GroupLookup {
    /// The group exists and is active
    Found(Group),
    /// The group exists but is pending deletion
    MarkedForDeletion,
    /// The API answered 404
    Missing,
}

impl GitLabClient {
    /// Looks up a group by ID (`GET /groups/{id}`).
    ///
    /// A 404 becomes [`GroupLookup::Missing`]; any other failure is an error.
    pub async fn get_group(&self, id: u64) -> ApiResult<GroupLookup> {
        match self.get::<Group>(&format!("/groups/{}", id), "group data").await {
            Ok(group) if group.is_marked_for_deletion() => Ok(GroupLookup::MarkedForDeletion),
            Ok(group) => Ok(GroupLookup::Found(group)),
            Err(err) if err.is_not_found() => Ok(GroupLookup::Missing),
            Err(err) => Err(err),
        }
    }

    /// Resolves a group ID or name to an ID.
    ///
    /// Returns `Ok(None)` when a numeric ID points at a group marked for
    /// deletion; callers treat that as an empty result. A numeric ID that
    /// does not exist falls back to a name search.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotFound`] when a name search has no active match.
    pub async fn resolve_group_id(&self, group: &str) -> ApiResult<Option<u64>> {
        let reference = GroupRef::parse(group);

        if let GroupRef::Id(id) = reference {
            match self.get_group(id).await? {
                GroupLookup::Found(found) => return Ok(Some(found.id)),
                GroupLookup::MarkedForDeletion => {
                    tracing::debug!(group_id = id, "group is marked for deletion");
                    return Ok(None);
                }
                GroupLookup::Missing => {}
            }
        }

        let name = reference.to_string();
        let id = self.first_active_group(&name).await?;
        self.observer()
            .message(&format!("Resolved group name to ID: {}", id));
        Ok(Some(id))
    }

    async fn first_active_group(&self, name: &str) -> ApiResult<u64> {
        let per_page = PER_PAGE.to_string();
        let groups: Vec<Group> = self
            .get_query(
                "/groups",
                &[("search", name), ("per_page", per_page.as_str())],
                "groups data",
            )
            .await?;

        groups
            .iter()
            .find(|g| !g.is_marked_for_deletion())
            .map(|g| g.id)
            .ok_or_else(|| ApiError::NotFound(format!("No active group found with name: {}", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_ref_parse() {
        assert_eq!(GroupRef::parse(" 17 "), GroupRef::Id(17));
        assert_eq!(GroupRef::parse("17a"), GroupRef::Name("17a".to_string()));
        assert_eq!(GroupRef::parse("-3"), GroupRef::Name("-3".to_string()));
        assert_eq!(GroupRef::parse("+3"), GroupRef::Name("+3".to_string()));
    }

    #[test]
    fn test_group_ref_display_round_trips_input() {
        assert_eq!(GroupRef::Id(5).to_string(), "5");
        assert_eq!(GroupRef::Name("Team X".into()).to_string(), "Team X");
    }
}
