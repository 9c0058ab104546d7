//
//  gitlab-admin
//  util/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Utility Module
//!
//! Filesystem helpers used by the seeding workflow, plus a few display
//! helpers for CLI output.
//!
//! ## Categories
//!
//! - **Filesystem**: [`copy_tree`], [`remove_dir_if_exists`],
//!   [`create_file_with_content`], [`replace_placeholder_in_file`]
//! - **Display**: [`truncate`], [`format_relative_time`]
//!
//! ## Example
//!
//! ```rust,no_run
//! use gitlab_admin::util::{copy_tree, remove_dir_if_exists};
//!
//! fn seed() -> anyhow::Result<()> {
//!     let copied = copy_tree("/tmp/template".as_ref(), "/tmp/new-project".as_ref())?;
//!     println!("copied {} files", copied);
//!     remove_dir_if_exists("/tmp/template".as_ref())?;
//!     Ok(())
//! }
//! ```

use std::fs;
use std::path::{Component, Path};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use regex::Regex;
use walkdir::WalkDir;

/// Copies every file under `source` into `destination`, skipping `.git`.
///
/// Directories are created as needed and existing files are overwritten.
/// Returns the number of files copied.
///
/// # Errors
///
/// Returns an error if `source` cannot be walked or a file cannot be
/// copied.
pub fn copy_tree(source: &Path, destination: &Path) -> Result<usize> {
    fs::create_dir_all(destination)
        .with_context(|| format!("Failed to create {}", destination.display()))?;

    let mut copied = 0;
    let walker = WalkDir::new(source)
        .min_depth(1)
        .into_iter()
        .filter_entry(|entry| entry.file_name() != ".git");

    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to read {}", source.display()))?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .with_context(|| format!("{} is outside {}", entry.path().display(), source.display()))?;
        let target = destination.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create {}", target.display()))?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target).with_context(|| {
                format!("Failed to copy {} to {}", entry.path().display(), target.display())
            })?;
            copied += 1;
        }
    }

    tracing::debug!(from = %source.display(), to = %destination.display(), copied, "copied tree");
    Ok(copied)
}

/// Recursively removes a directory. A missing directory is not an error.
pub fn remove_dir_if_exists(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Writes `content` to `directory/file_name`, creating the directory.
///
/// `file_name` must be a plain relative path without `..` components.
pub fn create_file_with_content(directory: &Path, file_name: &str, content: &str) -> Result<()> {
    let relative = Path::new(file_name);
    if relative.is_absolute() || relative.components().any(|c| c == Component::ParentDir) {
        anyhow::bail!("Refusing to write outside {}: {}", directory.display(), file_name);
    }

    let path = directory.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Replaces the value of a `key<separator>value` entry in a text file.
///
/// Every line whose key matches and whose value is exactly `old_value`
/// gets `new_value` instead; indentation and spacing around the separator
/// are kept. Returns how many lines changed.
///
/// # Example
///
/// Given a `.gitlab-ci.yml` line
/// `  TF_VAR_WORKSPACE: "<enter-workload-name>"`, calling
/// `replace_placeholder_in_file(path, "TF_VAR_WORKSPACE", "\"<enter-workload-name>\"", "\"payments\"", ":")`
/// rewrites it to `  TF_VAR_WORKSPACE: "payments"`.
pub fn replace_placeholder_in_file(
    path: &Path,
    key: &str,
    old_value: &str,
    new_value: &str,
    separator: &str,
) -> Result<usize> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;

    let pattern = format!(
        r"(?m)^(?P<lead>[ \t]*{}[ \t]*{}[ \t]*){}(?P<trail>[ \t]*\r?)$",
        regex::escape(key),
        regex::escape(separator),
        regex::escape(old_value)
    );
    let re = Regex::new(&pattern).context("Invalid placeholder pattern")?;

    let count = re.find_iter(&content).count();
    if count > 0 {
        let replacement = format!("${{lead}}{}${{trail}}", new_value.replace('$', "$$"));
        let updated = re.replace_all(&content, replacement.as_str());
        fs::write(path, updated.as_ref())
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    tracing::debug!(path = %path.display(), key, count, "replaced placeholder");
    Ok(count)
}

/// Truncates to at most `max_len` characters, ending with "..." when cut.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    } else {
        s.chars().take(max_len).collect()
    }
}

/// Formats a timestamp relative to now ("3 days ago").
pub fn format_relative_time(timestamp: DateTime<Utc>) -> String {
    let diff = Utc::now().signed_duration_since(timestamp).num_seconds();

    if diff < 0 {
        return "in the future".to_string();
    }

    let diff = diff as u64;
    let (value, unit) = if diff < 60 {
        return "just now".to_string();
    } else if diff < 3600 {
        (diff / 60, "minute")
    } else if diff < 86400 {
        (diff / 3600, "hour")
    } else if diff < 604800 {
        (diff / 86400, "day")
    } else if diff < 2592000 {
        (diff / 604800, "week")
    } else if diff < 31536000 {
        (diff / 2592000, "month")
    } else {
        (diff / 31536000, "year")
    };

    format!("{} {}{} ago", value, unit, if value == 1 { "" } else { "s" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("héllo wörld", 8), "héllo...");
    }

    #[test]
    fn test_format_relative_time() {
        assert_eq!(format_relative_time(Utc::now()), "just now");
        assert_eq!(format_relative_time(Utc::now() - Duration::hours(2)), "2 hours ago");
        assert_eq!(format_relative_time(Utc::now() - Duration::days(1)), "1 day ago");
        assert_eq!(
            format_relative_time(Utc::now() + Duration::hours(1)),
            "in the future"
        );
    }
}
