//! Best-effort repository metadata via git2.

use std::path::Path;

use ace_core::constants::{SENTINEL_COMMIT, UNKNOWN_BRANCH};
use git2::Repository;

use super::types::RepositoryInfo;

/// Query commit and branch for the repository containing `root`.
///
/// Each field is independently switchable; any failure substitutes the
/// sentinel commit or `unknown` branch and logs a warning.
pub fn repository_info(
    root: &Path,
    url: &str,
    include_commit: bool,
    include_branch: bool,
) -> RepositoryInfo {
    let mut info = RepositoryInfo {
        url: url.to_string(),
        commit: SENTINEL_COMMIT.to_string(),
        branch: UNKNOWN_BRANCH.to_string(),
    };
    if !include_commit && !include_branch {
        return info;
    }

    let repo = match Repository::discover(root) {
        Ok(repo) => repo,
        Err(e) => {
            tracing::warn!(error = %e.message(), "could not open repository, using sentinel commit and branch");
            return info;
        }
    };

    if include_commit {
        match repo.head().and_then(|head| head.peel_to_commit()) {
            Ok(commit) => info.commit = commit.id().to_string(),
            Err(e) => tracing::warn!(error = %e.message(), "could not resolve HEAD commit"),
        }
    }

    if include_branch {
        match repo.head() {
            Ok(head) => {
                if let Some(name) = head.shorthand() {
                    info.branch = name.to_string();
                }
            }
            Err(e) => tracing::warn!(error = %e.message(), "could not resolve current branch"),
        }
    }

    info
}
