//! Source-tree scan configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the signature scanner.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScanConfig {
    /// Directory scanned for modules, relative to the repository root. Default: `lib`.
    pub source_root: Option<String>,
    /// Recognized source extensions without the leading dot. Default: `ts`, `tsx`.
    #[serde(default)]
    pub extensions: Vec<String>,
    /// Maximum file size in bytes. Larger files are skipped. Default: 1 MiB.
    pub max_file_size: Option<u64>,
    /// Follow symbolic links while walking. Default: false.
    pub follow_symlinks: Option<bool>,
    /// Honor `.gitignore` files while walking. Default: true.
    pub respect_gitignore: Option<bool>,
    /// Record the current commit in the signature. Default: true.
    pub include_commit: Option<bool>,
    /// Record the current branch in the signature. Default: true.
    pub include_branch: Option<bool>,
    /// Repository URL recorded in the signature. Default: empty.
    pub repository_url: Option<String>,
}

impl ScanConfig {
    pub fn effective_source_root(&self) -> &str {
        self.source_root.as_deref().unwrap_or("lib")
    }

    /// Returns the configured extensions, defaulting to `ts` and `tsx`.
    pub fn effective_extensions(&self) -> Vec<String> {
        if self.extensions.is_empty() {
            vec!["ts".to_string(), "tsx".to_string()]
        } else {
            self.extensions.clone()
        }
    }

    pub fn effective_max_file_size(&self) -> u64 {
        self.max_file_size.unwrap_or(1_048_576)
    }

    pub fn effective_follow_symlinks(&self) -> bool {
        self.follow_symlinks.unwrap_or(false)
    }

    pub fn effective_respect_gitignore(&self) -> bool {
        self.respect_gitignore.unwrap_or(true)
    }

    pub fn effective_include_commit(&self) -> bool {
        self.include_commit.unwrap_or(true)
    }

    pub fn effective_include_branch(&self) -> bool {
        self.include_branch.unwrap_or(true)
    }

    pub fn effective_repository_url(&self) -> &str {
        self.repository_url.as_deref().unwrap_or("")
    }
}
