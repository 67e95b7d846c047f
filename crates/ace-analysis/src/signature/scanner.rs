//! Source-tree walk producing module signatures.

use std::path::{Path, PathBuf};

use ace_core::config::ScanConfig;
use ace_core::errors::SignatureError;
use ignore::WalkBuilder;
use serde_json::json;

use super::extract::{extract_exports, extract_imports};
use super::layers::determine_layer;
use super::types::ModuleSignature;
use crate::hashing::hash_object;

/// Directories never descended into, even when not gitignored.
const SKIP_DIRS: &[&str] = &[".git", "node_modules"];

/// Walks the configured source root and analyzes every recognized source file.
pub struct ModuleScanner {
    config: ScanConfig,
}

impl ModuleScanner {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Scan `repo_root/<source_root>`. Unreadable entries are skipped with a
    /// warning; a missing source root yields an empty list.
    /// The result is sorted by module name, then path.
    pub fn scan(&self, repo_root: &Path) -> Vec<ModuleSignature> {
        let source_root = repo_root.join(self.config.effective_source_root());
        if !source_root.is_dir() {
            tracing::warn!(path = %source_root.display(), "source root not found, no modules scanned");
            return Vec::new();
        }

        let extensions = self.config.effective_extensions();
        let max_file_size = self.config.effective_max_file_size();

        let walker = WalkBuilder::new(&source_root)
            .hidden(false)
            .follow_links(self.config.effective_follow_symlinks())
            .git_ignore(self.config.effective_respect_gitignore())
            .git_exclude(self.config.effective_respect_gitignore())
            .parents(self.config.effective_respect_gitignore())
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(|entry| {
                let name = entry.file_name().to_string_lossy();
                !SKIP_DIRS.iter().any(|skip| *skip == name)
            })
            .build();

        let mut modules = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let err = SignatureError::Walk(e.to_string());
                    tracing::warn!(error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let path = entry.path();
            if !has_extension(path, &extensions) {
                continue;
            }
            if let Ok(meta) = entry.metadata() {
                if meta.len() > max_file_size {
                    tracing::debug!(path = %path.display(), size = meta.len(), "skipping oversized file");
                    continue;
                }
            }
            match analyze_module(repo_root, path) {
                Ok(module) => modules.push(module),
                Err(e) => tracing::warn!(error = %e, "skipping unreadable module"),
            }
        }

        modules.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.path.cmp(&b.path)));
        modules
    }
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|want| want == ext))
}

/// Repository-relative path with `/` separators.
pub fn relative_path(repo_root: &Path, path: &Path) -> String {
    let rel: PathBuf = path.strip_prefix(repo_root).unwrap_or(path).to_path_buf();
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Build the signature of one source file.
pub fn analyze_module(repo_root: &Path, path: &Path) -> Result<ModuleSignature, SignatureError> {
    let content = std::fs::read_to_string(path).map_err(|e| SignatureError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let rel = relative_path(repo_root, path);
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(ModuleSignature {
        hash: hash_object(&json!({ "path": rel, "content": content }), false),
        layer: determine_layer(&rel).to_string(),
        exports: extract_exports(&content),
        imports: extract_imports(&content),
        name,
        path: rel,
    })
}
