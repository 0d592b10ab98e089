//! Collection discovery rules.
//!
//! Each collection declares a base directory (relative to the content root)
//! and a glob pattern matched against paths relative to that base. Discovery
//! walks the base directory and derives an entry id from each matching path:
//! the relative path with its extension stripped and forward slashes, e.g.
//! `notes/course-a/lesson/intro/index.md` → `course-a/lesson/intro/index`.

use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobMatcher};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Discovery rule of one collection: base directory + filename glob.
#[derive(Debug, Clone, Copy)]
pub struct LoaderRule {
    /// Directory under the content root, e.g. `posts`
    pub base: &'static str,
    /// Glob pattern matched against paths relative to `base`.
    /// `[!_]` excludes underscore-prefixed (draft/partial) filenames.
    pub pattern: &'static str,
}

/// A discovered source file before parsing.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub id: String,
    pub path: PathBuf,
}

impl LoaderRule {
    pub const fn new(base: &'static str, pattern: &'static str) -> Self {
        Self { base, pattern }
    }

    /// Enumerate matching source files under `content_root`, sorted by id.
    ///
    /// A missing base directory is an empty collection, not an error.
    pub fn discover(&self, content_root: &Path) -> Result<Vec<SourceFile>> {
        let base = content_root.join(self.base);
        if !base.is_dir() {
            return Ok(Vec::new());
        }

        let matcher = self.matcher()?;
        let mut files = Vec::new();

        for entry in WalkDir::new(&base) {
            let entry = entry
                .with_context(|| format!("Failed to walk {}", base.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }

            // strip_prefix cannot fail: every entry lives under `base`
            let Ok(relative) = entry.path().strip_prefix(&base) else {
                continue;
            };
            if matcher.is_match(relative) {
                files.push(SourceFile {
                    id: entry_id(relative),
                    path: entry.path().to_path_buf(),
                });
            }
        }

        files.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(files)
    }

    fn matcher(&self) -> Result<GlobMatcher> {
        let glob = GlobBuilder::new(self.pattern)
            .literal_separator(true)
            .build()
            .with_context(|| format!("Invalid glob pattern `{}`", self.pattern))?;
        Ok(glob.compile_matcher())
    }
}

/// Derive an entry id from a path relative to the collection base.
fn entry_id(relative: &Path) -> String {
    let without_extension = relative.with_extension("");
    without_extension.to_string_lossy().replace('\\', "/")
}
