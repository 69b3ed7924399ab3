//! Path resolution for meshes and textures

use std::path::{Path, PathBuf};

/// Turns a relative or symbolic path into an existing absolute path
pub trait FileResolver {
    /// Absolute path for `path`, or `None` if it cannot be found
    fn find_file(&self, path: &str) -> Option<PathBuf>;
}

impl<F> FileResolver for F
where
    F: Fn(&str) -> Option<PathBuf>,
{
    fn find_file(&self, path: &str) -> Option<PathBuf> {
        self(path)
    }
}

/// Resolves paths against the file system and a list of search roots
///
/// A `file://` prefix is stripped. Paths that already exist (absolute, or
/// relative to the working directory) are returned as-is; otherwise each
/// search root is tried in order.
#[derive(Debug, Clone, Default)]
pub struct SearchPathResolver {
    search_paths: Vec<PathBuf>,
}

impl SearchPathResolver {
    /// Resolver with no search roots
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver probing `paths` in order
    pub fn with_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            search_paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Append a search root
    pub fn add_search_path(&mut self, path: impl Into<PathBuf>) {
        self.search_paths.push(path.into());
    }

    /// Configured search roots
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }
}

impl FileResolver for SearchPathResolver {
    fn find_file(&self, path: &str) -> Option<PathBuf> {
        let trimmed = path.strip_prefix("file://").unwrap_or(path);
        if trimmed.is_empty() {
            return None;
        }

        let candidate = Path::new(trimmed);
        if candidate.exists() {
            return Some(absolute(candidate));
        }
        if candidate.is_absolute() {
            return None;
        }

        self.search_paths
            .iter()
            .map(|root| root.join(candidate))
            .find(|joined| joined.exists())
            .map(|joined| absolute(&joined))
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
