//! Entry filtering for the repository walk

use std::collections::BTreeSet;
use std::path::Path;

/// Names skipped while walking the repository.
///
/// Dot-prefixed names are always skipped; the configured set covers things like
/// the dashboard's own UI project and dependency caches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreRules {
    ignored_names: BTreeSet<String>,
}

impl IgnoreRules {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ignored_names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Only hidden entries are skipped
    pub fn hidden_only() -> Self {
        Self {
            ignored_names: BTreeSet::new(),
        }
    }

    pub fn add_name(&mut self, name: impl Into<String>) {
        self.ignored_names.insert(name.into());
    }

    pub fn is_ignored(&self, name: &str) -> bool {
        name.starts_with('.') || self.ignored_names.contains(name)
    }

    /// Check the final component of `path`; paths without a file name are kept
    pub fn is_ignored_path<P: AsRef<Path>>(&self, path: P) -> bool {
        path.as_ref()
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| self.is_ignored(name))
            .unwrap_or(false)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.ignored_names.iter().map(String::as_str)
    }
}

impl Default for IgnoreRules {
    fn default() -> Self {
        Self::new(dsadash_core::RepositoryConfig::default().ignored_names)
    }
}
