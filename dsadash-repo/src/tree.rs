//! Nested directory tree construction

use crate::filter::IgnoreRules;
use crate::metadata::parse_metadata;
use dsadash_core::{
    tree_error, DashResult, DirectoryNode, FileNode, RepositoryConfig, TreeNode,
};
use std::cmp::Ordering;
use std::path::Path;
use tracing::{debug, info, warn};

/// Builds the [`TreeNode`] hierarchy served to the dashboard.
///
/// Every file is listed; only files with the markdown extension carry problem metadata.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    rules: IgnoreRules,
    markdown_extension: String,
    prune_empty_dirs: bool,
}

impl TreeBuilder {
    pub fn new(rules: IgnoreRules) -> Self {
        Self {
            rules,
            markdown_extension: "md".to_string(),
            prune_empty_dirs: true,
        }
    }

    pub fn from_config(config: &RepositoryConfig) -> Self {
        Self {
            rules: IgnoreRules::new(config.ignored_names.iter().cloned()),
            markdown_extension: config.markdown_extension.trim_start_matches('.').to_string(),
            prune_empty_dirs: config.prune_empty_dirs,
        }
    }

    pub fn with_markdown_extension(mut self, extension: impl Into<String>) -> Self {
        self.markdown_extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    pub fn with_prune_empty_dirs(mut self, prune: bool) -> Self {
        self.prune_empty_dirs = prune;
        self
    }

    pub fn rules(&self) -> &IgnoreRules {
        &self.rules
    }

    pub fn is_markdown(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(&self.markdown_extension))
            .unwrap_or(false)
    }

    /// Build the tree rooted at `root`.
    ///
    /// The root itself is always returned, even when empty. Failing to resolve or list
    /// the root is an error; unreadable subdirectories are logged and come back empty.
    pub fn build<P: AsRef<Path>>(&self, root: P) -> DashResult<TreeNode> {
        let root = root.as_ref();
        info!(root = %root.display(), "Building repository tree");

        let canonical = std::fs::canonicalize(root).map_err(|e| {
            tree_error!(
                format!("Cannot resolve repository root {}: {}", root.display(), e),
                "tree_builder",
                e
            )
        })?;

        let entries = std::fs::read_dir(&canonical).map_err(|e| {
            tree_error!(
                format!("Cannot list repository root {}: {}", canonical.display(), e),
                "tree_builder",
                e
            )
        })?;

        let mut node = DirectoryNode::new(display_name(&canonical), path_string(&canonical));
        node.children = self.collect_children(entries);
        sort_children(&mut node.children);

        let tree = TreeNode::Directory(node);
        info!(files = tree.file_count(), "Repository tree built");
        Ok(tree)
    }

    fn collect_children(&self, entries: std::fs::ReadDir) -> Vec<TreeNode> {
        let mut children = Vec::new();

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable directory entry");
                    continue;
                }
            };

            let name = entry.file_name().to_string_lossy().into_owned();
            if self.rules.is_ignored(&name) {
                debug!(name = %name, "Ignoring entry");
                continue;
            }

            // Symlinks are not followed
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(e) => {
                    warn!(name = %name, error = %e, "Cannot determine entry type");
                    continue;
                }
            };

            let path = entry.path();
            if file_type.is_dir() {
                if let Some(dir) = self.build_directory(&path, name) {
                    children.push(dir);
                }
            } else if file_type.is_file() {
                let metadata = if self.is_markdown(&path) {
                    parse_metadata(&path)
                } else {
                    None
                };
                children.push(TreeNode::File(FileNode {
                    name,
                    path: path_string(&path),
                    metadata,
                }));
            }
        }

        children
    }

    fn build_directory(&self, path: &Path, name: String) -> Option<TreeNode> {
        let mut node = DirectoryNode::new(name, path_string(path));

        match std::fs::read_dir(path) {
            Ok(entries) => node.children = self.collect_children(entries),
            Err(e) => warn!(path = %path.display(), error = %e, "Cannot list directory"),
        }

        if self.prune_empty_dirs && node.children.is_empty() {
            debug!(path = %path.display(), "Pruning empty directory");
            return None;
        }

        sort_children(&mut node.children);
        Some(TreeNode::Directory(node))
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::from_config(&RepositoryConfig::default())
    }
}

/// Directories first, then by name in dictionary order
pub fn sort_children(children: &mut [TreeNode]) {
    children.sort_by(compare_nodes);
}

fn compare_nodes(a: &TreeNode, b: &TreeNode) -> Ordering {
    b.is_directory()
        .cmp(&a.is_directory())
        .then_with(|| compare_names(a.name(), b.name()))
}

/// Case-insensitive order; names equal up to case put lowercase first
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let folded = |name: &str| name.chars().flat_map(char::to_lowercase).collect::<Vec<_>>();
    folded(a)
        .cmp(&folded(b))
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path_string(path))
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
