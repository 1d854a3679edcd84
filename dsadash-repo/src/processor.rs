//! Repository Processor - single entry point for the problems directory
//!
//! Wraps the tree builder, the flat markdown listing and path-checked file reads
//! behind one handle that the web server and the CLI share.

use crate::metadata::extract_metadata;
use crate::reader::read_file;
use crate::tree::TreeBuilder;
use dsadash_core::{
    not_found_error, performance, tree_error, validation_error, DashResult, MarkdownFile,
    ProblemMetadata, RepositoryConfig, TreeNode,
};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Content of one file together with its inferred metadata
#[derive(Debug, Clone, PartialEq)]
pub struct FileWithMetadata {
    pub path: PathBuf,
    pub content: String,
    /// Present for markdown files only
    pub metadata: Option<ProblemMetadata>,
}

/// Repository processor - the main entry point for all repository operations
#[derive(Debug, Clone)]
pub struct RepositoryProcessor {
    root: PathBuf,
    builder: TreeBuilder,
}

impl RepositoryProcessor {
    pub fn new<P: AsRef<Path>>(root: P, builder: TreeBuilder) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            builder,
        }
    }

    pub fn from_config(config: &RepositoryConfig) -> Self {
        Self::new(&config.root, TreeBuilder::from_config(config))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn builder(&self) -> &TreeBuilder {
        &self.builder
    }

    /// Walk the whole repository. Runs a full walk on every call.
    pub fn build_tree(&self) -> DashResult<TreeNode> {
        performance::measure_sync("build_tree", || self.builder.build(&self.root))
    }

    /// Every markdown file under the root, sorted by relative path
    pub fn list_markdown_files(&self) -> DashResult<Vec<MarkdownFile>> {
        let root = self.canonical_root()?;
        let rules = self.builder.rules();
        let mut files = Vec::new();

        let walker = WalkDir::new(&root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !rules.is_ignored_path(entry.path()));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(tree_error!(
                        format!("Cannot list repository root {}: {}", root.display(), e),
                        "repository_processor",
                        e
                    ));
                }
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable entry");
                    continue;
                }
            };

            if !entry.file_type().is_file() || !self.builder.is_markdown(entry.path()) {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(&root) else {
                continue;
            };
            let directory = relative
                .parent()
                .map(|parent| parent.to_string_lossy().into_owned())
                .filter(|parent| !parent.is_empty())
                .unwrap_or_else(|| ".".to_string());

            files.push(MarkdownFile {
                path: entry.path().to_string_lossy().into_owned(),
                relative_path: relative.to_string_lossy().into_owned(),
                name: entry.file_name().to_string_lossy().into_owned(),
                directory,
            });
        }

        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        info!(count = files.len(), "Listed markdown files");
        Ok(files)
    }

    /// Resolve a user-supplied path (absolute or root-relative) to a file inside the root
    pub fn resolve_path(&self, path: &str) -> DashResult<PathBuf> {
        let trimmed = path.trim();
        if trimmed.is_empty() {
            return Err(validation_error!(
                "File path is required",
                "path",
                "repository_processor"
            ));
        }

        let requested = Path::new(trimmed);
        let candidate = if requested.is_absolute() {
            requested.to_path_buf()
        } else {
            if requested
                .components()
                .any(|component| matches!(component, Component::ParentDir))
            {
                return Err(not_found_error!(trimmed, "repository_processor"));
            }
            self.root.join(requested)
        };

        let root = self
            .canonical_root()
            .map_err(|_| not_found_error!(trimmed, "repository_processor"))?;
        let resolved = std::fs::canonicalize(&candidate)
            .map_err(|_| not_found_error!(trimmed, "repository_processor"))?;

        if !resolved.starts_with(&root) {
            debug!(path = %resolved.display(), "Path escapes repository root");
            return Err(not_found_error!(trimmed, "repository_processor"));
        }

        Ok(resolved)
    }

    /// Read one file inside the root; `None` when it is missing or unreadable
    pub fn read_file(&self, path: &str) -> Option<String> {
        self.resolve_path(path).ok().and_then(read_file)
    }

    /// Read one file and infer its metadata from the same content
    pub fn file_with_metadata(&self, path: &str) -> DashResult<FileWithMetadata> {
        let resolved = self.resolve_path(path)?;
        let content =
            read_file(&resolved).ok_or_else(|| not_found_error!(path, "repository_processor"))?;

        let metadata = self
            .builder
            .is_markdown(&resolved)
            .then(|| extract_metadata(&content, &resolved));

        Ok(FileWithMetadata {
            path: resolved,
            content,
            metadata,
        })
    }

    fn canonical_root(&self) -> DashResult<PathBuf> {
        std::fs::canonicalize(&self.root).map_err(|e| {
            tree_error!(
                format!("Cannot resolve repository root {}: {}", self.root.display(), e),
                "repository_processor",
                e
            )
        })
    }
}
