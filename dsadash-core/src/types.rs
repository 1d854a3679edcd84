//! Core data type definitions

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// One entry of the rendered repository structure.
///
/// Serialized with a `type` discriminator (`"directory"` or `"file"`), so a file node
/// never carries `children` and a directory node never carries `metadata`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TreeNode {
    Directory(DirectoryNode),
    File(FileNode),
}

impl TreeNode {
    pub fn name(&self) -> &str {
        match self {
            TreeNode::Directory(dir) => &dir.name,
            TreeNode::File(file) => &file.name,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            TreeNode::Directory(dir) => &dir.path,
            TreeNode::File(file) => &file.path,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, TreeNode::Directory(_))
    }

    /// Children of a directory node; empty for files
    pub fn children(&self) -> &[TreeNode] {
        match self {
            TreeNode::Directory(dir) => &dir.children,
            TreeNode::File(_) => &[],
        }
    }

    /// Total number of file leaves below (and including) this node
    pub fn file_count(&self) -> usize {
        match self {
            TreeNode::Directory(dir) => dir.children.iter().map(TreeNode::file_count).sum(),
            TreeNode::File(_) => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryNode {
    pub name: String,
    pub path: String,
    pub children: Vec<TreeNode>,
}

impl DirectoryNode {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileNode {
    pub name: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ProblemMetadata>,
}

/// Problem difficulty label
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(from = "String", into = "String")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Unknown,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Unknown => "Unknown",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Unknown
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "unknown" => Ok(Difficulty::Unknown),
            other => Err(format!("unrecognized difficulty label: {}", other)),
        }
    }
}

impl From<String> for Difficulty {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl From<Difficulty> for String {
    fn from(value: Difficulty) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata inferred from a markdown problem file. Computed on every read, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ProblemMetadata {
    pub title: String,
    /// `None` when the document is not a solution document
    pub difficulty: Option<Difficulty>,
    pub is_solved: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Flat listing entry for a markdown file under the repository root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct MarkdownFile {
    pub path: String,
    pub relative_path: String,
    pub name: String,
    pub directory: String,
}

/// Per-topic counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct TopicStat {
    pub name: String,
    pub total: u64,
    pub solved: u64,
}

/// One tracked problem inside a topic.
///
/// `difficulty` is kept exactly as stored so it stays in step with the
/// `difficultyStats` keys it was counted under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ProblemDetail {
    pub name: String,
    pub solved: bool,
    #[serde(default = "unknown_difficulty")]
    pub difficulty: String,
}

impl ProblemDetail {
    pub fn new(name: impl Into<String>, solved: bool, difficulty: Difficulty) -> Self {
        Self {
            name: name.into(),
            solved,
            difficulty: difficulty.as_str().to_string(),
        }
    }
}

fn unknown_difficulty() -> String {
    Difficulty::Unknown.as_str().to_string()
}

/// The single aggregate progress record. Loaded as-is: labels and the
/// `lastUpdated` stamp are free-form strings and round-trip untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct StatisticsDocument {
    #[serde(default)]
    pub total_problems: u64,
    #[serde(default)]
    pub solved_problems: u64,
    #[serde(default)]
    pub difficulty_stats: BTreeMap<String, u64>,
    #[serde(default)]
    pub topic_stats: Vec<TopicStat>,
    #[serde(default)]
    pub problem_details: BTreeMap<String, Vec<ProblemDetail>>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

impl StatisticsDocument {
    /// Record a change now, as an RFC 3339 UTC timestamp with milliseconds
    pub fn touch(&mut self) {
        self.last_updated = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));
    }

    pub fn topic_stat_mut(&mut self, topic: &str) -> Option<&mut TopicStat> {
        self.topic_stats.iter_mut().find(|stat| stat.name == topic)
    }

    /// Check the counter invariants; returns a description of the first violation
    pub fn check_consistency(&self) -> Result<(), String> {
        if self.solved_problems > self.total_problems {
            return Err(format!(
                "solvedProblems ({}) exceeds totalProblems ({})",
                self.solved_problems, self.total_problems
            ));
        }
        for stat in &self.topic_stats {
            if stat.solved > stat.total {
                return Err(format!(
                    "topic '{}' has solved ({}) greater than total ({})",
                    stat.name, stat.solved, stat.total
                ));
            }
        }
        Ok(())
    }
}
