//! Problem metadata inference for markdown files
//!
//! Classification is a best-effort heuristic over unstructured text: a document counts
//! as a solution document when it carries a problem reference, a "Problem Statement"
//! or a `## Problem` heading. Everything else (topic indexes, READMEs) gets no
//! difficulty and is never marked solved.

use crate::reader::read_file;
use dsadash_core::{Difficulty, ProblemMetadata};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Literal markers that identify a solution document
pub const SOLUTION_MARKERS: &[&str] = &["LeetCode:", "Problem Statement"];

/// Literal markers that show a solution has been written down
pub const SOLVED_MARKERS: &[&str] = &["Solution", "```", "~~~"];

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#+[ \t]+(\S.*)$").expect("valid heading pattern"));

static PROBLEM_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^##[ \t]*problem").expect("valid problem pattern"));

static DIFFICULTY_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)difficulty:[ \t]*(easy|medium|hard)\b").expect("valid difficulty pattern")
});

static DIFFICULTY_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[(easy|medium|hard)\]").expect("valid difficulty token pattern")
});

static TAGS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^[ \t]*tags:[ \t]*\[(.*)\]").expect("valid tags pattern"));

/// Read `path` and infer its metadata; `None` when the file cannot be read
pub fn parse_metadata<P: AsRef<Path>>(path: P) -> Option<ProblemMetadata> {
    let path = path.as_ref();
    read_file(path).map(|content| extract_metadata(&content, path))
}

/// Infer metadata from already-loaded text. Never fails; missing pieces fall back to defaults.
pub fn extract_metadata(content: &str, path: &Path) -> ProblemMetadata {
    let title = extract_title(content).unwrap_or_else(|| fallback_title(path));
    let tags = extract_tags(content);

    if !is_solution_document(content) {
        return ProblemMetadata {
            title,
            difficulty: None,
            is_solved: false,
            tags,
        };
    }

    ProblemMetadata {
        title,
        difficulty: Some(extract_difficulty(content)),
        is_solved: SOLVED_MARKERS.iter().any(|marker| content.contains(marker)),
        tags,
    }
}

/// Text of the first markdown heading, at any level
pub fn extract_title(content: &str) -> Option<String> {
    HEADING_RE
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|title| !title.is_empty())
}

pub fn is_solution_document(content: &str) -> bool {
    SOLUTION_MARKERS.iter().any(|marker| content.contains(marker))
        || PROBLEM_HEADING_RE.is_match(content)
}

/// `Difficulty: <word>` wins over a bracketed `[<word>]`; anything else is `Unknown`
pub fn extract_difficulty(content: &str) -> Difficulty {
    DIFFICULTY_LINE_RE
        .captures(content)
        .or_else(|| DIFFICULTY_TOKEN_RE.captures(content))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(Difficulty::Unknown)
}

/// Items of the first `tags: [a, b, c]` line, trimmed and unquoted
pub fn extract_tags(content: &str) -> Vec<String> {
    let Some(list) = TAGS_RE.captures(content).and_then(|caps| caps.get(1)) else {
        return Vec::new();
    };

    list.as_str()
        .split(',')
        .map(|tag| tag.trim().trim_matches(|c: char| c == '"' || c == '\'').trim())
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

fn fallback_title(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_SUM: &str = "# Two Sum\n\n## Problem Statement\n\nGiven an array... Difficulty: Easy\n";

    #[test]
    fn test_solution_document_without_solution() {
        let metadata = extract_metadata(TWO_SUM, Path::new("two_sum.md"));
        assert_eq!(metadata.title, "Two Sum");
        assert_eq!(metadata.difficulty, Some(Difficulty::Easy));
        assert!(!metadata.is_solved);
        assert!(metadata.tags.is_empty());
    }

    #[test]
    fn test_solution_markers_mark_solved() {
        let with_heading = format!("{}\n## Solution\n\nUse a hash map.\n", TWO_SUM);
        assert!(extract_metadata(&with_heading, Path::new("a.md")).is_solved);

        let with_code = format!("{}\n```rust\nfn main() {{}}\n```\n", TWO_SUM);
        assert!(extract_metadata(&with_code, Path::new("a.md")).is_solved);
    }

    #[test]
    fn test_index_documents_are_not_classified() {
        let readme = "# Arrays & Hashing\n\nDifficulty: Hard\n\n## Solution index\n```\nlist\n```\n";
        let metadata = extract_metadata(readme, Path::new("README.md"));
        assert_eq!(metadata.title, "Arrays & Hashing");
        assert_eq!(metadata.difficulty, None);
        assert!(!metadata.is_solved);
    }

    #[test]
    fn test_title_falls_back_to_file_stem() {
        let metadata = extract_metadata("no heading here\n", Path::new("/data/DSA/foo.md"));
        assert_eq!(metadata.title, "foo");

        let empty = extract_metadata("", Path::new("valid_anagram.md"));
        assert_eq!(empty.title, "valid_anagram");
        assert_eq!(empty.difficulty, None);
        assert!(!empty.is_solved);
        assert!(empty.tags.is_empty());
    }

    #[test]
    fn test_first_heading_wins_at_any_level() {
        let content = "intro text\n## Container With Most Water\n# Later Title\n";
        assert_eq!(
            extract_title(content).as_deref(),
            Some("Container With Most Water")
        );
        assert_eq!(extract_title("#hashtag only\n"), None);
        assert_eq!(extract_title("#   \n"), None);
    }

    #[test]
    fn test_problem_heading_classification() {
        assert!(is_solution_document("## problem\nsomething"));
        assert!(is_solution_document("LeetCode: 217"));
        assert!(!is_solution_document("### Problems in this topic"));
        assert!(!is_solution_document("# Problem list"));
    }

    #[test]
    fn test_difficulty_forms() {
        assert_eq!(extract_difficulty("Difficulty: medium"), Difficulty::Medium);
        assert_eq!(extract_difficulty("Valid Sudoku [HARD]"), Difficulty::Hard);
        assert_eq!(
            extract_difficulty("Difficulty: Easy\nalso [Hard]"),
            Difficulty::Easy
        );
        // Labels outside the allowed set are ignored
        assert_eq!(extract_difficulty("Difficulty: Extreme"), Difficulty::Unknown);
        assert_eq!(
            extract_difficulty("Difficulty: Extreme [Medium]"),
            Difficulty::Medium
        );
        assert_eq!(extract_difficulty("nothing"), Difficulty::Unknown);
    }

    #[test]
    fn test_unknown_difficulty_for_solution_document() {
        let metadata = extract_metadata("# Trapping Rain Water\n## Problem\n", Path::new("t.md"));
        assert_eq!(metadata.difficulty, Some(Difficulty::Unknown));
    }

    #[test]
    fn test_tags_are_trimmed_and_unquoted() {
        let content = "# Group Anagrams\ntags: [\"hashing\", 'sorting' , strings]\n";
        assert_eq!(
            extract_tags(content),
            vec!["hashing".to_string(), "sorting".to_string(), "strings".to_string()]
        );
        assert!(extract_tags("tags: []").is_empty());
        assert!(extract_tags("no tags").is_empty());
    }

    #[test]
    fn test_parse_metadata_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("two_sum.md");
        std::fs::write(&path, TWO_SUM).unwrap();

        let metadata = parse_metadata(&path).unwrap();
        assert_eq!(metadata.title, "Two Sum");
        assert!(parse_metadata(dir.path().join("missing.md")).is_none());
    }
}
