//! Whole-file text reads that degrade to `None`

use std::path::Path;
use tracing::{debug, warn};

/// Read the full text of a regular file.
///
/// Any failure (missing file, permission error, directory, invalid UTF-8) is logged
/// and reported as `None` so a single bad file never aborts a walk.
pub fn read_file<P: AsRef<Path>>(path: P) -> Option<String> {
    let path = path.as_ref();

    match std::fs::metadata(path) {
        Ok(meta) if !meta.is_file() => {
            warn!(path = %path.display(), "Not a regular file");
            return None;
        }
        Ok(_) => {}
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to stat file");
            return None;
        }
    }

    match std::fs::read_to_string(path) {
        Ok(content) => {
            debug!(path = %path.display(), bytes = content.len(), "Read file");
            Some(content)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read file");
            None
        }
    }
}
