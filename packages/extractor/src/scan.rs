//! Input enumeration.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::ExtractorConfig;

/// Collect every accepted input under `root`, recursively, in lexical path
/// order.
///
/// A missing root is logged and yields no inputs. Unreadable directory
/// entries are skipped.
#[must_use]
pub fn collect_inputs(root: &Path, config: &ExtractorConfig) -> Vec<PathBuf> {
    if !root.exists() {
        tracing::warn!(root = %root.display(), "Input directory does not exist");
        return Vec::new();
    }

    let mut inputs = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unreadable directory entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| config.accepts_extension(path))
        .collect::<Vec<_>>();

    inputs.sort();
    tracing::debug!(root = %root.display(), count = inputs.len(), "Collected inputs");
    inputs
}
