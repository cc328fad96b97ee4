use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use walkdir::WalkDir;

/// Whether `path` holds git metadata (a `.git` directory, or a `.git` file
/// for worktrees and submodules).
pub fn is_git_repository(path: &Path) -> bool {
    path.join(".git").exists()
}

/// Find git repositories directly under `base_path` or one level below it.
///
/// A child that is itself a repository is not descended into. Entries that
/// cannot be read are skipped. A missing base yields an empty list.
pub fn list_repositories<P: AsRef<Path>>(base_path: P) -> Vec<PathBuf> {
    let base_path = base_path.as_ref();
    if !base_path.exists() {
        debug!(base = %base_path.display(), "base directory missing, nothing to scan");
        return Vec::new();
    }

    let mut repositories = BTreeSet::new();

    let mut walker = WalkDir::new(base_path)
        .min_depth(1)
        .max_depth(2)
        .follow_links(true)
        .into_iter();

    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                trace!(error = %err, "skipping unreadable entry");
                continue;
            }
        };

        if entry.file_type().is_dir() && is_git_repository(entry.path()) {
            if entry.depth() == 1 {
                // Never look inside a top-level repository
                walker.skip_current_dir();
            }
            repositories.insert(entry.into_path());
        }
    }

    debug!(base = %base_path.display(), count = repositories.len(), "discovery finished");
    repositories.into_iter().collect()
}

/// Menu label for a repository: its path relative to the base directory.
pub fn display_label(repo_path: &Path, base_path: &Path) -> String {
    repo_path
        .strip_prefix(base_path)
        .unwrap_or(repo_path)
        .display()
        .to_string()
}
