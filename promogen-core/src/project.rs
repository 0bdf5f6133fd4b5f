//! Site repository root and the paths derived from it.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::PromogenConfig;
use crate::error::PromoResult;
use crate::index::INDEX_FILE;

/// How many ancestors `find_repo_root` checks above the start directory.
const MAX_PARENT_DEPTH: usize = 20;

/// Walk up from `start` to the first directory containing `.git`.
pub fn find_repo_root(start: &Path) -> Option<PathBuf> {
    let start = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());

    start
        .ancestors()
        .take(MAX_PARENT_DEPTH + 1)
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    events_dir: PathBuf,
}

impl Project {
    pub fn new(root: PathBuf, events_dir: &Path) -> Self {
        let events_dir = root.join(events_dir);
        Project { root, events_dir }
    }

    /// Pick the root: explicit override, then config, then the enclosing
    /// git repository, then the current directory.
    pub fn discover(config: &PromogenConfig, root_override: Option<&Path>) -> PromoResult<Self> {
        let cwd = std::env::current_dir()?;

        let root = root_override
            .map(Path::to_path_buf)
            .or_else(|| config.root_path())
            .or_else(|| find_repo_root(&cwd))
            .unwrap_or(cwd);

        debug!(root = %root.display(), "resolved project root");
        Ok(Project::new(root, &config.events_dir))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn events_dir(&self) -> &Path {
        &self.events_dir
    }

    pub fn index_path(&self) -> PathBuf {
        self.events_dir.join(INDEX_FILE)
    }

    /// `events_dir` relative to the root, for git pathspecs.
    pub fn events_pathspec(&self) -> String {
        let relative = self
            .events_dir
            .strip_prefix(&self.root)
            .unwrap_or(&self.events_dir);
        format!("{}/", relative.to_string_lossy().trim_end_matches('/'))
    }
}
