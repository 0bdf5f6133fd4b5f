//! Rebuild `events/index.json` from the event folders.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::{info, warn};

use crate::error::{PromoError, PromoResult};
use crate::event::META_FILE;
use crate::folder::EventFolder;
use crate::json::{read_json, write_json};

pub const INDEX_FILE: &str = "index.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub folder: String,
    pub title: String,
    pub starts_at: NaiveDateTime,
}

/// Problems that don't stop the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexWarning {
    MissingImage { folder: String, image: String },
}

#[derive(Debug)]
pub struct IndexReport {
    pub index_path: PathBuf,
    pub entries: Vec<IndexEntry>,
    pub warnings: Vec<IndexWarning>,
}

impl IndexReport {
    pub fn folders(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.folder.clone()).collect()
    }
}

/// Scan every event folder and rewrite the index in chronological order.
///
/// Any unreadable or invalid `meta.json` aborts the build before the index
/// is touched. Events at the same instant are ordered by folder name.
pub fn build_index(events_dir: &Path) -> PromoResult<IndexReport> {
    std::fs::create_dir_all(events_dir)?;

    let mut entries = Vec::new();
    let mut warnings = Vec::new();

    for dir_entry in std::fs::read_dir(events_dir)? {
        let path = dir_entry?.path();
        if !path.is_dir() || !path.join(META_FILE).is_file() {
            continue;
        }

        let folder = EventFolder::open(&path).map_err(|e| in_folder(&path, e))?;
        let starts_at = folder.meta.starts_at().map_err(|e| in_folder(&path, e))?;
        let name = folder.name();

        if !folder.has_cover() {
            warn!(folder = %name, image = %folder.meta.image, "missing image");
            warnings.push(IndexWarning::MissingImage {
                folder: name.clone(),
                image: folder.meta.image.clone(),
            });
        }

        entries.push(IndexEntry {
            folder: name,
            title: folder.meta.title,
            starts_at,
        });
    }

    entries.sort_by(|a, b| {
        a.starts_at
            .cmp(&b.starts_at)
            .then_with(|| a.folder.cmp(&b.folder))
    });

    let index_path = events_dir.join(INDEX_FILE);
    let folders: Vec<&str> = entries.iter().map(|e| e.folder.as_str()).collect();
    write_json(&index_path, &folders)?;
    info!(path = %index_path.display(), events = entries.len(), "wrote index");

    Ok(IndexReport {
        index_path,
        entries,
        warnings,
    })
}

/// Folder names from an existing index, or an empty list if there is none.
pub fn read_index(events_dir: &Path) -> PromoResult<Vec<String>> {
    let path = events_dir.join(INDEX_FILE);
    if !path.exists() {
        return Ok(Vec::new());
    }
    read_json(&path)
}

fn in_folder(path: &Path, err: PromoError) -> PromoError {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    match err {
        PromoError::Format(msg) => PromoError::Format(format!("{name}: {msg}")),
        PromoError::Json { source, .. } => {
            PromoError::Format(format!("{name}/{META_FILE}: {source}"))
        }
        other => other,
    }
}
