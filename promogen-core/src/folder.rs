//! Event folders: `events/<date>-<slug>/{meta.json, cover.jpg}`.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{PromoError, PromoResult};
use crate::event::{COVER_FILE, EventMeta, META_FILE, NewEvent};

/// Where the cover image comes from.
#[derive(Debug, Clone)]
pub enum CoverSource {
    /// Copy an existing image file byte for byte.
    Copy(PathBuf),
    /// Create an empty `cover.jpg` to be replaced by hand.
    Placeholder,
}

/// What to do when the target folder already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExistingFolder {
    #[default]
    Fail,
    Overwrite,
}

#[derive(Debug, Clone)]
pub struct EventFolder {
    pub path: PathBuf,
    pub meta: EventMeta,
}

impl EventFolder {
    /// Validate `event` and write its folder under `events_dir`.
    ///
    /// Nothing is rolled back on failure: if the cover copy fails, the
    /// folder keeps the `meta.json` that was already written.
    pub fn create(
        events_dir: &Path,
        event: &NewEvent,
        cover: CoverSource,
        existing: ExistingFolder,
    ) -> PromoResult<Self> {
        let valid = event.validate()?;

        if let CoverSource::Copy(source) = &cover {
            if !source.is_file() {
                return Err(PromoError::format(format!(
                    "Cover image not found: {}",
                    source.display()
                )));
            }
        }

        let path = events_dir.join(&valid.folder_name);
        if path.exists() && existing == ExistingFolder::Fail {
            return Err(PromoError::Collision(path));
        }
        std::fs::create_dir_all(&path)?;

        let folder = EventFolder {
            path,
            meta: valid.meta,
        };

        folder.meta.save(&folder.meta_path())?;
        info!(path = %folder.meta_path().display(), "wrote event metadata");

        folder.write_cover(&cover)?;

        Ok(folder)
    }

    pub fn open(path: &Path) -> PromoResult<Self> {
        let meta = EventMeta::load(&path.join(META_FILE))?;
        Ok(EventFolder {
            path: path.to_path_buf(),
            meta,
        })
    }

    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn meta_path(&self) -> PathBuf {
        self.path.join(META_FILE)
    }

    /// The image named in `meta.json` (normally `cover.jpg`).
    pub fn cover_path(&self) -> PathBuf {
        self.path.join(&self.meta.image)
    }

    pub fn has_cover(&self) -> bool {
        self.cover_path().is_file()
    }

    fn write_cover(&self, cover: &CoverSource) -> PromoResult<()> {
        let target = self.path.join(COVER_FILE);

        match cover {
            CoverSource::Copy(source) => {
                // copying a file onto itself truncates it to nothing
                if same_file(source, &target) {
                    info!(path = %target.display(), "cover image already in place");
                    return Ok(());
                }
                std::fs::copy(source, &target)?;
                info!(from = %source.display(), to = %target.display(), "copied cover image");
            }
            CoverSource::Placeholder => {
                // create(true) without truncate keeps a cover that is already there
                OpenOptions::new()
                    .write(true)
                    .create(true)
                    .truncate(false)
                    .open(&target)?;
            }
        }

        Ok(())
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
