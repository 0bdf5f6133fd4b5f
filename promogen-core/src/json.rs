//! UTF-8 JSON files with two-space indentation.

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{PromoError, PromoResult};

pub fn read_json<T: DeserializeOwned>(path: &Path) -> PromoResult<T> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|source| PromoError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Non-ASCII text is written as-is, not `\u` escaped.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> PromoResult<()> {
    let mut content = serde_json::to_string_pretty(value).map_err(|source| PromoError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    content.push('\n');
    std::fs::write(path, content)?;
    Ok(())
}
