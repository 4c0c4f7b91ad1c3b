//! Catalog load and persist

use std::path::Path;

use assetsync_core::write_atomic;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::CatalogError;

/// Fail with [`CatalogError::Missing`] unless `path` exists.
pub fn require(path: &Path) -> Result<(), CatalogError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(CatalogError::Missing(path.to_path_buf()))
    }
}

/// Load a JSON array of records
pub fn load_catalog<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, CatalogError> {
    require(path)?;
    let content = std::fs::read(path).map_err(|e| CatalogError::io(path, e))?;
    serde_json::from_slice(&content).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Persist records as pretty JSON (2-space indent, UTF-8 unescaped),
/// replacing `path` atomically.
pub fn save_catalog<T: Serialize>(path: &Path, records: &[T]) -> Result<(), CatalogError> {
    let mut content = serde_json::to_vec_pretty(records).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    content.push(b'\n');
    write_atomic(path, &content).map_err(|e| CatalogError::io(path, e))
}
