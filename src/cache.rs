// src/cache.rs
//
// Keyed get-or-compute over the local filesystem. Keys are relative paths
// under the store root; a `.json` key declares a structured payload, any
// other key is raw text stored verbatim. No eviction, no expiry: entries
// live until the operator deletes them.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use tracing::info;

use crate::BoxError;

pub struct Store {
    root: PathBuf,
}

impl Store {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Whether a value is already persisted at `key`.
    pub fn exists(&self, key: &str) -> bool {
        self.root.join(key).exists()
    }

    /// Raw-text payload: stored verbatim, returned verbatim.
    ///
    /// `use_cache = false` always invokes the producer and touches no
    /// persisted state, in either direction.
    pub fn text<F>(&self, key: &str, use_cache: bool, producer: F) -> Result<String, BoxError>
    where
        F: FnOnce() -> Result<String, BoxError>,
    {
        let path = self.root.join(key);
        if use_cache {
            if let Some(cached) = read_opt(&path)? {
                info!("get data from {}", path.display());
                return Ok(cached);
            }
        }
        let value = producer()?;
        if use_cache {
            write_creating_dirs(&path, &value)?;
        }
        Ok(value)
    }

    /// Structured payload: serialized on write, deserialized on read.
    /// Round-trip preserves the field set and values; field order follows
    /// the type's declaration.
    pub fn json<T, F>(&self, key: &str, use_cache: bool, producer: F) -> Result<T, BoxError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Result<T, BoxError>,
    {
        let path = self.root.join(key);
        if use_cache {
            if let Some(cached) = read_opt(&path)? {
                info!("get data from {}", path.display());
                return Ok(serde_json::from_str(&cached)?);
            }
        }
        let value = producer()?;
        if use_cache {
            write_creating_dirs(&path, &serde_json::to_string_pretty(&value)?)?;
        }
        Ok(value)
    }
}

fn read_opt(path: &Path) -> Result<Option<String>, BoxError> {
    if path.exists() {
        Ok(Some(fs::read_to_string(path)?))
    } else {
        Ok(None)
    }
}

fn write_creating_dirs(path: &Path, contents: &str) -> Result<(), BoxError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    info!("write data to {}", path.display());
    fs::write(path, contents)?;
    Ok(())
}
