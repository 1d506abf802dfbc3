use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::loader;
use super::model::Dataset;
use crate::error::LoadError;

/// Identity of a data source: its canonical path when it can be resolved,
/// otherwise the path as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(PathBuf);

impl SourceId {
    pub fn new(path: &Path) -> Self {
        SourceId(std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf()))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// Datasets loaded so far, one per source, for the lifetime of the owner.
///
/// Entries are never invalidated. Failed loads are not stored, so asking
/// again retries from disk.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<SourceId, Arc<Dataset>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached dataset for `path`, loading it on first use.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<Dataset>, LoadError> {
        self.get_or_load_with(path, loader::load)
    }

    /// As [`get_or_load`](Self::get_or_load) with a custom loader.
    pub fn get_or_load_with<F>(&mut self, path: &Path, load: F) -> Result<Arc<Dataset>, LoadError>
    where
        F: FnOnce(&Path) -> Result<Dataset, LoadError>,
    {
        let id = SourceId::new(path);
        if let Some(dataset) = self.entries.get(&id) {
            log::debug!("Cache hit for {}", id.path().display());
            return Ok(Arc::clone(dataset));
        }

        let dataset = Arc::new(load(path)?);
        self.entries.insert(id, Arc::clone(&dataset));
        Ok(dataset)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(&SourceId::new(path))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
