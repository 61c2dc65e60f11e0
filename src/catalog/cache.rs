//! Local cache of fetched pages and details.

use std::collections::HashMap;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::catalog::error::CatalogError;
use crate::catalog::mapper::{DetailRecord, PageRecord};
use crate::catalog::model::PageToken;

/// Persistence for previously fetched catalog data.
pub trait CacheStore: Send + Sync {
    fn read_page(&self, token: PageToken) -> Result<Option<PageRecord>, CatalogError>;

    fn write_page(&self, record: &PageRecord) -> Result<(), CatalogError>;

    fn read_detail(&self, id: u32) -> Result<Option<DetailRecord>, CatalogError>;

    fn write_detail(&self, record: &DetailRecord) -> Result<(), CatalogError>;
}

/// Stores each record as a JSON file below a root directory.
///
/// Layout: `pages/{offset}-{limit}.json` and `details/{id}.json`.
pub struct FileCacheStore {
    root: PathBuf,
}

impl FileCacheStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Default cache location: `~/.cache/pokelist` or platform equivalent.
    pub fn default_dir() -> PathBuf {
        let cache_dir = dirs::cache_dir().unwrap_or_else(|| PathBuf::from("."));
        cache_dir.join("pokelist")
    }

    fn page_path(&self, token: PageToken) -> PathBuf {
        self.root
            .join("pages")
            .join(format!("{}-{}.json", token.offset, token.limit))
    }

    fn detail_path(&self, id: u32) -> PathBuf {
        self.root.join("details").join(format!("{id}.json"))
    }

    fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, CatalogError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&content) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                // A corrupt entry is a miss; the next successful fetch rewrites it.
                tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable cache entry");
                Ok(None)
            }
        }
    }

    /// Write through a uniquely named temp file in the target directory, so
    /// concurrent writers of one record never see each other's partial files.
    fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), CatalogError> {
        let parent = path
            .parent()
            .ok_or_else(|| CatalogError::Cache(format!("invalid cache path '{}'", path.display())))?;
        fs::create_dir_all(parent)?;
        let temp_file = NamedTempFile::new_in(parent)?;
        let mut writer = BufWriter::new(&temp_file);
        serde_json::to_writer(&mut writer, value).map_err(|e| CatalogError::Cache(e.to_string()))?;
        writer.flush()?;
        drop(writer);
        temp_file.persist(path).map_err(|e| CatalogError::from(e.error))?;
        Ok(())
    }
}

impl CacheStore for FileCacheStore {
    fn read_page(&self, token: PageToken) -> Result<Option<PageRecord>, CatalogError> {
        Self::read_json(&self.page_path(token))
    }

    fn write_page(&self, record: &PageRecord) -> Result<(), CatalogError> {
        let token = PageToken {
            offset: record.offset,
            limit: record.limit,
        };
        Self::write_json(&self.page_path(token), record)
    }

    fn read_detail(&self, id: u32) -> Result<Option<DetailRecord>, CatalogError> {
        Self::read_json(&self.detail_path(id))
    }

    fn write_detail(&self, record: &DetailRecord) -> Result<(), CatalogError> {
        Self::write_json(&self.detail_path(record.detail.id), record)
    }
}

/// In-process cache, used when disk caching is disabled and in tests.
#[derive(Default)]
pub struct MemoryCacheStore {
    pages: Mutex<HashMap<PageToken, PageRecord>>,
    details: Mutex<HashMap<u32, DetailRecord>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStore for MemoryCacheStore {
    fn read_page(&self, token: PageToken) -> Result<Option<PageRecord>, CatalogError> {
        Ok(self.pages.lock().get(&token).cloned())
    }

    fn write_page(&self, record: &PageRecord) -> Result<(), CatalogError> {
        let token = PageToken {
            offset: record.offset,
            limit: record.limit,
        };
        self.pages.lock().insert(token, record.clone());
        Ok(())
    }

    fn read_detail(&self, id: u32) -> Result<Option<DetailRecord>, CatalogError> {
        Ok(self.details.lock().get(&id).cloned())
    }

    fn write_detail(&self, record: &DetailRecord) -> Result<(), CatalogError> {
        self.details
            .lock()
            .insert(record.detail.id, record.clone());
        Ok(())
    }
}
