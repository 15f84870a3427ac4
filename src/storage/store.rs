use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::{
    config::StorageConfig,
    error::{CollectorError, Result},
};

/// The four JSON files the collector maintains
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// Candidates that passed the filter on the last fetch
    Candidates,
    /// Candidates whose donation check failed
    Errors,
    /// Candidates recovered by the last retry
    Retry,
    /// Union of `Candidates` and `Retry`
    Merged,
}

impl std::fmt::Display for StoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreKind::Candidates => write!(f, "candidates"),
            StoreKind::Errors => write!(f, "errors"),
            StoreKind::Retry => write!(f, "retry"),
            StoreKind::Merged => write!(f, "merged"),
        }
    }
}

/// JSON-array files under one data directory. Every save overwrites.
#[derive(Debug, Clone)]
pub struct JsonStore {
    config: StorageConfig,
}

impl JsonStore {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    pub fn path(&self, kind: StoreKind) -> PathBuf {
        let file = match kind {
            StoreKind::Candidates => &self.config.candidates_file,
            StoreKind::Errors => &self.config.errors_file,
            StoreKind::Retry => &self.config.retry_file,
            StoreKind::Merged => &self.config.merged_file,
        };
        self.config.data_dir.join(file)
    }

    pub fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.config.data_dir)
            .map_err(|e| CollectorError::storage(&self.config.data_dir, e))
    }

    pub fn exists(&self, kind: StoreKind) -> bool {
        self.path(kind).exists()
    }

    /// Read a store; `Ok(None)` when the file does not exist
    pub fn load<T: DeserializeOwned>(&self, kind: StoreKind) -> Result<Option<Vec<T>>> {
        let path = self.path(kind);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CollectorError::storage(&path, e)),
        };

        let records = serde_json::from_str(&contents)?;
        Ok(Some(records))
    }

    pub fn save<T: Serialize>(&self, kind: StoreKind, records: &[T]) -> Result<PathBuf> {
        self.ensure_dir()?;
        let path = self.path(kind);
        let json = serde_json::to_string_pretty(records)?;
        fs::write(&path, json).map_err(|e| CollectorError::storage(&path, e))?;

        info!("✅ Saved {} {} records to {}", records.len(), kind, path.display());
        Ok(path)
    }
}
