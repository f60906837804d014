//! JSON-file persistence for [`MemoryStore`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::memory::MemoryStore;

/// A [`MemoryStore`] snapshot bound to a JSON file on disk.
///
/// Changes are only written when [`JsonStore::save`] is called.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    store: MemoryStore,
}

impl JsonStore {
    /// Open the store at `path`. A missing file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let store = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read store from {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("failed to parse store JSON: {}", path.display()))?
        } else {
            tracing::debug!("no store at {}, starting empty", path.display());
            MemoryStore::new()
        };
        Ok(Self { path, store })
    }

    /// Write the current snapshot, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let json =
            serde_json::to_string_pretty(&self.store).context("failed to serialize store")?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        std::fs::write(&self.path, json)
            .with_context(|| format!("failed to write store to {}", self.path.display()))?;
        tracing::debug!("saved store to {}", self.path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut MemoryStore {
        &mut self.store
    }
}
