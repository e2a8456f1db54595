use crate::{IdentityDocument, IdentityStore, Result as StorageResult, StorageError};

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::{debug, info, warn};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

pub const IDENTITY_FILENAME: &str = "identity.json";

/// Identity store backed by a JSON file in a data directory.
pub struct FileIdentityStore {
    dir: PathBuf,
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileIdentityStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let path = dir.join(IDENTITY_FILENAME);
        Self {
            dir,
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole document.
    ///
    /// Returns `Ok(None)` when the file does not exist (first launch).
    async fn load(&self) -> StorageResult<Option<IdentityDocument>> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No identity file at {:?} (first launch)", self.path);
                return Ok(None);
            }
            Err(e) => return Err(StorageError::file_read(self.path.clone(), e)),
        };

        match serde_json::from_str::<IdentityDocument>(&contents) {
            Ok(document) => Ok(Some(document)),
            Err(e) => {
                warn!("Identity file corrupted at {:?}: {e}", self.path);
                Err(StorageError::corrupted(self.path.clone(), e.to_string()))
            }
        }
    }

    /// Saves the document using the atomic write pattern.
    ///
    /// 1. Writes to temp file
    /// 2. Syncs to disk (fsync)
    /// 3. Atomic rename to final location
    async fn save(&self, document: &IdentityDocument) -> StorageResult<()> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StorageError::dir_creation(self.dir.clone(), e))?;

        let temp_path = self
            .dir
            .join(format!("{IDENTITY_FILENAME}.tmp.{}", std::process::id()));

        let json = serde_json::to_string_pretty(document)?;

        {
            let mut file = fs::File::create(&temp_path)
                .await
                .map_err(|e| StorageError::file_write(temp_path.clone(), e))?;

            file.write_all(json.as_bytes())
                .await
                .map_err(|e| StorageError::file_write(temp_path.clone(), e))?;

            file.sync_all()
                .await
                .map_err(|e| StorageError::file_write(temp_path.clone(), e))?;
        }

        if let Err(e) = fs::rename(&temp_path, &self.path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(StorageError::atomic_rename(temp_path, self.path.clone(), e));
        }

        Ok(())
    }
}

#[async_trait]
impl IdentityStore for FileIdentityStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let document = self.load().await?;
        Ok(document.and_then(|mut d| d.entries.remove(key)))
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut document = self.load().await?.unwrap_or_default();
        document.insert(key, value);
        self.save(&document).await?;

        info!("Stored '{key}' in {:?}", self.path);
        Ok(())
    }
}
