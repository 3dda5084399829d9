//! Directory-backed limerick blob store.

use std::path::PathBuf;

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};

use crate::domain::ports::{LimerickStore, LimerickStoreError};

/// [`LimerickStore`] adapter keeping one file per key beneath a single
/// upload directory.
///
/// All path resolution goes through [`cap_std::fs::Dir`], so keys resolve
/// strictly inside the root; a key that tries to traverse out fails as an
/// I/O error instead of touching the wider filesystem.
#[derive(Debug, Clone)]
pub struct DirLimerickStore {
    root: PathBuf,
}

impl DirLimerickStore {
    /// Open the store rooted at `root`, creating the directory if missing.
    ///
    /// # Errors
    ///
    /// Returns [`LimerickStoreError::Io`] when the directory cannot be
    /// created or opened, so a misconfigured path fails at startup rather
    /// than on the first upload.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, LimerickStoreError> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|err| {
            LimerickStoreError::io(format!(
                "failed to create upload directory {}: {err}",
                root.display()
            ))
        })?;

        let store = Self { root };
        // Probe the capability now; subsequent operations reopen it.
        store.open_root()?;
        Ok(store)
    }

    fn open_root(&self) -> Result<Dir, LimerickStoreError> {
        Dir::open_ambient_dir(&self.root, ambient_authority()).map_err(|err| {
            LimerickStoreError::io(format!(
                "failed to open upload directory {}: {err}",
                self.root.display()
            ))
        })
    }
}

/// Run a blocking filesystem closure on the blocking thread pool.
async fn run_blocking<T, F>(op: F) -> Result<T, LimerickStoreError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, LimerickStoreError> + Send + 'static,
{
    tokio::task::spawn_blocking(op)
        .await
        .map_err(|err| LimerickStoreError::io(format!("blocking task failed: {err}")))?
}

#[async_trait]
impl LimerickStore for DirLimerickStore {
    async fn save(&self, key: &str, bytes: Vec<u8>) -> Result<(), LimerickStoreError> {
        let store = self.clone();
        let key = key.to_owned();

        run_blocking(move || {
            let dir = store.open_root()?;
            dir.write(&key, &bytes)
                .map_err(|err| LimerickStoreError::io(format!("failed to write {key}: {err}")))
        })
        .await
    }

    async fn read(&self, key: &str) -> Result<Vec<u8>, LimerickStoreError> {
        let store = self.clone();
        let key = key.to_owned();

        run_blocking(move || {
            let dir = store.open_root()?;
            dir.read(&key).map_err(|err| {
                if err.kind() == std::io::ErrorKind::NotFound {
                    LimerickStoreError::not_found(&key)
                } else {
                    LimerickStoreError::io(format!("failed to read {key}: {err}"))
                }
            })
        })
        .await
    }
}
