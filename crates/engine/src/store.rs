//! Persistence of the wallet collection.
//!
//! The whole collection is one JSON array, read and written wholesale. Writes
//! go to a temporary file first and then replace the target, so readers see
//! either the old or the new document.

use std::{
    future::Future,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{Arc, LazyLock},
};

use tokio::{fs, sync::Mutex};

use crate::{ResultEngine, wallets::Wallet};

/// Serializes every load and save of every [`JsonFileStore`] in the process.
static FILE_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// Where the wallet collection lives.
pub trait WalletRepository: Send + Sync {
    /// Load the whole collection.
    fn load(&self) -> impl Future<Output = ResultEngine<Vec<Wallet>>> + Send;

    /// Replace the whole collection.
    fn save(&self, wallets: &[Wallet]) -> impl Future<Output = ResultEngine<()>> + Send;
}

/// Wallets stored as a pretty-printed JSON file.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl WalletRepository for JsonFileStore {
    /// A missing, empty or malformed file loads as an empty collection.
    async fn load(&self) -> ResultEngine<Vec<Wallet>> {
        let _guard = FILE_LOCK.lock().await;

        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!("no data file at {}, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(err) if err.kind() == ErrorKind::InvalidData => {
                tracing::warn!(
                    "data file {} is not valid UTF-8, starting empty",
                    self.path.display()
                );
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        Ok(parse_wallets(&raw, &self.path))
    }

    async fn save(&self, wallets: &[Wallet]) -> ResultEngine<()> {
        let _guard = FILE_LOCK.lock().await;

        let json = serde_json::to_string_pretty(wallets)?;
        write_json_file(&self.path, json.as_bytes()).await?;

        tracing::info!(
            "saved {} wallet(s) to {}",
            wallets.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// In-process store, for tests and throwaway sessions.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Vec<Wallet>>>,
}

impl WalletRepository for MemoryStore {
    async fn load(&self) -> ResultEngine<Vec<Wallet>> {
        Ok(self.inner.lock().await.clone())
    }

    async fn save(&self, wallets: &[Wallet]) -> ResultEngine<()> {
        *self.inner.lock().await = wallets.to_vec();
        Ok(())
    }
}

fn parse_wallets(raw: &str, path: &Path) -> Vec<Wallet> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    match serde_json::from_str(raw) {
        Ok(wallets) => wallets,
        Err(err) => {
            tracing::warn!(
                "data file {} is malformed ({err}), starting empty",
                path.display()
            );
            Vec::new()
        }
    }
}

async fn write_json_file(path: &Path, json: &[u8]) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).await?;
    }

    let tmp = temp_path(path);
    if let Err(err) = fs::write(&tmp, json).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(err);
    }

    match fs::rename(&tmp, path).await {
        Ok(()) => Ok(()),
        Err(err) => {
            tracing::debug!("rename over {} failed ({err}), copying", path.display());
            let copied = fs::copy(&tmp, path).await;
            let _ = fs::remove_file(&tmp).await;
            copied.map(|_| ())
        }
    }
}

/// `<path>.tmp`, in the same directory as `path`.
fn temp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}
