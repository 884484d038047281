use std::{io::ErrorKind, path::PathBuf};

use tokio::sync::Mutex;

use crate::domain::{AppData, SignatureReason};

/// File-backed holder of the [`AppData`] document.
///
/// Every mutation reads the file, applies the change and writes the whole
/// document back; the mutex keeps those cycles from interleaving.
pub struct JsonStore {
    path: PathBuf,
    lock: Mutex<()>,
}

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("couldn't access the data file, io error {0}")]
    Io(#[from] std::io::Error),
    #[error("the data file is not a valid document, json error {0}")]
    Json(#[from] serde_json::Error),
}

impl JsonStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    #[tracing::instrument(
        name = "Loading the data document",
        skip(self),
        fields(path = %self.path.display())
    )]
    pub async fn load(&self) -> Result<AppData, StoreError> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    /// Returns whether the reason was new.
    #[tracing::instrument(name = "Adding a reason to the data document", skip(self))]
    pub async fn add_reason(
        &self,
        reason: &SignatureReason,
        to_signature_reasons: bool,
    ) -> Result<bool, StoreError> {
        let _guard = self.lock.lock().await;
        let mut data = self.read().await?;
        let added = data.add_reason(reason, to_signature_reasons);
        if added {
            self.write(&data).await?;
        }
        Ok(added)
    }

    /// Returns whether the reason was present.
    #[tracing::instrument(name = "Removing an other reason from the data document", skip(self))]
    pub async fn remove_other_reason(&self, reason: &str) -> Result<bool, StoreError> {
        let _guard = self.lock.lock().await;
        let mut data = self.read().await?;
        let removed = data.remove_other_reason(reason);
        if removed {
            self.write(&data).await?;
        }
        Ok(removed)
    }

    async fn read(&self) -> Result<AppData, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!("no data file yet, starting from an empty document");
                Ok(AppData::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, data: &AppData) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(data)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}
