//! File backing for the [`Document`].
//!
//! Every write replaces the whole file. The new content goes to a sibling
//! temporary file first, is synced to disk and renamed over the target, so
//! readers see either the previous document or the new one.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
};

use tokio::{fs, io::AsyncWriteExt};
use tracing::{debug, warn};

use crate::{Document, ResultStore};

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Reads and replaces the document file. Holds no state between calls.
#[derive(Clone, Debug)]
pub struct DocumentStore {
    path: PathBuf,
    recover_malformed: bool,
}

impl DocumentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            recover_malformed: false,
        }
    }

    /// When set, an unparsable file loads as an empty document instead of
    /// failing. The file itself is left alone until the next write.
    pub fn recover_malformed(mut self, recover: bool) -> Self {
        self.recover_malformed = recover;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file with four empty collections if it does not exist.
    ///
    /// Returns `true` when the file was created.
    pub async fn init(&self) -> ResultStore<bool> {
        if fs::try_exists(&self.path).await? {
            return Ok(false);
        }
        debug!(path = %self.path.display(), "creating empty document");
        self.save(&Document::default()).await?;
        Ok(true)
    }

    /// Read the persisted document, creating it when absent.
    pub async fn load(&self) -> ResultStore<Document> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                let document = Document::default();
                self.save(&document).await?;
                return Ok(document);
            }
            Err(err) => return Err(err.into()),
        };

        match serde_json::from_str::<Document>(&raw) {
            Ok(document) => {
                debug!(
                    users = document.users.len(),
                    expenses = document.expenses.len(),
                    wishlist = document.wishlist.len(),
                    necessities = document.necessities.len(),
                    "document loaded"
                );
                Ok(document)
            }
            Err(err) if self.recover_malformed => {
                warn!(path = %self.path.display(), "malformed document, reading as empty: {err}");
                Ok(Document::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Replace the persisted document.
    pub async fn save(&self, document: &Document) -> ResultStore<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(document)?;
        let tmp = self.tmp_path();
        if let Err(err) = write_synced(&tmp, json.as_bytes()).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(err.into());
        }
        if let Err(err) = fs::rename(&tmp, &self.path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(err.into());
        }
        debug!(path = %self.path.display(), bytes = json.len(), "document saved");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let seq = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(format!(".{}.{seq}.tmp", std::process::id()));
        self.path.with_file_name(name)
    }
}

/// Write `bytes` to a new file and flush it to disk.
async fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}
