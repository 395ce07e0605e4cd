use crate::errors::AppError;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::{
    fs,
    sync::{Mutex, MutexGuard},
};
use tracing::{error, warn};

/// Flat list of submitted words persisted as a JSON array of strings.
///
/// Appends within one process are serialized; nothing guards the file against other
/// processes, so concurrent writers from outside still race (last write wins).
#[derive(Clone)]
pub struct WordStore {
    path: Arc<PathBuf>,
    writer: Arc<Mutex<()>>,
}

impl WordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
            writer: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the persisted words, creating the file with `[]` when it is absent.
    /// Unreadable or malformed content is treated as an empty list.
    pub async fn load(&self) -> Result<Vec<String>, AppError> {
        match fs::try_exists(self.path()).await {
            Ok(true) => {}
            Ok(false) => write_words(self.path(), &[]).await?,
            Err(err) => {
                error!("failed to stat words file: {err}");
                return Ok(Vec::new());
            }
        }

        match fs::read(self.path()).await {
            Ok(bytes) => match serde_json::from_slice::<Vec<String>>(&bytes) {
                Ok(words) => Ok(words),
                Err(err) => {
                    warn!("words file is not a JSON array of strings: {err}");
                    Ok(Vec::new())
                }
            },
            Err(err) => {
                error!("failed to read words file: {err}");
                Ok(Vec::new())
            }
        }
    }

    /// Overwrites the file with the full list.
    pub async fn save(&self, words: &[String]) -> Result<(), AppError> {
        write_words(self.path(), words).await
    }

    /// Appends one word and returns the new list length.
    pub async fn append(&self, word: String) -> Result<usize, AppError> {
        let _guard = self.writer.lock().await;
        let mut words = self.load().await?;
        words.push(word);
        write_words(self.path(), &words).await?;
        Ok(words.len())
    }

    /// Holds off `append` and `clear` until the guard is dropped. `load` and `save` stay usable.
    pub async fn write_guard(&self) -> MutexGuard<'_, ()> {
        self.writer.lock().await
    }

    pub async fn clear(&self) -> Result<(), AppError> {
        let _guard = self.writer.lock().await;
        write_words(self.path(), &[]).await
    }
}

async fn write_words(path: &Path, words: &[String]) -> Result<(), AppError> {
    let payload = serde_json::to_vec(words)?;
    fs::write(path, payload).await?;
    Ok(())
}
