//! Entry list loading
//!
//! The tournament is seeded from a JSON array of entry names. The file is
//! re-read on every load so edits take effect on the next reset.

use async_trait::async_trait;
use shared::EntryId;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::error::{WebServerError, WebServerResult};
use crate::traits::EntrySource;

/// Entry source backed by a JSON file
#[derive(Debug, Clone)]
pub struct FileEntrySource {
    path: PathBuf,
}

impl FileEntrySource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl EntrySource for FileEntrySource {
    async fn load_entries(&self) -> WebServerResult<Vec<EntryId>> {
        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|source| WebServerError::EntriesUnavailable {
                path: self.path.display().to_string(),
                source,
            })?;

        let entries: Vec<EntryId> = serde_json::from_str(&content)?;

        shared::process_debug!(
            shared::ProcessId::current(),
            "📄 Loaded {} entries from {}",
            entries.len(),
            self.path.display()
        );

        Ok(entries)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}
