use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::error::StoreError;
use crate::entity::{Incident, Person};

/// The durable document holding both collections.
///
/// The on-disk keys (`personas`, `incidencias`) are shared with files
/// written by earlier deployments and must not change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "personas", default)]
    pub people: Vec<Person>,
    #[serde(rename = "incidencias", default)]
    pub incidents: Vec<Incident>,
}

/// Location of the durable document plus its read/write primitives.
#[derive(Debug, Clone)]
pub struct DocumentFile {
    path: PathBuf,
}

impl DocumentFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document, creating an empty one if the file does not exist.
    pub async fn load_or_init(&self) -> Result<Document, StoreError> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                if let Some(parent) = self.path.parent()
                    && !parent.as_os_str().is_empty()
                {
                    fs::create_dir_all(parent).await?;
                }
                let doc = Document::default();
                self.save(&doc).await?;
                tracing::info!(path = %self.path.display(), "Initialized empty document");
                Ok(doc)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Atomically replace the document on disk.
    ///
    /// The new contents are written and synced to a sibling temp file, then
    /// renamed over the live file. On failure the live file is untouched.
    pub async fn save(&self, doc: &Document) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(doc)?;
        let temp_path = self.temp_path();

        let written: Result<(), std::io::Error> = async {
            let mut file = fs::File::create(&temp_path).await?;
            file.write_all(&bytes).await?;
            file.sync_all().await?;
            fs::rename(&temp_path, &self.path).await
        }
        .await;

        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".into());
        self.path
            .with_file_name(format!(".{name}.{}.tmp", uuid::Uuid::new_v4()))
    }
}
