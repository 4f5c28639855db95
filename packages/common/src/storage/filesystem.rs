use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use super::error::StorageError;
use super::photo_ref::PhotoRef;
use super::traits::{BoxReader, PhotoStore};

/// Filesystem-backed photo store.
///
/// Photos live flat in `{base_path}/{file_name}` and are published under
/// `{public_prefix}/{file_name}`. Writes go through `{base_path}/.tmp` and are
/// renamed into place, so a half-written upload is never visible.
pub struct FilesystemPhotoStore {
    base_path: PathBuf,
    public_prefix: String,
    max_size: u64,
}

impl FilesystemPhotoStore {
    /// Create a new filesystem photo store.
    ///
    /// `public_prefix` must name a path segment such as `/uploads`; photos are
    /// never published at the site root.
    pub async fn new(
        base_path: PathBuf,
        public_prefix: &str,
        max_size: u64,
    ) -> Result<Self, StorageError> {
        let public_prefix = normalize_prefix(public_prefix).ok_or_else(|| {
            StorageError::InvalidPath(format!("public prefix {public_prefix:?} is empty"))
        })?;
        fs::create_dir_all(&base_path).await?;
        fs::create_dir_all(base_path.join(".tmp")).await?;
        Ok(Self {
            base_path,
            public_prefix,
            max_size,
        })
    }

    fn photo_path(&self, photo: &PhotoRef) -> PathBuf {
        self.base_path.join(photo.file_name())
    }

    /// Path for a temporary file during writes.
    fn temp_path(&self) -> PathBuf {
        self.base_path
            .join(".tmp")
            .join(uuid::Uuid::new_v4().to_string())
    }
}

/// `"uploads/"` and `"/uploads"` both become `"/uploads"`. `None` for the root.
pub fn normalize_prefix(prefix: &str) -> Option<String> {
    let trimmed = prefix.trim().trim_matches('/');
    (!trimmed.is_empty()).then(|| format!("/{trimmed}"))
}

#[async_trait]
impl PhotoStore for FilesystemPhotoStore {
    async fn put_stream(
        &self,
        extension: &str,
        mut reader: BoxReader<'_>,
    ) -> Result<PhotoRef, StorageError> {
        let photo = PhotoRef::generate(extension)?;
        let temp_path = self.temp_path();
        let mut total_bytes: u64 = 0;

        let mut buf = vec![0u8; 64 * 1024];
        let mut temp_file = fs::File::create(&temp_path).await?;

        let written: Result<(), StorageError> = async {
            loop {
                let n = reader.read(&mut buf).await?;
                if n == 0 {
                    break;
                }

                total_bytes += n as u64;
                if total_bytes > self.max_size {
                    return Err(StorageError::SizeLimitExceeded {
                        actual: total_bytes,
                        limit: self.max_size,
                    });
                }

                temp_file.write_all(&buf[..n]).await?;
            }
            temp_file.flush().await?;
            Ok(())
        }
        .await;
        drop(temp_file);

        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e);
        }

        if let Err(e) = fs::rename(&temp_path, self.photo_path(&photo)).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        tracing::debug!(photo = %photo, bytes = total_bytes, "Stored photo");
        Ok(photo)
    }

    async fn delete(&self, photo: &PhotoRef) -> Result<bool, StorageError> {
        match fs::remove_file(self.photo_path(photo)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn size(&self, photo: &PhotoRef) -> Result<u64, StorageError> {
        Ok(fs::metadata(self.photo_path(photo)).await?.len())
    }

    fn public_path(&self, photo: &PhotoRef) -> String {
        format!("{}/{}", self.public_prefix, photo.file_name())
    }

    fn parse_public_path(&self, path: &str) -> Result<PhotoRef, StorageError> {
        let rest = path
            .strip_prefix(self.public_prefix.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| {
                StorageError::InvalidPath(format!(
                    "{path} is outside {}/",
                    self.public_prefix
                ))
            })?;
        PhotoRef::from_file_name(rest)
    }
}
