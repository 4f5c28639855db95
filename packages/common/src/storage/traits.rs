use std::io::Cursor;

use async_trait::async_trait;
use tokio::io::AsyncRead;

use super::error::StorageError;
use super::photo_ref::PhotoRef;

/// Type alias for a boxed async reader. The reader may borrow, e.g. from an
/// in-flight request body.
pub type BoxReader<'a> = Box<dyn AsyncRead + Unpin + Send + 'a>;

/// Storage for incident evidence photos.
///
/// Every stored photo is addressable by a public path (e.g. `/uploads/<file>`)
/// that is recorded on the incident and served as a static file.
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Store bytes under a freshly generated name and return its reference.
    async fn put(&self, extension: &str, data: &[u8]) -> Result<PhotoRef, StorageError> {
        let reader: BoxReader<'_> = Box::new(Cursor::new(data));
        self.put_stream(extension, reader).await
    }

    /// Store data from an async reader under a freshly generated name.
    async fn put_stream(
        &self,
        extension: &str,
        reader: BoxReader<'_>,
    ) -> Result<PhotoRef, StorageError>;

    /// Delete a photo.
    ///
    /// Returns `true` if the photo was deleted, `false` if it did not exist.
    async fn delete(&self, photo: &PhotoRef) -> Result<bool, StorageError>;

    /// Get the size of a photo in bytes.
    async fn size(&self, photo: &PhotoRef) -> Result<u64, StorageError>;

    /// The public path a client uses to fetch the photo.
    fn public_path(&self, photo: &PhotoRef) -> String;

    /// Resolve a public path back into a reference owned by this store.
    fn parse_public_path(&self, path: &str) -> Result<PhotoRef, StorageError>;
}
