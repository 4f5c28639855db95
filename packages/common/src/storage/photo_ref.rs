use std::fmt;

use super::error::StorageError;

const MAX_EXTENSION_LEN: usize = 8;

/// A validated reference to a stored photo file.
///
/// Holds only the flat file name (`<stem>.<ext>`); the public URL prefix is
/// owned by the store that issued it.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PhotoRef(String);

impl PhotoRef {
    /// Generate a fresh, unique reference with the given extension.
    pub fn generate(extension: &str) -> Result<Self, StorageError> {
        let ext = normalize_extension(extension)?;
        Ok(Self(format!("{}.{ext}", uuid::Uuid::new_v4())))
    }

    /// Parse a bare file name previously produced by [`PhotoRef::generate`]
    /// (or by an older deployment that used `<millis>-<random>.<ext>` names).
    pub fn from_file_name(name: &str) -> Result<Self, StorageError> {
        if name.is_empty() {
            return Err(StorageError::InvalidPath("file name is empty".into()));
        }
        if name.starts_with('.') {
            return Err(StorageError::InvalidPath(format!(
                "hidden file names are not allowed: {name}"
            )));
        }
        if name.contains(['/', '\\', '\0']) || name.chars().any(|c| c.is_ascii_control()) {
            return Err(StorageError::InvalidPath(format!(
                "file name must be a single path segment: {name:?}"
            )));
        }
        let (stem, ext) = name
            .rsplit_once('.')
            .ok_or_else(|| StorageError::InvalidPath(format!("missing extension: {name}")))?;
        if stem.is_empty() {
            return Err(StorageError::InvalidPath(format!("missing stem: {name}")));
        }
        normalize_extension(ext)?;
        Ok(Self(name.to_string()))
    }

    pub fn file_name(&self) -> &str {
        &self.0
    }
}

fn normalize_extension(extension: &str) -> Result<String, StorageError> {
    let ext = extension.trim_start_matches('.');
    if ext.is_empty()
        || ext.len() > MAX_EXTENSION_LEN
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return Err(StorageError::InvalidPath(format!(
            "invalid extension: {extension:?}"
        )));
    }
    Ok(ext.to_ascii_lowercase())
}

impl fmt::Debug for PhotoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PhotoRef({})", self.0)
    }
}

impl fmt::Display for PhotoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
