use std::path::PathBuf;

use serde::Deserialize;

/// Photo storage configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding uploaded photos. Default: "uploads".
    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: PathBuf,
    /// URL prefix under which photos are served. Default: "/uploads".
    #[serde(default = "default_public_prefix")]
    pub public_prefix: String,
    /// Maximum accepted photo size in bytes. Default: 10 MB.
    #[serde(default = "default_max_photo_size")]
    pub max_photo_size: u64,
}

fn default_uploads_dir() -> PathBuf {
    PathBuf::from("uploads")
}
fn default_public_prefix() -> String {
    "/uploads".into()
}
fn default_max_photo_size() -> u64 {
    10 * 1024 * 1024
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            uploads_dir: default_uploads_dir(),
            public_prefix: default_public_prefix(),
            max_photo_size: default_max_photo_size(),
        }
    }
}
