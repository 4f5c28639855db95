use std::sync::Arc;

use common::storage::PhotoStore;

use crate::config::AppConfig;
use crate::store::RecordStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RecordStore>,
    pub photos: Arc<dyn PhotoStore>,
    pub config: AppConfig,
}
