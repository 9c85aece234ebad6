use crate::models::AppData;
use crate::storage::KvStore;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
pub struct VersionInfo {
    pub current: String,
    /// Version that last wrote the store, when it differs from `current`.
    pub previous: Option<String>,
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<KvStore>,
    pub data: Arc<Mutex<AppData>>,
    pub version: VersionInfo,
}

impl AppState {
    pub fn new(store: KvStore, data: AppData, previous_version: Option<String>) -> Self {
        Self {
            store: Arc::new(store),
            data: Arc::new(Mutex::new(data)),
            version: VersionInfo {
                current: env!("CARGO_PKG_VERSION").to_owned(),
                previous: previous_version,
            },
        }
    }
}
