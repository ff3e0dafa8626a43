use std::sync::Arc;

use crate::{conf::Settings, pkg::internal::store::JobStore, prelude::Result};

#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Arc<JobStore>,
}

impl AppState {
    pub async fn new(settings: &Settings) -> Result<AppState> {
        let store = JobStore::connect(settings.store_config()).await?;
        Ok(AppState::from_store(store))
    }

    pub fn from_store(store: JobStore) -> AppState {
        AppState {
            store: Arc::new(store),
        }
    }
}
