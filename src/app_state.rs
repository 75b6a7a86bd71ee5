//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::config::{StorageBackend, WaitlistConfig};
use crate::domain::{MemoryStore, StoreError, WaitlistStore};
use crate::persistence::PostgresStore;
use crate::service::WaitlistService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Waitlist service for registration and stats.
    pub waitlist_service: WaitlistService,
}

impl AppState {
    /// Wraps a service into handler state.
    #[must_use]
    pub fn new(waitlist_service: WaitlistService) -> Self {
        Self { waitlist_service }
    }

    /// Constructs the configured store and the service on top of it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] if the Postgres backend is selected
    /// and cannot be reached or migrated.
    pub async fn from_config(config: &WaitlistConfig) -> Result<Self, StoreError> {
        let store: Arc<dyn WaitlistStore> = match config.storage_backend {
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
            StorageBackend::Postgres => Arc::new(PostgresStore::connect(config).await?),
        };
        tracing::info!(backend = ?config.storage_backend, "waitlist store ready");
        Ok(Self::new(WaitlistService::new(store, config.founders_spots)))
    }
}
