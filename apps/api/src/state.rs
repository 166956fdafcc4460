use std::sync::Arc;

use crate::config::Config;
use crate::notify::Notifier;
use crate::processing::ProcessingRegistry;
use crate::store::KeyValueStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Backing store for every profile's session keys. Selected via STORE_BACKEND.
    pub store: Arc<dyn KeyValueStore>,
    pub config: Config,
    /// Live Processing views, one per profile.
    pub processing: Arc<ProcessingRegistry>,
    /// Pluggable notifier. Default: TracingNotifier.
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub fn new(store: Arc<dyn KeyValueStore>, config: Config, notifier: Arc<dyn Notifier>) -> Self {
        let processing = Arc::new(ProcessingRegistry::new(config.processing));
        Self {
            store,
            config,
            processing,
            notifier,
        }
    }
}
