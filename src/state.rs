// Request Logger - application state

use std::sync::Arc;

use crate::config::Config;

/// Shared handler state. Holds only immutable configuration, so cloning
/// per request is a refcount bump and no locking is needed.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}
