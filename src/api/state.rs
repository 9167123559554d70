//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

use crate::backend::{ActivityStore, IdentityProvider};
use crate::config::ApiConfig;
use crate::dashboard::Sidebar;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Resolves the signed-in user
    pub identity: Arc<dyn IdentityProvider>,
    /// Source of leaderboard records
    pub store: Arc<dyn ActivityStore>,
    /// Sidebar selection
    pub sidebar: Arc<RwLock<Sidebar>>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create state from a backend that plays both collaborator roles
    pub fn new<B>(backend: Arc<B>, config: ApiConfig) -> Self
    where
        B: IdentityProvider + ActivityStore + 'static,
    {
        let identity: Arc<dyn IdentityProvider> = backend.clone();
        let store: Arc<dyn ActivityStore> = backend;
        Self::with_collaborators(identity, store, config)
    }

    /// Create state from separate identity and activity sources
    pub fn with_collaborators(
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn ActivityStore>,
        config: ApiConfig,
    ) -> Self {
        Self {
            identity,
            store,
            sidebar: Arc::new(RwLock::new(Sidebar::new())),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
