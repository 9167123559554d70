//! Backend Collaborators
//!
//! The dashboard reads everything it shows from a hosted backend. This
//! module defines the two seams the rest of the crate depends on, plus the
//! implementations behind them:
//!
//! - [`IdentityProvider`]: who is signed in, their profile, sign-out
//! - [`ActivityStore`]: every user's exercise counters
//! - [`SupabaseBackend`]: both traits over the Supabase REST and auth APIs
//! - [`InMemoryBackend`]: both traits over in-process data (tests, demos)

mod error;
mod memory;
mod supabase;

pub use error::BackendError;
pub use memory::{InMemoryBackend, Member};
pub use supabase::{SupabaseBackend, SupabaseConfig, TrackieRow};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::ranking::ActivityRecord;

/// Name shown when the signed-in user has no stored display name
pub const DEFAULT_DISPLAY_NAME: &str = "User";

/// Profile data shown in the top navigation bar
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub name: String,
    /// Consecutive active days
    pub streak: u64,
}

impl UserProfile {
    /// Build a profile from stored columns, applying display defaults
    pub fn from_stored(name: Option<String>, streak: Option<u64>) -> Self {
        Self {
            name: name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string()),
            streak: streak.unwrap_or(0),
        }
    }
}

/// Resolves the signed-in user
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Profile of the signed-in user, `None` when nobody is signed in
    async fn current_profile(&self) -> Result<Option<UserProfile>, BackendError>;

    /// End the current session
    async fn sign_out(&self) -> Result<(), BackendError>;

    /// Display name of the signed-in user
    async fn current_user_name(&self) -> Result<Option<String>, BackendError> {
        Ok(self.current_profile().await?.map(|profile| profile.name))
    }
}

/// Source of per-user exercise counters
#[async_trait]
pub trait ActivityStore: Send + Sync {
    /// Every user's counters, unfiltered, in backend order
    async fn list_activity_records(&self) -> Result<Vec<ActivityRecord>, BackendError>;

    /// Check that the store can be reached
    async fn health_check(&self) -> Result<(), BackendError> {
        Ok(())
    }
}
