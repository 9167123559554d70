//! Leaderboard panel
//!
//! Every activation fetches fresh records and ranks them; nothing is cached
//! between activations. If the records cannot be fetched the panel is
//! emptied rather than showing a stale or partial board.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::backend::{ActivityStore, BackendError, IdentityProvider};
use crate::ranking::{podium, RankedEntry, RankingEngine};

/// The leaderboard could not be loaded
#[derive(Debug, Error)]
#[error("Failed to fetch leaderboard data: {0}")]
pub struct FetchError(#[from] pub BackendError);

/// Ranked leaderboard as last loaded
#[derive(Debug, Clone, Default)]
pub struct LeaderboardView {
    entries: Vec<RankedEntry>,
    current_user: Option<String>,
    generated_at: Option<DateTime<Utc>>,
}

impl LeaderboardView {
    /// An empty board, before the first load
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch and rank in one step
    pub async fn load(
        identity: &dyn IdentityProvider,
        store: &dyn ActivityStore,
    ) -> Result<Self, FetchError> {
        let mut view = Self::new();
        view.refresh(identity, store).await?;
        Ok(view)
    }

    /// Re-fetch records and re-rank.
    ///
    /// A failed identity lookup only means nobody is highlighted. A failed
    /// record fetch clears the board and is returned to the caller.
    pub async fn refresh(
        &mut self,
        identity: &dyn IdentityProvider,
        store: &dyn ActivityStore,
    ) -> Result<(), FetchError> {
        let current_user = match identity.current_user_name().await {
            Ok(name) => name,
            Err(e) => {
                tracing::warn!("Error fetching user name: {}", e);
                None
            }
        };

        let records = match store.list_activity_records().await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!("Error fetching leaderboard data: {}", e);
                *self = Self::default();
                return Err(FetchError(e));
            }
        };

        self.entries = RankingEngine::rank(&records, current_user.as_deref());
        self.current_user = current_user;
        self.generated_at = Some(Utc::now());

        tracing::info!(
            entries = self.entries.len(),
            current_user = ?self.current_user,
            "Leaderboard refreshed"
        );

        Ok(())
    }

    pub fn entries(&self) -> &[RankedEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Top three entries
    pub fn podium(&self) -> &[RankedEntry] {
        podium(&self.entries)
    }

    /// Display name the board was ranked for
    pub fn current_user(&self) -> Option<&str> {
        self.current_user.as_deref()
    }

    /// The signed-in user's own row, if they are on the board
    pub fn current_user_entry(&self) -> Option<&RankedEntry> {
        self.entries.iter().find(|e| e.is_current_user)
    }

    pub fn generated_at(&self) -> Option<DateTime<Utc>> {
        self.generated_at
    }
}
