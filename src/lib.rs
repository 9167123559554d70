//! # Trackie
//!
//! Backend for a fitness-tracking dashboard: a points leaderboard, a
//! navigation sidebar and a top bar showing the signed-in user's profile,
//! all fed from a hosted Supabase project.
//!
//! ## Modules
//!
//! - [`ranking`]: Scoring and dense ranking of exercise counters
//! - [`backend`]: Identity and activity collaborators (Supabase, in-memory)
//! - [`dashboard`]: Headless view state for the leaderboard, sidebar and top bar
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML and environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use trackie::backend::{InMemoryBackend, Member};
//! use trackie::dashboard::LeaderboardView;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = InMemoryBackend::with_members(vec![
//!         Member::new("u1", "Avery").counts(10, 0, 0),
//!         Member::new("u2", "Jordan").counts(0, 5, 3),
//!     ]);
//!     backend.sign_in("u1").await;
//!
//!     let board = LeaderboardView::load(&backend, &backend).await?;
//!     for entry in board.entries() {
//!         println!("#{} {} - {} pts", entry.rank, entry.name, entry.score);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod backend;
pub mod config;
pub mod dashboard;
pub mod ranking;

// Re-export top-level types for convenience
pub use ranking::{compute_score, ActivityRecord, MedalTier, RankedEntry, RankingEngine};

pub use backend::{
    ActivityStore, BackendError, IdentityProvider, InMemoryBackend, Member, SupabaseBackend,
    SupabaseConfig, UserProfile,
};

pub use dashboard::{FetchError, LeaderboardView, Sidebar, Tab, TopNav};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{ApiConfig, BackendConfig, Config, ConfigError, LoggingConfig};
