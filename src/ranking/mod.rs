//! Leaderboard Ranking
//!
//! Turns per-user exercise counters into an ordered leaderboard:
//!
//! - **types**: `ActivityRecord` input, `RankedEntry` output, `MedalTier`
//! - **engine**: scoring and dense ranking
//!
//! # Scoring
//!
//! ```text
//! score = squats * 1 + pushups * 2 + jumping_jacks
//! ```
//!
//! # Example
//!
//! ```rust
//! use trackie::ranking::{ActivityRecord, RankingEngine};
//!
//! let records = vec![
//!     ActivityRecord::new("A").squats(10),
//!     ActivityRecord::new("B").pushups(5),
//!     ActivityRecord::new("C").jumping_jacks(100),
//! ];
//!
//! let ranked = RankingEngine::rank(&records, Some("B"));
//!
//! assert_eq!(ranked[0].name, "C");
//! assert_eq!(ranked[1].name, "A");
//! assert!(ranked[2].is_current_user);
//! ```

pub mod engine;
pub mod types;

pub use engine::{compute_score, podium, RankingEngine, PODIUM_SIZE};
pub use types::{ActivityRecord, MedalTier, RankedEntry};
