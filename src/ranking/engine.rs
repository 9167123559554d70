//! Scoring and ranking
//!
//! Ranking is a pure, synchronous pass over fully materialized records:
//! score every record, stable-sort by score descending, then number the
//! sorted rows from 1. Ties keep their input order and still get distinct
//! ranks.

use super::types::{ActivityRecord, RankedEntry};

/// Points per squat
pub const SQUAT_POINTS: u64 = 1;

/// Points per pushup
pub const PUSHUP_POINTS: u64 = 2;

/// Points per jumping jack. Jumping jacks count at face value.
pub const JUMPING_JACK_POINTS: u64 = 1;

/// Number of entries shown on the podium
pub const PODIUM_SIZE: usize = 3;

/// Weighted point total for a set of counters
pub fn compute_score(squats: u64, pushups: u64, jumping_jacks: u64) -> u64 {
    squats
        .saturating_mul(SQUAT_POINTS)
        .saturating_add(pushups.saturating_mul(PUSHUP_POINTS))
        .saturating_add(jumping_jacks.saturating_mul(JUMPING_JACK_POINTS))
}

/// Top entries of an already ranked leaderboard
pub fn podium(entries: &[RankedEntry]) -> &[RankedEntry] {
    &entries[..entries.len().min(PODIUM_SIZE)]
}

/// Leaderboard ranking
///
/// Stateless; safe to call from any number of tasks at once.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankingEngine;

impl RankingEngine {
    /// Rank records by score, highest first.
    ///
    /// `current_user_name` is compared by exact, case-sensitive equality.
    /// `None` or an empty name marks nobody as the current user.
    pub fn rank(records: &[ActivityRecord], current_user_name: Option<&str>) -> Vec<RankedEntry> {
        let current = current_user_name.filter(|name| !name.is_empty());

        let mut entries: Vec<RankedEntry> = records
            .iter()
            .map(|record| RankedEntry {
                name: record.name.clone(),
                squat_count: record.squat_count,
                pushup_count: record.pushup_count,
                jumping_jack_count: record.jumping_jack_count,
                score: compute_score(
                    record.squat_count,
                    record.pushup_count,
                    record.jumping_jack_count,
                ),
                rank: 0,
                is_current_user: current == Some(record.name.as_str()),
            })
            .collect();

        // sort_by is stable: equal scores keep input order
        entries.sort_by(|a, b| b.score.cmp(&a.score));

        for (index, entry) in entries.iter_mut().enumerate() {
            entry.rank = index + 1;
        }

        tracing::debug!(entries = entries.len(), "Ranked leaderboard");

        entries
    }
}
