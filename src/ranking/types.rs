//! Leaderboard data types
//!
//! - `ActivityRecord`: exercise counters for one user, as read from the backend
//! - `RankedEntry`: a record enriched with its score, rank and current-user flag
//! - `MedalTier`: trophy tier shown next to the top three ranks

use serde::{Deserialize, Serialize};

/// Exercise counters for a single user
///
/// Read-only input to the ranking engine. Counters the backend leaves
/// out deserialize as zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivityRecord {
    /// Display name, treated as unique
    pub name: String,
    #[serde(default)]
    pub squat_count: u64,
    #[serde(default)]
    pub pushup_count: u64,
    #[serde(default)]
    pub jumping_jack_count: u64,
}

impl ActivityRecord {
    /// Create a record with all counters at zero
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder method: set squat count
    pub fn squats(mut self, count: u64) -> Self {
        self.squat_count = count;
        self
    }

    /// Builder method: set pushup count
    pub fn pushups(mut self, count: u64) -> Self {
        self.pushup_count = count;
        self
    }

    /// Builder method: set jumping-jack count
    pub fn jumping_jacks(mut self, count: u64) -> Self {
        self.jumping_jack_count = count;
        self
    }
}

/// One row of the computed leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RankedEntry {
    pub name: String,
    pub squat_count: u64,
    pub pushup_count: u64,
    pub jumping_jack_count: u64,
    /// Weighted point total
    pub score: u64,
    /// 1-based position, unique per entry
    pub rank: usize,
    /// Whether this row belongs to the signed-in user
    pub is_current_user: bool,
}

impl RankedEntry {
    /// Trophy tier for this entry's rank
    pub fn medal(&self) -> MedalTier {
        MedalTier::for_rank(self.rank)
    }
}

/// Trophy tier by leaderboard position
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MedalTier {
    Gold,
    Silver,
    Bronze,
    None,
}

impl MedalTier {
    /// Tier for a 1-based rank. Only the top three ranks earn a medal.
    pub fn for_rank(rank: usize) -> Self {
        match rank {
            1 => MedalTier::Gold,
            2 => MedalTier::Silver,
            3 => MedalTier::Bronze,
            _ => MedalTier::None,
        }
    }
}

impl std::fmt::Display for MedalTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MedalTier::Gold => write!(f, "gold"),
            MedalTier::Silver => write!(f, "silver"),
            MedalTier::Bronze => write!(f, "bronze"),
            MedalTier::None => write!(f, "none"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_builder() {
        let record = ActivityRecord::new("alice")
            .squats(3)
            .pushups(4)
            .jumping_jacks(5);

        assert_eq!(record.name, "alice");
        assert_eq!(record.squat_count, 3);
        assert_eq!(record.pushup_count, 4);
        assert_eq!(record.jumping_jack_count, 5);
    }

    #[test]
    fn test_record_missing_counters_default_to_zero() {
        let record: ActivityRecord = serde_json::from_str(r#"{"name": "bob"}"#).unwrap();

        assert_eq!(record, ActivityRecord::new("bob"));
    }

    #[test]
    fn test_medal_tiers() {
        assert_eq!(MedalTier::for_rank(1), MedalTier::Gold);
        assert_eq!(MedalTier::for_rank(2), MedalTier::Silver);
        assert_eq!(MedalTier::for_rank(3), MedalTier::Bronze);
        assert_eq!(MedalTier::for_rank(4), MedalTier::None);
        assert_eq!(MedalTier::for_rank(0), MedalTier::None);
    }

    #[test]
    fn test_medal_serializes_lowercase() {
        let json = serde_json::to_string(&MedalTier::Bronze).unwrap();
        assert_eq!(json, "\"bronze\"");
        assert_eq!(MedalTier::Gold.to_string(), "gold");
    }
}
