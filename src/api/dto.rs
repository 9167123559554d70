//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dashboard::MenuItem;
use crate::ranking::{MedalTier, RankedEntry};

// ============================================
// LEADERBOARD DTOs
// ============================================

/// One leaderboard row
#[derive(Debug, Serialize, Deserialize)]
pub struct RankedEntryDto {
    pub rank: usize,
    pub name: String,
    pub squats: u64,
    pub pushups: u64,
    pub jumping_jacks: u64,
    pub points: u64,
    pub medal: MedalTier,
    pub is_current_user: bool,
}

impl From<&RankedEntry> for RankedEntryDto {
    fn from(entry: &RankedEntry) -> Self {
        Self {
            rank: entry.rank,
            name: entry.name.clone(),
            squats: entry.squat_count,
            pushups: entry.pushup_count,
            jumping_jacks: entry.jumping_jack_count,
            points: entry.score,
            medal: entry.medal(),
            is_current_user: entry.is_current_user,
        }
    }
}

/// Leaderboard query parameters
#[derive(Debug, Default, Deserialize)]
pub struct LeaderboardParams {
    /// Maximum number of entries to return (podium is unaffected)
    pub limit: Option<usize>,
}

/// Leaderboard response
#[derive(Debug, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub podium: Vec<RankedEntryDto>,
    pub entries: Vec<RankedEntryDto>,
    /// Number of ranked users before any limit
    pub total: usize,
    pub current_user: Option<String>,
    pub generated_at: Option<DateTime<Utc>>,
}

// ============================================
// PROFILE DTOs
// ============================================

/// Top navigation bar data for the signed-in user
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub name: String,
    pub streak: u64,
    pub greeting: String,
}

// ============================================
// NAVIGATION DTOs
// ============================================

/// Sidebar state
#[derive(Debug, Serialize)]
pub struct NavigationResponse {
    pub title: &'static str,
    pub active: String,
    pub items: Vec<MenuItem>,
}

/// Tab selection request
#[derive(Debug, Deserialize)]
pub struct SelectTabRequest {
    pub tab: String,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub backend: String,
    pub uptime_seconds: u64,
    pub version: String,
}
