//! API Routes
//!
//! Route handlers organized by functionality.

pub mod health;
pub mod leaderboard;
pub mod navigation;
pub mod profile;
