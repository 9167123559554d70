//! Dashboard View State
//!
//! Headless models for what the dashboard shows. Each one owns only the
//! state its panel needs and pulls data through the backend traits:
//!
//! - **navigation**: sidebar tabs and the active selection
//! - **top_nav**: greeting, streak, profile popup, logout
//! - **leaderboard**: ranked entries, podium and the current user's row

pub mod leaderboard;
pub mod navigation;
pub mod top_nav;

pub use leaderboard::{FetchError, LeaderboardView};
pub use navigation::{MenuItem, Sidebar, Tab, UnknownTab, DASHBOARD_TITLE};
pub use top_nav::TopNav;
