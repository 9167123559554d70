//! In-memory backend
//!
//! Holds members and the signed-in session in process. Used by tests, the
//! offline demo server and anywhere a real Supabase project is not wanted.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use super::{ActivityStore, BackendError, IdentityProvider, UserProfile};
use crate::ranking::ActivityRecord;

/// A registered user with their counters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub user_id: String,
    pub name: Option<String>,
    pub squats: u64,
    pub pushups: u64,
    pub jumping_jacks: u64,
    pub streak: u64,
}

impl Member {
    pub fn new(user_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            name: Some(name.into()),
            squats: 0,
            pushups: 0,
            jumping_jacks: 0,
            streak: 0,
        }
    }

    /// Builder method: set counters
    pub fn counts(mut self, squats: u64, pushups: u64, jumping_jacks: u64) -> Self {
        self.squats = squats;
        self.pushups = pushups;
        self.jumping_jacks = jumping_jacks;
        self
    }

    /// Builder method: set streak
    pub fn streak(mut self, days: u64) -> Self {
        self.streak = days;
        self
    }

    fn record(&self) -> ActivityRecord {
        ActivityRecord::new(self.name.clone().unwrap_or_default())
            .squats(self.squats)
            .pushups(self.pushups)
            .jumping_jacks(self.jumping_jacks)
    }

    fn profile(&self) -> UserProfile {
        UserProfile::from_stored(self.name.clone(), Some(self.streak))
    }
}

/// Identity provider and activity store backed by process memory
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    members: RwLock<Vec<Member>>,
    session: RwLock<Option<String>>,
    unavailable: AtomicBool,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend preloaded with members, in the given order
    pub fn with_members(members: Vec<Member>) -> Self {
        Self {
            members: RwLock::new(members),
            ..Default::default()
        }
    }

    /// A small set of members for the offline demo
    pub fn demo() -> Self {
        Self::with_members(vec![
            Member::new("demo-1", "Avery").counts(120, 40, 60).streak(6),
            Member::new("demo-2", "Jordan").counts(80, 75, 10).streak(12),
            Member::new("demo-3", "Riley").counts(30, 20, 200).streak(2),
            Member::new("demo-4", "Sam").counts(45, 10, 0).streak(1),
            Member::new("demo-5", "Quinn").counts(0, 0, 0),
        ])
    }

    pub async fn add_member(&self, member: Member) {
        self.members.write().await.push(member);
    }

    /// Start a session for the given user id
    pub async fn sign_in(&self, user_id: impl Into<String>) {
        *self.session.write().await = Some(user_id.into());
    }

    pub async fn is_signed_in(&self) -> bool {
        self.session.read().await.is_some()
    }

    /// Make every subsequent call fail as if the backend were down
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> Result<(), BackendError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(BackendError::Unavailable)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl IdentityProvider for InMemoryBackend {
    async fn current_profile(&self) -> Result<Option<UserProfile>, BackendError> {
        self.ensure_available()?;

        let session = self.session.read().await;
        let Some(user_id) = session.as_deref() else {
            return Ok(None);
        };

        self.members
            .read()
            .await
            .iter()
            .find(|m| m.user_id == user_id)
            .map(|m| Some(m.profile()))
            .ok_or_else(|| BackendError::NotFound(format!("profile for user {}", user_id)))
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        *self.session.write().await = None;
        Ok(())
    }
}

#[async_trait]
impl ActivityStore for InMemoryBackend {
    async fn list_activity_records(&self) -> Result<Vec<ActivityRecord>, BackendError> {
        self.ensure_available()?;
        Ok(self.members.read().await.iter().map(Member::record).collect())
    }

    async fn health_check(&self) -> Result<(), BackendError> {
        self.ensure_available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_in_insertion_order() {
        let backend = InMemoryBackend::with_members(vec![
            Member::new("u1", "b").counts(1, 0, 0),
            Member::new("u2", "a").counts(0, 1, 0),
        ]);
        backend.add_member(Member::new("u3", "c")).await;

        let records = backend.list_activity_records().await.unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();

        assert_eq!(names, vec!["b", "a", "c"]);
        assert_eq!(records[1].pushup_count, 1);
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let backend = InMemoryBackend::with_members(vec![Member::new("u1", "Dana").streak(3)]);

        assert_eq!(backend.current_user_name().await.unwrap(), None);

        backend.sign_in("u1").await;
        let profile = backend.current_profile().await.unwrap().unwrap();
        assert_eq!(profile, UserProfile { name: "Dana".into(), streak: 3 });

        backend.sign_out().await.unwrap();
        assert!(!backend.is_signed_in().await);
        assert_eq!(backend.current_profile().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unknown_session_user() {
        let backend = InMemoryBackend::new();
        backend.sign_in("ghost").await;

        assert!(matches!(
            backend.current_profile().await,
            Err(BackendError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_unavailable() {
        let backend = InMemoryBackend::demo();
        backend.set_unavailable(true);

        assert!(matches!(
            backend.list_activity_records().await,
            Err(BackendError::Unavailable)
        ));
        assert!(backend.health_check().await.is_err());

        backend.set_unavailable(false);
        assert_eq!(backend.list_activity_records().await.unwrap().len(), 5);
    }
}
