//! Top navigation bar

use crate::backend::{BackendError, IdentityProvider, UserProfile};

/// Greeting, streak counter and profile popup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopNav {
    user_name: String,
    streak: u64,
    profile_popup_open: bool,
}

impl TopNav {
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate from an already resolved profile
    pub fn from_profile(profile: UserProfile) -> Self {
        Self {
            user_name: profile.name,
            streak: profile.streak,
            profile_popup_open: false,
        }
    }

    /// Load the signed-in user's name and streak.
    ///
    /// Returns whether a profile was loaded. Lookup failures are logged
    /// and leave the current state untouched.
    pub async fn load(&mut self, identity: &dyn IdentityProvider) -> bool {
        match identity.current_profile().await {
            Ok(Some(profile)) => {
                self.user_name = profile.name;
                self.streak = profile.streak;
                true
            }
            Ok(None) => false,
            Err(e) => {
                tracing::error!("Error fetching user data: {}", e);
                false
            }
        }
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn streak(&self) -> u64 {
        self.streak
    }

    pub fn greeting(&self) -> String {
        format!("Welcome {}!", self.user_name)
    }

    pub fn is_profile_popup_open(&self) -> bool {
        self.profile_popup_open
    }

    pub fn toggle_profile_popup(&mut self) {
        self.profile_popup_open = !self.profile_popup_open;
    }

    /// Sign out and reset to the signed-out state.
    ///
    /// The state is reset even when the backend call fails.
    pub async fn logout(&mut self, identity: &dyn IdentityProvider) -> Result<(), BackendError> {
        let result = identity.sign_out().await;
        *self = Self::default();
        tracing::info!("Signed out");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{InMemoryBackend, Member};

    async fn signed_in_backend() -> InMemoryBackend {
        let backend = InMemoryBackend::with_members(vec![Member::new("u1", "Dana").streak(9)]);
        backend.sign_in("u1").await;
        backend
    }

    #[tokio::test]
    async fn test_load_profile() {
        let backend = signed_in_backend().await;
        let mut nav = TopNav::new();

        assert!(nav.load(&backend).await);
        assert_eq!(nav.user_name(), "Dana");
        assert_eq!(nav.streak(), 9);
        assert_eq!(nav.greeting(), "Welcome Dana!");
    }

    #[tokio::test]
    async fn test_load_signed_out() {
        let backend = InMemoryBackend::demo();
        let mut nav = TopNav::new();

        assert!(!nav.load(&backend).await);
        assert_eq!(nav, TopNav::default());
    }

    #[tokio::test]
    async fn test_load_failure_keeps_state() {
        let backend = signed_in_backend().await;
        let mut nav = TopNav::new();
        nav.load(&backend).await;

        backend.set_unavailable(true);
        assert!(!nav.load(&backend).await);
        assert_eq!(nav.user_name(), "Dana");
    }

    #[test]
    fn test_toggle_popup() {
        let mut nav = TopNav::new();
        assert!(!nav.is_profile_popup_open());

        nav.toggle_profile_popup();
        assert!(nav.is_profile_popup_open());

        nav.toggle_profile_popup();
        assert!(!nav.is_profile_popup_open());
    }

    #[tokio::test]
    async fn test_logout_resets_state() {
        let backend = signed_in_backend().await;
        let mut nav = TopNav::new();
        nav.load(&backend).await;
        nav.toggle_profile_popup();

        nav.logout(&backend).await.unwrap();

        assert_eq!(nav, TopNav::default());
        assert!(!backend.is_signed_in().await);
    }
}
