//! Supabase Backend
//!
//! Talks to a hosted Supabase project over HTTP:
//! - GoTrue auth (`/auth/v1`) for the signed-in user and sign-out
//! - PostgREST (`/rest/v1`) for the `registered_trackies` table

use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use tokio::sync::RwLock;

use super::{ActivityStore, BackendError, IdentityProvider, UserProfile};
use crate::ranking::ActivityRecord;

/// PostgREST media type asking for a single JSON object instead of an array
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Fallback when a 429 carries no usable Retry-After header
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

const LEADERBOARD_COLUMNS: &str = "name,total_squats,pushups,jumping_jacks";
const PROFILE_COLUMNS: &str = "name,streak";

/// Connection settings for a Supabase project
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project URL (e.g., "https://xyzcompany.supabase.co")
    pub url: String,
    /// Public anon key, sent as the `apikey` header
    pub anon_key: String,
    /// Table holding one row per registered user
    pub table: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for SupabaseConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:54321".to_string(),
            anon_key: String::new(),
            table: "registered_trackies".to_string(),
            request_timeout_ms: 5000,
        }
    }
}

/// One row of the users table as PostgREST returns it
///
/// Every column is nullable on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackieRow {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub total_squats: Option<i64>,
    #[serde(default)]
    pub pushups: Option<i64>,
    #[serde(default)]
    pub jumping_jacks: Option<i64>,
    #[serde(default)]
    pub streak: Option<i64>,
}

impl TrackieRow {
    /// Convert into a ranking record. Null counters become zero,
    /// negative counters are rejected.
    pub fn into_record(self) -> Result<ActivityRecord, BackendError> {
        Ok(ActivityRecord {
            squat_count: counter("total_squats", self.total_squats)?,
            pushup_count: counter("pushups", self.pushups)?,
            jumping_jack_count: counter("jumping_jacks", self.jumping_jacks)?,
            name: self.name.unwrap_or_default(),
        })
    }

    /// Convert into the signed-in user's profile
    pub fn into_profile(self) -> Result<UserProfile, BackendError> {
        let streak = counter("streak", self.streak)?;
        Ok(UserProfile::from_stored(self.name, Some(streak)))
    }
}

fn counter(column: &str, value: Option<i64>) -> Result<u64, BackendError> {
    match value {
        None => Ok(0),
        Some(v) => u64::try_from(v)
            .map_err(|_| BackendError::Validation(format!("{} must not be negative, got {}", column, v))),
    }
}

/// Supabase-backed identity provider and activity store
pub struct SupabaseBackend {
    client: Client,
    config: SupabaseConfig,
    session: RwLock<Option<String>>,
}

impl SupabaseBackend {
    /// Create a backend with no signed-in session
    pub fn new(config: SupabaseConfig) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self {
            client,
            config,
            session: RwLock::new(None),
        })
    }

    /// Get the current configuration
    pub fn config(&self) -> &SupabaseConfig {
        &self.config
    }

    /// Adopt an access token issued by Supabase auth
    pub async fn set_session(&self, access_token: impl Into<String>) {
        *self.session.write().await = Some(access_token.into());
    }

    /// Whether an access token is currently held
    pub async fn has_session(&self) -> bool {
        self.session.read().await.is_some()
    }

    fn base_url(&self) -> &str {
        self.config.url.trim_end_matches('/')
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url(), self.config.table)
    }

    /// Attach the project key and the caller's bearer token
    async fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let session = self.session.read().await;
        let token = session.as_deref().unwrap_or(&self.config.anon_key);
        request
            .header("apikey", &self.config.anon_key)
            .bearer_auth(token)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, BackendError> {
        let response = self
            .authorize(request)
            .await
            .send()
            .await
            .map_err(BackendError::from_transport)?;

        check_status(response).await
    }

    /// Resolve the auth user id behind the held session
    async fn current_user_id(&self) -> Result<Option<String>, BackendError> {
        if !self.has_session().await {
            return Ok(None);
        }

        let url = format!("{}/auth/v1/user", self.base_url());
        let result = self.send(self.client.get(&url)).await;

        let response = match result {
            Ok(response) => response,
            Err(BackendError::NotAuthenticated) => {
                tracing::debug!("Session rejected by auth service");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        #[derive(Deserialize)]
        struct AuthUser {
            id: String,
        }

        let user: AuthUser = response
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))?;

        Ok(Some(user.id))
    }

    async fn fetch_profile(&self, user_id: &str) -> Result<UserProfile, BackendError> {
        let request = self
            .client
            .get(self.table_url())
            .header(header::ACCEPT, SINGLE_OBJECT)
            .query(&[
                ("select", PROFILE_COLUMNS.to_string()),
                ("user_id", format!("eq.{}", user_id)),
            ]);

        let row: TrackieRow = match self.send(request).await {
            Ok(response) => response
                .json()
                .await
                .map_err(|e| BackendError::Parse(e.to_string()))?,
            // PostgREST answers 406 when a single-object query matches no row
            Err(BackendError::Api { status: 406, .. }) => {
                return Err(BackendError::NotFound(format!("profile for user {}", user_id)))
            }
            Err(e) => return Err(e),
        };

        row.into_profile()
    }
}

async fn check_status(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after = response
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
            Err(BackendError::RateLimited(retry_after))
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(BackendError::NotAuthenticated),
        _ => {
            let message = response.text().await.unwrap_or_default();
            Err(BackendError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl IdentityProvider for SupabaseBackend {
    async fn current_profile(&self) -> Result<Option<UserProfile>, BackendError> {
        let Some(user_id) = self.current_user_id().await? else {
            return Ok(None);
        };

        let profile = self.fetch_profile(&user_id).await?;
        tracing::debug!(user_id = %user_id, name = %profile.name, "Resolved current user");
        Ok(Some(profile))
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        let had_session = self.has_session().await;
        let url = format!("{}/auth/v1/logout", self.base_url());

        let result = if had_session {
            self.send(self.client.post(&url)).await.map(|_| ())
        } else {
            Ok(())
        };

        // The local session is dropped even when the server call fails
        *self.session.write().await = None;

        if let Err(e) = &result {
            tracing::warn!("Remote sign-out failed: {}", e);
        }
        result
    }
}

#[async_trait]
impl ActivityStore for SupabaseBackend {
    async fn list_activity_records(&self) -> Result<Vec<ActivityRecord>, BackendError> {
        let request = self
            .client
            .get(self.table_url())
            .query(&[("select", LEADERBOARD_COLUMNS)]);

        let rows: Vec<TrackieRow> = self
            .send(request)
            .await?
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))?;

        tracing::debug!(rows = rows.len(), table = %self.config.table, "Fetched activity rows");

        rows.into_iter().map(TrackieRow::into_record).collect()
    }

    async fn health_check(&self) -> Result<(), BackendError> {
        let url = format!("{}/auth/v1/health", self.base_url());
        self.send(self.client.get(&url)).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::Query,
        http::{HeaderMap, StatusCode as AxumStatus},
        response::IntoResponse,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::json;
    use std::collections::HashMap;

    const GOOD_TOKEN: &str = "Bearer good-token";

    async fn auth_user(headers: HeaderMap) -> axum::response::Response {
        match headers.get("authorization").and_then(|v| v.to_str().ok()) {
            Some(GOOD_TOKEN) => Json(json!({ "id": "user-1", "email": "dana@example.com" })).into_response(),
            _ => AxumStatus::UNAUTHORIZED.into_response(),
        }
    }

    async fn table(Query(params): Query<HashMap<String, String>>) -> axum::response::Response {
        let select = params.get("select").cloned().unwrap_or_default();
        if select == PROFILE_COLUMNS {
            return match params.get("user_id").map(String::as_str) {
                Some("eq.user-1") => Json(json!({ "name": "Dana", "streak": 5 })).into_response(),
                _ => AxumStatus::NOT_ACCEPTABLE.into_response(),
            };
        }

        Json(json!([
            { "name": "Dana", "total_squats": 10, "pushups": 1, "jumping_jacks": null },
            { "name": "Eli", "total_squats": null, "pushups": 20 },
            { "name": null, "total_squats": 3, "pushups": 0, "jumping_jacks": 4 }
        ]))
        .into_response()
    }

    fn mock_router() -> Router {
        Router::new()
            .route("/auth/v1/user", get(auth_user))
            .route("/auth/v1/logout", post(|| async { AxumStatus::NO_CONTENT }))
            .route("/auth/v1/health", get(|| async { AxumStatus::OK }))
            .route("/rest/v1/registered_trackies", get(table))
    }

    async fn spawn(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn backend_for(url: String) -> SupabaseBackend {
        SupabaseBackend::new(SupabaseConfig {
            url,
            anon_key: "anon".to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_row_into_record_coerces_nulls() {
        let row: TrackieRow = serde_json::from_str(r#"{"name": "a", "pushups": 2}"#).unwrap();
        let record = row.into_record().unwrap();

        assert_eq!(record, ActivityRecord::new("a").pushups(2));
    }

    #[test]
    fn test_row_into_record_rejects_negative() {
        let row = TrackieRow {
            name: Some("a".into()),
            total_squats: Some(-1),
            ..Default::default()
        };

        assert!(matches!(row.into_record(), Err(BackendError::Validation(_))));
    }

    #[test]
    fn test_row_into_profile_defaults_name() {
        let row = TrackieRow {
            streak: Some(3),
            ..Default::default()
        };

        assert_eq!(
            row.into_profile().unwrap(),
            UserProfile { name: "User".into(), streak: 3 }
        );
    }

    #[tokio::test]
    async fn test_list_activity_records() {
        let backend = backend_for(spawn(mock_router()).await).await;

        let records = backend.list_activity_records().await.unwrap();

        assert_eq!(
            records,
            vec![
                ActivityRecord::new("Dana").squats(10).pushups(1),
                ActivityRecord::new("Eli").pushups(20),
                ActivityRecord::new("").squats(3).jumping_jacks(4),
            ]
        );
    }

    #[tokio::test]
    async fn test_profile_requires_session() {
        let backend = backend_for(spawn(mock_router()).await).await;

        assert_eq!(backend.current_profile().await.unwrap(), None);
        assert_eq!(backend.current_user_name().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_profile_with_session() {
        let backend = backend_for(spawn(mock_router()).await).await;
        backend.set_session("good-token").await;

        let profile = backend.current_profile().await.unwrap().unwrap();

        assert_eq!(profile.name, "Dana");
        assert_eq!(profile.streak, 5);
        assert_eq!(backend.current_user_name().await.unwrap().as_deref(), Some("Dana"));
    }

    #[tokio::test]
    async fn test_rejected_session_is_signed_out() {
        let backend = backend_for(spawn(mock_router()).await).await;
        backend.set_session("expired-token").await;

        assert_eq!(backend.current_profile().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_sign_out_clears_session() {
        let backend = backend_for(spawn(mock_router()).await).await;
        backend.set_session("good-token").await;

        backend.sign_out().await.unwrap();

        assert!(!backend.has_session().await);
        assert_eq!(backend.current_profile().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_negative_counter_fails_fetch() {
        let router = Router::new().route(
            "/rest/v1/registered_trackies",
            get(|| async { Json(json!([{ "name": "x", "pushups": -3 }])) }),
        );
        let backend = backend_for(spawn(router).await).await;

        let result = backend.list_activity_records().await;

        assert!(matches!(result, Err(BackendError::Validation(_))));
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let router = Router::new().route(
            "/rest/v1/registered_trackies",
            get(|| async { (AxumStatus::TOO_MANY_REQUESTS, [("retry-after", "12")]) }),
        );
        let backend = backend_for(spawn(router).await).await;

        let result = backend.list_activity_records().await;

        assert!(matches!(result, Err(BackendError::RateLimited(12))));
    }

    #[tokio::test]
    async fn test_server_error_maps_to_api_error() {
        let router = Router::new().route(
            "/rest/v1/registered_trackies",
            get(|| async { (AxumStatus::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let backend = backend_for(spawn(router).await).await;

        match backend.list_activity_records().await {
            Err(BackendError::Api { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_backend() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let backend = backend_for(format!("http://{}", addr)).await;

        let result = backend.list_activity_records().await;

        assert!(matches!(result, Err(BackendError::Unavailable)));
    }

    #[tokio::test]
    async fn test_config_defaults_table() {
        let backend = backend_for("http://localhost:54321/".to_string()).await;

        assert_eq!(backend.config().table, "registered_trackies");
        assert_eq!(backend.table_url(), "http://localhost:54321/rest/v1/registered_trackies");
    }

    #[tokio::test]
    async fn test_health_check() {
        let backend = backend_for(spawn(mock_router()).await).await;
        assert!(backend.health_check().await.is_ok());
    }
}
