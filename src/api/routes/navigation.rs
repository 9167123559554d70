//! Navigation Routes
//!
//! - GET /api/v1/navigation - Sidebar menu with the active tab
//! - PUT /api/v1/navigation/active - Select a tab

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{NavigationResponse, SelectTabRequest};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::dashboard::{Sidebar, Tab, DASHBOARD_TITLE};

fn render(sidebar: &Sidebar) -> NavigationResponse {
    NavigationResponse {
        title: DASHBOARD_TITLE,
        active: sidebar.active().id().to_string(),
        items: sidebar.menu_items(),
    }
}

/// GET /api/v1/navigation
pub async fn get_navigation(State(state): State<Arc<AppState>>) -> Json<NavigationResponse> {
    Json(render(&*state.sidebar.read().await))
}

/// PUT /api/v1/navigation/active
pub async fn select_tab(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SelectTabRequest>,
) -> ApiResult<Json<NavigationResponse>> {
    let tab: Tab = req.tab.parse()?;

    let mut sidebar = state.sidebar.write().await;
    sidebar.select(tab);

    Ok(Json(render(&sidebar)))
}
