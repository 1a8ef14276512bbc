use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{delete, get, post, put},
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::SkycastError;
use crate::dashboard::{AppState, Dashboard, DashboardView, Event, Preferences};

/// The dashboard behind one lock so interactions never overlap
pub type SharedDashboard = Arc<Mutex<Dashboard>>;

#[derive(Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Serialize, Deserialize)]
pub struct SidebarRequest {
    pub visible: bool,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Error returned by the handlers
pub struct ApiError(SkycastError);

impl From<SkycastError> for ApiError {
    fn from(err: SkycastError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            SkycastError::Validation { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorBody {
            error: self.0.user_message(),
        };
        (status, Json(body)).into_response()
    }
}

pub fn router(dashboard: SharedDashboard) -> Router {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/search", post(search))
        .route("/refresh", post(refresh))
        .route("/default-location", post(use_default_location))
        .route("/settings", put(save_settings))
        .route("/favorites", post(add_favorite))
        .route("/favorites/{name}", delete(remove_favorite))
        .route("/sidebar", put(set_sidebar))
        .route("/state", get(get_state))
        .with_state(dashboard)
}

async fn dispatch(dashboard: &SharedDashboard, event: Event) -> Json<DashboardView> {
    let mut dashboard = dashboard.lock().await;
    Json(dashboard.dispatch(event).await)
}

async fn get_dashboard(State(dashboard): State<SharedDashboard>) -> Json<DashboardView> {
    dispatch(&dashboard, Event::Show).await
}

async fn search(
    State(dashboard): State<SharedDashboard>,
    Json(payload): Json<SearchRequest>,
) -> Result<Json<DashboardView>, ApiError> {
    let query = payload.query.trim();
    if query.is_empty() {
        return Err(SkycastError::validation("Search query must not be empty").into());
    }
    Ok(dispatch(&dashboard, Event::Search(query.to_string())).await)
}

async fn refresh(State(dashboard): State<SharedDashboard>) -> Json<DashboardView> {
    dispatch(&dashboard, Event::Refresh).await
}

async fn use_default_location(State(dashboard): State<SharedDashboard>) -> Json<DashboardView> {
    dispatch(&dashboard, Event::UseDefaultLocation).await
}

async fn save_settings(
    State(dashboard): State<SharedDashboard>,
    Json(preferences): Json<Preferences>,
) -> Json<DashboardView> {
    dispatch(&dashboard, Event::SaveSettings(preferences)).await
}

async fn add_favorite(State(dashboard): State<SharedDashboard>) -> Json<DashboardView> {
    dispatch(&dashboard, Event::AddFavorite).await
}

async fn remove_favorite(
    State(dashboard): State<SharedDashboard>,
    Path(name): Path<String>,
) -> Json<DashboardView> {
    dispatch(&dashboard, Event::RemoveFavorite(name)).await
}

async fn set_sidebar(
    State(dashboard): State<SharedDashboard>,
    Json(payload): Json<SidebarRequest>,
) -> Json<DashboardView> {
    dispatch(&dashboard, Event::SetSidebar(payload.visible)).await
}

async fn get_state(State(dashboard): State<SharedDashboard>) -> Json<AppState> {
    Json(dashboard.lock().await.state().clone())
}
