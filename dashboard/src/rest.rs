use crate::metrics;
use crate::model::DashboardResponse;
use crate::state::DashboardState;
use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use tokio::sync::watch;

#[derive(Debug, Clone)]
struct AppState {
    dashboard: watch::Receiver<DashboardState>,
}

pub fn create_router(dashboard: watch::Receiver<DashboardState>) -> Router {
    let state = AppState { dashboard };

    Router::new()
        .route("/api/v1/dashboard", get(get_dashboard))
        .route("/metrics", get(get_metrics))
        .with_state(state)
}

async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardResponse> {
    // Cards are derived per request so freshness tracks the wall clock
    let response = state.dashboard.borrow().to_response(Utc::now());
    Json(response)
}

async fn get_metrics() -> String {
    metrics::gather_metrics()
}
