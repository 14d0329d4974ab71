use crate::telemetry::{DeviceSimulator, Telemetry};
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

#[derive(Debug, Clone)]
struct AppState {
    single: Arc<DeviceSimulator>,
    fleet: Arc<Vec<DeviceSimulator>>,
}

#[derive(Debug, Serialize)]
struct StatusResponse {
    status: &'static str,
    message: &'static str,
}

pub fn create_router(num_devices: usize) -> Router {
    let state = AppState {
        single: Arc::new(DeviceSimulator::new("device_1")),
        fleet: Arc::new(DeviceSimulator::fleet(num_devices)),
    };
    let ids: Vec<&str> = state.fleet.iter().map(|d| d.device_id()).collect();
    debug!("Simulated devices: {:?}", ids);

    Router::new()
        .route("/", get(home))
        .route("/telemetry", get(get_telemetry))
        .route("/telemetry/all", get(get_all_telemetry))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn home() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok",
        message: "Device Simulator API is running",
    })
}

async fn get_telemetry(State(state): State<AppState>) -> Json<Telemetry> {
    let mut rng = rand::thread_rng();
    Json(state.single.generate_telemetry(&mut rng))
}

async fn get_all_telemetry(State(state): State<AppState>) -> Json<Vec<Telemetry>> {
    let mut rng = rand::thread_rng();
    let readings: Vec<Telemetry> = state
        .fleet
        .iter()
        .map(|device| device.generate_telemetry(&mut rng))
        .collect();

    debug!("Serving {} readings", readings.len());
    Json(readings)
}
