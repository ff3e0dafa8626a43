use axum::{Router, routing::get};

use super::handlers::jobs;
use super::handlers::probes::{healthz, livez};
use super::state::AppState;

pub fn build_routes(state: AppState) -> Router {
    Router::new()
        .route("/jobs", get(jobs::list).post(jobs::create))
        .route(
            "/jobs/{id}",
            get(jobs::retrieve).patch(jobs::update).delete(jobs::delete),
        )
        .route("/healthz", get(healthz))
        .route("/livez", get(livez))
        .with_state(state)
}
