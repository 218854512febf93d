//! arthra-lambda
//!
//! HTTP API over the scoring and report pipeline. Runs on AWS Lambda, or as a
//! plain HTTP server when `ARTHRA_LISTEN` is set.

use axum::middleware as axum_mw;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use arthra_storage::PatientStore;

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use state::AppState;

/// Build the API router over any patient store.
pub fn router<S: PatientStore + 'static>(state: AppState<S>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/health", get(routes::health::health_check))
        .route(
            "/patients",
            get(routes::patients::search_patients::<S>).post(routes::patients::create_patient::<S>),
        )
        .route("/patients/{id}", get(routes::patients::get_patient::<S>))
        .route("/allergies", post(routes::allergies::add_allergies::<S>))
        .route("/examination", post(routes::examination::save_examination::<S>))
        .route("/joint-count", post(routes::joints::record_joint_counts::<S>))
        .route("/das28", post(routes::das28::calculate_das28::<S>))
        .route("/report/{id}", get(routes::reports::generate_report::<S>));

    Router::new()
        .nest("/api", api)
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
