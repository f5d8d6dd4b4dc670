pub mod protocol;
pub mod rest;
pub mod state;

use axum::{routing::get, Router};
use rest::{
    airport_facets_handler, compare_handler, get_airport_handler, get_lounge_handler,
    health_handler, list_airports_handler, list_lounges_handler, lounge_facets_handler,
};
use state::AppState;
use std::sync::Arc;

/// Builds the read-only directory routes over the loaded catalog.
pub fn router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/lounges", get(list_lounges_handler))
        .route("/lounges/{id}", get(get_lounge_handler))
        .route("/airports", get(list_airports_handler))
        .route("/airports/{code}", get(get_airport_handler))
        .route("/facets/lounges", get(lounge_facets_handler))
        .route("/facets/airports", get(airport_facets_handler))
        .route("/compare", get(compare_handler))
        .with_state(app_state)
}
