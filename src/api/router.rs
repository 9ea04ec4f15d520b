//! Router setup and configuration.

use axum::{
    Router,
    http::header::{AUTHORIZATION, CONTENT_TYPE},
    middleware,
    routing::{delete, get, post},
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{forwarder, health};
use crate::api::middleware::auth::require_token;
use crate::api::state::AppState;

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    // Status, health and metrics routes (no auth required)
    let mut health_routes = Router::new()
        .route("/", get(health::status))
        .route("/health", get(health::health))
        .route("/ready", get(health::ready));

    if state.config.observability.metrics_enabled {
        health_routes = health_routes.route(
            &state.config.observability.metrics_path,
            get(health::metrics),
        );
    }

    // Forwarder routes (API token required)
    let forwarder_routes = Router::new()
        .route("/add", post(forwarder::add))
        .route("/add/{*rest}", post(forwarder::add))
        .route("/list/{domain}", get(forwarder::list))
        .route("/delete/{email}", delete(forwarder::remove))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_token));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    Router::new()
        .merge(health_routes)
        .merge(forwarder_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .with_state(state)
}
