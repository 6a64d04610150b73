//! Routing table, built once at startup from plain handler functions.

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, SecurityConfig};
use crate::handlers;
use crate::middleware::fetch_user;
use crate::state::AppState;

pub fn app(state: AppState, config: &AppConfig) -> Router {
    let router = Router::new()
        // Public
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health));

    // Protected note API
    let notes = notes_routes(state.clone());
    let router = if config.api.base_path.is_empty() {
        router.merge(notes)
    } else {
        router.nest(&config.api.base_path, notes)
    };

    let router = router.layer(
        ServiceBuilder::new()
            .layer(cors_layer(&config.security))
            .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes)),
    );

    let router = if config.api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    };

    router.with_state(state)
}

fn notes_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/fetchallnotes", get(handlers::fetch_all_notes))
        .route("/addnotes", post(handlers::add_note))
        .route("/updatenote/:id", put(handlers::update_note))
        .route("/deletenote/:id", delete(handlers::delete_note))
        .route_layer(middleware::from_fn_with_state(state, fetch_user))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if !security.enable_cors {
        return CorsLayer::new();
    }
    if security.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
