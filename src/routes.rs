use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::SecurityConfig;
use crate::handlers::{protected, public, system};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

/// Full application router
pub fn app(state: AppState) -> Router {
    let body_limit = state.config.api.max_request_size_bytes;
    let request_logging = state.config.api.enable_request_logging;
    let cors = cors_layer(&state.config.security);

    let mut router = Router::new()
        // Public
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .merge(public_routes())
        // Protected
        .merge(note_routes(state.clone()))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state);

    if let Some(cors) = cors {
        router = router.layer(cors);
    }
    if request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(public::register_post))
        .route("/login", post(public::login_post))
}

fn note_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/notes",
            get(protected::notes_list).post(protected::notes_create),
        )
        .route(
            "/notes/:id",
            put(protected::notes_update).delete(protected::notes_delete),
        )
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(security: &SecurityConfig) -> Option<CorsLayer> {
    if !security.enable_cors {
        return None;
    }
    if security.cors_origins.iter().any(|origin| origin == "*") {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT]),
    )
}
