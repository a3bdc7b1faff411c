use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    middleware::{from_fn, from_fn_with_state},
    routing::{get, put},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    security_headers::security_headers_middleware, tracing::request_id_middleware,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ContentConfig;
use crate::handlers::{admin, health, public};
use crate::middleware::admin_gate_middleware;
use crate::services::{IdentityVerifier, MongoDb, RedisSessionStore, SessionRevocation};

#[derive(Clone)]
pub struct AppState {
    pub config: ContentConfig,
    pub db: MongoDb,
    pub sessions: Arc<dyn SessionRevocation>,
    pub verifier: Arc<IdentityVerifier>,
}

/// Connect the external collaborators and assemble the application state.
pub async fn build_state(config: ContentConfig) -> Result<AppState, AppError> {
    let db = MongoDb::connect(&config.mongodb.uri, &config.mongodb.database).await?;
    db.initialize_indexes().await?;
    tracing::info!("Database initialized successfully");

    let sessions = RedisSessionStore::new(&config.redis.url)
        .await
        .map_err(AppError::InternalError)?;
    tracing::info!("Session store initialized");

    let verifier = IdentityVerifier::new(&config.identity)?;
    tracing::info!("Identity verifier initialized");

    Ok(AppState {
        config,
        db,
        sessions: Arc::new(sessions),
        verifier: Arc::new(verifier),
    })
}

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    // Every route below the gate re-evaluates the allowlist per request.
    let admin_guarded = Router::new()
        .route(
            "/events",
            get(admin::list_events).post(admin::create_event),
        )
        .route(
            "/events/:id",
            put(admin::update_event).delete(admin::delete_event),
        )
        .route("/posts", get(admin::list_posts).post(admin::create_post))
        .route(
            "/posts/:id",
            put(admin::update_post).delete(admin::delete_post),
        )
        .route(
            "/projects",
            get(admin::list_projects).post(admin::create_project),
        )
        .route(
            "/projects/:id",
            put(admin::update_project).delete(admin::delete_project),
        )
        .route(
            "/partners",
            get(admin::list_partners).post(admin::create_partner),
        )
        .route(
            "/partners/:id",
            put(admin::update_partner).delete(admin::delete_partner),
        )
        .route(
            "/team",
            get(admin::list_team_members).post(admin::create_team_member),
        )
        .route(
            "/team/:id",
            put(admin::update_team_member).delete(admin::delete_team_member),
        )
        .route(
            "/gallery",
            get(admin::list_gallery_items).post(admin::create_gallery_item),
        )
        .route(
            "/gallery/:id",
            put(admin::update_gallery_item).delete(admin::delete_gallery_item),
        )
        .route_layer(from_fn_with_state(state.clone(), admin_gate_middleware));

    // `/admin/me` is the non-throwing query form and stays outside the gate.
    let admin_routes = Router::new()
        .route("/me", get(admin::me))
        .merge(admin_guarded);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/events", get(public::list_events))
        .route("/posts", get(public::list_posts))
        .route("/projects", get(public::list_projects))
        .route("/partners", get(public::list_partners))
        .route("/team", get(public::list_team))
        .route("/gallery", get(public::list_gallery))
        .nest("/admin", admin_routes)
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(config: &ContentConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .security
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
