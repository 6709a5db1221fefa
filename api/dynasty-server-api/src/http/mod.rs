use std::sync::Arc;

use axum::{
    Json, Router,
    http::{
        Method,
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    },
    routing::{get, post, put},
};
use dynasty_server_app::{Application, ServiceError};
use log::info;
use tower_http::cors::{Any, CorsLayer};

use crate::{ApiError, AppState};

mod account;
mod coach;
mod dynasty;
mod season;

pub async fn run(
    app: Arc<Application>,
    shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
) {
    let port = std::env::var("DYNASTY_HTTP_PORT")
        .expect("DYNASTY_HTTP_PORT must be set")
        .parse::<u16>()
        .expect("DYNASTY_HTTP_PORT must be a valid u16");
    let host = std::env::var("DYNASTY_HOST").expect("DYNASTY_HOST must be set");

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port))
        .await
        .expect("Failed to bind HTTP listener");

    info!("API server listening on {}:{}", host, port);
    axum::serve(listener, router(AppState { app }))
        .with_graceful_shutdown(shutdown_signal)
        .await
        .expect("HTTP server failed");

    info!("HTTP API shut down gracefully");
}

fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION, ACCEPT]);

    let auth = Router::new()
        .route("/register", post(account::register))
        .route("/login", post(account::login))
        .route("/me", get(account::me))
        .route(
            "/favorite-team",
            get(account::get_favorite_team).put(account::set_favorite_team),
        )
        .route("/update-username", put(account::update_username))
        .route("/update-password", put(account::update_password));

    let dynasties = Router::new()
        .route("/", get(dynasty::list).post(dynasty::create))
        .route(
            "/{id}",
            get(dynasty::get).put(dynasty::update).delete(dynasty::delete),
        )
        .route("/{id}/share", post(dynasty::share))
        .route("/{id}/share/{username}", axum::routing::delete(dynasty::revoke))
        .route("/{id}/coaches", get(coach::list).post(coach::create))
        .route("/{id}/coaches/start-season", post(season::advance))
        .route("/{id}/coaches/rollback-season", post(season::rollback))
        .route(
            "/{id}/coaches/{coach_id}",
            get(coach::get).put(coach::update).delete(coach::delete),
        )
        .route(
            "/{id}/coaches/{coach_id}/seasons/{year}",
            put(season::update),
        )
        .route(
            "/{id}/coaches/{coach_id}/seasons/{year}/toggle-edit",
            put(season::toggle_edit),
        );

    Router::new()
        .nest(
            "/api",
            Router::new()
                .route("/health", get(health))
                .nest("/auth", auth)
                .nest("/dynasties", dynasties),
        )
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "message": "Dynasty tracker API is running",
    }))
}

/// Path ids are uuids; anything else cannot name an existing record.
fn parse_id(raw: &str, what: &str) -> Result<uuid::Uuid, ApiError> {
    uuid::Uuid::parse_str(raw)
        .map_err(|_| ApiError(ServiceError::NotFound(format!("{} not found", what))))
}
