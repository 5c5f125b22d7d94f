pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod types;

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    middleware::from_fn_with_state,
    response::{IntoResponse, Json},
    routing::{get, patch, post, put},
    Router,
};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::auth::TokenIssuer;
use crate::database::{AccountStore, CatalogStore};
use crate::services::{CredentialService, RegistrationService};

/// Everything handlers need, constructed once at startup
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountStore>,
    pub catalog: Arc<dyn CatalogStore>,
    pub tokens: Arc<TokenIssuer>,
    pub min_password_length: usize,
}

impl AppState {
    /// One store object serving both traits
    pub fn with_store<S>(store: Arc<S>, tokens: TokenIssuer, min_password_length: usize) -> Self
    where
        S: AccountStore + CatalogStore + 'static,
    {
        Self {
            accounts: store.clone(),
            catalog: store,
            tokens: Arc::new(tokens),
            min_password_length,
        }
    }

    pub fn credentials(&self) -> CredentialService {
        CredentialService::new(self.accounts.clone(), self.tokens.clone())
    }

    pub fn registration(&self) -> RegistrationService {
        RegistrationService::new(self.accounts.clone(), self.min_password_length)
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_public_routes())
        // Protected API
        .merge(protected_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_public_routes() -> Router<AppState> {
    use handlers::public::auth;

    Router::new()
        .route("/auth/register/:role", post(auth::register_post))
        .route("/auth/login/visitor", post(auth::login_visitor))
        .route("/auth/login/staff", post(auth::login_staff))
        .route("/auth/refresh", post(auth::refresh_post))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use handlers::protected::{
        account, artifacts, artists, auth, edit_logs, events, exhibits, museums, reviews, staff,
    };

    Router::new()
        .route("/api/auth/whoami", get(auth::whoami))
        // Accounts
        .route(
            "/api/account",
            get(account::account_get)
                .patch(account::account_patch)
                .delete(account::account_delete),
        )
        .route("/api/supervisor", get(staff::supervisor_get))
        .route("/api/supervisor/employees", get(staff::employees_get))
        .route(
            "/api/supervisor/employees/:email",
            patch(staff::employee_patch).delete(staff::employee_delete),
        )
        .route("/api/employee", get(staff::employee_get))
        // Museums and visits
        .route("/api/museums", get(museums::museums_get))
        .route("/api/museum", get(museums::museum_get))
        .route(
            "/api/visits",
            get(museums::visits_get)
                .post(museums::visits_post)
                .delete(museums::visits_delete),
        )
        // Exhibits
        .route("/api/exhibits", get(exhibits::exhibits_get).post(exhibits::exhibits_post))
        .route(
            "/api/exhibits/:id",
            patch(exhibits::exhibit_patch).delete(exhibits::exhibit_delete),
        )
        // Artifacts
        .route("/api/artifacts", get(artifacts::artifacts_get).post(artifacts::artifacts_post))
        .route(
            "/api/artifacts/:id",
            get(artifacts::artifact_get)
                .patch(artifacts::artifact_patch)
                .delete(artifacts::artifact_delete),
        )
        .route(
            "/api/artifacts/:id/reviews",
            get(reviews::artifact_reviews_get)
                .post(reviews::artifact_review_post)
                .delete(reviews::artifact_review_delete),
        )
        // Events
        .route("/api/events", get(events::events_get).post(events::events_post))
        .route(
            "/api/events/:id",
            get(events::event_get)
                .patch(events::event_patch)
                .delete(events::event_delete),
        )
        .route(
            "/api/events/:id/reviews",
            get(reviews::event_reviews_get)
                .post(reviews::event_review_post)
                .delete(reviews::event_review_delete),
        )
        .route(
            "/api/events/:id/exhibits/:exhibit_id",
            put(events::event_exhibit_put).delete(events::event_exhibit_delete),
        )
        // Artists
        .route("/api/artists", get(artists::artists_get).post(artists::artists_post))
        .route(
            "/api/artists/:id",
            patch(artists::artist_patch).delete(artists::artist_delete),
        )
        .route("/api/artists/:id/works", get(artists::artist_works_get))
        .route(
            "/api/artists/:id/works/:artifact_id",
            put(artists::artist_work_put).delete(artists::artist_work_delete),
        )
        // Reviews and edit logs
        .route("/api/reviews", get(reviews::reviews_get))
        .route("/api/edit-logs", get(edit_logs::edit_logs_get))
        .route_layer(from_fn_with_state(state, middleware::jwt_auth_middleware))
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Museum API",
            "version": version,
            "description": "Museum management backend: accounts, catalog, events, reviews",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "public_auth": "/auth/register/:role, /auth/login/visitor, /auth/login/staff, /auth/refresh (public - token acquisition)",
                "auth": "/api/auth/whoami (protected)",
                "accounts": "/api/account, /api/supervisor[/employees[/:email]], /api/employee (protected)",
                "museums": "/api/museums, /api/museum?address=, /api/visits (protected)",
                "catalog": "/api/exhibits[/:id], /api/artifacts[/:id], /api/events[/:id], /api/artists[/:id] (protected)",
                "reviews": "/api/artifacts/:id/reviews, /api/events/:id/reviews, /api/reviews (protected)",
                "edit_logs": "/api/edit-logs (protected, supervisors)",
            }
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.accounts.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "error": true,
                    "message": "database unavailable",
                    "code": "SERVICE_UNAVAILABLE",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
        }
    }
}
