//! HTTP server assembly
//!
//! Application state, route table and the serve loop with graceful
//! shutdown.

use axum::http::header::CONTENT_TYPE;
use axum::http::Method;
use axum::middleware::from_fn;
use axum::routing::{delete, get, patch, post};
use axum::Router;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::config::Settings;
use crate::database::DatabaseService;
use crate::handlers;
use crate::middleware::log_requests;
use crate::services::ServiceFactory;
use crate::utils::errors::Result;

/// Shared application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseService,
    pub services: ServiceFactory,
    pub settings: Settings,
}

impl AppState {
    /// Assemble the state from a database service and settings
    pub fn new(db: DatabaseService, settings: Settings) -> Self {
        let services = ServiceFactory::new(&db, settings.clone());
        Self {
            db,
            services,
            settings,
        }
    }
}

/// Build the full route table
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/", get(handlers::pages::home))
        .route("/edit-exam/:exam_id", get(handlers::pages::edit_exam))
        .route("/api/health", get(handlers::health::health_check))
        .route("/api/stats", get(handlers::health::stats))
        .route(
            "/api/users",
            post(handlers::users::create_user).get(handlers::users::list_users),
        )
        .route(
            "/api/users/:id",
            get(handlers::users::get_user).patch(handlers::users::update_user),
        )
        .route(
            "/api/exams",
            post(handlers::exams::create_exam).get(handlers::exams::list_exams),
        )
        .route("/api/exams/import", post(handlers::import::import_exams))
        .route(
            "/api/exams/:id",
            get(handlers::exams::get_exam)
                .put(handlers::exams::update_exam)
                .delete(handlers::exams::delete_exam),
        )
        .route(
            "/api/exams/:id/attendance",
            get(handlers::attendance::list_for_exam).post(handlers::attendance::register_student),
        )
        .route(
            "/api/attendance/:id",
            patch(handlers::attendance::update_record).delete(handlers::attendance::delete_record),
        )
        .route("/api/exams/:id/rules", post(handlers::exams::add_rule))
        .route(
            "/api/rules/:id",
            patch(handlers::exams::update_rule).delete(handlers::exams::delete_rule),
        )
        .route(
            "/api/exams/:id/checklist",
            post(handlers::exams::add_checklist_item),
        )
        .route(
            "/api/checklist/:id",
            patch(handlers::exams::update_checklist_item)
                .delete(handlers::exams::delete_checklist_item),
        )
        .route(
            "/api/lecturers",
            post(handlers::lecturers::create_lecturer).get(handlers::lecturers::list_lecturers),
        )
        .route(
            "/api/exams/:id/lecturers",
            post(handlers::lecturers::attach_lecturer),
        )
        .route(
            "/api/exams/:id/lecturers/:lecturer_id",
            delete(handlers::lecturers::detach_lecturer),
        )
        .route(
            "/api/audit",
            post(handlers::audit::record_action).get(handlers::audit::list_actions),
        )
        .layer(from_fn(log_requests))
        .layer(cors)
        .with_state(state)
}

/// Bind and run the server until a shutdown signal arrives
pub async fn serve(state: AppState) -> Result<()> {
    let address = format!(
        "{}:{}",
        state.settings.server.host, state.settings.server.port
    );
    let app = build_router(state);

    info!("Binding to {}", address);
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let interrupt = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connection::{create_lazy_pool, DatabaseConfig};

    #[tokio::test]
    async fn test_router_builds() {
        let pool = create_lazy_pool(&DatabaseConfig::default()).unwrap();
        let db = DatabaseService::new(pool);
        let state = AppState::new(db, Settings::default());
        let _router = build_router(state);
    }
}
