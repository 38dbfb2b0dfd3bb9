//! HTTP/JSON API (axum). Inbound adapter over TaskService and AuthService.
//!
//! ## Endpoints
//!
//! - `GET|POST /api/nextdate`: next occurrence, bare text (public); POST
//!   takes the same fields as a urlencoded form
//! - `POST /api/signin`: password → session token + cookie (public)
//! - `POST|GET|PUT|DELETE /api/task`, `GET /api/tasks`, `POST /api/task/done`
//!   serve task CRUD, behind the session cookie when auth is enabled
//! - anything else: static files from the web directory

pub mod error;
pub mod handlers;
pub mod middleware;

use crate::usecases::{AuthService, TaskService};
use axum::Router;
use axum::routing::{get, post};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Name of the session cookie set by sign-in.
pub const TOKEN_COOKIE: &str = "token";

/// Shared state for axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub tasks: Arc<TaskService>,
    pub auth: Arc<AuthService>,
}

/// Build the application router. `web_dir` serves static files for
/// non-API paths when given.
pub fn router(state: AppState, web_dir: Option<PathBuf>) -> Router {
    let protected = Router::new()
        .route(
            "/api/task",
            post(handlers::create_task)
                .get(handlers::get_task)
                .put(handlers::update_task)
                .delete(handlers::delete_task),
        )
        .route("/api/tasks", get(handlers::list_tasks))
        .route("/api/task/done", post(handlers::mark_done))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::require_auth,
        ));

    let mut app = Router::new()
        .route(
            "/api/nextdate",
            get(handlers::next_date).post(handlers::next_date_form),
        )
        .route("/api/signin", post(handlers::sign_in))
        .merge(protected);
    if let Some(dir) = web_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }
    app.with_state(state).layer(TraceLayer::new_for_http())
}

/// Bind `addr` and serve until the process stops or `shutdown` resolves.
pub async fn serve(
    app: Router,
    addr: SocketAddr,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "HTTP server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}
