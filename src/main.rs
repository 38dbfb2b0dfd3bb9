//! Wiring & DI. Entry point: bootstrap adapters, inject into services, serve HTTP.
//! No business logic here.

use dotenv::dotenv;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use todo_scheduler::adapters::clock::SystemClock;
use todo_scheduler::adapters::http::{self, AppState};
use todo_scheduler::adapters::persistence::{MemoryRepo, SqliteRepo};
use todo_scheduler::ports::{ClockPort, TaskRepoPort};
use todo_scheduler::shared::config::AppConfig;
use todo_scheduler::usecases::{AuthService, TaskService};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const IN_MEMORY_DB: &str = ":memory:";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let cfg = AppConfig::load().map_err(|e| anyhow::anyhow!("config: {}", e))?;

    // --- Storage ---
    let dbfile = cfg.dbfile_or_default();
    let repo: Arc<dyn TaskRepoPort> = if dbfile == IN_MEMORY_DB {
        warn!("TODO_DBFILE=:memory:, tasks are lost on exit");
        Arc::new(MemoryRepo::new())
    } else {
        Arc::new(
            SqliteRepo::connect(&dbfile)
                .await
                .map_err(|e| anyhow::anyhow!("SQLite connect failed: {}", e))?,
        )
    };
    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);

    // --- Services ---
    let list_limit = cfg.list_limit_or_default();
    let tasks = Arc::new(TaskService::new(repo, clock, list_limit));
    info!(today = %tasks.today(), list_limit, "task service ready");

    let auth = if cfg.is_auth_enabled() {
        info!(
            ttl_hours = cfg.token_ttl_hours_or_default(),
            "auth enabled (TODO_PASSWORD)"
        );
        AuthService::new(
            cfg.password(),
            cfg.jwt_secret(),
            cfg.token_ttl_hours_or_default(),
        )
    } else {
        warn!("TODO_PASSWORD not set, task API is open");
        AuthService::disabled()
    };

    // --- HTTP ---
    let web_dir = PathBuf::from(cfg.web_dir_or_default());
    let web_dir = if web_dir.is_dir() {
        info!(path = %web_dir.display(), "serving static files");
        Some(web_dir)
    } else {
        warn!(path = %web_dir.display(), "web directory not found, static files disabled");
        None
    };
    let app = http::router(
        AppState {
            tasks,
            auth: Arc::new(auth),
        },
        web_dir,
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.port_or_default()));
    http::serve(app, addr, async {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl-C received, shutting down");
        }
    })
    .await?;

    info!("Stopping App");
    Ok(())
}
