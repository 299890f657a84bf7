use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use survey_api::auth::password::hash_password;
use survey_api::config::{BootstrapAdmin, ServerConfig};
use survey_api::router::build_app_router;
use survey_api::state::AppState;
use survey_db::models::admin::CreateAdmin;
use survey_db::repositories::{AdminRepo, SessionRepo};
use survey_db::DbPool;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "survey_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = survey_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    survey_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    survey_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    if let Some(bootstrap) = &config.bootstrap_admin {
        ensure_bootstrap_admin(&pool, bootstrap).await;
    }

    match SessionRepo::cleanup_expired(&pool).await {
        Ok(removed) => tracing::info!(removed, "Expired sessions cleaned up"),
        Err(e) => tracing::warn!(error = %e, "Session cleanup failed"),
    }

    // --- Router ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Create the configured administrator unless the email is already taken.
async fn ensure_bootstrap_admin(pool: &DbPool, bootstrap: &BootstrapAdmin) {
    let password_hash =
        hash_password(&bootstrap.password).expect("Failed to hash bootstrap admin password");

    let created = AdminRepo::create_if_absent(
        pool,
        &CreateAdmin {
            email: bootstrap.email.clone(),
            name: bootstrap.name.clone(),
            password_hash,
        },
    )
    .await
    .expect("Failed to create bootstrap admin");

    match created {
        Some(admin) => tracing::info!(admin_id = admin.id, email = %admin.email, "Bootstrap admin created"),
        None => tracing::debug!(email = %bootstrap.email, "Bootstrap admin already exists"),
    }
}

/// Wait for SIGINT or SIGTERM to initiate graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
