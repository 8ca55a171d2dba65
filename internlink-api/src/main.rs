//! # InternLink API Server
//!
//! HTTP API for the InternLink internship portal: account signup and login,
//! student and company profiles, internship postings, and the application
//! review workflow.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/internlink cargo run -p internlink-api
//! ```

use internlink_api::{
    app::{build_router, AppState},
    config::Config,
};
use internlink_shared::{
    auth::session::InMemorySessionStore,
    db::{
        migrations::run_migrations,
        pool::{create_pool, DatabaseConfig},
    },
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "internlink_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "InternLink API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let pool = create_pool(DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    run_migrations(&pool).await?;

    let sessions = Arc::new(InMemorySessionStore::new(config.session_ttl()));

    let bind_address = config.bind_address();
    let state = AppState::new(pool, sessions, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
