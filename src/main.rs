use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use carepair::config::AppConfig;
use carepair::db::{self, SqliteStore};
use carepair::handlers;
use carepair::services::mailer::mailgun::MailgunMailer;
use carepair::services::mailer::Mailer;
use carepair::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;
    let store = Arc::new(SqliteStore::new(conn));

    let mailer: Option<Arc<dyn Mailer>> = if config.mail_configured() {
        tracing::info!(domain = %config.mail_domain, "confirmation emails enabled");
        Some(Arc::new(MailgunMailer::new(
            config.mail_api_base.clone(),
            config.mail_domain.clone(),
            config.mail_api_key.clone(),
            config.mail_from.clone(),
        )))
    } else {
        tracing::info!("mail credentials not set, confirmation emails disabled");
        None
    };

    let state = Arc::new(AppState {
        store,
        mailer,
        config: config.clone(),
    });

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route(
            "/api/bookings",
            post(handlers::bookings::create_booking).get(handlers::bookings::list_bookings),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
