use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::assessment::{HttpScoringClient, ScoringService};
use crate::config::Config;
use crate::routes::create_routes;
use crate::session::SessionContext;

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub session: SessionContext,
    pub scoring: Arc<dyn ScoringService>,
}

/// Initialize tracing and logging for the application
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "empowr_svc=info,tower_http=debug,axum::rejection=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Create and configure the Axum application with all routes and middleware
pub fn create_app(config: &Config) -> Result<Router, anyhow::Error> {
    info!("Initializing application router");

    let scoring = HttpScoringClient::new(&config.scoring_service_url)?;
    info!("Scoring service endpoint: {}", scoring.endpoint());

    Ok(router(AppState {
        session: SessionContext::new(),
        scoring: Arc::new(scoring),
    }))
}

/// Router over an existing state, used directly when the scoring service is swapped out
pub fn router(state: AppState) -> Router {
    create_routes()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
