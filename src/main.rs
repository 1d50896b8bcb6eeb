use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use brp_stuf_api::brp_client::BrpClient;
use brp_stuf_api::config::Config;
use brp_stuf_api::handlers::{self, AppState};
use brp_stuf_api::resources::{ResourceStore, Source, SOURCE_REF};

/// Main entry point for the application.
///
/// Initializes logging, configuration, the resource store and the BRP
/// client, then starts the Axum server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "brp_stuf_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Resolve sources and mappings. A missing mapping definition is not
    // fatal at startup: the pipeline answers fail-soft until it appears.
    let store = match ResourceStore::bootstrap(&config) {
        Ok(store) => {
            tracing::info!("Resource store bootstrapped");
            store
        }
        Err(e) => {
            tracing::error!("Resource bootstrap incomplete: {}", e);
            let mut store = ResourceStore::new();
            store.register_source(
                SOURCE_REF,
                Source {
                    location: config.brp_base_url.clone(),
                    api_key: config.brp_api_key.clone(),
                },
            );
            store
        }
    };

    // Initialize the BRP client
    let brp = BrpClient::new()?;
    tracing::info!("BRP client initialized: {}", config.brp_base_url);

    // Build application state
    let app_state = Arc::new(AppState {
        config: config.clone(),
        store,
        brp,
    });

    // Configure rate limiter: 10 requests/second per IP, burst of 20
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(10)
            .burst_size(20)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .unwrap(),
    );

    // Build protected routes with security layers
    let protected_routes = Router::new()
        .route("/stuf/bevragen", post(handlers::bevragen))
        .layer(
            ServiceBuilder::new()
                // Request size limit: 5MB max payload
                .layer(RequestBodyLimitLayer::new(5 * 1024 * 1024))
                // Rate limiting: 10 req/sec per IP, burst of 20
                .layer(GovernorLayer {
                    config: governor_conf,
                }),
        );

    // Build final app with health check bypassing the rate limiter
    let app = Router::new()
        .route("/health", get(handlers::health))
        .merge(protected_routes)
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
