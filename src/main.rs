//! Tutor Match Development Server
//!
//! HTTP server with every endpoint group enabled. For deployments that only
//! need a subset of the API, use the RouterBuilder from your own binary.

use std::sync::Arc;

use dotenv::dotenv;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use tutor_match::{
    api::{AppState, RouterBuilder},
    config::AppConfig,
    database::DatabaseConfig,
    service::{
        CatalogService, EmailConfig, EmailService, FeedService, JwtService, MatchingService,
        PolicyService, SearchService, UserService,
    },
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv().ok();

    env_logger::init();

    log::info!("🚀 Starting Tutor Match v{}", tutor_match::VERSION);

    let config = AppConfig::from_env()?;
    config.validate()?;

    log::info!("✅ Configuration loaded and validated");

    let db_config = DatabaseConfig {
        url: config.database_url.clone(),
        ..DatabaseConfig::default()
    };
    let pool = db_config.create_pool().await?;

    log::info!("🔄 Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    log::info!("✅ Database migrations completed");

    // Mail is optional in development; without SMTP credentials the service
    // still runs, it just skips notifications.
    let mailer = match EmailConfig::from_env() {
        Ok(email_config) => {
            let service = EmailService::new(email_config)?;
            log::info!("✅ Email service initialized");
            Some(Arc::new(service))
        }
        Err(e) => {
            log::warn!("⚠️  Email service not configured: {}", e);
            None
        }
    };

    let jwt_service = Arc::new(JwtService::new(config.jwt.secret.clone()));
    let state = AppState {
        user_service: Arc::new(UserService::new(
            pool.clone(),
            (*jwt_service).clone(),
            mailer.clone(),
        )),
        matching_service: Arc::new(MatchingService::new(pool.clone(), mailer)),
        catalog_service: Arc::new(CatalogService::new(pool.clone())),
        feed_service: Arc::new(FeedService::new(pool.clone())),
        policy_service: Arc::new(PolicyService::new(pool.clone())),
        search_service: Arc::new(SearchService::new(pool)),
        jwt_service,
    };

    log::info!("✅ Services initialized");

    let app = RouterBuilder::with_all_routes().build(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    log::info!("🌐 Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
