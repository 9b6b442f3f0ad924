use axum::{Router, routing::get};
use http::header;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use whoowes::{
    InMemoryStorage, WhoOwesService,
    api::{handlers::api_routes, openapi::ApiDoc},
    auth::jwt::JwtService,
    config::CONFIG,
    infrastructure::seeder::seed_test_user,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&CONFIG.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    info!(config = ?*CONFIG, "configuration loaded");

    let jwt_service = JwtService::new(
        CONFIG.jwt_secret.clone(),
        CONFIG.jwt_issuer.clone(),
        CONFIG.jwt_audience.clone(),
        CONFIG.access_token_minutes,
    );
    let service = Arc::new(WhoOwesService::new(InMemoryStorage::new(), jwt_service, CONFIG.bcrypt_cost));

    if CONFIG.seed_test_user {
        seed_test_user(service.as_ref()).await?;
    }

    let app = Router::new()
        .route("/", get(|| async { "OK" }))
        .nest("/api", api_routes(service))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([http::Method::GET, http::Method::POST, http::Method::DELETE])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([127, 0, 0, 1], CONFIG.port));
    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
