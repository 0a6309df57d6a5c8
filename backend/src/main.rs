use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use acme_store_backend::config::AppConfig;
use acme_store_backend::database::Database;
use acme_store_backend::error::{json_error_handler, AppError};
use acme_store_backend::services::{AuthService, OrderService};
use acme_store_backend::utils::jwt::JwtService;
use acme_store_backend::{handlers, routes};

#[actix_web::main]
async fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;
    info!("Starting acme-store backend on {}:{}", config.host, config.port);

    let database = Database::new(&config.database_url, config.database_max_connections).await?;
    database.migrate().await?;
    info!("Database ready");

    let jwt_service = JwtService::new(&config.jwt_secret, config.access_token_expire_minutes);
    let auth_service = AuthService::new(database.pool().clone(), jwt_service.clone())?;
    let order_service = OrderService::new(database.pool().clone());

    let bind_addr = format!("{}:{}", config.host, config.port);

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allow_any_method()
            .allow_any_header()
            .supports_credentials()
            .max_age(3600);
        for origin in config.allowed_origins() {
            cors = cors.allowed_origin(&origin);
        }

        App::new()
            .wrap(cors)
            .app_data(web::Data::new(database.clone()))
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(order_service.clone()))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .service(handlers::health::health_check)
            .service(routes::api_scope(&jwt_service))
    })
    .bind(bind_addr)?
    .run()
    .await
    .map_err(AppError::from)
}
