use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use course_service::config::Config;
use course_service::db::{create_pool, run_migrations};
use course_service::routes::configure_routes;
use course_service::security::jwt;
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn build_cors(origins: &str) -> Cors {
    if origins.trim() == "*" {
        return Cors::permissive();
    }

    let mut cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600);
    for origin in origins.split(',').map(str::trim).filter(|o| !o.is_empty()) {
        cors = cors.allowed_origin(origin);
    }
    cors
}

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let config = Config::from_env().context("Failed to load configuration")?;

    jwt::initialize_secret(&config.auth.jwt_secret)
        .context("Failed to initialize JWT secret")?;

    let pool = create_pool(&config.database.url, config.database.max_connections)
        .await
        .context("Failed to connect to PostgreSQL")?;

    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    info!("database migrations applied");

    let bind_addr = (config.app.host.clone(), config.app.port);
    info!(host = %config.app.host, port = config.app.port, env = %config.app.env, "starting course-service");

    let app_config = config.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(build_cors(&app_config.app.cors_origins))
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(app_config.clone()))
            .configure(configure_routes)
    })
    .bind(bind_addr)
    .context("Failed to bind HTTP server")?
    .run()
    .await
    .context("HTTP server error")
}
