use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use coupon_manager::adapters::http::{build_app, CouponHandlers, HttpSettings};
use coupon_manager::adapters::{InMemoryCouponRepository, PostgresCouponRepository};
use coupon_manager::config::{AppConfig, DatabaseConfig};
use coupon_manager::ports::CouponRepository;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let repository: Arc<dyn CouponRepository> = match &config.database {
        Some(database) => Arc::new(connect(database).await?),
        None => {
            tracing::warn!("No database configured, coupons are kept in memory");
            Arc::new(InMemoryCouponRepository::new())
        }
    };

    let settings = HttpSettings {
        request_timeout: config.server.request_timeout(),
        cors_origins: config.server.cors_origins_list(),
    };
    let app = build_app(CouponHandlers::new(repository), &settings);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Coupon manager listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    // JSON lines in production, human-readable otherwise
    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn connect(database: &DatabaseConfig) -> Result<PostgresCouponRepository, sqlx::Error> {
    let pool = database.pool_options().connect(&database.url).await?;
    tracing::info!("Connected to PostgreSQL");

    if database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Migrations applied");
    }

    Ok(PostgresCouponRepository::new(pool))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
