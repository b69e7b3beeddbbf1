use std::net::TcpListener;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

use tournament_backend::run;
use tournament_backend::config::settings::{get_config, get_jwt_settings};
use tournament_backend::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Panic if we can't read the config
    let config = get_config().expect("Failed to read the config.");

    let subscriber = get_subscriber(
        "tournament-backend".into(),
        config.application.log_level.clone(),
        std::io::stdout
    );
    init_subscriber(subscriber);

    let jwt_settings = get_jwt_settings(&config);

    // Only try to establish connection when actually used
    let pool = &config.database.pool;
    let connection_pool = PgPoolOptions::new()
        .max_connections(pool.max_connections)
        .acquire_timeout(Duration::from_secs(pool.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(pool.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(pool.max_lifetime_secs))
        .connect_lazy(
            config.database.connection_string().expose_secret()
        )
        .expect("Failed to create Postgres connection pool");

    if let Err(e) = sqlx::migrate!("./migrations").run(&connection_pool).await {
        tracing::error!("Failed to run database migrations: {}", e);
        std::process::exit(1);
    }
    tracing::info!("Database migrations applied");

    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&address)?;
    tracing::info!("Listening on {}", address);

    run(
        listener,
        connection_pool,
        jwt_settings,
        config.cors,
    )?.await
}
