use chrono::Duration as TokenLifetime;
use secrecy::ExposeSecret;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, PgConnection, Connection, Executor};
use std::net::TcpListener;
use uuid::Uuid;
use once_cell::sync::Lazy;
use reqwest::{Client, Response};

use tournament_backend::run;
use tournament_backend::auth::jwt::issue_token;
use tournament_backend::config::jwt::JwtSettings;
use tournament_backend::config::settings::{get_config, DatabaseSettings, get_jwt_settings, Settings};
use tournament_backend::models::context::UserRole;
use tournament_backend::telemetry::{get_subscriber, init_subscriber};

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::stdout
        );
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::sink
        );
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
    pub tenant_id: Uuid,
    pub client: Client,
    jwt_secret: String,
}

impl TestApp {
    /// Token for a fresh user of this app's tenant.
    pub fn token(&self, role: UserRole) -> String {
        self.token_for_tenant(self.tenant_id, role)
    }

    pub fn token_for_tenant(&self, tenant_id: Uuid, role: UserRole) -> String {
        let settings = JwtSettings::new(self.jwt_secret.clone());
        issue_token(&settings, Uuid::new_v4(), tenant_id, role, TokenLifetime::hours(1))
            .expect("Failed to sign test token")
    }

    pub fn coach_token(&self) -> String {
        self.token(UserRole::Coach)
    }

    pub async fn get(&self, path: &str, token: &str) -> Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post(&self, path: &str, token: &str, body: &Value) -> Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn put(&self, path: &str, token: &str, body: &Value) -> Response {
        self.client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn delete(&self, path: &str, token: &str) -> Response {
        self.client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

/// Spawn the server against a fresh, migrated database.
pub async fn spawn_app() -> TestApp {
    let mut configuration = get_config().expect("Failed to read configuration.");
    configuration.database.db_name = Uuid::new_v4().to_string();
    configuration.database.db_url = None;
    let connection_pool = configure_db(&configuration.database).await;
    start_server(configuration, connection_pool)
}

/// Spawn the server with a pool that never connects. Enough for routes that
/// are rejected or answered before touching Postgres.
pub fn spawn_app_without_db() -> TestApp {
    let configuration = get_config().expect("Failed to read configuration.");
    let connection_pool = PgPoolOptions::new()
        .connect_lazy(configuration.database.connection_string().expose_secret())
        .expect("Failed to create lazy pool");
    start_server(configuration, connection_pool)
}

fn start_server(configuration: Settings, connection_pool: PgPool) -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    Lazy::force(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    // Get port assigned by the OS
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let jwt_secret = configuration.jwt.secret.expose_secret().to_string();
    let jwt_settings = get_jwt_settings(&configuration);
    let server = run(
        listener,
        connection_pool.clone(),
        jwt_settings,
        configuration.cors,
    )
        .expect("Failed to bind address");
    // Launch the server as a background task
    let _ = tokio::spawn(server);

    TestApp {
        address,
        db_pool: connection_pool,
        tenant_id: Uuid::new_v4(),
        client: Client::new(),
        jwt_secret,
    }
}

pub async fn configure_db(config: &DatabaseSettings) -> PgPool {
    // Create database
    let mut connection = PgConnection::connect(
            &config.connection_string_without_db()
        )
        .await
        .expect("Failed to connect to Postgres");
    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, config.db_name).as_str())
        .await
        .expect("Failed to create database.");

    // Migrate database
    let connection_pool = PgPool::connect(config.connection_string().expose_secret())
        .await
        .expect("Failed to connect to Postgres.");
    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to migrate the database");

    connection_pool
}

/// Parse the response envelope and return `data`.
pub async fn data_of(response: Response) -> Value {
    let body: Value = response.json().await.expect("Response was not JSON");
    assert_eq!(body["success"], Value::Bool(true), "unexpected failure: {}", body);
    body["data"].clone()
}
