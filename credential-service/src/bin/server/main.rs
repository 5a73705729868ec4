use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use credential_service::account::models::Secret;
use credential_service::account::ports::CredentialServicePort;
use credential_service::account::ports::Notifier;
use credential_service::config::Config;
use credential_service::domain::account::service::CredentialService;
use credential_service::domain::account::service::CredentialSettings;
use credential_service::inbound::http::router::create_router;
use credential_service::outbound::notifications::KafkaNotifier;
use credential_service::outbound::notifications::LogNotifier;
use credential_service::outbound::repositories::PostgresAccountStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "credential_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "credential-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        token_expiration_hours = config.token.expiration_hours,
        admin_registration = config.admin.key.is_some(),
        notifications_enabled = config.notifications.enabled,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let password_hasher = PasswordHasher::with_cost(
        config.password.memory_kib,
        config.password.iterations,
        config.password.parallelism,
    )?;
    let authenticator = Arc::new(Authenticator::with_password_hasher(
        config.token.secret.as_bytes(),
        password_hasher,
    ));

    let notifier: Arc<dyn Notifier> = if config.notifications.enabled {
        Arc::new(KafkaNotifier::new(&config.notifications)?)
    } else {
        tracing::warn!("Notifications disabled, messages will only be logged");
        Arc::new(LogNotifier::new())
    };

    let store = Arc::new(PostgresAccountStore::new(pg_pool));

    let settings = CredentialSettings {
        admin_key: config.admin.key.clone().map(Secret::new),
        token_expiration_hours: config.token.expiration_hours,
    };

    let credential_service: Arc<dyn CredentialServicePort> = Arc::new(CredentialService::new(
        store,
        notifier,
        Arc::clone(&authenticator),
        settings,
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(credential_service, authenticator);

    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited");

    Ok(())
}
