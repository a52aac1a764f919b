use std::sync::Arc;

use auth::BearerResolver;
use auth::GrantFlow;
use auth::SessionIssuer;
use auth::TokenCodec;
use sqlx::postgres::PgPoolOptions;
use todo_service::config::Config;
use todo_service::domain::todo::service::TodoService;
use todo_service::domain::user::service::UserService;
use todo_service::inbound::http::router::create_router;
use todo_service::inbound::http::router::AppState;
use todo_service::outbound::repositories::PostgresTodoRepository;
use todo_service::outbound::repositories::PostgresUserRepository;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "todo-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    // Fails here, before any socket is bound, when the signing secret or
    // algorithm is missing or unusable.
    let token_config = config.token_config()?;

    tracing::info!(
        http_port = config.server.http_port,
        access_token_expire_minutes = config.access_token_expire_minutes,
        refresh_token_expire_minutes = config.refresh_token_expire_minutes,
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

    let codec = Arc::new(TokenCodec::new(&token_config));
    let session_issuer = Arc::new(SessionIssuer::new(Arc::clone(&codec), token_config));
    let grant_flow = Arc::new(GrantFlow::new(
        Arc::clone(&codec),
        Arc::clone(&session_issuer),
    ));
    let resolver = Arc::new(BearerResolver::new(codec));

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let todo_repository = Arc::new(PostgresTodoRepository::new(pg_pool));

    let state = AppState {
        user_service: Arc::new(UserService::new(user_repository)),
        todo_service: Arc::new(TodoService::new(todo_repository)),
        session_issuer,
        grant_flow,
        resolver,
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(state)).await?;

    Ok(())
}
