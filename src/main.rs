use hexarch_graphql::config::Config;
use hexarch_graphql::database::{DefaultAuthorRepository, DefaultBookRepository, establish_pool};
use hexarch_graphql::http::{AppState, HttpServer, HttpServerConfig};
use hexarch_graphql::services::{AuthorService, BookService};
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hexarch_graphql=debug,tower_http=debug".into()),
        )
        .with(fmt::layer())
        .init();

    let pool = establish_pool(config.database_url(), config.database_max_connections()).await?;
    tracing::info!("Database ready");

    let author_service = AuthorService::new(Arc::new(DefaultAuthorRepository::new(pool.clone())));
    let book_service = BookService::new(Arc::new(DefaultBookRepository::new(pool)));

    let state = AppState::new(author_service, book_service);
    let server_config = HttpServerConfig::new(config.server_port());
    let http_server = HttpServer::new(state, server_config).await?;
    http_server.run().await
}
