mod graphql;
pub mod handler;

use crate::graphql::{LibrarySchema, build_schema};
use crate::services::{AuthorService, BookService};
use anyhow::Context;
use axum::Router;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    book_service: BookService,
    schema: LibrarySchema,
}

impl AppState {
    pub fn new(author_service: AuthorService, book_service: BookService) -> Self {
        let schema = build_schema(author_service, book_service.clone());
        Self {
            book_service,
            schema,
        }
    }

    pub const fn book_service(&self) -> &BookService {
        &self.book_service
    }

    pub const fn schema(&self) -> &LibrarySchema {
        &self.schema
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Services hold trait objects and the schema has no Debug impl.
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct HttpServerConfig {
    port: u16,
}

impl HttpServerConfig {
    pub const fn new(port: u16) -> Self {
        Self { port }
    }
}

pub struct HttpServer {
    router: Router,
    listener: TcpListener,
}

impl HttpServer {
    pub async fn new(state: AppState, config: HttpServerConfig) -> anyhow::Result<Self> {
        let router = router(state);

        let listener = TcpListener::bind(format!("0.0.0.0:{}", config.port))
            .await
            .with_context(|| format!("Failed to bind to port {}", config.port))?;

        Ok(Self { router, listener })
    }

    pub async fn run(self) -> anyhow::Result<()> {
        tracing::info!(
            addr = %self.listener.local_addr()?,
            "Listening; GraphQL at /graphql"
        );
        axum::serve(self.listener, self.router)
            .await
            .context("Received error from running server")?;
        Ok(())
    }
}

/// REST routes at the root plus the GraphQL endpoint.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(api_routes())
        .route("/graphql", get(graphql::graphiql).post(graphql::execute))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/hello", get(handler::hello))
        .route("/getAllBook", get(handler::get_all_books))
        .route("/saveBook", post(handler::save_book))
}
