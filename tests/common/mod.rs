use hexarch_graphql::database::{DefaultAuthorRepository, DefaultBookRepository, establish_pool};
use hexarch_graphql::services::{AuthorService, BookService};
use sqlx::SqlitePool;
use std::sync::Arc;

/// A fresh in-memory database.
pub async fn pool() -> SqlitePool {
    establish_pool("sqlite::memory:", 1).await.unwrap()
}

pub fn services_on(pool: &SqlitePool) -> (AuthorService, BookService) {
    (
        AuthorService::new(Arc::new(DefaultAuthorRepository::new(pool.clone()))),
        BookService::new(Arc::new(DefaultBookRepository::new(pool.clone()))),
    )
}

/// Services over a fresh in-memory database.
pub async fn services() -> (AuthorService, BookService) {
    services_on(&pool().await)
}
