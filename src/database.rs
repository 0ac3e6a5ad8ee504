use crate::models::{
    Author, Book, DeleteAuthorError, DeleteAuthorRequest, DeleteBookError, DeleteBookRequest,
    FindAllAuthorsError, FindAuthorError, FindAuthorRequest, FindBookError, FindBookRequest,
    FindBooksError, SaveAuthorError, SaveBookError,
};
use crate::repositories::{AuthorRepository, BookRepository};
use anyhow::{Context, anyhow};
use async_trait::async_trait;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow};
use sqlx::{FromRow, Row, SqlitePool};
use std::str::FromStr;

static MIGRATOR: Migrator = sqlx::migrate!();

pub async fn establish_pool(url: &str, max_connections: u32) -> anyhow::Result<SqlitePool> {
    let opts = SqliteConnectOptions::from_str(url)
        .with_context(|| format!("Invalid database url {url}"))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(opts)
        .await
        .with_context(|| format!("Failed to open database at {url}"))?;

    MIGRATOR
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    Ok(pool)
}

impl<'r> FromRow<'r, SqliteRow> for Author {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id = row.try_get("id")?;
        let name = row.try_get("name")?;
        let email = row.try_get("email")?;

        Ok(Self::with_id(id, name, email))
    }
}

impl<'r> FromRow<'r, SqliteRow> for Book {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id = row.try_get("id")?;
        let title = row.try_get("title")?;
        let price = row.try_get("price")?;
        let author_id = row.try_get("author_id")?;
        let published_date = row.try_get("published_date")?;

        Ok(Self::new(title, price, author_id, published_date).with_id(id))
    }
}

#[derive(Debug, Clone)]
pub struct DefaultAuthorRepository {
    pool: SqlitePool,
}

impl DefaultAuthorRepository {
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorRepository for DefaultAuthorRepository {
    async fn find_all_authors(&self) -> Result<Vec<Author>, FindAllAuthorsError> {
        let authors = sqlx::query_as("SELECT id, name, email FROM author ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|err| {
                let err = anyhow!(err).context("Failed to retrieve all authors");
                FindAllAuthorsError(err)
            })?;

        Ok(authors)
    }

    async fn find_author(&self, req: &FindAuthorRequest) -> Result<Author, FindAuthorError> {
        let author = sqlx::query_as("SELECT id, name, email FROM author WHERE id = ?")
            .bind(req.id())
            .fetch_one(&self.pool)
            .await
            .map_err(|err| {
                if matches!(err, sqlx::Error::RowNotFound) {
                    FindAuthorError::NotFound { id: req.id() }
                } else {
                    let err = anyhow!(err).context(format!(
                        r#"Failed to retrieve author with id "{}""#,
                        req.id()
                    ));
                    FindAuthorError::Other(err)
                }
            })?;

        Ok(author)
    }

    async fn save_author(&self, author: &Author) -> Result<Author, SaveAuthorError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")?;

        let query = match author.id() {
            // An id with no row inserts under that id instead of generating one.
            Some(id) => sqlx::query_as::<_, Author>(
                "INSERT INTO author (id, name, email) VALUES (?, ?, ?) \
                 ON CONFLICT (id) DO UPDATE SET name = excluded.name, email = excluded.email \
                 RETURNING id, name, email",
            )
            .bind(id),
            None => sqlx::query_as::<_, Author>(
                "INSERT INTO author (name, email) VALUES (?, ?) RETURNING id, name, email",
            ),
        };

        let saved = query
            .bind(author.name())
            .bind(author.email())
            .fetch_one(&mut *tx)
            .await
            .map_err(|err| {
                let err = anyhow!(err).context(format!(
                    r#"Failed to save author with name "{}""#,
                    author.name()
                ));
                SaveAuthorError(err)
            })?;

        tx.commit().await.context("Failed to commit transaction")?;

        Ok(saved)
    }

    async fn delete_author(&self, req: &DeleteAuthorRequest) -> Result<(), DeleteAuthorError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")?;

        let result = sqlx::query("DELETE FROM author WHERE id = ?")
            .bind(req.id())
            .execute(&mut *tx)
            .await
            .map_err(|err| {
                anyhow!(err).context(format!(r#"Failed to delete author with id "{}""#, req.id()))
            })?;

        if result.rows_affected() == 0 {
            return Err(DeleteAuthorError::NotFound { id: req.id() });
        }

        tx.commit().await.context("Failed to commit transaction")?;

        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct DefaultBookRepository {
    pool: SqlitePool,
}

impl DefaultBookRepository {
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepository for DefaultBookRepository {
    async fn find_all_books(&self) -> Result<Vec<Book>, FindBooksError> {
        let books = sqlx::query_as(
            "SELECT id, title, price, author_id, published_date FROM book ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|err| {
            let err = anyhow!(err).context("Failed to retrieve all books");
            FindBooksError(err)
        })?;

        Ok(books)
    }

    async fn find_book(&self, req: &FindBookRequest) -> Result<Book, FindBookError> {
        let book = sqlx::query_as(
            "SELECT id, title, price, author_id, published_date FROM book WHERE id = ?",
        )
        .bind(req.id())
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            if matches!(err, sqlx::Error::RowNotFound) {
                FindBookError::NotFound { id: req.id() }
            } else {
                let err = anyhow!(err).context(format!(
                    r#"Failed to retrieve book with id "{}""#,
                    req.id()
                ));
                FindBookError::Other(err)
            }
        })?;

        Ok(book)
    }

    async fn find_books_by_author_id(&self, author_id: &str) -> Result<Vec<Book>, FindBooksError> {
        let books = sqlx::query_as(
            "SELECT id, title, price, author_id, published_date FROM book \
             WHERE author_id = ? ORDER BY id",
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|err| {
            let err = anyhow!(err).context(format!(
                r#"Failed to retrieve books for author id "{author_id}""#
            ));
            FindBooksError(err)
        })?;

        Ok(books)
    }

    async fn save_book(&self, book: &Book) -> Result<Book, SaveBookError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")?;

        let query = match book.id() {
            // An id with no row inserts under that id instead of generating one.
            Some(id) => sqlx::query_as::<_, Book>(
                "INSERT INTO book (id, title, price, author_id, published_date) \
                 VALUES (?, ?, ?, ?, ?) \
                 ON CONFLICT (id) DO UPDATE SET title = excluded.title, \
                 price = excluded.price, author_id = excluded.author_id, \
                 published_date = excluded.published_date \
                 RETURNING id, title, price, author_id, published_date",
            )
            .bind(id),
            None => sqlx::query_as::<_, Book>(
                "INSERT INTO book (title, price, author_id, published_date) \
                 VALUES (?, ?, ?, ?) \
                 RETURNING id, title, price, author_id, published_date",
            ),
        };

        let saved = query
            .bind(book.title())
            .bind(book.price())
            .bind(book.author_id())
            .bind(book.published_date())
            .fetch_one(&mut *tx)
            .await
            .map_err(|err| {
                let err = anyhow!(err).context(format!(
                    r#"Failed to save book with title "{}""#,
                    book.title()
                ));
                SaveBookError(err)
            })?;

        tx.commit().await.context("Failed to commit transaction")?;

        Ok(saved)
    }

    async fn delete_book(&self, req: &DeleteBookRequest) -> Result<(), DeleteBookError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")?;

        let result = sqlx::query("DELETE FROM book WHERE id = ?")
            .bind(req.id())
            .execute(&mut *tx)
            .await
            .map_err(|err| {
                anyhow!(err).context(format!(r#"Failed to delete book with id "{}""#, req.id()))
            })?;

        if result.rows_affected() == 0 {
            return Err(DeleteBookError::NotFound { id: req.id() });
        }

        tx.commit().await.context("Failed to commit transaction")?;

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::NaiveDate;

    /// A fresh in-memory database. One connection, since every SQLite
    /// `:memory:` connection is its own database.
    pub(crate) async fn memory_pool() -> SqlitePool {
        establish_pool("sqlite::memory:", 1).await.unwrap()
    }

    #[tokio::test]
    async fn save_author_without_id_generates_one() {
        let repo = DefaultAuthorRepository::new(memory_pool().await);

        let saved = repo
            .save_author(&Author::new("Jane Doe".into(), "jane@x.com".into()))
            .await
            .unwrap();

        assert!(saved.id().is_some());
        let found = repo
            .find_author(&FindAuthorRequest::new(saved.id().unwrap()))
            .await
            .unwrap();
        assert_eq!(found, saved);
    }

    #[tokio::test]
    async fn save_author_with_id_updates_row() {
        let repo = DefaultAuthorRepository::new(memory_pool().await);
        let saved = repo
            .save_author(&Author::new("Jane".into(), "jane@x.com".into()))
            .await
            .unwrap();
        let id = saved.id().unwrap();

        repo.save_author(&Author::with_id(id, "Jane Doe".into(), "jd@x.com".into()))
            .await
            .unwrap();

        let all = repo.find_all_authors().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name(), "Jane Doe");
        assert_eq!(all[0].email(), "jd@x.com");
    }

    #[tokio::test]
    async fn find_missing_author_is_not_found() {
        let repo = DefaultAuthorRepository::new(memory_pool().await);

        let err = repo
            .find_author(&FindAuthorRequest::new(42))
            .await
            .unwrap_err();

        assert!(matches!(err, FindAuthorError::NotFound { id: 42 }));
    }

    #[tokio::test]
    async fn delete_missing_author_is_not_found() {
        let repo = DefaultAuthorRepository::new(memory_pool().await);

        let err = repo
            .delete_author(&DeleteAuthorRequest::new(1))
            .await
            .unwrap_err();

        assert!(matches!(err, DeleteAuthorError::NotFound { id: 1 }));
    }

    #[tokio::test]
    async fn book_round_trips_with_optional_fields() {
        let repo = DefaultBookRepository::new(memory_pool().await);
        let book = Book::new(
            "Go".into(),
            9.99,
            Some("1".into()),
            NaiveDate::from_ymd_opt(2020, 1, 1),
        );

        let saved = repo.save_book(&book).await.unwrap();
        let id = saved.id().unwrap();
        let found = repo.find_book(&FindBookRequest::new(id)).await.unwrap();

        assert_eq!(found, book.with_id(id));
    }

    #[tokio::test]
    async fn save_book_with_unused_id_inserts_under_that_id() {
        let repo = DefaultBookRepository::new(memory_pool().await);

        let saved = repo
            .save_book(&Book::new("Go".into(), 1.0, None, None).with_id(42))
            .await
            .unwrap();

        assert_eq!(saved.id(), Some(42));
        assert_eq!(repo.find_all_books().await.unwrap(), vec![saved]);
    }

    #[tokio::test]
    async fn find_books_by_author_id_filters() {
        let repo = DefaultBookRepository::new(memory_pool().await);
        for (title, author) in [("A", Some("1")), ("B", Some("2")), ("C", Some("1")), ("D", None)] {
            repo.save_book(&Book::new(title.into(), 1.0, author.map(Into::into), None))
                .await
                .unwrap();
        }

        let titles: Vec<String> = repo
            .find_books_by_author_id("1")
            .await
            .unwrap()
            .iter()
            .map(|b| b.title().to_string())
            .collect();

        assert_eq!(titles, ["A", "C"]);
    }

    #[tokio::test]
    async fn delete_book_removes_row() {
        let repo = DefaultBookRepository::new(memory_pool().await);
        let saved = repo
            .save_book(&Book::new("Go".into(), 1.0, None, None))
            .await
            .unwrap();
        let id = saved.id().unwrap();

        repo.delete_book(&DeleteBookRequest::new(id)).await.unwrap();

        let err = repo.find_book(&FindBookRequest::new(id)).await.unwrap_err();
        assert!(matches!(err, FindBookError::NotFound { .. }));
    }
}
