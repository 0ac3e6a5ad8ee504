use super::errors::{internal, parse_id};
use super::types::{Author, Book};
use crate::services::{AuthorService, BookService};
use async_graphql::{Context, ID, Object, Result};

#[derive(Default)]
pub struct GreetingQueries;

#[Object]
impl GreetingQueries {
    async fn get_string(&self) -> &'static str {
        "Hello"
    }
}

#[derive(Default)]
pub struct AuthorQueries;

#[Object]
impl AuthorQueries {
    async fn get_all_authors(&self, ctx: &Context<'_>) -> Result<Vec<Author>> {
        let authors = ctx
            .data_unchecked::<AuthorService>()
            .get_all_authors()
            .await
            .map_err(internal)?;

        Ok(authors.into_iter().map(Author).collect())
    }

    /// Null when no author has this id.
    async fn get_author_by_id(&self, ctx: &Context<'_>, author_id: ID) -> Result<Option<Author>> {
        let id = parse_id(&author_id, "author")?;
        let author = ctx
            .data_unchecked::<AuthorService>()
            .get_author_by_id(id)
            .await
            .map_err(internal)?;

        Ok(author.map(Author))
    }
}

#[derive(Default)]
pub struct BookQueries;

#[Object]
impl BookQueries {
    async fn get_all_books(&self, ctx: &Context<'_>) -> Result<Vec<Book>> {
        let books = ctx
            .data_unchecked::<BookService>()
            .get_all_books()
            .await
            .map_err(internal)?;

        Ok(books.into_iter().map(Book).collect())
    }

    /// Null when no book has this id.
    async fn get_book_by_id(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "bookID")] book_id: ID,
    ) -> Result<Option<Book>> {
        let id = parse_id(&book_id, "book")?;
        let book = ctx
            .data_unchecked::<BookService>()
            .get_book_by_id(id)
            .await
            .map_err(internal)?;

        Ok(book.map(Book))
    }
}
