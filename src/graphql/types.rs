use super::errors::{internal, invalid_argument};
use crate::models::{self, ResolveAuthorError};
use crate::services::{AuthorService, BookService};
use async_graphql::{Context, ID, InputObject, Object, Result};
use chrono::NaiveDate;

pub struct Author(pub models::Author);

#[Object]
impl Author {
    async fn id(&self) -> Option<ID> {
        self.0.id().map(|id| ID(id.to_string()))
    }

    async fn name(&self) -> &str {
        self.0.name()
    }

    async fn email(&self) -> &str {
        self.0.email()
    }

    /// Books whose `authorId` is this author's id.
    async fn books(&self, ctx: &Context<'_>) -> Result<Vec<Book>> {
        let books = ctx
            .data_unchecked::<BookService>()
            .get_books_for_author(&self.0)
            .await
            .map_err(internal)?;

        Ok(books.into_iter().map(Book).collect())
    }
}

pub struct Book(pub models::Book);

#[Object]
impl Book {
    async fn id(&self) -> Option<ID> {
        self.0.id().map(|id| ID(id.to_string()))
    }

    async fn title(&self) -> &str {
        self.0.title()
    }

    async fn price(&self) -> f64 {
        self.0.price()
    }

    async fn author_id(&self) -> Option<String> {
        self.0.author_id().map(str::to_string)
    }

    async fn published_date(&self) -> Option<NaiveDate> {
        self.0.published_date()
    }

    /// Null when the book has no author id or the author no longer exists.
    async fn author(&self, ctx: &Context<'_>) -> Result<Option<Author>> {
        match ctx
            .data_unchecked::<AuthorService>()
            .get_author_for_book(&self.0)
            .await
        {
            Ok(author) => Ok(author.map(Author)),
            Err(err @ ResolveAuthorError::InvalidAuthorId { .. }) => {
                Err(invalid_argument(err.to_string()))
            }
            Err(ResolveAuthorError::Other(err)) => Err(internal(err)),
        }
    }
}

#[derive(Debug, InputObject)]
pub struct AuthorInput {
    pub name: String,
    pub email: String,
}

impl From<AuthorInput> for models::Author {
    fn from(input: AuthorInput) -> Self {
        Self::new(input.name, input.email)
    }
}

#[derive(Debug, InputObject)]
pub struct BookInput {
    pub title: String,
    pub price: f64,
    pub author_id: Option<String>,
    pub published_date: Option<NaiveDate>,
}

impl From<BookInput> for models::Book {
    fn from(input: BookInput) -> Self {
        Self::new(
            input.title,
            input.price,
            input.author_id,
            input.published_date,
        )
    }
}
