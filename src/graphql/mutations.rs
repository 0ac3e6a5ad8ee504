use super::errors::{internal, not_found, parse_id};
use super::types::{Author, AuthorInput, Book, BookInput};
use crate::models;
use crate::services::{AuthorService, BookService};
use async_graphql::{Context, ID, Object, Result};

#[derive(Default)]
pub struct AuthorMutations;

#[Object]
impl AuthorMutations {
    async fn create_author(&self, ctx: &Context<'_>, input: AuthorInput) -> Result<Author> {
        let author = ctx
            .data_unchecked::<AuthorService>()
            .save_author(&input.into())
            .await
            .map_err(internal)?;

        Ok(Author(author))
    }

    /// Books that referenced the author keep their `authorId`.
    async fn delete_author(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        let id = parse_id(&id, "author")?;
        ctx.data_unchecked::<AuthorService>()
            .delete(id)
            .await
            .map_err(internal)?;

        Ok(true)
    }
}

#[derive(Default)]
pub struct BookMutations;

#[Object]
impl BookMutations {
    async fn create_book(&self, ctx: &Context<'_>, input: BookInput) -> Result<Book> {
        save(ctx, input.into()).await
    }

    async fn save_book(&self, ctx: &Context<'_>, book: BookInput) -> Result<Book> {
        save(ctx, book.into()).await
    }

    /// Replaces every field of an existing book.
    async fn update_book(&self, ctx: &Context<'_>, id: ID, input: BookInput) -> Result<Book> {
        let id = parse_id(&id, "book")?;
        let service = ctx.data_unchecked::<BookService>();
        let mut book = service
            .get_book_by_id(id)
            .await
            .map_err(internal)?
            .ok_or_else(|| not_found(format!(r#"Book with id "{id}" does not exist"#)))?;

        book.overwrite(
            input.title,
            input.price,
            input.author_id,
            input.published_date,
        );
        let book = service.update(&book).await.map_err(internal)?;

        Ok(Book(book))
    }

    async fn delete_book(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        let id = parse_id(&id, "book")?;
        ctx.data_unchecked::<BookService>()
            .delete(id)
            .await
            .map_err(internal)?;

        Ok(true)
    }
}

async fn save(ctx: &Context<'_>, book: models::Book) -> Result<Book> {
    let book = ctx
        .data_unchecked::<BookService>()
        .save_book(&book)
        .await
        .map_err(internal)?;

    Ok(Book(book))
}
