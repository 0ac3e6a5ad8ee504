//! GraphQL API over authors and books.
//!
//! Queries and mutations live in per-area objects that are merged into
//! [`QueryRoot`] and [`MutationRoot`]. Relations (`Author.books`,
//! `Book.author`) are resolved per record with a direct lookup.

mod errors;
pub mod mutations;
pub mod queries;
pub mod types;

use crate::services::{AuthorService, BookService};
use async_graphql::extensions::Tracing;
use async_graphql::{EmptySubscription, MergedObject, Schema};
use mutations::{AuthorMutations, BookMutations};
use queries::{AuthorQueries, BookQueries, GreetingQueries};

pub type LibrarySchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

#[derive(MergedObject, Default)]
pub struct QueryRoot(GreetingQueries, AuthorQueries, BookQueries);

#[derive(MergedObject, Default)]
pub struct MutationRoot(AuthorMutations, BookMutations);

pub fn build_schema(author_service: AuthorService, book_service: BookService) -> LibrarySchema {
    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        EmptySubscription,
    )
    .data(author_service)
    .data(book_service)
    .extension(Tracing)
    .finish()
}
