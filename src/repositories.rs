use crate::models::{
    Author, Book, DeleteAuthorError, DeleteAuthorRequest, DeleteBookError, DeleteBookRequest,
    FindAllAuthorsError, FindAuthorError, FindAuthorRequest, FindBookError, FindBookRequest,
    FindBooksError, SaveAuthorError, SaveBookError,
};
use async_trait::async_trait;

#[async_trait]
pub trait AuthorRepository: Send + Sync + 'static {
    async fn find_all_authors(&self) -> Result<Vec<Author>, FindAllAuthorsError>;

    async fn find_author(&self, req: &FindAuthorRequest) -> Result<Author, FindAuthorError>;

    /// Inserts when `author.id()` is `None`, otherwise inserts or replaces that row.
    async fn save_author(&self, author: &Author) -> Result<Author, SaveAuthorError>;

    async fn delete_author(&self, req: &DeleteAuthorRequest) -> Result<(), DeleteAuthorError>;
}

#[async_trait]
pub trait BookRepository: Send + Sync + 'static {
    async fn find_all_books(&self) -> Result<Vec<Book>, FindBooksError>;

    async fn find_book(&self, req: &FindBookRequest) -> Result<Book, FindBookError>;

    async fn find_books_by_author_id(&self, author_id: &str) -> Result<Vec<Book>, FindBooksError>;

    /// Inserts when `book.id()` is `None`, otherwise inserts or replaces that row.
    async fn save_book(&self, book: &Book) -> Result<Book, SaveBookError>;

    async fn delete_book(&self, req: &DeleteBookRequest) -> Result<(), DeleteBookError>;
}
