use crate::models::{
    Author, Book, DeleteAuthorError, DeleteAuthorRequest, DeleteBookError, DeleteBookRequest,
    FindAllAuthorsError, FindAuthorError, FindAuthorRequest, FindBookError, FindBookRequest,
    FindBooksError, ResolveAuthorError, SaveAuthorError, SaveBookError,
};
use crate::repositories::{AuthorRepository, BookRepository};
use std::sync::Arc;

/// Author use cases. Lookups that find nothing return `Ok(None)`.
#[derive(Clone)]
pub struct AuthorService {
    repo: Arc<dyn AuthorRepository>,
}

impl AuthorService {
    pub fn new(repo: Arc<dyn AuthorRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_all_authors(&self) -> Result<Vec<Author>, FindAllAuthorsError> {
        self.repo.find_all_authors().await
    }

    pub async fn get_author_by_id(&self, id: i64) -> Result<Option<Author>, FindAuthorError> {
        match self.repo.find_author(&FindAuthorRequest::new(id)).await {
            Ok(author) => Ok(Some(author)),
            Err(FindAuthorError::NotFound { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub async fn save_author(&self, author: &Author) -> Result<Author, SaveAuthorError> {
        self.repo.save_author(author).await
    }

    /// Deleting an author that does not exist is a no-op. Books referring to
    /// the author are left in place.
    pub async fn delete(&self, id: i64) -> Result<(), DeleteAuthorError> {
        match self.repo.delete_author(&DeleteAuthorRequest::new(id)).await {
            Err(DeleteAuthorError::NotFound { id }) => {
                tracing::debug!(author_id = id, "Author already absent, nothing to delete");
                Ok(())
            }
            other => other,
        }
    }

    /// Follows `book.author_id()` to its author. A book without an author id,
    /// or whose author no longer exists, resolves to `None`.
    pub async fn get_author_for_book(
        &self,
        book: &Book,
    ) -> Result<Option<Author>, ResolveAuthorError> {
        let Some(raw) = book.author_id() else {
            return Ok(None);
        };
        let id = raw
            .parse::<i64>()
            .map_err(|_| ResolveAuthorError::InvalidAuthorId {
                author_id: raw.to_string(),
            })?;

        match self.repo.find_author(&FindAuthorRequest::new(id)).await {
            Ok(author) => Ok(Some(author)),
            Err(FindAuthorError::NotFound { .. }) => Ok(None),
            Err(FindAuthorError::Other(err)) => Err(ResolveAuthorError::Other(err)),
        }
    }
}

/// Book use cases. `save_book` and `update` both upsert.
#[derive(Clone)]
pub struct BookService {
    repo: Arc<dyn BookRepository>,
}

impl BookService {
    pub fn new(repo: Arc<dyn BookRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_all_books(&self) -> Result<Vec<Book>, FindBooksError> {
        self.repo.find_all_books().await
    }

    pub async fn get_book_by_id(&self, id: i64) -> Result<Option<Book>, FindBookError> {
        match self.repo.find_book(&FindBookRequest::new(id)).await {
            Ok(book) => Ok(Some(book)),
            Err(FindBookError::NotFound { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub async fn save_book(&self, book: &Book) -> Result<Book, SaveBookError> {
        self.repo.save_book(book).await
    }

    pub async fn update(&self, book: &Book) -> Result<Book, SaveBookError> {
        self.repo.save_book(book).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), DeleteBookError> {
        match self.repo.delete_book(&DeleteBookRequest::new(id)).await {
            Err(DeleteBookError::NotFound { id }) => {
                tracing::debug!(book_id = id, "Book already absent, nothing to delete");
                Ok(())
            }
            other => other,
        }
    }

    pub async fn get_books_by_author_id(&self, author_id: &str) -> Result<Vec<Book>, FindBooksError> {
        self.repo.find_books_by_author_id(author_id).await
    }

    /// Books whose `author_id` is the string form of `author.id()`. An unsaved
    /// author has no books.
    pub async fn get_books_for_author(&self, author: &Author) -> Result<Vec<Book>, FindBooksError> {
        match author.id() {
            Some(id) => self.get_books_by_author_id(&id.to_string()).await,
            None => Ok(Vec::new()),
        }
    }
}
