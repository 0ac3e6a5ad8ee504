use chrono::NaiveDate;
use thiserror::Error;

/// A book author. `id` is `None` until the author has been saved.
#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    id: Option<i64>,
    name: String,
    email: String,
}

impl Author {
    pub const fn new(name: String, email: String) -> Self {
        Self {
            id: None,
            name,
            email,
        }
    }

    pub const fn with_id(id: i64, name: String, email: String) -> Self {
        Self {
            id: Some(id),
            name,
            email,
        }
    }

    pub const fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

/// A book. `author_id` is the string form of an [`Author`] id and is not
/// checked against the author table.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    id: Option<i64>,
    title: String,
    price: f64,
    author_id: Option<String>,
    published_date: Option<NaiveDate>,
}

impl Book {
    pub const fn new(
        title: String,
        price: f64,
        author_id: Option<String>,
        published_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            id: None,
            title,
            price,
            author_id,
            published_date,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub const fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub const fn price(&self) -> f64 {
        self.price
    }

    pub fn author_id(&self) -> Option<&str> {
        self.author_id.as_deref()
    }

    pub const fn published_date(&self) -> Option<NaiveDate> {
        self.published_date
    }

    /// Overwrites every field except the id.
    pub fn overwrite(
        &mut self,
        title: String,
        price: f64,
        author_id: Option<String>,
        published_date: Option<NaiveDate>,
    ) {
        self.title = title;
        self.price = price;
        self.author_id = author_id;
        self.published_date = published_date;
    }
}

#[derive(Debug)]
pub struct FindAuthorRequest {
    id: i64,
}

impl FindAuthorRequest {
    pub const fn new(id: i64) -> Self {
        Self { id }
    }

    pub const fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Error, Debug)]
pub enum FindAuthorError {
    #[error("Author with id \"{id}\" does not exist")]
    NotFound { id: i64 },
    #[error(transparent)]
    Other(anyhow::Error),
}

#[derive(Error, Debug)]
#[error(transparent)]
pub struct FindAllAuthorsError(#[from] pub anyhow::Error);

#[derive(Error, Debug)]
#[error(transparent)]
pub struct SaveAuthorError(#[from] pub anyhow::Error);

#[derive(Debug)]
pub struct DeleteAuthorRequest {
    id: i64,
}

impl DeleteAuthorRequest {
    pub const fn new(id: i64) -> Self {
        Self { id }
    }

    pub const fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Error, Debug)]
pub enum DeleteAuthorError {
    #[error("Author with id \"{id}\" does not exist")]
    NotFound { id: i64 },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Debug)]
pub struct FindBookRequest {
    id: i64,
}

impl FindBookRequest {
    pub const fn new(id: i64) -> Self {
        Self { id }
    }

    pub const fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Error, Debug)]
pub enum FindBookError {
    #[error("Book with id \"{id}\" does not exist")]
    NotFound { id: i64 },
    #[error(transparent)]
    Other(anyhow::Error),
}

#[derive(Error, Debug)]
#[error(transparent)]
pub struct FindBooksError(#[from] pub anyhow::Error);

#[derive(Error, Debug)]
#[error(transparent)]
pub struct SaveBookError(#[from] pub anyhow::Error);

#[derive(Debug)]
pub struct DeleteBookRequest {
    id: i64,
}

impl DeleteBookRequest {
    pub const fn new(id: i64) -> Self {
        Self { id }
    }

    pub const fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Error, Debug)]
pub enum DeleteBookError {
    #[error("Book with id \"{id}\" does not exist")]
    NotFound { id: i64 },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Failure to follow `Book.author_id` to its author.
#[derive(Error, Debug)]
pub enum ResolveAuthorError {
    #[error("Book author id \"{author_id}\" is not a valid author id")]
    InvalidAuthorId { author_id: String },
    #[error(transparent)]
    Other(anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overwrite_keeps_id() {
        let mut book = Book::new("Old".into(), 1.0, None, None).with_id(7);
        book.overwrite("New".into(), 2.5, Some("3".into()), None);

        assert_eq!(book.id(), Some(7));
        assert_eq!(book.title(), "New");
        assert_eq!(book.price(), 2.5);
        assert_eq!(book.author_id(), Some("3"));
    }
}
