use crate::http::AppState;
use crate::models::{Book, FindBooksError, SaveBookError};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    status_code: u16,
    data: T,
}

impl<T: Serialize> ApiResponse<T> {
    const fn new(status: StatusCode, data: T) -> Self {
        Self {
            status_code: status.as_u16(),
            data,
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            Self::InternalServerError(msg) => {
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                (status, Json(ApiResponse::new(status, msg))).into_response()
            }
            Self::UnprocessableEntity(msg) => {
                let status = StatusCode::UNPROCESSABLE_ENTITY;
                (status, Json(ApiResponse::new(status, msg))).into_response()
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::UnprocessableEntity(rejection.body_text())
    }
}

impl From<FindBooksError> for ApiError {
    fn from(err: FindBooksError) -> Self {
        internal_server_error(&err.0)
    }
}

impl From<SaveBookError> for ApiError {
    fn from(err: SaveBookError) -> Self {
        internal_server_error(&err.0)
    }
}

fn internal_server_error(cause: &anyhow::Error) -> ApiError {
    tracing::error!(error = ?cause, "Request failed");
    ApiError::InternalServerError("Internal server error".to_string())
}

/// Request body of `POST /saveBook`. A present `id` updates that book.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveBookHttpRequest {
    #[serde(default)]
    id: Option<i64>,
    title: String,
    price: f64,
    #[serde(default)]
    author_id: Option<String>,
    #[serde(default)]
    published_date: Option<NaiveDate>,
}

impl From<SaveBookHttpRequest> for Book {
    fn from(value: SaveBookHttpRequest) -> Self {
        let book = Self::new(
            value.title,
            value.price,
            value.author_id,
            value.published_date,
        );
        match value.id {
            Some(id) => book.with_id(id),
            None => book,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookHttpResponse {
    id: Option<i64>,
    title: String,
    price: f64,
    author_id: Option<String>,
    published_date: Option<NaiveDate>,
}

impl From<Book> for BookHttpResponse {
    fn from(value: Book) -> Self {
        Self {
            id: value.id(),
            title: value.title().to_string(),
            price: value.price(),
            author_id: value.author_id().map(str::to_string),
            published_date: value.published_date(),
        }
    }
}

pub async fn hello() -> &'static str {
    "Hello"
}

/// Books as a bare JSON array.
pub async fn get_all_books(
    State(state): State<AppState>,
) -> Result<Json<Vec<BookHttpResponse>>, ApiError> {
    let books = state.book_service().get_all_books().await?;
    Ok(Json(books.into_iter().map(BookHttpResponse::from).collect()))
}

pub async fn save_book(
    State(state): State<AppState>,
    body: Result<Json<SaveBookHttpRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(body) = body?;
    state.book_service().save_book(&body.into()).await?;
    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_request_reads_camel_case_json() {
        let json = r#"{"title":"Go","price":9.99,"authorId":"1","publishedDate":"2020-01-01"}"#;
        let req: SaveBookHttpRequest = serde_json::from_str(json).unwrap();
        let book = Book::from(req);

        assert_eq!(book.id(), None);
        assert_eq!(book.title(), "Go");
        assert_eq!(book.author_id(), Some("1"));
        assert_eq!(book.published_date(), NaiveDate::from_ymd_opt(2020, 1, 1));
    }

    #[test]
    fn save_request_with_id_targets_existing_book() {
        let req: SaveBookHttpRequest =
            serde_json::from_str(r#"{"id":3,"title":"Go","price":1.0}"#).unwrap();
        let book = Book::from(req);

        assert_eq!(book.id(), Some(3));
        assert_eq!(book.author_id(), None);
        assert_eq!(book.published_date(), None);
    }

    #[test]
    fn book_response_is_camel_case() {
        let book = Book::new("Go".into(), 9.99, Some("1".into()), None).with_id(5);
        let json = serde_json::to_value(BookHttpResponse::from(book)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "id": 5,
                "title": "Go",
                "price": 9.99,
                "authorId": "1",
                "publishedDate": null,
            })
        );
    }
}
