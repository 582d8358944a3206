//! Book endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use super::{
    links::{shape_list, BookListResponse},
    BaseUrl, JsonBody, QueryParams,
};
use crate::{
    error::{AppResult, ErrorResponse},
    models::{
        book::{Book, CreateBook, PatchBook, ReplaceBook},
        query::ListBooksParams,
    },
    AppState,
};

/// Single book wrapper
#[derive(Serialize, ToSchema)]
pub struct BookResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: Book,
}

impl BookResponse {
    fn new(data: Book, message: Option<&str>) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.map(str::to_string),
            data,
        })
    }
}

/// Confirmation without payload
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

/// List books with filters and pagination
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(ListBooksParams),
    responses(
        (status = 200, description = "Page of books with links", body = BookListResponse),
        (status = 400, description = "Invalid filter parameters", body = ErrorResponse)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    BaseUrl(base): BaseUrl,
    QueryParams(params): QueryParams<ListBooksParams>,
) -> AppResult<Json<BookListResponse>> {
    let books = state.services.books.list(params).await?;
    Ok(Json(shape_list(books, &base)))
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = BookResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<BookResponse>> {
    let book = state.services.books.get(&id).await?;
    Ok(BookResponse::new(book, None))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = BookResponse),
        (status = 400, description = "Title or author missing", body = ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    JsonBody(data): JsonBody<CreateBook>,
) -> AppResult<(StatusCode, Json<BookResponse>)> {
    let book = state.services.books.create(data).await?;
    Ok((StatusCode::CREATED, BookResponse::new(book, Some("book Added!"))))
}

/// Replace title, author and genre of a book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book ID")),
    request_body = ReplaceBook,
    responses(
        (status = 200, description = "Book updated", body = BookResponse),
        (status = 400, description = "Title or author missing", body = ErrorResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn replace_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(data): JsonBody<ReplaceBook>,
) -> AppResult<Json<BookResponse>> {
    let book = state.services.books.replace(&id, data).await?;
    Ok(BookResponse::new(book, Some("Book updated successfully!")))
}

/// Update only the supplied fields of a book
#[utoipa::path(
    patch,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book ID")),
    request_body = PatchBook,
    responses(
        (status = 200, description = "Book updated", body = BookResponse),
        (status = 400, description = "Empty or invalid update", body = ErrorResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn patch_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(data): JsonBody<PatchBook>,
) -> AppResult<Json<BookResponse>> {
    let book = state.services.books.patch(&id, data).await?;
    Ok(BookResponse::new(book, Some("Book updated successfully!")))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state.services.books.delete(&id).await?;
    Ok(Json(MessageResponse {
        success: true,
        message: format!("Book with ID {} deleted successfully.", id),
    }))
}
