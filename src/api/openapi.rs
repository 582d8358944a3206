//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health, links};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Book API",
        version = "1.0.0",
        description = "CRUD REST API for book records"
    ),
    servers(
        (url = "/api", description = "Book API")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::replace_book,
        books::patch_book,
        books::delete_book,
    ),
    components(
        schemas(
            crate::models::book::Book,
            crate::models::book::BookResource,
            crate::models::book::CreateBook,
            crate::models::book::ReplaceBook,
            crate::models::book::PatchBook,
            crate::models::book::Link,
            links::BookListResponse,
            books::BookResponse,
            books::MessageResponse,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
