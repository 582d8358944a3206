//! API handlers for the Book REST endpoints

pub mod books;
pub mod health;
pub mod links;
pub mod openapi;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts},
    http::{header::HOST, request::Parts},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, AppState};

/// Prefix under which every API route is mounted
pub const API_PREFIX: &str = "/api";

/// JSON request body whose rejections are reported as validation errors
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Query string whose rejections are reported as validation errors
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct QueryParams<T>(pub T);

/// Scheme and authority used to build hypermedia links, e.g. `http://localhost:4000`
pub struct BaseUrl(pub String);

#[async_trait]
impl FromRequestParts<AppState> for BaseUrl {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(ref url) = state.config.server.public_url {
            return Ok(BaseUrl(url.trim_end_matches('/').to_string()));
        }

        let host = parts
            .headers
            .get(HOST)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .or_else(|| parts.uri.authority().map(|a| a.to_string()))
            .unwrap_or_else(|| "localhost".to_string());

        let scheme = forwarded_scheme(
            parts
                .headers
                .get("x-forwarded-proto")
                .and_then(|value| value.to_str().ok()),
        );

        Ok(BaseUrl(format!("{}://{}", scheme, host)))
    }
}

/// Scheme announced by a proxy; anything but `http`/`https` is ignored
fn forwarded_scheme(header: Option<&str>) -> &'static str {
    match header.map(|value| value.trim().to_ascii_lowercase()).as_deref() {
        Some("https") => "https",
        _ => "http",
    }
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book)
                .put(books::replace_book)
                .patch(books::patch_book)
                .delete(books::delete_book),
        )
        .with_state(state);

    Router::new()
        .nest(API_PREFIX, api)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
