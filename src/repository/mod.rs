//! Repository layer for record store operations

pub mod books;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    config::{DatabaseConfig, StoreBackend},
    error::AppResult,
    models::{
        book::{Book, BookUpdate, NewBook, PatchBook},
        query::BookQuery,
    },
};

/// Record store holding book documents.
///
/// Ids are the 24-character hex form of a MongoDB `ObjectId`; a malformed id
/// is reported as [`AppError::InvalidId`](crate::error::AppError::InvalidId).
/// Update and delete calls return `None`/`false` when no record matches.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Fetch one page of books matching the query filter
    async fn find(&self, query: &BookQuery) -> AppResult<Vec<Book>>;

    async fn get(&self, id: &str) -> AppResult<Option<Book>>;

    /// Insert a new book, the store assigns its id
    async fn insert(&self, book: &NewBook) -> AppResult<Book>;

    /// Overwrite title, author and genre, returning the updated record
    async fn replace(&self, id: &str, data: &BookUpdate) -> AppResult<Option<Book>>;

    /// Write only the supplied fields, returning the updated record
    async fn patch(&self, id: &str, data: &PatchBook) -> AppResult<Option<Book>>;

    async fn delete(&self, id: &str) -> AppResult<bool>;

    async fn count(&self) -> AppResult<u64>;

    /// Check that the store is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// Main repository struct holding the store handle
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BookStore>,
}

impl Repository {
    /// Create a new repository over the given store
    pub fn new(books: Arc<dyn BookStore>) -> Self {
        Self { books }
    }

    /// Open the store selected by `database.backend`
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let books: Arc<dyn BookStore> = match config.backend {
            StoreBackend::Mongodb => Arc::new(books::MongoBookStore::connect(config).await?),
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory book store, data is lost on shutdown");
                Arc::new(memory::InMemoryBookStore::new())
            }
        };
        Ok(Self::new(books))
    }
}
