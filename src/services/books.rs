//! Book management service

use validator::Validate;

use crate::{
    config::PaginationConfig,
    error::{AppError, AppResult},
    models::{
        book::{Book, CreateBook, PatchBook, ReplaceBook},
        query::{error_messages, ListBooksParams},
    },
    repository::Repository,
};

const UPDATE_NOT_FOUND: &str = "Book not found. Please check the ID.";
const CREATE_INVALID: &str = "Please provide title and author!";
const REPLACE_INVALID: &str = "Please provide title, author.";

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
    pagination: PaginationConfig,
}

impl BooksService {
    pub fn new(repository: Repository, pagination: PaginationConfig) -> Self {
        Self {
            repository,
            pagination,
        }
    }

    /// List books matching the filter parameters
    pub async fn list(&self, params: ListBooksParams) -> AppResult<Vec<Book>> {
        let query = params.into_query(&self.pagination)?;
        tracing::debug!(
            "Listing books: filter={:?} limit={} skip={}",
            query.filter,
            query.limit,
            query.skip
        );
        self.repository.books.find(&query).await
    }

    pub async fn get(&self, id: &str) -> AppResult<Book> {
        self.repository
            .books
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id of {} not found", id)))
    }

    pub async fn create(&self, data: CreateBook) -> AppResult<Book> {
        validated(&data, CREATE_INVALID)?;
        let book = data
            .into_new_book()
            .ok_or_else(|| AppError::validation(CREATE_INVALID))?;

        let created = self.repository.books.insert(&book).await?;
        tracing::info!("Book created: id={}", created.id);
        Ok(created)
    }

    /// Full update: title and author are mandatory, genre is set to whatever was sent
    pub async fn replace(&self, id: &str, data: ReplaceBook) -> AppResult<Book> {
        validated(&data, REPLACE_INVALID)?;
        let update = data
            .into_update()
            .ok_or_else(|| AppError::validation(REPLACE_INVALID))?;

        let updated = self
            .repository
            .books
            .replace(id, &update)
            .await?
            .ok_or_else(|| AppError::NotFound(UPDATE_NOT_FOUND.to_string()))?;
        tracing::info!("Book replaced: id={}", id);
        Ok(updated)
    }

    /// Partial update of the supplied fields only
    pub async fn patch(&self, id: &str, data: PatchBook) -> AppResult<Book> {
        if data.is_empty() {
            return Err(AppError::validation("Please provide at least one field to update."));
        }
        validated(&data, "Validation failed!")?;

        let updated = self
            .repository
            .books
            .patch(id, &data)
            .await?
            .ok_or_else(|| AppError::NotFound(UPDATE_NOT_FOUND.to_string()))?;
        tracing::info!("Book patched: id={}", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        if !self.repository.books.delete(id).await? {
            return Err(AppError::NotFound(UPDATE_NOT_FOUND.to_string()));
        }
        tracing::info!("Book deleted: id={}", id);
        Ok(())
    }

    /// Check the record store is reachable
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.books.ping().await
    }
}

fn validated<T: Validate>(data: &T, message: &str) -> AppResult<()> {
    data.validate().map_err(|errors| AppError::Validation {
        message: message.to_string(),
        errors: error_messages(&errors),
    })
}
