//! Book API server
//!
//! A REST JSON API for managing book records stored in MongoDB: filtered and
//! paginated listing with hypermedia links, lookup, creation, full and
//! partial updates, and deletion.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Wire the services over an already opened repository
    pub fn new(config: AppConfig, repository: repository::Repository) -> Self {
        let services = services::Services::new(repository, config.pagination.clone());
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}
