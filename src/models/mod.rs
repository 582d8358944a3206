//! Data models for the Book API

pub mod book;
pub mod query;

// Re-export commonly used types
pub use book::{Book, CreateBook, Link, PatchBook, ReplaceBook};
pub use query::{BookFilter, BookQuery, ListBooksParams};
