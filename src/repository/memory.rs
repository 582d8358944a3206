//! In-process book store, used for local development and tests

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::BookStore;
use crate::{
    error::AppResult,
    models::{
        book::{Book, BookUpdate, NewBook, PatchBook},
        query::BookQuery,
    },
};

/// Books kept in insertion order behind an async lock
#[derive(Default)]
pub struct InMemoryBookStore {
    books: RwLock<Vec<Book>>,
}

impl InMemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the id format the same way the MongoDB store does
    fn parse_id(id: &str) -> AppResult<String> {
        Ok(ObjectId::parse_str(id)?.to_hex())
    }
}

#[async_trait]
impl BookStore for InMemoryBookStore {
    async fn find(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        let books = self.books.read().await;
        Ok(books
            .iter()
            .filter(|b| query.filter.matches(b))
            .skip(query.skip as usize)
            .take(query.limit as usize)
            .cloned()
            .collect())
    }

    async fn get(&self, id: &str) -> AppResult<Option<Book>> {
        let id = Self::parse_id(id)?;
        let books = self.books.read().await;
        Ok(books.iter().find(|b| b.id == id).cloned())
    }

    async fn insert(&self, book: &NewBook) -> AppResult<Book> {
        let book = Book {
            id: ObjectId::new().to_hex(),
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre.clone(),
            read: book.read,
        };
        self.books.write().await.push(book.clone());
        Ok(book)
    }

    async fn replace(&self, id: &str, data: &BookUpdate) -> AppResult<Option<Book>> {
        let id = Self::parse_id(id)?;
        let mut books = self.books.write().await;
        Ok(books.iter_mut().find(|b| b.id == id).map(|book| {
            book.title = data.title.clone();
            book.author = data.author.clone();
            book.genre = data.genre.clone();
            book.clone()
        }))
    }

    async fn patch(&self, id: &str, data: &PatchBook) -> AppResult<Option<Book>> {
        let id = Self::parse_id(id)?;
        let mut books = self.books.write().await;
        Ok(books.iter_mut().find(|b| b.id == id).map(|book| {
            data.apply_to(book);
            book.clone()
        }))
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let id = Self::parse_id(id)?;
        let mut books = self.books.write().await;
        let before = books.len();
        books.retain(|b| b.id != id);
        Ok(books.len() < before)
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.books.read().await.len() as u64)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
