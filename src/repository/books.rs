//! MongoDB-backed book store

use async_trait::async_trait;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument},
    Client, Collection, Database,
};
use serde::{Deserialize, Serialize};
use tokio_stream::StreamExt;

use super::BookStore;
use crate::{
    config::DatabaseConfig,
    error::AppResult,
    models::{
        book::{Book, BookUpdate, NewBook, PatchBook},
        query::BookQuery,
    },
};

/// Stored shape of a book document
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BookDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    title: String,
    author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    genre: Option<String>,
    #[serde(default)]
    read: bool,
}

impl From<BookDocument> for Book {
    fn from(doc: BookDocument) -> Self {
        Book {
            id: doc.id.to_hex(),
            title: doc.title,
            author: doc.author,
            genre: doc.genre,
            read: doc.read,
        }
    }
}

fn by_id(id: &str) -> AppResult<Document> {
    let oid = ObjectId::parse_str(id)?;
    Ok(doc! { "_id": oid })
}

fn replace_update(data: &BookUpdate) -> Document {
    let mut set = doc! { "title": data.title.as_str(), "author": data.author.as_str() };
    let mut update = Document::new();
    match data.genre {
        Some(ref genre) => {
            set.insert("genre", genre.as_str());
        }
        None => {
            update.insert("$unset", doc! { "genre": "" });
        }
    }
    update.insert("$set", set);
    update
}

fn patch_update(data: &PatchBook) -> Document {
    let mut set = Document::new();
    let mut unset = Document::new();

    if let Some(ref title) = data.title {
        set.insert("title", title.as_str());
    }
    if let Some(ref author) = data.author {
        set.insert("author", author.as_str());
    }
    match data.genre {
        Some(Some(ref genre)) => {
            set.insert("genre", genre.as_str());
        }
        Some(None) => {
            unset.insert("genre", "");
        }
        None => {}
    }
    if let Some(read) = data.read {
        set.insert("read", read);
    }

    let mut update = Document::new();
    if !set.is_empty() {
        update.insert("$set", set);
    }
    if !unset.is_empty() {
        update.insert("$unset", unset);
    }
    update
}

#[derive(Clone)]
pub struct MongoBookStore {
    database: Database,
    collection: Collection<BookDocument>,
}

impl MongoBookStore {
    pub fn new(database: Database, collection: &str) -> Self {
        Self {
            collection: database.collection(collection),
            database,
        }
    }

    /// Connect to the server named in the configuration
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let client = Client::with_uri_str(&config.url).await?;
        let database = client.database(&config.name);
        tracing::info!(
            "Using MongoDB database '{}' collection '{}'",
            config.name,
            config.collection
        );
        Ok(Self::new(database, &config.collection))
    }

    fn updated_options() -> FindOneAndUpdateOptions {
        FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build()
    }
}

#[async_trait]
impl BookStore for MongoBookStore {
    async fn find(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        let options = FindOptions::builder()
            .sort(doc! { "_id": 1 })
            .skip(query.skip)
            .limit(query.limit as i64)
            .build();

        let cursor = self
            .collection
            .find(query.filter.to_document(), options)
            .await?;
        let docs = cursor
            .collect::<Result<Vec<BookDocument>, mongodb::error::Error>>()
            .await?;

        Ok(docs.into_iter().map(Book::from).collect())
    }

    async fn get(&self, id: &str) -> AppResult<Option<Book>> {
        let found = self.collection.find_one(by_id(id)?, None).await?;
        Ok(found.map(Book::from))
    }

    async fn insert(&self, book: &NewBook) -> AppResult<Book> {
        let doc = BookDocument {
            id: ObjectId::new(),
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre.clone(),
            read: book.read,
        };
        self.collection.insert_one(&doc, None).await?;
        Ok(doc.into())
    }

    async fn replace(&self, id: &str, data: &BookUpdate) -> AppResult<Option<Book>> {
        let updated = self
            .collection
            .find_one_and_update(by_id(id)?, replace_update(data), Self::updated_options())
            .await?;
        Ok(updated.map(Book::from))
    }

    async fn patch(&self, id: &str, data: &PatchBook) -> AppResult<Option<Book>> {
        let updated = self
            .collection
            .find_one_and_update(by_id(id)?, patch_update(data), Self::updated_options())
            .await?;
        Ok(updated.map(Book::from))
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let result = self.collection.delete_one(by_id(id)?, None).await?;
        Ok(result.deleted_count > 0)
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.collection.count_documents(None, None).await?)
    }

    async fn ping(&self) -> AppResult<()> {
        self.database.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }
}
