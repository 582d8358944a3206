//! Book model and request payloads

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Book record as exposed by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    /// Store-assigned identifier (24 hex characters)
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default)]
    pub read: bool,
}

/// Validated fields of a book about to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    pub read: bool,
}

/// Create book request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(
        required(message = "Title is required."),
        length(min = 1, message = "Title must not be empty.")
    )]
    pub title: Option<String>,
    #[validate(
        required(message = "Author is required."),
        length(min = 1, message = "Author must not be empty.")
    )]
    pub author: Option<String>,
    pub genre: Option<String>,
    /// Defaults to `false`
    pub read: Option<bool>,
}

impl CreateBook {
    /// Consume a request that already passed validation
    pub(crate) fn into_new_book(self) -> Option<NewBook> {
        Some(NewBook {
            title: self.title?,
            author: self.author?,
            genre: self.genre,
            read: self.read.unwrap_or(false),
        })
    }
}

/// Full update request. Absent `genre` clears the stored value; `read` is left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct ReplaceBook {
    #[validate(
        required(message = "Title is required."),
        length(min = 1, message = "Title must not be empty.")
    )]
    pub title: Option<String>,
    #[validate(
        required(message = "Author is required."),
        length(min = 1, message = "Author must not be empty.")
    )]
    pub author: Option<String>,
    pub genre: Option<String>,
}

impl ReplaceBook {
    /// Consume a request that already passed validation
    pub(crate) fn into_update(self) -> Option<BookUpdate> {
        Some(BookUpdate {
            title: self.title?,
            author: self.author?,
            genre: self.genre,
        })
    }
}

/// Validated fields written by a full update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookUpdate {
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
}

/// Partial update request. Only fields present in the body are written;
/// `"genre": null` removes the genre.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct PatchBook {
    #[validate(length(min = 1, message = "Title must not be empty."))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Author must not be empty."))]
    pub author: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub genre: Option<Option<String>>,
    pub read: Option<bool>,
}

impl PatchBook {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.genre.is_none() && self.read.is_none()
    }

    /// Apply the supplied fields to an in-memory record
    pub fn apply_to(&self, book: &mut Book) {
        if let Some(ref title) = self.title {
            book.title = title.clone();
        }
        if let Some(ref author) = self.author {
            book.author = author.clone();
        }
        if let Some(ref genre) = self.genre {
            book.genre = genre.clone();
        }
        if let Some(read) = self.read {
            book.read = read;
        }
    }
}

/// Hypermedia link describing a follow-up request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Link {
    pub rel: String,
    pub href: String,
    pub method: String,
}

impl Link {
    pub fn new(rel: &str, href: impl Into<String>, method: &str) -> Self {
        Self {
            rel: rel.to_string(),
            href: href.into(),
            method: method.to_string(),
        }
    }
}

/// Book with its hypermedia links, as returned by the list endpoint
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookResource {
    #[serde(flatten)]
    pub book: Book,
    pub links: Vec<Link>,
}
