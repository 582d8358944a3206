//! Hypermedia shaping of book payloads

use serde::Serialize;
use utoipa::ToSchema;

use super::API_PREFIX;
use crate::models::book::{Book, BookResource, Link};

/// Response of `GET /books`
#[derive(Debug, Serialize, ToSchema)]
pub struct BookListResponse {
    /// Number of books in `data`
    pub count: usize,
    pub data: Vec<BookResource>,
    /// Collection-level actions
    pub links: Vec<Link>,
}

pub fn collection_url(base: &str) -> String {
    format!("{}{}/books", base, API_PREFIX)
}

pub fn book_url(base: &str, id: &str) -> String {
    format!("{}/{}", collection_url(base), id)
}

/// `self`, `update` and `delete` affordances for one book
pub fn book_links(base: &str, id: &str) -> Vec<Link> {
    let href = book_url(base, id);
    vec![
        Link::new("self", href.clone(), "GET"),
        Link::new("update", href.clone(), "PUT"),
        Link::new("delete", href, "DELETE"),
    ]
}

pub fn collection_links(base: &str) -> Vec<Link> {
    vec![Link::new("create", collection_url(base), "POST")]
}

/// Attach links to every book, preserving store order
pub fn shape_list(books: Vec<Book>, base: &str) -> BookListResponse {
    let data: Vec<BookResource> = books
        .into_iter()
        .map(|book| BookResource {
            links: book_links(base, &book.id),
            book,
        })
        .collect();

    BookListResponse {
        count: data.len(),
        data,
        links: collection_links(base),
    }
}
