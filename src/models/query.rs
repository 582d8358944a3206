//! List query parameters and their translation into a store query.
//!
//! Parameters arrive as raw strings. Filter fields are validated with every
//! failure collected; pagination values fall back to defaults when absent or
//! unparseable and are clamped so the resulting window is always valid.

use std::borrow::Cow;

use mongodb::bson::{doc, Document, Regex};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::{Validate, ValidationError, ValidationErrors};

use super::book::Book;
use crate::{
    config::PaginationConfig,
    error::{AppError, AppResult},
};

const FILTER_MIN_LEN: usize = 2;
const FILTER_MAX_LEN: usize = 50;

/// Largest offset the MongoDB driver can send (`skip` is an int64 on the wire)
const MAX_SKIP: u64 = i64::MAX as u64;

/// Raw query string of `GET /books`
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListBooksParams {
    /// Exact genre match (2-50 characters)
    #[validate(custom(function = "validate_genre"))]
    pub genre: Option<String>,
    /// Exact author match (2-50 characters)
    #[validate(custom(function = "validate_author"))]
    pub author: Option<String>,
    /// Case-insensitive substring of the title
    pub title: Option<String>,
    /// Page size (default 10)
    pub limit: Option<String>,
    /// 1-based page number (default 1)
    pub page: Option<String>,
}

fn check_length(value: &str, field: &'static str) -> Result<(), ValidationError> {
    let len = value.chars().count();
    let message = if len < FILTER_MIN_LEN {
        format!("{} must have at least {} characters.", field, FILTER_MIN_LEN)
    } else if len > FILTER_MAX_LEN {
        format!("{} must not exceed {} characters.", field, FILTER_MAX_LEN)
    } else {
        return Ok(());
    };
    let mut err = ValidationError::new("length");
    err.message = Some(Cow::Owned(message));
    Err(err)
}

fn validate_genre(genre: &str) -> Result<(), ValidationError> {
    check_length(genre, "Genre")
}

fn validate_author(author: &str) -> Result<(), ValidationError> {
    check_length(author, "Author")
}

/// Flatten validator output into messages, ordered by field name
pub(crate) fn error_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match e.message {
                Some(ref msg) => msg.to_string(),
                None => format!("{} is invalid.", field),
            })
        })
        .collect()
}

/// Field-match conditions narrowing a list query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    pub genre: Option<String>,
    pub author: Option<String>,
    pub title: Option<String>,
}

impl BookFilter {
    /// MongoDB filter document. The title is escaped so it matches literally.
    pub fn to_document(&self) -> Document {
        let mut filter = Document::new();
        if let Some(ref genre) = self.genre {
            filter.insert("genre", genre.as_str());
        }
        if let Some(ref author) = self.author {
            filter.insert("author", author.as_str());
        }
        if let Some(ref title) = self.title {
            let pattern = Regex {
                pattern: regex::escape(title),
                options: "i".to_string(),
            };
            filter.insert("title", doc! { "$regex": pattern });
        }
        filter
    }

    pub fn matches(&self, book: &Book) -> bool {
        if let Some(ref genre) = self.genre {
            if book.genre.as_deref() != Some(genre.as_str()) {
                return false;
            }
        }
        if let Some(ref author) = self.author {
            if book.author != *author {
                return false;
            }
        }
        if let Some(ref title) = self.title {
            if !book.title.to_lowercase().contains(&title.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

/// Filter plus pagination window handed to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookQuery {
    pub filter: BookFilter,
    pub limit: u64,
    pub skip: u64,
}

impl ListBooksParams {
    /// Validate the parameters and build the store query
    pub fn into_query(self, pagination: &PaginationConfig) -> AppResult<BookQuery> {
        if let Err(errors) = self.validate() {
            return Err(AppError::Validation {
                message: "Validation failed!".to_string(),
                errors: error_messages(&errors),
            });
        }

        let limit = parse_limit(self.limit.as_deref(), pagination);
        let page = parse_page(self.page.as_deref());

        Ok(BookQuery {
            filter: BookFilter {
                genre: self.genre,
                author: self.author,
                title: self.title.filter(|t| !t.is_empty()),
            },
            limit,
            skip: (page - 1).saturating_mul(limit).min(MAX_SKIP),
        })
    }
}

fn parse_number(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
}

fn parse_limit(raw: Option<&str>, pagination: &PaginationConfig) -> u64 {
    let limit = match parse_number(raw) {
        None | Some(0) => pagination.default_limit,
        Some(n) if n < 0 => 1,
        Some(n) => (n as u64).min(pagination.max_limit),
    };
    limit.max(1)
}

fn parse_page(raw: Option<&str>) -> u64 {
    match parse_number(raw) {
        Some(n) if n > 1 => n as u64,
        _ => 1,
    }
}
