use serde::{Deserialize, Serialize, Serializer};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

/// A book as held by the store and returned by `GET /books/{bookId}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Generated at creation, never changes
    pub id: String,
    #[serde(flatten)]
    pub fields: BookFields,
    /// `readPage == pageCount`, recomputed on every write
    pub finished: bool,
    #[serde(serialize_with = "rfc3339")]
    pub inserted_at: OffsetDateTime,
    #[serde(serialize_with = "rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Book {
    /// Build a fresh record; both timestamps are set to `now`.
    pub fn new(id: String, fields: BookFields, now: OffsetDateTime) -> Self {
        Self {
            id,
            finished: fields.is_finished(),
            fields,
            inserted_at: now,
            updated_at: now,
        }
    }

    /// Projection used by the list endpoint.
    pub fn summary(&self) -> BookSummary {
        BookSummary {
            id: self.id.clone(),
            name: self.fields.name.clone(),
            publisher: self.fields.publisher.clone(),
        }
    }
}

/// The user-replaceable part of a book, already validated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookFields {
    pub name: String,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    pub page_count: u32,
    pub read_page: u32,
    pub reading: bool,
}

impl BookFields {
    pub fn is_finished(&self) -> bool {
        self.read_page == self.page_count
    }
}

/// Request body accepted by `POST /books` and `PUT /books/{bookId}`.
///
/// Only `name` is required. Page counts default to zero and must be
/// non-negative integers; `reading` defaults to `false`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    #[serde(default)]
    pub page_count: u32,
    #[serde(default)]
    pub read_page: u32,
    #[serde(default)]
    pub reading: bool,
}

/// Business rule a payload can break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookViolation {
    MissingName,
    ReadPageExceedsPageCount,
}

impl BookViolation {
    /// Message suffix; callers prefix it with the operation that failed.
    pub fn describe(&self) -> &'static str {
        match self {
            BookViolation::MissingName => "name is required",
            BookViolation::ReadPageExceedsPageCount => "readPage must not exceed pageCount",
        }
    }
}

impl BookPayload {
    /// Check the payload in order: name first, then the page bound.
    pub fn validate(self) -> Result<BookFields, BookViolation> {
        let name = match self.name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(BookViolation::MissingName),
        };

        if self.read_page > self.page_count {
            return Err(BookViolation::ReadPageExceedsPageCount);
        }

        Ok(BookFields {
            name,
            year: self.year,
            author: self.author,
            summary: self.summary,
            publisher: self.publisher,
            page_count: self.page_count,
            read_page: self.read_page,
            reading: self.reading,
        })
    }
}

/// List item: only `id`, `name` and `publisher` are exposed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    pub publisher: Option<String>,
}

/// Query string of `GET /books`. Empty values are ignored.
#[derive(Debug, Clone, Default)]
pub struct BookQuery {
    pub name: Option<String>,
    pub reading: Option<String>,
    pub finished: Option<String>,
}

impl BookQuery {
    /// Build filters from raw query pairs. For a repeated key the first
    /// non-empty value wins; unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            if value.is_empty() {
                continue;
            }
            let slot = match key.as_str() {
                "name" => &mut query.name,
                "reading" => &mut query.reading,
                "finished" => &mut query.finished,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }

    /// Apply the filters conjunctively, in `name`, `reading`, `finished` order.
    pub fn matches(&self, book: &Book) -> bool {
        if let Some(name) = non_empty(&self.name) {
            if !book
                .fields
                .name
                .to_lowercase()
                .contains(&name.to_lowercase())
            {
                return false;
            }
        }

        if let Some(reading) = non_empty(&self.reading) {
            if book.fields.reading != (reading == "1") {
                return false;
            }
        }

        if let Some(finished) = non_empty(&self.finished) {
            if book.finished != (finished == "1") {
                return false;
            }
        }

        true
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBook {
    pub book_id: String,
}

#[derive(Debug, Serialize)]
pub struct BookList {
    pub books: Vec<BookSummary>,
}

#[derive(Debug, Serialize)]
pub struct BookDetail {
    pub book: Book,
}

fn rfc3339<S: Serializer>(value: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    let formatted = value.format(&Rfc3339).map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&formatted)
}
