use time::{Duration, OffsetDateTime};

use super::models::{Book, BookFields};

/// Ordered in-memory collection of books.
///
/// Lookups are linear scans; the store is not shared by itself, callers wrap
/// it in a lock (see [`super::routes::BooksState`]).
#[derive(Debug, Default)]
pub struct BookStore {
    books: Vec<Book>,
}

impl BookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fully built record.
    pub fn insert(&mut self, book: Book) {
        self.books.push(book);
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    /// Position of the record with `id`; only valid until the next mutation.
    pub fn index_by_id(&self, id: &str) -> Option<usize> {
        self.books.iter().position(|book| book.id == id)
    }

    /// Replace every user field of the record at `position`, keeping `id` and
    /// `insertedAt`. `updatedAt` always moves strictly forward.
    pub fn update_at(
        &mut self,
        position: usize,
        fields: BookFields,
        now: OffsetDateTime,
    ) -> Option<&Book> {
        let book = self.books.get_mut(position)?;

        book.finished = fields.is_finished();
        book.fields = fields;
        book.updated_at = if now > book.updated_at {
            now
        } else {
            book.updated_at + Duration::NANOSECOND
        };

        Some(&*book)
    }

    /// Remove the record at `position`, preserving the order of the rest.
    pub fn remove_at(&mut self, position: usize) -> Option<Book> {
        (position < self.books.len()).then(|| self.books.remove(position))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Book> {
        self.books.iter()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
