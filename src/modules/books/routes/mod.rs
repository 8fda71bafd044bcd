//! HTTP surface of the books module.

mod handlers;

use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::sync::RwLock;

use super::{
    id::{IdGenerator, UuidV7Generator},
    store::BookStore,
};

pub use handlers::{create_book, delete_book, get_book, list_books, update_book};

/// Shared state handed to every books handler.
///
/// All store access goes through the lock; handlers that look a record up and
/// then mutate it hold the write guard for the whole request.
#[derive(Clone)]
pub struct BooksState {
    pub store: Arc<RwLock<BookStore>>,
    pub ids: Arc<dyn IdGenerator>,
}

impl BooksState {
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            store: Arc::new(RwLock::new(BookStore::new())),
            ids,
        }
    }
}

impl Default for BooksState {
    fn default() -> Self {
        Self::new(Arc::new(UuidV7Generator))
    }
}

/// Routes for the books resource.
pub fn router(state: BooksState) -> Router {
    tracing::debug!(target: "bookshelf::routes", "registering books routes");

    Router::new()
        .route("/books", get(list_books).post(create_book))
        .route(
            "/books/{book_id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .with_state(state)
}
