use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use bookshelf_http::{ApiResponse, AppError, AppResult};
use time::OffsetDateTime;

use super::BooksState;
use crate::modules::books::models::{
    Book, BookDetail, BookList, BookPayload, BookQuery, BookViolation, CreatedBook,
};

const ADD_CONTEXT: &str = "cannot add book";
const UPDATE_CONTEXT: &str = "cannot update book";

fn rejected(context: &str, violation: BookViolation) -> AppError {
    AppError::validation(format!("{}: {}", context, violation.describe()))
}

/// `POST /books`
pub async fn create_book(
    State(state): State<BooksState>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> AppResult<ApiResponse<CreatedBook>> {
    let Json(payload) =
        payload.map_err(|rejection| AppError::invalid_payload(ADD_CONTEXT, rejection))?;
    let fields = payload
        .validate()
        .map_err(|violation| rejected(ADD_CONTEXT, violation))?;

    let book = Book::new(state.ids.generate(), fields, OffsetDateTime::now_utc());
    let book_id = book.id.clone();
    state.store.write().await.insert(book);

    tracing::info!(book_id = %book_id, "book added");

    Ok(ApiResponse::data(CreatedBook { book_id })
        .with_message("book added")
        .with_code(StatusCode::CREATED))
}

/// `GET /books?name=&reading=&finished=`; never fails, an unreadable query
/// string just means no filters.
pub async fn list_books(
    State(state): State<BooksState>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApiResponse<BookList> {
    let query = match pairs {
        Ok(Query(pairs)) => BookQuery::from_pairs(pairs),
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "ignoring unreadable query string");
            BookQuery::default()
        }
    };

    let store = state.store.read().await;
    let books: Vec<_> = store
        .iter()
        .filter(|book| query.matches(book))
        .map(Book::summary)
        .collect();

    tracing::debug!(total = store.len(), matched = books.len(), "books listed");

    ApiResponse::data(BookList { books })
}

/// `GET /books/{bookId}`
pub async fn get_book(
    State(state): State<BooksState>,
    Path(book_id): Path<String>,
) -> AppResult<ApiResponse<BookDetail>> {
    let store = state.store.read().await;
    let book = store
        .find_by_id(&book_id)
        .cloned()
        .ok_or_else(|| AppError::not_found("book not found"))?;

    Ok(ApiResponse::data(BookDetail { book }))
}

/// `PUT /books/{bookId}`; an unknown id wins over an invalid body.
pub async fn update_book(
    State(state): State<BooksState>,
    Path(book_id): Path<String>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> AppResult<ApiResponse> {
    let mut store = state.store.write().await;
    let position = store
        .index_by_id(&book_id)
        .ok_or_else(|| AppError::not_found("cannot update book: id not found"))?;

    let Json(payload) =
        payload.map_err(|rejection| AppError::invalid_payload(UPDATE_CONTEXT, rejection))?;
    let fields = payload
        .validate()
        .map_err(|violation| rejected(UPDATE_CONTEXT, violation))?;

    store
        .update_at(position, fields, OffsetDateTime::now_utc())
        .ok_or_else(|| AppError::not_found("cannot update book: id not found"))?;

    tracing::info!(book_id = %book_id, "book updated");

    Ok(ApiResponse::message("book updated"))
}

/// `DELETE /books/{bookId}`
pub async fn delete_book(
    State(state): State<BooksState>,
    Path(book_id): Path<String>,
) -> AppResult<ApiResponse> {
    let mut store = state.store.write().await;
    store
        .index_by_id(&book_id)
        .and_then(|position| store.remove_at(position))
        .ok_or_else(|| AppError::not_found("book failed to delete: id not found"))?;

    tracing::info!(book_id = %book_id, remaining = store.len(), "book deleted");

    Ok(ApiResponse::message("book deleted"))
}
