use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    routing::get,
    Json, Router,
};
use bookshelf_http::error::AppError;
use serde::Serialize;

use super::error::CatalogError;
use super::models::{Author, Book, BookId, BookInput, Category};
use super::store::{parse_book_id, CatalogStore};

pub const GREETING: &str = "Hello, World!";
pub const BOOK_DELETED: &str = "Book deleted successfully";

/// Body returned by a successful delete.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: &'static str,
}

/// Catalog routes, rooted at `/`.
pub fn router(store: Arc<CatalogStore>) -> Router {
    Router::new()
        .route("/", get(greeting))
        .route("/authors", get(list_authors))
        .route("/categories", get(list_categories))
        .route("/books", get(list_books).post(create_book))
        .route(
            "/books/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .with_state(store)
}

async fn greeting() -> &'static str {
    GREETING
}

async fn list_authors(State(store): State<Arc<CatalogStore>>) -> Json<Vec<Author>> {
    Json(store.list_authors().to_vec())
}

async fn list_categories(State(store): State<Arc<CatalogStore>>) -> Json<Vec<Category>> {
    Json(store.list_categories().to_vec())
}

async fn list_books(State(store): State<Arc<CatalogStore>>) -> Json<Vec<Book>> {
    Json(store.list_books().await)
}

async fn get_book(
    State(store): State<Arc<CatalogStore>>,
    raw_id: Result<Path<String>, PathRejection>,
) -> Result<Json<Book>, AppError> {
    let id = book_id(raw_id)?;
    Ok(Json(store.get_book(id).await?))
}

async fn create_book(
    State(store): State<Arc<CatalogStore>>,
    payload: Result<Json<BookInput>, JsonRejection>,
) -> Result<Json<Book>, AppError> {
    let input = book_input(payload)?;
    let book = store.create_book(input).await;
    tracing::info!(book_id = book.id, "book created");
    Ok(Json(book))
}

async fn update_book(
    State(store): State<Arc<CatalogStore>>,
    raw_id: Result<Path<String>, PathRejection>,
    payload: Result<Json<BookInput>, JsonRejection>,
) -> Result<Json<Book>, AppError> {
    // The id is validated before the body, so a bad id wins over a bad body.
    let id = book_id(raw_id)?;
    let input = book_input(payload)?;
    let book = store.update_book(id, input).await?;
    tracing::info!(book_id = id, "book updated");
    Ok(Json(book))
}

async fn delete_book(
    State(store): State<Arc<CatalogStore>>,
    raw_id: Result<Path<String>, PathRejection>,
) -> Result<Json<MessageBody>, AppError> {
    let id = book_id(raw_id)?;
    store
        .delete_book(id)
        .await
        .map_err(|err| AppError::from(err).keyed("message"))?;
    tracing::info!(book_id = id, "book deleted");
    Ok(Json(MessageBody {
        message: BOOK_DELETED,
    }))
}

fn book_id(raw_id: Result<Path<String>, PathRejection>) -> Result<BookId, CatalogError> {
    match raw_id {
        Ok(Path(raw)) => parse_book_id(&raw),
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "rejected book id");
            Err(CatalogError::invalid_id())
        }
    }
}

fn book_input(payload: Result<Json<BookInput>, JsonRejection>) -> Result<BookInput, CatalogError> {
    payload.map(|Json(input)| input).map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "rejected book payload");
        CatalogError::malformed_body()
    })
}
