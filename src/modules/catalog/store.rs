//! In-memory catalog store.
//!
//! Authors and categories are fixed at construction. Books and the next-id
//! counter sit behind a single `RwLock`, so writers are serialized and readers
//! always clone out a consistent snapshot.

use bookshelf_kernel::settings::IdStrategy;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use super::error::CatalogError;
use super::models::{Author, Book, BookId, BookInput, Category};
use super::seed;

/// Parse a path segment into a book id.
pub fn parse_book_id(raw: &str) -> Result<BookId, CatalogError> {
    raw.parse::<BookId>().map_err(|_| CatalogError::invalid_id())
}

#[derive(Debug)]
struct Shelf {
    books: Vec<Book>,
    /// Next id under `IdStrategy::Monotonic`; never decreases.
    next_id: BookId,
}

impl Shelf {
    fn new(books: Vec<Book>) -> Self {
        let next_id = books.iter().map(|book| book.id).max().unwrap_or(0) + 1;
        Self { books, next_id }
    }

    fn assign_id(&mut self, strategy: IdStrategy) -> BookId {
        match strategy {
            IdStrategy::Count => self.books.len() as BookId + 1,
            IdStrategy::Monotonic => {
                let id = self.next_id;
                self.next_id += 1;
                id
            }
        }
    }

    fn position(&self, id: BookId) -> Option<usize> {
        self.books.iter().position(|book| book.id == id)
    }
}

/// Owner of the authors, categories and books collections.
#[derive(Debug)]
pub struct CatalogStore {
    authors: Vec<Author>,
    categories: Vec<Category>,
    shelf: RwLock<Shelf>,
    id_strategy: IdStrategy,
}

impl CatalogStore {
    pub fn new(
        authors: Vec<Author>,
        categories: Vec<Category>,
        books: Vec<Book>,
        id_strategy: IdStrategy,
    ) -> Self {
        Self {
            authors,
            categories,
            shelf: RwLock::new(Shelf::new(books)),
            id_strategy,
        }
    }

    /// Store holding the sample authors, categories and books 1..=5.
    pub fn seeded(id_strategy: IdStrategy) -> Self {
        let authors = seed::authors();
        let categories = seed::categories();
        let books = seed::books(&authors, &categories, OffsetDateTime::now_utc());
        Self::new(authors, categories, books, id_strategy)
    }

    /// Store with the reference data but no books.
    pub fn empty(id_strategy: IdStrategy) -> Self {
        Self::new(seed::authors(), seed::categories(), Vec::new(), id_strategy)
    }

    pub fn id_strategy(&self) -> IdStrategy {
        self.id_strategy
    }

    pub fn list_authors(&self) -> &[Author] {
        &self.authors
    }

    pub fn list_categories(&self) -> &[Category] {
        &self.categories
    }

    pub async fn list_books(&self) -> Vec<Book> {
        self.shelf.read().await.books.clone()
    }

    pub async fn book_count(&self) -> usize {
        self.shelf.read().await.books.len()
    }

    pub async fn get_book(&self, id: BookId) -> Result<Book, CatalogError> {
        let shelf = self.shelf.read().await;
        shelf
            .books
            .iter()
            .find(|book| book.id == id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }

    /// Append a new book and return it with its assigned id.
    pub async fn create_book(&self, input: BookInput) -> Book {
        let mut shelf = self.shelf.write().await;
        let id = shelf.assign_id(self.id_strategy);
        let book = Book::from_input(id, input);
        shelf.books.push(book.clone());

        tracing::debug!(book_id = id, strategy = ?self.id_strategy, "book created");
        book
    }

    /// Replace every field of book `id` except the id itself.
    pub async fn update_book(&self, id: BookId, input: BookInput) -> Result<Book, CatalogError> {
        let mut shelf = self.shelf.write().await;
        let index = shelf.position(id).ok_or(CatalogError::NotFound(id))?;

        let book = Book::from_input(id, input);
        shelf.books[index] = book.clone();

        tracing::debug!(book_id = id, "book updated");
        Ok(book)
    }

    /// Remove book `id`, keeping the remaining books in order.
    pub async fn delete_book(&self, id: BookId) -> Result<(), CatalogError> {
        let mut shelf = self.shelf.write().await;
        let index = shelf.position(id).ok_or(CatalogError::NotFound(id))?;
        shelf.books.remove(index);

        tracing::debug!(book_id = id, "book deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn input(title: &str) -> BookInput {
        BookInput {
            title: title.to_string(),
            ..BookInput::default()
        }
    }

    async fn ids(store: &CatalogStore) -> Vec<BookId> {
        store.list_books().await.iter().map(|b| b.id).collect()
    }

    #[test]
    fn parse_book_id_accepts_integers_only() {
        assert_eq!(parse_book_id("42"), Ok(42));
        assert_eq!(parse_book_id("-3"), Ok(-3));
        for raw in ["abc", "", "1.5", " 7", "99999999999999999999"] {
            assert_eq!(parse_book_id(raw), Err(CatalogError::invalid_id()), "{raw:?}");
        }
    }

    #[tokio::test]
    async fn seeded_store_lists_reference_data_in_order() {
        let store = CatalogStore::seeded(IdStrategy::Monotonic);

        let authors: Vec<&str> = store.list_authors().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(authors, ["John", "Jane", "Joe"]);

        let categories: Vec<&str> = store
            .list_categories()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(categories, ["Fiction", "Non-Fiction", "Thriller"]);

        assert_eq!(ids(&store).await, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn create_assigns_count_plus_one_and_is_readable() {
        for strategy in [IdStrategy::Monotonic, IdStrategy::Count] {
            let store = CatalogStore::seeded(strategy);
            let before = store.book_count().await as BookId;

            let created = store.create_book(input("Book 6")).await;
            assert_eq!(created.id, before + 1);
            assert_eq!(store.get_book(created.id).await, Ok(created.clone()));
            assert_eq!(store.book_count().await, 6);
        }
    }

    #[tokio::test]
    async fn create_stores_embedded_values_verbatim() {
        let store = CatalogStore::empty(IdStrategy::Monotonic);
        let payload = BookInput {
            author: Author {
                id: 404,
                name: "Nobody".to_string(),
            },
            ..input("Orphan")
        };

        let created = store.create_book(payload).await;
        assert_eq!(created.author.id, 404);
        assert_eq!(created.author.name, "Nobody");
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let store = CatalogStore::seeded(IdStrategy::Monotonic);

        store.delete_book(3).await.unwrap();
        assert_eq!(store.get_book(3).await, Err(CatalogError::NotFound(3)));
        assert_eq!(ids(&store).await, vec![1, 2, 4, 5]);
        assert_eq!(store.delete_book(3).await, Err(CatalogError::NotFound(3)));
    }

    #[tokio::test]
    async fn update_keeps_id_and_replaces_everything_else() {
        let store = CatalogStore::seeded(IdStrategy::Monotonic);

        let updated = store.update_book(2, input("Renamed")).await.unwrap();
        assert_eq!(updated.id, 2);
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.description, "");
        assert_eq!(updated.author, Author::default());

        assert_eq!(store.get_book(2).await, Ok(updated));
        assert_eq!(ids(&store).await, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn update_missing_book_is_not_found() {
        let store = CatalogStore::seeded(IdStrategy::Monotonic);
        assert_eq!(
            store.update_book(77, input("x")).await,
            Err(CatalogError::NotFound(77))
        );
    }

    #[tokio::test]
    async fn creates_and_deletes_preserve_survivor_order() {
        let store = CatalogStore::new(Vec::new(), Vec::new(), Vec::new(), IdStrategy::Monotonic);
        for n in 1..=6 {
            store.create_book(input(&format!("Book {n}"))).await;
        }
        store.delete_book(2).await.unwrap();
        store.delete_book(5).await.unwrap();

        let titles: Vec<String> = store.list_books().await.into_iter().map(|b| b.title).collect();
        assert_eq!(titles, ["Book 1", "Book 3", "Book 4", "Book 6"]);
    }

    #[tokio::test]
    async fn count_strategy_reuses_id_of_deleted_last_book() {
        let store = CatalogStore::seeded(IdStrategy::Count);

        store.delete_book(5).await.unwrap();
        let created = store.create_book(input("Again")).await;
        assert_eq!(created.id, 5);
    }

    #[tokio::test]
    async fn count_strategy_can_duplicate_a_live_id() {
        let store = CatalogStore::seeded(IdStrategy::Count);

        store.delete_book(3).await.unwrap();
        let created = store.create_book(input("Clash")).await;
        assert_eq!(created.id, 5);
        assert_eq!(ids(&store).await, vec![1, 2, 4, 5, 5]);

        // Lookups see the first match only.
        assert_eq!(store.get_book(5).await.unwrap().title, "Book 5");
    }

    #[tokio::test]
    async fn monotonic_strategy_never_reuses_ids() {
        let store = CatalogStore::seeded(IdStrategy::Monotonic);

        store.delete_book(3).await.unwrap();
        assert_eq!(store.create_book(input("Six")).await.id, 6);

        store.delete_book(6).await.unwrap();
        assert_eq!(store.create_book(input("Seven")).await.id, 7);
        assert_eq!(ids(&store).await, vec![1, 2, 4, 5, 7]);
    }

    #[tokio::test]
    async fn concurrent_creates_get_distinct_ids() {
        let store = Arc::new(CatalogStore::empty(IdStrategy::Monotonic));

        let handles: Vec<_> = (0..32)
            .map(|n| {
                let store = store.clone();
                tokio::spawn(async move { store.create_book(input(&format!("t{n}"))).await.id })
            })
            .collect();

        let mut assigned = Vec::new();
        for handle in handles {
            assigned.push(handle.await.unwrap());
        }
        assigned.sort_unstable();

        assert_eq!(assigned, (1..=32).collect::<Vec<BookId>>());
        assert_eq!(store.book_count().await, 32);
    }
}
