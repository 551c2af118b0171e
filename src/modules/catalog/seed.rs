//! Reference data loaded when the catalog starts.

use time::OffsetDateTime;

use super::models::{Author, Book, Category};

pub fn authors() -> Vec<Author> {
    ["John", "Jane", "Joe"]
        .into_iter()
        .zip(1..)
        .map(|(name, id)| Author {
            id,
            name: name.to_string(),
        })
        .collect()
}

pub fn categories() -> Vec<Category> {
    ["Fiction", "Non-Fiction", "Thriller"]
        .into_iter()
        .zip(1..)
        .map(|(name, id)| Category {
            id,
            name: name.to_string(),
        })
        .collect()
}

/// Five sample books cycling through the seeded authors and categories.
pub fn books(
    authors: &[Author],
    categories: &[Category],
    published_at: OffsetDateTime,
) -> Vec<Book> {
    if authors.is_empty() || categories.is_empty() {
        return Vec::new();
    }

    (1..=5)
        .map(|id: i64| {
            let slot = (id as usize - 1) % authors.len().min(categories.len());
            Book {
                id,
                title: format!("Book {id}"),
                author: authors[slot].clone(),
                category: categories[slot].clone(),
                description: format!("Description {id}"),
                published_at,
            }
        })
        .collect()
}
