use serde::{Deserialize, Serialize};
use time::{macros::datetime, OffsetDateTime};

/// Identifier of a book within the catalog.
pub type BookId = i64;

/// Author reference data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

/// Category reference data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

/// A stored book. `author` and `category` are copies taken when the book was
/// written, not links into the reference collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: Author,
    pub category: Category,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub published_at: OffsetDateTime,
}

impl Book {
    /// Materialize `input` under `id`.
    pub fn from_input(id: BookId, input: BookInput) -> Self {
        let BookInput {
            title,
            author,
            category,
            description,
            published_at,
        } = input;

        Self {
            id,
            title,
            author,
            category,
            description,
            published_at,
        }
    }
}

/// Body of create and update requests.
///
/// Absent fields take their zero value and a client-supplied `id` is ignored,
/// so an update always replaces the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: Author,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub description: String,
    #[serde(with = "time::serde::rfc3339", default = "unset_published_at")]
    pub published_at: OffsetDateTime,
}

impl Default for BookInput {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: Author::default(),
            category: Category::default(),
            description: String::new(),
            published_at: unset_published_at(),
        }
    }
}

/// Timestamp stored when a payload carries no `published_at`.
pub fn unset_published_at() -> OffsetDateTime {
    datetime!(0001-01-01 00:00:00 UTC)
}
