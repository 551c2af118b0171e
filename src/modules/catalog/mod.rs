pub mod error;
pub mod models;
pub mod routes;
pub mod seed;
pub mod store;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use bookshelf_kernel::{settings::CatalogSettings, InitCtx, Module};
use serde_json::json;

use store::CatalogStore;

/// Catalog module: authors, categories and book CRUD served from memory
pub struct CatalogModule {
    store: Arc<CatalogStore>,
}

impl CatalogModule {
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }

    /// Build the module and its store from settings
    pub fn from_settings(settings: &CatalogSettings) -> Self {
        let store = if settings.seed {
            CatalogStore::seeded(settings.id_strategy)
        } else {
            CatalogStore::empty(settings.id_strategy)
        };
        Self::new(Arc::new(store))
    }

    pub fn store(&self) -> &Arc<CatalogStore> {
        &self.store
    }
}

#[async_trait]
impl Module for CatalogModule {
    fn name(&self) -> &'static str {
        "catalog"
    }

    fn base_path(&self) -> String {
        "/".to_string()
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let books = self.store.book_count().await;
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            id_strategy = ?self.store.id_strategy(),
            books,
            "catalog module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.store.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi_fragment())
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "catalog module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        let books = self.store.book_count().await;
        tracing::info!(module = self.name(), books, "catalog module stopped");
        Ok(())
    }
}

fn json_response(description: &str, schema: serde_json::Value) -> serde_json::Value {
    json!({
        "description": description,
        "content": { "application/json": { "schema": schema } }
    })
}

fn error_response(description: &str) -> serde_json::Value {
    json_response(
        description,
        json!({ "$ref": "#/components/schemas/ErrorResponse" }),
    )
}

fn schema_ref(name: &str) -> serde_json::Value {
    json!({ "$ref": format!("#/components/schemas/{name}") })
}

fn array_of(name: &str) -> serde_json::Value {
    json!({ "type": "array", "items": schema_ref(name) })
}

fn openapi_fragment() -> serde_json::Value {
    let id_param = json!([{
        "name": "id",
        "in": "path",
        "required": true,
        "schema": { "type": "integer", "format": "int64" }
    }]);
    let book_body = json!({
        "required": true,
        "content": { "application/json": { "schema": schema_ref("BookInput") } }
    });
    let reference = json!({
        "type": "object",
        "properties": {
            "id": { "type": "integer", "format": "int64" },
            "name": { "type": "string" }
        },
        "required": ["id", "name"]
    });

    json!({
        "paths": {
            "/": {
                "get": {
                    "summary": "Greeting",
                    "tags": ["Catalog"],
                    "responses": {
                        "200": {
                            "description": "Greeting text",
                            "content": { "text/plain": { "schema": { "type": "string" } } }
                        }
                    }
                }
            },
            "/authors": {
                "get": {
                    "summary": "List authors",
                    "tags": ["Catalog"],
                    "responses": { "200": json_response("All authors", array_of("Author")) }
                }
            },
            "/categories": {
                "get": {
                    "summary": "List categories",
                    "tags": ["Catalog"],
                    "responses": { "200": json_response("All categories", array_of("Category")) }
                }
            },
            "/books": {
                "get": {
                    "summary": "List books",
                    "tags": ["Books"],
                    "responses": { "200": json_response("Books in insertion order", array_of("Book")) }
                },
                "post": {
                    "summary": "Create a book",
                    "tags": ["Books"],
                    "requestBody": book_body.clone(),
                    "responses": {
                        "200": json_response("Created book", schema_ref("Book")),
                        "400": error_response("Malformed request body")
                    }
                }
            },
            "/books/{id}": {
                "get": {
                    "summary": "Get a book",
                    "tags": ["Books"],
                    "parameters": id_param.clone(),
                    "responses": {
                        "200": json_response("Book", schema_ref("Book")),
                        "400": error_response("Invalid book ID"),
                        "404": error_response("Book not found")
                    }
                },
                "put": {
                    "summary": "Replace a book",
                    "tags": ["Books"],
                    "parameters": id_param.clone(),
                    "requestBody": book_body,
                    "responses": {
                        "200": json_response("Updated book", schema_ref("Book")),
                        "400": error_response("Invalid book ID or malformed body"),
                        "404": error_response("Book not found")
                    }
                },
                "delete": {
                    "summary": "Delete a book",
                    "tags": ["Books"],
                    "parameters": id_param,
                    "responses": {
                        "200": json_response("Deletion confirmed", schema_ref("MessageResponse")),
                        "400": error_response("Invalid book ID"),
                        "404": json_response("Book not found", schema_ref("MessageResponse"))
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Author": reference.clone(),
                "Category": reference,
                "Book": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "integer", "format": "int64" },
                        "title": { "type": "string" },
                        "author": schema_ref("Author"),
                        "category": schema_ref("Category"),
                        "description": { "type": "string" },
                        "published_at": { "type": "string", "format": "date-time" }
                    },
                    "required": ["id", "title", "author", "category", "description", "published_at"]
                },
                "BookInput": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string" },
                        "author": schema_ref("Author"),
                        "category": schema_ref("Category"),
                        "description": { "type": "string" },
                        "published_at": { "type": "string", "format": "date-time" }
                    }
                },
                "MessageResponse": {
                    "type": "object",
                    "properties": { "message": { "type": "string" } },
                    "required": ["message"]
                }
            }
        }
    })
}

/// Create a new instance of the catalog module
pub fn create_module(settings: &CatalogSettings) -> Arc<dyn Module> {
    Arc::new(CatalogModule::from_settings(settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookshelf_kernel::settings::IdStrategy;

    #[tokio::test]
    async fn from_settings_honours_seed_flag() {
        let seeded = CatalogModule::from_settings(&CatalogSettings::default());
        assert_eq!(seeded.store().book_count().await, 5);

        let empty = CatalogModule::from_settings(&CatalogSettings {
            id_strategy: IdStrategy::Count,
            seed: false,
        });
        assert_eq!(empty.store().book_count().await, 0);
        assert_eq!(empty.store().list_authors().len(), 3);
        assert_eq!(empty.store().id_strategy(), IdStrategy::Count);
    }

    #[tokio::test]
    async fn lifecycle_runs_on_a_spawned_task() {
        let module = Arc::new(CatalogModule::from_settings(&CatalogSettings::default()));

        // Spawning requires the lifecycle futures to be Send
        let handle = tokio::spawn(async move {
            let settings = bookshelf_kernel::settings::Settings::default();
            let ctx = InitCtx {
                settings: &settings,
            };
            module.init(&ctx).await?;
            module.start(&ctx).await?;
            module.stop().await
        });

        handle.await.unwrap().unwrap();
    }

    #[test]
    fn openapi_fragment_covers_every_route() {
        let fragment = openapi_fragment();
        let paths = fragment["paths"].as_object().unwrap();
        for path in ["/", "/authors", "/categories", "/books", "/books/{id}"] {
            assert!(paths.contains_key(path), "missing {path}");
        }
        for method in ["get", "put", "delete"] {
            assert!(fragment["paths"]["/books/{id}"][method].is_object());
        }
        assert!(fragment["components"]["schemas"]["Book"].is_object());
    }
}
