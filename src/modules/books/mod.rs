pub mod id;
pub mod models;
pub mod routes;
pub mod store;

use async_trait::async_trait;
use axum::Router;
use bookshelf_kernel::{InitCtx, Module};
use serde_json::json;

use routes::BooksState;

const REJECTED_PAYLOAD: &str = "Missing name, readPage above pageCount, or malformed body";

/// Books module: owns the in-memory store and exposes the `/books` resource
pub struct BooksModule {
    state: BooksState,
}

impl BooksModule {
    pub fn new() -> Self {
        Self::with_state(BooksState::default())
    }

    pub fn with_state(state: BooksState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &BooksState {
        &self.state
    }
}

impl Default for BooksModule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.state.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let envelope = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/Envelope" }
                    }
                }
            })
        };
        let book_id = json!({
            "name": "bookId",
            "in": "path",
            "required": true,
            "schema": { "type": "string" }
        });
        let payload_body = json!({
            "required": true,
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/BookPayload" }
                }
            }
        });

        Some(json!({
            "paths": {
                "/books": {
                    "post": {
                        "summary": "Add a book",
                        "tags": ["Books"],
                        "requestBody": payload_body,
                        "responses": {
                            "201": envelope("Book added; data.bookId holds the new id"),
                            "400": envelope(REJECTED_PAYLOAD)
                        }
                    },
                    "get": {
                        "summary": "List books",
                        "tags": ["Books"],
                        "parameters": [
                            {
                                "name": "name",
                                "in": "query",
                                "required": false,
                                "description": "Case-insensitive substring of the name",
                                "schema": { "type": "string" }
                            },
                            {
                                "name": "reading",
                                "in": "query",
                                "required": false,
                                "description": "1 for books being read, anything else for the rest",
                                "schema": { "type": "string" }
                            },
                            {
                                "name": "finished",
                                "in": "query",
                                "required": false,
                                "description": "1 for finished books, anything else for the rest",
                                "schema": { "type": "string" }
                            }
                        ],
                        "responses": {
                            "200": envelope("data.books lists id, name and publisher")
                        }
                    }
                },
                "/books/{bookId}": {
                    "get": {
                        "summary": "Get a book",
                        "tags": ["Books"],
                        "parameters": [book_id.clone()],
                        "responses": {
                            "200": envelope("data.book holds the full record"),
                            "404": envelope("Book not found")
                        }
                    },
                    "put": {
                        "summary": "Replace a book's fields",
                        "tags": ["Books"],
                        "parameters": [book_id.clone()],
                        "requestBody": payload_body,
                        "responses": {
                            "200": envelope("Book updated"),
                            "400": envelope(REJECTED_PAYLOAD),
                            "404": envelope("Id not found")
                        }
                    },
                    "delete": {
                        "summary": "Delete a book",
                        "tags": ["Books"],
                        "parameters": [book_id],
                        "responses": {
                            "200": envelope("Book deleted"),
                            "404": envelope("Id not found")
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "BookPayload": {
                        "type": "object",
                        "properties": {
                            "name": { "type": "string" },
                            "year": { "type": "integer" },
                            "author": { "type": "string" },
                            "summary": { "type": "string" },
                            "publisher": { "type": "string" },
                            "pageCount": { "type": "integer", "minimum": 0 },
                            "readPage": { "type": "integer", "minimum": 0 },
                            "reading": { "type": "boolean" }
                        },
                        "required": ["name"]
                    },
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "string" },
                            "name": { "type": "string" },
                            "year": { "type": ["integer", "null"] },
                            "author": { "type": ["string", "null"] },
                            "summary": { "type": ["string", "null"] },
                            "publisher": { "type": ["string", "null"] },
                            "pageCount": { "type": "integer" },
                            "readPage": { "type": "integer" },
                            "finished": { "type": "boolean" },
                            "reading": { "type": "boolean" },
                            "insertedAt": { "type": "string", "format": "date-time" },
                            "updatedAt": { "type": "string", "format": "date-time" }
                        },
                        "required": [
                            "id",
                            "name",
                            "pageCount",
                            "readPage",
                            "finished",
                            "reading",
                            "insertedAt",
                            "updatedAt"
                        ]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        let discarded = self.state.store.read().await.len();
        tracing::info!(module = self.name(), discarded, "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module with an empty store
pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BooksModule::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookshelf_kernel::settings::Settings;
    use id::IdGenerator;
    use models::{Book, BookFields};
    use time::OffsetDateTime;

    #[test]
    fn book_schema_marks_optional_fields_nullable() {
        let spec = BooksModule::new().openapi().unwrap();
        let properties = &spec["components"]["schemas"]["Book"]["properties"];

        assert_eq!(properties["year"]["type"], json!(["integer", "null"]));
        for field in ["author", "summary", "publisher"] {
            assert_eq!(properties[field]["type"], json!(["string", "null"]));
        }
        assert_eq!(properties["name"]["type"], "string");
    }

    #[tokio::test]
    async fn lifecycle_runs_against_shared_store() {
        let module = BooksModule::new();
        let settings = Settings::default();
        let ctx = InitCtx {
            settings: &settings,
        };

        module.init(&ctx).await.unwrap();
        module.start(&ctx).await.unwrap();

        let fields = BookFields {
            name: "Dicoding".to_string(),
            year: None,
            author: None,
            summary: None,
            publisher: None,
            page_count: 1,
            read_page: 0,
            reading: false,
        };
        let id = module.state().ids.generate();
        module
            .state()
            .store
            .write()
            .await
            .insert(Book::new(id, fields, OffsetDateTime::now_utc()));

        module.stop().await.unwrap();
        assert_eq!(module.state().store.read().await.len(), 1);
    }
}
