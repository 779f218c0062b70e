//! Write-side tools: article creation and partial updates.

use async_trait::async_trait;
use devto_client::ForemClient;
use devto_core::{ArticleUpdate, NewArticle, Result};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

use crate::{parse_args, Tool};

#[derive(Debug, Deserialize)]
struct CreateArticleArgs {
    title: String,
    body_markdown: String,
    #[serde(default)]
    tags: String,
    #[serde(default)]
    published: bool,
}

#[derive(Debug, Clone)]
pub struct CreateArticleTool {
    client: Arc<ForemClient>,
}

impl CreateArticleTool {
    pub fn new(client: Arc<ForemClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for CreateArticleTool {
    fn name(&self) -> &str {
        "create_article"
    }

    fn description(&self) -> &str {
        "Create and publish a new article on Dev.to"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "title": {
                    "type": "string",
                    "description": "The title of the article"
                },
                "body_markdown": {
                    "type": "string",
                    "description": "The content of the article in markdown format"
                },
                "tags": {
                    "type": "string",
                    "description": "Comma-separated list of tags (e.g., \"python,tutorial,webdev\")",
                    "default": ""
                },
                "published": {
                    "type": "boolean",
                    "description": "Whether to publish immediately (true) or save as draft (false)",
                    "default": false
                }
            },
            "required": ["title", "body_markdown"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String> {
        let args: CreateArticleArgs = parse_args(self.name(), args)?;

        let draft = NewArticle {
            title: args.title,
            body_markdown: args.body_markdown,
            published: args.published,
            tags: args.tags,
        };

        let article = self.client.create_article(&draft).await?;
        info!(id = ?article.id, "article created");

        let id = article.id.map(|i| i.to_string()).unwrap_or_default();
        let url = article.url.unwrap_or_default();
        Ok(format!(
            "Article created successfully with ID: {id}\nURL: {url}"
        ))
    }
}

#[derive(Debug, Deserialize)]
struct UpdateArticleArgs {
    article_id: u64,
    title: Option<String>,
    body_markdown: Option<String>,
    tags: Option<String>,
    published: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct UpdateArticleTool {
    client: Arc<ForemClient>,
}

impl UpdateArticleTool {
    pub fn new(client: Arc<ForemClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for UpdateArticleTool {
    fn name(&self) -> &str {
        "update_article"
    }

    fn description(&self) -> &str {
        "Update an existing article on Dev.to"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "article_id": {
                    "type": "integer",
                    "description": "The ID of the article to update"
                },
                "title": {
                    "type": "string",
                    "description": "New title for the article (optional)"
                },
                "body_markdown": {
                    "type": "string",
                    "description": "New content in markdown format (optional)"
                },
                "tags": {
                    "type": "string",
                    "description": "New comma-separated list of tags (optional)"
                },
                "published": {
                    "type": "boolean",
                    "description": "Change publish status (optional)"
                }
            },
            "required": ["article_id"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String> {
        let args: UpdateArticleArgs = parse_args(self.name(), args)?;

        // Existence check: a bad id fails here with a 404 before any write
        // is attempted.
        self.client.article(&args.article_id.to_string()).await?;

        let patch = ArticleUpdate {
            title: args.title,
            body_markdown: args.body_markdown,
            tags: args.tags,
            published: args.published,
        };

        let updated = self.client.update_article(args.article_id, &patch).await?;
        info!(id = args.article_id, "article updated");

        let url = updated.url.unwrap_or_default();
        Ok(format!("Article updated successfully\nURL: {url}"))
    }
}
