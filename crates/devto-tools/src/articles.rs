//! Read-side article tools. Each fetches a page or a single resource and
//! hands it to a formatter; collections are cut to `DISPLAY_LIMIT` first.

use async_trait::async_trait;
use devto_client::{ArticleQuery, ForemClient};
use devto_core::{Article, Result};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

use crate::format::{format_article_details, format_articles};
use crate::{parse_args, Tool, DISPLAY_LIMIT};

fn no_args_schema() -> Value {
    json!({
        "type": "object",
        "properties": {}
    })
}

#[derive(Debug, Clone)]
pub struct LatestArticlesTool {
    client: Arc<ForemClient>,
}

impl LatestArticlesTool {
    pub fn new(client: Arc<ForemClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for LatestArticlesTool {
    fn name(&self) -> &str {
        "get_latest_articles"
    }

    fn description(&self) -> &str {
        "Get the latest articles from Dev.to"
    }

    fn schema(&self) -> Value {
        no_args_schema()
    }

    async fn execute(&self, _args: Value) -> Result<String> {
        let mut articles = self.client.latest_articles().await?;
        articles.truncate(DISPLAY_LIMIT);
        Ok(format_articles(&articles))
    }
}

#[derive(Debug, Clone)]
pub struct TopArticlesTool {
    client: Arc<ForemClient>,
}

impl TopArticlesTool {
    pub fn new(client: Arc<ForemClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for TopArticlesTool {
    fn name(&self) -> &str {
        "get_top_articles"
    }

    fn description(&self) -> &str {
        "Get the top articles from Dev.to"
    }

    fn schema(&self) -> Value {
        no_args_schema()
    }

    async fn execute(&self, _args: Value) -> Result<String> {
        let mut articles = self.client.articles(&ArticleQuery::default()).await?;
        articles.truncate(DISPLAY_LIMIT);
        Ok(format_articles(&articles))
    }
}

#[derive(Debug, Deserialize)]
struct ArticlesByTagArgs {
    tag: String,
}

#[derive(Debug, Clone)]
pub struct ArticlesByTagTool {
    client: Arc<ForemClient>,
}

impl ArticlesByTagTool {
    pub fn new(client: Arc<ForemClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ArticlesByTagTool {
    fn name(&self) -> &str {
        "get_articles_by_tag"
    }

    fn description(&self) -> &str {
        "Get articles by tag from Dev.to"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "tag": {
                    "type": "string",
                    "description": "Tag to filter articles by"
                }
            },
            "required": ["tag"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String> {
        let args: ArticlesByTagArgs = parse_args(self.name(), args)?;
        let mut articles = self.client.articles(&ArticleQuery::tag(args.tag)).await?;
        articles.truncate(DISPLAY_LIMIT);
        Ok(format_articles(&articles))
    }
}

#[derive(Debug, Deserialize)]
struct ArticleByIdArgs {
    id: String,
}

#[derive(Debug, Clone)]
pub struct ArticleByIdTool {
    client: Arc<ForemClient>,
}

impl ArticleByIdTool {
    pub fn new(client: Arc<ForemClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ArticleByIdTool {
    fn name(&self) -> &str {
        "get_article_by_id"
    }

    fn description(&self) -> &str {
        "Get a specific article by ID from Dev.to"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "id": {
                    "type": "string",
                    "description": "The ID of the article to retrieve"
                }
            },
            "required": ["id"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String> {
        let args: ArticleByIdArgs = parse_args(self.name(), args)?;
        let article = self.client.article(&args.id).await?;
        Ok(format_article_details(Some(&article)))
    }
}

#[derive(Debug, Deserialize)]
struct ArticleDetailsArgs {
    article_id: u64,
}

#[derive(Debug, Clone)]
pub struct ArticleDetailsTool {
    client: Arc<ForemClient>,
}

impl ArticleDetailsTool {
    pub fn new(client: Arc<ForemClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ArticleDetailsTool {
    fn name(&self) -> &str {
        "get_article_details"
    }

    fn description(&self) -> &str {
        "Get detailed information about a specific article"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "article_id": {
                    "type": "integer",
                    "description": "The ID of the article to retrieve"
                }
            },
            "required": ["article_id"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String> {
        let args: ArticleDetailsArgs = parse_args(self.name(), args)?;
        let article = self.client.article(&args.article_id.to_string()).await?;
        Ok(format_article_details(Some(&article)))
    }
}

#[derive(Debug, Deserialize)]
struct SearchArticlesArgs {
    query: String,
    #[serde(default = "default_page")]
    page: u32,
}

fn default_page() -> u32 {
    1
}

#[derive(Debug, Clone)]
pub struct SearchArticlesTool {
    client: Arc<ForemClient>,
}

impl SearchArticlesTool {
    pub fn new(client: Arc<ForemClient>) -> Self {
        Self { client }
    }

    /// Case-insensitive substring match over title and description.
    fn matches(article: &Article, needle: &str) -> bool {
        let title = article.title.as_deref().unwrap_or("").to_lowercase();
        let description = article.description.as_deref().unwrap_or("").to_lowercase();
        title.contains(needle) || description.contains(needle)
    }
}

#[async_trait]
impl Tool for SearchArticlesTool {
    fn name(&self) -> &str {
        "search_articles"
    }

    fn description(&self) -> &str {
        "Search for articles within a page of recent Dev.to articles"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search term to find articles"
                },
                "page": {
                    "type": "integer",
                    "description": "Page number for pagination (default: 1)",
                    "default": 1
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String> {
        let args: SearchArticlesArgs = parse_args(self.name(), args)?;

        let articles = self.client.articles(&ArticleQuery::page(args.page)).await?;
        let needle = args.query.to_lowercase();

        let filtered: Vec<Article> = articles
            .into_iter()
            .filter(|a| Self::matches(a, &needle))
            .take(DISPLAY_LIMIT)
            .collect();

        debug!(query = %args.query, matched = filtered.len(), "search filtered page");
        Ok(format_articles(&filtered))
    }
}

#[derive(Debug, Deserialize)]
struct ArticlesByUsernameArgs {
    username: String,
}

#[derive(Debug, Clone)]
pub struct ArticlesByUsernameTool {
    client: Arc<ForemClient>,
}

impl ArticlesByUsernameTool {
    pub fn new(client: Arc<ForemClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ArticlesByUsernameTool {
    fn name(&self) -> &str {
        "get_articles_by_username"
    }

    fn description(&self) -> &str {
        "Get articles written by a specific user"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "username": {
                    "type": "string",
                    "description": "The username of the author"
                }
            },
            "required": ["username"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String> {
        let args: ArticlesByUsernameArgs = parse_args(self.name(), args)?;
        let mut articles = self
            .client
            .articles(&ArticleQuery::username(args.username))
            .await?;
        articles.truncate(DISPLAY_LIMIT);
        Ok(format_articles(&articles))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, description: &str) -> Article {
        Article {
            title: Some(title.to_string()),
            description: Some(description.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn search_matches_title_and_description_case_insensitively() {
        let a = article("Rust ownership", "a tour");
        let b = article("Go routines", "concurrency in GO");
        let c = article("Python tips", "unrelated");

        assert!(SearchArticlesTool::matches(&a, "rust"));
        assert!(SearchArticlesTool::matches(&b, "go"));
        assert!(!SearchArticlesTool::matches(&c, "rust"));
    }

    #[test]
    fn search_filter_preserves_page_order() {
        let page = vec![
            article("Rust ownership", "a"),
            article("Go routines", "b"),
            article("More rust", "c"),
            article("Unrelated", "still has Rust inside"),
        ];

        let filtered: Vec<&Article> = page
            .iter()
            .filter(|a| SearchArticlesTool::matches(a, "rust"))
            .collect();

        let titles: Vec<&str> = filtered
            .iter()
            .map(|a| a.title.as_deref().unwrap())
            .collect();
        assert_eq!(titles, vec!["Rust ownership", "More rust", "Unrelated"]);
    }
}
