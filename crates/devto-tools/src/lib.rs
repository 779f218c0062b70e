use async_trait::async_trait;
use devto_client::ForemClient;
use devto_core::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

pub mod articles;
pub mod format;
pub mod publish;
pub mod users;

pub use articles::{
    ArticleByIdTool, ArticleDetailsTool, ArticlesByTagTool, ArticlesByUsernameTool,
    LatestArticlesTool, SearchArticlesTool, TopArticlesTool,
};
pub use publish::{CreateArticleTool, UpdateArticleTool};
pub use users::UserInfoTool;

/// Collections are cut to this many entries before formatting.
pub const DISPLAY_LIMIT: usize = 10;

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn schema(&self) -> Value;
    async fn execute(&self, args: Value) -> Result<String>;
}

pub struct ToolRegistry {
    tools: Arc<RwLock<HashMap<String, Arc<dyn Tool>>>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Registry with every Dev.to tool wired to the given client.
    pub fn with_default_tools(client: Arc<ForemClient>) -> Self {
        let registry = Self::new();

        // Article read tools
        registry.register(LatestArticlesTool::new(client.clone()));
        registry.register(TopArticlesTool::new(client.clone()));
        registry.register(ArticlesByTagTool::new(client.clone()));
        registry.register(ArticleByIdTool::new(client.clone()));
        registry.register(ArticleDetailsTool::new(client.clone()));
        registry.register(SearchArticlesTool::new(client.clone()));
        registry.register(ArticlesByUsernameTool::new(client.clone()));

        // User tools
        registry.register(UserInfoTool::new(client.clone()));

        // Write tools
        registry.register(CreateArticleTool::new(client.clone()));
        registry.register(UpdateArticleTool::new(client));

        registry
    }

    pub fn register(&self, tool: impl Tool + 'static) {
        let mut tools = self.tools.write().unwrap();
        let name = tool.name().to_string();
        tools.insert(name, Arc::new(tool));
    }

    pub fn unregister(&self, name: &str) {
        let mut tools = self.tools.write().unwrap();
        tools.remove(name);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        let tools = self.tools.read().unwrap();
        tools.get(name).cloned()
    }

    pub fn list(&self) -> Vec<String> {
        let tools = self.tools.read().unwrap();
        let mut names: Vec<String> = tools.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn get_all(&self) -> Vec<Arc<dyn Tool>> {
        let tools = self.tools.read().unwrap();
        let mut all: Vec<Arc<dyn Tool>> = tools.values().cloned().collect();
        all.sort_by(|a, b| a.name().cmp(b.name()));
        all
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode a tool's argument object, mapping malformed input to
/// `InvalidArguments` with the tool name attached.
pub(crate) fn parse_args<T: serde::de::DeserializeOwned>(tool: &str, args: Value) -> Result<T> {
    serde_json::from_value(args).map_err(|e| devto_core::DevtoError::InvalidArguments {
        tool: tool.to_string(),
        message: format!("{e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use devto_client::ClientConfig;
    use serde_json::json;

    struct MockTool {
        name: String,
    }

    #[async_trait]
    impl Tool for MockTool {
        fn name(&self) -> &str {
            &self.name
        }

        fn description(&self) -> &str {
            "A mock tool for testing"
        }

        fn schema(&self) -> Value {
            json!({
                "type": "object",
                "properties": {}
            })
        }

        async fn execute(&self, _args: Value) -> Result<String> {
            Ok("success".to_string())
        }
    }

    #[test]
    fn test_tool_registry() {
        let registry = ToolRegistry::new();
        let tool = MockTool {
            name: "test_tool".to_string(),
        };

        registry.register(tool);
        assert!(registry.get("test_tool").is_some());
        assert_eq!(registry.list().len(), 1);

        registry.unregister("test_tool");
        assert!(registry.get("test_tool").is_none());
    }

    #[test]
    fn test_default_tools() {
        let client = Arc::new(ForemClient::new(ClientConfig::default()).unwrap());
        let registry = ToolRegistry::with_default_tools(client);
        let tools = registry.list();

        assert_eq!(tools.len(), 10);
        for name in [
            "get_latest_articles",
            "get_top_articles",
            "get_articles_by_tag",
            "get_article_by_id",
            "get_article_details",
            "search_articles",
            "get_articles_by_username",
            "get_user_info",
            "create_article",
            "update_article",
        ] {
            assert!(tools.contains(&name.to_string()), "missing tool {name}");
        }
    }

    #[test]
    fn test_listings_are_sorted() {
        let client = Arc::new(ForemClient::new(ClientConfig::default()).unwrap());
        let registry = ToolRegistry::with_default_tools(client);

        let names = registry.list();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);

        let all: Vec<String> = registry
            .get_all()
            .iter()
            .map(|t| t.name().to_string())
            .collect();
        assert_eq!(all, names);
    }
}
