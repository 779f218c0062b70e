pub mod server;
pub mod types;

pub use server::McpServer;
pub use types::{
    ContentItem, InitializeResult, JsonRpcError, JsonRpcRequest, JsonRpcResponse, ListToolsResult,
    McpTool, ServerCapabilities, ServerInfo, ToolCallParams, ToolCallResult, ToolsCapability,
};
