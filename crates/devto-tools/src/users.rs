use async_trait::async_trait;
use devto_client::ForemClient;
use devto_core::Result;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::format::format_user_profile;
use crate::{parse_args, Tool};

#[derive(Debug, Deserialize)]
struct UserInfoArgs {
    username: String,
}

#[derive(Debug, Clone)]
pub struct UserInfoTool {
    client: Arc<ForemClient>,
}

impl UserInfoTool {
    pub fn new(client: Arc<ForemClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for UserInfoTool {
    fn name(&self) -> &str {
        "get_user_info"
    }

    fn description(&self) -> &str {
        "Get information about a Dev.to user"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "username": {
                    "type": "string",
                    "description": "The username of the user"
                }
            },
            "required": ["username"]
        })
    }

    /// A missing user is an answer, not a failure: 404 maps to a friendly
    /// sentinel. Every other status propagates.
    async fn execute(&self, args: Value) -> Result<String> {
        let args: UserInfoArgs = parse_args(self.name(), args)?;

        match self.client.user(&args.username).await {
            Ok(user) => Ok(format_user_profile(&user)),
            Err(e) if e.status() == Some(404) => {
                Ok(format!("User {} not found.", args.username))
            }
            Err(e) => Err(e),
        }
    }
}
