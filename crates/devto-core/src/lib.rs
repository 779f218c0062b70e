use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// An article as returned by the Forem REST API.
///
/// List and detail endpoints return different subsets of these fields, so
/// every one of them is optional. Formatters substitute display defaults
/// for anything missing; nothing is validated or normalized locally.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Article {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub readable_publish_date: Option<String>,
    pub tags: Option<Tags>,
    pub body_markdown: Option<String>,
    pub url: Option<String>,
    pub user: Option<ArticleAuthor>,
}

/// The author block nested inside an article payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleAuthor {
    pub name: Option<String>,
    pub username: Option<String>,
}

/// Tags arrive either as a comma-separated string or as a list of strings
/// depending on the endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tags {
    Csv(String),
    List(Vec<String>),
}

impl fmt::Display for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tags::Csv(s) => f.write_str(s),
            Tags::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

/// A user profile as returned by the Forem REST API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    pub username: Option<String>,
    pub name: Option<String>,
    pub summary: Option<String>,
    pub twitter_username: Option<String>,
    pub github_username: Option<String>,
    pub website_url: Option<String>,
    pub location: Option<String>,
    pub joined_at: Option<String>,
}

/// Payload for creating a new article. Sent nested under an `article` key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewArticle {
    pub title: String,
    pub body_markdown: String,
    pub published: bool,
    pub tags: String,
}

/// Partial-update payload. Only fields that were explicitly supplied are
/// serialized, so an absent field leaves the remote value untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_markdown: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
}

impl ArticleUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.body_markdown.is_none()
            && self.tags.is_none()
            && self.published.is_none()
    }
}

#[derive(Error, Debug)]
pub enum DevtoError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API request to {url} failed with status {status}")]
    Api { status: u16, url: String },

    #[error("No API key configured; set DEV_TO_API_KEY or api.api_key in the config file")]
    MissingApiKey,

    #[error("Invalid arguments for '{tool}': {message}")]
    InvalidArguments { tool: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Protocol error: {0}")]
    Protocol(String),
}

impl DevtoError {
    /// HTTP status of an `Api` failure, if that is what this error is.
    pub fn status(&self) -> Option<u16> {
        match self {
            DevtoError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, DevtoError>;
