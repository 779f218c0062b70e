//! HTTP transport for the Forem (dev.to) REST API.
//!
//! One `ForemClient` wraps one `reqwest::Client` with a fixed base URL and
//! per-request timeout. Calls are independent request/response exchanges;
//! there is no retry, caching, or shared state between them.

use std::time::Duration;

use devto_core::{Article, ArticleUpdate, DevtoError, NewArticle, Result, User};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde_json::json;
use tracing::debug;

/// Public Dev.to API root.
pub const DEFAULT_BASE_URL: &str = "https://dev.to/api";

/// Default timeout applied to every request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Header carrying the Forem API key on authenticated calls.
const API_KEY_HEADER: &str = "api-key";

/// Connection settings injected at construction time.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub api_key: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            api_key: None,
        }
    }
}

/// Client for the Forem REST API.
pub struct ForemClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl std::fmt::Debug for ForemClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForemClient")
            .field("base_url", &self.base_url)
            .field("has_api_key", &self.api_key.is_some())
            .finish()
    }
}

/// Optional query parameters accepted by `GET /articles`.
#[derive(Debug, Clone, Default)]
pub struct ArticleQuery {
    pub tag: Option<String>,
    pub username: Option<String>,
    pub page: Option<u32>,
}

impl ArticleQuery {
    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            ..Default::default()
        }
    }

    pub fn username(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            ..Default::default()
        }
    }

    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            ..Default::default()
        }
    }

    fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(tag) = &self.tag {
            params.push(("tag", tag.clone()));
        }
        if let Some(username) = &self.username {
            params.push(("username", username.clone()));
        }
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        params
    }
}

impl ForemClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Typed endpoints ──────────────────────────────────────────────────

    /// `GET /articles/latest`
    pub async fn latest_articles(&self) -> Result<Vec<Article>> {
        self.get("/articles/latest", &[]).await
    }

    /// `GET /articles` with optional `tag`, `username`, `page` parameters.
    pub async fn articles(&self, query: &ArticleQuery) -> Result<Vec<Article>> {
        self.get("/articles", &query.to_params()).await
    }

    /// `GET /articles/{id}`
    pub async fn article(&self, id: &str) -> Result<Article> {
        self.get(&format!("/articles/{id}"), &[]).await
    }

    /// `GET /users/{username}`
    pub async fn user(&self, username: &str) -> Result<User> {
        self.get(&format!("/users/{username}"), &[]).await
    }

    /// `POST /articles` with the `api-key` header. Fails with
    /// `MissingApiKey` before any network traffic when no key is configured.
    pub async fn create_article(&self, draft: &NewArticle) -> Result<Article> {
        let key = self.api_key.as_deref().ok_or(DevtoError::MissingApiKey)?;

        let url = format!("{}/articles", self.base_url);
        debug!(%url, "POST");

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let key_value = HeaderValue::from_str(key)
            .map_err(|e| DevtoError::Config(format!("Invalid API key value: {e}")))?;
        headers.insert(API_KEY_HEADER, key_value);

        let response = self
            .http
            .post(&url)
            .headers(headers)
            .json(&json!({ "article": draft }))
            .send()
            .await?;

        Self::decode(response).await
    }

    /// `PUT /articles/{id}` with a partial-update body.
    ///
    /// TODO: this route sends no api-key header while the create route
    /// does; confirm whether the remote API accepts unauthenticated
    /// updates before adding one.
    pub async fn update_article(&self, id: u64, patch: &ArticleUpdate) -> Result<Article> {
        let url = format!("{}/articles/{id}", self.base_url);
        debug!(%url, "PUT");

        let response = self
            .http
            .put(&url)
            .json(&json!({ "article": patch }))
            .send()
            .await?;

        Self::decode(response).await
    }

    // ── Plumbing ─────────────────────────────────────────────────────────

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, ?params, "GET");

        let mut request = self.http.get(&url);
        if !params.is_empty() {
            request = request.query(params);
        }

        Self::decode(request.send().await?).await
    }

    /// Map a non-2xx status to `DevtoError::Api`, otherwise deserialize the
    /// JSON body.
    async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(DevtoError::Api {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }
        Ok(response.json().await?)
    }
}
