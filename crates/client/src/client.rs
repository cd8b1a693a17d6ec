//! HTTP client for the list-page endpoints.
//!
//! Wraps `/api/v1/{category}/...` using [`reqwest`]. Any non-2xx answer is
//! reported as [`ClientError::Http`] with a readable message, whatever the
//! endpoint.

use pforge_core::favorites::{FavoriteAction, FavoriteSummary};
use pforge_core::filter::Category;
use pforge_core::types::DbId;
use pforge_core::ui::UiLayout;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::state::Filter;

/// Errors from the list-page HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The body was not the expected JSON.
    #[error("Unexpected response body: {0}")]
    Decode(String),
}

/// Body of `GET /{category}/initial-list`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialList {
    pub filter: Filter,
    pub ui: UiLayout,
    pub data_list: Vec<serde_json::Value>,
    #[serde(default)]
    pub filter_favorites: Vec<FavoriteSummary>,
}

/// Body of a favorite action; absent keys were not changed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteUpdate {
    pub data: Option<Vec<serde_json::Value>>,
    pub ui: Option<UiLayout>,
    pub filter: Option<Filter>,
    pub filter_favorites: Option<Vec<FavoriteSummary>>,
}

#[derive(Deserialize)]
struct DataEnvelope {
    data: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
struct FilterEnvelope {
    filter: Filter,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Parameters of one favorite action.
#[derive(Debug, Clone, Default)]
pub struct FavoriteRequest {
    pub id: Option<DbId>,
    pub new_name: Option<String>,
    /// Sent as POST body when present; the request is a GET otherwise.
    pub body: Option<Filter>,
}

/// HTTP client for the list pages of one server.
#[derive(Clone)]
pub struct ListPageClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ListPageClient {
    /// * `base_url` - Server root, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Reuse an existing [`reqwest::Client`] (shared connection pool).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Authenticate every request with this bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, category: Category, path: &str) -> String {
        format!("{}/api/v1/{}/{}", self.base_url, category, path)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub async fn initial_list(&self, category: Category) -> Result<InitialList, ClientError> {
        let request = self.client.get(self.url(category, "initial-list"));
        Self::parse_response(self.authorized(request).send().await?).await
    }

    /// Submit `filter` and return the rows it selects.
    pub async fn list(
        &self,
        category: Category,
        filter: &Filter,
    ) -> Result<Vec<serde_json::Value>, ClientError> {
        let request = self.client.post(self.url(category, "list")).json(filter);
        let envelope: DataEnvelope =
            Self::parse_response(self.authorized(request).send().await?).await?;
        Ok(envelope.data)
    }

    pub async fn filter_reset(&self, category: Category) -> Result<Filter, ClientError> {
        let request = self.client.get(self.url(category, "filterReset"));
        let envelope: FilterEnvelope =
            Self::parse_response(self.authorized(request).send().await?).await?;
        Ok(envelope.filter)
    }

    pub async fn favorite(
        &self,
        category: Category,
        action: FavoriteAction,
        params: &FavoriteRequest,
    ) -> Result<FavoriteUpdate, ClientError> {
        let url = self.url(category, &format!("filter/{}", action_name(action)));
        let request = match &params.body {
            Some(body) => self.client.post(url).json(body),
            None => self.client.get(url),
        };

        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(id) = params.id {
            query.push(("id", id.to_string()));
        }
        if let Some(ref new_name) = params.new_name {
            query.push(("newName", new_name.clone()));
        }

        let request = self.authorized(request.query(&query));
        Self::parse_response(request.send().await?).await
    }

    // ---- private helpers ----

    /// Turn a non-2xx response into [`ClientError::Http`], preferring the
    /// server's `error` message over the raw body.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or(body);
        tracing::debug!(status = status.as_u16(), %message, "List page request failed");
        Err(ClientError::Http {
            status: status.as_u16(),
            message,
        })
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

fn action_name(action: FavoriteAction) -> &'static str {
    match action {
        FavoriteAction::Create => "create",
        FavoriteAction::Delete => "delete",
        FavoriteAction::Select => "select",
        FavoriteAction::Rename => "rename",
        FavoriteAction::Update => "update",
    }
}
