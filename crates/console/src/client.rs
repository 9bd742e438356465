//! HTTP client for the storefront API.
//!
//! Wraps [`reqwest`] with the bearer token of the current session and maps
//! the API's `{error, code}` bodies into [`ClientError::Api`].

use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::config::ConsoleConfig;
use crate::error::ClientError;

/// Error body produced by the API for every non-2xx response.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    code: String,
}

/// Cloneable API client. Clones share the session token.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn new(config: &ConsoleConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: &ConsoleConfig) -> Self {
        Self {
            client,
            base_url: config.api_base_url.clone(),
            token: Arc::new(RwLock::new(config.access_token.clone())),
        }
    }

    pub async fn set_token(&self, token: Option<String>) {
        *self.token.write().await = token;
    }

    pub async fn has_token(&self) -> bool {
        self.token.read().await.is_some()
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let request = self.authorize(self.client.get(self.url(path))).await;
        Self::parse_response(request.send().await?).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.authorize(self.client.post(self.url(path)).json(body)).await;
        Self::parse_response(request.send().await?).await
    }

    /// POST without a body, ignoring any response body.
    pub async fn post_empty(&self, path: &str) -> Result<(), ClientError> {
        let request = self.authorize(self.client.post(self.url(path))).await;
        Self::ensure_success(request.send().await?).await?;
        Ok(())
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.authorize(self.client.put(self.url(path)).json(body)).await;
        Self::parse_response(request.send().await?).await
    }

    /// PUT without a body.
    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let request = self.authorize(self.client.put(self.url(path))).await;
        Self::parse_response(request.send().await?).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let request = self.authorize(self.client.delete(self.url(path))).await;
        Self::ensure_success(request.send().await?).await?;
        Ok(())
    }

    /// POST a multipart form with one `file` part.
    pub async fn post_file<T: DeserializeOwned>(
        &self,
        path: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<T, ClientError> {
        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name.to_string()));
        let request = self
            .authorize(self.client.post(self.url(path)).multipart(form))
            .await;
        Self::parse_response(request.send().await?).await
    }

    // ---- private helpers ----

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.token.read().await.as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Turn a non-2xx response into [`ClientError::Api`]. A body that is
    /// not the API's error shape keeps its raw text as the message.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        let (code, message) = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => (body.code, body.error),
            Err(_) => ("UNKNOWN".to_string(), text),
        };
        tracing::debug!(status = status.as_u16(), %code, %message, "API request rejected");
        Err(ClientError::Api {
            status: status.as_u16(),
            code,
            message,
        })
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
