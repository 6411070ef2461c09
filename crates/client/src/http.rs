//! HTTP transport implementing [`RemoteTodos`] against the todosync API.

use async_trait::async_trait;

use todosync_core::Todo;

use crate::error::{ClientError, Result};
use crate::remote::RemoteTodos;

const TODOS_PATH: &str = "/api/todos";
const LIVEZ_PATH: &str = "/livez";

/// HTTP client for the todosync API.
#[derive(Debug, Clone)]
pub struct TodoApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl TodoApiClient {
    /// Creates a client pointed at the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// The base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decode a body on success; map error statuses to [`ClientError`].
    async fn parse_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return response.json().await.map_err(ClientError::from);
        }
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(ClientError::ServerError {
            status: status.as_u16(),
            message,
        })
    }

    /// Probes server liveness.
    pub async fn health(&self) -> Result<()> {
        let response = self.client.get(self.url(LIVEZ_PATH)).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ClientError::ServerError {
                status: status.as_u16(),
                message: "liveness probe failed".to_string(),
            })
        }
    }
}

#[async_trait]
impl RemoteTodos for TodoApiClient {
    async fn list(&self) -> Result<Vec<Todo>> {
        let response = self.client.get(self.url(TODOS_PATH)).send().await?;
        self.parse_response(response).await
    }

    async fn append(&self, todo: &Todo) -> Result<Todo> {
        let response = self
            .client
            .post(self.url(TODOS_PATH))
            .json(todo)
            .send()
            .await?;
        self.parse_response(response).await
    }
}
