//! HTTP calls to the assistant backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{config::ClientConfig, error::ClientError};

pub type Result<T> = std::result::Result<T, ClientError>;

/// Operations the chat client needs from the backend.
#[async_trait]
pub trait AssistantApi: Send + Sync {
    /// `Ok(None)` when the backend answered successfully but without an `answer`.
    async fn ask(&self, question: &str) -> Result<Option<String>>;

    async fn get_context(&self) -> Result<String>;

    async fn set_context(&self, new_context: &str) -> Result<()>;
}

pub struct HttpAssistantApi {
    client: Client,
    config: ClientConfig,
}

#[derive(Serialize)]
struct AskBody<'a> {
    question: &'a str,
}

#[derive(Deserialize)]
struct AskReply {
    #[serde(default)]
    answer: Option<String>,
}

#[derive(Serialize)]
struct ContextBody<'a> {
    new_context: &'a str,
}

#[derive(Deserialize)]
struct ContextReply {
    #[serde(default)]
    context: Option<String>,
}

#[derive(Deserialize)]
struct ErrorReply {
    message: String,
}

impl HttpAssistantApi {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| ClientError::Connect(format!("http client: {e}")))?;
        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Maps non-2xx responses to [`ClientError::Status`], keeping the server message.
    async fn check(resp: Response) -> Result<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let text = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorReply>(&text)
            .map(|e| e.message)
            .unwrap_or_else(|_| text.chars().take(300).collect());
        Err(ClientError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn read_json<T: for<'de> Deserialize<'de>>(
        resp: Response,
        timeout: Duration,
    ) -> Result<T> {
        resp.json()
            .await
            .map_err(|e| ClientError::from_transport(e, timeout))
    }
}

#[async_trait]
impl AssistantApi for HttpAssistantApi {
    async fn ask(&self, question: &str) -> Result<Option<String>> {
        let timeout = self.config.ask_timeout;
        debug!(len = question.len(), "POST /ask");
        let resp = self
            .client
            .post(self.url("/ask"))
            .timeout(timeout)
            .json(&AskBody { question })
            .send()
            .await
            .map_err(|e| ClientError::from_transport(e, timeout))?;
        let reply: AskReply = Self::read_json(Self::check(resp).await?, timeout).await?;
        Ok(reply.answer)
    }

    async fn get_context(&self) -> Result<String> {
        let timeout = self.config.context_fetch_timeout;
        let resp = self
            .client
            .get(self.url("/context"))
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| ClientError::from_transport(e, timeout))?;
        let reply: ContextReply = Self::read_json(Self::check(resp).await?, timeout).await?;
        reply
            .context
            .ok_or_else(|| ClientError::Decode("backend response missing 'context' key".into()))
    }

    async fn set_context(&self, new_context: &str) -> Result<()> {
        let timeout = self.config.context_update_timeout;
        let resp = self
            .client
            .post(self.url("/context"))
            .timeout(timeout)
            .json(&ContextBody { new_context })
            .send()
            .await
            .map_err(|e| ClientError::from_transport(e, timeout))?;
        Self::check(resp).await?;
        Ok(())
    }
}
