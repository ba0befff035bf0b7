use std::time::Duration;

use async_trait::async_trait;
use contactus_shared::{ContactMessage, Message};
use reqwest::header::CONTENT_TYPE;

pub const MESSAGE_PATH: &str = "/api/message";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Failed to send message data. Status: {status}. Message: {message}")]
    Status { status: u16, message: String },

    #[error("Expected JSON response but received a different format.")]
    UnexpectedFormat,

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Rejected(String),
}

impl ClientError {
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let message = if body.is_empty() {
            "Unknown error".to_owned()
        } else {
            body
        };

        Self::Status { status, message }
    }
}

/// Submits contact messages to the server.
#[async_trait]
pub trait MessageClient: Send + Sync {
    async fn create_message(&self, payload: &ContactMessage) -> Result<Message, ClientError>;
}

/// [`MessageClient`] posting JSON to `{base_url}/api/message`.
pub struct HttpMessageClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpMessageClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint: format!("{}{MESSAGE_PATH}", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(&self, payload: &ContactMessage) -> Result<Message, ClientError> {
        let response = self.client.post(&self.endpoint).json(payload).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await?;

            return Err(ClientError::status(status.as_u16(), body));
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.contains("application/json"));

        if !is_json {
            return Err(ClientError::UnexpectedFormat);
        }

        Ok(response.json::<Message>().await?)
    }
}

#[async_trait]
impl MessageClient for HttpMessageClient {
    async fn create_message(&self, payload: &ContactMessage) -> Result<Message, ClientError> {
        self.send(payload).await.inspect_err(|err| {
            tracing::error!(
                endpoint = %self.endpoint,
                "An error occurred while sending the message data: {err}"
            );
        })
    }
}
