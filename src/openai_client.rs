use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// One completion call: a persona/instruction message followed by the task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
        }
    }

    #[cfg(test)]
    pub fn system_prompt(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == ChatRole::System)
            .map(|m| m.content.as_str())
    }

    #[cfg(test)]
    pub fn user_prompt(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == ChatRole::User)
            .map(|m| m.content.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited by the API")]
    RateLimited,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A text-generation service: ordered role-tagged messages in, one completion out.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn complete(&self, request: ChatRequest) -> Result<String, ClientError>;
}

pub struct OpenAiClient {
    api_key: String,
    model: String,
    endpoint: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAiClient {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        let endpoint = format!(
            "{}/v1/chat/completions",
            config.base_url.as_str().trim_end_matches('/')
        );

        Ok(Self {
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            endpoint,
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request_body(&self, request: &ChatRequest) -> serde_json::Value {
        json!({
            "model": self.model,
            "messages": request.messages,
        })
    }
}

#[async_trait]
impl ChatClient for OpenAiClient {
    async fn complete(&self, request: ChatRequest) -> Result<String, ClientError> {
        let request_body = self.build_request_body(&request);

        debug!("Sending request to OpenAI API: {}", serde_json::to_string_pretty(&request_body)?);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 429 {
            error!("API request was rate limited");
            return Err(ClientError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("API request failed with status {}: {}", status, error_text);
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let body: CompletionResponse = response.json().await?;
        debug!("Received response from OpenAI API: {:?}", body);

        extract_text(body)
    }
}

fn extract_text(body: CompletionResponse) -> Result<String, ClientError> {
    let text = body
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| ClientError::InvalidResponse("response contained no message content".to_string()))?;

    Ok(text.trim().to_string())
}

#[cfg(test)]
pub mod mock {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// Scripted client: replays queued replies in order and records every request.
    pub struct MockChatClient {
        replies: Mutex<VecDeque<Result<String, ClientError>>>,
        requests: Mutex<Vec<ChatRequest>>,
    }

    impl MockChatClient {
        pub fn new<I>(replies: I) -> Self
        where
            I: IntoIterator<Item = Result<String, ClientError>>,
        {
            Self {
                replies: Mutex::new(replies.into_iter().collect()),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn ok<I, S>(replies: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            Self::new(replies.into_iter().map(|r| Ok(r.into())))
        }

        pub fn requests(&self) -> Vec<ChatRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ChatClient for MockChatClient {
        async fn complete(&self, request: ChatRequest) -> Result<String, ClientError> {
            self.requests.lock().unwrap().push(request);
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ClientError::InvalidResponse("No more mock replies".to_string())))
        }
    }

    /// Lets a test keep a handle on the mock after handing it to the planner.
    #[async_trait]
    impl ChatClient for std::sync::Arc<MockChatClient> {
        async fn complete(&self, request: ChatRequest) -> Result<String, ClientError> {
            self.as_ref().complete(request).await
        }
    }
}
