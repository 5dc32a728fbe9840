use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret as _, SecretString};

use crate::{
    config::Config,
    errors::AppError,
    models::dto::completion::{ChatCompletionResponse, CompletionRequest, PromptPurpose},
};

/// Raw generated text, or the reason there is none.
pub type CompletionResult = Result<String, AppError>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> CompletionResult;
}

/// Audit trail for completion calls. Implementations must swallow their own
/// failures: nothing here can fail a call.
pub trait CompletionObserver: Send + Sync {
    fn on_request(&self, request: &CompletionRequest);
    fn on_response(&self, purpose: PromptPurpose, status: u16, body: &str);
    fn on_failure(&self, purpose: PromptPurpose, error: &AppError);
}

/// Writes every prompt and raw response to the process log.
pub struct LogObserver;

impl CompletionObserver for LogObserver {
    fn on_request(&self, request: &CompletionRequest) {
        let prompt = request
            .messages
            .last()
            .map(|m| m.content.as_str())
            .unwrap_or_default();
        log::info!("Completion API request prompt for {}: {}", request.purpose, prompt);
    }

    fn on_response(&self, purpose: PromptPurpose, status: u16, body: &str) {
        log::info!("Completion API response for {} ({}): {}", purpose, status, body);
    }

    fn on_failure(&self, purpose: PromptPurpose, error: &AppError) {
        log::error!("Completion API call for {} failed: {}", purpose, error);
    }
}

pub struct OpenAiCompletionClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: SecretString,
    observer: Arc<dyn CompletionObserver>,
}

impl OpenAiCompletionClient {
    pub fn new(endpoint: impl Into<String>, api_key: SecretString) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key,
            observer: Arc::new(LogObserver),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.completion_endpoint.clone(), config.openai_api_key.clone())
    }

    pub fn with_observer(mut self, observer: Arc<dyn CompletionObserver>) -> Self {
        self.observer = observer;
        self
    }

    async fn send(&self, request: &CompletionRequest) -> CompletionResult {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Transport(format!("failed to read response body: {}", e)))?;

        self.observer.on_response(request.purpose, status.as_u16(), &body);

        extract_content(status, &body)
    }
}

#[async_trait]
impl CompletionClient for OpenAiCompletionClient {
    async fn complete(&self, request: &CompletionRequest) -> CompletionResult {
        self.observer.on_request(request);

        let result = self.send(request).await;
        if let Err(err) = &result {
            self.observer.on_failure(request.purpose, err);
        }
        result
    }
}

/// Pulls `choices[0].message.content` out of a response body. Any HTTP status
/// is accepted; a body without content is malformed whatever the status.
fn extract_content(status: StatusCode, body: &str) -> CompletionResult {
    let parsed: ChatCompletionResponse = serde_json::from_str(body).map_err(|e| {
        AppError::MalformedResponse(format!("response body is not valid JSON ({}): {}", status, e))
    })?;

    let api_message = parsed.error.as_ref().and_then(|e| e.message.clone());

    parsed.first_content().ok_or_else(|| {
        AppError::MalformedResponse(match api_message {
            Some(message) => format!("no content in first choice ({}): {}", status, message),
            None => format!("no content in first choice ({})", status),
        })
    })
}
