//! Completion gateway: one chat-completion round trip per command.
//!
//! The gateway is an injected collaborator so tests can substitute a stub
//! without touching process globals. A single attempt per request — no
//! retries, no backoff, no partial-result salvage.

use anyhow::Context as _;
use async_trait::async_trait;

const GROQ_COMPLETIONS_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Parameters for one completion call.
#[derive(Debug, Clone)]
pub struct CompletionRequest<'a> {
    pub system_prompt: &'a str,
    pub user_prompt: &'a str,
    pub temperature: f64,
    pub max_tokens: u32,
}

/// A remote chat-completion collaborator.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Run one request/response exchange and return the generated text.
    async fn complete(&self, request: CompletionRequest<'_>) -> anyhow::Result<String>;
}

/// Groq API client. Groq speaks the OpenAI chat-completions wire format.
pub struct GroqClient {
    http_client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GroqClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http_client,
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionGateway for GroqClient {
    async fn complete(&self, request: CompletionRequest<'_>) -> anyhow::Result<String> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": request.system_prompt},
                {"role": "user", "content": request.user_prompt},
            ],
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
        });

        let response = self
            .http_client
            .post(GROQ_COMPLETIONS_URL)
            .header("authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .context("completion request failed")?;

        let status = response.status();
        let response_body: serde_json::Value = response
            .json()
            .await
            .context("failed to read completion response body")?;

        if !status.is_success() {
            let message = response_body["error"]["message"]
                .as_str()
                .unwrap_or("unknown error");
            anyhow::bail!("Groq API error ({status}): {message}");
        }

        let text = response_body["choices"][0]["message"]["content"]
            .as_str()
            .context("completion response missing message content")?;

        Ok(text.to_string())
    }
}
