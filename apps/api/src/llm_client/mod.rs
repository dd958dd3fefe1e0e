//! LLM client: the single point of entry for all OpenAI chat completion calls.
//!
//! No other module may call the upstream API directly. Handlers depend on the
//! `ChatCompletions` trait so the backend can be swapped in tests.
//!
//! Model: gpt-4o-mini (hardcoded, not configurable)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

#[cfg(test)]
pub mod mock;

/// The model used for every upstream call.
pub const MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(reqwest::Error),

    #[error("Upstream API error (status {status}): {body}")]
    Upstream { status: u16, body: Value },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned no message content")]
    EmptyContent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

/// Request body for `POST /chat/completions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: &'static str,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl ChatRequest {
    /// A single user message with no system instruction.
    pub fn user_only(prompt: impl Into<String>, temperature: f32) -> Self {
        Self {
            model: MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt.into(),
            }],
            temperature,
            max_tokens: None,
        }
    }

    pub fn with_system(
        system: impl Into<String>,
        user: impl Into<String>,
        temperature: f32,
        max_tokens: u32,
    ) -> Self {
        Self {
            model: MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system.into(),
                },
                ChatMessage {
                    role: "user",
                    content: user.into(),
                },
            ],
            temperature,
            max_tokens: Some(max_tokens),
        }
    }
}

/// Success body of `POST /chat/completions`. Only the fields the gateway reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl ChatResponse {
    /// The first choice's message content, trimmed.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .map(str::trim)
    }
}

/// Raw upstream exchange: the HTTP status and the decoded body.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: Value,
}

impl UpstreamReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Converts the reply into the trimmed completion text, or the upstream error.
    pub fn into_text(self) -> Result<String, LlmError> {
        if !self.is_success() {
            return Err(LlmError::Upstream {
                status: self.status,
                body: self.body,
            });
        }

        let response: ChatResponse = serde_json::from_value(self.body)?;

        if let Some(usage) = response.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={} completion_tokens={} total_tokens={}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

/// The seam between route handlers and the upstream model API.
///
/// Carried in `AppState` as `Arc<dyn ChatCompletions>`.
#[async_trait]
pub trait ChatCompletions: Send + Sync {
    /// Performs one upstream call. Non-2xx replies are returned as `Ok`;
    /// only transport and decoding failures are errors.
    async fn send(&self, request: &ChatRequest) -> Result<UpstreamReply, LlmError>;
}

/// Sends a request and returns the trimmed completion text.
pub async fn complete_text(
    backend: &dyn ChatCompletions,
    request: &ChatRequest,
) -> Result<String, LlmError> {
    backend.send(request).await?.into_text()
}

/// OpenAI chat completions over HTTPS. No retries.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    /// Builds a client whose every request is cancelled after `timeout`.
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(LlmError::ClientBuild)?;

        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl ChatCompletions for OpenAiClient {
    async fn send(&self, request: &ChatRequest) -> Result<UpstreamReply, LlmError> {
        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status().as_u16();
        let text = response.text().await?;

        if (200..300).contains(&status) {
            let body: Value = serde_json::from_str(&text)?;
            return Ok(UpstreamReply { status, body });
        }

        warn!("LLM API returned {status}: {text}");
        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
        Ok(UpstreamReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockCompletions;
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    #[test]
    fn test_into_text_is_trimmed() {
        let reply = UpstreamReply {
            status: 200,
            body: json!({
                "choices": [{"message": {"role": "assistant", "content": "  Nice work.\n"}}],
                "usage": {"prompt_tokens": 10, "completion_tokens": 3, "total_tokens": 13}
            }),
        };
        assert_eq!(reply.into_text().unwrap(), "Nice work.");
    }

    #[test]
    fn test_into_text_with_null_content_is_empty_content() {
        let reply = UpstreamReply {
            status: 200,
            body: json!({"choices": [{"message": {"content": null}}]}),
        };
        assert!(matches!(reply.into_text(), Err(LlmError::EmptyContent)));
    }

    #[test]
    fn test_into_text_with_malformed_choices_is_parse_error() {
        let reply = UpstreamReply {
            status: 200,
            body: json!({"choices": "not-a-list"}),
        };
        assert!(matches!(reply.into_text(), Err(LlmError::Parse(_))));
    }

    #[test]
    fn test_into_text_returns_upstream_error_unchanged() {
        let reply = UpstreamReply {
            status: 429,
            body: json!({"error": "rate limited"}),
        };
        match reply.into_text() {
            Err(LlmError::Upstream { status, body }) => {
                assert_eq!(status, 429);
                assert_eq!(body, json!({"error": "rate limited"}));
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[test]
    fn test_into_text_without_choices_is_empty_content() {
        let reply = UpstreamReply {
            status: 200,
            body: json!({"id": "chatcmpl-1", "choices": []}),
        };
        assert!(matches!(reply.into_text(), Err(LlmError::EmptyContent)));
    }

    #[test]
    fn test_user_only_request_omits_max_tokens() {
        let request = ChatRequest::user_only("hello", 0.7);
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["role"], "user");
        assert!(body.get("max_tokens").is_none());
    }

    #[test]
    fn test_with_system_request_orders_messages() {
        let request = ChatRequest::with_system("sys", "usr", 0.5, 600);
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "usr");
        assert_eq!(body["max_tokens"], 600);
    }

    #[test]
    fn test_completions_url_appends_path() {
        let client = OpenAiClient::new(
            "sk-test".to_string(),
            "http://127.0.0.1:9".to_string(),
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(client.completions_url(), "http://127.0.0.1:9/chat/completions");
    }

    #[tokio::test]
    async fn test_complete_text_through_mock_backend() {
        let backend = MockCompletions::completion(" Keep it up. ");
        let request = ChatRequest::user_only("hi", 0.7);
        let text = complete_text(&backend, &request).await.unwrap();
        assert_eq!(text, "Keep it up.");
        assert_eq!(backend.requests().len(), 1);
    }

    fn client_for(base_url: String, timeout: Duration) -> OpenAiClient {
        OpenAiClient::new("sk-test".to_string(), base_url, timeout).unwrap()
    }

    #[tokio::test]
    async fn test_send_posts_bearer_auth_and_json_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJson(json!({
                "model": "gpt-4o-mini",
                "temperature": 0.5,
                "max_tokens": 600,
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "usr"}
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":" Well put. "}}]}"#)
            .create_async()
            .await;

        let client = client_for(server.url(), Duration::from_secs(5));
        let request = ChatRequest::with_system("sys", "usr", 0.5, 600);
        let text = complete_text(&client, &request).await.unwrap();

        assert_eq!(text, "Well put.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_returns_json_error_body_unchanged() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(429)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":{"message":"Rate limit reached","type":"requests"}}"#)
            .create_async()
            .await;

        let client = client_for(server.url(), Duration::from_secs(5));
        let reply = client.send(&ChatRequest::user_only("hi", 0.7)).await.unwrap();

        assert_eq!(reply.status, 429);
        assert_eq!(
            reply.body,
            json!({"error": {"message": "Rate limit reached", "type": "requests"}})
        );
    }

    #[tokio::test]
    async fn test_send_wraps_non_json_error_body_as_string() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(502)
            .with_header("content-type", "text/html")
            .with_body("<html>Bad Gateway</html>")
            .create_async()
            .await;

        let client = client_for(server.url(), Duration::from_secs(5));
        let reply = client.send(&ChatRequest::user_only("hi", 0.7)).await.unwrap();

        assert_eq!(reply.status, 502);
        assert_eq!(reply.body, Value::String("<html>Bad Gateway</html>".to_string()));
    }

    #[tokio::test]
    async fn test_send_non_json_success_body_is_parse_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let client = client_for(server.url(), Duration::from_secs(5));
        let result = client.send(&ChatRequest::user_only("hi", 0.7)).await;

        assert!(matches!(result, Err(LlmError::Parse(_))));
    }

    /// The listener accepts the connection but never answers.
    #[tokio::test]
    async fn test_send_times_out_on_silent_upstream() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let holder = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
            drop(socket);
        });

        let client = client_for(format!("http://{addr}"), Duration::from_millis(300));
        let result = client.send(&ChatRequest::user_only("hi", 0.7)).await;

        match result {
            Err(LlmError::Http(e)) => assert!(e.is_timeout(), "expected timeout, got {e}"),
            other => panic!("expected transport timeout, got {other:?}"),
        }
        holder.abort();
    }

    /// Nothing listens on port 9 (discard), so the call fails at the transport level.
    #[tokio::test]
    async fn test_unreachable_upstream_is_http_error() {
        let client = OpenAiClient::new(
            "sk-test".to_string(),
            "http://127.0.0.1:9".to_string(),
            Duration::from_secs(2),
        )
        .unwrap();
        let request = ChatRequest::user_only("hi", 0.7);
        assert!(matches!(client.send(&request).await, Err(LlmError::Http(_))));
    }
}
