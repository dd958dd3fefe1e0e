//! Mock chat completions backend for tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{ChatCompletions, ChatRequest, LlmError, UpstreamReply};

/// Returns a canned reply and records every request it receives.
#[derive(Clone)]
pub struct MockCompletions {
    reply: Option<UpstreamReply>,
    requests: Arc<Mutex<Vec<ChatRequest>>>,
}

impl MockCompletions {
    pub fn with_reply(status: u16, body: Value) -> Self {
        Self {
            reply: Some(UpstreamReply { status, body }),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A 200 reply carrying `content` as the first choice.
    pub fn completion(content: &str) -> Self {
        Self::with_reply(
            200,
            json!({
                "id": "chatcmpl-mock",
                "object": "chat.completion",
                "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}],
                "usage": {"total_tokens": 42}
            }),
        )
    }

    /// Every call fails as a decoding error, standing in for a broken upstream.
    pub fn failing() -> Self {
        Self {
            reply: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatCompletions for MockCompletions {
    async fn send(&self, request: &ChatRequest) -> Result<UpstreamReply, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(LlmError::Parse(
                serde_json::from_str::<Value>("<html>bad gateway</html>").unwrap_err(),
            )),
        }
    }
}
