use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(thiserror::Error, Debug)]
pub enum RewriteError {
    #[error("Ollama timed out after {secs}s. Try a smaller model: copydesk gemma3:1b")]
    Timeout { secs: u64 },
    #[error("could not reach Ollama at {url}: {detail}. Make sure Ollama is running: ollama serve")]
    Unreachable { url: String, detail: String },
    #[error("Ollama request failed: {0}")]
    Http(String),
}

/// The external text rewriter. One request, one reply, no streaming.
pub trait Rewriter {
    fn rewrite(&self, system: &str, user: &str) -> Result<String, RewriteError>;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    stream: bool,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize, Default)]
struct ChatResponse {
    #[serde(default)]
    message: Option<ReplyMessage>,
}

#[derive(Deserialize, Default)]
struct ReplyMessage {
    #[serde(default)]
    content: String,
}

pub struct OllamaRewriter {
    url: String,
    model: String,
    timeout_secs: u64,
}

impl OllamaRewriter {
    pub fn new(url: impl Into<String>, model: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            url: url.into(),
            model: model.into(),
            timeout_secs,
        }
    }

    fn classify(&self, err: reqwest::Error) -> RewriteError {
        if err.is_timeout() {
            RewriteError::Timeout {
                secs: self.timeout_secs,
            }
        } else if err.is_connect() || err.is_builder() {
            RewriteError::Unreachable {
                url: self.url.clone(),
                detail: err.to_string(),
            }
        } else {
            RewriteError::Http(err.to_string())
        }
    }
}

impl Rewriter for OllamaRewriter {
    fn rewrite(&self, system: &str, user: &str) -> Result<String, RewriteError> {
        let body = ChatRequest {
            model: &self.model,
            stream: false,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        };
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()
            .map_err(|e| RewriteError::Http(e.to_string()))?;

        tracing::info!(url = %self.url, model = %self.model, "sending rewrite request");
        let resp = client
            .post(&self.url)
            .json(&body)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| self.classify(e))?;
        let parsed: ChatResponse = resp.json().map_err(|e| self.classify(e))?;
        Ok(parsed.message.map(|m| m.content).unwrap_or_default())
    }
}
