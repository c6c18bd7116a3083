use crate::error::{LlmError, Result};
use crate::LanguageModel;
use async_trait::async_trait;
use tokio::sync::mpsc;

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Minimal OpenAI Chat Completions client. Replies are streamed over SSE and
/// concatenated by [`LanguageModel::complete`].
pub struct OpenAiModelClient {
    api_key: String,
    pub model: String,
    base_url: String,
    http: reqwest::Client,
}

impl OpenAiModelClient {
    pub fn new_with_model(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            base_url: OPENAI_BASE_URL.to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Point at an OpenAI-compatible endpoint instead of api.openai.com.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Stream text deltas. The channel closes after `[DONE]` or the first error.
    pub async fn stream_chat(&self, prompt: &str) -> Result<mpsc::Receiver<Result<String>>> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
            "stream": true,
        });
        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "openai request");

        let mut req = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json");
        if let Ok(project) = std::env::var("OPENAI_PROJECT") {
            if !project.is_empty() {
                req = req.header("OpenAI-Project", project);
            }
        }
        if let Ok(org) = std::env::var("OPENAI_ORG") {
            if !org.is_empty() {
                req = req.header("OpenAI-Organization", org);
            }
        }
        let resp = req.json(&body).send().await?;

        let status = resp.status();
        tracing::debug!("openai response status {status}");
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(LlmError::Status {
                provider: "openai",
                status: status.as_u16(),
                body: text,
            });
        }

        let stream = resp.bytes_stream();
        let (tx, rx) = mpsc::channel::<Result<String>>(64);
        tokio::spawn(async move {
            use futures_util::StreamExt;
            let mut buf = Vec::new();
            let mut stream = Box::pin(stream);
            while let Some(chunk) = stream.next().await {
                match chunk {
                    Ok(bytes) => {
                        buf.extend_from_slice(&bytes);
                        for event in drain_sse_events(&mut buf) {
                            match event {
                                SseEvent::Done => return,
                                SseEvent::Delta(delta) => {
                                    if tx.send(Ok(delta)).await.is_err() {
                                        return;
                                    }
                                }
                            }
                        }
                    }
                    Err(e) => {
                        tracing::warn!("openai stream chunk error: {e}");
                        let _ = tx.send(Err(LlmError::Stream(e.to_string()))).await;
                        return;
                    }
                }
            }
            tracing::debug!("openai stream finished without [DONE]");
        });
        Ok(rx)
    }
}

#[async_trait]
impl LanguageModel for OpenAiModelClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let mut rx = self.stream_chat(prompt).await?;
        let mut text = String::new();
        while let Some(delta) = rx.recv().await {
            text.push_str(&delta?);
        }
        if text.trim().is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(text)
    }
}

#[derive(Debug, PartialEq, Eq)]
enum SseEvent {
    Delta(String),
    Done,
}

/// Pull every complete `\n\n`-terminated event out of `buf`, leaving any
/// partial event in place for the next chunk.
fn drain_sse_events(buf: &mut Vec<u8>) -> Vec<SseEvent> {
    let mut events = Vec::new();
    while let Some(pos) = memchr::memmem::find(buf, b"\n\n") {
        let part: Vec<u8> = buf.drain(..pos + 2).collect();
        let Ok(text) = String::from_utf8(part) else {
            continue;
        };
        for line in text.lines() {
            let Some(rest) = line.trim_start().strip_prefix("data: ") else {
                continue;
            };
            if rest == "[DONE]" {
                events.push(SseEvent::Done);
                continue;
            }
            match serde_json::from_str::<serde_json::Value>(rest) {
                Ok(v) => {
                    if let Some(delta) = v["choices"][0]["delta"]["content"].as_str() {
                        events.push(SseEvent::Delta(delta.to_string()));
                    }
                }
                Err(e) => tracing::warn!("SSE JSON parse error on {rest}: {e}"),
            }
        }
    }
    events
}
