use crate::error::{LlmError, Result};
use crate::LanguageModel;
use async_trait::async_trait;
use std::collections::VecDeque;
use tokio::sync::Mutex;

/// What a [`StubModel`] answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Echo the prompt back, prefixed with `echo: `.
    Echo,
    Text(String),
    Fail(String),
}

/// A scripted model for offline runs and tests.
///
/// Queued replies are consumed in order; once the queue is empty every call
/// gets the fallback reply. Every prompt is recorded.
pub struct StubModel {
    queue: Mutex<VecDeque<Reply>>,
    fallback: Reply,
    prompts: Mutex<Vec<String>>,
}

const OFFLINE_OUTLINE: &str = r#"# Introduction
- Why this subject matters today
- What the audience will take away
Visual note: a single striking cover photo

# Agenda
- Background and context
- Current situation
- Proposal and next steps

# Current Situation
- Where things stand now
- The main obstacles
- Opportunities worth pursuing
Visual note: bar chart comparing the last three years

# Proposal
- The approach in one sentence
- How it will be rolled out
- Expected results

# Conclusion
- Key points revisited
- Next steps
- Questions and discussion
"#;

impl StubModel {
    pub fn new(fallback: Reply) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            fallback,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Answer every prompt with a fixed markdown outline.
    pub fn offline() -> Self {
        Self::new(Reply::Text(OFFLINE_OUTLINE.to_string()))
    }

    pub fn echo() -> Self {
        Self::new(Reply::Echo)
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(Reply::Fail(message.into()))
    }

    /// Queue `replies` ahead of the fallback.
    pub fn scripted<I>(replies: I, fallback: Reply) -> Self
    where
        I: IntoIterator<Item = Reply>,
    {
        Self {
            queue: Mutex::new(replies.into_iter().collect()),
            fallback,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.prompts.lock().await.len()
    }
}

#[async_trait]
impl LanguageModel for StubModel {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().await.push(prompt.to_string());
        let reply = self
            .queue
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());

        match reply {
            Reply::Echo => Ok(format!("echo: {prompt}")),
            Reply::Text(text) => Ok(text),
            Reply::Fail(message) => Err(LlmError::Scripted(message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn queued_replies_then_fallback() {
        let model = StubModel::scripted(
            [Reply::Text("first".to_string()), Reply::Fail("boom".to_string())],
            Reply::Echo,
        );

        assert_eq!(model.complete("a").await.unwrap(), "first");
        assert!(matches!(model.complete("b").await, Err(LlmError::Scripted(m)) if m == "boom"));
        assert_eq!(model.complete("c").await.unwrap(), "echo: c");
        assert_eq!(model.prompts().await, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn offline_outline_names_no_theme() {
        let reply = StubModel::offline().complete("x").await.unwrap();
        let lower = reply.to_lowercase();
        for name in ["professional", "creative", "minimal", "vibrant", "academic", "tech"] {
            assert!(!lower.contains(name), "outline mentions {name}");
        }
    }
}
