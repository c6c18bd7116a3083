use deck_llm::LlmError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckError {
    /// Bad request from the caller, e.g. a blank topic.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The language model failed while drafting slide content.
    #[error("Language model request failed: {0}")]
    Upstream(#[from] LlmError),

    #[error("Rendering failed: {0:#}")]
    Render(anyhow::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DeckError>;
