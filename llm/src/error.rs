use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("No API key configured for provider {provider}")]
    MissingApiKey { provider: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{provider} returned HTTP {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("Model returned no text")]
    EmptyResponse,

    #[error("Invalid response payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Stream interrupted: {0}")]
    Stream(String),

    /// Failure injected by [`crate::StubModel`].
    #[error("{0}")]
    Scripted(String),
}

pub type Result<T> = std::result::Result<T, LlmError>;
