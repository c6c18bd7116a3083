use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strum::{Display, EnumString};
use thiserror::Error;

/// Files probed, in order, when no explicit config path is given.
pub const CONFIG_CANDIDATES: &[&str] = &[
    ".deckgen/config.toml",
    ".deckgen/config.json",
    "deckgen.toml",
    "deckgen.json",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Unknown model provider: {0}")]
    UnknownProvider(String),
}

/// Which language-model backend drafts the slides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Provider {
    #[default]
    Gemini,
    OpenAi,
    /// Offline canned replies; useful for demos and tests.
    Stub,
}

impl Provider {
    pub fn default_model(self) -> &'static str {
        match self {
            Provider::Gemini => "gemini-2.0-flash",
            Provider::OpenAi => "gpt-4o-mini",
            Provider::Stub => "stub",
        }
    }

    /// Provider-specific environment variable holding the API key.
    pub fn api_key_var(self) -> Option<&'static str> {
        match self {
            Provider::Gemini => Some("GEMINI_API_KEY"),
            Provider::OpenAi => Some("OPENAI_API_KEY"),
            Provider::Stub => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    pub provider: Provider,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Alternative API root for the remote provider, e.g. a proxy or a
    /// self-hosted OpenAI-compatible server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub output_dir: PathBuf,
    /// Hint for how many slides to ask for, e.g. "5-8" or "10".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slide_count: Option<String>,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            api_key: None,
            model: None,
            base_url: None,
            output_dir: PathBuf::from("static/presentations"),
            slide_count: None,
        }
    }
}

impl DeckConfig {
    /// Load from `explicit` (errors are fatal) or from the first discovered
    /// config file, then apply environment overrides.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::load_from_file(path)?,
            None => Self::load_with_fallback(),
        };
        config.apply_env()?;
        Ok(config)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            Ok(toml::from_str(&contents)?)
        } else {
            Ok(serde_json::from_str(&contents)?)
        }
    }

    /// First readable candidate wins; unreadable ones are logged and skipped.
    pub fn load_with_fallback() -> Self {
        let user_config = dirs::config_dir().map(|dir| dir.join("deckgen").join("config.toml"));
        let candidates = CONFIG_CANDIDATES
            .iter()
            .map(PathBuf::from)
            .chain(user_config);

        for path in candidates {
            if !path.exists() {
                continue;
            }
            match Self::load_from_file(&path) {
                Ok(config) => {
                    tracing::info!("Loaded configuration from {}", path.display());
                    return config;
                }
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                }
            }
        }

        tracing::debug!("Using default configuration");
        Self::default()
    }

    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
    }

    /// Apply `DECKGEN_*` overrides, then pick up an API key for the final provider.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(provider) = lookup("DECKGEN_PROVIDER") {
            self.provider = provider
                .parse()
                .map_err(|_| ConfigError::UnknownProvider(provider))?;
        }
        if let Some(model) = lookup("DECKGEN_MODEL") {
            self.model = Some(model);
        }
        if let Some(url) = lookup("DECKGEN_BASE_URL") {
            self.base_url = Some(url);
        }
        if let Some(dir) = lookup("DECKGEN_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(count) = lookup("DECKGEN_SLIDE_COUNT") {
            self.slide_count = Some(count);
        }

        let provider_key = self.provider.api_key_var().and_then(&lookup);
        if let Some(key) = lookup("DECKGEN_API_KEY").or(provider_key) {
            self.api_key = Some(key);
        }
        Ok(())
    }

    pub fn effective_model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }
}
