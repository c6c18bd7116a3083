//! End-to-end generation: draft the outline, extract slides, assemble the
//! plan and hand it to the renderer.

use crate::assembler::assemble;
use crate::error::{DeckError, Result};
use crate::extractor::extract;
use crate::prompts::build_outline_prompt;
use deck_common::{DeckConfig, DeckPlan, DeckRenderer, ThemeName};
use deck_llm::LanguageModel;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub topic: String,
    #[serde(default)]
    pub description: String,
    /// Catalog name or loose preference such as "corporate".
    #[serde(default)]
    pub theme: Option<String>,
    /// Free-form hint for the prompt, e.g. "10" or "5-8".
    #[serde(default)]
    pub slide_count: Option<String>,
}

impl GenerateRequest {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            ..Self::default()
        }
    }
}

/// What was written, reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedDeck {
    pub file_name: String,
    pub path: PathBuf,
    pub slide_count: usize,
    pub theme: ThemeName,
}

pub struct PresentationGenerator {
    model: Arc<dyn LanguageModel>,
    renderer: Arc<dyn DeckRenderer>,
    output_dir: PathBuf,
    default_slide_count: Option<String>,
}

impl PresentationGenerator {
    pub fn new(
        model: Arc<dyn LanguageModel>,
        renderer: Arc<dyn DeckRenderer>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            model,
            renderer,
            output_dir: output_dir.into(),
            default_slide_count: None,
        }
    }

    pub fn from_config(
        config: &DeckConfig,
        model: Arc<dyn LanguageModel>,
        renderer: Arc<dyn DeckRenderer>,
    ) -> Self {
        let mut generator = Self::new(model, renderer, config.output_dir.clone());
        generator.default_slide_count = config.slide_count.clone();
        generator
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Draft and assemble a plan without rendering it.
    pub async fn plan(&self, request: &GenerateRequest) -> Result<DeckPlan> {
        let topic = request.topic.trim();
        if topic.is_empty() {
            return Err(DeckError::InvalidInput("Topic is required".to_string()));
        }

        let slide_count = request
            .slide_count
            .as_deref()
            .or(self.default_slide_count.as_deref());
        let prompt = build_outline_prompt(topic, &request.description, slide_count);
        let raw = self.model.complete(&prompt).await?;

        let slides = extract(&raw);
        if slides.is_empty() {
            tracing::warn!("no slides could be extracted from the model reply");
        }

        let plan = assemble(self.model.as_ref(), topic, slides, request.theme.as_deref()).await;
        tracing::info!(
            topic,
            theme = %plan.theme_name,
            slides = plan.slide_count(),
            "assembled deck plan"
        );
        Ok(plan)
    }

    /// Render `plan` into the output directory.
    pub fn render(&self, plan: &DeckPlan) -> Result<GeneratedDeck> {
        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(&plan.output_name);
        self.renderer
            .render(plan, &path)
            .map_err(DeckError::Render)?;
        tracing::info!(path = %path.display(), "wrote presentation");

        Ok(GeneratedDeck {
            file_name: plan.output_name.clone(),
            path,
            slide_count: plan.slide_count(),
            theme: plan.theme_name,
        })
    }

    pub async fn generate(&self, request: &GenerateRequest) -> Result<GeneratedDeck> {
        let plan = self.plan(request).await?;
        self.render(&plan)
    }
}

/// Write `plan` as pretty JSON next to the deck, e.g. `deck_1a2b3c4d.json`.
pub fn save_plan(plan: &DeckPlan, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(&plan.output_name).with_extension("json");
    std::fs::create_dir_all(dir)?;
    std::fs::write(&path, serde_json::to_string_pretty(plan)?)?;
    Ok(path)
}

pub fn load_plan(path: &Path) -> Result<DeckPlan> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
