use crate::theme::{Theme, ThemeName};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strum::{Display, EnumIter};

/// File extension of rendered decks.
pub const DECK_EXTENSION: &str = "pptx";

/// Subtitle placed on every generated title slide.
pub const TITLE_SLIDE_SUBTITLE: &str = "Created with Smart Presentation Generator";

/// One slide as drafted by the language model.
///
/// `content` order is significant: bullets render top to bottom.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: Vec<String>,
    #[serde(default)]
    pub visual_note: String,
}

impl SlideRecord {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_content<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.content = items.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_visual_note(mut self, note: impl Into<String>) -> Self {
        self.visual_note = note.into();
        self
    }
}

/// Slide layouts of the default slide master, with their layout index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, Display)]
#[serde(rename_all = "snake_case")]
pub enum SlideLayout {
    #[strum(serialize = "Title Slide")]
    TitleSlide,
    #[strum(serialize = "Title and Content")]
    TitleAndContent,
    #[strum(serialize = "Section Header")]
    SectionHeader,
    #[strum(serialize = "Two Content")]
    TwoContent,
    #[strum(serialize = "Comparison")]
    Comparison,
    #[strum(serialize = "Title Only")]
    TitleOnly,
    #[strum(serialize = "Blank")]
    Blank,
}

impl SlideLayout {
    pub fn index(self) -> usize {
        self as usize
    }
}

/// What a content slide looks like it is, judged from its title and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SlideKind {
    Agenda,
    Conclusion,
    Dense,
    Standard,
}

/// One step for the rendering collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SlideInstruction {
    Title {
        title: String,
        subtitle: String,
    },
    Content {
        title: String,
        bullets: Vec<String>,
        kind: SlideKind,
        layout: SlideLayout,
    },
}

impl SlideInstruction {
    pub fn title(&self) -> &str {
        match self {
            SlideInstruction::Title { title, .. } | SlideInstruction::Content { title, .. } => title,
        }
    }

    pub fn layout(&self) -> SlideLayout {
        match self {
            SlideInstruction::Title { .. } => SlideLayout::TitleSlide,
            SlideInstruction::Content { layout, .. } => *layout,
        }
    }
}

/// A fully resolved presentation, ready to hand to a [`DeckRenderer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckPlan {
    pub topic: String,
    pub theme_name: ThemeName,
    pub theme: Theme,
    pub slides: Vec<SlideRecord>,
    /// Title slide first, then one entry per record in `slides`.
    pub instructions: Vec<SlideInstruction>,
    pub output_name: String,
}

impl DeckPlan {
    pub fn slide_count(&self) -> usize {
        self.instructions.len()
    }

    /// Visual note of the record behind instruction `index`, if any.
    pub fn visual_note(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.slides.get(i))
            .map(|s| s.visual_note.as_str())
            .filter(|n| !n.is_empty())
    }
}

/// The document-rendering collaborator.
pub trait DeckRenderer: Send + Sync {
    /// Persist `plan` at `path`.
    fn render(&self, plan: &DeckPlan, path: &Path) -> anyhow::Result<()>;
}
