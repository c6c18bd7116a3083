//! Presentation pipeline: prompts, theme resolution, content extraction and
//! deck assembly.

pub mod assembler;
pub mod error;
pub mod extractor;
pub mod generator;
pub mod prompts;
pub mod theme_resolver;

pub use assembler::{assemble, assemble_with_theme, classify_slide, output_file_name};
pub use error::{DeckError, Result};
pub use extractor::extract;
pub use generator::{load_plan, save_plan, GenerateRequest, GeneratedDeck, PresentationGenerator};
pub use theme_resolver::{
    list_themes, resolve_theme, suggest_theme, ThemeSource, ThemeSuggestion, ThemeSummary,
};
