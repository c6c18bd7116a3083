//! Builds the deck plan: one title slide, then one content slide per record.

use crate::theme_resolver::resolve_theme;
use deck_common::{
    DeckPlan, SlideInstruction, SlideKind, SlideLayout, SlideRecord, ThemeName, DECK_EXTENSION,
    TITLE_SLIDE_SUBTITLE,
};
use deck_llm::LanguageModel;
use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

const AGENDA_KEYWORDS: &[&str] = &["agenda", "overview", "outline", "contents"];
const CONCLUSION_KEYWORDS: &[&str] = &["conclusion", "summary", "key takeaway", "thank you"];

/// Slides with more bullets than this count as dense.
pub const DENSE_BULLET_LIMIT: usize = 6;

/// Used when nothing of the topic survives sanitising.
const FALLBACK_STEM: &str = "presentation";

/// Longest stem in bytes; keeps the whole name well under the usual
/// 255-byte file name limit.
const MAX_STEM_BYTES: usize = 100;

#[allow(clippy::expect_used)]
static UNSAFE_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s-]").expect("static pattern compiles"));
#[allow(clippy::expect_used)]
static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("static pattern compiles"));

/// Resolve the theme, then lay out the deck.
pub async fn assemble(
    model: &dyn LanguageModel,
    topic: &str,
    slides: Vec<SlideRecord>,
    theme_preference: Option<&str>,
) -> DeckPlan {
    let theme_name = resolve_theme(model, theme_preference, Some(topic)).await;
    assemble_with_theme(topic, slides, theme_name)
}

/// Lay out the deck with an already resolved theme.
pub fn assemble_with_theme(topic: &str, slides: Vec<SlideRecord>, theme_name: ThemeName) -> DeckPlan {
    let mut instructions = Vec::with_capacity(slides.len() + 1);
    instructions.push(SlideInstruction::Title {
        title: topic.to_string(),
        subtitle: TITLE_SLIDE_SUBTITLE.to_string(),
    });

    for (index, record) in slides.iter().enumerate() {
        let kind = classify_slide(record);
        let layout = layout_for(kind);
        tracing::debug!(slide = index + 1, title = %record.title, %kind, %layout, "content slide");
        instructions.push(SlideInstruction::Content {
            title: record.title.clone(),
            bullets: record.content.clone(),
            kind,
            layout,
        });
    }

    DeckPlan {
        topic: topic.to_string(),
        theme_name,
        theme: theme_name.settings().clone(),
        slides,
        instructions,
        output_name: output_file_name(topic),
    }
}

/// Agenda and conclusion keywords are checked first, then bullet count.
pub fn classify_slide(record: &SlideRecord) -> SlideKind {
    let title = record.title.to_lowercase();
    if AGENDA_KEYWORDS.iter().any(|k| title.contains(k)) {
        SlideKind::Agenda
    } else if CONCLUSION_KEYWORDS.iter().any(|k| title.contains(k)) {
        SlideKind::Conclusion
    } else if record.content.len() > DENSE_BULLET_LIMIT {
        SlideKind::Dense
    } else {
        SlideKind::Standard
    }
}

/// Agenda slides open a section; every other kind is title and content.
pub fn layout_for(kind: SlideKind) -> SlideLayout {
    match kind {
        SlideKind::Agenda => SlideLayout::SectionHeader,
        SlideKind::Conclusion | SlideKind::Dense | SlideKind::Standard => {
            SlideLayout::TitleAndContent
        }
    }
}

/// Keep word characters, whitespace and hyphens; join words with `_`.
pub fn sanitize_topic(topic: &str) -> String {
    let kept = UNSAFE_CHARS.replace_all(topic, "");
    WHITESPACE_RUN.replace_all(kept.trim(), "_").into_owned()
}

/// `<sanitised topic>_<8 random hex chars>.pptx`
pub fn output_file_name(topic: &str) -> String {
    let sanitized = sanitize_topic(topic);
    let stem = truncate_on_char_boundary(&sanitized, MAX_STEM_BYTES).trim_end_matches('_');
    let stem = if stem.is_empty() { FALLBACK_STEM } else { stem };
    let id = Uuid::new_v4().simple().to_string();
    format!("{stem}_{}.{DECK_EXTENSION}", &id[..8])
}

fn truncate_on_char_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
