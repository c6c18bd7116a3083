//! Picks a catalog theme from a user preference and/or the deck topic.
//!
//! Resolution never fails: an explicit catalog name wins, then (with no
//! preference at all) the model is asked to classify the topic, then a
//! loose preference is matched against keyword hints, and finally the
//! professional theme is used.

use crate::error::{DeckError, Result};
use crate::prompts::build_theme_prompt;
use deck_common::ThemeName;
use deck_llm::LanguageModel;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// Substring hints for preferences that are not catalog names. First match wins.
const PREFERENCE_HINTS: &[(&[&str], ThemeName)] = &[
    (&["business", "corp"], ThemeName::Professional),
    (&["art", "design"], ThemeName::Creative),
    (&["simple", "clean"], ThemeName::Minimal),
    (&["bold", "color"], ThemeName::Vibrant),
    (&["edu", "research"], ThemeName::Academic),
    (&["tech", "digital"], ThemeName::Tech),
];

/// Alternation of every catalog name, in catalog order.
#[allow(clippy::expect_used)]
static THEME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let names: Vec<&'static str> = ThemeName::iter().map(Into::into).collect();
    Regex::new(&format!("({})", names.join("|"))).expect("theme names form a valid pattern")
});

/// How a theme was chosen; logged for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeSource {
    Explicit,
    ModelSuggestion,
    PreferenceHint,
    Fallback,
}

pub async fn resolve_theme(
    model: &dyn LanguageModel,
    preference: Option<&str>,
    topic: Option<&str>,
) -> ThemeName {
    let (name, source) = resolve_with_source(model, preference, topic).await;
    tracing::debug!(theme = %name, ?source, "resolved theme");
    name
}

pub async fn resolve_with_source(
    model: &dyn LanguageModel,
    preference: Option<&str>,
    topic: Option<&str>,
) -> (ThemeName, ThemeSource) {
    let preference = preference.filter(|p| !p.is_empty());
    let topic = topic.filter(|t| !t.is_empty());

    if let Some(name) = preference.and_then(|p| p.parse::<ThemeName>().ok()) {
        return (name, ThemeSource::Explicit);
    }

    if let (None, Some(topic)) = (preference, topic) {
        match model.complete(&build_theme_prompt(topic)).await {
            Ok(reply) => {
                if let Some(name) = theme_in_reply(&reply) {
                    return (name, ThemeSource::ModelSuggestion);
                }
                tracing::debug!("theme suggestion named no catalog theme: {}", reply.trim());
            }
            Err(e) => tracing::warn!("Error getting theme suggestion: {e}"),
        }
    }

    if let Some(name) = preference.and_then(hinted_theme) {
        return (name, ThemeSource::PreferenceHint);
    }

    (ThemeName::Professional, ThemeSource::Fallback)
}

/// First catalog name appearing anywhere in the lower-cased reply.
pub fn theme_in_reply(reply: &str) -> Option<ThemeName> {
    let lowered = reply.trim().to_lowercase();
    THEME_PATTERN
        .find(&lowered)
        .and_then(|m| m.as_str().parse().ok())
}

fn hinted_theme(preference: &str) -> Option<ThemeName> {
    let lowered = preference.to_lowercase();
    PREFERENCE_HINTS
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| lowered.contains(n)))
        .map(|(_, name)| *name)
}

/// One catalog entry as listed to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeSummary {
    pub key: ThemeName,
    pub name: String,
    pub description: String,
}

pub fn list_themes() -> Vec<ThemeSummary> {
    ThemeName::iter()
        .map(|key| ThemeSummary {
            key,
            name: key.display_name().to_string(),
            description: key.settings().description.to_string(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeSuggestion {
    pub suggested_theme: ThemeName,
    pub theme_description: String,
}

/// Suggest a theme for `topic` alone.
pub async fn suggest_theme(model: &dyn LanguageModel, topic: &str) -> Result<ThemeSuggestion> {
    if topic.trim().is_empty() {
        return Err(DeckError::InvalidInput("Topic is required".to_string()));
    }
    let name = resolve_theme(model, None, Some(topic)).await;
    Ok(ThemeSuggestion {
        suggested_theme: name,
        theme_description: name.settings().description.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_llm::{Reply, StubModel};

    #[tokio::test]
    async fn catalog_names_win_case_insensitively() {
        let model = StubModel::failing("must not be called");
        for name in ThemeName::iter() {
            let upper = name.to_string().to_uppercase();
            assert_eq!(resolve_theme(&model, Some(&upper), Some("anything")).await, name);
            assert_eq!(resolve_theme(&model, Some(name.as_ref()), None).await, name);
        }
        assert_eq!(model.call_count().await, 0);
    }

    #[tokio::test]
    async fn model_suggestion_used_without_preference() {
        let model = StubModel::new(Reply::Text("tech".to_string()));
        let (name, source) = resolve_with_source(&model, None, Some("some topic")).await;
        assert_eq!(name, ThemeName::Tech);
        assert_eq!(source, ThemeSource::ModelSuggestion);

        let prompts = model.prompts().await;
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("\"some topic\""));
    }

    #[tokio::test]
    async fn empty_preference_counts_as_none() {
        let model = StubModel::new(Reply::Text("  Academic.\n".to_string()));
        assert_eq!(resolve_theme(&model, Some(""), Some("history")).await, ThemeName::Academic);
    }

    #[tokio::test]
    async fn gibberish_suggestion_falls_back_to_professional() {
        let model = StubModel::new(Reply::Text("qwzx blorp".to_string()));
        let (name, source) = resolve_with_source(&model, None, Some("some topic")).await;
        assert_eq!(name, ThemeName::Professional);
        assert_eq!(source, ThemeSource::Fallback);
    }

    #[tokio::test]
    async fn model_failure_is_swallowed() {
        let model = StubModel::failing("network down");
        assert_eq!(
            resolve_theme(&model, None, Some("some topic")).await,
            ThemeName::Professional
        );
    }

    #[tokio::test]
    async fn unknown_preference_uses_hints_without_model() {
        let model = StubModel::failing("must not be called");
        let cases = [
            ("business thing", ThemeName::Professional),
            ("Corporate", ThemeName::Professional),
            ("artsy", ThemeName::Creative),
            ("clean look", ThemeName::Minimal),
            ("COLORFUL", ThemeName::Vibrant),
            ("education", ThemeName::Academic),
            ("digital age", ThemeName::Tech),
            ("nothing matches", ThemeName::Professional),
        ];
        for (preference, expected) in cases {
            assert_eq!(
                resolve_theme(&model, Some(preference), Some("topic")).await,
                expected,
                "{preference}"
            );
        }
        assert_eq!(model.call_count().await, 0);
    }

    #[tokio::test]
    async fn hints_apply_in_order() {
        // "design" (creative) is listed before "tech".
        let model = StubModel::echo();
        assert_eq!(resolve_theme(&model, Some("tech design"), None).await, ThemeName::Creative);
    }

    #[tokio::test]
    async fn nothing_given_is_professional() {
        let model = StubModel::failing("must not be called");
        assert_eq!(resolve_theme(&model, None, None).await, ThemeName::Professional);
        assert_eq!(resolve_theme(&model, None, Some("")).await, ThemeName::Professional);
    }

    #[test]
    fn reply_scan_takes_earliest_name() {
        assert_eq!(theme_in_reply("I'd go with Minimal, or maybe tech"), Some(ThemeName::Minimal));
        assert_eq!(theme_in_reply("Technology-heavy: TECH"), Some(ThemeName::Tech));
        assert_eq!(theme_in_reply(""), None);
    }

    #[test]
    fn listing_is_in_catalog_order() {
        let themes = list_themes();
        assert_eq!(themes.len(), 6);
        assert_eq!(themes[0].key, ThemeName::Professional);
        assert_eq!(themes[0].name, "Professional");
        assert_eq!(themes[5].key, ThemeName::Tech);
        assert_eq!(
            themes[5].description,
            "Futuristic look ideal for technology topics"
        );
    }

    #[tokio::test]
    async fn suggestion_requires_topic() {
        let model = StubModel::new(Reply::Text("vibrant".to_string()));
        assert!(matches!(
            suggest_theme(&model, "   ").await,
            Err(DeckError::InvalidInput(_))
        ));

        let suggestion = suggest_theme(&model, "Product launch").await.unwrap();
        assert_eq!(suggestion.suggested_theme, ThemeName::Vibrant);
        assert_eq!(
            suggestion.theme_description,
            "Bold and energetic with high contrast colors"
        );
    }
}
