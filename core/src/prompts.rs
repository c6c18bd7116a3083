//! Prompts sent to the language model.

use deck_common::ThemeName;
use std::fmt::Write as _;
use strum::IntoEnumIterator;

/// Slide count hint used when the caller does not give one.
pub const DEFAULT_SLIDE_COUNT: &str = "5-8";

/// Ask for a full slide outline as a JSON array of
/// `{ "title", "content", "visual_note" }` objects.
pub fn build_outline_prompt(topic: &str, description: &str, slide_count: Option<&str>) -> String {
    let slide_count = slide_count
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_SLIDE_COUNT);

    format!(
        r#"You are a presentation creation assistant. Create a professional, well-structured
presentation outline with detailed content for each slide.

Topic: {topic}
Description: {description}

Create a presentation with approximately {slide_count} slides including:
1. A title slide with a subtitle that captures the essence of the topic
2. An agenda/overview slide
3. Content slides (detailed and informative)
4. A conclusion slide with key takeaways

For each slide, provide:
- A concise, engaging slide title (8 words or less)
- 3-5 bullet points (each 1-2 sentences max)
- A brief note about what visuals would enhance this slide (optional)

Format your response as a JSON array where each object represents a slide with these properties:
- "title": The slide title
- "content": Array of bullet points as strings
- "visual_note": A string describing suggested visuals (chart type, image concept, etc.)

Make this presentation informative, professional, and compelling.
"#
    )
}

/// Ask the model to pick one catalog theme for `topic`.
pub fn build_theme_prompt(topic: &str) -> String {
    let mut prompt = format!(
        "I need to choose a presentation theme for a topic: \"{topic}\".\n\
         Choose the single best matching theme from this list based on the topic:\n"
    );
    for name in ThemeName::iter() {
        let _ = writeln!(prompt, "- {name} ({})", name.connotation());
    }
    prompt.push_str("\nReply with just one word: the name of the best matching theme.\n");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outline_prompt_embeds_request() {
        let prompt = build_outline_prompt("Rust in production", "For platform engineers", None);
        assert!(prompt.contains("Topic: Rust in production"));
        assert!(prompt.contains("Description: For platform engineers"));
        assert!(prompt.contains("approximately 5-8 slides"));
        assert!(prompt.contains("\"visual_note\""));
    }

    #[test]
    fn outline_prompt_honours_slide_count() {
        let prompt = build_outline_prompt("t", "", Some("12"));
        assert!(prompt.contains("approximately 12 slides"));

        let prompt = build_outline_prompt("t", "", Some("  "));
        assert!(prompt.contains("approximately 5-8 slides"));
    }

    #[test]
    fn theme_prompt_lists_every_theme() {
        let prompt = build_theme_prompt("Quantum computing");
        assert!(prompt.contains("topic: \"Quantum computing\""));
        for name in ThemeName::iter() {
            assert!(prompt.contains(&format!("- {name} (")));
        }
        assert!(prompt.contains("- tech (technology, digital, futuristic)"));
    }
}
