//! Turns a language model's free-text reply into slide records.
//!
//! Each strategy is a pure function tried in order; the first one that
//! yields `Some` wins. Nothing here fails: a reply no strategy understands
//! becomes an empty deck.

use deck_common::SlideRecord;
use serde_json::Value;

pub type Strategy = fn(&str) -> Option<Vec<SlideRecord>>;

/// Strategies in the order they are tried.
pub const STRATEGIES: &[(&str, Strategy)] = &[
    ("embedded_json", embedded_json),
    ("whole_text_json", whole_text_json),
    ("line_heuristics", line_heuristics),
];

#[allow(clippy::expect_used)]
mod patterns {
    use once_cell::sync::Lazy;
    use regex::Regex;

    fn compile(pattern: &str) -> Regex {
        Regex::new(pattern).expect("static pattern compiles")
    }

    /// ```json fence, any other fence, or a bare `{"...}]` span.
    pub static EMBEDDED_JSON: Lazy<Regex> = Lazy::new(|| {
        compile(r#"```json\s*([\s\S]*?)\s*```|```\s*([\s\S]*?)\s*```|\{\s*"[\s\S]*?\s*\}\]"#)
    });
    pub static NUMBERED_TITLE: Lazy<Regex> = Lazy::new(|| compile(r"^\d+\."));
    pub static TITLE_MARKER: Lazy<Regex> =
        Lazy::new(|| compile(r"^(?:#{1,2}\s+)?(?:Slide\s+\d+\s*:\s*)?(?:\d+\.\s*)?"));
    pub static NUMBERED_BULLET: Lazy<Regex> = Lazy::new(|| compile(r"^\d+\)"));
    pub static BULLET_MARKER: Lazy<Regex> = Lazy::new(|| compile(r"^(?:- |\* |\d+\)\s*)"));
    pub static VISUAL_MARKER: Lazy<Regex> =
        Lazy::new(|| compile(r"(?i)^visuals?(?:\s+notes?)?\s*:?"));
}

use patterns::*;

/// Extract slides from `raw`, trying each strategy in turn.
pub fn extract(raw: &str) -> Vec<SlideRecord> {
    for (name, strategy) in STRATEGIES {
        if let Some(slides) = strategy(raw) {
            tracing::debug!(strategy = name, slides = slides.len(), "extracted slides");
            return slides;
        }
    }
    tracing::warn!(
        "model reply contained no recognisable slides ({} bytes)",
        raw.len()
    );
    Vec::new()
}

/// The first fenced block or JSON-looking span, if any.
pub fn find_embedded_json(raw: &str) -> Option<&str> {
    let caps = EMBEDDED_JSON.captures(raw)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(0))
        .map(|m| m.as_str())
}

/// Parse the first embedded span. Only that span is tried.
pub fn embedded_json(raw: &str) -> Option<Vec<SlideRecord>> {
    let candidate = find_embedded_json(raw)?;
    let slides = parse_slide_array(candidate);
    if slides.is_none() {
        tracing::debug!("embedded span is not a slide array");
    }
    slides
}

/// Parse the whole reply, but only when no embedded span was found.
pub fn whole_text_json(raw: &str) -> Option<Vec<SlideRecord>> {
    if find_embedded_json(raw).is_some() {
        return None;
    }
    parse_slide_array(raw)
}

/// Parse `candidate` as a JSON array of slide objects.
///
/// A bare span such as `{"title": ...}, {...}]` is missing its opening
/// bracket, so it is retried with one prepended.
pub fn parse_slide_array(candidate: &str) -> Option<Vec<SlideRecord>> {
    let trimmed = candidate.trim();
    let value = serde_json::from_str::<Value>(trimmed).ok().or_else(|| {
        (trimmed.starts_with('{') && trimmed.ends_with(']'))
            .then(|| serde_json::from_str::<Value>(&format!("[{trimmed}")).ok())
            .flatten()
    })?;

    let Value::Array(items) = value else {
        return None;
    };
    Some(items.into_iter().filter_map(slide_from_value).collect())
}

/// Missing keys default to empty; non-object entries are dropped.
fn slide_from_value(value: Value) -> Option<SlideRecord> {
    let Value::Object(mut map) = value else {
        tracing::debug!("skipping non-object slide entry");
        return None;
    };

    let title = map.remove("title").and_then(text_of).unwrap_or_default();
    let content = match map.remove("content") {
        Some(Value::Array(items)) => items.into_iter().filter_map(text_of).collect(),
        Some(other) => text_of(other).into_iter().collect(),
        None => Vec::new(),
    };
    let visual_note = map.remove("visual_note").and_then(text_of).unwrap_or_default();

    Some(SlideRecord {
        title,
        content,
        visual_note,
    })
}

fn text_of(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// How one line of a markdown-ish outline is read.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Title(&'a str),
    Bullet(&'a str),
    Visual(&'a str),
    Other,
}

fn classify_line(line: &str) -> Line<'_> {
    if line.starts_with("# ")
        || line.starts_with("## ")
        || line.starts_with("Slide ")
        || NUMBERED_TITLE.is_match(line)
    {
        let marker = TITLE_MARKER.find(line).map_or(0, |m| m.end());
        return Line::Title(line[marker..].trim());
    }

    if line.starts_with("- ") || line.starts_with("* ") || NUMBERED_BULLET.is_match(line) {
        let marker = BULLET_MARKER.find(line).map_or(0, |m| m.end());
        return Line::Bullet(&line[marker..]);
    }

    let lowered = line.to_lowercase();
    if lowered.starts_with("visual") || lowered.contains("image:") {
        let marker = VISUAL_MARKER.find(line).map_or(0, |m| m.end());
        return Line::Visual(line[marker..].trim());
    }

    Line::Other
}

/// Read headings, bullets and visual notes line by line.
///
/// A title line always opens a new slide. Bullets and visual notes seen
/// before the first title are dropped. Returns `None` when no slide was
/// opened at all.
pub fn line_heuristics(raw: &str) -> Option<Vec<SlideRecord>> {
    let mut slides = Vec::new();
    let mut current: Option<SlideRecord> = None;

    for line in raw.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match classify_line(line) {
            Line::Title(title) => {
                if let Some(done) = current.replace(SlideRecord::new(title)) {
                    slides.push(done);
                }
            }
            Line::Bullet(text) => {
                if let Some(slide) = current.as_mut() {
                    slide.content.push(text.to_string());
                }
            }
            Line::Visual(note) => {
                if let Some(slide) = current.as_mut() {
                    slide.visual_note = note.to_string();
                }
            }
            Line::Other => {}
        }
    }
    slides.extend(current);

    (!slides.is_empty()).then_some(slides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn fenced_json_is_parsed() {
        let raw = "```json\n[{\"title\":\"A\",\"content\":[\"x\",\"y\"],\"visual_note\":\"\"}]\n```";
        let slides = extract(raw);
        assert_eq!(slides, vec![SlideRecord::new("A").with_content(["x", "y"])]);
    }

    #[test]
    fn fenced_json_with_surrounding_prose() {
        let raw = "Sure! Here is your deck:\n\n```json\n[\n  {\"title\": \"Intro\", \"content\": [\"Hello\"], \"visual_note\": \"logo\"},\n  {\"title\": \"End\", \"content\": []}\n]\n```\nEnjoy.";
        let slides = extract(raw);
        assert_eq!(
            slides,
            vec![
                SlideRecord::new("Intro").with_content(["Hello"]).with_visual_note("logo"),
                SlideRecord::new("End"),
            ]
        );
    }

    #[test]
    fn plain_fence_is_parsed_too() {
        let raw = "```\n[{\"title\":\"Only\"}]\n```";
        assert_eq!(extract(raw), vec![SlideRecord::new("Only")]);
    }

    #[test]
    fn bare_array_is_recovered() {
        let raw = r#"Result: [{"title": "One", "content": ["a"]}, {"title": "Two", "content": ["b", "c"]}] done"#;
        let slides = extract(raw);
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[1], SlideRecord::new("Two").with_content(["b", "c"]));
    }

    #[test]
    fn whole_text_json_without_fences() {
        let raw = r#"[]"#;
        assert_eq!(whole_text_json(raw), Some(Vec::new()));
        assert_eq!(extract(raw), Vec::new());
    }

    #[test]
    fn pretty_printed_array_is_parsed_whole() {
        let raw = "[\n  {\n    \"title\": \"A\",\n    \"content\": [\"x\"]\n  },\n  {\n    \"title\": \"B\"\n  }\n]";
        assert_eq!(find_embedded_json(raw), None);
        assert_eq!(embedded_json(raw), None);

        let expected = vec![SlideRecord::new("A").with_content(["x"]), SlideRecord::new("B")];
        assert_eq!(whole_text_json(raw), Some(expected.clone()));
        assert_eq!(extract(raw), expected);
    }

    #[test]
    fn missing_and_odd_keys_are_defaulted() {
        let raw = r#"```json
[{"content": "single string"}, 42, {"title": 7, "content": ["ok", null, 3]}]
```"#;
        let slides = extract(raw);
        assert_eq!(
            slides,
            vec![
                SlideRecord::new("").with_content(["single string"]),
                SlideRecord::new("7").with_content(["ok", "3"]),
            ]
        );
    }

    #[test]
    fn json_object_is_not_a_deck() {
        assert_eq!(parse_slide_array(r#"{"title": "x"}"#), None);
        assert_eq!(whole_text_json(r#""just a string""#), None);
    }

    #[test]
    fn broken_fence_falls_through_to_lines() {
        // The fence is matched first, fails to parse, and the whole text is
        // then read line by line; whole-text JSON is never attempted.
        let raw = "```\n# Intro\n- point\n```";
        assert_eq!(embedded_json(raw), None);
        assert_eq!(whole_text_json(raw), None);
        assert_eq!(
            extract(raw),
            vec![SlideRecord::new("Intro").with_content(["point"])]
        );
    }

    #[test]
    fn markdown_outline() {
        let raw = "# Intro\n- point one\n- point two\n\n## Next\n- point three";
        assert_eq!(
            extract(raw),
            vec![
                SlideRecord::new("Intro").with_content(["point one", "point two"]),
                SlideRecord::new("Next").with_content(["point three"]),
            ]
        );
    }

    #[test]
    fn empty_and_unmarked_text_yield_nothing() {
        assert!(extract("").is_empty());
        assert!(extract("random prose with no markers").is_empty());
        assert!(extract("\n\n   \n").is_empty());
    }

    #[test]
    fn title_markers_are_stripped() {
        let raw = "Slide 1: Welcome\n1. Agenda\n2.Roadmap\nSlide Deck Notes\n# 3. Numbered heading";
        let titles: Vec<String> = extract(raw).into_iter().map(|s| s.title).collect();
        assert_eq!(
            titles,
            vec!["Welcome", "Agenda", "Roadmap", "Slide Deck Notes", "Numbered heading"]
        );
    }

    #[test]
    fn bullet_markers_are_stripped() {
        let raw = "# T\n- dash\n* star\n1) first\n2)second\n-not a bullet\n### not a title";
        assert_eq!(
            extract(raw),
            vec![SlideRecord::new("T").with_content(["dash", "star", "first", "second"])]
        );
    }

    #[test]
    fn visual_notes_overwrite_and_strip() {
        let raw = "# Growth\n- revenue up\nVisual: bar chart\nVisual note: line chart instead\n# Team\nimage: group photo";
        let slides = extract(raw);
        assert_eq!(slides[0].visual_note, "line chart instead");
        assert_eq!(slides[1].visual_note, "image: group photo");
    }

    #[test]
    fn content_before_first_title_is_dropped() {
        let raw = "- orphan\nVisual: orphan chart\n# First\n- kept";
        assert_eq!(
            extract(raw),
            vec![SlideRecord::new("First").with_content(["kept"])]
        );
    }

    #[test]
    fn consecutive_titles_make_empty_slides() {
        let raw = "# One\n# Two\n- b";
        assert_eq!(
            extract(raw),
            vec![SlideRecord::new("One"), SlideRecord::new("Two").with_content(["b"])]
        );
    }

    #[test]
    fn bullet_lines_beat_visual_lines() {
        let raw = "# T\n- Visual: this is a bullet";
        let slides = extract(raw);
        assert_eq!(slides[0].content, vec!["Visual: this is a bullet"]);
        assert!(slides[0].visual_note.is_empty());
    }

    proptest! {
        #[test]
        fn never_panics(raw in "\\PC*") {
            let _ = extract(&raw);
        }

        #[test]
        fn outline_order_is_preserved(
            deck in prop::collection::vec(
                ("[A-Za-z][A-Za-z ]{0,20}[A-Za-z]", prop::collection::vec("[a-z][a-z ]{0,30}[a-z]", 0..6)),
                1..8,
            )
        ) {
            let mut raw = String::new();
            for (title, bullets) in &deck {
                raw.push_str(&format!("## {title}\n"));
                for bullet in bullets {
                    raw.push_str(&format!("- {bullet}\n"));
                }
                raw.push('\n');
            }

            let slides = extract(&raw);
            prop_assert_eq!(slides.len(), deck.len());
            for (slide, (title, bullets)) in slides.iter().zip(&deck) {
                prop_assert_eq!(&slide.title, title);
                prop_assert_eq!(&slide.content, bullets);
            }
        }
    }
}
