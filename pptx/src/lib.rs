//! Office Open XML (`.pptx`) writer for deck plans.

pub mod error;
pub mod package;
pub mod slide;
pub mod template;
pub mod theme;
mod xml;

pub use error::{PptxError, Result};
pub use package::DeckPackage;

use deck_common::{DeckPlan, DeckRenderer};
use std::path::Path;

/// Renders a [`DeckPlan`] to a `.pptx` file.
#[derive(Debug, Clone, Copy, Default)]
pub struct PptxRenderer;

impl PptxRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl DeckRenderer for PptxRenderer {
    fn render(&self, plan: &DeckPlan, path: &Path) -> anyhow::Result<()> {
        tracing::debug!(path = %path.display(), slides = plan.slide_count(), "writing pptx");
        DeckPackage::new(plan).save(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_common::{SlideInstruction, SlideKind, SlideLayout, SlideRecord, ThemeName};
    use std::io::Read;

    fn plan() -> DeckPlan {
        let slides = vec![
            SlideRecord::new("Agenda")
                .with_content(["Background", "Findings"])
                .with_visual_note("timeline graphic"),
            SlideRecord::new("Findings").with_content(["Growth & risk", "Outlook"]),
        ];
        let mut instructions = vec![SlideInstruction::Title {
            title: "Market <Review>".to_string(),
            subtitle: "Created with Smart Presentation Generator".to_string(),
        }];
        for (record, (kind, layout)) in slides.iter().zip([
            (SlideKind::Agenda, SlideLayout::SectionHeader),
            (SlideKind::Standard, SlideLayout::TitleAndContent),
        ]) {
            instructions.push(SlideInstruction::Content {
                title: record.title.clone(),
                bullets: record.content.clone(),
                kind,
                layout,
            });
        }
        DeckPlan {
            topic: "Market <Review>".to_string(),
            theme_name: ThemeName::Creative,
            theme: ThemeName::Creative.settings().clone(),
            slides,
            instructions,
            output_name: "Market_Review_0123abcd.pptx".to_string(),
        }
    }

    fn read_part(archive: &mut zip::ZipArchive<std::fs::File>, name: &str) -> String {
        let mut part = archive.by_name(name).unwrap();
        let mut text = String::new();
        part.read_to_string(&mut text).unwrap();
        text
    }

    #[test]
    fn writes_complete_package() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deck.pptx");
        PptxRenderer::new().render(&plan(), &path).unwrap();

        let mut archive = zip::ZipArchive::new(std::fs::File::open(&path).unwrap()).unwrap();
        let names: Vec<String> = archive.file_names().map(str::to_string).collect();
        for expected in [
            "[Content_Types].xml",
            "_rels/.rels",
            "docProps/core.xml",
            "docProps/app.xml",
            "ppt/presentation.xml",
            "ppt/_rels/presentation.xml.rels",
            "ppt/theme/theme1.xml",
            "ppt/slideMasters/slideMaster1.xml",
            "ppt/slideLayouts/slideLayout1.xml",
            "ppt/slideLayouts/slideLayout2.xml",
            "ppt/slideLayouts/slideLayout3.xml",
            "ppt/slideLayouts/_rels/slideLayout3.xml.rels",
            "ppt/slides/slide1.xml",
            "ppt/slides/slide3.xml",
            "ppt/slides/_rels/slide3.xml.rels",
        ] {
            assert!(names.iter().any(|n| n == expected), "missing {expected}");
        }
        assert!(!names.iter().any(|n| n == "ppt/slides/slide4.xml"));

        let presentation = read_part(&mut archive, "ppt/presentation.xml");
        assert_eq!(presentation.matches("<p:sldId ").count(), 3);
        assert!(presentation.contains(r#"<p:sldSz cx="9144000" cy="6858000""#));

        let rels = read_part(&mut archive, "ppt/_rels/presentation.xml.rels");
        assert!(rels.contains(r#"Id="rId4" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide3.xml""#));
        assert!(rels.contains(r#"Id="rId7" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme""#));
    }

    #[test]
    fn slides_follow_plan_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.pptx");
        PptxRenderer::new().render(&plan(), &path).unwrap();
        let mut archive = zip::ZipArchive::new(std::fs::File::open(&path).unwrap()).unwrap();

        let title = read_part(&mut archive, "ppt/slides/slide1.xml");
        assert!(title.contains("<a:t>Market &lt;Review&gt;</a:t>"));
        assert!(title.contains("<a:t>Created with Smart Presentation Generator</a:t>"));
        let title_rels = read_part(&mut archive, "ppt/slides/_rels/slide1.xml.rels");
        assert!(title_rels.contains("../slideLayouts/slideLayout1.xml"));

        let agenda = read_part(&mut archive, "ppt/slides/slide2.xml");
        assert!(agenda.contains("<a:t>Agenda</a:t>"));
        assert!(agenda.contains("<a:t>Background</a:t>"));
        assert!(!agenda.contains("timeline graphic"));
        let agenda_rels = read_part(&mut archive, "ppt/slides/_rels/slide2.xml.rels");
        assert!(agenda_rels.contains("../slideLayouts/slideLayout3.xml"));

        let findings = read_part(&mut archive, "ppt/slides/slide3.xml");
        let findings_rels = read_part(&mut archive, "ppt/slides/_rels/slide3.xml.rels");
        assert!(findings_rels.contains("../slideLayouts/slideLayout2.xml"));
        assert!(findings.contains("<a:t>Growth &amp; risk</a:t>"));
        assert!(findings.contains(r#"<a:srgbClr val="F0F8FF"/>"#));
    }

    #[test]
    fn title_only_deck_renders() {
        let mut plan = plan();
        plan.slides.clear();
        plan.instructions.truncate(1);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("title_only.pptx");
        PptxRenderer::new().render(&plan, &path).unwrap();

        let mut archive = zip::ZipArchive::new(std::fs::File::open(&path).unwrap()).unwrap();
        let app = read_part(&mut archive, "docProps/app.xml");
        assert!(app.contains("<Slides>1</Slides>"));
    }

    #[test]
    fn unwritable_target_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"not a directory").unwrap();
        let result = PptxRenderer::new().render(&plan(), &blocker.join("deck.pptx"));
        assert!(result.is_err());
    }
}
