//! Assembles every part of a deck and writes them as a ZIP package.

use crate::error::Result;
use crate::slide::slide_xml;
use crate::template::{self, LAYOUT_PARTS, SLIDE_HEIGHT, SLIDE_WIDTH};
use crate::theme::theme_xml;
use crate::xml::{rel, relationships, NS_A, NS_P, NS_R, XML_DECL};
use chrono::{DateTime, Utc};
use deck_common::DeckPlan;
use std::fmt::Write as _;
use std::io::{Seek, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// One deck plan, ready to serialise.
pub struct DeckPackage<'a> {
    plan: &'a DeckPlan,
    created: DateTime<Utc>,
}

impl<'a> DeckPackage<'a> {
    pub fn new(plan: &'a DeckPlan) -> Self {
        Self {
            plan,
            created: Utc::now(),
        }
    }

    /// Every part as `(zip path, xml)`, content types first.
    pub fn parts(&self) -> Result<Vec<(String, String)>> {
        let slide_count = self.plan.instructions.len();
        let mut parts = Vec::with_capacity(16 + slide_count * 2);

        parts.push(("[Content_Types].xml".to_string(), template::content_types(slide_count)?));
        parts.push((
            "_rels/.rels".to_string(),
            relationships(&[
                ("rId1".to_string(), rel::OFFICE_DOCUMENT, "ppt/presentation.xml".to_string()),
                ("rId2".to_string(), rel::CORE_PROPS, "docProps/core.xml".to_string()),
                ("rId3".to_string(), rel::EXTENDED_PROPS, "docProps/app.xml".to_string()),
            ]),
        ));
        parts.push((
            "docProps/core.xml".to_string(),
            template::core_properties(&self.plan.topic, self.created),
        ));
        parts.push(("docProps/app.xml".to_string(), template::app_properties(slide_count)));

        parts.push(("ppt/presentation.xml".to_string(), self.presentation_xml()?));
        parts.push((
            "ppt/_rels/presentation.xml.rels".to_string(),
            self.presentation_rels(),
        ));
        parts.push(("ppt/presProps.xml".to_string(), template::pres_props()));
        parts.push(("ppt/viewProps.xml".to_string(), template::view_props()));
        parts.push(("ppt/tableStyles.xml".to_string(), template::table_styles()));
        parts.push((
            "ppt/theme/theme1.xml".to_string(),
            theme_xml(self.plan.theme_name.display_name(), &self.plan.theme)?,
        ));

        parts.push(("ppt/slideMasters/slideMaster1.xml".to_string(), template::slide_master()?));
        let mut master_rels: Vec<(String, &str, String)> = LAYOUT_PARTS
            .iter()
            .enumerate()
            .map(|(i, layout)| {
                (format!("rId{}", i + 1), rel::SLIDE_LAYOUT, format!("../slideLayouts/{layout}"))
            })
            .collect();
        master_rels.push((
            format!("rId{}", LAYOUT_PARTS.len() + 1),
            rel::THEME,
            "../theme/theme1.xml".to_string(),
        ));
        parts.push((
            "ppt/slideMasters/_rels/slideMaster1.xml.rels".to_string(),
            relationships(&master_rels),
        ));

        for (i, layout) in LAYOUT_PARTS.iter().enumerate() {
            parts.push((format!("ppt/slideLayouts/{layout}"), template::slide_layout(i)?));
            parts.push((
                format!("ppt/slideLayouts/_rels/{layout}.rels"),
                relationships(&[(
                    "rId1".to_string(),
                    rel::SLIDE_MASTER,
                    "../slideMasters/slideMaster1.xml".to_string(),
                )]),
            ));
        }

        for (i, instruction) in self.plan.instructions.iter().enumerate() {
            let n = i + 1;
            parts.push((
                format!("ppt/slides/slide{n}.xml"),
                slide_xml(instruction, &self.plan.theme)?,
            ));
            let layout = layout_part(instruction.layout().index());
            parts.push((
                format!("ppt/slides/_rels/slide{n}.xml.rels"),
                relationships(&[(
                    "rId1".to_string(),
                    rel::SLIDE_LAYOUT,
                    format!("../slideLayouts/{layout}"),
                )]),
            ));
        }

        Ok(parts)
    }

    fn presentation_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(1024 + self.plan.instructions.len() * 48);
        xml.push_str(XML_DECL);
        write!(
            xml,
            r#"<p:presentation xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}" saveSubsetFonts="1">"#
        )?;
        xml.push_str(r#"<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>"#);
        if !self.plan.instructions.is_empty() {
            xml.push_str("<p:sldIdLst>");
            for i in 0..self.plan.instructions.len() {
                write!(xml, r#"<p:sldId id="{}" r:id="rId{}"/>"#, 256 + i, i + 2)?;
            }
            xml.push_str("</p:sldIdLst>");
        }
        write!(
            xml,
            r#"<p:sldSz cx="{SLIDE_WIDTH}" cy="{SLIDE_HEIGHT}" type="screen4x3"/><p:notesSz cx="{SLIDE_HEIGHT}" cy="{SLIDE_WIDTH}"/>"#
        )?;
        xml.push_str("</p:presentation>");
        Ok(xml)
    }

    /// rId1 is the master, slides follow from rId2, then the shared parts.
    fn presentation_rels(&self) -> String {
        let slide_count = self.plan.instructions.len();
        let mut entries = Vec::with_capacity(slide_count + 5);
        entries.push((
            "rId1".to_string(),
            rel::SLIDE_MASTER,
            "slideMasters/slideMaster1.xml".to_string(),
        ));
        for i in 0..slide_count {
            entries.push((format!("rId{}", i + 2), rel::SLIDE, format!("slides/slide{}.xml", i + 1)));
        }
        let shared = [
            (rel::PRES_PROPS, "presProps.xml"),
            (rel::VIEW_PROPS, "viewProps.xml"),
            (rel::THEME, "theme/theme1.xml"),
            (rel::TABLE_STYLES, "tableStyles.xml"),
        ];
        for (offset, (kind, target)) in shared.into_iter().enumerate() {
            entries.push((format!("rId{}", slide_count + 2 + offset), kind, target.to_string()));
        }
        relationships(&entries)
    }

    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let mut zip = ZipWriter::new(writer);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        for (name, xml) in self.parts()? {
            zip.start_file(name, options)?;
            zip.write_all(xml.as_bytes())?;
        }
        zip.finish()?;
        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::File::create(path)?;
        self.write_to(std::io::BufWriter::new(file))
    }
}

/// Layout part for a master layout index; anything past the shipped layouts
/// falls back to title and content.
fn layout_part(index: usize) -> &'static str {
    LAYOUT_PARTS.get(index).copied().unwrap_or(LAYOUT_PARTS[1])
}
