//! Slide parts.

use crate::template::{frame, xfrm, SP_TREE_HEADER};
use crate::xml::{text, NS_A, NS_P, NS_R, XML_DECL};
use deck_common::{Rgb, SlideInstruction, SlideLayout, Theme};
use std::fmt::Write as _;

/// Run formatting applied to every paragraph of one text body.
struct RunStyle<'a> {
    font: &'a str,
    size_pt: u16,
    color: Rgb,
}

impl<'a> RunStyle<'a> {
    fn title(theme: &'a Theme) -> Self {
        Self {
            font: theme.title_font.as_ref(),
            size_pt: theme.title_font_size,
            color: theme.title_color,
        }
    }

    fn content(theme: &'a Theme) -> Self {
        Self {
            font: theme.content_font.as_ref(),
            size_pt: theme.content_font_size,
            color: theme.content_color,
        }
    }

    fn write(&self, xml: &mut String, tag: &str) -> std::fmt::Result {
        write!(
            xml,
            r#"<a:{tag} lang="en-US" sz="{}" dirty="0"><a:solidFill><a:srgbClr val="{}"/></a:solidFill><a:latin typeface="{}"/></a:{tag}>"#,
            u32::from(self.size_pt) * 100,
            self.color.hex(),
            text(self.font)
        )
    }
}

pub fn slide_xml(instruction: &SlideInstruction, theme: &Theme) -> Result<String, std::fmt::Error> {
    let mut xml = String::with_capacity(4096);
    xml.push_str(XML_DECL);
    write!(xml, r#"<p:sld xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}">"#)?;

    xml.push_str("<p:cSld>");
    // The background must precede the shape tree.
    write!(
        xml,
        r#"<p:bg><p:bgPr><a:solidFill><a:srgbClr val="{}"/></a:solidFill><a:effectLst/></p:bgPr></p:bg>"#,
        theme.background_color.hex()
    )?;
    xml.push_str("<p:spTree>");
    xml.push_str(SP_TREE_HEADER);

    match instruction {
        SlideInstruction::Title { title, subtitle } => {
            let title_shape = TextShape {
                id: 2,
                name: "Title 1",
                placeholder: r#"<p:ph type="ctrTitle"/>"#,
                rect: frame::CENTER_TITLE,
            };
            title_shape.write(&mut xml, std::slice::from_ref(title), &RunStyle::title(theme))?;

            let subtitle_shape = TextShape {
                id: 3,
                name: "Subtitle 2",
                placeholder: r#"<p:ph type="subTitle" idx="1"/>"#,
                rect: frame::SUBTITLE,
            };
            subtitle_shape.write(
                &mut xml,
                std::slice::from_ref(subtitle),
                &RunStyle::content(theme),
            )?;
        }
        SlideInstruction::Content {
            title,
            bullets,
            layout,
            ..
        } => {
            let section = *layout == SlideLayout::SectionHeader;
            let title_shape = TextShape {
                id: 2,
                name: "Title 1",
                placeholder: r#"<p:ph type="title"/>"#,
                rect: if section { frame::SECTION_TITLE } else { frame::TITLE },
            };
            title_shape.write(&mut xml, std::slice::from_ref(title), &RunStyle::title(theme))?;

            let body_shape = if section {
                TextShape {
                    id: 3,
                    name: "Text Placeholder 2",
                    placeholder: r#"<p:ph type="body" idx="1"/>"#,
                    rect: frame::SECTION_TEXT,
                }
            } else {
                TextShape {
                    id: 3,
                    name: "Content Placeholder 2",
                    placeholder: r#"<p:ph idx="1"/>"#,
                    rect: frame::BODY,
                }
            };
            body_shape.write(&mut xml, bullets, &RunStyle::content(theme))?;
        }
    }

    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>");
    Ok(xml)
}

struct TextShape {
    id: u32,
    name: &'static str,
    placeholder: &'static str,
    rect: frame::Rect,
}

impl TextShape {
    /// One level-0 paragraph per entry of `paragraphs`.
    fn write(&self, xml: &mut String, paragraphs: &[String], style: &RunStyle<'_>) -> std::fmt::Result {
        write!(
            xml,
            r#"<p:sp><p:nvSpPr><p:cNvPr id="{}" name="{}"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr>{}</p:nvPr></p:nvSpPr><p:spPr>"#,
            self.id, self.name, self.placeholder
        )?;
        xfrm(xml, self.rect)?;
        xml.push_str("</p:spPr><p:txBody><a:bodyPr/><a:lstStyle/>");

        if paragraphs.is_empty() {
            xml.push_str("<a:p>");
            style.write(xml, "endParaRPr")?;
            xml.push_str("</a:p>");
        }
        for paragraph in paragraphs {
            xml.push_str(r#"<a:p><a:pPr lvl="0"/><a:r>"#);
            style.write(xml, "rPr")?;
            write!(xml, "<a:t>{}</a:t></a:r></a:p>", text(paragraph))?;
        }

        xml.push_str("</p:txBody></p:sp>");
        Ok(())
    }
}
