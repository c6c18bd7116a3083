//! Fixed package parts: content types, document properties, the slide
//! master and its layouts.
//!
//! Only the first three master layouts are shipped (title slide, title and
//! content, section header); a deck plan never selects the others.

use crate::xml::{text, NS_A, NS_P, NS_R, XML_DECL};
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::Write as _;

/// 10" x 7.5" in EMU (914400 per inch).
pub const SLIDE_WIDTH: i64 = 9_144_000;
pub const SLIDE_HEIGHT: i64 = 6_858_000;

const CT_PRESENTATION: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
const CT_SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
const CT_SLIDE_LAYOUT: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml";
const CT_SLIDE_MASTER: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml";
const CT_THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";
const CT_PRES_PROPS: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presProps+xml";
const CT_VIEW_PROPS: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.viewProps+xml";
const CT_TABLE_STYLES: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.tableStyles+xml";
const CT_CORE: &str = "application/vnd.openxmlformats-package.core-properties+xml";
const CT_APP: &str = "application/vnd.openxmlformats-officedocument.extended-properties+xml";

/// Layout parts in master order, indexed like `SlideLayout::index`.
pub const LAYOUT_PARTS: [&str; 3] = ["slideLayout1.xml", "slideLayout2.xml", "slideLayout3.xml"];

pub fn content_types(slide_count: usize) -> Result<String, std::fmt::Error> {
    let mut xml = String::with_capacity(2048 + slide_count * 160);
    xml.push_str(XML_DECL);
    xml.push_str(
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    );
    xml.push_str(r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#);
    xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);

    let fixed = [
        ("/ppt/presentation.xml", CT_PRESENTATION),
        ("/ppt/slideMasters/slideMaster1.xml", CT_SLIDE_MASTER),
        ("/ppt/theme/theme1.xml", CT_THEME),
        ("/ppt/presProps.xml", CT_PRES_PROPS),
        ("/ppt/viewProps.xml", CT_VIEW_PROPS),
        ("/ppt/tableStyles.xml", CT_TABLE_STYLES),
        ("/docProps/core.xml", CT_CORE),
        ("/docProps/app.xml", CT_APP),
    ];
    for (part, content_type) in fixed {
        write!(xml, r#"<Override PartName="{part}" ContentType="{content_type}"/>"#)?;
    }
    for layout in LAYOUT_PARTS {
        write!(
            xml,
            r#"<Override PartName="/ppt/slideLayouts/{layout}" ContentType="{CT_SLIDE_LAYOUT}"/>"#
        )?;
    }
    for n in 1..=slide_count {
        write!(
            xml,
            r#"<Override PartName="/ppt/slides/slide{n}.xml" ContentType="{CT_SLIDE}"/>"#
        )?;
    }

    xml.push_str("</Types>");
    Ok(xml)
}

pub fn core_properties(title: &str, created: DateTime<Utc>) -> String {
    let stamp = created.to_rfc3339_opts(SecondsFormat::Secs, true);
    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECL);
    xml.push_str(r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#);
    xml.push_str(&format!("<dc:title>{}</dc:title>", text(title)));
    xml.push_str("<dc:creator>Smart Presentation Generator</dc:creator>");
    xml.push_str(&format!(
        r#"<dcterms:created xsi:type="dcterms:W3CDTF">{stamp}</dcterms:created>"#
    ));
    xml.push_str(&format!(
        r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{stamp}</dcterms:modified>"#
    ));
    xml.push_str("</cp:coreProperties>");
    xml
}

pub fn app_properties(slide_count: usize) -> String {
    format!(
        r#"{XML_DECL}<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes"><Application>deckgen</Application><PresentationFormat>On-screen Show (4:3)</PresentationFormat><Slides>{slide_count}</Slides></Properties>"#
    )
}

pub fn pres_props() -> String {
    format!(r#"{XML_DECL}<p:presentationPr xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}"/>"#)
}

pub fn view_props() -> String {
    format!(
        r#"{XML_DECL}<p:viewPr xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}"><p:normalViewPr><p:restoredLeft sz="15620"/><p:restoredTop sz="94660"/></p:normalViewPr><p:gridSpacing cx="76200" cy="76200"/></p:viewPr>"#
    )
}

pub fn table_styles() -> String {
    format!(
        r#"{XML_DECL}<a:tblStyleLst xmlns:a="{NS_A}" def="{{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}}"/>"#
    )
}

/// Group shape header every `spTree` starts with.
pub const SP_TREE_HEADER: &str = r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#;

/// Placeholder geometry `(x, y, cx, cy)` in EMU.
pub mod frame {
    pub type Rect = (i64, i64, i64, i64);

    pub const CENTER_TITLE: Rect = (685_800, 2_130_425, 7_772_400, 1_470_025);
    pub const SUBTITLE: Rect = (1_371_600, 3_886_200, 6_400_800, 1_752_600);
    pub const TITLE: Rect = (457_200, 274_638, 8_229_600, 1_143_000);
    pub const BODY: Rect = (457_200, 1_600_200, 8_229_600, 4_525_963);
    pub const SECTION_TITLE: Rect = (722_313, 4_406_900, 7_772_400, 1_362_075);
    pub const SECTION_TEXT: Rect = (722_313, 2_906_713, 7_772_400, 1_500_187);
}

pub fn xfrm(xml: &mut String, (x, y, cx, cy): frame::Rect) -> Result<(), std::fmt::Error> {
    write!(
        xml,
        r#"<a:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#
    )
}

/// An empty placeholder shape as it appears on a master or layout.
fn placeholder(
    xml: &mut String,
    id: u32,
    name: &str,
    ph: &str,
    rect: frame::Rect,
) -> Result<(), std::fmt::Error> {
    write!(
        xml,
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="{name}"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr>{ph}</p:nvPr></p:nvSpPr><p:spPr>"#
    )?;
    xfrm(xml, rect)?;
    xml.push_str(r#"</p:spPr><p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:endParaRPr lang="en-US"/></a:p></p:txBody></p:sp>"#);
    Ok(())
}

pub fn slide_master() -> Result<String, std::fmt::Error> {
    let mut xml = String::with_capacity(4096);
    xml.push_str(XML_DECL);
    write!(xml, r#"<p:sldMaster xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}">"#)?;
    xml.push_str(r#"<p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg><p:spTree>"#);
    xml.push_str(SP_TREE_HEADER);
    placeholder(&mut xml, 2, "Title Placeholder 1", r#"<p:ph type="title"/>"#, frame::TITLE)?;
    placeholder(
        &mut xml,
        3,
        "Text Placeholder 2",
        r#"<p:ph type="body" idx="1"/>"#,
        frame::BODY,
    )?;
    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str(r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>"#);
    xml.push_str("<p:sldLayoutIdLst>");
    for i in 0..LAYOUT_PARTS.len() {
        write!(xml, r#"<p:sldLayoutId id="{}" r:id="rId{}"/>"#, 2_147_483_649_u64 + i as u64, i + 1)?;
    }
    xml.push_str("</p:sldLayoutIdLst>");
    xml.push_str("<p:txStyles>");
    xml.push_str(r#"<p:titleStyle><a:lvl1pPr algn="ctr" defTabSz="914400" rtl="0" eaLnBrk="1" latinLnBrk="0" hangingPunct="1"><a:spcBef><a:spcPct val="0"/></a:spcBef><a:buNone/><a:defRPr sz="4400" kern="1200"><a:solidFill><a:schemeClr val="tx2"/></a:solidFill><a:latin typeface="+mj-lt"/><a:ea typeface="+mj-ea"/><a:cs typeface="+mj-cs"/></a:defRPr></a:lvl1pPr></p:titleStyle>"#);
    xml.push_str(r#"<p:bodyStyle><a:lvl1pPr marL="342900" indent="-342900" algn="l" defTabSz="914400" rtl="0" eaLnBrk="1" latinLnBrk="0" hangingPunct="1"><a:spcBef><a:spcPct val="20000"/></a:spcBef><a:buFont typeface="Arial"/><a:buChar char="&#8226;"/><a:defRPr sz="3200" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill><a:latin typeface="+mn-lt"/><a:ea typeface="+mn-ea"/><a:cs typeface="+mn-cs"/></a:defRPr></a:lvl1pPr></p:bodyStyle>"#);
    xml.push_str(r#"<p:otherStyle><a:defPPr><a:defRPr lang="en-US"/></a:defPPr></p:otherStyle>"#);
    xml.push_str("</p:txStyles></p:sldMaster>");
    Ok(xml)
}

/// Layout part for `LAYOUT_PARTS[index]`; unknown indices get title and content.
pub fn slide_layout(index: usize) -> Result<String, std::fmt::Error> {
    let mut xml = String::with_capacity(2048);
    xml.push_str(XML_DECL);
    let (kind, name) = match index {
        0 => ("title", "Title Slide"),
        2 => ("secHead", "Section Header"),
        _ => ("obj", "Title and Content"),
    };
    write!(
        xml,
        r#"<p:sldLayout xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}" type="{kind}" preserve="1"><p:cSld name="{name}"><p:spTree>"#
    )?;
    xml.push_str(SP_TREE_HEADER);
    match index {
        0 => {
            placeholder(&mut xml, 2, "Title 1", r#"<p:ph type="ctrTitle"/>"#, frame::CENTER_TITLE)?;
            placeholder(
                &mut xml,
                3,
                "Subtitle 2",
                r#"<p:ph type="subTitle" idx="1"/>"#,
                frame::SUBTITLE,
            )?;
        }
        2 => {
            placeholder(&mut xml, 2, "Title 1", r#"<p:ph type="title"/>"#, frame::SECTION_TITLE)?;
            placeholder(
                &mut xml,
                3,
                "Text Placeholder 2",
                r#"<p:ph type="body" idx="1"/>"#,
                frame::SECTION_TEXT,
            )?;
        }
        _ => {
            placeholder(&mut xml, 2, "Title 1", r#"<p:ph type="title"/>"#, frame::TITLE)?;
            placeholder(&mut xml, 3, "Content Placeholder 2", r#"<p:ph idx="1"/>"#, frame::BODY)?;
        }
    }
    xml.push_str(r#"</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"#);
    Ok(xml)
}
