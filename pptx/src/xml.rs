//! Shared namespaces and text escaping for generated parts.

use quick_xml::escape::escape;
use std::borrow::Cow;

pub const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

pub const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
pub const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub const NS_PKG_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// Relationship type URIs.
pub mod rel {
    pub const OFFICE_DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const CORE_PROPS: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
    pub const EXTENDED_PROPS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
    pub const SLIDE_MASTER: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
    pub const SLIDE_LAYOUT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
    pub const SLIDE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
    pub const THEME: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";
    pub const PRES_PROPS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/presProps";
    pub const VIEW_PROPS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/viewProps";
    pub const TABLE_STYLES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/tableStyles";
}

/// Escape `raw` for element or attribute content, dropping characters XML 1.0
/// cannot carry at all.
pub fn text(raw: &str) -> Cow<'_, str> {
    if raw.chars().all(is_xml_char) {
        escape(raw)
    } else {
        let cleaned: String = raw.chars().filter(|c| is_xml_char(*c)).collect();
        Cow::Owned(escape(cleaned.as_str()).into_owned())
    }
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r') || (c >= ' ' && !matches!(c, '\u{FFFE}' | '\u{FFFF}'))
}

/// A `.rels` part: `(id, type, target)` triples.
pub fn relationships(entries: &[(String, &str, String)]) -> String {
    let mut xml = String::with_capacity(256 + entries.len() * 160);
    xml.push_str(XML_DECL);
    xml.push_str(&format!(r#"<Relationships xmlns="{NS_PKG_REL}">"#));
    for (id, kind, target) in entries {
        xml.push_str(&format!(
            r#"<Relationship Id="{id}" Type="{kind}" Target="{}"/>"#,
            text(target)
        ));
    }
    xml.push_str("</Relationships>");
    xml
}
