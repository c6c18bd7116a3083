//! `ppt/theme/theme1.xml` derived from a deck theme.
//!
//! Colour scheme mapping: `dk1` is the content colour, `lt1` the background,
//! `dk2` the title colour and `accent1`/`hlink` the accent colour. The major
//! font is the title font and the minor font the content font.

use crate::xml::{text, NS_A, XML_DECL};
use deck_common::{Rgb, Theme};
use std::fmt::Write as _;

/// Accents 2 to 6, which deck themes do not define.
const SECONDARY_ACCENTS: [Rgb; 5] = [
    Rgb(0xED, 0x7D, 0x31),
    Rgb(0xA5, 0xA5, 0xA5),
    Rgb(0xFF, 0xC0, 0x00),
    Rgb(0x5B, 0x9B, 0xD5),
    Rgb(0x70, 0xAD, 0x47),
];
const FOLLOWED_LINK: Rgb = Rgb(0x95, 0x4F, 0x72);

pub fn theme_xml(name: &str, theme: &Theme) -> Result<String, std::fmt::Error> {
    let mut xml = String::with_capacity(4096);
    xml.push_str(XML_DECL);
    write!(xml, r#"<a:theme xmlns:a="{NS_A}" name="{}">"#, text(name))?;
    xml.push_str("<a:themeElements>");

    write!(xml, r#"<a:clrScheme name="{}">"#, text(name))?;
    let mut color = |slot: &str, rgb: Rgb| {
        write!(xml, r#"<a:{slot}><a:srgbClr val="{}"/></a:{slot}>"#, rgb.hex())
    };
    color("dk1", theme.content_color)?;
    color("lt1", theme.background_color)?;
    color("dk2", theme.title_color)?;
    color("lt2", theme.background_color)?;
    color("accent1", theme.accent_color)?;
    for (i, rgb) in SECONDARY_ACCENTS.iter().enumerate() {
        color(&format!("accent{}", i + 2), *rgb)?;
    }
    color("hlink", theme.accent_color)?;
    color("folHlink", FOLLOWED_LINK)?;
    xml.push_str("</a:clrScheme>");

    write!(xml, r#"<a:fontScheme name="{}">"#, text(name))?;
    for (tag, font) in [("majorFont", &theme.title_font), ("minorFont", &theme.content_font)] {
        write!(
            xml,
            r#"<a:{tag}><a:latin typeface="{}"/><a:ea typeface=""/><a:cs typeface=""/></a:{tag}>"#,
            text(font)
        )?;
    }
    xml.push_str("</a:fontScheme>");

    format_scheme(&mut xml);
    xml.push_str("</a:themeElements><a:objectDefaults/><a:extraClrSchemeLst/></a:theme>");
    Ok(xml)
}

/// Flat fills, lines and effects; three of each as the schema requires.
fn format_scheme(xml: &mut String) {
    const SOLID: &str = r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#;
    xml.push_str(r#"<a:fmtScheme name="Deck">"#);
    xml.push_str("<a:fillStyleLst>");
    for _ in 0..3 {
        xml.push_str(SOLID);
    }
    xml.push_str("</a:fillStyleLst><a:lnStyleLst>");
    for width in [9525, 25400, 38100] {
        xml.push_str(&format!(
            r#"<a:ln w="{width}" cap="flat" cmpd="sng" algn="ctr">{SOLID}<a:prstDash val="solid"/></a:ln>"#
        ));
    }
    xml.push_str("</a:lnStyleLst><a:effectStyleLst>");
    for _ in 0..3 {
        xml.push_str("<a:effectStyle><a:effectLst/></a:effectStyle>");
    }
    xml.push_str("</a:effectStyleLst><a:bgFillStyleLst>");
    for _ in 0..3 {
        xml.push_str(SOLID);
    }
    xml.push_str("</a:bgFillStyleLst></a:fmtScheme>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_common::ThemeName;

    #[test]
    fn colours_and_fonts_come_from_theme() {
        let theme = ThemeName::Tech.settings();
        let xml = theme_xml("Tech", theme).unwrap();

        assert!(xml.contains(&format!(
            r#"<a:lt1><a:srgbClr val="{}"/></a:lt1>"#,
            theme.background_color.hex()
        )));
        assert!(xml.contains(&format!(
            r#"<a:dk2><a:srgbClr val="{}"/></a:dk2>"#,
            theme.title_color.hex()
        )));
        assert!(xml.contains(&format!(
            r#"<a:accent1><a:srgbClr val="{}"/></a:accent1>"#,
            theme.accent_color.hex()
        )));
        assert!(xml.contains(&format!(
            r#"<a:majorFont><a:latin typeface="{}"/>"#,
            theme.title_font
        )));
        assert!(xml.contains("<a:accent6>"));
        assert_eq!(xml.matches("<a:effectStyle>").count(), 3);
    }

    #[test]
    fn font_names_are_escaped() {
        let mut theme = ThemeName::Minimal.settings().clone();
        theme.content_font = "Fira \"Sans\"".into();
        let xml = theme_xml("Custom & Co", &theme).unwrap();
        assert!(xml.contains(r#"name="Custom &amp; Co""#));
        assert!(xml.contains("Fira &quot;Sans&quot;"));
    }
}
