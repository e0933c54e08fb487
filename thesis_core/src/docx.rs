// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
//! Writes a [`ResolvedLayout`] and [`DocumentSkeleton`] out as a `.docx` package.
//!
//! Only the handful of WordprocessingML parts a template needs are produced:
//! the body, the style sheet, document settings and a footer. Table of contents
//! and page numbers are emitted as fields for the word processor to fill in.
use crate::error::FactoryError;
use crate::layout::{FooterDirective, ParagraphStyle, ResolvedLayout, StyleKind};
use crate::skeleton::{Block, DocumentSkeleton, TitleBlock};
use crate::types::Points;
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::io::{Cursor, Write as _};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const NS_W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// US Letter, in twips.
const PAGE_WIDTH: u32 = 12_240;
const PAGE_HEIGHT: u32 = 15_840;
const HEADER_FOOTER_DISTANCE: u32 = 720;

const TITLE_SIZE: Points = Points(26.0);
const TOC_INSTRUCTION: &str = r#"TOC \o "1-3" \h \z \u"#;
const TOC_PROMPT: &str = "Right-click and choose Update Field to build the table of contents.";

pub const DOCUMENT_PART: &str = "word/document.xml";
pub const STYLES_PART: &str = "word/styles.xml";
pub const SETTINGS_PART: &str = "word/settings.xml";
pub const FOOTER_PART: &str = "word/footer1.xml";

/// Renders the complete `.docx` file in memory.
///
/// Fails with [`FactoryError::InvalidText`] if any text contains a character
/// XML 1.0 cannot represent, since Word refuses to open such a package.
pub fn render_docx(
    layout: &ResolvedLayout,
    skeleton: &DocumentSkeleton,
) -> Result<Vec<u8>, FactoryError> {
    check_text(layout, skeleton)?;

    let parts = [
        ("[Content_Types].xml", content_types()),
        ("_rels/.rels", package_relationships()),
        ("word/_rels/document.xml.rels", document_relationships()),
        (DOCUMENT_PART, document_xml(layout, skeleton)),
        (STYLES_PART, styles_xml(layout)),
        (SETTINGS_PART, settings_xml(layout, skeleton)),
        (FOOTER_PART, footer_xml(layout.footer)),
    ];

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, xml) in parts {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        zip.start_file(name, options)?;
        zip.write_all(xml.as_bytes())
            .map_err(zip::result::ZipError::from)?;
    }
    Ok(zip.finish()?.into_inner())
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..)
}

fn check_str(text: &str) -> Result<(), FactoryError> {
    match text.chars().find(|c| !is_xml_char(*c)) {
        Some(c) => Err(FactoryError::InvalidText {
            text: text.to_owned(),
            code: u32::from(c),
        }),
        None => Ok(()),
    }
}

fn check_text(layout: &ResolvedLayout, skeleton: &DocumentSkeleton) -> Result<(), FactoryError> {
    for style in layout.styles.values() {
        check_str(&style.font_family)?;
    }
    for block in &skeleton.blocks {
        match block {
            Block::Title(title) => {
                check_str(&title.institution)?;
                check_str(&title.subtitle)?;
                for placeholder in &title.placeholders {
                    check_str(placeholder)?;
                }
            }
            Block::Heading { text, .. } | Block::Paragraph { text, .. } => check_str(text)?,
            Block::TableOfContents | Block::PageBreak => {}
        }
    }
    Ok(())
}

fn content_types() -> String {
    const MAIN: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml";
    format!(
        r#"{XML_DECLARATION}<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/{DOCUMENT_PART}" ContentType="{MAIN}.document.main+xml"/><Override PartName="/{STYLES_PART}" ContentType="{MAIN}.styles+xml"/><Override PartName="/{SETTINGS_PART}" ContentType="{MAIN}.settings+xml"/><Override PartName="/{FOOTER_PART}" ContentType="{MAIN}.footer+xml"/></Types>"#
    )
}

fn package_relationships() -> String {
    format!(
        r#"{XML_DECLARATION}<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="{NS_R}/officeDocument" Target="{DOCUMENT_PART}"/></Relationships>"#
    )
}

fn document_relationships() -> String {
    format!(
        r#"{XML_DECLARATION}<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="{NS_R}/styles" Target="styles.xml"/><Relationship Id="rId2" Type="{NS_R}/settings" Target="settings.xml"/><Relationship Id="rId3" Type="{NS_R}/footer" Target="footer1.xml"/></Relationships>"#
    )
}

fn document_xml(layout: &ResolvedLayout, skeleton: &DocumentSkeleton) -> String {
    let mut body = String::new();
    for block in &skeleton.blocks {
        match block {
            Block::Title(title) => push_title(&mut body, title),
            Block::Heading { level, text } => {
                let style = StyleKind::heading(*level).unwrap_or(StyleKind::Heading3);
                push_paragraph(&mut body, Some(style.style_id()), None, text);
            }
            Block::Paragraph { style, text } => {
                let style_id = (*style != StyleKind::Body).then_some(style.style_id());
                push_paragraph(&mut body, style_id, None, text);
            }
            Block::TableOfContents => {
                body.push_str("<w:p>");
                push_field(&mut body, TOC_INSTRUCTION, TOC_PROMPT);
                body.push_str("</w:p>");
            }
            Block::PageBreak => body.push_str(r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#),
        }
    }

    let m = &layout.margins;
    format!(
        r#"{XML_DECLARATION}<w:document xmlns:w="{NS_W}" xmlns:r="{NS_R}"><w:body>{body}<w:sectPr><w:footerReference w:type="default" r:id="rId3"/><w:pgSz w:w="{PAGE_WIDTH}" w:h="{PAGE_HEIGHT}"/><w:pgMar w:top="{}" w:right="{}" w:bottom="{}" w:left="{}" w:header="{HEADER_FOOTER_DISTANCE}" w:footer="{HEADER_FOOTER_DISTANCE}" w:gutter="0"/></w:sectPr></w:body></w:document>"#,
        m.top.to_twips(),
        m.right.to_twips(),
        m.bottom.to_twips(),
        m.left.to_twips(),
    )
}

fn push_title(body: &mut String, title: &TitleBlock) {
    push_paragraph(body, Some("Title"), Some("center"), &title.institution);
    push_paragraph(body, None, Some("center"), &title.subtitle);
    for placeholder in &title.placeholders {
        push_paragraph(body, None, Some("center"), placeholder);
    }
}

fn push_paragraph(body: &mut String, style_id: Option<&str>, justify: Option<&str>, text: &str) {
    body.push_str("<w:p>");
    if style_id.is_some() || justify.is_some() {
        body.push_str("<w:pPr>");
        if let Some(id) = style_id {
            body.push_str(&format!(r#"<w:pStyle w:val="{id}"/>"#));
        }
        if let Some(jc) = justify {
            body.push_str(&format!(r#"<w:jc w:val="{jc}"/>"#));
        }
        body.push_str("</w:pPr>");
    }
    push_run(body, text);
    body.push_str("</w:p>");
}

fn push_run(body: &mut String, text: &str) {
    body.push_str(&format!(
        r#"<w:r><w:t xml:space="preserve">{}</w:t></w:r>"#,
        encode_text(text)
    ));
}

/// Appends a complex field. `placeholder` is shown until the field is updated.
fn push_field(body: &mut String, instruction: &str, placeholder: &str) {
    body.push_str(&format!(
        r#"<w:r><w:fldChar w:fldCharType="begin" w:dirty="true"/></w:r><w:r><w:instrText xml:space="preserve"> {} </w:instrText></w:r><w:r><w:fldChar w:fldCharType="separate"/></w:r>"#,
        encode_text(instruction)
    ));
    push_run(body, placeholder);
    body.push_str(r#"<w:r><w:fldChar w:fldCharType="end"/></w:r>"#);
}

fn styles_xml(layout: &ResolvedLayout) -> String {
    let mut styles = String::new();
    let spacing_line = (layout.line_spacing.multiple() * 240.0).round() as u32;

    for (kind, style) in &layout.styles {
        let mut ppr = String::new();
        match kind.outline_level() {
            Some(level) => {
                ppr.push_str("<w:keepNext/>");
                push_spacing(&mut ppr, style, None);
                ppr.push_str(&format!(r#"<w:outlineLvl w:val="{}"/>"#, level - 1));
            }
            None if *kind == StyleKind::Body => {
                push_spacing(&mut ppr, style, Some(spacing_line));
            }
            None => push_spacing(&mut ppr, style, None),
        }

        let (default_attr, based_on) = if *kind == StyleKind::Body {
            (r#" w:default="1""#, String::new())
        } else {
            (
                "",
                r#"<w:basedOn w:val="Normal"/><w:next w:val="Normal"/>"#.to_owned(),
            )
        };

        styles.push_str(&format!(
            r#"<w:style w:type="paragraph"{default_attr} w:styleId="{}"><w:name w:val="{}"/>{based_on}<w:qFormat/><w:pPr>{ppr}</w:pPr>{}</w:style>"#,
            kind.style_id(),
            word_style_name(*kind),
            run_properties(style)
        ));
    }

    if let Some(body) = layout.style(StyleKind::Body) {
        let title = ParagraphStyle {
            size: TITLE_SIZE,
            ..body.clone()
        };
        styles.push_str(&format!(
            r#"<w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:spacing w:after="300"/><w:jc w:val="center"/></w:pPr>{}</w:style>"#,
            run_properties(&title)
        ));
    }

    format!(r#"{XML_DECLARATION}<w:styles xmlns:w="{NS_W}">{styles}</w:styles>"#)
}

/// Word recognises its built-in styles by these lower-case names.
fn word_style_name(kind: StyleKind) -> String {
    match kind {
        StyleKind::Heading1 | StyleKind::Heading2 | StyleKind::Heading3 => {
            kind.to_string().to_lowercase()
        }
        StyleKind::Body => kind.to_string(),
        StyleKind::Caption => "caption".to_owned(),
    }
}

fn push_spacing(ppr: &mut String, style: &ParagraphStyle, line: Option<u32>) {
    if style.space_before.is_none() && style.space_after.is_none() && line.is_none() {
        return;
    }
    ppr.push_str("<w:spacing");
    if let Some(before) = style.space_before {
        ppr.push_str(&format!(r#" w:before="{}""#, before.to_twips()));
    }
    if let Some(after) = style.space_after {
        ppr.push_str(&format!(r#" w:after="{}""#, after.to_twips()));
    }
    if let Some(line) = line {
        ppr.push_str(&format!(r#" w:line="{line}" w:lineRule="auto""#));
    }
    ppr.push_str("/>");
}

fn run_properties(style: &ParagraphStyle) -> String {
    let font = encode_double_quoted_attribute(&style.font_family);
    let mut rpr = format!(
        r#"<w:rPr><w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:eastAsia="{font}" w:cs="{font}"/>"#
    );
    if style.bold {
        rpr.push_str("<w:b/><w:bCs/>");
    }
    if style.italic {
        rpr.push_str("<w:i/><w:iCs/>");
    }
    if let Some(colour) = style.colour {
        rpr.push_str(&format!(r#"<w:color w:val="{}"/>"#, colour.to_hex()));
    }
    let size = style.size.to_half_points();
    rpr.push_str(&format!(r#"<w:sz w:val="{size}"/><w:szCs w:val="{size}"/></w:rPr>"#));
    rpr
}

fn settings_xml(layout: &ResolvedLayout, skeleton: &DocumentSkeleton) -> String {
    let mirror = if layout.is_mirrored() {
        "<w:mirrorMargins/>"
    } else {
        ""
    };
    let update_fields = if skeleton.has_table_of_contents() {
        r#"<w:updateFields w:val="true"/>"#
    } else {
        ""
    };
    format!(
        r#"{XML_DECLARATION}<w:settings xmlns:w="{NS_W}">{mirror}<w:defaultTabStop w:val="720"/>{update_fields}<w:compat><w:compatSetting w:name="compatibilityMode" w:uri="http://schemas.microsoft.com/office/word" w:val="15"/></w:compat></w:settings>"#
    )
}

fn footer_xml(directive: FooterDirective) -> String {
    let mut paragraph = String::from("<w:p>");
    match directive {
        FooterDirective::CentredPageNumber => {
            paragraph.push_str(r#"<w:pPr><w:jc w:val="center"/></w:pPr>"#);
            push_field(&mut paragraph, "PAGE", "1");
        }
    }
    paragraph.push_str("</w:p>");
    format!(r#"{XML_DECLARATION}<w:ftr xmlns:w="{NS_W}" xmlns:r="{NS_R}">{paragraph}</w:ftr>"#)
}
