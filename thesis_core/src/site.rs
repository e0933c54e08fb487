// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
//! Static HTML pages: one landing page per institution plus a searchable index.
use crate::layout::ResolvedLayout;
use crate::profile::{DEFAULT_COURSE_NAME, DEFAULT_UNI_NAME, InstitutionProfile, record_id};
use crate::slug::output_dir_name;
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use serde::Serialize;

const BASE_CSS: &str = r#"body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif; line-height: 1.6; color: #333; max-width: 800px; margin: 0 auto; padding: 20px; }"#;

const LANDING_CSS: &str = r#"h1 { color: #2c3e50; }
        .download-btn { display: inline-block; background-color: #007bff; color: white; padding: 15px 30px; text-decoration: none; border-radius: 5px; font-weight: bold; margin: 20px 0; }
        .download-btn:hover { background-color: #0056b3; }
        table { width: 100%; border-collapse: collapse; margin: 20px 0; }
        th, td { border: 1px solid #ddd; padding: 12px; text-align: left; }
        th { background-color: #f8f9fa; }
        .breadcrumb { font-size: 0.9em; color: #666; margin-bottom: 20px; }
        .breadcrumb a { color: #007bff; text-decoration: none; }
        .notice { padding: 12px 16px; border-radius: 5px; margin: 20px 0; }
        .notice.stale { background-color: #fff3cd; border: 1px solid #ffe69c; color: #664d03; }
        .notice.current { background-color: #d1e7dd; border: 1px solid #a3cfbb; color: #0a3622; }"#;

const INDEX_CSS: &str = r#"#search { width: 100%; padding: 15px; font-size: 16px; border: 1px solid #ddd; border-radius: 5px; margin-bottom: 20px; box-sizing: border-box; }
        ul { list-style: none; padding: 0; }
        li { padding: 10px; border-bottom: 1px solid #eee; }
        li a { text-decoration: none; color: #007bff; display: block; }
        li a:hover { background-color: #f8f9fa; }
        #empty { display: none; color: #666; }"#;

const FILTER_SCRIPT: &str = r#"function filterList() {
            var filter = document.getElementById('search').value.toUpperCase();
            var items = document.getElementById('uniList').getElementsByTagName('li');
            var shown = 0;
            for (var i = 0; i < items.length; i++) {
                var a = items[i].getElementsByTagName('a')[0];
                var txtValue = a.textContent || a.innerText;
                var match = txtValue.toUpperCase().indexOf(filter) > -1;
                items[i].style.display = match ? '' : 'none';
                if (match) { shown++; }
            }
            document.getElementById('empty').style.display = shown === 0 ? 'block' : 'none';
        }"#;

/// What the global index shows for one input record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    pub dir: String,
    pub uni_name: String,
    pub course_name: String,
}

impl IndexEntry {
    #[cfg(test)]
    fn from_profile(profile: &InstitutionProfile) -> Self {
        Self {
            dir: output_dir_name(profile.id()),
            uni_name: profile.uni_name().to_owned(),
            course_name: profile.course_name().to_owned(),
        }
    }

    /// Reads only the fields the index needs, so records that fail full
    /// decoding are still listed.
    pub fn from_record(record: &serde_json::Value) -> Self {
        let field = |key: &str, default: &str| {
            record
                .get(key)
                .and_then(serde_json::Value::as_str)
                .unwrap_or(default)
                .to_owned()
        };
        Self {
            dir: output_dir_name(record_id(record)),
            uni_name: field("uni_name", DEFAULT_UNI_NAME),
            course_name: field("course_name", DEFAULT_COURSE_NAME),
        }
    }
}

/// How the guideline verification year compares with the reference year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Unknown,
    Current { verified: i32 },
    Stale { verified: i32 },
}

impl Freshness {
    pub fn assess(verified_year: Option<i32>, reference_year: i32) -> Self {
        match verified_year {
            None => Self::Unknown,
            Some(verified) if verified < reference_year => Self::Stale { verified },
            Some(verified) => Self::Current { verified },
        }
    }

    fn banner(self) -> String {
        match self {
            Self::Unknown => String::new(),
            Self::Current { verified } => format!(
                r#"<div class="notice current">&#10003; Formatting rules verified against the {verified} guidelines.</div>"#
            ),
            Self::Stale { verified } => format!(
                r#"<div class="notice stale">&#9888; These guidelines were last verified in {verified}. Requirements may have changed since; check with your department.</div>"#
            ),
        }
    }
}

/// Renders the landing page for one institution.
pub fn render_landing_page(
    profile: &InstitutionProfile,
    layout: &ResolvedLayout,
    document_file: &str,
    reference_year: i32,
) -> String {
    let uni = text(profile.uni_name());
    let course = text(profile.course_name());
    let year = text(&profile.year_label()).into_owned();
    let m = &layout.margins;
    let (left_label, right_label) = if m.mirrored {
        ("Inside", "Outside")
    } else {
        ("Left", "Right")
    };
    let banner = Freshness::assess(profile.verified_year, reference_year).banner();
    let description = attr(&format!(
        "Download the official {} compliant {} thesis template for {}. Correct margins, fonts, and formatting styles pre-set. Free Word (docx) format.",
        profile.year_label(),
        profile.course_name(),
        profile.uni_name()
    ))
    .into_owned();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{uni} {course} Thesis Template ({year}) - Free Download</title>
    <meta name="description" content="{description}">
    <style>
        {BASE_CSS}
        {LANDING_CSS}
    </style>
</head>
<body>
    <div class="breadcrumb">
        <a href="../index.html">Home</a> &gt; {uni}
    </div>

    <h1>{uni} Thesis Template</h1>
    <p><strong>Course:</strong> {course}<br><strong>Year:</strong> {year}</p>
    {banner}
    <p>This is a free, automated thesis template compliant with the {year} {uni} guidelines. It uses native Word Styles for an automated Table of Contents and consistent formatting.</p>

    <a href="{href}" class="download-btn">&#11015; Download Template (.docx)</a>

    <h2>Compliance Specifications</h2>
    <table>
        <tr><th>Parameter</th><th>Value</th></tr>
        <tr><td>Margins</td><td>Top: {top}", Bottom: {bottom}", {left_label}: {left}", {right_label}: {right}"</td></tr>
        <tr><td>Binding</td><td>{binding}</td></tr>
        <tr><td>Font</td><td>{font} ({size}pt)</td></tr>
        <tr><td>Line Spacing</td><td>{spacing}</td></tr>
        <tr><td>Reference Style</td><td>{reference}</td></tr>
    </table>

    <p><em>Disclaimer: Always verify with your department guidelines before final submission. Generated by ThesisFactory.</em></p>
</body>
</html>
"#,
        href = attr(document_file),
        top = m.top.0,
        bottom = m.bottom.0,
        left = m.left.0,
        right = m.right.0,
        binding = profile.binding(),
        font = text(profile.font_name()),
        size = profile.font_size().0,
        spacing = layout.line_spacing,
        reference = text(profile.reference_style()),
    )
}

/// Renders the global index with a client-side filter over name and course.
pub fn render_index_page(entries: &[IndexEntry]) -> String {
    let list_items: String = entries
        .iter()
        .map(|entry| {
            format!(
                r#"        <li class="uni-item"><a href="{}/index.html"><strong>{}</strong> - {}</a></li>
"#,
                attr(&entry.dir),
                text(&entry.uni_name),
                text(&entry.course_name)
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>ThesisFactory - Free University Thesis Templates</title>
    <meta name="description" content="Search and download free, compliant thesis templates for universities worldwide.">
    <style>
        {BASE_CSS}
        {INDEX_CSS}
    </style>
</head>
<body>
    <h1>&#127891; Thesis Template Factory</h1>
    <p>Search your university to download a compliant Word template.</p>

    <input type="text" id="search" placeholder="Search by University or Course name..." onkeyup="filterList()">

    <ul id="uniList">
{list_items}    </ul>
    <p id="empty">No matching universities.</p>

    <script>
        {FILTER_SCRIPT}
    </script>
</body>
</html>
"#
    )
}
