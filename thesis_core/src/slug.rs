// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
use crate::profile::{InstitutionProfile, UNKNOWN_ID};
use regex::Regex;
use std::sync::LazyLock;

#[expect(clippy::unwrap_used, reason = "pattern is a literal")]
static SEPARATOR_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-\s]+").unwrap());

/// Makes a display name safe for use as a filename or URL path segment.
///
/// Keeps letters, digits and underscores, turns each run of hyphens and
/// whitespace into one underscore, and trims underscores/hyphens from the ends.
/// `slug(slug(x)) == slug(x)`.
pub fn slug(display_name: &str) -> String {
    let kept: String = display_name
        .chars()
        .filter(|&c| c.is_alphanumeric() || c == '_' || c == '-' || c.is_whitespace())
        .collect();
    let joined = SEPARATOR_RUNS.replace_all(&kept, "_");
    joined.trim_matches(|c| c == '_' || c == '-').to_owned()
}

/// Directory an institution's files are written to, relative to the output root.
pub fn output_dir_name(id: &str) -> String {
    let name = slug(id);
    if name.is_empty() {
        UNKNOWN_ID.to_owned()
    } else {
        name
    }
}

/// Filename of the generated word-processor document.
pub fn document_file_name(profile: &InstitutionProfile) -> String {
    let parts: Vec<String> = [profile.uni_name(), profile.course_name()]
        .into_iter()
        .map(slug)
        .filter(|s| !s.is_empty())
        .collect();
    if parts.is_empty() {
        "Template.docx".to_owned()
    } else {
        format!("{}_Template.docx", parts.join("_"))
    }
}
