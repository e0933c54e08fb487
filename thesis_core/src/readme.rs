// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
use crate::layout::ResolvedLayout;
use crate::profile::InstitutionProfile;

/// Builds the `README.md` shipped alongside each template.
///
/// Margins, font and spacing are the resolved values, so the README describes
/// the document that was actually generated.
pub fn render_readme(
    profile: &InstitutionProfile,
    layout: &ResolvedLayout,
    document_file: &str,
) -> String {
    let m = &layout.margins;
    let (left_label, right_label) = if m.mirrored {
        ("Inside", "Outside")
    } else {
        ("Left", "Right")
    };
    let prelims = if profile.preliminary_order().is_empty() {
        "- (none specified)".to_owned()
    } else {
        profile
            .preliminary_order()
            .iter()
            .map(|p| format!("- {p}"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    let verified = profile
        .verified_year
        .map(|y| format!("**Guidelines verified:** {y}\n"))
        .unwrap_or_default();

    format!(
        r#"# {uni} - {course} Thesis Template

**Year:** {year}
**Reference Style:** {reference}
{verified}
## Disclaimer
This template is generated programmatically based on publicly available guidelines.
ALWAYS verify with your specific department before final submission.

## Compliance Details
- **Font:** {font} ({size}pt)
- **Margins:** Top {top}", Bottom {bottom}", {left_label} {left}", {right_label} {right}"
- **Binding:** {binding}
- **Spacing:** {spacing} lines

## How to Use
1. Open `{document_file}`
2. Update the **Title Page** with your details.
3. Use the **Styles Pane** in Word:
   - Use `Heading 1` for Chapters
   - Use `Heading 2` for Sections
   - Use `Normal` for body text
4. **Table of Contents**: Right-click the TOC and select "Update Field" to refresh page numbers.

## Preliminary Pages included:
{prelims}

---
*Generated by ThesisFactory Automation*
"#,
        uni = profile.uni_name(),
        course = profile.course_name(),
        year = profile.year_label(),
        reference = profile.reference_style(),
        font = profile.font_name(),
        size = profile.font_size().0,
        top = m.top.0,
        bottom = m.bottom.0,
        left = m.left.0,
        right = m.right.0,
        binding = profile.binding(),
        spacing = layout.line_spacing,
    )
}
