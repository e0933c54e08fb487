// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
//! Turns an [`InstitutionProfile`] into concrete page geometry and paragraph styles.
//!
//! Everything here is a pure function of the profile. Nothing is cached between
//! institutions and the resulting [`ResolvedLayout`] is never mutated.
use crate::profile::{BindingMode, InstitutionProfile};
use crate::types::{Inches, Points, Rgb};
use indexmap::IndexMap;
use serde::Serialize;
use strum::IntoEnumIterator as _;
use strum_macros::{Display, EnumIter};

const DEFAULT_MARGIN: Inches = Inches(1.0);
const DEFAULT_INSIDE_MARGIN: Inches = Inches(1.5);
const DEFAULT_OUTSIDE_MARGIN: Inches = Inches(1.0);

/// Final page margins. With `mirrored` set, `left` is the inside (binding) edge
/// and `right` the outside edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedMargins {
    pub top: Inches,
    pub bottom: Inches,
    pub left: Inches,
    pub right: Inches,
    pub mirrored: bool,
}

/// Line spacing after normalisation.
///
/// Only exactly 1.5 and 2.0 survive; every other request collapses to single
/// spacing. 1.75 becomes `Single`, not `OneAndHalf`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
pub enum LineSpacing {
    #[strum(to_string = "1.0")]
    Single,
    #[strum(to_string = "1.5")]
    OneAndHalf,
    #[strum(to_string = "2.0")]
    Double,
}

impl LineSpacing {
    pub fn normalise(requested: f64) -> Self {
        if requested == 1.5 {
            Self::OneAndHalf
        } else if requested == 2.0 {
            Self::Double
        } else {
            Self::Single
        }
    }

    pub fn multiple(self) -> f64 {
        match self {
            Self::Single => 1.0,
            Self::OneAndHalf => 1.5,
            Self::Double => 2.0,
        }
    }
}

/// The named paragraph styles a generated document relies on.
///
/// Declaration order is the order styles are emitted in.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, EnumIter, Display, Serialize)]
pub enum StyleKind {
    #[strum(to_string = "Normal")]
    Body,
    #[strum(to_string = "Heading 1")]
    Heading1,
    #[strum(to_string = "Heading 2")]
    Heading2,
    #[strum(to_string = "Heading 3")]
    Heading3,
    Caption,
}

impl StyleKind {
    /// Identifier used to reference the style from document paragraphs.
    pub fn style_id(self) -> &'static str {
        match self {
            Self::Body => "Normal",
            Self::Heading1 => "Heading1",
            Self::Heading2 => "Heading2",
            Self::Heading3 => "Heading3",
            Self::Caption => "Caption",
        }
    }

    /// Heading style for an outline level, if there is one.
    pub fn heading(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::Heading1),
            2 => Some(Self::Heading2),
            3 => Some(Self::Heading3),
            _ => None,
        }
    }

    pub fn outline_level(self) -> Option<u8> {
        match self {
            Self::Heading1 => Some(1),
            Self::Heading2 => Some(2),
            Self::Heading3 => Some(3),
            Self::Body | Self::Caption => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParagraphStyle {
    pub font_family: String,
    pub size: Points,
    pub bold: bool,
    pub italic: bool,
    /// `None` inherits whatever the word processor's theme uses.
    pub colour: Option<Rgb>,
    pub space_before: Option<Points>,
    pub space_after: Option<Points>,
}

impl ParagraphStyle {
    fn plain(font_family: &str, size: Points) -> Self {
        Self {
            font_family: font_family.to_owned(),
            size,
            bold: false,
            italic: false,
            colour: None,
            space_before: None,
            space_after: None,
        }
    }

    fn heading(font_family: &str, size: f64, before: f64, after: f64) -> Self {
        Self {
            bold: true,
            colour: Some(Rgb::BLACK),
            space_before: Some(Points(before)),
            space_after: Some(Points(after)),
            ..Self::plain(font_family, Points(size))
        }
    }
}

/// Where and how page numbers appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FooterDirective {
    CentredPageNumber,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedLayout {
    pub margins: ResolvedMargins,
    pub styles: IndexMap<StyleKind, ParagraphStyle>,
    pub line_spacing: LineSpacing,
    pub footer: FooterDirective,
}

impl ResolvedLayout {
    pub fn style(&self, kind: StyleKind) -> Option<&ParagraphStyle> {
        self.styles.get(&kind)
    }

    pub fn is_mirrored(&self) -> bool {
        self.margins.mirrored
    }
}

/// Computes the concrete layout for one institution.
pub fn resolve(profile: &InstitutionProfile) -> ResolvedLayout {
    let layout = ResolvedLayout {
        margins: resolve_margins(profile),
        styles: resolve_styles(profile.font_name(), profile.font_size()),
        line_spacing: LineSpacing::normalise(profile.requested_line_spacing()),
        footer: FooterDirective::CentredPageNumber,
    };
    log::debug!(
        "Resolved layout for {}: {:?}, spacing {}",
        profile.id(),
        layout.margins,
        layout.line_spacing
    );
    layout
}

fn resolve_margins(profile: &InstitutionProfile) -> ResolvedMargins {
    let spec = profile.margins();
    let edge = |value: Option<Inches>, default: Inches| value.unwrap_or(default).non_negative();
    let top = edge(spec.top, DEFAULT_MARGIN);
    let bottom = edge(spec.bottom, DEFAULT_MARGIN);

    match profile.binding() {
        BindingMode::Single => ResolvedMargins {
            top,
            bottom,
            left: edge(spec.left, DEFAULT_MARGIN),
            right: edge(spec.right, DEFAULT_MARGIN),
            mirrored: false,
        },
        BindingMode::Double => ResolvedMargins {
            top,
            bottom,
            left: edge(spec.left, DEFAULT_INSIDE_MARGIN),
            right: edge(spec.right, DEFAULT_OUTSIDE_MARGIN),
            mirrored: true,
        },
    }
}

fn resolve_styles(font_family: &str, body_size: Points) -> IndexMap<StyleKind, ParagraphStyle> {
    StyleKind::iter()
        .map(|kind| {
            let style = match kind {
                StyleKind::Body => ParagraphStyle::plain(font_family, body_size),
                StyleKind::Heading1 => ParagraphStyle::heading(font_family, 16.0, 24.0, 12.0),
                StyleKind::Heading2 => ParagraphStyle::heading(font_family, 14.0, 18.0, 6.0),
                StyleKind::Heading3 => ParagraphStyle::heading(font_family, 12.0, 12.0, 6.0),
                StyleKind::Caption => ParagraphStyle {
                    italic: true,
                    colour: Some(Rgb::BLACK),
                    ..ParagraphStyle::plain(font_family, Points(10.0))
                },
            };
            (kind, style)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{FontSpec, MarginSpec};

    fn profile_with_margins(binding: BindingMode, margins: MarginSpec) -> InstitutionProfile {
        InstitutionProfile {
            binding: Some(binding),
            margins: Some(margins),
            ..InstitutionProfile::default()
        }
    }

    #[test]
    fn test_single_sided_margins_pass_through() {
        let margins = MarginSpec {
            top: Some(Inches(1.25)),
            bottom: Some(Inches(0.75)),
            left: Some(Inches(1.5)),
            right: Some(Inches(2.0)),
        };
        let layout = resolve(&profile_with_margins(BindingMode::Single, margins));

        assert_eq!(
            layout.margins,
            ResolvedMargins {
                top: Inches(1.25),
                bottom: Inches(0.75),
                left: Inches(1.5),
                right: Inches(2.0),
                mirrored: false,
            }
        );
    }

    #[test]
    fn test_single_sided_partial_margins_default_to_one_inch() {
        let margins = MarginSpec {
            left: Some(Inches(1.5)),
            ..MarginSpec::default()
        };
        let layout = resolve(&profile_with_margins(BindingMode::Single, margins));

        assert_eq!(layout.margins.top, Inches(1.0));
        assert_eq!(layout.margins.bottom, Inches(1.0));
        assert_eq!(layout.margins.left, Inches(1.5));
        assert_eq!(layout.margins.right, Inches(1.0));
        assert!(!layout.is_mirrored());
    }

    #[test]
    fn test_missing_margins_object() {
        let layout = resolve(&InstitutionProfile::default());

        for edge in [
            layout.margins.top,
            layout.margins.bottom,
            layout.margins.left,
            layout.margins.right,
        ] {
            assert_eq!(edge, Inches(1.0));
        }
        assert!(!layout.margins.mirrored);
    }

    #[test]
    fn test_double_sided_margins_become_inside_outside() {
        let margins = MarginSpec {
            left: Some(Inches(1.75)),
            right: Some(Inches(0.8)),
            ..MarginSpec::default()
        };
        let layout = resolve(&profile_with_margins(BindingMode::Double, margins));

        assert_eq!(layout.margins.left, Inches(1.75));
        assert_eq!(layout.margins.right, Inches(0.8));
        assert_eq!(layout.margins.top, Inches(1.0));
        assert!(layout.margins.mirrored);
    }

    #[test]
    fn test_negative_margins_resolve_to_zero() {
        let margins = MarginSpec {
            top: Some(Inches(-0.5)),
            right: Some(Inches(0.8)),
            ..MarginSpec::default()
        };
        let layout = resolve(&profile_with_margins(BindingMode::Single, margins));

        assert_eq!(layout.margins.top, Inches(0.0));
        assert_eq!(layout.margins.right, Inches(0.8));
    }

    #[test]
    fn test_double_sided_default_inside_and_outside() {
        let layout = resolve(&profile_with_margins(
            BindingMode::Double,
            MarginSpec::default(),
        ));

        assert_eq!(layout.margins.left, Inches(1.5));
        assert_eq!(layout.margins.right, Inches(1.0));
        assert!(layout.is_mirrored());
    }

    #[test]
    fn test_line_spacing_exact_values() {
        assert_eq!(LineSpacing::normalise(1.0), LineSpacing::Single);
        assert_eq!(LineSpacing::normalise(1.5), LineSpacing::OneAndHalf);
        assert_eq!(LineSpacing::normalise(2.0), LineSpacing::Double);
    }

    #[test]
    fn test_line_spacing_everything_else_is_single() {
        for requested in [1.75, 1.49, 1.51, 0.0, -1.5, 3.0, 2.5, 1.15, f64::NAN, f64::INFINITY] {
            assert_eq!(
                LineSpacing::normalise(requested),
                LineSpacing::Single,
                "{requested} should collapse to single spacing"
            );
        }
    }

    #[test]
    fn test_line_spacing_multiple_is_in_allowed_set() {
        for requested in [0.5, 1.0, 1.25, 1.5, 1.75, 2.0, 2.25] {
            let multiple = LineSpacing::normalise(requested).multiple();
            assert!([1.0, 1.5, 2.0].contains(&multiple));
        }
    }

    #[test]
    fn test_missing_line_spacing_resolves_to_one_and_half() {
        let layout = resolve(&InstitutionProfile::default());
        assert_eq!(layout.line_spacing, LineSpacing::OneAndHalf);
    }

    #[test]
    fn test_style_table_defaults() {
        let layout = resolve(&InstitutionProfile::default());
        let kinds: Vec<StyleKind> = layout.styles.keys().copied().collect();
        assert_eq!(kinds, StyleKind::iter().collect::<Vec<_>>());

        let body = layout.style(StyleKind::Body).unwrap();
        assert_eq!(body.font_family, "Times New Roman");
        assert_eq!(body.size, Points(12.0));
        assert!(!body.bold);
        assert_eq!(body.colour, None);
    }

    #[test]
    fn test_heading_styles_are_fixed() {
        let profile = InstitutionProfile {
            font: Some(FontSpec {
                name: Some("Arial".to_owned()),
                size: Some(Points(11.0)),
            }),
            ..InstitutionProfile::default()
        };
        let layout = resolve(&profile);

        let expected = [
            (StyleKind::Heading1, 16.0, 24.0, 12.0),
            (StyleKind::Heading2, 14.0, 18.0, 6.0),
            (StyleKind::Heading3, 12.0, 12.0, 6.0),
        ];
        for (kind, size, before, after) in expected {
            let style = layout.style(kind).unwrap();
            assert_eq!(style.font_family, "Arial");
            assert_eq!(style.size, Points(size));
            assert!(style.bold);
            assert_eq!(style.colour, Some(Rgb::BLACK));
            assert_eq!(style.space_before, Some(Points(before)));
            assert_eq!(style.space_after, Some(Points(after)));
        }

        assert_eq!(layout.style(StyleKind::Body).unwrap().size, Points(11.0));
    }

    #[test]
    fn test_caption_style() {
        let layout = resolve(&InstitutionProfile::default());
        let caption = layout.style(StyleKind::Caption).unwrap();
        assert_eq!(caption.size, Points(10.0));
        assert!(caption.italic);
        assert!(!caption.bold);
        assert_eq!(caption.colour, Some(Rgb::BLACK));
    }

    #[test]
    fn test_style_kind_heading_levels() {
        assert_eq!(StyleKind::heading(2), Some(StyleKind::Heading2));
        assert_eq!(StyleKind::heading(4), None);
        assert_eq!(StyleKind::Heading3.outline_level(), Some(3));
        assert_eq!(StyleKind::Caption.outline_level(), None);
        assert_eq!(StyleKind::Heading1.to_string(), "Heading 1");
        assert_eq!(StyleKind::Heading1.style_id(), "Heading1");
        assert_eq!(StyleKind::Body.style_id(), "Normal");
    }
}
