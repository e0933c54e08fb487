// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
//! The placeholder content every generated thesis template starts from.
use crate::layout::StyleKind;
use crate::profile::InstitutionProfile;
use serde::Serialize;
use strum::IntoEnumIterator as _;
use strum_macros::{Display, EnumIter};

pub const TITLE_PAGE: &str = "Title Page";
pub const TABLE_OF_CONTENTS: &str = "Table of Contents";
pub const REFERENCES: &str = "References";

/// Lines on the title page the student fills in themselves.
pub const TITLE_PLACEHOLDERS: [&str; 3] = ["[STUDENT NAME]", "[ID NUMBER]", "[MONTH, YEAR]"];

/// The fixed chapter sequence of every template, in order.
#[derive(Debug, PartialEq, Eq, Clone, Copy, EnumIter, Display, Serialize)]
pub enum Chapter {
    Introduction,
    #[strum(to_string = "Literature Review")]
    LiteratureReview,
    Methodology,
    #[strum(to_string = "Results & Discussion")]
    ResultsAndDiscussion,
    Conclusion,
}

impl Chapter {
    /// The chapter that carries the example figure caption.
    const WITH_FIGURE: Self = Self::Methodology;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleBlock {
    pub institution: String,
    pub subtitle: String,
    pub placeholders: Vec<String>,
}

/// One unit of document content, in reading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Block {
    Title(TitleBlock),
    Heading { level: u8, text: String },
    Paragraph { style: StyleKind, text: String },
    /// Rendered as an updatable table-of-contents field.
    TableOfContents,
    PageBreak,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DocumentSkeleton {
    pub blocks: Vec<Block>,
}

impl DocumentSkeleton {
    fn push_heading(&mut self, level: u8, text: impl Into<String>) {
        self.blocks.push(Block::Heading {
            level,
            text: text.into(),
        });
    }

    fn push_paragraph(&mut self, style: StyleKind, text: impl Into<String>) {
        self.blocks.push(Block::Paragraph {
            style,
            text: text.into(),
        });
    }

    fn push_page_break(&mut self) {
        self.blocks.push(Block::PageBreak);
    }

    /// Heading texts at the given level, in order.
    #[cfg(test)]
    fn headings(&self, level: u8) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(move |block| match block {
            Block::Heading { level: l, text } if *l == level => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn has_table_of_contents(&self) -> bool {
        self.blocks.contains(&Block::TableOfContents)
    }
}

/// Builds the section order for one institution's template.
///
/// The title block always comes first. The preliminary order is walked once:
/// "Title Page" entries are skipped, "Table of Contents" becomes a TOC field,
/// anything else becomes a heading with a bracketed placeholder.
pub fn assemble(profile: &InstitutionProfile) -> DocumentSkeleton {
    let mut doc = DocumentSkeleton::default();

    doc.blocks.push(Block::Title(TitleBlock {
        institution: profile.uni_name().to_owned(),
        subtitle: format!("{} Thesis Template", profile.course_name()),
        placeholders: TITLE_PLACEHOLDERS.iter().map(|&p| p.to_owned()).collect(),
    }));
    doc.push_page_break();

    for page in profile.preliminary_order() {
        match page.as_str() {
            TITLE_PAGE => continue,
            TABLE_OF_CONTENTS => {
                doc.push_heading(1, TABLE_OF_CONTENTS);
                doc.blocks.push(Block::TableOfContents);
            }
            other => {
                doc.push_heading(1, other);
                doc.push_paragraph(StyleKind::Body, format!("[{other} Content Goes Here]"));
            }
        }
        doc.push_page_break();
    }

    for (number, chapter) in Chapter::iter().enumerate().map(|(i, c)| (i + 1, c)) {
        doc.push_heading(1, format!("Chapter {number}: {chapter}"));
        doc.push_paragraph(
            StyleKind::Body,
            format!(
                "This is the start of the {chapter}. The formatting below demonstrates subheadings."
            ),
        );

        doc.push_heading(2, "Section 1.1: Context");
        doc.push_paragraph(
            StyleKind::Body,
            "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Sed do eiusmod tempor \
             incididunt ut labore et dolore magna aliqua.",
        );

        doc.push_heading(3, "Subsection 1.1.1: Detail");
        doc.push_paragraph(
            StyleKind::Body,
            "Ut enim ad minim veniam, quis nostrud exercitation ullamco laboris nisi ut aliquip \
             ex ea commodo consequat.",
        );

        if chapter == Chapter::WITH_FIGURE {
            doc.push_paragraph(StyleKind::Caption, "[Figure 1: Conceptual Framework]");
        }

        doc.push_page_break();
    }

    doc.push_heading(1, REFERENCES);
    doc.push_paragraph(
        StyleKind::Body,
        format!("[{} Style References List]", profile.reference_style()),
    );

    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_with_prelims(prelims: &[&str]) -> InstitutionProfile {
        InstitutionProfile {
            uni_name: Some("Test University".to_owned()),
            course_name: Some("MSc".to_owned()),
            preliminary_order: Some(prelims.iter().map(|&p| p.to_owned()).collect()),
            ..InstitutionProfile::default()
        }
    }

    /// Blocks between the title block and the first chapter heading.
    fn preliminary_blocks(doc: &DocumentSkeleton) -> &[Block] {
        let first_chapter = doc
            .blocks
            .iter()
            .position(|b| matches!(b, Block::Heading { text, .. } if text.starts_with("Chapter 1")))
            .unwrap();
        &doc.blocks[1..first_chapter]
    }

    #[test]
    fn test_title_block_comes_first() {
        let doc = assemble(&profile_with_prelims(&[]));
        match &doc.blocks[0] {
            Block::Title(title) => {
                assert_eq!(title.institution, "Test University");
                assert_eq!(title.subtitle, "MSc Thesis Template");
                assert_eq!(title.placeholders, TITLE_PLACEHOLDERS);
            }
            other => panic!("expected title block, got {other:?}"),
        }
        assert_eq!(doc.blocks[1], Block::PageBreak);
    }

    #[test]
    fn test_title_page_toc_abstract() {
        let doc = assemble(&profile_with_prelims(&[
            "Title Page",
            "Table of Contents",
            "Abstract",
        ]));

        assert_eq!(
            preliminary_blocks(&doc),
            &[
                Block::PageBreak,
                Block::Heading {
                    level: 1,
                    text: "Table of Contents".to_owned()
                },
                Block::TableOfContents,
                Block::PageBreak,
                Block::Heading {
                    level: 1,
                    text: "Abstract".to_owned()
                },
                Block::Paragraph {
                    style: StyleKind::Body,
                    text: "[Abstract Content Goes Here]".to_owned()
                },
                Block::PageBreak,
            ]
        );
        let titles = doc
            .blocks
            .iter()
            .filter(|b| matches!(b, Block::Title(_)))
            .count();
        assert_eq!(titles, 1);
    }

    #[test]
    fn test_title_page_in_middle_is_still_skipped() {
        let doc = assemble(&profile_with_prelims(&["Abstract", "Title Page", "Title Page"]));
        assert!(!doc.headings(1).any(|h| h == TITLE_PAGE));
        assert_eq!(doc.headings(1).next(), Some("Abstract"));
    }

    #[test]
    fn test_without_toc_entry_no_toc_field() {
        let doc = assemble(&profile_with_prelims(&["Abstract", "Acknowledgements"]));
        assert!(!doc.has_table_of_contents());
        let prelim_headings: Vec<&str> = doc.headings(1).take(2).collect();
        assert_eq!(prelim_headings, ["Abstract", "Acknowledgements"]);
    }

    #[test]
    fn test_chapters_in_order() {
        let doc = assemble(&profile_with_prelims(&[]));
        let chapters: Vec<&str> = doc
            .headings(1)
            .filter(|h| h.starts_with("Chapter"))
            .collect();
        assert_eq!(
            chapters,
            [
                "Chapter 1: Introduction",
                "Chapter 2: Literature Review",
                "Chapter 3: Methodology",
                "Chapter 4: Results & Discussion",
                "Chapter 5: Conclusion",
            ]
        );
        assert_eq!(doc.headings(2).count(), 5);
        assert_eq!(doc.headings(3).count(), 5);
    }

    #[test]
    fn test_single_caption_in_third_chapter() {
        let doc = assemble(&profile_with_prelims(&[]));
        let caption_at = doc
            .blocks
            .iter()
            .position(|b| matches!(b, Block::Paragraph { style: StyleKind::Caption, .. }))
            .unwrap();
        let chapter_before = doc.blocks[..caption_at]
            .iter()
            .rev()
            .find_map(|b| match b {
                Block::Heading { level: 1, text } => Some(text.as_str()),
                _ => None,
            });
        assert_eq!(chapter_before, Some("Chapter 3: Methodology"));

        let captions = doc
            .blocks
            .iter()
            .filter(|b| matches!(b, Block::Paragraph { style: StyleKind::Caption, .. }))
            .count();
        assert_eq!(captions, 1);
    }

    #[test]
    fn test_references_last() {
        let mut profile = profile_with_prelims(&[]);
        profile.reference_style = Some("Harvard".to_owned());
        let doc = assemble(&profile);

        let tail = &doc.blocks[doc.blocks.len() - 2..];
        assert_eq!(
            tail,
            &[
                Block::Heading {
                    level: 1,
                    text: "References".to_owned()
                },
                Block::Paragraph {
                    style: StyleKind::Body,
                    text: "[Harvard Style References List]".to_owned()
                },
            ]
        );
    }

    #[test]
    fn test_references_default_style() {
        let doc = assemble(&InstitutionProfile::default());
        assert!(doc.blocks.contains(&Block::Paragraph {
            style: StyleKind::Body,
            text: "[APA Style References List]".to_owned()
        }));
    }

    #[test]
    fn test_structure_independent_of_institution() {
        let a = assemble(&profile_with_prelims(&["Abstract"]));
        let mut other = profile_with_prelims(&["Abstract"]);
        other.uni_name = Some("Elsewhere".to_owned());
        let b = assemble(&other);
        assert_eq!(a.blocks.len(), b.blocks.len());
        assert_eq!(a.blocks[1..], b.blocks[1..]);
    }
}
