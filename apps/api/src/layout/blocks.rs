//! Block extraction: turns a measured document into the ordered sequence of
//! atomic layout blocks the page packer consumes.
//!
//! A block is either a section title (layout-only, never copied into page
//! documents), an atomic content unit that moves between pages whole, or a
//! splittable free-text unit that may be cut at a vertical offset.

#![allow(dead_code)]

use serde::{Deserialize, Serialize};

use crate::layout::measure::{LayoutError, RenderedBody, RenderedResume};
use crate::models::page::PageDocument;
use crate::models::resume::{Course, Education, Experience, LanguageSkill, ResumeData};

// ────────────────────────────────────────────────────────────────────────────
// Section keys
// ────────────────────────────────────────────────────────────────────────────

/// The six content sections of a resume, in rendering order. The enum is the
/// single mapping table between template section ids and document fields;
/// no string manipulation anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKey {
    Summary,
    Experiences,
    Education,
    Courses,
    Languages,
    Skills,
}

impl SectionKey {
    /// Template container id for this section. Note the singular
    /// `experience-section` backing the plural `experiences` field.
    pub fn dom_id(self) -> &'static str {
        match self {
            SectionKey::Summary => "summary-section",
            SectionKey::Experiences => "experience-section",
            SectionKey::Education => "education-section",
            SectionKey::Courses => "courses-section",
            SectionKey::Languages => "languages-section",
            SectionKey::Skills => "skills-section",
        }
    }

    pub fn from_dom_id(id: &str) -> Option<SectionKey> {
        match id {
            "summary-section" => Some(SectionKey::Summary),
            "experience-section" => Some(SectionKey::Experiences),
            "education-section" => Some(SectionKey::Education),
            "courses-section" => Some(SectionKey::Courses),
            "languages-section" => Some(SectionKey::Languages),
            "skills-section" => Some(SectionKey::Skills),
            _ => None,
        }
    }

    /// Document field backing this section; used as the block id for
    /// whole-section blocks.
    pub fn field_name(self) -> &'static str {
        match self {
            SectionKey::Summary => "summary",
            SectionKey::Experiences => "experiences",
            SectionKey::Education => "education",
            SectionKey::Courses => "courses",
            SectionKey::Languages => "languages",
            SectionKey::Skills => "skills",
        }
    }

    /// A section with no backing data emits no blocks at all; it must not
    /// reserve space on any page.
    pub fn is_empty_in(self, document: &ResumeData) -> bool {
        match self {
            SectionKey::Summary => document.summary.trim().is_empty(),
            SectionKey::Experiences => document.experiences.is_empty(),
            SectionKey::Education => document.education.is_empty(),
            SectionKey::Courses => document.courses.is_empty(),
            SectionKey::Languages => document.languages.is_empty(),
            SectionKey::Skills => document.skills.is_empty(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Blocks
// ────────────────────────────────────────────────────────────────────────────

/// The document data a content block contributes to the page it lands on.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockPayload {
    Summary(String),
    Experience(Experience),
    Education(Vec<Education>),
    Courses(Vec<Course>),
    Languages(Vec<LanguageSkill>),
    Skills(Vec<String>),
}

impl BlockPayload {
    /// Copies this payload into a page document. Experiences dedup by id so
    /// a split description does not duplicate its item.
    pub fn apply_to(&self, page: &mut PageDocument) {
        match self {
            BlockPayload::Summary(text) => page.summary = Some(text.clone()),
            BlockPayload::Experience(exp) => page.push_experience(exp),
            BlockPayload::Education(items) => page.education = items.clone(),
            BlockPayload::Courses(items) => page.courses = items.clone(),
            BlockPayload::Languages(items) => page.languages = items.clone(),
            BlockPayload::Skills(items) => page.skills = items.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TitleBlock {
    pub section: SectionKey,
    /// Title box height including its own margins.
    pub height: f32,
    /// The section container's top margin.
    pub margin_top: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContentBlock {
    /// Continuation lookup key: `summary`, a bare item id (splittable
    /// description), `{itemId}-header`, or a section field name.
    pub id: String,
    pub section: SectionKey,
    pub payload: BlockPayload,
    pub height: f32,
    pub margin_top: f32,
}

/// One atomic unit of layout, fresh on every pagination pass.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Title(TitleBlock),
    Atomic(ContentBlock),
    Splittable(ContentBlock),
}

impl Block {
    pub fn section(&self) -> SectionKey {
        match self {
            Block::Title(t) => t.section,
            Block::Atomic(c) | Block::Splittable(c) => c.section,
        }
    }

    pub fn height(&self) -> f32 {
        match self {
            Block::Title(t) => t.height,
            Block::Atomic(c) | Block::Splittable(c) => c.height,
        }
    }

    pub fn margin_top(&self) -> f32 {
        match self {
            Block::Title(t) => t.margin_top,
            Block::Atomic(c) | Block::Splittable(c) => c.margin_top,
        }
    }

    pub fn is_title(&self) -> bool {
        matches!(self, Block::Title(_))
    }

    pub fn is_splittable(&self) -> bool {
        matches!(self, Block::Splittable(_))
    }

    pub fn content(&self) -> Option<&ContentBlock> {
        match self {
            Block::Title(_) => None,
            Block::Atomic(c) | Block::Splittable(c) => Some(c),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Extraction
// ────────────────────────────────────────────────────────────────────────────

/// Walks the measured sections in rendering order and emits blocks:
/// - empty-backed sections emit nothing;
/// - a visible title emits one [`Block::Title`] before the section's content;
/// - summary emits one splittable paragraph block (`id = "summary"`);
/// - each experience emits an atomic `{id}-header` block and, when the
///   description is non-empty, a splittable block under the bare item id;
/// - every other section emits exactly one atomic whole-section block.
pub fn extract(
    rendered: &RenderedResume,
    document: &ResumeData,
) -> Result<Vec<Block>, LayoutError> {
    let mut blocks = Vec::new();

    for section in &rendered.sections {
        if section.key.is_empty_in(document) {
            continue;
        }

        if let Some(title_height) = section.title_height {
            blocks.push(Block::Title(TitleBlock {
                section: section.key,
                height: title_height,
                margin_top: section.margin_top,
            }));
        }

        match (&section.body, section.key) {
            (RenderedBody::Paragraph(height), SectionKey::Summary) => {
                blocks.push(Block::Splittable(ContentBlock {
                    id: "summary".to_string(),
                    section: SectionKey::Summary,
                    payload: BlockPayload::Summary(document.summary.clone()),
                    height: *height,
                    margin_top: 0.0,
                }));
            }

            (RenderedBody::Entries(entries), SectionKey::Experiences) => {
                for entry in entries {
                    let exp = document
                        .experiences
                        .iter()
                        .find(|e| e.id == entry.id)
                        .ok_or_else(|| {
                            LayoutError::Extraction(format!(
                                "rendered experience {} not present in document",
                                entry.id
                            ))
                        })?;

                    blocks.push(Block::Atomic(ContentBlock {
                        id: format!("{}-header", exp.id),
                        section: SectionKey::Experiences,
                        payload: BlockPayload::Experience(exp.clone()),
                        height: entry.header_height,
                        margin_top: entry.margin_top,
                    }));

                    if let Some(description_height) = entry.description_height {
                        if !exp.description.trim().is_empty() {
                            blocks.push(Block::Splittable(ContentBlock {
                                id: exp.id.clone(),
                                section: SectionKey::Experiences,
                                payload: BlockPayload::Experience(exp.clone()),
                                height: description_height,
                                margin_top: 0.0,
                            }));
                        }
                    }
                }
            }

            (RenderedBody::Whole(height), key) => {
                let payload = match key {
                    SectionKey::Education => BlockPayload::Education(document.education.clone()),
                    SectionKey::Courses => BlockPayload::Courses(document.courses.clone()),
                    SectionKey::Languages => BlockPayload::Languages(document.languages.clone()),
                    SectionKey::Skills => BlockPayload::Skills(document.skills.clone()),
                    SectionKey::Summary | SectionKey::Experiences => {
                        return Err(LayoutError::Extraction(format!(
                            "section {key:?} rendered as a whole-section box"
                        )))
                    }
                };
                blocks.push(Block::Atomic(ContentBlock {
                    id: key.field_name().to_string(),
                    section: key,
                    payload,
                    height: *height,
                    margin_top: 0.0,
                }));
            }

            (body, key) => {
                return Err(LayoutError::Extraction(format!(
                    "section {key:?} rendered with unexpected body {body:?}"
                )))
            }
        }
    }

    Ok(blocks)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::measure::{RenderedEntry, RenderedSection};

    fn rendered(sections: Vec<RenderedSection>) -> RenderedResume {
        RenderedResume {
            total_height: 2000.0,
            header_height: 150.0,
            body_margin_top: 16.0,
            sections,
        }
    }

    fn experience(id: &str, description: &str) -> Experience {
        Experience {
            id: id.to_string(),
            job_title: "Dev".to_string(),
            description: description.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_dom_id_mapping_round_trips() {
        for key in [
            SectionKey::Summary,
            SectionKey::Experiences,
            SectionKey::Education,
            SectionKey::Courses,
            SectionKey::Languages,
            SectionKey::Skills,
        ] {
            assert_eq!(SectionKey::from_dom_id(key.dom_id()), Some(key));
        }
        assert_eq!(SectionKey::from_dom_id("footer-section"), None);
    }

    #[test]
    fn test_singular_experience_id_maps_to_plural_field() {
        let key = SectionKey::from_dom_id("experience-section").unwrap();
        assert_eq!(key.field_name(), "experiences");
    }

    #[test]
    fn test_empty_backed_section_emits_no_blocks() {
        // Rendered tree claims a summary section, but the document has none
        // (placeholder text measured in demo rendering).
        let tree = rendered(vec![RenderedSection {
            key: SectionKey::Summary,
            margin_top: 0.0,
            title_height: Some(36.0),
            body: RenderedBody::Paragraph(40.0),
        }]);
        let blocks = extract(&tree, &ResumeData::default()).unwrap();
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_summary_emits_title_then_splittable_paragraph() {
        let doc = ResumeData {
            summary: "A summary.".to_string(),
            ..Default::default()
        };
        let tree = rendered(vec![RenderedSection {
            key: SectionKey::Summary,
            margin_top: 0.0,
            title_height: Some(36.0),
            body: RenderedBody::Paragraph(52.0),
        }]);
        let blocks = extract(&tree, &doc).unwrap();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].is_title());
        assert!(blocks[1].is_splittable());
        assert_eq!(blocks[1].content().unwrap().id, "summary");
        assert_eq!(blocks[1].height(), 52.0);
    }

    #[test]
    fn test_experience_emits_header_and_description_sub_blocks() {
        let doc = ResumeData {
            experiences: vec![experience("77", "Shipped a thing.")],
            ..Default::default()
        };
        let tree = rendered(vec![RenderedSection {
            key: SectionKey::Experiences,
            margin_top: 16.0,
            title_height: Some(36.0),
            body: RenderedBody::Entries(vec![RenderedEntry {
                id: "77".to_string(),
                margin_top: 0.0,
                header_height: 48.0,
                description_height: Some(78.0),
            }]),
        }]);
        let blocks = extract(&tree, &doc).unwrap();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[1].content().unwrap().id, "77-header");
        assert!(!blocks[1].is_splittable());
        // Continuation lookups use the bare item id, not the header's.
        assert_eq!(blocks[2].content().unwrap().id, "77");
        assert!(blocks[2].is_splittable());
    }

    #[test]
    fn test_experience_without_description_emits_header_only() {
        let doc = ResumeData {
            experiences: vec![experience("5", "")],
            ..Default::default()
        };
        let tree = rendered(vec![RenderedSection {
            key: SectionKey::Experiences,
            margin_top: 0.0,
            title_height: Some(36.0),
            body: RenderedBody::Entries(vec![RenderedEntry {
                id: "5".to_string(),
                margin_top: 0.0,
                header_height: 48.0,
                description_height: None,
            }]),
        }]);
        let blocks = extract(&tree, &doc).unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].content().unwrap().id, "5-header");
    }

    #[test]
    fn test_whole_section_emits_single_atomic_block() {
        let doc = ResumeData {
            skills: vec!["Rust".to_string(), "SQL".to_string()],
            ..Default::default()
        };
        let tree = rendered(vec![RenderedSection {
            key: SectionKey::Skills,
            margin_top: 16.0,
            title_height: Some(36.0),
            body: RenderedBody::Whole(26.0),
        }]);
        let blocks = extract(&tree, &doc).unwrap();
        assert_eq!(blocks.len(), 2);
        let content = blocks[1].content().unwrap();
        assert_eq!(content.id, "skills");
        assert!(!blocks[1].is_splittable());
        assert!(matches!(content.payload, BlockPayload::Skills(ref s) if s.len() == 2));
    }

    #[test]
    fn test_unknown_rendered_entry_is_extraction_failure() {
        let doc = ResumeData {
            experiences: vec![experience("real", "desc")],
            ..Default::default()
        };
        let tree = rendered(vec![RenderedSection {
            key: SectionKey::Experiences,
            margin_top: 0.0,
            title_height: None,
            body: RenderedBody::Entries(vec![RenderedEntry {
                id: "ghost".to_string(),
                margin_top: 0.0,
                header_height: 48.0,
                description_height: None,
            }]),
        }]);
        let err = extract(&tree, &doc).unwrap_err();
        assert!(matches!(err, LayoutError::Extraction(_)));
    }

    #[test]
    fn test_blocks_preserve_section_order() {
        let doc = ResumeData {
            summary: "s".to_string(),
            skills: vec!["Rust".to_string()],
            ..Default::default()
        };
        let tree = rendered(vec![
            RenderedSection {
                key: SectionKey::Summary,
                margin_top: 0.0,
                title_height: Some(36.0),
                body: RenderedBody::Paragraph(26.0),
            },
            RenderedSection {
                key: SectionKey::Skills,
                margin_top: 16.0,
                title_height: Some(36.0),
                body: RenderedBody::Whole(26.0),
            },
        ]);
        let blocks = extract(&tree, &doc).unwrap();
        let sections: Vec<SectionKey> = blocks.iter().map(|b| b.section()).collect();
        assert_eq!(
            sections,
            vec![
                SectionKey::Summary,
                SectionKey::Summary,
                SectionKey::Skills,
                SectionKey::Skills
            ]
        );
    }
}
