//! Paginated output model: one `PageDocument` per physical A4 page, plus the
//! continuation metadata the preview and export renderers consume.

#![allow(dead_code)]

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::resume::{
    Course, Education, Experience, LanguageSkill, PersonalInfo, ResumeData, Style,
};

/// Continuation metadata for a block split across a page boundary, keyed by
/// block id in [`PageDocument::continuation`].
///
/// On the page the block leaves, `offset` is 0 and `visible_height` carries
/// the slice shown there. On the following page, `offset` is the height
/// already shown and `visible_height` is absent ("show from offset to end").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinuationEntry {
    pub offset: f32,
    pub total_height: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_height: Option<f32>,
}

/// The vertical slice of a split block a renderer must show on one page:
/// render the content at natural height inside a clipping container of
/// `clip_height`, shifted upward by `shift_up` pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleSlice {
    pub clip_height: f32,
    pub shift_up: f32,
}

impl ContinuationEntry {
    /// Resolves the renderer contract. `None` means the block contributes
    /// nothing visible on this page and must not be rendered at all.
    pub fn visible_slice(&self) -> Option<VisibleSlice> {
        let clip_height = match self.visible_height {
            Some(h) => h,
            None => self.total_height - self.offset,
        };
        if clip_height <= 0.0 {
            return None;
        }
        Some(VisibleSlice {
            clip_height,
            shift_up: self.offset.max(0.0),
        })
    }
}

/// The subset of a [`ResumeData`] assigned to one physical page.
///
/// Personal info appears on page 1 only; style rides along on every page so
/// each page renders independently. Recomputed from scratch on every
/// pagination run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_info: Option<PersonalInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub experiences: Vec<Experience>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub education: Vec<Education>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub courses: Vec<Course>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<LanguageSkill>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub continuation: BTreeMap<String, ContinuationEntry>,
}

impl PageDocument {
    /// The whole document as a single page, the escape hatch for documents
    /// that fit, and the fail-soft fallback when pagination errors out.
    pub fn from_full(document: &ResumeData) -> Self {
        PageDocument {
            personal_info: Some(document.personal_info.clone()),
            summary: if document.summary.is_empty() {
                None
            } else {
                Some(document.summary.clone())
            },
            experiences: document.experiences.clone(),
            education: document.education.clone(),
            courses: document.courses.clone(),
            languages: document.languages.clone(),
            skills: document.skills.clone(),
            style: Some(document.style.clone()),
            continuation: BTreeMap::new(),
        }
    }

    /// Seed for page 1: personal info + style, nothing else yet.
    pub fn first_page(document: &ResumeData) -> Self {
        PageDocument {
            personal_info: Some(document.personal_info.clone()),
            style: Some(document.style.clone()),
            ..Default::default()
        }
    }

    /// Seed for every page after the first: style only.
    pub fn continuation_page(style: &Style) -> Self {
        PageDocument {
            style: Some(style.clone()),
            ..Default::default()
        }
    }

    /// Appends an experience unless an item with the same id is already on
    /// this page (a split item is absorbed twice by the packer).
    pub fn push_experience(&mut self, experience: &Experience) {
        if !self.experiences.iter().any(|e| e.id == experience.id) {
            self.experiences.push(experience.clone());
        }
    }

    /// True iff the page carries at least one real content field. Pages whose
    /// only populated keys are style/continuation are pruned by the packer.
    pub fn has_content(&self) -> bool {
        self.personal_info.is_some()
            || self.summary.is_some()
            || !self.experiences.is_empty()
            || !self.education.is_empty()
            || !self.courses.is_empty()
            || !self.languages.is_empty()
            || !self.skills.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(offset: f32, total: f32, visible: Option<f32>) -> ContinuationEntry {
        ContinuationEntry {
            offset,
            total_height: total,
            visible_height: visible,
        }
    }

    #[test]
    fn test_visible_slice_first_page_of_split() {
        let slice = entry(0.0, 1300.0, Some(900.0)).visible_slice().unwrap();
        assert_eq!(slice.clip_height, 900.0);
        assert_eq!(slice.shift_up, 0.0);
    }

    #[test]
    fn test_visible_slice_second_page_of_split() {
        let slice = entry(900.0, 1300.0, None).visible_slice().unwrap();
        assert_eq!(slice.clip_height, 400.0);
        assert_eq!(slice.shift_up, 900.0);
    }

    #[test]
    fn test_visible_slice_empty_slice_renders_nothing() {
        assert!(entry(1300.0, 1300.0, None).visible_slice().is_none());
        assert!(entry(0.0, 100.0, Some(0.0)).visible_slice().is_none());
        assert!(entry(1400.0, 1300.0, None).visible_slice().is_none());
    }

    #[test]
    fn test_push_experience_dedups_by_id() {
        let mut page = PageDocument::default();
        let exp = Experience {
            id: "a".into(),
            ..Default::default()
        };
        page.push_experience(&exp);
        page.push_experience(&exp);
        assert_eq!(page.experiences.len(), 1);
    }

    #[test]
    fn test_has_content_ignores_style_and_continuation() {
        let mut page = PageDocument::continuation_page(&Style::default());
        page.continuation
            .insert("summary".into(), entry(100.0, 200.0, None));
        assert!(!page.has_content());

        page.summary = Some("text".into());
        assert!(page.has_content());
    }

    #[test]
    fn test_empty_fields_absent_on_the_wire() {
        let page = PageDocument::continuation_page(&Style::default());
        let json = serde_json::to_value(&page).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.keys().collect::<Vec<_>>(), vec!["style"]);
    }

    #[test]
    fn test_from_full_of_empty_document_keeps_personal_info_and_style() {
        let page = PageDocument::from_full(&ResumeData::default());
        assert!(page.personal_info.is_some());
        assert!(page.style.is_some());
        assert!(page.summary.is_none());
        assert!(page.experiences.is_empty());
    }
}
