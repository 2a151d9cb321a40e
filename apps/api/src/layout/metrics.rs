//! Font-metric measurement surface.
//!
//! Character widths are in em units (relative to font size) for the single
//! humanist sans the templates share. Static tables are an intentional
//! approximation: exact glyph shaping is not needed to place page breaks, it
//! only has to agree with the preview renderer to within a line. The table
//! covers ASCII 0x20..=0x7E; anything outside falls back to an average width.

use async_trait::async_trait;

use crate::layout::blocks::SectionKey;
use crate::layout::measure::{
    LayoutError, MeasurementSurface, RenderedBody, RenderedEntry, RenderedResume, RenderedSection,
    RENDER_TIMEOUT,
};
use crate::models::resume::ResumeData;

// ────────────────────────────────────────────────────────────────────────────
// Character width table (em units, index = char as usize - 32)
// ────────────────────────────────────────────────────────────────────────────

#[rustfmt::skip]
const CHAR_WIDTHS_EM: [f32; 95] = [
    0.26, 0.26, 0.38, 0.62, 0.57, 0.82, 0.68, 0.22, // ' ' ! " # $ % & '
    0.35, 0.35, 0.45, 0.58, 0.25, 0.40, 0.25, 0.38, // ( ) * + , - . /
    0.57, 0.57, 0.57, 0.57, 0.57, 0.57, 0.57, 0.57, // 0 1 2 3 4 5 6 7
    0.57, 0.57, 0.27, 0.27, 0.58, 0.58, 0.58, 0.50, // 8 9 : ; < = > ?
    0.90, 0.65, 0.64, 0.70, 0.72, 0.59, 0.57, 0.73, // @ A B C D E F G
    0.75, 0.28, 0.55, 0.65, 0.54, 0.92, 0.75, 0.76, // H I J K L M N O
    0.61, 0.76, 0.63, 0.61, 0.62, 0.73, 0.64, 0.97, // P Q R S T U V W
    0.63, 0.61, 0.60, 0.35, 0.38, 0.35, 0.48, 0.50, // X Y Z [ \ ] ^ _
    0.30, 0.54, 0.58, 0.53, 0.58, 0.55, 0.33, 0.58, // ` a b c d e f g
    0.57, 0.24, 0.24, 0.52, 0.24, 0.87, 0.57, 0.57, // h i j k l m n o
    0.58, 0.58, 0.35, 0.50, 0.34, 0.57, 0.50, 0.77, // p q r s t u v w
    0.50, 0.50, 0.48, 0.35, 0.25, 0.35, 0.58,       // x y z { | } ~
];

/// Average width used for characters outside the ASCII table (accented
/// Portuguese letters measure close to their base glyph).
const FALLBACK_WIDTH_EM: f32 = 0.55;

fn char_width_em(c: char) -> f32 {
    let code = c as usize;
    if (0x20..=0x7E).contains(&code) {
        CHAR_WIDTHS_EM[code - 0x20]
    } else {
        FALLBACK_WIDTH_EM
    }
}

/// Width of `text` at `font_px`, in pixels.
pub fn text_width_px(text: &str, font_px: f32) -> f32 {
    text.chars().map(char_width_em).sum::<f32>() * font_px
}

/// Greedy word-wrap line count of `text` at `font_px` inside `max_width_px`.
/// Hard newlines always break; an empty segment still occupies one line.
pub fn wrapped_line_count(text: &str, font_px: f32, max_width_px: f32) -> u32 {
    let space = char_width_em(' ') * font_px;
    let mut lines = 0u32;
    for segment in text.split('\n') {
        lines += 1;
        let mut line_width = 0.0f32;
        for word in segment.split_whitespace() {
            let word_width = text_width_px(word, font_px);
            let needed = if line_width == 0.0 {
                word_width
            } else {
                line_width + space + word_width
            };
            if needed > max_width_px && line_width > 0.0 {
                lines += 1;
                line_width = word_width;
            } else {
                line_width = needed;
            }
        }
    }
    lines.max(1)
}

// ────────────────────────────────────────────────────────────────────────────
// Template geometry constants (pixels at 794 px page width)
// ────────────────────────────────────────────────────────────────────────────

const PAGE_PADDING: f32 = 48.0;
const CONTENT_WIDTH: f32 = 794.0 - 2.0 * PAGE_PADDING;

const BODY_FONT_PX: f32 = 16.0;
const BODY_LINE_HEIGHT: f32 = 26.0;

/// Vertical gap between sections, and between experience items.
const SECTION_GAP: f32 = 16.0;
/// Section title line plus its bottom margin.
const TITLE_BOX: f32 = 36.0;

/// Two-line entry header (title line + institution/company line).
const ENTRY_HEADER: f32 = 48.0;
const DESCRIPTION_TOP_MARGIN: f32 = 4.0;
/// Gap between compact list rows (education, courses).
const COMPACT_GAP: f32 = 8.0;

const LANGUAGE_ROW: f32 = 24.0;
const LANGUAGE_GAP_X: f32 = 16.0;

const SKILL_FONT_PX: f32 = 12.0;
const SKILL_PILL_HEIGHT: f32 = 20.0;
const SKILL_PILL_PADDING_X: f32 = 20.0;
const SKILL_PILL_GAP: f32 = 6.0;

const NAME_LINE: f32 = 44.0;
const JOB_TITLE_LINE: f32 = 28.0;
const CONTACT_ROW: f32 = 24.0;
const CONTACT_TOP_MARGIN: f32 = 12.0;
const HEADER_BOTTOM_PADDING: f32 = 16.0;

// ────────────────────────────────────────────────────────────────────────────
// Surface
// ────────────────────────────────────────────────────────────────────────────

/// Measurement surface backed by the static metric tables. Each call owns its
/// geometry pass outright; nothing is shared between runs.
#[derive(Debug, Clone, Default)]
pub struct MetricsSurface;

#[async_trait]
impl MeasurementSurface for MetricsSurface {
    async fn measure(&self, document: &ResumeData) -> Result<RenderedResume, LayoutError> {
        // Geometry estimation is CPU-bound; spawn_blocking keeps the
        // scheduler unblocked, the timeout enforces the settle bound.
        let doc = document.clone();
        let task = tokio::task::spawn_blocking(move || render_geometry(&doc));
        match tokio::time::timeout(RENDER_TIMEOUT, task).await {
            Err(_) => Err(LayoutError::MeasurementTimeout(RENDER_TIMEOUT)),
            Ok(Err(join)) => Err(LayoutError::Internal(join.to_string())),
            Ok(Ok(rendered)) => Ok(rendered),
        }
    }
}

fn paragraph_height(text: &str) -> f32 {
    wrapped_line_count(text, BODY_FONT_PX, CONTENT_WIDTH) as f32 * BODY_LINE_HEIGHT
}

fn header_height(document: &ResumeData) -> f32 {
    let info = &document.personal_info;
    let contact_fields = [
        !info.email.is_empty(),
        !info.phone.is_empty(),
        !info.address.is_empty(),
        !info.age.is_empty(),
        !info.marital_status.is_empty(),
        !info.drivers_license.is_empty() && info.drivers_license != "Não possuo",
    ]
    .iter()
    .filter(|present| **present)
    .count() as f32;

    // Contact items flow three to a row.
    let contact_height = if contact_fields > 0.0 {
        CONTACT_TOP_MARGIN + (contact_fields / 3.0).ceil() * CONTACT_ROW
    } else {
        0.0
    };

    PAGE_PADDING + NAME_LINE + JOB_TITLE_LINE + contact_height + HEADER_BOTTOM_PADDING
}

fn languages_height(document: &ResumeData) -> f32 {
    // Inline flex rows: "Language: proficiency" chips wrap at content width.
    let mut rows = 1u32;
    let mut row_width = 0.0f32;
    for lang in &document.languages {
        let label = format!("{}: {}", lang.language, lang.proficiency);
        let width = text_width_px(&label, BODY_FONT_PX);
        let needed = if row_width == 0.0 {
            width
        } else {
            row_width + LANGUAGE_GAP_X + width
        };
        if needed > CONTENT_WIDTH && row_width > 0.0 {
            rows += 1;
            row_width = width;
        } else {
            row_width = needed;
        }
    }
    rows as f32 * LANGUAGE_ROW
}

fn skills_height(document: &ResumeData) -> f32 {
    let mut rows = 1u32;
    let mut row_width = 0.0f32;
    for skill in &document.skills {
        let width = text_width_px(skill, SKILL_FONT_PX) + SKILL_PILL_PADDING_X;
        let needed = if row_width == 0.0 {
            width
        } else {
            row_width + SKILL_PILL_GAP + width
        };
        if needed > CONTENT_WIDTH && row_width > 0.0 {
            rows += 1;
            row_width = width;
        } else {
            row_width = needed;
        }
    }
    rows as f32 * (SKILL_PILL_HEIGHT + SKILL_PILL_GAP)
}

/// Renders the whole document's geometry at page width. Sections with no
/// backing data are omitted entirely; they reserve no space on any page.
pub(crate) fn render_geometry(document: &ResumeData) -> RenderedResume {
    let mut sections = Vec::new();

    if !document.summary.trim().is_empty() {
        sections.push(RenderedSection {
            key: SectionKey::Summary,
            margin_top: 0.0,
            title_height: Some(TITLE_BOX),
            body: RenderedBody::Paragraph(paragraph_height(&document.summary)),
        });
    }

    if !document.experiences.is_empty() {
        let entries = document
            .experiences
            .iter()
            .enumerate()
            .map(|(i, exp)| RenderedEntry {
                id: exp.id.clone(),
                margin_top: if i == 0 { 0.0 } else { SECTION_GAP },
                header_height: ENTRY_HEADER,
                description_height: if exp.description.trim().is_empty() {
                    None
                } else {
                    Some(paragraph_height(&exp.description) + DESCRIPTION_TOP_MARGIN)
                },
            })
            .collect();
        sections.push(RenderedSection {
            key: SectionKey::Experiences,
            margin_top: section_margin(&sections),
            title_height: Some(TITLE_BOX),
            body: RenderedBody::Entries(entries),
        });
    }

    if !document.education.is_empty() {
        let n = document.education.len() as f32;
        sections.push(RenderedSection {
            key: SectionKey::Education,
            margin_top: section_margin(&sections),
            title_height: Some(TITLE_BOX),
            body: RenderedBody::Whole(n * ENTRY_HEADER + (n - 1.0) * COMPACT_GAP),
        });
    }

    if !document.courses.is_empty() {
        let n = document.courses.len() as f32;
        sections.push(RenderedSection {
            key: SectionKey::Courses,
            margin_top: section_margin(&sections),
            title_height: Some(TITLE_BOX),
            body: RenderedBody::Whole(n * ENTRY_HEADER + (n - 1.0) * COMPACT_GAP),
        });
    }

    if !document.languages.is_empty() {
        sections.push(RenderedSection {
            key: SectionKey::Languages,
            margin_top: section_margin(&sections),
            title_height: Some(TITLE_BOX),
            body: RenderedBody::Whole(languages_height(document)),
        });
    }

    if !document.skills.is_empty() {
        sections.push(RenderedSection {
            key: SectionKey::Skills,
            margin_top: section_margin(&sections),
            title_height: Some(TITLE_BOX),
            body: RenderedBody::Whole(skills_height(document)),
        });
    }

    let header = header_height(document);
    let body_margin_top = SECTION_GAP;
    let body_height: f32 = sections
        .iter()
        .map(|s| {
            let body = match &s.body {
                RenderedBody::Paragraph(h) | RenderedBody::Whole(h) => *h,
                RenderedBody::Entries(entries) => entries
                    .iter()
                    .map(|e| e.margin_top + e.header_height + e.description_height.unwrap_or(0.0))
                    .sum(),
            };
            s.margin_top + s.title_height.unwrap_or(0.0) + body
        })
        .sum();

    RenderedResume {
        total_height: header + body_margin_top + body_height + PAGE_PADDING,
        header_height: header,
        body_margin_top,
        sections,
    }
}

fn section_margin(sections_so_far: &[RenderedSection]) -> f32 {
    if sections_so_far.is_empty() {
        0.0
    } else {
        SECTION_GAP
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
