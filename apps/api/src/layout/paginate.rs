//! Page packing: a single forward pass over the measured block sequence,
//! greedily filling fixed-height pages.
//!
//! Invariants enforced here:
//! - titles are layout-only bookkeeping and never copied into pages;
//! - a title is never left orphaned at a page bottom when its first content
//!   block was going to move (look-ahead reserves the pair's space);
//! - splittable blocks are cut only when the sliver staying behind is at
//!   least the minimum split height, recording continuation metadata on both
//!   sides of the boundary;
//! - every page except possibly the last is full up to the content budget,
//!   and pages carrying only style/continuation metadata are pruned.

use crate::layout::blocks::Block;
use crate::layout::geometry::PageGeometry;
use crate::models::page::{ContinuationEntry, PageDocument};
use crate::models::resume::{ResumeData, Style};

/// Packs `blocks` into page documents.
///
/// `initial_height` is the space already consumed at the top of page 1 (the
/// header/contact box plus the content container's top margin). Pages after
/// the first start at the continuation top margin instead.
pub fn pack(
    blocks: &[Block],
    document: &ResumeData,
    initial_height: f32,
    geometry: &PageGeometry,
) -> Vec<PageDocument> {
    let limit = geometry.content_limit();
    let mut pages: Vec<PageDocument> = Vec::new();
    let mut current = PageDocument::first_page(document);
    let mut current_height = initial_height;

    for (i, block) in blocks.iter().enumerate() {
        let block_total = block.height() + block.margin_top();

        // Title look-ahead: reserve room for the title together with the
        // start of its section so the title cannot end a page alone.
        if block.is_title() {
            if let Some(next) = blocks.get(i + 1) {
                if next.section() == block.section() && !next.is_title() {
                    let reserved = if next.is_splittable() {
                        geometry.min_split_height
                    } else {
                        next.height()
                    };
                    let space_needed = block_total + next.margin_top() + reserved;
                    if current_height + space_needed > limit {
                        start_new_page(&mut pages, &mut current, &mut current_height, &document.style, geometry);
                    }
                }
            }
        }

        if current_height + block_total <= limit {
            if let Some(content) = block.content() {
                content.payload.apply_to(&mut current);
            }
            current_height += block_total;
            continue;
        }

        let remaining = limit - current_height;
        let space_for_content = remaining - block.margin_top();

        match block {
            Block::Splittable(content) if space_for_content >= geometry.min_split_height => {
                // Cut the block: the visible slice stays, the rest re-enters
                // on the next page under the same id.
                let visible = space_for_content;
                content.payload.apply_to(&mut current);
                current.continuation.insert(
                    content.id.clone(),
                    ContinuationEntry {
                        offset: 0.0,
                        total_height: content.height,
                        visible_height: Some(visible),
                    },
                );

                start_new_page(&mut pages, &mut current, &mut current_height, &document.style, geometry);

                content.payload.apply_to(&mut current);
                current.continuation.insert(
                    content.id.clone(),
                    ContinuationEntry {
                        offset: visible,
                        total_height: content.height,
                        visible_height: None,
                    },
                );
                current_height += content.height - visible;
            }

            _ => {
                start_new_page(&mut pages, &mut current, &mut current_height, &document.style, geometry);
                if let Some(content) = block.content() {
                    content.payload.apply_to(&mut current);
                }
                current_height += block_total;
            }
        }
    }

    if current.has_content() || !current.continuation.is_empty() {
        pages.push(current);
    }

    // A page must carry at least one real content field to exist.
    pages.retain(PageDocument::has_content);
    pages
}

fn start_new_page(
    pages: &mut Vec<PageDocument>,
    current: &mut PageDocument,
    current_height: &mut f32,
    style: &Style,
    geometry: &PageGeometry,
) {
    pages.push(std::mem::replace(
        current,
        PageDocument::continuation_page(style),
    ));
    *current_height = geometry.continuation_top_margin;
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::blocks::{BlockPayload, ContentBlock, SectionKey, TitleBlock};
    use crate::models::resume::{Education, Experience};

    fn geometry() -> PageGeometry {
        PageGeometry::default() // limit 1067, continuation top 56, min split 50
    }

    fn title(section: SectionKey, height: f32, margin_top: f32) -> Block {
        Block::Title(TitleBlock {
            section,
            height,
            margin_top,
        })
    }

    fn summary_block(text: &str, height: f32) -> Block {
        Block::Splittable(ContentBlock {
            id: "summary".to_string(),
            section: SectionKey::Summary,
            payload: BlockPayload::Summary(text.to_string()),
            height,
            margin_top: 0.0,
        })
    }

    fn experience_header(id: &str, height: f32, margin_top: f32) -> Block {
        Block::Atomic(ContentBlock {
            id: format!("{id}-header"),
            section: SectionKey::Experiences,
            payload: BlockPayload::Experience(Experience {
                id: id.to_string(),
                ..Default::default()
            }),
            height,
            margin_top,
        })
    }

    fn education_block(height: f32) -> Block {
        Block::Atomic(ContentBlock {
            id: "education".to_string(),
            section: SectionKey::Education,
            payload: BlockPayload::Education(vec![Education {
                id: "e1".to_string(),
                degree: "BSc".to_string(),
                ..Default::default()
            }]),
            height,
            margin_top: 0.0,
        })
    }

    fn doc_with_summary(text: &str) -> ResumeData {
        ResumeData {
            summary: text.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_everything_fits_on_one_page() {
        let doc = doc_with_summary("short");
        let blocks = vec![title(SectionKey::Summary, 36.0, 0.0), summary_block("short", 400.0)];
        let pages = pack(&blocks, &doc, 200.0, &geometry());
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].summary.as_deref(), Some("short"));
        assert!(pages[0].continuation.is_empty());
        assert!(pages[0].personal_info.is_some(), "page 1 carries personal info");
    }

    #[test]
    fn test_oversized_summary_splits_with_exact_continuation_metadata() {
        // Page 1 starts at 200; after a 36 px title, 831 px remain of the
        // 1067 budget, exactly the slice the summary keeps on page 1.
        let doc = doc_with_summary("long");
        let blocks = vec![title(SectionKey::Summary, 36.0, 0.0), summary_block("long", 1300.0)];
        let pages = pack(&blocks, &doc, 200.0, &geometry());
        assert_eq!(pages.len(), 2);

        let first = &pages[0].continuation["summary"];
        assert_eq!(first.offset, 0.0);
        assert_eq!(first.total_height, 1300.0);
        assert_eq!(first.visible_height, Some(831.0));
        assert_eq!(pages[0].summary.as_deref(), Some("long"));

        let second = &pages[1].continuation["summary"];
        assert_eq!(second.offset, 831.0);
        assert_eq!(second.total_height, 1300.0);
        assert_eq!(second.visible_height, None);
        // The split field is copied onto the second page too, which is what
        // keeps that page alive through pruning.
        assert_eq!(pages[1].summary.as_deref(), Some("long"));
        assert!(pages[1].personal_info.is_none(), "personal info is page 1 only");
        assert!(pages[1].style.is_some());
    }

    #[test]
    fn test_sliver_below_min_split_moves_block_wholly() {
        // After the filler, 47 px remain, below the 50 px minimum, so the
        // splittable block moves to page 2 uncut.
        let doc = doc_with_summary("text");
        let blocks = vec![education_block(820.0), summary_block("text", 100.0)];
        let pages = pack(&blocks, &doc, 200.0, &geometry());
        assert_eq!(pages.len(), 2);
        assert!(pages[0].summary.is_none());
        assert!(pages[0].continuation.is_empty());
        assert_eq!(pages[1].summary.as_deref(), Some("text"));
        assert!(pages[1].continuation.is_empty());
    }

    #[test]
    fn test_title_is_not_orphaned_at_page_bottom() {
        // The 52 px title alone would still fit (1020 + 52 <= 1067), but its
        // section's first block would not; both move to page 2.
        let doc = ResumeData {
            education: vec![Education::default()],
            skills: vec!["Rust".to_string()],
            ..Default::default()
        };
        let blocks = vec![
            education_block(820.0),
            title(SectionKey::Skills, 36.0, 16.0),
            Block::Atomic(ContentBlock {
                id: "skills".to_string(),
                section: SectionKey::Skills,
                payload: BlockPayload::Skills(vec!["Rust".to_string()]),
                height: 60.0,
                margin_top: 0.0,
            }),
        ];
        let pages = pack(&blocks, &doc, 200.0, &geometry());
        assert_eq!(pages.len(), 2);
        assert!(pages[0].skills.is_empty());
        assert_eq!(pages[1].skills, vec!["Rust".to_string()]);
    }

    #[test]
    fn test_title_lookahead_reserves_min_split_for_splittable_content() {
        // 1000 consumed; title 36 + min split 50 = 86 needed, 1000 + 86 > 1067
        // pushes the pair even though the title plus a sliver would fit.
        let doc = doc_with_summary("text");
        let blocks = vec![
            education_block(800.0),
            title(SectionKey::Summary, 36.0, 16.0),
            summary_block("text", 500.0),
        ];
        let pages = pack(&blocks, &doc, 200.0, &geometry());
        assert_eq!(pages.len(), 2);
        // Summary starts fresh on page 2 and fits whole there: no split.
        assert!(pages[0].summary.is_none());
        assert_eq!(pages[1].summary.as_deref(), Some("text"));
        assert!(pages[1].continuation.is_empty());
    }

    #[test]
    fn test_atomic_blocks_fill_pages_up_to_budget() {
        // 300 px headers: page 1 holds 2 (200 + 2 * 300 = 800, a third would
        // overflow), later pages hold 3 (56 + 3 * 300 = 956).
        let doc = ResumeData {
            experiences: (0..8)
                .map(|i| Experience {
                    id: format!("x{i}"),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        };
        let blocks: Vec<Block> = (0..8)
            .map(|i| experience_header(&format!("x{i}"), 300.0, 0.0))
            .collect();
        let pages = pack(&blocks, &doc, 200.0, &geometry());
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].experiences.len(), 2);
        assert_eq!(pages[1].experiences.len(), 3);
        assert_eq!(pages[2].experiences.len(), 3);
    }

    #[test]
    fn test_few_experiences_share_one_page_without_continuation() {
        let doc = ResumeData {
            experiences: (0..3)
                .map(|i| Experience {
                    id: format!("e{i}"),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        };
        let blocks: Vec<Block> = (0..3)
            .map(|i| experience_header(&format!("e{i}"), 200.0, if i == 0 { 0.0 } else { 16.0 }))
            .collect();
        let pages = pack(&blocks, &doc, 200.0, &geometry());
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].experiences.len(), 3);
        assert!(pages[0].continuation.is_empty());
    }

    #[test]
    fn test_concatenated_pages_reconstruct_the_document() {
        let doc = ResumeData {
            summary: "long summary".to_string(),
            experiences: vec![
                Experience {
                    id: "a".to_string(),
                    ..Default::default()
                },
                Experience {
                    id: "b".to_string(),
                    ..Default::default()
                },
            ],
            education: vec![Education {
                id: "e1".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let blocks = vec![
            title(SectionKey::Summary, 36.0, 0.0),
            summary_block("long summary", 900.0),
            title(SectionKey::Experiences, 36.0, 16.0),
            experience_header("a", 300.0, 0.0),
            experience_header("b", 300.0, 16.0),
            title(SectionKey::Education, 36.0, 16.0),
            education_block(120.0),
        ];
        let pages = pack(&blocks, &doc, 200.0, &geometry());
        assert!(pages.len() > 1);

        let mut summary = None;
        let mut experience_ids = Vec::new();
        let mut education_items = 0usize;
        for page in &pages {
            if let Some(s) = &page.summary {
                summary = Some(s.clone());
            }
            for exp in &page.experiences {
                if !experience_ids.contains(&exp.id) {
                    experience_ids.push(exp.id.clone());
                }
            }
            education_items += page.education.len();
        }
        assert_eq!(summary.as_deref(), Some("long summary"));
        assert_eq!(experience_ids, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(education_items, 1, "whole sections land exactly once");
    }

    #[test]
    fn test_oversized_block_splits_once_per_visit() {
        // A 2500 px paragraph gets exactly one cut: its remainder overflows
        // page 2 rather than cascading onto further pages. Documented
        // behavior pending product clarification; see DESIGN.md.
        let doc = doc_with_summary("huge");
        let blocks = vec![summary_block("huge", 2500.0)];
        let pages = pack(&blocks, &doc, 200.0, &geometry());
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].continuation["summary"].visible_height, Some(867.0));
        assert_eq!(pages[1].continuation["summary"].offset, 867.0);
        assert_eq!(pages[1].continuation["summary"].visible_height, None);
    }

    #[test]
    fn test_pages_without_real_content_are_pruned() {
        // No blocks at all: the page-1 accumulator still carries personal
        // info, so it survives; nothing else is emitted.
        let doc = ResumeData::default();
        let pages = pack(&[], &doc, 200.0, &geometry());
        assert_eq!(pages.len(), 1);
        assert!(pages[0].personal_info.is_some());
    }
}
