//! Pagination – flows render blocks down A4 pages.
//!
//! Each block becomes one [`LayoutBox`] spanning the content width. Text is
//! word-wrapped first; a block that would cross the bottom margin moves to
//! a fresh page unless it is the first thing on the page.

use crate::block::{Block, Style};
use crate::fonts::{wrap_text, FontMetrics};
use crate::layout_config::*;
use crate::pipeline::PipelineConfig;

/// Default page margins in points.
pub const PAGE_MARGIN_PT: f32 = 40.0;

const LINE_HEIGHT: f32 = 1.3;
/// Inner padding of highlighted boxes.
const FILL_PADDING_PT: f32 = 4.0;
const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
/// Light grey behind answers and the selected option.
pub const HIGHLIGHT: [f32; 4] = [220.0 / 255.0, 220.0 / 255.0, 220.0 / 255.0, 1.0];

/// How one block style is typeset.
struct Typeset {
    font_size: f32,
    bold: bool,
    background: Option<[f32; 4]>,
    space_after: f32,
}

fn typeset(block: &Block, config: &PipelineConfig) -> Typeset {
    match (block.style(), block.is_selected()) {
        (Style::Heading, _) => Typeset {
            font_size: config.heading_font_size,
            bold: true,
            background: None,
            space_after: 8.0,
        },
        (Style::Emphasized, _) => Typeset {
            font_size: config.font_size,
            bold: true,
            background: None,
            space_after: 4.0,
        },
        (Style::Plain, _) => Typeset {
            font_size: config.font_size,
            bold: false,
            background: None,
            space_after: 2.0,
        },
        (Style::Highlighted, selected) => Typeset {
            font_size: config.font_size,
            bold: selected,
            background: Some(HIGHLIGHT),
            space_after: if selected { 2.0 } else { 12.0 },
        },
    }
}

/// Lay blocks out on pages. Always yields at least one page.
pub fn paginate(blocks: &[Block], config: &PipelineConfig, metrics: &FontMetrics) -> LayoutConfig {
    let page_width = config.effective_width();
    let page_height = config.effective_height();
    let margin = config.page_margin;

    let mut layout = LayoutConfig {
        title: config.title.clone(),
        page_width_pt: page_width,
        page_height_pt: page_height,
        pages: Vec::new(),
    };

    let content_width = page_width - 2.0 * margin;
    let bottom = page_height - margin;

    let mut current = PageLayout {
        page_index: 0,
        boxes: Vec::new(),
    };
    let mut y = margin;

    for block in blocks {
        let lbox = layout_block(block, config, metrics, margin, content_width);
        let space_after = typeset(block, config).space_after;

        if y + lbox.height > bottom && !current.boxes.is_empty() {
            let next = PageLayout {
                page_index: layout.pages.len() + 1,
                boxes: Vec::new(),
            };
            layout.pages.push(std::mem::replace(&mut current, next));
            y = margin;
        }

        let height = lbox.height;
        current.boxes.push(LayoutBox { y, ..lbox });
        y += height + space_after;
    }

    if !current.boxes.is_empty() || layout.pages.is_empty() {
        layout.pages.push(current);
    }
    layout
}

/// Build the box for one block at y = 0.
fn layout_block(
    block: &Block,
    config: &PipelineConfig,
    metrics: &FontMetrics,
    x: f32,
    width: f32,
) -> LayoutBox {
    let ts = typeset(block, config);
    let padding = if ts.background.is_some() {
        FILL_PADDING_PT
    } else {
        0.0
    };
    let line_height = metrics.line_height(ts.font_size, LINE_HEIGHT);

    let lines: Vec<TextLine> = wrap_text(
        &block.line(),
        ts.font_size,
        ts.bold,
        width - 2.0 * padding,
        metrics,
    )
    .into_iter()
    .enumerate()
    .map(|(i, text)| TextLine {
        text,
        x_offset: padding,
        y_offset: padding + i as f32 * line_height,
    })
    .collect();

    let height = lines.len() as f32 * line_height + 2.0 * padding;

    LayoutBox {
        x,
        y: 0.0,
        width,
        height,
        background_color: ts.background,
        text: TextContent {
            lines,
            font_size: ts.font_size,
            bold: ts.bold,
            color: BLACK,
            line_height,
        },
    }
}
