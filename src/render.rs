//! PDF writer – takes a [`LayoutConfig`] and produces PDF bytes using
//! `printpdf` (v0.8 ops-based API).

use printpdf::*;

use crate::layout_config::*;

/// Points to millimetres.
const PT_TO_MM: f32 = 0.352778;

/// Render a LayoutConfig into PDF bytes.
pub fn render_pdf(config: &LayoutConfig) -> Result<Vec<u8>, String> {
    if config.page_width_pt <= 0.0 || config.page_height_pt <= 0.0 {
        return Err(format!(
            "invalid page size {}x{} pt",
            config.page_width_pt, config.page_height_pt
        ));
    }

    let page_w = Mm(config.page_width_pt * PT_TO_MM);
    let page_h = Mm(config.page_height_pt * PT_TO_MM);

    let mut doc = PdfDocument::new(&config.title);
    let mut pages = Vec::new();

    for page_layout in &config.pages {
        let mut ops = Vec::new();
        for lbox in &page_layout.boxes {
            render_box(&mut ops, lbox, config.page_height_pt);
        }
        pages.push(PdfPage::new(page_w, page_h, ops));
    }

    // Ensure at least one page.
    if pages.is_empty() {
        pages.push(PdfPage::new(page_w, page_h, Vec::new()));
    }

    doc.with_pages(pages);
    // Raw `Tj` ops from `show_text` are dropped in secure mode.
    let options = PdfSaveOptions {
        secure: false,
        ..PdfSaveOptions::default()
    };
    let bytes = doc.save(&options, &mut Vec::new());
    log::debug!(
        "wrote {} page(s), {} bytes of PDF",
        config.pages.len().max(1),
        bytes.len()
    );

    Ok(bytes)
}

/// Map text to WinAnsiEncoding, one byte per glyph. Characters outside
/// the code page become `?`.
fn to_winlatin(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| match c {
            '\u{20AC}' => 0x80, // euro
            '\u{2026}' => 0x85, // ellipsis
            '\u{2018}' => 0x91, // left single quote
            '\u{2019}' => 0x92, // right single quote
            '\u{201C}' => 0x93, // left double quote
            '\u{201D}' => 0x94, // right double quote
            '\u{2022}' => 0x95, // bullet
            '\u{2013}' => 0x96, // en-dash
            '\u{2014}' => 0x97, // em-dash
            '\u{00A0}' => 0x20, // non-breaking space -> space
            c if (c as u32) < 256 => c as u8,
            _ => b'?',
        })
        .collect()
}

/// Ops that show one line of builtin-font text.
///
/// printpdf copies a builtin-font `TextItem` into the stream as UTF-8, so
/// pure ASCII goes through `WriteTextBuiltinFont` and anything wider is
/// written as a hex string with a raw `Tj`. The empty write still registers
/// the font in the page resources.
fn show_text(ops: &mut Vec<Op>, text: &str, font: BuiltinFont) {
    let bytes = to_winlatin(text);
    if bytes.is_ascii() {
        ops.push(Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(bytes.iter().map(|&b| char::from(b)).collect())],
            font,
        });
        return;
    }
    ops.push(Op::WriteTextBuiltinFont {
        items: Vec::new(),
        font,
    });
    ops.push(Op::Unknown {
        key: "Tj".to_string(),
        value: vec![DictItem::String {
            data: bytes,
            literal: false,
        }],
    });
}

fn rgb(c: [f32; 4]) -> Color {
    Color::Rgb(Rgb {
        r: c[0],
        g: c[1],
        b: c[2],
        icc_profile: None,
    })
}

fn point(x: f32, y: f32) -> LinePoint {
    LinePoint {
        p: Point { x: Pt(x), y: Pt(y) },
        bezier: false,
    }
}

/// Render one LayoutBox into PDF ops.
fn render_box(ops: &mut Vec<Op>, lbox: &LayoutBox, page_height: f32) {
    // PDF coordinate system: origin at bottom-left.
    // Our layout uses origin at top-left. Convert:
    let pdf_y = page_height - lbox.y;

    if let Some(bg) = lbox.background_color {
        let x1 = lbox.x;
        let y1 = pdf_y - lbox.height;
        let x2 = lbox.x + lbox.width;
        let y2 = pdf_y;

        ops.push(Op::SetFillColor { col: rgb(bg) });
        ops.push(Op::DrawPolygon {
            polygon: Polygon {
                rings: vec![PolygonRing {
                    points: vec![point(x1, y1), point(x2, y1), point(x2, y2), point(x1, y2)],
                }],
                mode: PaintMode::Fill,
                winding_order: WindingOrder::NonZero,
            },
        });
    }

    let text = &lbox.text;
    let font = if text.bold {
        BuiltinFont::HelveticaBold
    } else {
        BuiltinFont::Helvetica
    };

    for tline in &text.lines {
        if tline.text.is_empty() {
            continue;
        }
        let text_x = lbox.x + tline.x_offset;
        // Baseline ≈ top of line + ascender (approx 0.75 × font_size)
        let text_y = pdf_y - tline.y_offset - text.font_size * 0.75;

        ops.push(Op::StartTextSection);
        ops.push(Op::SetTextCursor {
            pos: Point {
                x: Pt(text_x),
                y: Pt(text_y),
            },
        });
        ops.push(Op::SetFontSizeBuiltinFont {
            size: Pt(text.font_size),
            font,
        });
        ops.push(Op::SetLineHeight {
            lh: Pt(text.line_height),
        });
        ops.push(Op::SetFillColor {
            col: rgb(text.color),
        });
        show_text(ops, &tline.text, font);
        ops.push(Op::EndTextSection);
    }
}
