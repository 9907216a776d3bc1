//! # Page IR
//!
//! A rendered label is a [`LabelPage`]: page size, font, and a flat list of
//! draw operations in PDF coordinates (points, origin bottom-left, text
//! positioned by baseline). Pages are immutable once built and can be
//! inspected in tests before the PDF writer consumes them.
//!
//! ```text
//! LabelSpec → fit → PageRenderer → LabelPage (DrawOps) → PDF writer
//! ```

use crate::label::LabelSpec;
use crate::layout::{FitInput, FitPolicy, Fitted, fit, wrap};
use crate::printer::{FontFace, LabelStock, mm_to_pt};

/// Which optional image an image op refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSlot {
    Logo,
    Qr,
}

/// One drawing operation on a label page.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// A line of text with its baseline starting at (x, y).
    Text { x: f64, y: f64, text: String },
    /// An image with its lower-left corner at (x, y).
    Image {
        slot: ImageSlot,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

/// One physical label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPage {
    pub width: f64,
    pub height: f64,
    pub face: FontFace,
    pub font_size: f64,
    pub ops: Vec<DrawOp>,
}

impl LabelPage {
    /// A page with no content.
    pub fn blank(width: f64, height: f64, face: FontFace) -> Self {
        Self {
            width,
            height,
            face,
            font_size: 0.0,
            ops: Vec::new(),
        }
    }

    /// Text lines in draw order.
    pub fn text_lines(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            DrawOp::Image { .. } => None,
        })
    }

    pub fn has_image(&self, slot: ImageSlot) -> bool {
        self.ops
            .iter()
            .any(|op| matches!(op, DrawOp::Image { slot: s, .. } if *s == slot))
    }
}

/// A label's fitted layout plus its copies, ready to append to a document.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedLabel {
    pub page: LabelPage,
    pub copies: u32,
    pub fitted: Fitted,
}

/// Lays out [`LabelSpec`]s on a label stock.
#[derive(Debug, Clone)]
pub struct PageRenderer<'a> {
    stock: &'a LabelStock,
    face: FontFace,
    logo: bool,
    qr: bool,
}

impl<'a> PageRenderer<'a> {
    pub fn new(stock: &'a LabelStock, face: FontFace) -> Self {
        Self {
            stock,
            face,
            logo: false,
            qr: false,
        }
    }

    /// Reserve and draw the logo in the top-right corner.
    pub fn with_logo(mut self, enabled: bool) -> Self {
        self.logo = enabled;
        self
    }

    /// Reserve and draw the QR code in the bottom-right corner.
    pub fn with_qr(mut self, enabled: bool) -> Self {
        self.qr = enabled;
        self
    }

    /// Choose the font size and wrap the label's text.
    pub fn fit(&self, spec: &LabelSpec) -> Fitted {
        let remarks = spec.remarks_line();
        let input = FitInput {
            header_lines: &spec.header_lines,
            description: &spec.description,
            footer_lines: &spec.footer_lines,
            remarks_line: remarks.as_deref(),
        };
        fit(
            &input,
            &self.face,
            self.stock.available_width_pt(),
            self.stock.height_pt(spec.height_class),
            &FitPolicy::from_stock(self.stock),
        )
    }

    /// Fit and draw one label.
    pub fn render(&self, spec: &LabelSpec) -> RenderedLabel {
        let fitted = self.fit(spec);
        let page = self.draw(spec, &fitted);
        RenderedLabel {
            page,
            copies: spec.copies,
            fitted,
        }
    }

    /// Draw a label at an already-fitted size.
    ///
    /// Text stacks downward from the top-left corner. The description never
    /// starts higher than `description_top_mm` below the top edge so it
    /// clears the logo; footer lines are wrapped here at the fitted size.
    pub fn draw(&self, spec: &LabelSpec, fitted: &Fitted) -> LabelPage {
        let stock = self.stock;
        let width = stock.width_pt();
        let height = stock.height_pt(spec.height_class);
        let pad = stock.padding_pt();
        let right_margin = mm_to_pt(stock.right_margin_mm);
        let size = fitted.font_size;
        let advance = size * stock.line_spacing;
        let text_width = stock.available_width_pt();

        let mut ops = Vec::new();
        let mut y = height - pad - size;
        y -= size * 0.1;

        for line in &spec.header_lines {
            ops.push(text(pad, y, line));
            y -= advance;
        }
        y -= size * 0.4;

        if self.logo {
            let logo_w = mm_to_pt(stock.logo_width_mm);
            let logo_h = mm_to_pt(stock.logo_height_mm);
            ops.push(DrawOp::Image {
                slot: ImageSlot::Logo,
                x: width - logo_w - right_margin,
                y: height - logo_h - mm_to_pt(stock.logo_top_offset_mm),
                width: logo_w,
                height: logo_h,
            });
        }

        y = y.min(height - mm_to_pt(stock.description_top_mm));

        for line in &fitted.description {
            ops.push(text(pad, y, line));
            y -= advance;
        }
        y -= size * 0.5;

        for footer in &spec.footer_lines {
            for line in wrap(footer, &self.face, size, text_width) {
                ops.push(text(pad, y, &line));
                y -= advance;
            }
        }

        for line in &fitted.remarks {
            ops.push(text(pad, y, line));
            y -= advance;
        }

        if self.qr {
            let qr = mm_to_pt(stock.qr_size_mm);
            ops.push(DrawOp::Image {
                slot: ImageSlot::Qr,
                x: width - qr - right_margin,
                y: pad,
                width: qr,
                height: qr,
            });
        }

        LabelPage {
            width,
            height,
            face: self.face,
            font_size: size,
            ops,
        }
    }
}

fn text(x: f64, y: f64, line: &str) -> DrawOp {
    DrawOp::Text {
        x,
        y,
        text: line.to_string(),
    }
}
