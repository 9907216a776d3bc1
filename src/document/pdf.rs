//! PDF backend: writes [`LabelPage`]s with printpdf.
//!
//! Text uses the base-14 font matching the page's [`FontFace`]. Images are
//! flattened onto white, registered once per document and referenced from
//! every page that draws them, scaled to the exact box the page op asks for.

use image::DynamicImage;
use printpdf::{
    BuiltinFont, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, Point, Pt, RawImage,
    RawImageData, RawImageFormat, TextItem, XObjectId, XObjectTransform,
};

use crate::printer::{FontFace, pt_to_mm};
use crate::render::{DrawOp, ImageSlot, LabelPage};

/// Decoded images available to image ops.
#[derive(Debug, Clone, Default)]
pub struct PageImages {
    pub logo: Option<RgbRaster>,
    pub qr: Option<RgbRaster>,
}

/// Opaque 8-bit RGB pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbRaster {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl RgbRaster {
    /// Composite `image` over a white background.
    ///
    /// Returns `None` for a zero-sized image.
    pub fn flatten(image: &DynamicImage) -> Option<Self> {
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return None;
        }

        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for pixel in rgba.pixels() {
            let [r, g, b, a] = pixel.0;
            let alpha = u32::from(a);
            for channel in [r, g, b] {
                let blended = (u32::from(channel) * alpha + 255 * (255 - alpha) + 127) / 255;
                data.push(blended as u8);
            }
        }

        Some(Self {
            width,
            height,
            data,
        })
    }

    fn to_raw_image(&self) -> RawImage {
        RawImage {
            pixels: RawImageData::U8(self.data.clone()),
            width: self.width as usize,
            height: self.height as usize,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        }
    }
}

/// Image XObjects registered with the document.
struct Registered {
    logo: Option<(XObjectId, u32, u32)>,
    qr: Option<(XObjectId, u32, u32)>,
}

impl Registered {
    fn get(&self, slot: ImageSlot) -> Option<&(XObjectId, u32, u32)> {
        match slot {
            ImageSlot::Logo => self.logo.as_ref(),
            ImageSlot::Qr => self.qr.as_ref(),
        }
    }
}

fn builtin(face: FontFace) -> BuiltinFont {
    match face {
        FontFace::HelveticaBold => BuiltinFont::HelveticaBold,
        FontFace::TimesBold => BuiltinFont::TimesBold,
        FontFace::CourierBold => BuiltinFont::CourierBold,
    }
}

/// Serialize `pages` as a PDF document.
pub fn render_pdf(title: &str, pages: &[LabelPage], images: &PageImages) -> Vec<u8> {
    let mut doc = PdfDocument::new(title);

    let mut register = |raster: &RgbRaster| {
        (doc.add_image(&raster.to_raw_image()), raster.width, raster.height)
    };
    let registered = Registered {
        logo: images.logo.as_ref().map(&mut register),
        qr: images.qr.as_ref().map(&mut register),
    };

    let pdf_pages: Vec<PdfPage> = pages
        .iter()
        .map(|page| {
            PdfPage::new(
                Mm(pt_to_mm(page.width) as f32),
                Mm(pt_to_mm(page.height) as f32),
                page_ops(page, &registered),
            )
        })
        .collect();

    let mut warnings = Vec::new();
    let bytes = doc
        .with_pages(pdf_pages)
        .save(&PdfSaveOptions::default(), &mut warnings);
    if !warnings.is_empty() {
        tracing::debug!(count = warnings.len(), "PDF writer warnings");
    }
    bytes
}

fn page_ops(page: &LabelPage, registered: &Registered) -> Vec<Op> {
    let font = builtin(page.face);
    let mut ops = Vec::new();

    for op in &page.ops {
        match op {
            DrawOp::Text { x, y, text } => {
                ops.push(Op::StartTextSection);
                ops.push(Op::SetTextCursor {
                    pos: Point {
                        x: Pt(*x as f32),
                        y: Pt(*y as f32),
                    },
                });
                ops.push(Op::SetFontSizeBuiltinFont {
                    size: Pt(page.font_size as f32),
                    font,
                });
                ops.push(Op::WriteTextBuiltinFont {
                    items: vec![TextItem::Text(text.clone())],
                    font,
                });
                ops.push(Op::EndTextSection);
            }
            DrawOp::Image {
                slot,
                x,
                y,
                width,
                height,
            } => match registered.get(*slot) {
                Some((id, px_w, px_h)) => {
                    let transform = image_transform(*px_w, *px_h, *x, *y, *width, *height);
                    ops.push(Op::UseXobject {
                        id: id.clone(),
                        transform,
                    });
                }
                None => tracing::debug!(?slot, "no image for slot, skipped"),
            },
        }
    }

    ops
}

/// Place a `px_w` × `px_h` image so it covers exactly `width` × `height`
/// points at (x, y).
fn image_transform(
    px_w: u32,
    px_h: u32,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
) -> XObjectTransform {
    // At `dpi`, one pixel is 72/dpi points.
    let dpi = f64::from(px_w) * 72.0 / width;
    let natural_height = f64::from(px_h) * 72.0 / dpi;

    XObjectTransform {
        translate_x: Some(Pt(x as f32)),
        translate_y: Some(Pt(y as f32)),
        dpi: Some(dpi as f32),
        scale_y: Some((height / natural_height) as f32),
        ..Default::default()
    }
}
