//! # Label Document
//!
//! Collects rendered label pages in order and writes them to a single PDF.
//!
//! ```
//! use etiqueta::document::{Finalized, LabelDocument};
//! use etiqueta::printer::LabelStock;
//!
//! let stock = LabelStock::standard();
//! let mut doc = LabelDocument::new(&stock);
//! let path = std::env::temp_dir().join("etiqueta-doc-example.pdf");
//! assert!(matches!(doc.finalize(&path).unwrap(), Finalized::Saved { pages: 0 }));
//! assert_eq!(doc.finalize(&path).unwrap(), Finalized::AlreadySaved);
//! ```

pub mod pdf;

pub use pdf::{PageImages, RgbRaster};

use image::DynamicImage;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::EtiquetaError;
use crate::printer::{FontFace, HeightClass, LabelStock};
use crate::render::{LabelPage, RenderedLabel};

/// Outcome of [`LabelDocument::finalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finalized {
    /// The PDF was written with this many pages (blank filler excluded).
    Saved { pages: usize },
    /// The document had already been written; nothing was done.
    AlreadySaved,
}

/// An ordered sequence of label pages destined for one PDF file.
#[derive(Debug, Clone)]
pub struct LabelDocument {
    title: String,
    pages: Vec<LabelPage>,
    blank: LabelPage,
    images: PageImages,
    saved: bool,
}

impl LabelDocument {
    /// An empty document. If nothing is added, the written file holds one
    /// blank page of the stock's standard size.
    pub fn new(stock: &LabelStock) -> Self {
        Self {
            title: "PO Stickers".to_string(),
            pages: Vec::new(),
            blank: LabelPage::blank(
                stock.width_pt(),
                stock.height_pt(HeightClass::Standard),
                FontFace::default(),
            ),
            images: PageImages::default(),
            saved: false,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Images referenced by the pages' logo and QR ops.
    ///
    /// Images that can't be flattened are dropped with a warning and the
    /// matching ops draw nothing.
    pub fn with_images(mut self, logo: Option<&DynamicImage>, qr: Option<&DynamicImage>) -> Self {
        self.images = PageImages {
            logo: logo.and_then(|img| flatten_or_warn(img, "logo")),
            qr: qr.and_then(|img| flatten_or_warn(img, "QR code")),
        };
        self
    }

    /// Append one page.
    pub fn push(&mut self, page: LabelPage) -> Result<(), EtiquetaError> {
        if self.saved {
            return Err(EtiquetaError::Pdf("document already saved".to_string()));
        }
        self.pages.push(page);
        Ok(())
    }

    /// Append one page per copy of a rendered label, contiguously.
    pub fn push_copies(&mut self, label: &RenderedLabel) -> Result<(), EtiquetaError> {
        for _ in 0..label.copies {
            self.push(label.page.clone())?;
        }
        Ok(())
    }

    pub fn pages(&self) -> &[LabelPage] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn is_saved(&self) -> bool {
        self.saved
    }

    /// Render the document to PDF bytes without touching the filesystem.
    pub fn to_pdf_bytes(&self) -> Vec<u8> {
        let pages = match self.pages.as_slice() {
            [] => std::slice::from_ref(&self.blank),
            pages => pages,
        };
        pdf::render_pdf(&self.title, pages, &self.images)
    }

    /// Write the PDF to `path`.
    ///
    /// Only the first call writes; later calls return
    /// [`Finalized::AlreadySaved`] and leave the file alone.
    pub fn finalize(&mut self, path: &Path) -> Result<Finalized, EtiquetaError> {
        if self.saved {
            tracing::debug!(path = %path.display(), "document already saved, skipping");
            return Ok(Finalized::AlreadySaved);
        }

        let bytes = self.to_pdf_bytes();
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(&bytes)?;
        writer.flush()?;

        self.saved = true;
        tracing::info!(path = %path.display(), pages = self.pages.len(), "PDF written");
        Ok(Finalized::Saved {
            pages: self.pages.len(),
        })
    }
}

fn flatten_or_warn(image: &DynamicImage, what: &str) -> Option<RgbRaster> {
    let raster = RgbRaster::flatten(image);
    if raster.is_none() {
        tracing::warn!("{} image is empty; printing without it", what);
    }
    raster
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::mm_to_pt;

    fn page() -> LabelPage {
        LabelPage::blank(mm_to_pt(58.0), mm_to_pt(37.0), FontFace::HelveticaBold)
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("etiqueta-{}-{}.pdf", name, std::process::id()))
    }

    #[test]
    fn test_push_copies_contiguous() {
        let stock = LabelStock::standard();
        let mut doc = LabelDocument::new(&stock);
        let label = RenderedLabel {
            page: page(),
            copies: 3,
            fitted: crate::layout::Fitted {
                font_size: 7.0,
                description: vec![],
                remarks: vec![],
                fits: true,
            },
        };
        doc.push_copies(&label).unwrap();
        assert_eq!(doc.len(), 3);
        assert!(doc.pages().iter().all(|p| *p == label.page));
    }

    #[test]
    fn test_finalize_twice_is_noop() {
        let stock = LabelStock::standard();
        let mut doc = LabelDocument::new(&stock);
        doc.push(page()).unwrap();
        let path = temp_path("twice");

        assert_eq!(doc.finalize(&path).unwrap(), Finalized::Saved { pages: 1 });
        let first = std::fs::read(&path).unwrap();
        assert!(first.starts_with(b"%PDF"));

        assert_eq!(doc.finalize(&path).unwrap(), Finalized::AlreadySaved);
        assert_eq!(std::fs::read(&path).unwrap(), first);
        assert!(doc.push(page()).is_err());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_empty_document_still_writes() {
        let stock = LabelStock::standard();
        let doc = LabelDocument::new(&stock);
        assert!(doc.is_empty());
        let bytes = doc.to_pdf_bytes();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_unwritable_path_is_io_error() {
        let stock = LabelStock::standard();
        let mut doc = LabelDocument::new(&stock);
        let path = std::env::temp_dir().join("etiqueta-missing-dir").join("x").join("out.pdf");
        assert!(matches!(doc.finalize(&path), Err(EtiquetaError::Io(_))));
        assert!(!doc.is_saved());
    }
}
