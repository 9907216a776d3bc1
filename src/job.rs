//! # Sticker Job
//!
//! The end-to-end pipeline for one workbook:
//!
//! ```text
//! RawSheet → locate header → preamble → line items → LabelSpecs
//!          → fit + draw (× copies) → LabelDocument → PDF
//! ```
//!
//! A missing header row aborts before any page exists. Everything after
//! that degrades instead of failing: rows without a description are
//! skipped, an unreachable logo or failed QR code just leaves the element
//! off every label.

use std::path::{Path, PathBuf};

use crate::document::{Finalized, LabelDocument};
use crate::error::EtiquetaError;
use crate::label::LabelSpec;
use crate::printer::{FontFace, HeightClass, LabelStock};
use crate::render::{HttpImage, ImageProvider, NoImage, PageRenderer, QrImage, RenderedLabel};
use crate::sheet::{
    self, LineItem, PreambleMetadata, RawSheet, Table, extract_preamble, locate_header,
};

/// Where the logo is downloaded from.
pub const DEFAULT_LOGO_URL: &str = "https://www.msgoilfield.com/logo.png";

/// What the QR code encodes.
pub const DEFAULT_QR_PAYLOAD: &str = "https://www.msgoilfield.com";

/// Output file used when none is given.
pub const DEFAULT_OUTPUT: &str = "stickers.pdf";

/// Run-time choices for one job.
#[derive(Debug, Clone)]
pub struct JobOptions {
    pub face: FontFace,
    pub include_logo: bool,
    pub include_qr: bool,
    pub logo_url: String,
    pub qr_payload: String,
    pub stock: LabelStock,
}

impl Default for JobOptions {
    fn default() -> Self {
        Self {
            face: FontFace::default(),
            include_logo: false,
            include_qr: false,
            logo_url: DEFAULT_LOGO_URL.to_string(),
            qr_payload: DEFAULT_QR_PAYLOAD.to_string(),
            stock: LabelStock::standard(),
        }
    }
}

impl JobOptions {
    /// Logo source for these options.
    pub fn logo_provider(&self) -> Box<dyn ImageProvider> {
        if self.include_logo {
            Box::new(HttpImage::new(self.logo_url.clone()))
        } else {
            Box::new(NoImage)
        }
    }

    /// QR source for these options.
    pub fn qr_provider(&self) -> Box<dyn ImageProvider> {
        if self.include_qr {
            Box::new(QrImage::new(self.qr_payload.clone()))
        } else {
            Box::new(NoImage)
        }
    }

    fn renderer(&self, logo: bool, qr: bool) -> PageRenderer<'_> {
        PageRenderer::new(&self.stock, self.face)
            .with_logo(logo)
            .with_qr(qr)
    }
}

/// Labels extracted from a sheet, before any layout.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedJob {
    /// 0-based index of the header row
    pub header_row: usize,
    pub preamble: PreambleMetadata,
    pub labels: Vec<LabelSpec>,
    /// Data rows dropped for lack of a description
    pub skipped: usize,
}

impl PreparedJob {
    /// Header row as the user sees it in a spreadsheet (1-based).
    pub fn header_row_number(&self) -> usize {
        self.header_row + 1
    }

    /// Pages the document will hold.
    pub fn total_copies(&self) -> usize {
        self.labels.iter().map(|l| l.copies as usize).sum()
    }
}

/// Locate the header, read the preamble and compose one label per usable row.
pub fn prepare(sheet: &RawSheet, stock: &LabelStock) -> Result<PreparedJob, EtiquetaError> {
    let header_row = locate_header(sheet)?;
    let preamble = extract_preamble(sheet, header_row);
    let table = Table::from_sheet(sheet, header_row);

    let mut labels = Vec::with_capacity(table.len());
    let mut skipped = 0;
    for (i, record) in table.records().enumerate() {
        match LineItem::from_record(&record) {
            Some(item) => labels.push(LabelSpec::compose(&item, &preamble, stock.max_copies)),
            None => {
                tracing::debug!(row = i + 1, "row has no description, skipped");
                skipped += 1;
            }
        }
    }

    Ok(PreparedJob {
        header_row,
        preamble,
        labels,
        skipped,
    })
}

/// Fit and draw each label as `options` lays it out, without fetching images.
pub fn layout_labels(prepared: &PreparedJob, options: &JobOptions) -> Vec<RenderedLabel> {
    let renderer = options.renderer(options.include_logo, options.include_qr);
    prepared.labels.iter().map(|spec| renderer.render(spec)).collect()
}

/// Build the document: every label's copies in row order.
///
/// Each provider is asked once. A provider returning `None` removes that
/// element from the layout entirely.
pub fn assemble(
    prepared: &PreparedJob,
    options: &JobOptions,
    logo: &dyn ImageProvider,
    qr: &dyn ImageProvider,
) -> Result<LabelDocument, EtiquetaError> {
    let logo_image = logo.provide();
    let qr_image = qr.provide();

    let renderer = options.renderer(logo_image.is_some(), qr_image.is_some());
    let title = match prepared.preamble.po_number.as_str() {
        "" => "PO Stickers".to_string(),
        po => format!("PO Stickers {}", po),
    };
    let mut document = LabelDocument::new(&options.stock)
        .with_title(title)
        .with_images(logo_image.as_ref(), qr_image.as_ref());

    for (i, spec) in prepared.labels.iter().enumerate() {
        let rendered = renderer.render(spec);
        tracing::debug!(
            label = i + 1,
            size = rendered.fitted.font_size,
            lines = rendered.page.text_lines().count(),
            copies = rendered.copies,
            "label fitted"
        );
        if !rendered.fitted.fits {
            tracing::warn!(
                label = i + 1,
                "text overflows the label at the minimum font size"
            );
        }
        document.push_copies(&rendered)?;
    }

    Ok(document)
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct JobReport {
    /// 1-based header row
    pub header_row: usize,
    pub company: String,
    pub po_number: String,
    pub labels: usize,
    pub skipped: usize,
    pub pages: usize,
    pub output: PathBuf,
}

/// Run the pipeline over an in-memory sheet and write the PDF to `output`.
pub fn generate(
    sheet: &RawSheet,
    output: &Path,
    options: &JobOptions,
    logo: &dyn ImageProvider,
    qr: &dyn ImageProvider,
) -> Result<JobReport, EtiquetaError> {
    let prepared = prepare(sheet, &options.stock)?;
    tracing::info!(
        header_row = prepared.header_row_number(),
        company = %prepared.preamble.company,
        po = %prepared.preamble.po_number,
        "header located"
    );

    let mut document = assemble(&prepared, options, logo, qr)?;
    let pages = match document.finalize(output)? {
        Finalized::Saved { pages } => pages,
        Finalized::AlreadySaved => document.len(),
    };

    tracing::info!(
        labels = prepared.labels.len(),
        skipped = prepared.skipped,
        pages,
        output = %output.display(),
        "stickers generated"
    );

    Ok(JobReport {
        header_row: prepared.header_row_number(),
        company: prepared.preamble.company,
        po_number: prepared.preamble.po_number,
        labels: prepared.labels.len(),
        skipped: prepared.skipped,
        pages,
        output: output.to_path_buf(),
    })
}

/// Load a workbook and generate its stickers with the providers `options` selects.
pub fn run(input: &Path, output: &Path, options: &JobOptions) -> Result<JobReport, EtiquetaError> {
    let sheet = sheet::load_workbook(input)?;
    let logo = options.logo_provider();
    let qr = options.qr_provider();
    generate(&sheet, output, options, logo.as_ref(), qr.as_ref())
}

/// One line of `inspect` output.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSummary {
    pub description: String,
    pub copies: u32,
    pub height_class: HeightClass,
    pub font_size: f64,
    pub fits: bool,
}

/// Summaries of every label without writing a document.
pub fn summarize(prepared: &PreparedJob, options: &JobOptions) -> Vec<LabelSummary> {
    prepared
        .labels
        .iter()
        .zip(layout_labels(prepared, options))
        .map(|(spec, rendered)| LabelSummary {
            description: spec.description.clone(),
            copies: rendered.copies,
            height_class: spec.height_class,
            font_size: rendered.fitted.font_size,
            fits: rendered.fitted.fits,
        })
        .collect()
}
