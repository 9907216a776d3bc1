//! # Etiqueta - Purchase-Order Sticker Generator
//!
//! Etiqueta turns a purchase-order workbook into a print-ready PDF of
//! adhesive labels, one page per physical sticker. It provides:
//!
//! - **Spreadsheet intake**: header detection, preamble metadata and
//!   tolerant column matching for inconsistent templates
//! - **Label composition**: fixed header/description/footer/remarks blocks
//! - **Auto-fit layout**: the largest font size at which a label's text fits
//! - **PDF output**: base-14 fonts, optional logo and QR code
//!
//! ## Quick Start
//!
//! ```no_run
//! use etiqueta::job::{self, JobOptions};
//! use std::path::Path;
//!
//! let options = JobOptions::default();
//! let report = job::run(Path::new("po.xlsx"), Path::new("stickers.pdf"), &options)?;
//! println!("{} pages", report.pages);
//!
//! # Ok::<(), etiqueta::error::EtiquetaError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`sheet`] | Workbook loading, header, preamble, field normalization |
//! | [`label`] | Line item → label text blocks and copy count |
//! | [`layout`] | Font metrics, word wrap, auto-fit |
//! | [`render`] | Page IR and image providers |
//! | [`document`] | Page collection and PDF writer |
//! | [`printer`] | Label stock and font faces |
//! | [`job`] | End-to-end pipeline |
//! | [`error`] | Error types |

pub mod document;
pub mod error;
pub mod job;
pub mod label;
pub mod layout;
pub mod printer;
pub mod render;
pub mod sheet;

// Re-exports for convenience
pub use error::EtiquetaError;
pub use printer::{FontFace, LabelStock};
