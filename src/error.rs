//! # Error Types
//!
//! This module defines error types used throughout the etiqueta library.

use thiserror::Error;

/// Main error type for etiqueta operations
#[derive(Debug, Error)]
pub enum EtiquetaError {
    /// No row carries both a description and a PO column marker.
    /// The template is rejected before any page is drawn.
    #[error("Header row not found (no row mentions both 'description' and 'po')")]
    HeaderNotFound,

    /// Workbook could not be opened or read
    #[error("Sheet error: {0}")]
    Sheet(String),

    /// Image download, decode or generation error
    #[error("Image error: {0}")]
    Image(String),

    /// PDF serialization error
    #[error("PDF error: {0}")]
    Pdf(String),

    /// Invalid label stock configuration
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
