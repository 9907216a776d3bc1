//! # Printer Module
//!
//! Label stock definitions and font face selection.
//!
//! ## Modules
//!
//! - [`config`]: Sticker dimensions and layout policy

pub mod config;

pub use config::{FontFace, HeightClass, LabelStock, mm_to_pt, pt_to_mm};
