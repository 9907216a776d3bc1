//! # Label Rendering
//!
//! - [`page`]: fits a [`LabelSpec`](crate::label::LabelSpec) and draws it as
//!   a [`LabelPage`] of draw operations
//! - [`images`]: logo and QR code providers

pub mod images;
pub mod page;

pub use images::{HttpImage, ImageProvider, NoImage, QrImage, StaticImage};
pub use page::{DrawOp, ImageSlot, LabelPage, PageRenderer, RenderedLabel};
