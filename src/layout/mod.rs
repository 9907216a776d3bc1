//! # Auto-fit Typography
//!
//! Width measurement, greedy word wrapping, and the descending font-size
//! search that fits a label's text into its physical height.
//!
//! Everything here is a pure function of its inputs: no layout state
//! survives between labels.

pub mod fit;
pub mod metrics;
pub mod wrap;

pub use fit::{FitInput, FitPolicy, Fitted, fit};
pub use metrics::{MonospaceMeasure, TextMeasure};
pub use wrap::wrap;
