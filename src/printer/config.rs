//! # Label Stock Configuration
//!
//! This module defines the physical sticker stock and the layout policy
//! constants the auto-fit engine and page renderer work against.
//!
//! ## Default Stock
//!
//! | Property | Value |
//! |----------|-------|
//! | Width | 58mm |
//! | Height (with remarks) | 39mm |
//! | Height (compact) | 37mm |
//! | Font search | 7.0pt down to 2.0pt, 0.1pt steps |
//!
//! ## Usage
//!
//! ```
//! use etiqueta::printer::{HeightClass, LabelStock};
//!
//! let stock = LabelStock::standard();
//! println!("Label: {:.1}pt x {:.1}pt",
//!          stock.width_pt(),
//!          stock.height_pt(HeightClass::Standard));
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::EtiquetaError;

/// Points per millimeter (PDF user space is 1/72 inch).
pub const PT_PER_MM: f64 = 72.0 / 25.4;

/// Convert millimeters to PDF points.
#[inline]
pub fn mm_to_pt(mm: f64) -> f64 {
    mm * PT_PER_MM
}

/// Convert PDF points to millimeters.
#[inline]
pub fn pt_to_mm(pt: f64) -> f64 {
    pt / PT_PER_MM
}

/// Vertical size variant of a label.
///
/// Labels without remarks print on the shorter compact stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeightClass {
    Compact,
    Standard,
}

impl HeightClass {
    /// `Compact` iff there is no remarks text.
    pub fn for_remarks(remarks: &str) -> Self {
        if remarks.trim().is_empty() {
            Self::Compact
        } else {
            Self::Standard
        }
    }
}

/// # Label Stock
///
/// Physical sticker dimensions plus the layout policy used when fitting
/// text onto them. Lengths ending in `_mm` are millimeters; the renderer
/// works in points and converts through the accessor methods.
///
/// ## Print Area
///
/// ```text
/// ├pad┼──────── available width ────────┼ inset ┼pad┤
/// │   │ header / description / footer   │ logo  │   │
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelStock {
    /// Stock name
    pub name: String,

    /// Fixed label width
    pub width_mm: f64,

    /// Height used when the label carries remarks
    pub height_mm: f64,

    /// Height used when the label has no remarks
    pub compact_height_mm: f64,

    /// Inner padding on every edge
    pub padding_mm: f64,

    /// Gap between the logo/QR and the right edge
    pub right_margin_mm: f64,

    /// Line advance as a multiple of the font size
    pub line_spacing: f64,

    /// Width reserved on the right of the text column (points)
    pub width_inset_pt: f64,

    /// Smallest font size tried by the fit search (points)
    pub min_font_pt: f64,

    /// Largest font size tried by the fit search (points)
    pub max_font_pt: f64,

    /// Height kept free at the bottom of the label
    pub vertical_slack_mm: f64,

    /// Description never starts above this distance from the top edge
    pub description_top_mm: f64,

    pub logo_width_mm: f64,
    pub logo_height_mm: f64,
    pub logo_top_offset_mm: f64,
    pub qr_size_mm: f64,

    /// Upper bound on physical copies per line item
    pub max_copies: u32,
}

impl LabelStock {
    /// # 58mm Sticker Stock
    ///
    /// The stock the generator was designed for: 58mm wide, 39mm tall
    /// (37mm when no remarks are printed).
    pub fn standard() -> Self {
        Self {
            name: "58mm sticker".to_string(),
            width_mm: 58.0,
            height_mm: 39.0,
            compact_height_mm: 37.0,
            padding_mm: 0.5,
            right_margin_mm: 3.0,
            line_spacing: 1.15,
            width_inset_pt: 15.0,
            min_font_pt: 2.0,
            max_font_pt: 7.0,
            vertical_slack_mm: 0.3,
            description_top_mm: 3.0,
            logo_width_mm: 12.0,
            logo_height_mm: 7.0,
            logo_top_offset_mm: 1.5,
            qr_size_mm: 6.0,
            max_copies: 500,
        }
    }

    /// Load a stock definition from a JSON file.
    ///
    /// Missing fields fall back to [`LabelStock::standard`].
    pub fn from_json_file(path: &Path) -> Result<Self, EtiquetaError> {
        let raw = std::fs::read_to_string(path)?;
        let stock: Self = serde_json::from_str(&raw)
            .map_err(|e| EtiquetaError::Config(format!("{}: {}", path.display(), e)))?;
        stock.validate()?;
        Ok(stock)
    }

    /// Reject stock definitions the layout engine cannot work with.
    pub fn validate(&self) -> Result<(), EtiquetaError> {
        if self.width_mm <= 0.0 || self.height_mm <= 0.0 || self.compact_height_mm <= 0.0 {
            return Err(EtiquetaError::Config(
                "label dimensions must be positive".to_string(),
            ));
        }
        if self.min_font_pt <= 0.0 || self.min_font_pt > self.max_font_pt {
            return Err(EtiquetaError::Config(format!(
                "invalid font bounds {}..{}",
                self.min_font_pt, self.max_font_pt
            )));
        }
        if self.line_spacing <= 0.0 {
            return Err(EtiquetaError::Config(
                "line_spacing must be positive".to_string(),
            ));
        }
        if self.max_copies == 0 {
            return Err(EtiquetaError::Config(
                "max_copies must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Label width in points
    #[inline]
    pub fn width_pt(&self) -> f64 {
        mm_to_pt(self.width_mm)
    }

    /// Label height in points for a height class
    #[inline]
    pub fn height_pt(&self, class: HeightClass) -> f64 {
        match class {
            HeightClass::Compact => mm_to_pt(self.compact_height_mm),
            HeightClass::Standard => mm_to_pt(self.height_mm),
        }
    }

    #[inline]
    pub fn padding_pt(&self) -> f64 {
        mm_to_pt(self.padding_mm)
    }

    /// Width available to a line of text, in points
    #[inline]
    pub fn available_width_pt(&self) -> f64 {
        self.width_pt() - 2.0 * self.padding_pt() - self.width_inset_pt
    }
}

impl Default for LabelStock {
    fn default() -> Self {
        Self::standard()
    }
}

// ============================================================================
// FONT FACES
// ============================================================================

/// The bold faces a label can be set in.
///
/// All three are PDF base-14 fonts, so nothing is embedded in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFace {
    #[default]
    HelveticaBold,
    TimesBold,
    CourierBold,
}

impl FontFace {
    /// Parse a face selection.
    ///
    /// Accepts the face names (`helvetica`, `times`, `courier`, with or
    /// without a `-bold` suffix) and the menu digits `1`, `2`, `3`.
    /// Anything else selects Helvetica-Bold.
    pub fn from_choice(s: &str) -> Self {
        let choice = s.trim().to_lowercase();
        let choice = choice.strip_suffix("-bold").unwrap_or(&choice);
        match choice {
            "2" | "times" => Self::TimesBold,
            "3" | "courier" => Self::CourierBold,
            _ => Self::HelveticaBold,
        }
    }

    /// PostScript name of the face
    pub fn postscript_name(&self) -> &'static str {
        match self {
            Self::HelveticaBold => "Helvetica-Bold",
            Self::TimesBold => "Times-Bold",
            Self::CourierBold => "Courier-Bold",
        }
    }

    /// List all faces.
    pub fn all() -> [Self; 3] {
        [Self::HelveticaBold, Self::TimesBold, Self::CourierBold]
    }
}

// ============================================================================
// TESTS
// ============================================================================
