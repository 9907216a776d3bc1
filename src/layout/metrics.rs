//! Font metrics for width measurement.
//!
//! Advance widths come from the Adobe AFM files of the base-14 bold faces,
//! in thousandths of an em. Printable ASCII is covered exactly; a handful
//! of common typographic characters are mapped explicitly and anything else
//! measures as the face's average lowercase advance.

use crate::printer::FontFace;

/// Measures rendered text width.
///
/// The auto-fit engine and the page renderer depend only on this trait,
/// so tests can substitute simple fixed-pitch metrics.
pub trait TextMeasure {
    /// Width of `text` set at `size` points, in points.
    fn text_width(&self, text: &str, size: f64) -> f64;
}

/// Helvetica-Bold advances for U+0020..=U+007E.
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    333, 333, 584, 584, 584, 611, 975, // ':'..'@'
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    333, 278, 333, 584, 556, 333, // '['..'`'
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // 'a'..'m'
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // 'n'..'z'
    389, 280, 389, 584, // '{'..'~'
];

/// Times-Bold advances for U+0020..=U+007E.
const TIMES_BOLD: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278, // ' '..'/'
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, // '0'..'9'
    333, 333, 570, 570, 570, 500, 930, // ':'..'@'
    722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, // 'A'..'M'
    722, 778, 611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, // 'N'..'Z'
    333, 278, 333, 581, 500, 333, // '['..'`'
    500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, // 'a'..'m'
    556, 500, 556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, // 'n'..'z'
    394, 220, 394, 520, // '{'..'~'
];

/// Courier is fixed pitch.
const COURIER_ADVANCE: u16 = 600;

impl FontFace {
    /// Advance width of one character in thousandths of an em.
    pub fn advance(&self, ch: char) -> u16 {
        if let Some(width) = self.ascii_advance(ch) {
            return width;
        }
        match self {
            Self::CourierBold => COURIER_ADVANCE,
            Self::HelveticaBold => match ch {
                '\u{a0}' => 278,
                '°' => 400,
                '×' | '±' => 584,
                '–' => 556,
                '—' => 1000,
                '‘' | '’' | '‚' => 278,
                '“' | '”' | '„' => 500,
                '•' => 350,
                '…' => 1000,
                _ => 556,
            },
            Self::TimesBold => match ch {
                '\u{a0}' => 250,
                '°' => 400,
                '×' | '±' => 570,
                '–' => 500,
                '—' => 1000,
                '‘' | '’' | '‚' => 333,
                '“' | '”' | '„' => 500,
                '•' => 350,
                '…' => 1000,
                _ => 500,
            },
        }
    }

    fn ascii_advance(&self, ch: char) -> Option<u16> {
        let code = ch as u32;
        if !(0x20..=0x7e).contains(&code) {
            return None;
        }
        let index = (code - 0x20) as usize;
        Some(match self {
            Self::HelveticaBold => HELVETICA_BOLD[index],
            Self::TimesBold => TIMES_BOLD[index],
            Self::CourierBold => COURIER_ADVANCE,
        })
    }
}

impl TextMeasure for FontFace {
    fn text_width(&self, text: &str, size: f64) -> f64 {
        let units: u32 = text.chars().map(|ch| u32::from(self.advance(ch))).sum();
        units as f64 * size / 1000.0
    }
}

/// Fixed-pitch metrics: every character is `em_fraction` of the size wide.
#[derive(Debug, Clone, Copy)]
pub struct MonospaceMeasure {
    pub em_fraction: f64,
}

impl TextMeasure for MonospaceMeasure {
    fn text_width(&self, text: &str, size: f64) -> f64 {
        text.chars().count() as f64 * size * self.em_fraction
    }
}
