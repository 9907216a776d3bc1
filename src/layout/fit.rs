//! Auto-fit: the largest font size at which a label's text fits.
//!
//! Candidate sizes run from the maximum down to the minimum in 0.1pt
//! steps. At each size the description and remarks are wrapped and the
//! stack height is
//!
//! ```text
//! (header + description lines + footer + remarks lines) × size × spacing
//! ```
//!
//! The first size whose stack fits the label's height budget wins. If none
//! does, the minimum size is used and the text is allowed to overflow.

use super::metrics::TextMeasure;
use super::wrap::wrap;
use crate::printer::{LabelStock, mm_to_pt};

/// Search bounds and spacing for [`fit`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitPolicy {
    pub min_size: f64,
    pub max_size: f64,
    /// Line advance as a multiple of the font size
    pub line_spacing: f64,
    /// Space kept free below the stack, in points
    pub vertical_slack: f64,
}

impl FitPolicy {
    pub fn from_stock(stock: &LabelStock) -> Self {
        Self {
            min_size: stock.min_font_pt,
            max_size: stock.max_font_pt,
            line_spacing: stock.line_spacing,
            vertical_slack: mm_to_pt(stock.vertical_slack_mm),
        }
    }

    /// Candidate sizes, largest first, in 0.1pt steps (both bounds included).
    pub fn candidate_sizes(&self) -> impl Iterator<Item = f64> {
        let max_tenths = (self.max_size * 10.0).round() as i32;
        let min_tenths = (self.min_size * 10.0).round() as i32;
        (min_tenths..=max_tenths).rev().map(|tenths| tenths as f64 / 10.0)
    }
}

/// Text blocks to stack on one label.
#[derive(Debug, Clone, Copy)]
pub struct FitInput<'a> {
    pub header_lines: &'a [String],
    pub description: &'a str,
    pub footer_lines: &'a [String],
    pub remarks_line: Option<&'a str>,
}

/// The chosen size and the blocks wrapped at that size.
#[derive(Debug, Clone, PartialEq)]
pub struct Fitted {
    pub font_size: f64,
    pub description: Vec<String>,
    pub remarks: Vec<String>,
    /// `false` when even the minimum size overflows the label
    pub fits: bool,
}

fn stack_height(
    input: &FitInput<'_>,
    description: usize,
    remarks: usize,
    size: f64,
    spacing: f64,
) -> f64 {
    let lines = input.header_lines.len() + description + input.footer_lines.len() + remarks;
    lines as f64 * size * spacing
}

fn wrap_blocks<M>(
    input: &FitInput<'_>,
    measure: &M,
    size: f64,
    width: f64,
) -> (Vec<String>, Vec<String>)
where
    M: TextMeasure + ?Sized,
{
    let description = wrap(input.description, measure, size, width);
    let remarks = input
        .remarks_line
        .map(|line| wrap(line, measure, size, width))
        .unwrap_or_default();
    (description, remarks)
}

/// Pick the largest candidate size at which `input` fits
/// `available_width` × (`label_height` − slack).
pub fn fit<M>(
    input: &FitInput<'_>,
    measure: &M,
    available_width: f64,
    label_height: f64,
    policy: &FitPolicy,
) -> Fitted
where
    M: TextMeasure + ?Sized,
{
    let budget = label_height - policy.vertical_slack;

    for size in policy.candidate_sizes() {
        let (description, remarks) = wrap_blocks(input, measure, size, available_width);
        let height =
            stack_height(input, description.len(), remarks.len(), size, policy.line_spacing);
        if height <= budget {
            return Fitted {
                font_size: size,
                description,
                remarks,
                fits: true,
            };
        }
    }

    let size = policy.min_size;
    let (description, remarks) = wrap_blocks(input, measure, size, available_width);
    Fitted {
        font_size: size,
        description,
        remarks,
        fits: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::metrics::MonospaceMeasure;
    use crate::printer::{FontFace, HeightClass};

    const MONO: MonospaceMeasure = MonospaceMeasure { em_fraction: 1.0 };

    fn policy() -> FitPolicy {
        FitPolicy {
            min_size: 2.0,
            max_size: 7.0,
            line_spacing: 1.0,
            vertical_slack: 0.0,
        }
    }

    fn lines(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_candidate_sizes() {
        let sizes: Vec<f64> = policy().candidate_sizes().collect();
        assert_eq!(sizes.len(), 51);
        assert_eq!(sizes[0], 7.0);
        assert!((sizes[1] - 6.9).abs() < 1e-6);
        assert_eq!(*sizes.last().unwrap(), 2.0);
    }

    #[test]
    fn test_short_text_gets_max_size() {
        let header = lines(&["Acme"]);
        let footer = lines(&["PO QTY: 1"]);
        let input = FitInput {
            header_lines: &header,
            description: "Bolt",
            footer_lines: &footer,
            remarks_line: None,
        };
        let fitted = fit(&input, &MONO, 100.0, 100.0, &policy());
        assert_eq!(fitted.font_size, 7.0);
        assert_eq!(fitted.description, ["Bolt"]);
        assert!(fitted.fits);
    }

    #[test]
    fn test_height_budget_forces_smaller_size() {
        // 4 lines at spacing 1.0 must fit in 20pt: 4 × 5.0 = 20.0
        let header = lines(&["a", "b"]);
        let footer = lines(&["c"]);
        let input = FitInput {
            header_lines: &header,
            description: "d",
            footer_lines: &footer,
            remarks_line: None,
        };
        let fitted = fit(&input, &MONO, 100.0, 20.0, &policy());
        assert!((fitted.font_size - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_remarks_counted() {
        let input = FitInput {
            header_lines: &[],
            description: "d",
            footer_lines: &[],
            remarks_line: Some("Remarks: x"),
        };
        let fitted = fit(&input, &MONO, 1000.0, 20.0, &policy());
        assert_eq!(fitted.remarks, ["Remarks: x"]);
        // two lines in 20pt
        assert_eq!(fitted.font_size, 7.0);
        let fitted = fit(&input, &MONO, 1000.0, 10.0, &policy());
        assert!((fitted.font_size - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_overflow_falls_back_to_min() {
        let header = lines(&["h"; 30]);
        let input = FitInput {
            header_lines: &header,
            description: "d",
            footer_lines: &[],
            remarks_line: None,
        };
        let fitted = fit(&input, &MONO, 100.0, 10.0, &policy());
        assert_eq!(fitted.font_size, 2.0);
        assert!(!fitted.fits);
        assert_eq!(fitted.description, ["d"]);
    }

    #[test]
    fn test_slack_reduces_budget() {
        let input = FitInput {
            header_lines: &[],
            description: "d",
            footer_lines: &[],
            remarks_line: None,
        };
        let tight = FitPolicy {
            vertical_slack: 3.0,
            ..policy()
        };
        // one 7.0pt line still fits a 7.0pt budget
        assert_eq!(fit(&input, &MONO, 100.0, 10.0, &policy()).font_size, 7.0);
        let fitted = fit(&input, &MONO, 100.0, 10.0, &tight);
        assert_eq!(fitted.font_size, 7.0);
        let tighter = FitPolicy {
            vertical_slack: 4.0,
            ..policy()
        };
        let fitted = fit(&input, &MONO, 100.0, 10.0, &tighter);
        assert!((fitted.font_size - 6.0).abs() < 1e-4);
    }

    #[test]
    fn test_stack_exactly_at_budget_fits() {
        let stock = LabelStock::standard();
        let policy = FitPolicy {
            vertical_slack: 0.0,
            ..FitPolicy::from_stock(&stock)
        };
        let header = lines(&["a", "b"]);
        let footer = lines(&["c", "d"]);
        let input = FitInput {
            header_lines: &header,
            description: "e",
            footer_lines: &footer,
            remarks_line: None,
        };
        // five lines at 6.9pt fill the height to the last bit
        let budget = 5.0 * 6.9 * stock.line_spacing;
        let fitted = fit(&input, &MONO, 100.0, budget, &policy);
        assert_eq!(fitted.font_size, 6.9);
        assert!(fitted.fits);

        let fitted = fit(&input, &MONO, 100.0, budget - 1e-9, &policy);
        assert_eq!(fitted.font_size, 6.8);
    }

    #[test]
    fn test_shorter_content_never_smaller() {
        let stock = LabelStock::standard();
        let policy = FitPolicy::from_stock(&stock);
        let width = stock.available_width_pt();
        let height = stock.height_pt(HeightClass::Compact);
        let header = lines(&["Acme Tools", "PO Number: PO-99"]);
        let footer = lines(&["PO QTY: 3 EA", "MAKE: "]);

        let long = "Gate valve 2in class 150 RF flanged ends cast steel body trim 8 \
                    with handwheel operator ASTM A216 WCB API 600 fire safe design \
                    full bore bolted bonnet outside screw and yoke rising stem";
        let words: Vec<&str> = long.split_whitespace().collect();

        let mut previous = 0.0f64;
        for n in (1..=words.len()).rev() {
            let description = words[..n].join(" ");
            let input = FitInput {
                header_lines: &header,
                description: &description,
                footer_lines: &footer,
                remarks_line: None,
            };
            let size = fit(&input, &FontFace::HelveticaBold, width, height, &policy).font_size;
            assert!(size >= previous, "{n} words: {size} < {previous}");
            previous = size;
        }
    }
}
