//! Greedy word wrapping against measured width.

use super::metrics::TextMeasure;

/// Break `text` into lines no wider than `max_width` at `size` points.
///
/// Words are split on whitespace and added to the current line while the
/// line still fits. A word wider than `max_width` on its own is never
/// split or dropped; it gets a line to itself.
pub fn wrap<M>(text: &str, measure: &M, size: f64, max_width: f64) -> Vec<String>
where
    M: TextMeasure + ?Sized,
{
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", line, word)
        };

        if measure.text_width(&candidate, size) <= max_width {
            line = candidate;
        } else {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            line = word.to_string();
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::metrics::MonospaceMeasure;
    use crate::printer::FontFace;
    use pretty_assertions::assert_eq;

    /// 1pt per character at size 1.0
    const MONO: MonospaceMeasure = MonospaceMeasure { em_fraction: 1.0 };

    #[test]
    fn test_wraps_at_width() {
        let lines = wrap("aaa bbb ccc ddd", &MONO, 1.0, 7.0);
        assert_eq!(lines, ["aaa bbb", "ccc ddd"]);
    }

    #[test]
    fn test_exact_fit_accepted() {
        let lines = wrap("abc def", &MONO, 1.0, 7.0);
        assert_eq!(lines, ["abc def"]);
    }

    #[test]
    fn test_overlong_word_alone() {
        let lines = wrap("a verylongword b", &MONO, 1.0, 5.0);
        assert_eq!(lines, ["a", "verylongword", "b"]);
    }

    #[test]
    fn test_leading_overlong_word() {
        let lines = wrap("verylongword ab", &MONO, 1.0, 5.0);
        assert_eq!(lines, ["verylongword", "ab"]);
    }

    #[test]
    fn test_empty_and_blank() {
        assert!(wrap("", &MONO, 1.0, 10.0).is_empty());
        assert!(wrap("   \t ", &MONO, 1.0, 10.0).is_empty());
    }

    #[test]
    fn test_collapses_whitespace() {
        let lines = wrap("  a \n  b  ", &MONO, 1.0, 10.0);
        assert_eq!(lines, ["a b"]);
    }

    #[test]
    fn test_never_drops_words() {
        let text = "Weld neck flange 2in class 150 RF ASTM A105N bore to suit SCH 80 pipe";
        for size in [2.0, 4.5, 7.0, 20.0] {
            let lines = wrap(text, &FontFace::HelveticaBold, size, 120.0);
            let rejoined: Vec<&str> = lines.iter().flat_map(|l| l.split_whitespace()).collect();
            let original: Vec<&str> = text.split_whitespace().collect();
            assert_eq!(rejoined, original);
        }
    }

    #[test]
    fn test_lines_within_width_unless_single_word() {
        let text = "Pressure gauge 0-160 bar 4in dial glycerine filled bottom entry";
        let face = FontFace::TimesBold;
        let lines = wrap(text, &face, 9.0, 60.0);
        for line in &lines {
            let fits = face.text_width(line, 9.0) <= 60.0;
            let single_word = line.split_whitespace().count() == 1;
            assert!(fits || single_word, "line too wide: {line}");
        }
    }

    #[test]
    fn test_measured_width_is_an_exact_limit() {
        let face = FontFace::HelveticaBold;
        let limit = face.text_width("Steel Bolt M12", 6.9);
        assert_eq!(wrap("Steel Bolt M12", &face, 6.9, limit), ["Steel Bolt M12"]);
        assert_eq!(wrap("Steel Bolt M12", &face, 6.9, limit - 1e-9), ["Steel Bolt", "M12"]);
    }
}
