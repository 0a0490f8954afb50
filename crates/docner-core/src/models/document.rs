//! The normalized, line-oriented text of one document.

use serde::{Deserialize, Serialize};

/// Deduplicated, filtered OCR lines followed by the synthetic block.
///
/// Real lines are non-empty, trimmed and unique. Synthetic lines are appended
/// verbatim and count for line numbers exactly like extracted ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedDocument {
    lines: Vec<String>,
    /// Index of the first synthetic line.
    synthetic_start: usize,
}

impl NormalizedDocument {
    pub(crate) fn new(mut lines: Vec<String>, synthetic: &[String]) -> Self {
        let synthetic_start = lines.len();
        lines.extend(synthetic.iter().cloned());
        Self {
            lines,
            synthetic_start,
        }
    }

    /// Build a document from already-normalized text (one line per line).
    ///
    /// Used to annotate a previously persisted artifact. No filtering is
    /// applied and every line counts as a real line.
    pub fn from_text(text: &str) -> Self {
        let lines: Vec<String> = text.lines().map(str::to_string).collect();
        Self {
            synthetic_start: lines.len(),
            lines,
        }
    }

    /// All lines, real then synthetic.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Lines extracted from the document.
    pub fn real_lines(&self) -> &[String] {
        &self.lines[..self.synthetic_start]
    }

    /// Lines appended by configuration.
    pub fn synthetic_lines(&self) -> &[String] {
        &self.lines[self.synthetic_start..]
    }

    /// Line by 1-based number.
    pub fn line(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|i| self.lines.get(i))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines joined by `\n`, without a trailing newline.
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_real_and_synthetic_split() {
        let doc = NormalizedDocument::new(
            vec!["Global Tiles".to_string()],
            &["Quantity: 1".to_string()],
        );
        assert_eq!(doc.real_lines(), &["Global Tiles".to_string()]);
        assert_eq!(doc.synthetic_lines(), &["Quantity: 1".to_string()]);
        assert_eq!(doc.to_text(), "Global Tiles\nQuantity: 1");
    }

    #[test]
    fn test_line_is_one_based() {
        let doc = NormalizedDocument::from_text("a\nb");
        assert_eq!(doc.line(0), None);
        assert_eq!(doc.line(1), Some("a"));
        assert_eq!(doc.line(2), Some("b"));
        assert_eq!(doc.line(3), None);
    }

    #[test]
    fn test_from_text_round_trips_artifact() {
        let doc = NormalizedDocument::new(
            vec!["PO 95481".to_string(), "CF24 5EF".to_string()],
            &["Product: TIS3067".to_string()],
        );
        let reread = NormalizedDocument::from_text(&doc.to_text());
        assert_eq!(reread.lines(), doc.lines());
    }
}
