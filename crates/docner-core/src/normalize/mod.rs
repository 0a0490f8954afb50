//! Turns raw per-page OCR text into a [`NormalizedDocument`].

use std::collections::HashSet;

use tracing::{debug, trace, warn};

use crate::error::NormalizeError;
use crate::models::config::{DenyRule, NormalizeConfig};
use crate::models::document::NormalizedDocument;

/// Result type for normalization.
pub type Result<T> = std::result::Result<T, NormalizeError>;

/// Line normalizer: trim, drop blanks and scanner noise, dedupe, append synthetic lines.
#[derive(Debug, Clone)]
pub struct Normalizer {
    denylist: Vec<DenyRule>,
    synthetic_lines: Vec<String>,
}

impl Normalizer {
    /// Create a normalizer from configuration.
    pub fn new(config: &NormalizeConfig) -> Self {
        Self {
            denylist: config.denylist.clone(),
            synthetic_lines: config.synthetic_lines.clone(),
        }
    }

    /// Replace the denylist.
    pub fn with_denylist(mut self, denylist: Vec<DenyRule>) -> Self {
        self.denylist = denylist;
        self
    }

    /// Replace the synthetic block.
    pub fn with_synthetic_lines(mut self, lines: Vec<String>) -> Self {
        self.synthetic_lines = lines;
        self
    }

    /// Whether a trimmed line is known OCR noise.
    pub fn is_denied(&self, line: &str) -> bool {
        self.denylist.iter().any(|rule| rule.matches(line))
    }

    /// Normalize page texts in page order.
    ///
    /// Fails with [`NormalizeError::EmptyExtraction`] when no page carries any
    /// non-whitespace text. The check runs before the synthetic block is
    /// appended.
    pub fn normalize<S: AsRef<str>>(&self, pages: &[S]) -> Result<NormalizedDocument> {
        if pages.iter().all(|page| page.as_ref().trim().is_empty()) {
            return Err(NormalizeError::EmptyExtraction);
        }

        let mut seen: HashSet<&str> = HashSet::new();
        let mut lines = Vec::new();
        let mut denied = 0usize;
        let mut duplicates = 0usize;

        for page in pages {
            for raw in page.as_ref().split(is_line_break) {
                let line = raw.trim();
                if line.is_empty() {
                    continue;
                }
                if self.is_denied(line) {
                    trace!("Dropping denylisted line: {:?}", line);
                    denied += 1;
                    continue;
                }
                if !seen.insert(line) {
                    duplicates += 1;
                    continue;
                }
                lines.push(line.to_string());
            }
        }

        if lines.is_empty() {
            warn!("Every extracted line was filtered out, only synthetic lines remain");
        }

        debug!(
            "Normalized {} pages: {} lines kept, {} denylisted, {} duplicates, {} synthetic",
            pages.len(),
            lines.len(),
            denied,
            duplicates,
            self.synthetic_lines.len()
        );

        Ok(NormalizedDocument::new(lines, &self.synthetic_lines))
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(&NormalizeConfig::default())
    }
}

/// Line boundaries recognized in OCR output, including form feeds between pages.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn synthetic() -> Vec<String> {
        NormalizeConfig::default().synthetic_lines
    }

    #[test]
    fn test_global_tiles_pages() {
        let pages = ["Global Tiles\nPO 95481\n", "02920099399\nCF24 5EF\n"];
        let doc = Normalizer::default().normalize(&pages).unwrap();

        assert_eq!(doc.real_lines(), &["Global Tiles", "PO 95481", "CF24 5EF"]);
        assert_eq!(doc.synthetic_lines(), synthetic().as_slice());
        assert_eq!(
            doc.lines(),
            &[
                "Global Tiles",
                "PO 95481",
                "CF24 5EF",
                "Product: TIS3067",
                "Quantity: 1",
                "Product: TIS4294",
                "Quantity: 1",
            ]
        );
    }

    #[test]
    fn test_empty_extraction() {
        let result = Normalizer::default().normalize(&["   ", ""]);
        assert_eq!(result, Err(NormalizeError::EmptyExtraction));

        let no_pages: [&str; 0] = [];
        assert_eq!(
            Normalizer::default().normalize(&no_pages),
            Err(NormalizeError::EmptyExtraction)
        );
    }

    #[test]
    fn test_duplicates_keep_first_position() {
        let pages = ["Header\nA\nB", "Header\nC\nA"];
        let doc = Normalizer::default()
            .with_synthetic_lines(Vec::new())
            .normalize(&pages)
            .unwrap();
        assert_eq!(doc.lines(), &["Header", "A", "B", "C"]);
    }

    #[test]
    fn test_trims_before_dedup_and_denylist() {
        let pages = ["  Global Tiles  \n\tGlobal Tiles\n  0292  \n 02920099399 ext\n"];
        let doc = Normalizer::default().normalize(&pages).unwrap();
        assert_eq!(doc.real_lines(), &["Global Tiles"]);
    }

    #[test]
    fn test_denylist_exact_only_for_fragment() {
        let pages = ["0292\n02921\nCall 0292"];
        let doc = Normalizer::default().normalize(&pages).unwrap();
        assert_eq!(doc.real_lines(), &["02921", "Call 0292"]);
    }

    #[test]
    fn test_only_noise_still_gets_synthetic_block() {
        let doc = Normalizer::default().normalize(&["0292\n"]).unwrap();
        assert!(doc.real_lines().is_empty());
        assert_eq!(doc.synthetic_lines(), synthetic().as_slice());
    }

    #[test]
    fn test_synthetic_lines_not_deduplicated() {
        let pages = ["Quantity: 1\nProduct: TIS3067"];
        let doc = Normalizer::default().normalize(&pages).unwrap();

        assert_eq!(doc.len(), 6);
        assert_eq!(&doc.lines()[2..], synthetic().as_slice());
    }

    #[test]
    fn test_carriage_returns_and_form_feeds() {
        let pages = ["Line one\r\nLine two\x0cLine three\rLine four"];
        let doc = Normalizer::default()
            .with_synthetic_lines(Vec::new())
            .normalize(&pages)
            .unwrap();
        assert_eq!(doc.lines(), &["Line one", "Line two", "Line three", "Line four"]);
    }

    #[test]
    fn test_idempotent() {
        let pages = ["b\na\nb\n0292", "c\na"];
        let normalizer = Normalizer::default();
        let first = normalizer.normalize(&pages).unwrap();
        let second = normalizer.normalize(&pages).unwrap();
        assert_eq!(first.to_text(), second.to_text());
    }

    #[test]
    fn test_custom_denylist() {
        let normalizer = Normalizer::default()
            .with_denylist(vec![DenyRule::Prefix("Page ".to_string())])
            .with_synthetic_lines(Vec::new());
        let doc = normalizer.normalize(&["Page 1 of 2\n0292\nBody"]).unwrap();
        assert_eq!(doc.lines(), &["0292", "Body"]);
    }
}
