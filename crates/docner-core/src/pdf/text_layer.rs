//! Page text from the embedded PDF text layer (no OCR).

use std::path::Path;

use tracing::debug;

use super::rasterizer::load_pdf;
use super::{DocumentKind, Result};
use crate::error::{ConversionError, PdfError};
use crate::ocr::PageTextProvider;

/// Reads text already embedded in a PDF with `pdf-extract`.
///
/// Pages are split on form feeds when the extractor emits them; otherwise the
/// whole text is a single page.
#[derive(Debug, Clone, Default)]
pub struct TextLayerProvider;

impl TextLayerProvider {
    pub fn new() -> Self {
        Self
    }

    fn extract(&self, path: &Path) -> Result<Vec<String>> {
        if DocumentKind::from_path(path)? != DocumentKind::Pdf {
            return Err(PdfError::UnsupportedFormat(
                "text layer requires a PDF".to_string(),
            ));
        }

        let data = std::fs::read(path)?;
        let (_, raw) = load_pdf(&data)?;
        let text = pdf_extract::extract_text_from_mem(&raw)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;

        let pages: Vec<String> = text.split('\u{0c}').map(str::to_string).collect();
        debug!("Text layer: {} chars over {} pages", text.len(), pages.len());
        Ok(pages)
    }
}

impl PageTextProvider for TextLayerProvider {
    fn page_texts(&self, path: &Path) -> std::result::Result<Vec<String>, ConversionError> {
        Ok(self.extract(path)?)
    }
}
