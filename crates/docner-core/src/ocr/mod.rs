//! OCR collaborators: page images in, per-page text out.

#[cfg(feature = "native")]
mod pure_engine;

#[cfg(feature = "native")]
pub use pure_engine::PureOcrRecognizer;

use std::path::Path;

use image::DynamicImage;
use tracing::{debug, info};

use crate::error::{ConversionError, OcrError};
use crate::pdf::PageRasterizer;

/// Recognizes the text on one page image.
pub trait TextRecognizer {
    /// Extracted text, possibly empty.
    fn recognize(&self, image: &DynamicImage) -> Result<String, OcrError>;
}

/// Produces raw text for each page of a document, in page order.
pub trait PageTextProvider {
    fn page_texts(&self, path: &Path) -> Result<Vec<String>, ConversionError>;
}

impl<P: PageTextProvider + ?Sized> PageTextProvider for Box<P> {
    fn page_texts(&self, path: &Path) -> Result<Vec<String>, ConversionError> {
        (**self).page_texts(path)
    }
}

/// Called before each page is recognized with the 1-based page number and the page count.
pub type PageProgress = Box<dyn Fn(usize, usize)>;

/// Rasterize a document, then recognize every page image.
pub struct OcrPageTextProvider<R, T> {
    rasterizer: R,
    recognizer: T,
    progress: Option<PageProgress>,
}

impl<R: PageRasterizer, T: TextRecognizer> OcrPageTextProvider<R, T> {
    pub fn new(rasterizer: R, recognizer: T) -> Self {
        Self {
            rasterizer,
            recognizer,
            progress: None,
        }
    }

    /// Report each page before it goes to the recognizer.
    pub fn with_progress(mut self, progress: impl Fn(usize, usize) + 'static) -> Self {
        self.progress = Some(Box::new(progress));
        self
    }
}

impl<R: PageRasterizer, T: TextRecognizer> PageTextProvider for OcrPageTextProvider<R, T> {
    fn page_texts(&self, path: &Path) -> Result<Vec<String>, ConversionError> {
        let images = self.rasterizer.rasterize(path)?;
        let total = images.len();
        info!("Running OCR on {} pages", total);

        let mut pages = Vec::with_capacity(total);
        for (i, image) in images.iter().enumerate() {
            if let Some(progress) = &self.progress {
                progress(i + 1, total);
            }
            let text = self.recognizer.recognize(image)?;
            debug!("Page {}/{}: {} chars", i + 1, total, text.len());
            pages.push(text);
        }
        Ok(pages)
    }
}

/// A recognized text box with its quadrilateral.
#[derive(Debug, Clone)]
pub struct TextBox {
    /// Corner coordinates (x1, y1, x2, y2, x3, y3, x4, y4).
    pub bbox: [f32; 8],
    /// Recognized text content.
    pub text: String,
}

impl TextBox {
    /// Top-left of the axis-aligned bounding rectangle.
    fn top_left(&self) -> (f32, f32) {
        let min_x = [self.bbox[0], self.bbox[2], self.bbox[4], self.bbox[6]]
            .into_iter()
            .fold(f32::INFINITY, f32::min);
        let min_y = [self.bbox[1], self.bbox[3], self.bbox[5], self.bbox[7]]
            .into_iter()
            .fold(f32::INFINITY, f32::min);
        (min_x, min_y)
    }
}

/// Join boxes in reading order: 20 px row bands top to bottom, then left to right.
pub fn reading_order_text(mut boxes: Vec<TextBox>) -> String {
    boxes.sort_by(|a, b| {
        let (ax, ay) = a.top_left();
        let (bx, by) = b.top_left();
        let row_a = (ay / 20.0) as i32;
        let row_b = (by / 20.0) as i32;
        row_a
            .cmp(&row_b)
            .then_with(|| ax.partial_cmp(&bx).unwrap_or(std::cmp::Ordering::Equal))
    });

    boxes
        .iter()
        .map(|b| b.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
