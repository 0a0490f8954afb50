//! Document rasterization and PDF text-layer access.

mod rasterizer;
mod text_layer;

pub use rasterizer::DocumentRasterizer;
pub use text_layer::TextLayerProvider;

use std::path::Path;

use image::DynamicImage;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Kind of input document, decided by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// PDF, rasterized page by page.
    Pdf,
    /// Single raster image treated as one page.
    Image,
}

impl DocumentKind {
    /// Classify a path by its extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "pdf" => Ok(DocumentKind::Pdf),
            "png" | "jpg" | "jpeg" | "tiff" | "tif" | "bmp" => Ok(DocumentKind::Image),
            other => Err(PdfError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Trait for turning a document into page images.
pub trait PageRasterizer {
    /// Page images in page order.
    fn rasterize(&self, path: &Path) -> Result<Vec<DynamicImage>>;
}
