//! Error types for the docner-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the docner library.
#[derive(Error, Debug)]
pub enum DocnerError {
    /// No document was selected (prompt cancelled or empty path).
    #[error("no document selected")]
    InputMissing,

    /// The document path does not resolve.
    #[error("document '{}' not found", .0.display())]
    DocumentNotFound(PathBuf),

    /// The document could not be turned into page text.
    #[error("conversion failed: {0}")]
    Conversion(#[from] ConversionError),

    /// Normalization error.
    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    /// CSV serialization error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl DocnerError {
    /// True when the run failed because OCR produced no usable text.
    pub fn is_empty_extraction(&self) -> bool {
        matches!(self, DocnerError::Normalize(NormalizeError::EmptyExtraction))
    }
}

/// Failures of the page-text collaborators (rasterization or recognition).
#[derive(Error, Debug)]
pub enum ConversionError {
    /// PDF or image could not be rasterized.
    #[error(transparent)]
    Pdf(#[from] PdfError),

    /// OCR could not read a page image.
    #[error(transparent)]
    Ocr(#[from] OcrError),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract the embedded text layer.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// Failed to extract page images.
    #[error("failed to extract images: {0}")]
    ImageExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// The file is neither a PDF nor a supported image.
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// Failed to decode an image file.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error while reading the document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// No recognizer is compiled into this build.
    #[error("OCR backend not available: {0}")]
    Unavailable(String),
}

/// Errors raised while normalizing raw page text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// Every page was blank after trimming.
    #[error("no text could be extracted from the document")]
    EmptyExtraction,
}

/// Result type for the docner library.
pub type Result<T> = std::result::Result<T, DocnerError>;
