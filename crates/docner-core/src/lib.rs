//! Core library for turning scanned documents into NER training data.
//!
//! This crate provides:
//! - Page text collaborators (PDF rasterization, OCR, PDF text layer)
//! - Line normalization (trim, scanner-noise denylist, dedup, synthetic lines)
//! - Catalog-based entity annotation with an earlier-line context rule
//! - Artifact writing (normalized text and entities CSV, written together)

pub mod annotate;
pub mod artifacts;
pub mod error;
pub mod input;
pub mod models;
pub mod normalize;
pub mod ocr;
pub mod pdf;
pub mod pipeline;

pub use annotate::{CatalogAnnotator, EntityAnnotator, annotate};
pub use error::{ConversionError, DocnerError, NormalizeError, OcrError, PdfError, Result};
pub use input::{FixedPath, PathProvider};
pub use models::{Annotation, AnnotationRecord, CatalogEntry, DocnerConfig, EntityCatalog, NormalizedDocument};
pub use normalize::Normalizer;
pub use ocr::{OcrPageTextProvider, PageProgress, PageTextProvider, TextRecognizer};
#[cfg(feature = "native")]
pub use ocr::PureOcrRecognizer;
pub use pdf::{DocumentRasterizer, PageRasterizer, TextLayerProvider};
pub use pipeline::{Pipeline, PipelineOutput};
