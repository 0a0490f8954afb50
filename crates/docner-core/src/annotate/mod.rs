//! Entity annotation over normalized documents.

mod catalog_annotator;

pub use catalog_annotator::{CatalogAnnotator, annotate, find_char_span};

use crate::models::annotation::Annotation;
use crate::models::document::NormalizedDocument;

/// Trait for entity annotators.
pub trait EntityAnnotator {
    /// Locate entity occurrences in line order.
    fn annotate(&self, document: &NormalizedDocument) -> Vec<Annotation>;
}
