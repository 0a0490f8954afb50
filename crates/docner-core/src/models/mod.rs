//! Data models shared by the normalizer, annotator and CLI.

pub mod annotation;
pub mod catalog;
pub mod config;
pub mod document;

pub use annotation::{Annotation, AnnotationRecord};
pub use catalog::{CatalogEntry, EntityCatalog};
pub use config::DocnerConfig;
pub use document::NormalizedDocument;
