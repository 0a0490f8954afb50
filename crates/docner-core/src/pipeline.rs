//! One document end to end: page text, normalization, annotation, artifacts.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::annotate::{CatalogAnnotator, EntityAnnotator};
use crate::artifacts::{ArtifactSet, extracted_text_path};
use crate::error::{DocnerError, Result};
use crate::input::PathProvider;
use crate::models::annotation::Annotation;
use crate::models::catalog::EntityCatalog;
use crate::models::config::{DocnerConfig, OutputConfig};
use crate::models::document::NormalizedDocument;
use crate::normalize::Normalizer;
use crate::ocr::PageTextProvider;

/// Everything a successful run produced.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Normalized text artifact.
    pub text_path: PathBuf,
    /// Entities table artifact.
    pub entities_path: PathBuf,
    pub document: NormalizedDocument,
    pub annotations: Vec<Annotation>,
}

/// Normalizer followed by annotator over text from a [`PageTextProvider`].
pub struct Pipeline<P> {
    provider: P,
    normalizer: Normalizer,
    annotator: CatalogAnnotator,
    output: OutputConfig,
}

impl<P: PageTextProvider> Pipeline<P> {
    /// Build a pipeline from configuration.
    pub fn new(provider: P, config: &DocnerConfig) -> Self {
        Self {
            provider,
            normalizer: Normalizer::new(&config.normalize),
            annotator: CatalogAnnotator::new(config.catalog.clone()),
            output: config.output.clone(),
        }
    }

    /// Replace the entity catalog.
    pub fn with_catalog(mut self, catalog: EntityCatalog) -> Self {
        self.annotator = CatalogAnnotator::new(catalog);
        self
    }

    /// Process the document chosen by `selector`.
    pub fn run_selected(&self, selector: &mut dyn PathProvider) -> Result<PipelineOutput> {
        let path = selector.select()?.ok_or(DocnerError::InputMissing)?;
        info!("Selected document: {}", path.display());
        self.run(&path)
    }

    /// Process one document and write both artifacts next to it.
    pub fn run(&self, path: &Path) -> Result<PipelineOutput> {
        if !path.is_file() {
            return Err(DocnerError::DocumentNotFound(path.to_path_buf()));
        }

        let pages = self.provider.page_texts(path)?;
        debug!("Provider returned {} pages", pages.len());

        let document = self.normalizer.normalize(&pages)?;
        let annotations = self.annotator.annotate(&document);

        let text_path = extracted_text_path(path, &self.output.text_suffix);
        let artifacts = ArtifactSet::render(
            text_path.clone(),
            &self.output.entities_suffix,
            &document,
            &annotations,
        )?;
        let entities_path = artifacts.entities_path.clone();
        artifacts.commit()?;

        info!("Text extracted and saved to: {}", text_path.display());
        info!(
            "CSV created: {} ({} entities)",
            entities_path.display(),
            annotations.len()
        );

        Ok(PipelineOutput {
            text_path,
            entities_path,
            document,
            annotations,
        })
    }
}
