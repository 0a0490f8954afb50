//! Process command - OCR a document, normalize it and annotate entities.

use std::cell::OnceCell;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, info};

use docner_core::models::config::OcrConfig;
use docner_core::{
    DocumentRasterizer, FixedPath, OcrError, OcrPageTextProvider, PathProvider, Pipeline,
    PipelineOutput, PureOcrRecognizer, TextLayerProvider, TextRecognizer,
};
use image::DynamicImage;

use crate::prompt::PromptPathProvider;

use super::{load_config, resolve_catalog};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input document (PDF or image); prompts when omitted
    input: Option<PathBuf>,

    /// Entity catalog JSON file (array of {Text, Type, Context})
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// OCR model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// Read the embedded PDF text layer instead of running OCR
    #[arg(long)]
    text_layer: bool,

    /// Maximum pages to OCR (0 = all)
    #[arg(long)]
    max_pages: Option<usize>,
}

/// Runs the pipeline and reports the outcome.
///
/// Failures are logged and printed; the command itself still succeeds.
pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    match process(args, config_path) {
        Ok(output) => {
            println!(
                "{} Text extracted and saved to: {}",
                style("✓").green(),
                output.text_path.display()
            );
            println!(
                "{} CSV created: {} ({} entities)",
                style("✓").green(),
                output.entities_path.display(),
                output.annotations.len()
            );
            println!("{} Processing completed successfully.", style("✓").green());
        }
        Err(e) => {
            error!("Processing failed: {:#}", e);
            eprintln!("{} Error: {:#}", style("✗").red(), e);
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());
    Ok(())
}

fn process(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<PipelineOutput> {
    let mut config = load_config(config_path)?;
    if let Some(model_dir) = args.model_dir {
        config.ocr.model_dir = model_dir;
    }
    if let Some(max_pages) = args.max_pages {
        config.pdf.max_pages = max_pages;
    }
    if args.text_layer {
        config.pdf.prefer_text_layer = true;
    }

    let catalog = resolve_catalog(&config, args.catalog.as_deref())?;
    debug!("Using catalog with {} entries", catalog.len());

    let mut selector: Box<dyn PathProvider> = match args.input {
        Some(path) => Box::new(FixedPath::new(path)),
        None => Box::new(PromptPathProvider::new("Select document (PDF or image)")),
    };

    if config.pdf.prefer_text_layer {
        let pipeline = Pipeline::new(TextLayerProvider::new(), &config).with_catalog(catalog);
        return Ok(pipeline.run_selected(selector.as_mut())?);
    }

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-"),
    );

    let page_bar = pb.clone();
    let provider = OcrPageTextProvider::new(
        DocumentRasterizer::new().with_max_pages(config.pdf.max_pages),
        LazyRecognizer::new(config.ocr.clone(), pb.clone()),
    )
    .with_progress(move |page, total| {
        page_bar.set_length(total as u64);
        page_bar.set_position(page as u64 - 1);
        page_bar.set_message(format!("OCR on page {}/{}", page, total));
    });

    let pipeline = Pipeline::new(provider, &config).with_catalog(catalog);
    let result = pipeline.run_selected(selector.as_mut());
    match &result {
        Ok(_) if pb.length().unwrap_or(0) > 0 => {
            pb.set_position(pb.length().unwrap_or(0));
            pb.finish_with_message("OCR complete");
        }
        _ => pb.finish_and_clear(),
    }
    Ok(result?)
}

/// Recognizer that loads the OCR models on the first page it sees.
struct LazyRecognizer {
    config: OcrConfig,
    engine: OnceCell<PureOcrRecognizer>,
    pb: ProgressBar,
}

impl LazyRecognizer {
    fn new(config: OcrConfig, pb: ProgressBar) -> Self {
        Self {
            config,
            engine: OnceCell::new(),
            pb,
        }
    }

    fn engine(&self) -> Result<&PureOcrRecognizer, OcrError> {
        if let Some(engine) = self.engine.get() {
            return Ok(engine);
        }
        self.pb.set_message("Loading OCR models...");
        let loaded = PureOcrRecognizer::from_config(&self.config)?;
        info!("OCR models loaded from {}", self.config.model_dir.display());
        Ok(self.engine.get_or_init(|| loaded))
    }
}

impl TextRecognizer for LazyRecognizer {
    fn recognize(&self, image: &DynamicImage) -> Result<String, OcrError> {
        self.engine()?.recognize(image)
    }
}
