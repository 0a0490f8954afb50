//! Annotate command - tag entities in an existing normalized text file.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use docner_core::artifacts::{entities_path, file_name, render_entities_csv};
use docner_core::models::annotation::{Annotation, AnnotationRecord};
use docner_core::{NormalizedDocument, annotate};

use super::{load_config, resolve_catalog};

/// Arguments for the annotate command.
#[derive(Args)]
pub struct AnnotateArgs {
    /// Normalized text file (one line per line)
    #[arg(required = true)]
    input: PathBuf,

    /// Entity catalog JSON file (array of {Text, Type, Context})
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Print to stdout instead of writing the entities file
    #[arg(long)]
    stdout: bool,

    /// Output format for --stdout (the entities file is always CSV)
    #[arg(short, long, value_enum, default_value = "csv", requires = "stdout")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// CSV entities table
    Csv,
    /// JSON array of records
    Json,
    /// Plain text listing
    Text,
}

pub async fn run(args: AnnotateArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let catalog = resolve_catalog(&config, args.catalog.as_deref())?;

    if !args.input.is_file() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let text = fs::read_to_string(&args.input)?;
    let document = NormalizedDocument::from_text(&text);
    let annotations = annotate(&document, &catalog);
    let file = file_name(&args.input);

    info!(
        "Annotated {} lines of {}: {} entities",
        document.len(),
        args.input.display(),
        annotations.len()
    );

    if args.stdout {
        print!("{}", format_annotations(&file, &annotations, args.format)?);
        return Ok(());
    }

    let output_path = entities_path(&args.input, &config.output.entities_suffix);
    fs::write(&output_path, render_entities_csv(&file, &annotations)?)?;
    println!(
        "{} CSV created: {} ({} entities)",
        style("✓").green(),
        output_path.display(),
        annotations.len()
    );

    Ok(())
}

fn format_annotations(
    file: &str,
    annotations: &[Annotation],
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Csv => Ok(String::from_utf8(render_entities_csv(file, annotations)?)?),
        OutputFormat::Json => {
            let records: Vec<AnnotationRecord> = annotations
                .iter()
                .cloned()
                .map(|a| a.into_record(file))
                .collect();
            Ok(format!("{}\n", serde_json::to_string_pretty(&records)?))
        }
        OutputFormat::Text => Ok(format_text(annotations)),
    }
}

fn format_text(annotations: &[Annotation]) -> String {
    let mut output = String::new();
    for a in annotations {
        output.push_str(&format!(
            "{:>4}  {:>3}..{:<3}  {:<20}  {}\n",
            a.line, a.begin_offset, a.end_offset, a.entity_type, a.text
        ));
    }
    output
}
