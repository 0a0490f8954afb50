//! Persisted outputs: the normalized text file and the entities table.

use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::annotation::Annotation;
use crate::models::document::NormalizedDocument;

/// Column names of the entities table.
pub const ENTITY_COLUMNS: [&str; 6] = ["File", "Line", "BeginOffset", "EndOffset", "Text", "Type"];

/// Replace the extension of `path` with `suffix` (`po.pdf` + `_extracted.txt` -> `po_extracted.txt`).
pub fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.with_extension("").into_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

/// Path of the normalized text written next to `source`.
pub fn extracted_text_path(source: &Path, suffix: &str) -> PathBuf {
    with_suffix(source, suffix)
}

/// Path of the entities table derived from the text artifact path.
pub fn entities_path(text_path: &Path, suffix: &str) -> PathBuf {
    with_suffix(text_path, suffix)
}

/// Base name of a path, as stored in the `File` column.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Normalized lines joined by `\n`.
pub fn render_text(document: &NormalizedDocument) -> String {
    document.to_text()
}

/// The entities table as CSV bytes; the header row is always present.
pub fn render_entities_csv(file: &str, annotations: &[Annotation]) -> Result<Vec<u8>> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(vec![]);

    wtr.write_record(ENTITY_COLUMNS)?;
    for annotation in annotations {
        wtr.serialize(annotation.clone().into_record(file))?;
    }

    wtr.into_inner()
        .map_err(|e| crate::DocnerError::Io(e.into_error()))
}

/// Both artifacts of a run, rendered in memory and written together.
#[derive(Debug, Clone)]
pub struct ArtifactSet {
    pub text_path: PathBuf,
    pub entities_path: PathBuf,
    text: String,
    entities_csv: Vec<u8>,
}

impl ArtifactSet {
    /// Render both artifacts for `document` and its annotations.
    pub fn render(
        text_path: PathBuf,
        entities_suffix: &str,
        document: &NormalizedDocument,
        annotations: &[Annotation],
    ) -> Result<Self> {
        let entities_path = entities_path(&text_path, entities_suffix);
        let entities_csv = render_entities_csv(&file_name(&text_path), annotations)?;
        Ok(Self {
            text: render_text(document),
            entities_csv,
            text_path,
            entities_path,
        })
    }

    /// Write both files. Either both appear at their final paths or neither does.
    pub fn commit(self) -> Result<()> {
        let text_tmp = stage(&self.text_path, self.text.as_bytes())?;
        let csv_tmp = stage(&self.entities_path, &self.entities_csv)?;

        text_tmp
            .persist(&self.text_path)
            .map_err(|e| crate::DocnerError::Io(e.error))?;

        if let Err(e) = csv_tmp.persist(&self.entities_path) {
            if let Err(cleanup) = std::fs::remove_file(&self.text_path) {
                warn!(
                    "Failed to remove {} after aborted write: {}",
                    self.text_path.display(),
                    cleanup
                );
            }
            return Err(crate::DocnerError::Io(e.error));
        }

        debug!(
            "Wrote {} and {}",
            self.text_path.display(),
            self.entities_path.display()
        );
        Ok(())
    }
}

/// Write `contents` to a temporary file in the destination's directory.
fn stage(dest: &Path, contents: &[u8]) -> Result<NamedTempFile> {
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.flush()?;
    Ok(tmp)
}
