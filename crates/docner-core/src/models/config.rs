//! Configuration structures for the annotation pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::catalog::EntityCatalog;

/// Main configuration for the docner pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocnerConfig {
    /// Line normalization configuration.
    pub normalize: NormalizeConfig,

    /// Entities to annotate, in output order.
    pub catalog: EntityCatalog,

    /// Artifact naming configuration.
    pub output: OutputConfig,

    /// OCR configuration.
    pub ocr: OcrConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,
}

impl Default for DocnerConfig {
    fn default() -> Self {
        Self {
            normalize: NormalizeConfig::default(),
            catalog: EntityCatalog::global_tiles(),
            output: OutputConfig::default(),
            ocr: OcrConfig::default(),
            pdf: PdfConfig::default(),
        }
    }
}

/// A known OCR-noise line that must never reach the normalized text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "match", content = "value", rename_all = "snake_case")]
pub enum DenyRule {
    /// Drop lines equal to the value.
    Exact(String),
    /// Drop lines starting with the value (including equal lines).
    Prefix(String),
}

impl DenyRule {
    /// Whether a trimmed line is rejected by this rule.
    pub fn matches(&self, line: &str) -> bool {
        match self {
            DenyRule::Exact(value) => line == value,
            DenyRule::Prefix(value) => line.starts_with(value.as_str()),
        }
    }
}

/// Normalizer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Scanner header/footer noise.
    pub denylist: Vec<DenyRule>,

    /// Lines appended after all extracted lines.
    pub synthetic_lines: Vec<String>,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            denylist: vec![
                DenyRule::Prefix("02920099399".to_string()),
                DenyRule::Exact("0292".to_string()),
            ],
            synthetic_lines: vec![
                "Product: TIS3067".to_string(),
                "Quantity: 1".to_string(),
                "Product: TIS4294".to_string(),
                "Quantity: 1".to_string(),
            ],
        }
    }
}

/// Artifact naming configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Replaces the source extension to name the normalized text file.
    pub text_suffix: String,

    /// Replaces the text file extension to name the entities table.
    pub entities_suffix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            text_suffix: "_extracted.txt".to_string(),
            entities_suffix: "_entities.csv".to_string(),
        }
    }
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Directory containing model files.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Text recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,

    /// Keep `[UNK]` tokens in recognized text instead of replacing with space.
    pub keep_unk: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            detection_model: "det.onnx".to_string(),
            recognition_model: "latin_rec.onnx".to_string(),
            dictionary: "latin_dict.txt".to_string(),
            keep_unk: false,
        }
    }
}

impl OcrConfig {
    /// Get full path to a model file.
    pub fn model_path(&self, model_name: &str) -> PathBuf {
        self.model_dir.join(model_name)
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Maximum pages to rasterize (0 = unlimited).
    pub max_pages: usize,

    /// Read the embedded text layer instead of running OCR.
    pub prefer_text_layer: bool,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            max_pages: 0,
            prefer_text_layer: false,
        }
    }
}

impl DocnerConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
