//! Entity occurrences located by the annotator.

use serde::{Deserialize, Serialize};

/// One qualifying occurrence of a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// 1-based line number.
    pub line: usize,
    /// 0-based character offset of the first matched character.
    pub begin_offset: usize,
    /// Exclusive end offset (`begin_offset` + length of `text` in characters).
    pub end_offset: usize,
    /// Matched literal text.
    pub text: String,
    /// Entity type tag of the catalog entry.
    pub entity_type: String,
}

impl Annotation {
    /// Attach the name of the text artifact the offsets refer to.
    pub fn into_record(self, file: impl Into<String>) -> AnnotationRecord {
        AnnotationRecord {
            file: file.into(),
            line: self.line,
            begin_offset: self.begin_offset,
            end_offset: self.end_offset,
            text: self.text,
            entity_type: self.entity_type,
        }
    }
}

/// A row of the entities table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    #[serde(rename = "File")]
    pub file: String,
    #[serde(rename = "Line")]
    pub line: usize,
    #[serde(rename = "BeginOffset")]
    pub begin_offset: usize,
    #[serde(rename = "EndOffset")]
    pub end_offset: usize,
    #[serde(rename = "Text")]
    pub text: String,
    #[serde(rename = "Type")]
    pub entity_type: String,
}
