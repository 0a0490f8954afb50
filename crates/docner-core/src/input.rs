//! Where the document path comes from.

use std::path::PathBuf;

use crate::error::Result;

/// Supplies the path of the document to process.
pub trait PathProvider {
    /// `Ok(None)` means the selection was cancelled.
    fn select(&mut self) -> Result<Option<PathBuf>>;
}

/// A path known up front (command-line argument, test fixture).
#[derive(Debug, Clone)]
pub struct FixedPath(Option<PathBuf>);

impl FixedPath {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(Some(path.into()))
    }

    /// A provider that always reports a cancelled selection.
    pub fn cancelled() -> Self {
        Self(None)
    }
}

impl PathProvider for FixedPath {
    fn select(&mut self) -> Result<Option<PathBuf>> {
        Ok(self.0.clone().filter(|p| !p.as_os_str().is_empty()))
    }
}
