//! Interactive document selection on the terminal.

use std::path::PathBuf;

use console::{Term, style};
use docner_core::PathProvider;
use tracing::debug;

/// Asks for the document path on stderr and reads it from the terminal.
pub struct PromptPathProvider {
    title: String,
}

impl PromptPathProvider {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl PathProvider for PromptPathProvider {
    fn select(&mut self) -> docner_core::Result<Option<PathBuf>> {
        let session = PromptSession::open()?;
        let answer = session.ask(&self.title)?;
        Ok(parse_answer(&answer))
    }
}

/// Terminal held for the duration of one prompt. Restored on drop.
struct PromptSession {
    term: Term,
}

impl PromptSession {
    fn open() -> std::io::Result<Self> {
        let term = Term::stderr();
        term.show_cursor()?;
        Ok(Self { term })
    }

    fn ask(&self, title: &str) -> std::io::Result<String> {
        self.term
            .write_str(&format!("{} {}: ", style("?").cyan(), title))?;

        if self.term.is_term() {
            self.term.read_line()
        } else {
            let mut answer = String::new();
            std::io::stdin().read_line(&mut answer)?;
            Ok(answer)
        }
    }
}

impl Drop for PromptSession {
    fn drop(&mut self) {
        debug!("Closing prompt session");
        let _ = self.term.show_cursor();
        let _ = self.term.flush();
    }
}

/// Empty answers cancel; surrounding quotes from drag-and-drop are stripped.
fn parse_answer(answer: &str) -> Option<PathBuf> {
    let trimmed = answer.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| trimmed.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
        .unwrap_or(trimmed);

    if unquoted.is_empty() {
        None
    } else {
        Some(PathBuf::from(unquoted))
    }
}
