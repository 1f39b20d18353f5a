//! Rendering blogc source files to HTML.
//!
//! The [`Renderer`] trait is the seam between a source document and the text
//! extractor. [`BlogcRenderer`] implements it by asking the `blogc` binary to
//! evaluate the source's `CONTENT` and `TITLE` variables.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use crate::observe::{Event, NoopObserver, Observer};
use crate::{ProofreadError, Result};

/// Exit status blogc uses when `-p` names a variable the source does not define.
const VARIABLE_NOT_FOUND_STATUS: i32 = 78;

/// Turns a source document into an HTML string.
pub trait Renderer {
    /// Renders `source` to HTML.
    ///
    /// # Errors
    ///
    /// Fails when the source cannot be read or parsed, or a required variable
    /// is absent.
    fn render(&self, source: &Path) -> Result<String>;
}

/// Renderer backed by the `blogc` command line tool.
///
/// # Example
///
/// ```rust,no_run
/// use std::path::Path;
/// use proofread_core::{BlogcRenderer, Renderer};
///
/// let renderer = BlogcRenderer::new("blogc");
/// let html = renderer.render(Path::new("content/post.txt")).unwrap();
/// ```
#[derive(Clone)]
pub struct BlogcRenderer {
    binary: PathBuf,
    observer: Arc<dyn Observer>,
}

impl std::fmt::Debug for BlogcRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlogcRenderer").field("binary", &self.binary).finish_non_exhaustive()
    }
}

impl Default for BlogcRenderer {
    fn default() -> Self {
        Self::new("blogc")
    }
}

impl BlogcRenderer {
    /// Creates a renderer that runs `binary` (a path, or a name looked up in `PATH`).
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self { binary: binary.into(), observer: Arc::new(NoopObserver) }
    }

    /// Reports rendering progress to `observer`.
    pub fn with_observer(mut self, observer: Arc<dyn Observer>) -> Self {
        self.observer = observer;
        self
    }

    /// The binary this renderer runs.
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Version string reported by `blogc -v`.
    pub fn version(&self) -> Result<String> {
        let output = self.command().arg("-v").output().map_err(|e| self.unavailable(e))?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Evaluates a variable of `source`.
    ///
    /// Returns `Ok(None)` when the source does not define `name`.
    pub fn variable(&self, source: &Path, name: &str) -> Result<Option<String>> {
        let output = self
            .command()
            .arg("-p")
            .arg(name)
            .arg(source)
            .output()
            .map_err(|e| self.unavailable(e))?;

        if output.status.success() {
            let raw = String::from_utf8_lossy(&output.stdout);
            let value = raw.strip_suffix('\n').unwrap_or(&raw);
            return Ok(Some(value.to_string()));
        }

        if output.status.code() == Some(VARIABLE_NOT_FOUND_STATUS) {
            return Ok(None);
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let message = if stderr.is_empty() { format!("blogc exited with {}", output.status) } else { stderr };

        Err(ProofreadError::RenderError { source_file: source.to_path_buf(), message })
    }

    fn command(&self) -> Command {
        Command::new(&self.binary)
    }

    fn unavailable(&self, err: std::io::Error) -> ProofreadError {
        let message = match err.kind() {
            ErrorKind::NotFound => "not found".to_string(),
            _ => err.to_string(),
        };
        ProofreadError::RendererUnavailable { binary: self.binary.clone(), message }
    }
}

impl Renderer for BlogcRenderer {
    fn render(&self, source: &Path) -> Result<String> {
        if !source.exists() {
            return Err(ProofreadError::FileNotFound(source.to_path_buf()));
        }

        let version = self.version().ok();
        self.observer
            .notify(&Event::Rendering { source, renderer_version: version.as_deref() });

        let content = self.variable(source, "CONTENT")?.ok_or_else(|| ProofreadError::MissingVariable {
            source_file: source.to_path_buf(),
            name: "CONTENT".to_string(),
        })?;

        match self.variable(source, "TITLE")? {
            Some(title) => Ok(format!("<h1>{}</h1>\n{}", title, content)),
            None => Ok(content),
        }
    }
}
